//! Catch and miss detection
//!
//! Comparisons are strict where noted: a ball exactly at the viewport bottom
//! has not been missed yet, and a ball exactly on the basket line can be caught.

use crate::Viewport;

/// Catch geometry for the basket
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatchZone {
    /// Basket center x
    pub basket_x: f32,
    /// Y a ball must reach (inclusive)
    pub line_y: f32,
    /// Horizontal reach from `basket_x` (exclusive)
    pub radius: f32,
}

impl CatchZone {
    pub fn new(viewport: &Viewport, basket_x: f32, basket_height: f32, radius: f32) -> Self {
        Self {
            basket_x,
            line_y: viewport.basket_line(basket_height),
            radius,
        }
    }

    /// Check if a ball at `pos` is inside the basket
    #[inline]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        y >= self.line_y && (x - self.basket_x).abs() < self.radius
    }
}

/// Check if a ball fell past the bottom of the viewport
#[inline]
pub fn is_missed(y: f32, viewport: &Viewport) -> bool {
    y > viewport.height
}
