//! Virtual-time scheduler
//!
//! Used by the headless runner and tests. Time only moves when `advance` is
//! called; due callbacks are then handed out one at a time by `pop_due` so a
//! callback that cancels another is honored immediately.

use super::{FrameRequest, IntervalId, Scheduler, Timer};
use crate::consts::FRAME_MS;

/// A callback that is due
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wakeup {
    Frame(FrameRequest),
    Timer(Timer),
}

#[derive(Debug, Clone)]
struct PendingFrame {
    request: FrameRequest,
    due_ms: f64,
}

#[derive(Debug, Clone)]
struct Interval {
    id: IntervalId,
    timer: Timer,
    period_ms: f64,
    next_due_ms: f64,
}

#[derive(Debug, Clone)]
pub struct ManualScheduler {
    now_ms: f64,
    frame_ms: f64,
    next_handle: i32,
    frames: Vec<PendingFrame>,
    intervals: Vec<Interval>,
}

impl Default for ManualScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualScheduler {
    /// Scheduler with a 60 Hz display
    pub fn new() -> Self {
        Self::with_frame_ms(FRAME_MS)
    }

    pub fn with_frame_ms(frame_ms: f64) -> Self {
        Self {
            now_ms: 0.0,
            frame_ms,
            next_handle: 1,
            frames: Vec::new(),
            intervals: Vec::new(),
        }
    }

    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    pub fn frame_ms(&self) -> f64 {
        self.frame_ms
    }

    pub fn pending_frames(&self) -> usize {
        self.frames.len()
    }

    pub fn active_intervals(&self) -> usize {
        self.intervals.len()
    }

    /// Check if a timer of the given kind is armed
    pub fn has_interval(&self, timer: Timer) -> bool {
        self.intervals.iter().any(|i| i.timer == timer)
    }

    /// Move virtual time forward
    pub fn advance(&mut self, ms: f64) {
        self.now_ms += ms;
    }

    /// Take the earliest callback due at or before the current time.
    /// Ties go to whichever was registered first.
    pub fn pop_due(&mut self) -> Option<Wakeup> {
        let frame = self
            .frames
            .iter()
            .enumerate()
            .filter(|(_, f)| f.due_ms <= self.now_ms)
            .min_by(|(_, a), (_, b)| {
                a.due_ms
                    .total_cmp(&b.due_ms)
                    .then(a.request.0.cmp(&b.request.0))
            })
            .map(|(index, f)| (index, f.due_ms, f.request.0));

        let interval = self
            .intervals
            .iter()
            .enumerate()
            .filter(|(_, i)| i.next_due_ms <= self.now_ms)
            .min_by(|(_, a), (_, b)| {
                a.next_due_ms
                    .total_cmp(&b.next_due_ms)
                    .then(a.id.0.cmp(&b.id.0))
            })
            .map(|(index, i)| (index, i.next_due_ms, i.id.0));

        let take_frame = match (frame, interval) {
            (None, None) => return None,
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (Some((_, f_due, f_id)), Some((_, i_due, i_id))) => {
                f_due.total_cmp(&i_due).then(f_id.cmp(&i_id)).is_lt()
            }
        };

        if take_frame {
            let (index, _, _) = frame?;
            let pending = self.frames.remove(index);
            Some(Wakeup::Frame(pending.request))
        } else {
            let (index, _, _) = interval?;
            let interval = &mut self.intervals[index];
            interval.next_due_ms += interval.period_ms;
            Some(Wakeup::Timer(interval.timer))
        }
    }

    fn next_handle(&mut self) -> i32 {
        let handle = self.next_handle;
        self.next_handle += 1;
        handle
    }
}

impl Scheduler for ManualScheduler {
    fn request_frame(&mut self) -> Option<FrameRequest> {
        let request = FrameRequest(self.next_handle());
        self.frames.push(PendingFrame {
            request,
            due_ms: self.now_ms + self.frame_ms,
        });
        Some(request)
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        self.frames.retain(|f| f.request != request);
    }

    fn set_interval(&mut self, timer: Timer, period_ms: u32) -> Option<IntervalId> {
        if period_ms == 0 {
            return None;
        }
        let id = IntervalId(self.next_handle());
        self.intervals.push(Interval {
            id,
            timer,
            period_ms: period_ms as f64,
            next_due_ms: self.now_ms + period_ms as f64,
        });
        Some(id)
    }

    fn clear_interval(&mut self, id: IntervalId) {
        self.intervals.retain(|i| i.id != id);
    }
}
