//! DOM presenter
//!
//! Each ball is a `div.ball` inside `#balls`; the basket is `#basket`. Both
//! are positioned through CSS custom properties (`--left`, `--top`, ...) so
//! all visuals stay in the stylesheet. Missing elements are logged and
//! skipped; presentation never fails the game loop.

use std::collections::HashMap;

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use super::{Hud, Presenter, ViewHandle};
use crate::consts::BALL_SIZE;
use crate::sim::{Ball, BallId, GamePhase};

pub struct DomPresenter {
    document: Document,
    container: Option<Element>,
    basket: Option<HtmlElement>,
    balls: HashMap<ViewHandle, HtmlElement>,
    next_handle: u32,
}

fn set_property(el: &HtmlElement, key: &str, value: &str) {
    if let Err(e) = el.style().set_property(key, value) {
        log::warn!("Failed to set {}: {:?}", key, e);
    }
}

impl DomPresenter {
    pub fn new(document: Document) -> Self {
        let container = document.get_element_by_id("balls").or_else(|| {
            log::warn!("No #balls container; balls go into <body>");
            document.body().map(Element::from)
        });
        let basket = document
            .get_element_by_id("basket")
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());
        if basket.is_none() {
            log::warn!("No #basket element");
        }

        Self {
            document,
            container,
            basket,
            balls: HashMap::new(),
            next_handle: 0,
        }
    }

    fn create_element(&self, id: BallId) -> Option<HtmlElement> {
        let el = match self.document.create_element("div") {
            Ok(el) => el,
            Err(e) => {
                log::error!("Failed to create view for {:?}: {:?}", id, e);
                return None;
            }
        };
        let _ = el.class_list().add_1("ball");
        let el: HtmlElement = el.dyn_into().ok()?;
        set_property(&el, "--size", &format!("{}px", BALL_SIZE));

        if let Some(container) = &self.container
            && let Err(e) = container.append_child(&el)
        {
            log::error!("Failed to attach view for {:?}: {:?}", id, e);
        }
        Some(el)
    }

    fn set_hud_value(&self, selector: &str, text: &str) {
        if let Some(el) = self.document.query_selector(selector).ok().flatten() {
            el.set_text_content(Some(text));
        }
    }
}

impl Presenter for DomPresenter {
    fn create_ball_view(&mut self, id: BallId) -> ViewHandle {
        let handle = ViewHandle(self.next_handle);
        self.next_handle = self.next_handle.wrapping_add(1);
        if let Some(el) = self.create_element(id) {
            self.balls.insert(handle, el);
        }
        handle
    }

    fn update_ball_view(&mut self, view: ViewHandle, ball: &Ball) {
        let Some(el) = self.balls.get(&view) else {
            return;
        };
        set_property(el, "--left", &format!("{}px", ball.pos.x));
        set_property(el, "--top", &format!("{}px", ball.pos.y));
        set_property(el, "--acceleration", &ball.acceleration.to_string());
        set_property(el, "--caught", if ball.caught { "1" } else { "0" });
    }

    fn destroy_ball_view(&mut self, view: ViewHandle) {
        if let Some(el) = self.balls.remove(&view) {
            el.remove();
        }
    }

    fn update_basket(&mut self, x: f32) {
        if let Some(basket) = &self.basket {
            set_property(basket, "--left", &format!("{}px", x));
        }
    }

    fn update_hud(&mut self, hud: &Hud) {
        self.set_hud_value("#hud-score .hud-value", &hud.score.to_string());

        if let Some(el) = self.document.get_element_by_id("hud-time") {
            let _ = el
                .class_list()
                .toggle_with_force("hidden", hud.time_left_secs.is_none());
        }
        if let Some(secs) = hud.time_left_secs {
            self.set_hud_value("#hud-time .hud-value", &secs.to_string());
        }

        if let Some(el) = self.document.get_element_by_id("game-over") {
            let over = hud.phase == GamePhase::Stopped;
            let _ = el.class_list().toggle_with_force("hidden", !over);
            if over && let Some(score_el) = self.document.get_element_by_id("final-score") {
                score_el.set_text_content(Some(&hud.score.to_string()));
            }
        }
    }
}
