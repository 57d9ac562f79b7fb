use crate::core::{TransitionController, WheelOutcome};
use crate::input;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Feed a signed scroll delta to the controller and log the outcome.
pub fn dispatch_scroll(controller: &Rc<RefCell<TransitionController>>, delta_y: f64, clock: Instant) {
    let now = clock.elapsed().as_secs_f64();
    match controller.borrow_mut().on_wheel(delta_y, now) {
        WheelOutcome::Started { from, to, direction } => {
            log::debug!("[input] scroll {:+.0} starts {} -> {} (dir {})", delta_y, from, to, direction);
        }
        WheelOutcome::Rejected(reason) => {
            log::debug!("[input] scroll {:+.0} rejected: {:?}", delta_y, reason);
        }
    }
}

pub fn wire_wheel(controller: Rc<RefCell<TransitionController>>, clock: Instant) {
    if let Some(window) = web::window() {
        let closure = Closure::wrap(Box::new(move |ev: web::WheelEvent| {
            let page_h = web::window()
                .and_then(|w| w.inner_height().ok())
                .and_then(|v| v.as_f64())
                .unwrap_or(800.0);
            let delta = input::wheel_delta_px(ev.delta_y(), ev.delta_mode(), page_h);
            dispatch_scroll(&controller, delta, clock);
        }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
