use super::wheel::dispatch_scroll;
use crate::core::TransitionController;
use crate::input::scroll_delta_for_key;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

// Arrow and page keys step through presets with the same debounce as the wheel
pub fn wire_keydown(controller: Rc<RefCell<TransitionController>>, clock: Instant) {
    if let Some(window) = web::window() {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                if ev.repeat() {
                    return;
                }
                if let Some(delta) = scroll_delta_for_key(&ev.key()) {
                    dispatch_scroll(&controller, delta, clock);
                    ev.prevent_default();
                }
            }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
