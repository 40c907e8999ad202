//! Scroll and keyboard input wiring.
//!
//! All handlers funnel into the shared `ScrollState`; nothing here touches
//! the scene or the renderer directly.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys as web;

use story_core::ScrollState;

fn viewport_height() -> f32 {
    web::window()
        .and_then(|w| w.inner_height().ok())
        .and_then(|v| v.as_f64())
        .map(|v| v as f32)
        .unwrap_or(800.0)
}

pub fn wire_wheel(scroll: Rc<RefCell<ScrollState>>) {
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::WheelEvent| {
        // delta_mode 1 reports lines rather than pixels
        let scale = if ev.delta_mode() == 1 { 33.0 } else { 1.0 };
        scroll
            .borrow_mut()
            .apply_wheel(ev.delta_y() as f32 * scale, viewport_height());
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

pub fn wire_touch(scroll: Rc<RefCell<ScrollState>>) {
    let last_y: Rc<RefCell<Option<f32>>> = Rc::new(RefCell::new(None));

    {
        let last_y = last_y.clone();
        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::TouchEvent| {
            if let Some(touch) = ev.touches().get(0) {
                *last_y.borrow_mut() = Some(touch.client_y() as f32);
            }
        }) as Box<dyn FnMut(_)>);
        if let Some(wnd) = web::window() {
            _ = wnd.add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
        }
        closure.forget();
    }

    {
        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::TouchEvent| {
            if let Some(touch) = ev.touches().get(0) {
                let y = touch.client_y() as f32;
                let mut last = last_y.borrow_mut();
                if let Some(prev) = *last {
                    scroll.borrow_mut().apply_drag(y - prev, viewport_height());
                }
                *last = Some(y);
            }
            ev.prevent_default();
        }) as Box<dyn FnMut(_)>);
        if let Some(wnd) = web::window() {
            _ = wnd.add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
        }
        closure.forget();
    }
}

pub fn wire_keyboard(scroll: Rc<RefCell<ScrollState>>) {
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
        match ev.key().as_str() {
            "ArrowDown" | "PageDown" | " " => {
                scroll.borrow_mut().jump_chapters(1);
                ev.prevent_default();
            }
            "ArrowUp" | "PageUp" => {
                scroll.borrow_mut().jump_chapters(-1);
                ev.prevent_default();
            }
            _ => {}
        }
    }) as Box<dyn FnMut(_)>);
    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
