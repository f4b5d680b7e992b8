use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Weak;

use vitrine::autoplay::IntervalScheduler;
use vitrine::registry::CarouselId;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use super::WebPage;

/// `window.setInterval` timers that tick the page's carousels.
///
/// The callback closure of every live timer is owned here and dropped when the
/// timer is cleared.
pub(super) struct WebScheduler {
    page: Weak<RefCell<WebPage>>,
    callbacks: HashMap<i32, Closure<dyn FnMut()>>,
}

impl WebScheduler {
    pub(super) fn new(page: Weak<RefCell<WebPage>>) -> Self {
        Self {
            page,
            callbacks: HashMap::new(),
        }
    }
}

impl IntervalScheduler for WebScheduler {
    type Handle = i32;

    fn start_interval(&mut self, target: CarouselId, period_ms: u32) -> Option<i32> {
        let window = web_sys::window()?;
        let page = self.page.clone();
        let cb = Closure::wrap(Box::new(move || {
            let Some(page) = page.upgrade() else {
                return;
            };
            // A tick landing while the page is mid-update is simply dropped.
            if let Ok(mut page) = page.try_borrow_mut() {
                page.autoplay_tick(target);
            }
        }) as Box<dyn FnMut()>);

        let timeout = i32::try_from(period_ms).unwrap_or(i32::MAX);
        let id = window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                cb.as_ref().unchecked_ref::<js_sys::Function>(),
                timeout,
            )
            .ok()?;
        self.callbacks.insert(id, cb);
        Some(id)
    }

    fn clear_interval(&mut self, handle: i32) {
        if let Some(w) = web_sys::window() {
            w.clear_interval_with_handle(handle);
        }
        self.callbacks.remove(&handle);
    }
}
