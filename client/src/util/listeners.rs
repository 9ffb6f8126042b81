//! Scoped, non-passive DOM event listeners.
//!
//! A gesture that starts on the tree keeps tracking the pointer after it
//! leaves the canvas. The host attaches move/end/cancel listeners to the
//! document when a gesture starts and holds the returned guard; dropping the
//! guard removes every listener it added. The same guard holds the canvas's
//! touch and wheel listeners, which must be non-passive.

use gloo_timers::callback::Timeout;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{AddEventListenerOptions, Event, EventTarget};

type Listener = Closure<dyn FnMut(Event)>;

/// Listeners attached to one target, removed on drop.
pub struct ListenerGuard {
    target: EventTarget,
    listeners: Vec<(&'static str, Listener)>,
}

impl ListenerGuard {
    pub fn new(target: EventTarget) -> Self {
        Self { target, listeners: Vec::new() }
    }

    /// Listeners on the page's document.
    ///
    /// # Errors
    ///
    /// Returns `Err` when there is no window or document.
    pub fn on_document() -> Result<Self, JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;
        Ok(Self::new(document.into()))
    }

    /// Add a non-passive listener for `event` so handlers may call
    /// `prevent_default` (needed to stop touch scrolling).
    ///
    /// # Errors
    ///
    /// Returns `Err` if the browser rejects the listener.
    pub fn listen(&mut self, event: &'static str, handler: impl FnMut(Event) + 'static) -> Result<(), JsValue> {
        let closure: Listener = Closure::new(handler);
        let options = AddEventListenerOptions::new();
        options.set_passive(false);
        self.target.add_event_listener_with_callback_and_add_event_listener_options(
            event,
            closure.as_ref().unchecked_ref(),
            &options,
        )?;
        self.listeners.push((event, closure));
        Ok(())
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        for (event, closure) in &self.listeners {
            if let Err(err) = self.target.remove_event_listener_with_callback(event, closure.as_ref().unchecked_ref()) {
                log::warn!("remove {event} listener failed: {err:?}");
            }
        }
        // The guard is usually dropped from inside one of its own handlers;
        // free the closures after that handler has returned.
        let listeners = std::mem::take(&mut self.listeners);
        if !listeners.is_empty() {
            Timeout::new(0, move || drop(listeners)).forget();
        }
    }
}
