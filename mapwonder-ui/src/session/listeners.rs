//! Event listener ownership.
//!
//! Every listener a map session attaches goes through [`ListenerRegistry`]
//! so the session can guarantee that all of them come off their targets
//! together. Dropping the registry removes each listener with the same
//! capture flag it was added with and then frees the Rust closure behind
//! it, so no callback can fire into a torn-down session.

use std::any::Any;

use wasm_bindgen::prelude::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{AddEventListenerOptions, EventTarget};

struct ListenerEntry {
    target: EventTarget,
    event: &'static str,
    function: js_sys::Function,
    capture: bool,
    // Keeps the wrapped Rust closure alive for as long as the listener
    // is attached.
    _closure: Box<dyn Any>,
}

pub struct ListenerRegistry {
    listeners: Vec<ListenerEntry>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    /// Attach a bubbling-phase listener with default options.
    pub fn add<E: 'static>(
        &mut self,
        target: &EventTarget,
        event: &'static str,
        closure: Closure<dyn FnMut(E)>,
    ) -> Result<(), JsValue> {
        self.add_entry(target, event, closure, false, None)
    }

    /// Attach a bubbling-phase listener with `passive: false` so the
    /// handler may call `prevent_default`.
    pub fn add_nonpassive<E: 'static>(
        &mut self,
        target: &EventTarget,
        event: &'static str,
        closure: Closure<dyn FnMut(E)>,
    ) -> Result<(), JsValue> {
        self.add_entry(target, event, closure, false, Some(false))
    }

    /// Attach a capture-phase listener with `passive: false`. Used for
    /// the window-level wheel hook, which must win against page scroll
    /// handlers.
    pub fn add_captured_nonpassive<E: 'static>(
        &mut self,
        target: &EventTarget,
        event: &'static str,
        closure: Closure<dyn FnMut(E)>,
    ) -> Result<(), JsValue> {
        self.add_entry(target, event, closure, true, Some(false))
    }

    fn add_entry<E: 'static>(
        &mut self,
        target: &EventTarget,
        event: &'static str,
        closure: Closure<dyn FnMut(E)>,
        capture: bool,
        passive: Option<bool>,
    ) -> Result<(), JsValue> {
        let function: js_sys::Function = closure.as_ref().unchecked_ref::<js_sys::Function>().clone();
        if capture || passive.is_some() {
            let options = AddEventListenerOptions::new();
            options.set_capture(capture);
            if let Some(passive) = passive {
                options.set_passive(passive);
            }
            target.add_event_listener_with_callback_and_add_event_listener_options(
                event, &function, &options,
            )?;
        } else {
            target.add_event_listener_with_callback(event, &function)?;
        }
        self.listeners.push(ListenerEntry {
            target: target.clone(),
            event,
            function,
            capture,
            _closure: Box::new(closure),
        });
        Ok(())
    }

    #[cfg(all(test, target_arch = "wasm32"))]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }
}

impl Drop for ListenerRegistry {
    fn drop(&mut self) {
        for entry in self.listeners.drain(..) {
            // Removal must use the same capture flag as registration.
            let removed = if entry.capture {
                entry.target.remove_event_listener_with_callback_and_bool(
                    entry.event,
                    &entry.function,
                    true,
                )
            } else {
                entry
                    .target
                    .remove_event_listener_with_callback(entry.event, &entry.function)
            };
            if removed.is_err() {
                log::warn!("failed to remove {} listener", entry.event);
            }
        }
    }
}
