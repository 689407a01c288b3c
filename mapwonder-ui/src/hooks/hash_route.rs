//! Hash-based routing.
//!
//! The URL hash is the whole routing state: `#thailand` opens that map,
//! an empty or unknown hash shows the landing page. Keeping it in the
//! hash makes every map view a shareable link without a router.

use leptos::*;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::JsCast;

/// Normalized `location.hash`: leading `#` stripped, trimmed, lowercased.
pub fn read_hash() -> String {
    web_sys::window()
        .and_then(|window| window.location().hash().ok())
        .map(|hash| hash.trim_start_matches('#').trim().to_ascii_lowercase())
        .unwrap_or_default()
}

/// Reactive view of the URL hash, updated on every `hashchange`.
pub fn use_hash_route() -> ReadSignal<String> {
    let (route, set_route) = create_signal(read_hash());

    // Store the closure so it lives for the component lifetime
    let handler_storage = store_value::<Option<Closure<dyn FnMut(web_sys::HashChangeEvent)>>>(None);

    create_effect(move |_| {
        let handler = Closure::wrap(Box::new(move |_event: web_sys::HashChangeEvent| {
            set_route.set(read_hash());
        }) as Box<dyn FnMut(web_sys::HashChangeEvent)>);

        if let Some(window) = web_sys::window() {
            let _ =
                window.add_event_listener_with_callback("hashchange", handler.as_ref().unchecked_ref());
        }

        handler_storage.set_value(Some(handler));

        on_cleanup(move || {
            handler_storage.with_value(|handler_opt| {
                if let Some(handler) = handler_opt {
                    if let Some(window) = web_sys::window() {
                        let _ = window.remove_event_listener_with_callback(
                            "hashchange",
                            handler.as_ref().unchecked_ref(),
                        );
                    }
                }
            });
            handler_storage.set_value(None);
        });
    });

    route
}
