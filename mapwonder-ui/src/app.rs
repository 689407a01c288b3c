use leptos::*;

use crate::components::{Landing, MapScreen};
use crate::config::get_map;
use crate::hooks::use_hash_route;

/// Root of the app: resolves the URL hash against the map catalog and
/// shows either the landing page or one mounted map. Switching the hash
/// unmounts the previous map, which tears its session down.
#[component]
pub fn App() -> impl IntoView {
    let route = use_hash_route();

    create_effect(move |_| {
        let title = match get_map(&route.get()) {
            Some(config) => format!("{} - Map Explorer", config.title),
            None => "Map Explorer".to_string(),
        };
        if let Some(document) = web_sys::window().and_then(|window| window.document()) {
            document.set_title(&title);
        }
    });

    view! {
        {move || match get_map(&route.get()) {
            Some(config) => view! { <MapScreen config=config /> }.into_view(),
            None => view! { <Landing /> }.into_view(),
        }}
    }
}
