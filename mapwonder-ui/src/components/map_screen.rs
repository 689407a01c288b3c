use leptos::*;
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};

use crate::components::RegionSearch;
use crate::config::MapConfig;
use crate::session::{next_frame, MapSession, RegionItem};

/// One mounted map: header with search, then the interactive document.
///
/// The SVG is fetched and injected imperatively, and everything inside
/// it is owned by a [`MapSession`] rather than the reactive tree; the
/// component's only jobs are the static shell and the session's
/// lifecycle. Unmounting drops the session, which detaches every
/// listener it wired.
#[component]
pub fn MapScreen(config: &'static MapConfig) -> impl IntoView {
    let container_ref = create_node_ref::<html::Div>();
    let session_store = store_value::<Option<Rc<MapSession>>>(None);
    let (regions, set_regions) = create_signal(Vec::<RegionItem>::new());
    let (load_error, set_load_error) = create_signal(None::<String>);

    create_effect(move |_| {
        let Some(container) = container_ref.get() else {
            return;
        };
        let element = container.unchecked_ref::<web_sys::Element>().clone();
        spawn_local(async move {
            match load_map(&element, config).await {
                Ok(session) => {
                    set_regions.set(session.region_items());
                    // If the component unmounted during the fetch the store
                    // is gone and the session drops right here, detaching
                    // everything it wired.
                    let _ = session_store.try_update_value(|slot| *slot = Some(session));
                }
                Err(error) => {
                    log::error!("failed to load map {}: {error:?}", config.slug);
                    set_load_error.set(Some(format!(
                        "Could not load the {} map. Check the connection and reload.",
                        config.title
                    )));
                }
            }
        });
    });

    on_cleanup(move || {
        session_store.set_value(None);
    });

    let on_activate = move |id: String| {
        session_store.with_value(|slot| {
            if let Some(session) = slot {
                session.activate_region(&id);
            }
        });
    };
    let on_clear = move |_: ()| {
        session_store.with_value(|slot| {
            if let Some(session) = slot {
                session.clear_active_region();
            }
        });
    };

    view! {
        <div class="min-h-screen bg-slate-950 text-slate-100">
            <header class="flex flex-wrap items-center gap-4 border-b border-slate-800 px-6 py-4">
                <a class="text-sm text-sky-400 hover:text-sky-300" href="#">
                    "All maps"
                </a>
                {config
                    .logo_url
                    .map(|url| {
                        view! {
                            <img
                                class="h-10 w-10"
                                src=url
                                alt=config.logo_alt.unwrap_or(config.title)
                            />
                        }
                    })}
                <div class="flex-1">
                    <h1 class="text-lg font-semibold">{config.title}</h1>
                    <p class="text-xs text-slate-400">{config.tagline}</p>
                </div>
                <RegionSearch regions=regions on_activate=on_activate on_clear=on_clear />
            </header>
            {move || {
                load_error
                    .get()
                    .map(|message| {
                        view! { <p class="px-6 py-4 text-sm text-rose-400">{message}</p> }
                    })
            }}
            <div
                node_ref=container_ref
                class="map-surface relative mx-auto max-w-4xl overflow-hidden px-6 py-6"
            ></div>
        </div>
    }
}

/// Fetches the SVG document, injects it and hands it to a new session.
async fn load_map(
    container: &web_sys::Element,
    config: &'static MapConfig,
) -> Result<Rc<MapSession>, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let fetched =
        wasm_bindgen_futures::JsFuture::from(window.fetch_with_str(config.svg_url)).await?;
    let response: web_sys::Response = fetched.dyn_into()?;
    if !response.ok() {
        return Err(JsValue::from_str(&format!(
            "fetching {} failed with status {}",
            config.svg_url,
            response.status()
        )));
    }
    let text = wasm_bindgen_futures::JsFuture::from(response.text()?).await?;
    let markup = text.as_string().unwrap_or_default();

    container.set_inner_html(&markup);
    // Let the injected document lay out once before the session measures
    // it; a bounding-box extent read on the injection frame sees zeros.
    next_frame().await;
    MapSession::attach(container, config)
}
