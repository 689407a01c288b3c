use leptos::*;
use leptos_use::{use_document, use_event_listener_with_options, UseEventListenerOptions};
use wasm_bindgen::JsCast;

use crate::session::RegionItem;

/// Suggestion list cap; enough to scan, small enough to stay readable.
const SUGGESTION_LIMIT: usize = 30;

/// Case-insensitive substring match over region names, alphabetical,
/// capped at [`SUGGESTION_LIMIT`]. A blank query matches nothing.
fn match_regions(regions: &[RegionItem], query: &str) -> Vec<RegionItem> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    let mut found: Vec<RegionItem> = regions
        .iter()
        .filter(|item| item.name.to_lowercase().contains(&needle))
        .cloned()
        .collect();
    found.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    found.truncate(SUGGESTION_LIMIT);
    found
}

/// What a key press in the search input does, decided apart from the
/// signals so the keyboard behavior is testable without a DOM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyAction {
    /// Move the highlight to this suggestion index.
    Highlight(usize),
    /// Activate the suggestion at this index.
    Activate(usize),
    /// Clear the query, the suggestion list and the active region.
    Reset,
    Ignore,
}

fn key_action(key: &str, total: usize, highlighted: Option<usize>) -> KeyAction {
    match key {
        "ArrowDown" if total > 0 => KeyAction::Highlight(match highlighted {
            Some(index) => (index + 1).min(total - 1),
            None => 0,
        }),
        "ArrowUp" if total > 0 => {
            KeyAction::Highlight(highlighted.map_or(0, |index| index.saturating_sub(1)))
        }
        "Enter" if total > 0 => KeyAction::Activate(highlighted.unwrap_or(0).min(total - 1)),
        "Escape" => KeyAction::Reset,
        _ => KeyAction::Ignore,
    }
}

/// Type-ahead search over region names.
///
/// Substring match, case-insensitive, alphabetical, capped at
/// [`SUGGESTION_LIMIT`]. Arrow keys move the highlight, Enter or a click
/// activates a region, and Escape or blanking the input clears the list
/// together with the active highlight on the map.
#[component]
pub fn RegionSearch(
    #[prop(into)] regions: Signal<Vec<RegionItem>>,
    #[prop(into)] on_activate: Callback<String>,
    #[prop(into)] on_clear: Callback<()>,
) -> impl IntoView {
    let (query, set_query) = create_signal(String::new());
    let (open, set_open) = create_signal(false);
    let (highlighted, set_highlighted) = create_signal(None::<usize>);

    let matches = create_memo(move |_| {
        let query = query.get();
        regions.with(|all| match_regions(all, &query))
    });

    let choose = Callback::new(move |item: RegionItem| {
        set_query.set(item.name.clone());
        set_open.set(false);
        set_highlighted.set(None);
        on_activate.call(item.id);
    });

    let on_input = move |ev| {
        let value = event_target_value(&ev);
        let blank = value.trim().is_empty();
        set_query.set(value);
        set_highlighted.set(None);
        set_open.set(!blank);
        if blank {
            on_clear.call(());
        }
    };

    let on_keydown = move |ev: web_sys::KeyboardEvent| {
        let total = matches.with(Vec::len);
        match key_action(&ev.key(), total, highlighted.get_untracked()) {
            KeyAction::Highlight(index) => {
                ev.prevent_default();
                set_open.set(true);
                set_highlighted.set(Some(index));
            }
            KeyAction::Activate(index) => {
                ev.prevent_default();
                if let Some(item) = matches.with(|found| found.get(index).cloned()) {
                    choose.call(item);
                }
            }
            KeyAction::Reset => {
                set_query.set(String::new());
                set_open.set(false);
                set_highlighted.set(None);
                on_clear.call(());
            }
            KeyAction::Ignore => {}
        }
    };

    // A click anywhere outside the widget closes the list. Capture phase,
    // so it still runs when the click lands on something that stops
    // propagation.
    let _ = use_event_listener_with_options(
        use_document(),
        leptos::ev::click,
        move |event: web_sys::MouseEvent| {
            let inside = event
                .target()
                .and_then(|target| target.dyn_into::<web_sys::Element>().ok())
                .map(|element| element.closest(".region-search").ok().flatten().is_some())
                .unwrap_or(false);
            if !inside {
                set_open.set(false);
            }
        },
        UseEventListenerOptions::default().capture(true),
    );

    view! {
        <div class="region-search relative w-72 max-w-full">
            <input
                class="w-full rounded-lg border border-slate-700 bg-slate-900 px-3 py-2 text-sm outline-none placeholder:text-slate-500 focus:border-sky-500"
                type="search"
                placeholder="Search regions"
                aria-label="Search regions"
                prop:value=query
                on:input=on_input
                on:keydown=on_keydown
            />
            <Show when=move || open.get() && !matches.with(Vec::is_empty)>
                <ul class="absolute left-0 right-0 top-full z-20 mt-1 max-h-72 overflow-auto rounded-lg border border-slate-700 bg-slate-900 py-1 text-sm shadow-xl">
                    <For
                        each=move || { matches.get().into_iter().enumerate().collect::<Vec<_>>() }
                        key=|(_, item)| item.id.clone()
                        children=move |(index, item)| {
                            let picked = item.clone();
                            view! {
                                <li>
                                    <button
                                        class="block w-full px-3 py-1.5 text-left hover:bg-slate-800"
                                        class=("bg-slate-800", move || highlighted.get() == Some(index))
                                        on:mousedown=move |ev| ev.prevent_default()
                                        on:click=move |_| choose.call(picked.clone())
                                    >
                                        {item.name.clone()}
                                    </button>
                                </li>
                            }
                        }
                    />
                </ul>
            </Show>
        </div>
    }
}
