use leptos::*;

use crate::config::MAP_CATALOG;

/// Landing page: one card per catalog entry, linking via the URL hash.
#[component]
pub fn Landing() -> impl IntoView {
    view! {
        <main class="min-h-screen bg-slate-950 text-slate-100">
            <header class="px-8 pt-16 pb-10 text-center">
                <h1 class="text-4xl font-semibold tracking-tight">"Map Explorer"</h1>
                <p class="mt-3 text-slate-400">
                    "Interactive vector maps with live deployment markers."
                </p>
            </header>
            <section class="mx-auto grid max-w-5xl gap-6 px-8 pb-16 sm:grid-cols-2 lg:grid-cols-3">
                {MAP_CATALOG
                    .iter()
                    .map(|config| {
                        view! {
                            <a
                                class="group rounded-2xl border border-slate-800 bg-slate-900 p-6 transition-colors hover:border-slate-600"
                                href=format!("#{}", config.slug)
                            >
                                <img
                                    class="h-36 w-full rounded-xl bg-slate-800 object-contain p-3"
                                    src=config.thumbnail()
                                    alt=format!("{} map preview", config.title)
                                    loading="lazy"
                                />
                                <h2 class="mt-4 text-xl font-medium group-hover:text-white">
                                    {config.title}
                                </h2>
                                <p class="mt-2 text-sm text-slate-400">{config.tagline}</p>
                                <span class="mt-4 inline-block text-sm text-sky-400">
                                    "Open map"
                                </span>
                            </a>
                        }
                    })
                    .collect_view()}
            </section>
        </main>
    }
}
