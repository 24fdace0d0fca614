use std::cell::Cell;
use std::rc::Rc;

use super::{
    gap_fill_view::GapFillView, overview::Overview, place_value_view::PlaceValueView,
    spelling_view::SpellingView,
};
use crate::config::{AppConfig, DEFAULT_SPELLING_STORAGE_KEY};
use crate::model::Word;
use crate::state::catalog::{LOAD_FAILED_MESSAGE, fetch_catalog};
use crate::state::word_sets::{resolve_set, word_sets};
use crate::state::{LoadState, ResolvedSet, SetSelection};
use crate::util::SplitMix64;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

#[derive(PartialEq, Clone)]
enum View {
    Overview,
    Spelling(ResolvedSet),
    FullCatalog,
    GapFill(ResolvedSet),
    PlaceValue,
}

/// Set named by the URL fragment, e.g. `#uebung-2` or `#zufall`.
fn linked_selection() -> Option<SetSelection> {
    let hash = web_sys::window()?.location().hash().ok()?;
    SetSelection::from_slug(hash.trim_start_matches('#'))
}

fn set_fragment(fragment: &str) {
    if let Some(win) = web_sys::window() {
        let _ = win.location().set_hash(fragment);
    }
}

#[derive(Clone, PartialEq, Default)]
struct Catalog {
    state: LoadState,
    words: Rc<Vec<Word>>,
}

#[function_component(App)]
pub fn app() -> Html {
    let config = use_memo((), |_| AppConfig::from_build_env());
    let view = use_state(|| View::Overview);
    let catalog = use_state(Catalog::default);

    // Load the catalog once for the set overview
    {
        let catalog = catalog.clone();
        let config = config.clone();
        use_effect_with((), move |_| {
            let mounted = Rc::new(Cell::new(true));
            {
                let mounted = mounted.clone();
                spawn_local(async move {
                    let result = fetch_catalog(&config).await;
                    if !mounted.get() {
                        return;
                    }
                    match result {
                        Ok(words) => catalog.set(Catalog {
                            state: LoadState::Ready,
                            words: Rc::new(words),
                        }),
                        Err(e) => {
                            log::error!("Word catalog failed to load: {e}");
                            catalog.set(Catalog {
                                state: LoadState::Failed(LOAD_FAILED_MESSAGE.to_string()),
                                words: Rc::default(),
                            });
                        }
                    }
                });
            }
            move || mounted.set(false)
        });
    }

    // Deep link into a spelling set once its words are known
    {
        let view = view.clone();
        let words = catalog.words.clone();
        use_effect_with(catalog.state.clone(), move |state| {
            if *state == LoadState::Ready {
                if let Some(selection) = linked_selection() {
                    let mut rng = SplitMix64::from_browser();
                    if let Some(set) = resolve_set(selection, &words, &mut rng) {
                        view.set(View::Spelling(set));
                    }
                }
            }
            || ()
        });
    }

    let open_set = |to_view: fn(ResolvedSet) -> View| {
        let view = view.clone();
        let catalog = catalog.clone();
        Callback::from(move |selection: SetSelection| {
            let mut rng = SplitMix64::from_browser();
            match resolve_set(selection, &catalog.words, &mut rng) {
                Some(set) => {
                    set_fragment(&selection.slug());
                    view.set(to_view(set));
                }
                None => log::warn!("No word set {}", selection.slug()),
            }
        })
    };
    let go = |target: View| {
        let view = view.clone();
        Callback::from(move |_: ()| {
            if target == View::Overview {
                set_fragment("");
            }
            view.set(target.clone())
        })
    };
    let to_overview = go(View::Overview);

    let content = match &*view {
        View::Overview => html! { <Overview
            load_state={catalog.state.clone()}
            sets={word_sets(&catalog.words)}
            on_spelling={open_set(View::Spelling)}
            on_gap_fill={open_set(View::GapFill)}
            on_full_catalog={go(View::FullCatalog)}
            on_place_value={go(View::PlaceValue)}
        /> },
        View::Spelling(set) => html! { <SpellingView
            key={set.selection.slug()}
            title={set.title.clone()}
            description={set.description.clone()}
            words={set.words.clone()}
            storage_key={set.storage_key.clone()}
            on_back={to_overview}
        /> },
        // Fetches on its own and keeps progress under the default key.
        View::FullCatalog => html! { <SpellingView
            title={"Hörübung: Fehlerwörter"}
            storage_key={DEFAULT_SPELLING_STORAGE_KEY}
            on_back={to_overview}
        /> },
        View::GapFill(set) => html! { <GapFillView
            key={set.selection.slug()}
            title={set.title.clone()}
            words={set.words.clone()}
            pool={(*catalog.words).clone()}
            on_back={to_overview}
        /> },
        View::PlaceValue => html! { <PlaceValueView on_back={to_overview} /> },
    };

    html! {
        <ContextProvider<AppConfig> context={(*config).clone()}>
            <main style="max-width:960px; margin:0 auto; padding:24px 16px; font-family:system-ui, sans-serif; color:#e6edf3;">
                { content }
            </main>
        </ContextProvider<AppConfig>>
    }
}
