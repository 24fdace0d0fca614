use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{HtmlAudioElement, KeyboardEvent};
use yew::prelude::*;

use super::{
    audio_button::AudioButton, input_display::InputDisplay, letter_grid::LetterGrid,
    success_popup::SuccessPopup,
};
use crate::config::AppConfig;
use crate::model::{FeedbackTone, GameStatus, Word};
use crate::state::catalog::{LOAD_FAILED_MESSAGE, fetch_catalog};
use crate::state::{ProgressStore, SpellingAction, SpellingGame, prepare_words};
use crate::util::SplitMix64;

#[derive(Properties, PartialEq, Clone)]
pub struct SpellingViewProps {
    pub title: String,
    #[prop_or_default]
    pub description: String,
    /// Explicit word list; empty means the full catalog is fetched.
    #[prop_or_default]
    pub words: Vec<Word>,
    pub storage_key: String,
    pub on_back: Callback<()>,
}

#[function_component]
pub fn SpellingView(props: &SpellingViewProps) -> Html {
    let config = use_context::<AppConfig>().unwrap_or_else(AppConfig::from_build_env);
    let game = {
        let config = config.clone();
        let words = props.words.clone();
        use_reducer(move || {
            SpellingGame::with_words(
                prepare_words(words, &config),
                config.shuffle_letters,
                SplitMix64::from_browser(),
            )
        })
    };
    let store = use_memo((), |_| ProgressStore::browser());
    let audio_ref = use_node_ref();
    let audio_busy = use_state(|| false);
    let show_hint = use_state(|| false);

    // Catalog fetch; results arriving after unmount are dropped.
    {
        let game = game.clone();
        let config = config.clone();
        let needs_fetch = props.words.is_empty();
        use_effect_with((), move |_| {
            let mounted = Rc::new(Cell::new(true));
            if needs_fetch {
                let mounted = mounted.clone();
                spawn_local(async move {
                    let result = fetch_catalog(&config).await;
                    if !mounted.get() {
                        return;
                    }
                    match result {
                        Ok(words) => game.dispatch(SpellingAction::CatalogLoaded(words)),
                        Err(e) => {
                            log::error!("Word catalog failed to load: {e}");
                            game.dispatch(SpellingAction::CatalogFailed(
                                LOAD_FAILED_MESSAGE.to_string(),
                            ));
                        }
                    }
                });
            }
            move || mounted.set(false)
        });
    }

    // Hydrate stored progress once words are present
    {
        let game = game.clone();
        let store = store.clone();
        let key = props.storage_key.clone();
        let deps = (game.total_words(), game.progress_loaded());
        use_effect_with(deps, move |&(total, loaded)| {
            if total > 0 && !loaded {
                let stored = store.load_progress(&key);
                log::debug!("Hydrating progress from {key}: {stored:?}");
                game.dispatch(SpellingAction::Hydrate(stored));
            }
            || ()
        });
    }

    // Persist index & mistakes
    {
        let store = store.clone();
        let key = props.storage_key.clone();
        let deps = (game.progress_loaded(), game.progress());
        use_effect_with(deps, move |(loaded, progress)| {
            if *loaded {
                store.save_progress(&key, progress);
            }
            || ()
        });
    }

    // Point the audio element at the current word
    {
        let game = game.clone();
        let audio_ref = audio_ref.clone();
        let audio_busy = audio_busy.clone();
        let show_hint = show_hint.clone();
        let url = game.current_word().map(|w| w.audio_url.clone());
        use_effect_with(url, move |url| {
            if let (Some(el), Some(url)) = (audio_ref.cast::<HtmlAudioElement>(), url) {
                el.set_src(url);
                el.load();
            }
            audio_busy.set(false);
            show_hint.set(false);
            game.dispatch(SpellingAction::AudioAvailable);
            || ()
        });
    }

    // Keyboard: letters, Backspace, Enter, Escape
    let game_ref = use_mut_ref(|| game.clone());
    *game_ref.borrow_mut() = game.clone();
    {
        let game_ref = game_ref.clone();
        use_effect_with((), move |_| {
            let window = web_sys::window();
            let keydown_cb = Closure::wrap(Box::new(move |e: KeyboardEvent| {
                if e.ctrl_key() || e.meta_key() || e.alt_key() {
                    return;
                }
                let handle = game_ref.borrow().clone();
                let key = e.key();
                if handle.wants_key(&key) {
                    e.prevent_default();
                    handle.dispatch(SpellingAction::Key(key));
                }
            }) as Box<dyn FnMut(_)>);
            if let Some(win) = &window {
                let _ = win
                    .add_event_listener_with_callback("keydown", keydown_cb.as_ref().unchecked_ref());
            }
            move || {
                if let Some(win) = window {
                    let _ = win.remove_event_listener_with_callback(
                        "keydown",
                        keydown_cb.as_ref().unchecked_ref(),
                    );
                }
            }
        });
    }

    let on_play = {
        let game = game.clone();
        let audio_ref = audio_ref.clone();
        let audio_busy = audio_busy.clone();
        Callback::from(move |_| {
            if !game.audio_available() {
                return;
            }
            let Some(el) = audio_ref.cast::<HtmlAudioElement>() else {
                return;
            };
            el.set_current_time(0.0);
            audio_busy.set(true);
            let game = game.clone();
            let audio_busy = audio_busy.clone();
            spawn_local(async move {
                let played = match el.play() {
                    Ok(promise) => JsFuture::from(promise).await.is_ok(),
                    Err(_) => false,
                };
                if !played {
                    log::warn!("Audio playback failed for {}", el.src());
                    audio_busy.set(false);
                    game.dispatch(SpellingAction::AudioUnavailable);
                }
            });
        })
    };
    let on_audio_error = {
        let game = game.clone();
        let audio_busy = audio_busy.clone();
        Callback::from(move |_: Event| {
            audio_busy.set(false);
            game.dispatch(SpellingAction::AudioUnavailable);
        })
    };
    let on_audio_stop = {
        let audio_busy = audio_busy.clone();
        Callback::from(move |_: Event| audio_busy.set(false))
    };

    let dispatcher = |action: SpellingAction| {
        let game = game.clone();
        Callback::from(move |_| game.dispatch(action.clone()))
    };
    let on_select = {
        let game = game.clone();
        Callback::from(move |letter: String| game.dispatch(SpellingAction::SelectLetter(letter)))
    };
    let on_next = {
        let game = game.clone();
        Callback::from(move |_: ()| game.dispatch(SpellingAction::NextWord))
    };
    let on_shake_end = {
        let game = game.clone();
        Callback::from(move |_| game.dispatch(SpellingAction::AcknowledgeShake))
    };
    let back_cb = {
        let cb = props.on_back.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let restart_cb = {
        let game = game.clone();
        let store = store.clone();
        let key = props.storage_key.clone();
        Callback::from(move |_| {
            let confirmed = web_sys::window()
                .map(|win| {
                    win.confirm_with_message(
                        "Fortschritt dieser Übung löschen und von vorne beginnen?",
                    )
                    .unwrap_or(false)
                })
                .unwrap_or(true);
            if confirmed {
                store.clear(&key);
                game.dispatch(SpellingAction::Restart);
            }
        })
    };
    let toggle_hint = {
        let show_hint = show_hint.clone();
        Callback::from(move |_| show_hint.set(!*show_hint))
    };

    let header = html! {
        <div style="display:flex; justify-content:space-between; align-items:center; gap:12px;">
            <div>
                <h2 style="margin:0; font-size:22px;">{ props.title.clone() }</h2>
                if !props.description.is_empty() {
                    <p style="margin:4px 0 0 0; opacity:0.8;">{ props.description.clone() }</p>
                }
            </div>
            <button onclick={back_cb}>{"Zur Übersicht"}</button>
        </div>
    };

    if let Some(msg) = game.load_state().error() {
        return html! { <section style="display:flex; flex-direction:column; gap:16px;">
            { header }
            <div role="alert" style="color:#f85149;">{ msg.to_string() }</div>
        </section> };
    }
    let Some(word) = game.current_word().cloned() else {
        let msg = if game.load_state().is_loading() {
            "Wörter werden geladen …"
        } else {
            "Keine Wörter verfügbar."
        };
        return html! { <section style="display:flex; flex-direction:column; gap:16px;">
            { header }
            <div aria-live="polite" style="opacity:0.8;">{ msg }</div>
        </section> };
    };

    let locked = game.is_locked();
    let input_empty = game.user_input().is_empty();
    let feedback_color = match (game.status(), game.feedback().tone()) {
        (GameStatus::Success, _) | (_, FeedbackTone::Success) => "#2ea043",
        (GameStatus::Error, _) | (_, FeedbackTone::Error) => "#f85149",
        _ => "inherit",
    };

    html! {
        <section style="display:flex; flex-direction:column; gap:16px;">
            { header }
            <div style="display:flex; justify-content:space-between; align-items:center; font-size:13px;">
                <span style="opacity:0.7;">{ format!("Wort {} von {}", game.current_index() + 1, game.total_words()) }</span>
                <button onclick={restart_cb} style="font-size:12px;">{"Von vorne beginnen"}</button>
            </div>
            <div style="display:flex; gap:12px; align-items:center; justify-content:center;">
                <AudioButton available={game.audio_available()} busy={*audio_busy} on_play={on_play} />
                if word.hint().is_some() {
                    <button onclick={toggle_hint.clone()} aria-label="Tipp anzeigen">{"💡 Tipp"}</button>
                }
            </div>
            <InputDisplay
                letters={game.user_input().to_vec()}
                target_len={word.target_len()}
                status={game.status()}
                should_shake={game.should_shake()}
                on_animation_end={on_shake_end}
            />
            <LetterGrid letters={game.letter_pool().to_vec()} disabled={locked} on_select={on_select} />
            <div role="group" aria-label="Aktionen" style="display:flex; gap:8px; justify-content:center; flex-wrap:wrap;">
                <button onclick={dispatcher(SpellingAction::RemoveLetter)} disabled={locked || input_empty}
                    aria-label="Letzten Buchstaben löschen">{"⌫ Rückgängig"}</button>
                <button onclick={dispatcher(SpellingAction::CheckAnswer)} disabled={locked}>{"Antwort prüfen"}</button>
                <button onclick={dispatcher(SpellingAction::ClearInput)} disabled={locked || input_empty}
                    aria-label="Eingabe zurücksetzen">{"↺ Löschen"}</button>
                <button onclick={dispatcher(SpellingAction::RefreshLetters)} disabled={locked}>{"Neu mischen"}</button>
            </div>
            <div aria-live="polite" style={format!("min-height:1.4em; text-align:center; color:{feedback_color};")}>
                { game.feedback().to_string() }
            </div>
            <SuccessPopup
                open={game.show_next_prompt()}
                message={game.feedback().to_string()}
                on_next={on_next}
            />
            if *show_hint {
                if let Some(tip) = word.hint() {
                    <div onclick={toggle_hint.clone()} role="dialog" aria-modal="true"
                        style="position:fixed; inset:0; display:flex; align-items:center; justify-content:center; background:rgba(0,0,0,0.55); z-index:40;">
                        <div onclick={Callback::from(|e: MouseEvent| e.stop_propagation())}
                            style="background:#161b22; border:1px solid #30363d; border-radius:12px; padding:16px 20px; max-width:420px; display:flex; flex-direction:column; gap:12px;">
                            <h3 style="margin:0;">{"💡 Tipp"}</h3>
                            <p style="margin:0;">{ tip.to_string() }</p>
                            <button onclick={toggle_hint}>{"Verstanden"}</button>
                        </div>
                    </div>
                }
            }
            <audio ref={audio_ref} preload="auto" aria-hidden="true"
                onerror={on_audio_error} onended={on_audio_stop.clone()} onpause={on_audio_stop} />
        </section>
    }
}
