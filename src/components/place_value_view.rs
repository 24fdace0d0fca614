use super::Timeout;
use super::place_value_controls::PlaceValueControls;
use crate::config::PLACE_VALUE_SETTINGS_KEY;
use crate::state::place_value::WIDTH;
use crate::state::{
    DigitMark, NumberSystem, OperationMode, PlaceValueAction, PlaceValueBoard, PlaceValueSettings,
    ProgressStore,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::StorageEvent;
use yew::prelude::*;

/// How long carry/borrow marks stay lit.
const MARK_FLASH_MS: i32 = 900;

#[derive(Properties, PartialEq, Clone)]
pub struct PlaceValueViewProps {
    pub on_back: Callback<()>,
}

fn mark_badge(mark: Option<DigitMark>) -> Html {
    let (text, color) = match mark {
        Some(DigitMark::Carry) => ("Übertrag ↑", "#2ea043"),
        Some(DigitMark::Borrow) => ("Entbündeln ↓", "#d29922"),
        Some(DigitMark::Overflow) => ("Voll! Übertrag nötig", "#f85149"),
        Some(DigitMark::Underflow) => ("Leer! Entbündeln nötig", "#f85149"),
        Some(DigitMark::Rejected) => ("Geht nicht unter 0", "#f85149"),
        None => return html! { <div style="height:16px;"></div> },
    };
    html! { <div style={format!("height:16px; font-size:11px; color:{color};")}>{ text }</div> }
}

#[function_component]
pub fn PlaceValueView(props: &PlaceValueViewProps) -> Html {
    let store = use_memo((), |_| ProgressStore::browser());
    let board = {
        let store = store.clone();
        use_reducer(move || {
            PlaceValueBoard::new(store.load(PLACE_VALUE_SETTINGS_KEY, PlaceValueSettings::default()))
        })
    };

    // Persist settings
    {
        let store = store.clone();
        use_effect_with(board.settings(), move |settings| {
            store.save(PLACE_VALUE_SETTINGS_KEY, settings);
            || ()
        });
    }

    // Follow settings changed in another tab
    {
        let dispatcher = board.dispatcher();
        let store = store.clone();
        use_effect_with((), move |_| {
            let window = web_sys::window();
            let storage_cb = Closure::wrap(Box::new(move |e: StorageEvent| {
                if e.key().as_deref() != Some(PLACE_VALUE_SETTINGS_KEY) {
                    return;
                }
                match store.try_load::<PlaceValueSettings>(PLACE_VALUE_SETTINGS_KEY) {
                    Ok(Some(settings)) => dispatcher.dispatch(PlaceValueAction::ApplySettings(settings)),
                    Ok(None) => {}
                    Err(e) => log::warn!("Ignoring settings from another tab: {e}"),
                }
            }) as Box<dyn FnMut(_)>);
            if let Some(win) = &window {
                let _ = win
                    .add_event_listener_with_callback("storage", storage_cb.as_ref().unchecked_ref());
            }
            move || {
                if let Some(win) = window {
                    let _ = win.remove_event_listener_with_callback(
                        "storage",
                        storage_cb.as_ref().unchecked_ref(),
                    );
                }
            }
        });
    }

    // Fade marks after a moment
    {
        let board = board.clone();
        let marks = *board.marks();
        use_effect_with(marks, move |marks| {
            let timeout = marks.iter().any(Option::is_some).then(|| {
                Timeout::new(MARK_FLASH_MS, move || board.dispatch(PlaceValueAction::ClearMarks))
            });
            move || drop(timeout)
        });
    }

    let action = |a: PlaceValueAction| {
        let board = board.clone();
        Callback::from(move |_: ()| board.dispatch(a.clone()))
    };
    let on_system = {
        let board = board.clone();
        Callback::from(move |s: NumberSystem| board.dispatch(PlaceValueAction::ChangeSystem(s)))
    };
    let on_mode = {
        let board = board.clone();
        Callback::from(move |m: OperationMode| board.dispatch(PlaceValueAction::SetMode(m)))
    };
    let back_cb = {
        let cb = props.on_back.clone();
        Callback::from(move |_| cb.emit(()))
    };

    let system = board.system();
    let hidden = board.hidden_mask();
    let labels = system.labels();

    let cards = (0..WIDTH).map(|pos| {
        let press = {
            let board = board.clone();
            Callback::from(move |_: MouseEvent| board.dispatch(PlaceValueAction::Press(pos)))
        };
        let step = |a: PlaceValueAction| {
            let board = board.clone();
            Callback::from(move |e: MouseEvent| {
                e.stop_propagation();
                board.dispatch(a.clone());
            })
        };
        let digit = if hidden[pos] { String::new() } else { system.format_digit(board.digits()[pos]) };
        let units = board.units(pos).filter(|_| !hidden[pos]);
        html! {
            <div key={pos} onclick={press} role="button" aria-label={labels[pos]}
                title={format!("Stellenwert {}", board.place_weight(pos))}
                style="display:flex; flex-direction:column; align-items:center; gap:4px; padding:8px; min-width:64px; background:#161b22; border:1px solid #30363d; border-radius:10px; cursor:pointer;">
                <div style="font-size:11px; opacity:0.75;">{ labels[pos] }</div>
                <button onclick={step(PlaceValueAction::Increment(pos))} aria-label="Plus eins">{"+"}</button>
                <div style="font-size:32px; font-variant-numeric:tabular-nums; min-height:40px;">{ digit }</div>
                <button onclick={step(PlaceValueAction::Decrement(pos))} aria-label="Minus eins">{"−"}</button>
                if let Some(n) = units {
                    <div style="display:flex; flex-wrap:wrap; gap:2px; max-width:56px; justify-content:center;">
                        { for (0..n).map(|_| html! { <span style="width:8px; height:8px; border-radius:50%; background:#58a6ff;"></span> }) }
                    </div>
                }
                { mark_badge(board.marks()[pos]) }
            </div>
        }
    });

    html! {
        <section style="display:flex; flex-direction:column; gap:16px;">
            <div style="display:flex; justify-content:space-between; align-items:center;">
                <h2 style="margin:0; font-size:22px;">{ format!("Stellenwerte im {}", system.name()) }</h2>
                <button onclick={back_cb}>{"Zur Übersicht"}</button>
            </div>
            <div style="display:flex; gap:16px; flex-wrap:wrap; align-items:flex-start;">
                <div style="display:flex; gap:6px; flex-wrap:wrap;">{ for cards }</div>
                <PlaceValueControls
                    settings={board.settings()}
                    on_system={on_system}
                    on_mode={on_mode}
                    on_toggle_auto_carry={action(PlaceValueAction::ToggleAutoCarry)}
                    on_toggle_hide_zeros={action(PlaceValueAction::ToggleHideLeadingZeros)}
                    on_toggle_units={action(PlaceValueAction::ToggleVisualUnits)}
                    on_reset={action(PlaceValueAction::Reset)}
                />
            </div>
            <div aria-live="polite" style="font-size:18px;">{ format!("Zahl: {}", board.readout()) }</div>
        </section>
    }
}
