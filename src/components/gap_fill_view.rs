use super::Timeout;
use crate::model::Word;
use crate::state::{GapFillAction, GapFillExercise, GapStatus};
use crate::util::SplitMix64;
use yew::prelude::*;

const ERROR_FLASH_MS: i32 = 800;

#[derive(Properties, PartialEq, Clone)]
pub struct GapFillViewProps {
    pub title: String,
    pub words: Vec<Word>,
    /// Distractors are drawn from here.
    pub pool: Vec<Word>,
    pub on_back: Callback<()>,
}

#[function_component]
pub fn GapFillView(props: &GapFillViewProps) -> Html {
    let exercise = {
        let words = props.words.clone();
        let pool = props.pool.clone();
        use_reducer(move || GapFillExercise::new(words, pool, SplitMix64::from_browser()))
    };

    {
        let exercise = exercise.clone();
        use_effect_with(exercise.status(), move |status| {
            let timeout = (*status == GapStatus::Error).then(|| {
                Timeout::new(ERROR_FLASH_MS, move || exercise.dispatch(GapFillAction::SettleError))
            });
            move || drop(timeout)
        });
    }

    let back_cb = {
        let cb = props.on_back.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let check_cb = {
        let exercise = exercise.clone();
        Callback::from(move |_| exercise.dispatch(GapFillAction::Check))
    };
    let next_cb = {
        let exercise = exercise.clone();
        Callback::from(move |_| exercise.dispatch(GapFillAction::Next))
    };

    let header = html! {
        <div style="display:flex; justify-content:space-between; align-items:center;">
            <h2 style="margin:0; font-size:22px;">{ format!("Lückentext – {}", props.title) }</h2>
            <button onclick={back_cb}>{"Zur Übersicht"}</button>
        </div>
    };

    if exercise.finished() {
        return html! { <section style="display:flex; flex-direction:column; gap:16px;">
            { header }
            <p style="font-size:18px; color:#2ea043;">{"Geschafft! Du hast alle Sätze vervollständigt."}</p>
        </section> };
    }
    let Some((before, after)) = exercise.sentence_parts() else {
        return html! { <section style="display:flex; flex-direction:column; gap:16px;">
            { header }
            <p style="opacity:0.8;">{"Für diese Übung gibt es keine Lückensätze."}</p>
        </section> };
    };

    let status = exercise.status();
    let gap_color = match status {
        GapStatus::Success => "#2ea043",
        GapStatus::Error => "#f85149",
        _ => "#58a6ff",
    };
    let gap_text = exercise
        .selected()
        .map(|w| w.word.clone())
        .unwrap_or_else(|| "_____".to_string());
    let feedback = match status {
        GapStatus::Success => "Richtig!",
        GapStatus::Error => "Das passt nicht. Versuch ein anderes Wort.",
        _ => "",
    };

    html! {
        <section style="display:flex; flex-direction:column; gap:16px;">
            { header }
            <div style="font-size:13px; opacity:0.7;">
                { format!("Satz {} von {}", exercise.current_index() + 1, exercise.total_words()) }
            </div>
            <p style="font-size:22px; line-height:1.6;">
                { before.to_string() }
                <span style={format!("padding:0 6px; border-bottom:2px solid {gap_color}; color:{gap_color};")}>{ gap_text }</span>
                { after.to_string() }
            </p>
            <div role="group" aria-label="Auswahl" style="display:flex; gap:8px; flex-wrap:wrap;">
                { for exercise.options().iter().map(|option| {
                    let id = option.id.clone();
                    let exercise = exercise.clone();
                    let is_selected = exercise.selected().is_some_and(|w| w.id == option.id);
                    let style = if is_selected {
                        "padding:8px 14px; font-size:18px; background:#1f6feb; color:#fff;"
                    } else {
                        "padding:8px 14px; font-size:18px;"
                    };
                    html! {
                        <button key={option.id.clone()} {style} disabled={status == GapStatus::Success}
                            onclick={Callback::from(move |_| exercise.dispatch(GapFillAction::Select(id.clone())))}>
                            { option.word.clone() }
                        </button>
                    }
                }) }
            </div>
            <div style="display:flex; gap:8px;">
                <button onclick={check_cb} disabled={!exercise.can_check()}>{"Prüfen"}</button>
                if status == GapStatus::Success {
                    <button onclick={next_cb}>{ if exercise.is_last() { "Fertig" } else { "Nächster Satz" } }</button>
                }
            </div>
            <div aria-live="polite" style={format!("min-height:1.4em; color:{gap_color};")}>{ feedback }</div>
        </section>
    }
}
