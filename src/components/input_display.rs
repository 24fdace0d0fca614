use crate::model::GameStatus;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct InputDisplayProps {
    pub letters: Vec<String>,
    pub target_len: usize,
    pub status: GameStatus,
    pub should_shake: bool,
    pub on_animation_end: Callback<()>,
}

/// One slot per letter of the target word, filled left to right.
#[function_component]
pub fn InputDisplay(props: &InputDisplayProps) -> Html {
    let border = match props.status {
        GameStatus::Success => "#2ea043",
        GameStatus::Error => "#f85149",
        GameStatus::Idle => "#30363d",
    };
    let anim_cb = {
        let cb = props.on_animation_end.clone();
        Callback::from(move |_: AnimationEvent| cb.emit(()))
    };
    let class = classes!("input-display", props.should_shake.then_some("shake"));
    html! {
        <div class={class} onanimationend={anim_cb} aria-live="polite" aria-label="Deine Eingabe"
            style="display:flex; gap:6px; justify-content:center; margin:12px 0;">
            { for (0..props.target_len).map(|i| {
                let letter = props.letters.get(i).cloned().unwrap_or_default();
                html! {
                    <span style={format!("display:inline-flex; align-items:center; justify-content:center; width:42px; height:48px; font-size:24px; border-bottom:3px solid {border}; background:#161b22; border-radius:6px 6px 0 0;")}>
                        { letter }
                    </span>
                }
            }) }
        </div>
    }
}
