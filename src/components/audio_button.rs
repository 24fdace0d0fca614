use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct AudioButtonProps {
    pub available: bool,
    pub busy: bool,
    pub on_play: Callback<()>,
}

#[function_component]
pub fn AudioButton(props: &AudioButtonProps) -> Html {
    let play_cb = {
        let cb = props.on_play.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let label = if !props.available {
        "Audio nicht verfügbar"
    } else if props.busy {
        "Spielt ab …"
    } else {
        "Wort anhören"
    };
    html! {
        <button
            onclick={play_cb}
            disabled={!props.available}
            aria-label={label}
            style="display:flex; align-items:center; gap:8px; padding:10px 18px; font-size:16px; border-radius:999px; border:1px solid #30363d; background:#1f6feb; color:#fff; cursor:pointer;"
        >
            <span aria-hidden="true">{ if props.busy { "🔊" } else { "▶" } }</span>
            <span>{ label }</span>
        </button>
    }
}
