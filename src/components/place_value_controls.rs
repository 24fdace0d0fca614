use crate::state::{NumberSystem, OperationMode, PlaceValueSettings};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct PlaceValueControlsProps {
    pub settings: PlaceValueSettings,
    pub on_system: Callback<NumberSystem>,
    pub on_mode: Callback<OperationMode>,
    pub on_toggle_auto_carry: Callback<()>,
    pub on_toggle_hide_zeros: Callback<()>,
    pub on_toggle_units: Callback<()>,
    pub on_reset: Callback<()>,
}

#[function_component]
pub fn PlaceValueControls(props: &PlaceValueControlsProps) -> Html {
    let settings = props.settings;
    let toggle = |cb: &Callback<()>| {
        let cb = cb.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let reset_cb = {
        let cb = props.on_reset.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let mode_button = |mode: OperationMode, label: &'static str| {
        let cb = props.on_mode.clone();
        let active = settings.mode == mode;
        let style = if active {
            "flex:1; padding:6px 10px; background:#1f6feb; color:#fff; border:1px solid #1f6feb;"
        } else {
            "flex:1; padding:6px 10px;"
        };
        html! { <button aria-pressed={active.to_string()} {style} onclick={Callback::from(move |_| cb.emit(mode))}>{ label }</button> }
    };

    html! {<div style="background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:10px 12px; display:flex; flex-direction:column; gap:10px; min-width:240px;">
        <div style="display:flex; gap:6px;" role="group" aria-label="Zahlensystem">
            { for NumberSystem::ALL.into_iter().map(|system| {
                let cb = props.on_system.clone();
                let active = settings.system == system;
                let style = if active { "flex:1; padding:6px; background:#238636; color:#fff;" } else { "flex:1; padding:6px;" };
                html! { <button aria-pressed={active.to_string()} {style} onclick={Callback::from(move |_| cb.emit(system))}>{ system.name() }</button> }
            }) }
        </div>
        <div style="display:flex; gap:6px;" role="group" aria-label="Rechenart">
            { mode_button(OperationMode::Add, "+ Addieren") }
            { mode_button(OperationMode::Subtract, "− Subtrahieren") }
        </div>
        <label style="display:flex; align-items:center; gap:8px; cursor:pointer;">
            <input type="checkbox" checked={settings.auto_carry} onclick={toggle(&props.on_toggle_auto_carry)} />
            <span>{"Automatischer Übertrag"}</span>
        </label>
        <label style="display:flex; align-items:center; gap:8px; cursor:pointer;">
            <input type="checkbox" checked={settings.hide_leading_zeros} onclick={toggle(&props.on_toggle_hide_zeros)} />
            <span>{"Führende Nullen ausblenden"}</span>
        </label>
        <label style="display:flex; align-items:center; gap:8px; cursor:pointer;">
            <input type="checkbox" checked={settings.show_visual_units} onclick={toggle(&props.on_toggle_units)} />
            <span>{"Einheiten anzeigen"}</span>
        </label>
        <button onclick={reset_cb} style="background:#f85149; border:1px solid #b62324; color:#fff;">{"Zurücksetzen"}</button>
    </div>}
}
