use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct SuccessPopupProps {
    pub open: bool,
    pub message: String,
    pub on_next: Callback<()>,
}

#[function_component]
pub fn SuccessPopup(props: &SuccessPopupProps) -> Html {
    if !props.open {
        return html! {};
    }
    let next_cb = {
        let cb = props.on_next.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let label = if props.message.is_empty() {
        "Sehr gut! Weiter so.".to_string()
    } else {
        props.message.clone()
    };
    html! {<div style="position:fixed; inset:0; display:flex; align-items:center; justify-content:center; background:rgba(0,0,0,0.55); z-index:50;">
        <div role="alertdialog" aria-modal="true" aria-label="Erfolgsmeldung"
            style="background:#161b22; border:1px solid #2ea043; border-radius:14px; padding:24px 32px; min-width:280px; display:flex; flex-direction:column; align-items:center; gap:14px;">
            <div aria-hidden="true" style="font-size:40px; color:#2ea043;">{"✓"}</div>
            <p style="margin:0; font-size:18px;">{ label }</p>
            <button onclick={next_cb} style="padding:8px 16px;">{"Weiter zum nächsten Wort"}</button>
        </div>
    </div>}
}
