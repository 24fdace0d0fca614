use crate::state::{LoadState, SetSelection, SetSummary};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct OverviewProps {
    pub load_state: LoadState,
    pub sets: Vec<SetSummary>,
    pub on_spelling: Callback<SetSelection>,
    pub on_gap_fill: Callback<SetSelection>,
    pub on_full_catalog: Callback<()>,
    pub on_place_value: Callback<()>,
}

#[function_component]
pub fn Overview(props: &OverviewProps) -> Html {
    let card = "background:#161b22; border:1px solid #30363d; border-radius:12px; padding:14px 16px; display:flex; flex-direction:column; gap:8px;";
    let pick = |cb: &Callback<SetSelection>, selection: SetSelection| {
        let cb = cb.clone();
        Callback::from(move |_| cb.emit(selection))
    };
    let full_cb = {
        let cb = props.on_full_catalog.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let place_value_cb = {
        let cb = props.on_place_value.clone();
        Callback::from(move |_| cb.emit(()))
    };

    let sets = match &props.load_state {
        LoadState::Loading => html! { <p style="opacity:0.8;">{"Wörter werden geladen …"}</p> },
        LoadState::Failed(msg) => html! { <p role="alert" style="color:#f85149;">{ msg.clone() }</p> },
        LoadState::Ready => html! {
            <div style="display:grid; grid-template-columns:repeat(auto-fill, minmax(220px, 1fr)); gap:12px;">
                { for props.sets.iter().map(|set| html! {
                    <div key={set.selection.slug()} style={card}>
                        <h3 style="margin:0; font-size:17px;">{ set.title.clone() }</h3>
                        <div style="font-size:12px; opacity:0.75;">{ set.description.clone() }</div>
                        <div style="font-size:13px;">{ format!("{} …", set.examples.join(", ")) }</div>
                        <div style="display:flex; gap:6px;">
                            <button onclick={pick(&props.on_spelling, set.selection)}>{"Buchstabieren"}</button>
                            <button onclick={pick(&props.on_gap_fill, set.selection)}>{"Lückentext"}</button>
                        </div>
                    </div>
                }) }
                <div style={card}>
                    <h3 style="margin:0; font-size:17px;">{"Zufallsmix"}</h3>
                    <div style="font-size:12px; opacity:0.75;">{"20 Wörter quer durch alle Übungen"}</div>
                    <div style="display:flex; gap:6px;">
                        <button onclick={pick(&props.on_spelling, SetSelection::Random)}>{"Buchstabieren"}</button>
                        <button onclick={pick(&props.on_gap_fill, SetSelection::Random)}>{"Lückentext"}</button>
                    </div>
                </div>
            </div>
        },
    };

    html! {
        <section style="display:flex; flex-direction:column; gap:18px;">
            <div>
                <h1 style="margin:0 0 6px 0; font-size:26px; color:#58a6ff;">{"Fehlerwörter trainieren"}</h1>
                <p style="margin:0; opacity:0.85;">{"Hör dir das Wort an und setze es aus den Buchstaben zusammen."}</p>
            </div>
            { sets }
            <div style="display:flex; gap:12px; flex-wrap:wrap;">
                <div style={card}>
                    <h3 style="margin:0; font-size:17px;">{"Hörübung"}</h3>
                    <div style="font-size:12px; opacity:0.75;">{"Alle Wörter nacheinander"}</div>
                    <button onclick={full_cb}>{"Starten"}</button>
                </div>
                <div style={card}>
                    <h3 style="margin:0; font-size:17px;">{"Stellenwerte"}</h3>
                    <div style="font-size:12px; opacity:0.75;">{"Bündeln und Entbündeln im Dezimal-, Binär- und Hexadezimalsystem"}</div>
                    <button onclick={place_value_cb}>{"Starten"}</button>
                </div>
            </div>
        </section>
    }
}
