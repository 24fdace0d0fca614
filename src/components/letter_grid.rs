use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct LetterGridProps {
    pub letters: Vec<String>,
    pub disabled: bool,
    pub on_select: Callback<String>,
}

#[function_component]
pub fn LetterGrid(props: &LetterGridProps) -> Html {
    html! {
        <div role="group" aria-label="Buchstaben" style="display:grid; grid-template-columns:repeat(auto-fill, minmax(48px, 1fr)); gap:8px; max-width:420px; margin:0 auto;">
            { for props.letters.iter().enumerate().map(|(i, letter)| {
                let cb = props.on_select.clone();
                let value = letter.clone();
                let onclick = Callback::from(move |_| cb.emit(value.clone()));
                html! {
                    <button key={i} {onclick} disabled={props.disabled}
                        style="height:48px; font-size:22px; border-radius:8px; border:1px solid #30363d; background:#21262d; color:#e6edf3; cursor:pointer;">
                        { letter.clone() }
                    </button>
                }
            }) }
        </div>
    }
}
