use crate::i18n::t;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub highlights: Vec<String>,
    pub features: Vec<String>,
    pub terms: Vec<String>,
    #[prop_or_default]
    pub terms_open: bool,
}

#[function_component(DealHighlights)]
pub fn deal_highlights(p: &Props) -> Html {
    let open = use_state_eq({
        let initial = p.terms_open;
        move || initial
    });
    let toggle = {
        let open = open.clone();
        Callback::from(move |_: MouseEvent| open.set(!*open))
    };

    html! {
        <section class="highlights">
            <h2>{ t("highlights.title") }</h2>
            <ul class="highlights__list">
                { for p.highlights.iter().chain(p.features.iter()).map(|item| html! {
                    <li>{ item.clone() }</li>
                }) }
            </ul>
            <button class="highlights__terms-toggle" onclick={toggle} aria-expanded={open.to_string()} aria-controls="deal-terms">
                { t("highlights.terms") }
            </button>
            if *open {
                <ol id="deal-terms" class="highlights__terms">
                    { for p.terms.iter().map(|term| html! { <li>{ term.clone() }</li> }) }
                </ol>
            }
        </section>
    }
}
