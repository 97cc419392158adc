use crate::app::hooks::use_insight;
use crate::engine::{AiInsight, AssistantHandle, GeoPoint, InsightSource, Product, SourceKind};
use crate::i18n::t;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub assistant: AssistantHandle,
    pub product: Product,
    #[prop_or_default]
    pub location: Option<GeoPoint>,
}

fn source_item(source: &InsightSource) -> Html {
    let icon = match source.kind {
        SourceKind::Place => "\u{1F4CD}",
        SourceKind::Web => "\u{1F517}",
    };
    html! {
        <li class="insight__source">
            <a href={source.uri.clone()} target="_blank" rel="noopener noreferrer">
                <span aria-hidden="true">{ icon }</span>
                { source.title.clone() }
            </a>
        </li>
    }
}

/// Answer body with its grounding sources, if any came back.
#[must_use]
pub fn render_insight(insight: &AiInsight) -> Html {
    let sources = insight.sources.as_deref().unwrap_or_default();
    html! {
        <div class="insight__answer" aria-live="polite">
            <p>{ insight.text.clone() }</p>
            if !sources.is_empty() {
                <p class="insight__sources-title">{ t("insight.found_nearby") }</p>
                <ul class="insight__sources">
                    { for sources.iter().map(source_item) }
                </ul>
            }
        </div>
    }
}

#[function_component(InsightPanel)]
pub fn insight_panel(p: &Props) -> Html {
    let handle = use_insight(&p.assistant, &p.product, p.location);
    let located = p.location.is_some();
    let (title, prompt, action) = if located {
        ("insight.title_local", "insight.prompt_local", "insight.ask_local")
    } else {
        ("insight.title", "insight.prompt", "insight.ask")
    };

    let on_ask = {
        let ask = handle.ask.clone();
        Callback::from(move |_: MouseEvent| ask.emit(()))
    };

    html! {
        <section class="insight" aria-labelledby="insight-title">
            <h3 id="insight-title">{ t(title) }</h3>
            {
                match handle.insight.as_ref() {
                    Some(insight) => render_insight(insight),
                    None => html! {
                        <>
                            <p class="insight__prompt">{ t(prompt) }</p>
                            <button class="insight__ask" onclick={on_ask} disabled={handle.loading}>
                                { if handle.loading { t("insight.loading") } else { t(action) } }
                            </button>
                        </>
                    },
                }
            }
        </section>
    }
}
