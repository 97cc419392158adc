use crate::components::deal_highlights::DealHighlights;
use crate::components::footer::Footer;
use crate::components::navbar::Navbar;
use crate::components::product_hero::ProductHero;
use crate::components::related_deals::RelatedDeals;
use crate::components::reward_detail::RewardDetail;
use crate::i18n::t;
use yew::prelude::*;

pub mod hooks;
pub mod state;

#[function_component(App)]
pub fn app() -> Html {
    let app_state = state::use_app_state();

    let on_lang_change = {
        let current_language = app_state.current_language.clone();
        Callback::from(move |lang: String| current_language.set(lang))
    };

    let navbar = html! {
        <Navbar
            points={*app_state.points}
            current_lang={(*app_state.current_language).clone()}
            {on_lang_change}
        />
    };

    let Some(catalog) = (*app_state.catalog).clone() else {
        return html! {
            <>
                { navbar }
                <main id="main" class="page page--empty">
                    <p role="alert">{ t("app.unavailable") }</p>
                </main>
                <Footer />
            </>
        };
    };

    let config = &*app_state.config;
    let assistant = (*app_state.assistant).clone();
    let location = *app_state.location;

    html! {
        <>
            { navbar }
            <main id="main" class="page" lang={(*app_state.current_language).clone()}>
                <ProductHero
                    product={catalog.product.clone()}
                    assistant={assistant.clone()}
                    {location}
                    countdown_period_ms={config.simulation.countdown_period_ms}
                />
                <RewardDetail
                    product={catalog.product.clone()}
                    {assistant}
                    simulation={config.simulation.clone()}
                    destination={AttrValue::from(catalog.destination.clone())}
                    located={app_state.is_located()}
                />
                <DealHighlights
                    highlights={catalog.highlights.clone()}
                    features={catalog.product.features.clone()}
                    terms={catalog.terms.clone()}
                />
                <RelatedDeals deals={catalog.related.clone()} />
            </main>
            <Footer />
        </>
    }
}
