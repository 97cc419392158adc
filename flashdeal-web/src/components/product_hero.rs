use std::collections::BTreeMap;

use crate::app::hooks::use_countdown;
use crate::components::insight_panel::InsightPanel;
use crate::engine::{AssistantHandle, DealStatus, GeoPoint, Product};
use crate::i18n::{fmt_currency, t, tr};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub product: Product,
    pub assistant: AssistantHandle,
    #[prop_or_default]
    pub location: Option<GeoPoint>,
    #[prop_or(1_000)]
    pub countdown_period_ms: u32,
}

#[function_component(ProductHero)]
pub fn product_hero(p: &Props) -> Html {
    let countdown = use_countdown(p.product.time_left, p.countdown_period_ms);
    let image_failed = use_state_eq(|| false);
    let on_image_error = {
        let image_failed = image_failed.clone();
        Callback::from(move |_: Event| image_failed.set(true))
    };

    let product = &p.product;
    let status = product.status(countdown.remaining_secs);
    let time = countdown.format_hms();
    let pct = product.percentage_claimed().to_string();
    let left = product.items_left().to_string();
    let viewers = product.viewers.to_string();

    let time_args = BTreeMap::from([("time", time.as_str())]);
    let pct_args = BTreeMap::from([("pct", pct.as_str())]);
    let left_args = BTreeMap::from([("count", left.as_str())]);
    let viewer_args = BTreeMap::from([("count", viewers.as_str())]);
    let bar_style = format!("width: {pct}%");

    html! {
        <section class="hero">
            <div class="hero__media">
                if *image_failed {
                    <div class="hero__image hero__image--missing" role="img" aria-label={product.name.clone()}>
                        { t("reward.image_unavailable") }
                    </div>
                } else {
                    <img class="hero__image" src={product.image_url.clone()} alt={product.name.clone()} onerror={on_image_error} />
                }
                <span class="hero__badge">{ t("hero.price_drop") }</span>
                <span class="hero__timer" role="timer">{ tr("hero.time_left", Some(&time_args)) }</span>
            </div>
            <div class="hero__body">
                <span class="hero__category">{ t("hero.category") }</span>
                <h1 class="hero__name">{ product.name.clone() }</h1>
                <div class="hero__prices">
                    <span class="hero__sale">{ fmt_currency(product.sale_price) }</span>
                    <s class="hero__original">{ fmt_currency(product.original_price) }</s>
                </div>
                if status != DealStatus::Active {
                    <span class={classes!("hero__status", status.key().replace('.', "-"))}>{ t(status.key()) }</span>
                }
                <div class="hero__stock">
                    <div class="hero__stock-labels">
                        <span>{ tr("hero.claimed", Some(&pct_args)) }</span>
                        <span>{ tr("hero.items_left", Some(&left_args)) }</span>
                    </div>
                    <div class="progress" role="progressbar" aria-valuemin="0" aria-valuemax="100" aria-valuenow={pct.clone()}>
                        <div class="progress__fill" style={bar_style}></div>
                    </div>
                </div>
                <p class="hero__viewers">{ tr("hero.viewers", Some(&viewer_args)) }</p>
                <div class="hero__actions">
                    <button class="btn btn--primary" disabled={!status.is_claimable()}>{ t("hero.buy_now") }</button>
                    <button class="btn btn--ghost">{ t("hero.wishlist") }</button>
                    <button class="btn btn--ghost">{ t("hero.share") }</button>
                </div>
                <InsightPanel assistant={p.assistant.clone()} product={product.clone()} location={p.location} />
            </div>
        </section>
    }
}
