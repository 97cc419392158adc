use crate::engine::RelatedDeal;
use crate::i18n::{fmt_currency, t};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub deals: Vec<RelatedDeal>,
}

fn deal_card(deal: &RelatedDeal) -> Html {
    html! {
        <li class="related__card" key={deal.id.clone()}>
            <img src={deal.image_url.clone()} alt={deal.name.clone()} loading="lazy" />
            <span class="related__tag">{ t("related.in_store") }</span>
            <h3>{ deal.name.clone() }</h3>
            <div class="related__footer">
                <span class="related__price">{ fmt_currency(deal.price) }</span>
                <button class="btn btn--small">{ t("related.buy") }</button>
            </div>
        </li>
    }
}

#[function_component(RelatedDeals)]
pub fn related_deals(p: &Props) -> Html {
    if p.deals.is_empty() {
        return Html::default();
    }
    html! {
        <section class="related">
            <h2>{ t("related.title") }</h2>
            <ul class="related__grid">
                { for p.deals.iter().map(deal_card) }
            </ul>
        </section>
    }
}
