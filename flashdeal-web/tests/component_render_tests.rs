use flashdeal_web::app::App;
use flashdeal_web::components::deal_highlights::DealHighlights;
use flashdeal_web::components::footer::Footer;
use flashdeal_web::components::insight_panel::{InsightPanel, render_insight};
use flashdeal_web::components::live_map::LiveMap;
use flashdeal_web::components::navbar::Navbar;
use flashdeal_web::components::product_hero::ProductHero;
use flashdeal_web::components::related_deals::RelatedDeals;
use flashdeal_web::components::reward_detail::RewardDetail;
use flashdeal_web::engine::{
    AiInsight, AssistantHandle, DealCatalog, GeoPoint, InsightSource, Product, SimulationConfig,
    SourceKind,
};
use futures::executor::block_on;
use yew::{AttrValue, Callback, Html, LocalServerRenderer, function_component};

fn catalog() -> DealCatalog {
    DealCatalog::load_from_static().unwrap()
}

fn product() -> Product {
    catalog().product
}

#[test]
fn navbar_renders_points_and_language_options() {
    flashdeal_web::i18n::set_lang("en");
    let props = flashdeal_web::components::navbar::Props {
        points: 1250,
        current_lang: "en".to_string(),
        on_lang_change: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<Navbar>::with_props(props).render());
    assert!(html.contains("lang-select"));
    assert!(html.contains("1,250 pts"));
    assert!(html.contains("Español"));
}

#[test]
fn footer_renders_links() {
    flashdeal_web::i18n::set_lang("en");
    let html = block_on(LocalServerRenderer::<Footer>::new().render());
    assert!(html.contains("<footer"));
    assert!(html.contains("Privacy Policy"));
}

#[test]
fn product_hero_shows_prices_stock_and_countdown() {
    flashdeal_web::i18n::set_lang("en");
    let props = flashdeal_web::components::product_hero::Props {
        product: product(),
        assistant: AssistantHandle::offline(),
        location: None,
        countdown_period_ms: 1_000,
    };
    let html = block_on(LocalServerRenderer::<ProductHero>::with_props(props).render());
    assert!(html.contains("Smart Blender Pro"));
    assert!(html.contains("$100"));
    assert!(html.contains("$200"));
    assert!(html.contains("02:14:36 Left"));
    assert!(html.contains("78% Claimed"));
    assert!(html.contains("Only 12 Left!"));
    assert!(html.contains("12 people are viewing this deal"));
    assert!(html.contains("Ask AI"));
}

#[test]
fn product_hero_marks_sold_out_deals() {
    flashdeal_web::i18n::set_lang("en");
    let mut sold_out = product();
    sold_out.claimed_items = sold_out.total_items;
    let props = flashdeal_web::components::product_hero::Props {
        product: sold_out,
        assistant: AssistantHandle::offline(),
        location: None,
        countdown_period_ms: 1_000,
    };
    let html = block_on(LocalServerRenderer::<ProductHero>::with_props(props).render());
    assert!(html.contains("Sold Out"));
    assert!(html.contains("100% Claimed"));
}

#[test]
fn insight_panel_switches_copy_when_located() {
    flashdeal_web::i18n::set_lang("en");
    let props = flashdeal_web::components::insight_panel::Props {
        assistant: AssistantHandle::offline(),
        product: product(),
        location: Some(GeoPoint::new(40.4, -3.7)),
    };
    let html = block_on(LocalServerRenderer::<InsightPanel>::with_props(props).render());
    assert!(html.contains("Local Deal Insight"));
    assert!(html.contains("Check Availability"));
}

#[function_component(InsightHarness)]
fn insight_harness() -> Html {
    flashdeal_web::i18n::set_lang("en");
    let insight = AiInsight::with_sources(
        "Two stores nearby have it in stock.",
        vec![InsightSource {
            kind: SourceKind::Place,
            title: "Corner Store".to_string(),
            uri: "https://maps.example/corner".to_string(),
        }],
    );
    render_insight(&insight)
}

#[test]
fn insight_answer_lists_sources_in_order() {
    let html = block_on(LocalServerRenderer::<InsightHarness>::new().render());
    assert!(html.contains("Two stores nearby"));
    assert!(html.contains("Found nearby:"));
    assert!(html.contains("https://maps.example/corner"));
}

#[test]
fn reward_detail_starts_idle_at_initial_progress() {
    flashdeal_web::i18n::set_lang("en");
    let props = flashdeal_web::components::reward_detail::Props {
        product: product(),
        assistant: AssistantHandle::offline(),
        simulation: SimulationConfig::default(),
        destination: AttrValue::from("The Daily Grind"),
        located: false,
    };
    let html = block_on(LocalServerRenderer::<RewardDetail>::with_props(props).render());
    assert!(html.contains("Grab Now"));
    assert!(html.contains("80 m to go"));
    assert!(html.contains("50% OFF"));
    assert!(html.contains("Save $100"));
    assert!(html.contains("Regenerate Image with AI"));
    assert!(html.contains("Present code at any valid location."));
}

#[test]
fn reward_detail_at_full_progress_is_unlocked() {
    flashdeal_web::i18n::set_lang("en");
    let simulation = SimulationConfig {
        initial_progress: 100.0,
        ..SimulationConfig::default()
    };
    let props = flashdeal_web::components::reward_detail::Props {
        product: product(),
        assistant: AssistantHandle::offline(),
        simulation,
        destination: AttrValue::from("The Daily Grind"),
        located: true,
    };
    let html = block_on(LocalServerRenderer::<RewardDetail>::with_props(props).render());
    assert!(html.contains("Deal Unlocked"));
    assert!(html.contains("You have arrived"));
    assert!(html.contains("Valid at partners nearby."));
}

#[test]
fn live_map_places_marker_and_destination() {
    flashdeal_web::i18n::set_lang("en");
    let props = flashdeal_web::components::live_map::Props {
        progress: 0.0,
        destination: AttrValue::from("The Daily Grind"),
    };
    let html = block_on(LocalServerRenderer::<LiveMap>::with_props(props).render());
    assert!(html.contains("M 25 38 Q 35 35 55 18"));
    assert!(html.contains("left: 25.00%; top: 38.00%;"));
    assert!(html.contains("left: 55.00%; top: 18.00%;"));
    assert!(html.contains("Target"));

    let props = flashdeal_web::components::live_map::Props {
        progress: 100.0,
        destination: AttrValue::from("The Daily Grind"),
    };
    let html = block_on(LocalServerRenderer::<LiveMap>::with_props(props).render());
    assert!(html.contains("Arrived"));
    assert!(html.contains("live-map__destination--arrived"));
}

#[test]
fn deal_highlights_hide_terms_until_opened() {
    flashdeal_web::i18n::set_lang("en");
    let data = catalog();
    let props = |terms_open| flashdeal_web::components::deal_highlights::Props {
        highlights: data.highlights.clone(),
        features: data.product.features.clone(),
        terms: data.terms.clone(),
        terms_open,
    };
    let closed = block_on(LocalServerRenderer::<DealHighlights>::with_props(props(false)).render());
    assert!(closed.contains("High-Performance 1200W Motor"));
    assert!(closed.contains("Easy to clean"));
    assert!(!closed.contains("Limit 1 per person."));

    let open = block_on(LocalServerRenderer::<DealHighlights>::with_props(props(true)).render());
    assert!(open.contains("Limit 1 per person."));
}

#[test]
fn related_deals_render_cards_or_nothing() {
    flashdeal_web::i18n::set_lang("en");
    let props = flashdeal_web::components::related_deals::Props {
        deals: catalog().related,
    };
    let html = block_on(LocalServerRenderer::<RelatedDeals>::with_props(props).render());
    assert!(html.contains("Smart Coffee Maker"));
    assert!(html.contains("$120"));

    let empty = flashdeal_web::components::related_deals::Props { deals: Vec::new() };
    let html = block_on(LocalServerRenderer::<RelatedDeals>::with_props(empty).render());
    assert!(!html.contains("Related Flash Deals"));
}

#[test]
fn app_renders_whole_page_in_spanish() {
    flashdeal_web::i18n::set_lang("es");
    let html = block_on(LocalServerRenderer::<App>::new().render());
    assert!(html.contains("Smart Blender Pro"));
    assert!(html.contains("The Daily Grind"));
    flashdeal_web::i18n::set_lang("en");
}
