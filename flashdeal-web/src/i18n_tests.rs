//! Locale files must cover every key the page renders.

use serde_json::Value;
use std::collections::BTreeSet;

const RENDERED_KEYS: &[&str] = &[
    "app.title",
    "app.unavailable",
    "nav.tagline",
    "nav.points",
    "nav.notifications",
    "nav.language",
    "nav.menu",
    "hero.price_drop",
    "hero.time_left",
    "hero.category",
    "hero.claimed",
    "hero.items_left",
    "hero.viewers",
    "hero.buy_now",
    "hero.wishlist",
    "hero.share",
    "insight.title",
    "insight.title_local",
    "insight.prompt",
    "insight.prompt_local",
    "insight.ask",
    "insight.ask_local",
    "insight.loading",
    "insight.found_nearby",
    "reward.discount",
    "reward.save",
    "reward.grab",
    "reward.pause",
    "reward.unlocked",
    "reward.save_later",
    "reward.distance",
    "reward.arrived",
    "reward.regenerate",
    "reward.image_unavailable",
    "reward.redemption",
    "reward.step_buy_title",
    "reward.step_buy_body",
    "reward.step_enjoy_title",
    "reward.step_enjoy_body",
    "reward.step_enjoy_body_local",
    "map.you",
    "map.target",
    "map.arrived",
    "map.live",
    "map.compass",
    "map.layers",
    "highlights.title",
    "highlights.terms",
    "related.title",
    "related.in_store",
    "related.buy",
    "footer.brand",
    "footer.terms",
    "footer.privacy",
    "footer.contact",
    "deal.status.active",
    "deal.status.expired",
    "deal.status.sold_out",
];

fn load_locale(locale: &str) -> Value {
    let path = format!("i18n/{locale}.json");
    let content =
        std::fs::read_to_string(&path).unwrap_or_else(|_| panic!("Failed to read {path}"));
    serde_json::from_str(&content).unwrap_or_else(|_| panic!("Failed to parse JSON in {path}"))
}

fn find_nested_key(json: &Value, key: &str) -> bool {
    key.split('.')
        .try_fold(json, |current, part| current.get(part))
        .is_some_and(|value| value.is_string() || value.is_object())
}

fn collect_keys(prefix: &str, value: &Value, out: &mut BTreeSet<String>) {
    if let Value::Object(map) = value {
        for (k, v) in map {
            let next_prefix = if prefix.is_empty() {
                k.clone()
            } else {
                format!("{prefix}.{k}")
            };
            if v.is_object() {
                collect_keys(&next_prefix, v, out);
            } else {
                out.insert(next_prefix);
            }
        }
    }
}

#[test]
fn every_locale_has_rendered_keys() {
    for meta in crate::i18n::locales() {
        let json = load_locale(meta.code);
        let missing: Vec<_> = RENDERED_KEYS
            .iter()
            .filter(|key| !find_nested_key(&json, key))
            .collect();
        assert!(missing.is_empty(), "{} is missing {missing:?}", meta.code);
    }
}

#[test]
fn locales_share_the_same_key_set() {
    let mut english = BTreeSet::new();
    collect_keys("", &load_locale("en"), &mut english);
    for meta in crate::i18n::locales() {
        let mut keys = BTreeSet::new();
        collect_keys("", &load_locale(meta.code), &mut keys);
        assert_eq!(keys, english, "{} diverges from en", meta.code);
    }
}

#[test]
fn status_keys_match_engine_statuses() {
    use crate::engine::DealStatus;
    let json = load_locale("en");
    for status in [DealStatus::Active, DealStatus::Expired, DealStatus::SoldOut] {
        assert!(find_nested_key(&json, status.key()));
    }
}
