use crate::i18n::{fmt_number, locales, set_lang, t, tr};
use std::collections::BTreeMap;
use wasm_bindgen::JsCast;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub points: u32,
    pub current_lang: String,
    pub on_lang_change: Callback<String>,
}

#[function_component(Navbar)]
pub fn navbar(p: &Props) -> Html {
    let on_change = {
        let cb = p.on_lang_change.clone();
        Callback::from(move |e: web_sys::Event| {
            if let Some(sel) = e
                .target()
                .and_then(|t| t.dyn_into::<web_sys::HtmlSelectElement>().ok())
            {
                set_lang(&sel.value());
                cb.emit(sel.value());
            }
        })
    };

    let points = fmt_number(f64::from(p.points));
    let mut args = BTreeMap::new();
    args.insert("points", points.as_str());

    html! {
        <nav class="navbar" aria-label={t("nav.menu")}>
            <div class="navbar__brand">
                <span class="navbar__title">{ t("app.title") }</span>
                <span class="navbar__tagline">{ t("nav.tagline") }</span>
            </div>
            <div class="navbar__actions">
                <span class="navbar__points">{ tr("nav.points", Some(&args)) }</span>
                <button class="navbar__icon" aria-label={t("nav.notifications")}>{ "\u{1F514}" }</button>
                <label for="lang-select" class="sr-only">{ t("nav.language") }</label>
                <select id="lang-select" onchange={on_change} value={p.current_lang.clone()} aria-label={t("nav.language")}>
                    { for locales().iter().map(|meta| html! {
                        <option value={meta.code} selected={meta.code == p.current_lang}>{ meta.name }</option>
                    }) }
                </select>
            </div>
        </nav>
    }
}
