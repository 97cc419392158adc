use crate::i18n::t;
use yew::prelude::*;

#[function_component(Footer)]
pub fn footer() -> Html {
    html! {
        <footer class="site-footer">
            <span class="site-footer__brand">{ t("footer.brand") }</span>
            <nav class="site-footer__links">
                <a href="#">{ t("footer.terms") }</a>
                <a href="#">{ t("footer.privacy") }</a>
                <a href="#">{ t("footer.contact") }</a>
            </nav>
        </footer>
    }
}
