use crate::i18n::t;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub on_go_home: Callback<()>,
}

/// Shown for addresses that match no route. The current screen is kept, so
/// this only offers a way back.
#[function_component(NotFound)]
pub fn not_found(p: &Props) -> Html {
    let home = p.on_go_home.reform(|_: MouseEvent| ());
    html! {
        <section class="panel not-found" role="alert">
            <h2 class="title">{ t("not_found.title") }</h2>
            <p class="empty-message">{ t("not_found.message") }</p>
            <button type="button" class="btn-primary" onclick={home}>{ t("not_found.back") }</button>
        </section>
    }
}
