use crate::i18n::t;
use yew::prelude::*;

/// Inline copy of the last mutation failure, shown until dismissed.
#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub message: Option<AttrValue>,
    pub on_dismiss: Callback<()>,
}

#[function_component(AlertBanner)]
pub fn alert_banner(p: &Props) -> Html {
    let Some(message) = p.message.clone() else {
        return Html::default();
    };
    let dismiss = {
        let cb = p.on_dismiss.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {
        <div class="alert alert-error" role="alert">
            <span class="alert-message">{ message }</span>
            <button type="button" class="alert-dismiss" onclick={dismiss} aria-label={t("alert.dismiss")}>
                { "✕" }
            </button>
        </div>
    }
}
