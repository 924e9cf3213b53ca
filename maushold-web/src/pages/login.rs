use crate::i18n::t;
use maushold_core::LoginMode;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct LoginPageProps {
    pub mode: LoginMode,
    #[prop_or_default]
    pub busy: bool,
    pub on_submit: Callback<String>,
    pub on_toggle_mode: Callback<()>,
}

#[function_component(LoginPage)]
pub fn login_page(p: &LoginPageProps) -> Html {
    let username = use_state(String::new);

    let on_input = {
        let username = username.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            username.set(input.value());
        })
    };
    let on_form_submit = {
        let username = username.clone();
        let cb = p.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if !username.trim().is_empty() {
                cb.emit((*username).clone());
            }
        })
    };
    let toggle = {
        let cb = p.on_toggle_mode.clone();
        Callback::from(move |_| cb.emit(()))
    };

    let (title, submit_label, toggle_label) = match p.mode {
        LoginMode::Login => ("login.title", "login.submit", "login.switch_to_register"),
        LoginMode::Register => (
            "register.title",
            "register.submit",
            "register.switch_to_login",
        ),
    };

    html! {
        <section class="view login-view" aria-labelledby="login-title">
            <div class="header">
                <h2 id="login-title" class="title">{ t(title) }</h2>
                <p class="subtitle">{ t("login.subtitle") }</p>
            </div>
            <form class="card create-form" onsubmit={on_form_submit}>
                <label for="username-input">{ t("login.username") }</label>
                <input
                    id="username-input"
                    type="text"
                    class="input"
                    autocomplete="username"
                    placeholder={t("login.placeholder")}
                    value={(*username).clone()}
                    oninput={on_input}
                    disabled={p.busy}
                />
                <button type="submit" class="btn-submit" disabled={p.busy || username.trim().is_empty()}>
                    { t(submit_label) }
                </button>
            </form>
            <button type="button" class="btn-link" onclick={toggle} disabled={p.busy}>
                { t(toggle_label) }
            </button>
        </section>
    }
}
