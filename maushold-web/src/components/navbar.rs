use crate::i18n::{locales, set_lang, t};
use maushold_core::{Player, Screen, ViewAction};
use wasm_bindgen::JsCast;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub player: Option<Player>,
    pub screen: Screen,
    pub has_result: bool,
    pub current_lang: String,
    pub on_navigate: Callback<ViewAction>,
    pub on_logout: Callback<()>,
    pub on_lang_change: Callback<String>,
}

const LINKS: &[(ViewAction, &str)] = &[
    (ViewAction::GoHome, "nav.home"),
    (ViewAction::OpenProfile, "nav.profile"),
    (ViewAction::OpenBattle, "nav.battle"),
    (ViewAction::ViewLastResult, "nav.last_result"),
    (ViewAction::ViewLeaderboard, "nav.leaderboard"),
    (ViewAction::OpenHistory, "nav.history"),
];

fn link_visible(action: ViewAction, p: &Props) -> bool {
    match action {
        ViewAction::OpenProfile | ViewAction::OpenBattle => p.player.is_some(),
        ViewAction::ViewLastResult => p.has_result,
        _ => true,
    }
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

    let links = LINKS
        .iter()
        .filter(|(action, _)| link_visible(*action, p))
        .map(|(action, key)| {
            let action = *action;
            let current = p.screen == action.target();
            let onclick = {
                let cb = p.on_navigate.clone();
                Callback::from(move |_| cb.emit(action))
            };
            html! {
                <li>
                    <button
                        type="button"
                        class={classes!("nav-link", current.then_some("active"))}
                        aria-current={current.then_some("page")}
                        {onclick}
                    >
                        { t(key) }
                    </button>
                </li>
            }
        })
        .collect::<Html>();

    let account = p.player.as_ref().map_or_else(
        || {
            let cb = p.on_navigate.clone();
            let login = Callback::from(move |_| cb.emit(ViewAction::OpenLogin));
            html! {
                <button type="button" class="btn-primary" onclick={login}>{ t("nav.login") }</button>
            }
        },
        |player| {
            let cb = p.on_logout.clone();
            let logout = Callback::from(move |_| cb.emit(()));
            html! {
                <>
                    <span class="nav-player">
                        <strong>{ player.username.clone() }</strong>
                        { format!(" ⭐ {}", player.points) }
                    </span>
                    <button type="button" class="btn-secondary" onclick={logout}>{ t("nav.logout") }</button>
                </>
            }
        },
    );

    html! {
        <header role="banner" class="navbar">
            <a href="#main" class="sr-only">{ t("ui.skip_to_content") }</a>
            <h1 class="brand">{ t("app.title") }</h1>
            <nav aria-label={t("nav.label")}>
                <ul class="nav-links">{ links }</ul>
            </nav>
            <div class="nav-account">
                { account }
                <label for="lang-select" class="sr-only">{ t("nav.language") }</label>
                <select id="lang-select" onchange={on_change} aria-label={t("nav.language")}>
                    { for locales().iter().map(|meta| html! {
                        <option value={meta.code} selected={meta.code == p.current_lang}>{ meta.name }</option>
                    }) }
                </select>
            </div>
        </header>
    }
}
