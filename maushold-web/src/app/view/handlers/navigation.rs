use crate::app::state::AppState;
use crate::dom::spawn;
use crate::router::Route;
use crate::transport::browser_api;
use maushold_core::{BattleId, NavigationError, Session, ViewAction, load_portal_data};
use yew::prelude::*;
use yew_router::prelude::Navigator;

fn navigation_message(err: &NavigationError) -> String {
    match err {
        NavigationError::NoActivePlayer => crate::i18n::t("errors.no_player"),
        NavigationError::NoBattleResult => crate::i18n::t("errors.no_result"),
    }
}

pub fn build_navigate(state: &AppState) -> Callback<ViewAction> {
    let view = state.view.clone();
    let alert = state.alert.clone();
    Callback::from(move |action: ViewAction| {
        let mut next = (*view).clone();
        match next.apply(action) {
            Ok(_) => {
                alert.set(None);
                view.set(next);
            }
            Err(err) => {
                log::info!("navigation to {:?} rejected: {err}", action.target());
                alert.set(Some(navigation_message(&err)));
            }
        }
    })
}

pub fn build_go_home(state: &AppState, navigator: Option<Navigator>) -> Callback<()> {
    let view = state.view.clone();
    Callback::from(move |()| {
        if let Some(nav) = navigator.as_ref() {
            nav.push(&Route::Home);
        }
        let mut next = (*view).clone();
        let _ = next.apply(ViewAction::GoHome);
        view.set(next);
    })
}

pub fn build_open_battle(state: &AppState) -> Callback<BattleId> {
    let navigate = build_navigate(state);
    Callback::from(move |id: BattleId| navigate.emit(ViewAction::OpenBattleDetail(id)))
}

pub fn build_dismiss_alert(state: &AppState) -> Callback<()> {
    let alert = state.alert.clone();
    Callback::from(move |()| alert.set(None))
}

pub fn build_lang_change(state: &AppState) -> Callback<String> {
    let current_language = state.current_language.clone();
    // The navbar switches the bundle; storing the code re-renders the tree.
    Callback::from(move |code: String| current_language.set(code))
}

/// Reload players, catalog and leaderboard, keeping the previous lists when a
/// request fails.
pub fn build_refresh_portal(state: &AppState) -> Callback<()> {
    let state = state.clone();
    Callback::from(move |()| {
        if *state.fetching {
            return;
        }
        let state = state.clone();
        state.fetching.set(true);
        spawn(async move {
            let prior = (*state.portal).clone();
            let (portal, report) = load_portal_data(&browser_api(), &prior).await;
            if !report.is_clean() {
                log::warn!("portal refresh incomplete: {report:?}");
            }
            if let Some(player) = state
                .active_player()
                .and_then(|id| portal.player(id).cloned())
            {
                state.session.set(Some(Session::new(player)));
            }
            state.portal.set(portal);
            state.fetching.set(false);
        });
    })
}

pub fn build_refresh_history(state: &AppState) -> Callback<()> {
    let state = state.clone();
    Callback::from(move |()| crate::app::screen_data::load_history(&state))
}
