use super::report_failure;
use crate::dom::spawn;
use crate::app::bootstrap::load_player_data;
use crate::app::state::{AppState, SetupAction};
use crate::storage::LocalSessionStorage;
use crate::transport::browser_api;
use maushold_core::{
    Availability, PlayerId, Session, ViewAction, delete_account, login_or_register, logout,
    save_session,
};
use yew::prelude::*;

/// Make `session` the active one: reset the battle selection, leave for the
/// dashboard, then fetch the player's roster, battles and rank.
fn enter_session(state: &AppState, session: Session) {
    let player = session.player_id();
    let mut portal = (*state.portal).clone();
    portal.upsert_player(session.player.clone());
    state.portal.set(portal);

    let mut view = (*state.view).clone();
    view.set_active_player(Some(player));
    let _ = view.apply(ViewAction::GoHome);
    state.view.set(view);

    state.setup.dispatch(SetupAction::Reset);
    state.session.set(Some(session));
    state.alert.set(None);

    let roster = state.roster.clone();
    let battles = state.player_battles.clone();
    let ranking = state.ranking.clone();
    spawn(async move {
        let data = load_player_data(&browser_api(), player).await;
        roster.set(data.roster);
        battles.set(data.battles);
        ranking.set(data.ranking);
    });
}

/// Forget the active player and everything loaded for them.
fn leave_session(state: &AppState) {
    let mut view = (*state.view).clone();
    view.set_active_player(None);
    let _ = view.apply(ViewAction::GoHome);
    state.view.set(view);
    state.session.set(None);
    state.roster.set(Vec::new());
    state.player_battles.set(Availability::default());
    state.ranking.set(None);
    state.setup.dispatch(SetupAction::Reset);
}

pub fn build_login(state: &AppState) -> Callback<String> {
    let state = state.clone();
    Callback::from(move |username: String| {
        if *state.busy {
            return;
        }
        let state = state.clone();
        let mode = *state.login_mode;
        state.busy.set(true);
        spawn(async move {
            let api = browser_api();
            match login_or_register(&api, &LocalSessionStorage, mode, &username).await {
                Ok(session) => enter_session(&state, session),
                Err(err) => report_failure(&state.alert, "sign-in", &err),
            }
            state.busy.set(false);
        });
    })
}

pub fn build_toggle_login_mode(state: &AppState) -> Callback<()> {
    let login_mode = state.login_mode.clone();
    Callback::from(move |()| login_mode.set(login_mode.toggled()))
}

/// Pick an existing player from the home list without typing a username.
pub fn build_select_player(state: &AppState) -> Callback<PlayerId> {
    let state = state.clone();
    Callback::from(move |id: PlayerId| {
        let Some(player) = state.portal.player(id).cloned() else {
            log::warn!("selected player {id} is not in the loaded list");
            return;
        };
        let session = Session::new(player);
        if let Err(err) = save_session(&LocalSessionStorage, &session) {
            log::warn!("session for player {id} not persisted: {err}");
        }
        enter_session(&state, session);
    })
}

pub fn build_logout(state: &AppState) -> Callback<()> {
    let state = state.clone();
    Callback::from(move |()| {
        if let Err(err) = logout(&LocalSessionStorage) {
            log::warn!("stored session not cleared: {err}");
        }
        leave_session(&state);
    })
}

pub fn build_delete_account(state: &AppState) -> Callback<()> {
    let state = state.clone();
    Callback::from(move |()| {
        let Some(player) = state.active_player() else {
            return;
        };
        if *state.busy || !crate::dom::confirm(&crate::i18n::t("profile.confirm_delete")) {
            return;
        }
        let state = state.clone();
        state.busy.set(true);
        spawn(async move {
            let api = browser_api();
            match delete_account(&api, &LocalSessionStorage, player).await {
                Ok(()) => {
                    let mut portal = (*state.portal).clone();
                    portal.players.retain(|known| known.id != player);
                    state.portal.set(portal);
                    leave_session(&state);
                }
                Err(err) => report_failure(&state.alert, "account deletion", &err),
            }
            state.busy.set(false);
        });
    })
}
