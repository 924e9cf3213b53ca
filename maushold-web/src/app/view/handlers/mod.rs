mod battle;
mod navigation;
mod roster;
mod session;

use crate::app::state::AppState;
use maushold_core::{BattleId, MonsterId, PlayerId, RosterEntryId, ViewAction, WorkflowError};
use yew::prelude::*;
use yew_router::prelude::Navigator;

#[derive(Clone)]
pub struct AppHandlers {
    pub navigate: Callback<ViewAction>,
    pub go_home: Callback<()>,
    pub open_battle: Callback<BattleId>,
    pub dismiss_alert: Callback<()>,
    pub lang_change: Callback<String>,
    pub refresh_portal: Callback<()>,
    pub refresh_history: Callback<()>,
    pub login: Callback<String>,
    pub toggle_login_mode: Callback<()>,
    pub select_player: Callback<PlayerId>,
    pub logout: Callback<()>,
    pub delete_account: Callback<()>,
    pub add_monster: Callback<MonsterId>,
    pub select_own: Callback<RosterEntryId>,
    pub select_opponent: Callback<PlayerId>,
    pub select_opponent_monster: Callback<RosterEntryId>,
    pub submit_battle: Callback<()>,
}

impl AppHandlers {
    pub fn new(state: &AppState, navigator: Option<Navigator>) -> Self {
        Self {
            navigate: navigation::build_navigate(state),
            go_home: navigation::build_go_home(state, navigator),
            open_battle: navigation::build_open_battle(state),
            dismiss_alert: navigation::build_dismiss_alert(state),
            lang_change: navigation::build_lang_change(state),
            refresh_portal: navigation::build_refresh_portal(state),
            refresh_history: navigation::build_refresh_history(state),
            login: session::build_login(state),
            toggle_login_mode: session::build_toggle_login_mode(state),
            select_player: session::build_select_player(state),
            logout: session::build_logout(state),
            delete_account: session::build_delete_account(state),
            add_monster: roster::build_add_monster(state),
            select_own: battle::build_select_own(state),
            select_opponent: battle::build_select_opponent(state),
            select_opponent_monster: battle::build_select_opponent_monster(state),
            submit_battle: battle::build_submit_battle(state),
        }
    }
}

/// Surface a failed user mutation: blocking alert plus the inline banner.
pub(crate) fn report_failure(
    alert: &UseStateHandle<Option<String>>,
    action: &str,
    err: &WorkflowError,
) {
    log::error!("{action} failed: {err}");
    let message = err.user_message();
    crate::dom::alert(&message);
    alert.set(Some(message));
}
