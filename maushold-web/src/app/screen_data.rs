//! Data fetched when a screen is entered rather than at startup.
use crate::app::state::AppState;
use crate::dom::spawn;
use crate::transport::browser_api;
use maushold_core::{Battle, BattleId, MausholdApi};
#[cfg(target_arch = "wasm32")]
use maushold_core::Screen;
#[cfg(target_arch = "wasm32")]
use yew::prelude::*;

/// Refetch the global battle list.
pub fn load_history(state: &AppState) {
    let history = state.history.clone();
    let fetching = state.fetching.clone();
    fetching.set(true);
    spawn(async move {
        history.set(browser_api().list_battles().await);
        fetching.set(false);
    });
}

/// A battle already held locally, so the detail view can skip the request.
fn cached_battle(state: &AppState, id: BattleId) -> Option<Battle> {
    state
        .history
        .value()
        .into_iter()
        .chain(state.player_battles.value())
        .flatten()
        .chain(state.view.last_battle())
        .find(|battle| battle.id == id)
        .cloned()
}

pub fn load_detail(state: &AppState, id: BattleId) {
    if state.detail.as_ref().is_some_and(|battle| battle.id == id) {
        return;
    }
    if let Some(battle) = cached_battle(state, id) {
        state.detail.set(Some(battle));
        return;
    }
    let detail = state.detail.clone();
    let fetching = state.fetching.clone();
    let alert = state.alert.clone();
    detail.set(None);
    fetching.set(true);
    spawn(async move {
        match browser_api().get_battle(id).await {
            Ok(battle) => detail.set(Some(battle)),
            Err(err) => {
                log::error!("failed to load battle {id}: {err}");
                alert.set(Some(err.to_string()));
            }
        }
        fetching.set(false);
    });
}

#[cfg(target_arch = "wasm32")]
#[hook]
pub fn use_screen_data(state: &AppState) {
    let screen = state.view.screen();
    let ready = !*state.loading;
    let state = state.clone();
    use_effect_with((screen, ready), move |(screen, ready)| {
        if *ready {
            match *screen {
                Screen::History => load_history(&state),
                Screen::BattleDetail(id) => load_detail(&state, id),
                _ => {}
            }
        }
    });
}
