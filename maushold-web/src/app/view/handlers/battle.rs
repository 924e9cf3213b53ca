use super::report_failure;
use crate::dom::spawn;
use crate::app::state::{AppState, SetupAction};
use crate::storage::LocalSessionStorage;
use crate::transport::browser_api;
use maushold_core::{
    MausholdApi, PlayerId, RosterEntryId, Session, save_session, submit_battle,
};
use yew::prelude::*;

pub fn build_select_own(state: &AppState) -> Callback<RosterEntryId> {
    let setup = state.setup.clone();
    Callback::from(move |id: RosterEntryId| setup.dispatch(SetupAction::SelectOwn(id)))
}

/// Choose an opponent and fetch their roster. The reducer drops the response
/// when another opponent was picked in the meantime.
pub fn build_select_opponent(state: &AppState) -> Callback<PlayerId> {
    let setup = state.setup.clone();
    let session = state.session.clone();
    Callback::from(move |opponent: PlayerId| {
        let acting = session.as_ref().map(Session::player_id);
        let mut probe = setup.setup.clone();
        let request = match probe.select_opponent(opponent, acting) {
            Ok(request) => request,
            Err(err) => {
                log::warn!("opponent {opponent} not selectable: {err}");
                return;
            }
        };
        setup.dispatch(SetupAction::SelectOpponent { opponent, acting });
        let Some(request) = request else {
            return;
        };
        let setup = setup.clone();
        spawn(async move {
            let result = browser_api().list_roster(request.player).await;
            setup.dispatch(SetupAction::RosterLoaded {
                player: request.player,
                result,
            });
        });
    })
}

pub fn build_select_opponent_monster(state: &AppState) -> Callback<RosterEntryId> {
    let setup = state.setup.clone();
    Callback::from(move |id: RosterEntryId| {
        setup.dispatch(SetupAction::SelectOpponentMonster(id));
    })
}

pub fn build_submit_battle(state: &AppState) -> Callback<()> {
    let state = state.clone();
    Callback::from(move |()| {
        let Some(acting) = state.active_player() else {
            return;
        };
        let mut draft = state.setup.setup.clone();
        if !draft.can_submit() {
            return;
        }
        // Show the in-flight state while the request runs.
        let mut in_flight = draft.clone();
        if in_flight.begin_submit(acting).is_ok() {
            state.setup.dispatch(SetupAction::Sync(in_flight));
        }

        let state = state.clone();
        let prior = (*state.portal).clone();
        spawn(async move {
            let api = browser_api();
            let outcome = submit_battle(&api, &mut draft, acting, &prior).await;
            state.setup.dispatch(SetupAction::Sync(draft));
            let report = match outcome {
                Ok(report) => report,
                Err(err) => {
                    report_failure(&state.alert, "battle", &err);
                    return;
                }
            };
            if !report.load.is_clean() {
                log::warn!("reload after battle {} incomplete: {:?}", report.battle.id, report.load);
            }
            state.portal.set(report.portal);
            if let Some(roster) = report.roster {
                state.roster.set(roster);
            }
            if let Some(player) = report.player {
                let session = Session::new(player);
                if let Err(err) = save_session(&LocalSessionStorage, &session) {
                    log::warn!("refreshed session not persisted: {err}");
                }
                state.session.set(Some(session));
            }
            let battle = report.battle;
            let battles = (*state.player_battles).clone();
            state.player_battles.set(battles.map(|mut list| {
                list.insert(0, battle.clone());
                list
            }));

            let mut view = (*state.view).clone();
            view.record_battle(battle);
            state.view.set(view);

            state
                .ranking
                .set(Some(api.player_ranking(acting).await));
        });
    })
}
