//! Startup load: restore the session, then fetch portal and player data.
#[cfg(any(target_arch = "wasm32", test))]
use crate::app::state::AppState;
use maushold_core::{
    Availability, Battle, LoadReport, MausholdApi, Player, PlayerId, PlayerMonster,
    PlayerRanking, PortalData, Session, SessionStorage, load_portal_data, restore_session,
    save_session,
};
#[cfg(any(target_arch = "wasm32", test))]
use maushold_core::{Screen, ViewAction, ViewState};
#[cfg(any(target_arch = "wasm32", test))]
use yew::prelude::*;

/// Everything shown for the active player beyond the shared portal data.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlayerData {
    pub roster: Vec<PlayerMonster>,
    pub battles: Availability<Vec<Battle>>,
    pub ranking: Option<Availability<PlayerRanking>>,
}

/// Roster plus the optional battle history and ranking, fetched together.
/// Failures are logged and leave empty or unavailable values.
pub async fn load_player_data<A>(api: &A, player: PlayerId) -> PlayerData
where
    A: MausholdApi + ?Sized,
{
    let (roster, battles, ranking) = futures::join!(
        api.list_roster(player),
        api.list_player_battles(player),
        api.player_ranking(player)
    );
    let roster = roster.unwrap_or_else(|err| {
        log::warn!("failed to load roster of player {player}: {err}");
        Vec::new()
    });
    PlayerData {
        roster,
        battles,
        ranking: Some(ranking),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StartupData {
    pub session: Option<Session>,
    pub portal: PortalData,
    pub report: LoadReport,
    pub player: PlayerData,
}

/// Refresh the stored player from a freshly loaded list so points are current.
fn refreshed(session: Session, players: &[Player]) -> Session {
    players
        .iter()
        .find(|player| player.id == session.player_id())
        .cloned()
        .map_or(session, Session::new)
}

pub async fn load_startup<A, S>(api: &A, storage: &S, prior: &PortalData) -> StartupData
where
    A: MausholdApi + ?Sized,
    S: SessionStorage + ?Sized,
{
    let session = restore_session(storage);
    let ((portal, report), player) = match session.as_ref() {
        Some(session) => {
            let (portal, player) = futures::join!(
                load_portal_data(api, prior),
                load_player_data(api, session.player_id())
            );
            (portal, player)
        }
        None => (load_portal_data(api, prior).await, PlayerData::default()),
    };
    if !report.is_clean() {
        log::warn!("startup load incomplete: {report:?}");
    }
    let session = session.map(|session| {
        let session = refreshed(session, &portal.players);
        if let Err(err) = save_session(storage, &session) {
            log::warn!("failed to persist refreshed session: {err}");
        }
        session
    });
    StartupData {
        session,
        portal,
        report,
        player,
    }
}

#[cfg(any(target_arch = "wasm32", test))]
#[derive(Clone)]
struct BootstrapHandles {
    view: UseStateHandle<ViewState>,
    session: UseStateHandle<Option<Session>>,
    portal: UseStateHandle<PortalData>,
    roster: UseStateHandle<Vec<PlayerMonster>>,
    player_battles: UseStateHandle<Availability<Vec<Battle>>>,
    ranking: UseStateHandle<Option<Availability<PlayerRanking>>>,
    loading: UseStateHandle<bool>,
}

#[cfg(any(target_arch = "wasm32", test))]
fn handles_from_state(app_state: &AppState) -> BootstrapHandles {
    BootstrapHandles {
        view: app_state.view.clone(),
        session: app_state.session.clone(),
        portal: app_state.portal.clone(),
        roster: app_state.roster.clone(),
        player_battles: app_state.player_battles.clone(),
        ranking: app_state.ranking.clone(),
        loading: app_state.loading.clone(),
    }
}

#[cfg(any(target_arch = "wasm32", test))]
fn startup_view(
    mut view: ViewState,
    player: Option<PlayerId>,
    deep_link: Option<ViewAction>,
) -> ViewState {
    view.set_active_player(player);
    if player.is_some() && view.screen() == Screen::Login {
        let _ = view.apply(ViewAction::GoHome);
    }
    // The entry route may need the restored player, so it is applied last.
    if let Some(action) = deep_link {
        if let Err(err) = view.apply(action) {
            log::info!("entry route not available: {err}");
        }
    }
    view
}

#[cfg(any(target_arch = "wasm32", test))]
fn apply_startup(handles: &BootstrapHandles, data: StartupData, deep_link: Option<ViewAction>) {
    let player = data.session.as_ref().map(Session::player_id);
    handles
        .view
        .set(startup_view((*handles.view).clone(), player, deep_link));
    handles.session.set(data.session);
    handles.portal.set(data.portal);
    handles.roster.set(data.player.roster);
    handles.player_battles.set(data.player.battles);
    handles.ranking.set(data.player.ranking);
    handles.loading.set(false);
}

#[cfg(target_arch = "wasm32")]
#[hook]
pub fn use_bootstrap(app_state: &AppState, entry_route: Option<crate::router::Route>) {
    let handles = handles_from_state(app_state);
    let deep_link = entry_route.and_then(|route| route.to_action());

    use_effect_with((), move |()| {
        wasm_bindgen_futures::spawn_local(async move {
            let api = crate::transport::browser_api();
            let prior = (*handles.portal).clone();
            let data = load_startup(&api, &crate::storage::LocalSessionStorage, &prior).await;
            apply_startup(&handles, data, deep_link);
        });
        || {}
    });
}
