//! Multi-step user workflows composed from the facade.
use serde::{Deserialize, Serialize};

use crate::api::MausholdApi;
use crate::battle_setup::{BattleSetup, SubmitOutcome};
use crate::error::{SchemaViolation, WorkflowError};
use crate::model::{Battle, Monster, NewPlayer, Player, PlayerId, PlayerMonster};
use crate::portal::{LoadReport, PortalData, load_portal_data};
use crate::roster::seed_entry;
use crate::session::{Session, SessionStorage, clear_session, save_session};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LoginMode {
    #[default]
    Login,
    Register,
}

impl LoginMode {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Login => Self::Register,
            Self::Register => Self::Login,
        }
    }
}

/// Log in by username lookup, or register a new player, then persist the session.
///
/// # Errors
///
/// Fails on a blank username, an unknown player in login mode, a failed
/// request, or when the session cannot be stored.
pub async fn login_or_register<A, S>(
    api: &A,
    storage: &S,
    mode: LoginMode,
    username: &str,
) -> Result<Session, WorkflowError>
where
    A: MausholdApi + ?Sized,
    S: SessionStorage + ?Sized,
{
    let player = match mode {
        LoginMode::Login => {
            let wanted = username.trim();
            if wanted.is_empty() {
                return Err(SchemaViolation::new("Login", "username", "must not be blank").into());
            }
            api.list_players()
                .await?
                .into_iter()
                .find(|player| player.username == wanted)
                .ok_or_else(|| WorkflowError::PlayerNotFound(wanted.to_string()))?
        }
        LoginMode::Register => api.create_player(&NewPlayer::new(username)?).await?,
    };
    log::info!("player {} ({}) signed in", player.username, player.id);
    let session = Session::new(player);
    save_session(storage, &session)?;
    Ok(session)
}

/// # Errors
///
/// Fails when the stored session cannot be removed.
pub fn logout<S: SessionStorage + ?Sized>(storage: &S) -> Result<(), WorkflowError> {
    clear_session(storage)?;
    Ok(())
}

/// Delete the player on the server and drop the local session.
///
/// # Errors
///
/// Fails when the delete request fails; the session is kept in that case.
pub async fn delete_account<A, S>(api: &A, storage: &S, player: PlayerId) -> Result<(), WorkflowError>
where
    A: MausholdApi + ?Sized,
    S: SessionStorage + ?Sized,
{
    api.delete_player(player).await?;
    clear_session(storage)?;
    Ok(())
}

/// Add a catalog species to the roster and return the reloaded roster.
///
/// # Errors
///
/// Fails when the creation request or the reload fails.
pub async fn add_catalog_monster<A>(
    api: &A,
    player: PlayerId,
    monster: &Monster,
) -> Result<Vec<PlayerMonster>, WorkflowError>
where
    A: MausholdApi + ?Sized,
{
    let entry = seed_entry(monster);
    let created = api.add_roster_entry(player, &entry).await?;
    log::info!(
        "added {} (entry {}) to roster of player {player}",
        created.nickname,
        created.id
    );
    Ok(api.list_roster(player).await?)
}

/// State after a battle: the server's record plus freshly fetched data.
#[derive(Debug, Clone, PartialEq)]
pub struct BattleReport {
    pub battle: Battle,
    pub portal: PortalData,
    pub load: LoadReport,
    /// Reloaded roster of the acting player; `None` when the reload failed.
    pub roster: Option<Vec<PlayerMonster>>,
    /// Refreshed record of the acting player; `None` when the reload failed.
    pub player: Option<Player>,
}

/// Reload everything a battle may have changed.
pub async fn reload_after_battle<A>(
    api: &A,
    battle: Battle,
    acting: PlayerId,
    prior: &PortalData,
) -> BattleReport
where
    A: MausholdApi + ?Sized,
{
    let ((portal, load), roster, player) = futures::join!(
        load_portal_data(api, prior),
        api.list_roster(acting),
        api.get_player(acting)
    );
    let roster = roster
        .map_err(|err| log::warn!("failed to reload roster of player {acting}: {err}"))
        .ok();
    let player = player
        .map_err(|err| log::warn!("failed to refresh player {acting}: {err}"))
        .ok()
        .or_else(|| portal.player(acting).cloned());
    BattleReport {
        battle,
        portal,
        load,
        roster,
        player,
    }
}

/// Submit the selected battle, then reload once the server has answered.
///
/// # Errors
///
/// Fails when the selection is incomplete or the battle service rejects the
/// request; on rejection `setup` is submittable again.
pub async fn submit_battle<A>(
    api: &A,
    setup: &mut BattleSetup,
    acting: PlayerId,
    prior: &PortalData,
) -> Result<BattleReport, WorkflowError>
where
    A: MausholdApi + ?Sized,
{
    let request = setup.begin_submit(acting)?;
    let created = api.create_battle(&request).await;
    match setup.finish_submit(created) {
        SubmitOutcome::ResultReady(battle) => {
            log::info!(
                "battle {} finished, winner {}",
                battle.id,
                battle.winner_id
            );
            Ok(reload_after_battle(api, battle, acting, prior).await)
        }
        SubmitOutcome::Failed(message) => Err(WorkflowError::BattleRejected(message)),
    }
}
