//! Shared collections shown across screens: players, catalog, leaderboard.
use serde::{Deserialize, Serialize};

use crate::api::MausholdApi;
use crate::availability::Availability;
use crate::error::ApiError;
use crate::model::{LeaderboardEntry, Monster, Player, PlayerId};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PortalData {
    pub players: Vec<Player>,
    pub monsters: Vec<Monster>,
    pub leaderboard: Availability<Vec<LeaderboardEntry>>,
}

/// Which collections failed during the last load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LoadReport {
    pub players_failed: bool,
    pub monsters_failed: bool,
    pub leaderboard_unavailable: bool,
}

impl LoadReport {
    #[must_use]
    pub const fn is_clean(self) -> bool {
        !self.players_failed && !self.monsters_failed && !self.leaderboard_unavailable
    }
}

impl PortalData {
    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|player| player.id == id)
    }

    #[must_use]
    pub fn player_by_username(&self, username: &str) -> Option<&Player> {
        let wanted = username.trim();
        self.players.iter().find(|player| player.username == wanted)
    }

    /// Players other than `acting`, i.e. possible opponents.
    pub fn opponents(&self, acting: PlayerId) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(move |player| player.id != acting)
    }

    /// Replace a single player record, e.g. after a points refresh.
    pub fn upsert_player(&mut self, player: Player) {
        match self.players.iter_mut().find(|existing| existing.id == player.id) {
            Some(existing) => *existing = player,
            None => self.players.push(player),
        }
    }
}

fn keep_prior<T: Clone>(label: &str, result: Result<Vec<T>, ApiError>, prior: &[T]) -> (Vec<T>, bool) {
    match result {
        Ok(items) => (items, false),
        Err(err) => {
            log::warn!("failed to load {label}: {err}");
            (prior.to_vec(), true)
        }
    }
}

/// Fetch players, catalog and leaderboard concurrently.
///
/// A failed required collection keeps its value from `prior`; the
/// leaderboard reports its own availability. Nothing here fails.
pub async fn load_portal_data<A>(api: &A, prior: &PortalData) -> (PortalData, LoadReport)
where
    A: MausholdApi + ?Sized,
{
    let (players, monsters, leaderboard) =
        futures::join!(api.list_players(), api.list_monsters(), api.leaderboard());

    let (players, players_failed) = keep_prior("players", players, &prior.players);
    let (monsters, monsters_failed) = keep_prior("monsters", monsters, &prior.monsters);
    let report = LoadReport {
        players_failed,
        monsters_failed,
        leaderboard_unavailable: !leaderboard.is_available(),
    };
    (
        PortalData {
            players,
            monsters,
            leaderboard,
        },
        report,
    )
}
