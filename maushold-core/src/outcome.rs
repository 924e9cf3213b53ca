//! Win/lose framing of a finished battle for a given viewer.
use crate::model::{Battle, Player, PlayerId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleOutcome {
    Victory { points: i32 },
    Defeat { points: i32 },
    /// The viewer did not take part (admin and history views).
    Spectator,
}

impl BattleOutcome {
    /// Framing is decided only by `winner_id`; point values come from the
    /// server record as-is.
    #[must_use]
    pub fn for_viewer(battle: &Battle, viewer: Option<PlayerId>) -> Self {
        match viewer {
            Some(id) if battle.winner_id == id => Self::Victory {
                points: battle.points_won,
            },
            Some(id) if battle.involves(id) => Self::Defeat {
                points: battle.points_lost,
            },
            _ => Self::Spectator,
        }
    }

    #[must_use]
    pub const fn is_victory(self) -> bool {
        matches!(self, Self::Victory { .. })
    }

    /// Signed point delta, e.g. `+62` or `-27`. Spectators have none.
    #[must_use]
    pub fn points_label(self) -> Option<String> {
        match self {
            Self::Victory { points } => Some(format!("+{points}")),
            Self::Defeat { points } => Some(format!("-{points}")),
            Self::Spectator => None,
        }
    }

    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Victory { .. } => "win",
            Self::Defeat { .. } => "lose",
            Self::Spectator => "neutral",
        }
    }
}

/// Username for `id`, or `Player {id}` when the player list lacks it.
#[must_use]
pub fn player_label(players: &[Player], id: PlayerId) -> String {
    players
        .iter()
        .find(|player| player.id == id)
        .map_or_else(|| format!("Player {id}"), |player| player.username.clone())
}

/// Username for `id`, or `ID: {id}` as shown in history tables.
#[must_use]
pub fn history_label(players: &[Player], id: PlayerId) -> String {
    players
        .iter()
        .find(|player| player.id == id)
        .map_or_else(|| format!("ID: {id}"), |player| player.username.clone())
}

#[must_use]
pub fn winner_label(battle: &Battle, players: &[Player]) -> String {
    player_label(players, battle.winner_id)
}
