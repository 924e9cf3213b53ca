//! Leaderboard presentation rows.
//!
//! Ordering is whatever the ranking service returned; nothing is re-sorted.
use serde::{Deserialize, Serialize};

use crate::model::LeaderboardEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankSource {
    /// Rank is the row's position in the response, starting at 1.
    #[default]
    Position,
    /// Rank is the entry's `rank` field, falling back to position when 0.
    Server,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Medal {
    Gold,
    Silver,
    Bronze,
}

impl Medal {
    /// Medal for a 0-based row index; ties are not considered.
    #[must_use]
    pub const fn for_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Gold),
            1 => Some(Self::Silver),
            2 => Some(Self::Bronze),
            _ => None,
        }
    }

    #[must_use]
    pub const fn emoji(self) -> &'static str {
        match self {
            Self::Gold => "🥇",
            Self::Silver => "🥈",
            Self::Bronze => "🥉",
        }
    }

    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Gold => "medal-gold",
            Self::Silver => "medal-silver",
            Self::Bronze => "medal-bronze",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedRow<'a> {
    pub rank: u32,
    pub medal: Option<Medal>,
    pub entry: &'a LeaderboardEntry,
}

impl RankedRow<'_> {
    /// Medal emoji for the top three, `#n` otherwise.
    #[must_use]
    pub fn rank_label(&self) -> String {
        self.medal
            .map_or_else(|| format!("#{}", self.rank), |medal| medal.emoji().to_string())
    }

    #[must_use]
    pub fn win_rate_label(&self) -> String {
        format_win_rate(self.entry.win_rate)
    }
}

#[must_use]
pub fn rank_rows(entries: &[LeaderboardEntry], source: RankSource) -> Vec<RankedRow<'_>> {
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let position = u32::try_from(index).map_or(u32::MAX, |i| i.saturating_add(1));
            let rank = match source {
                RankSource::Position => position,
                RankSource::Server if entry.rank > 0 => entry.rank,
                RankSource::Server => position,
            };
            RankedRow {
                rank,
                medal: Medal::for_index(index),
                entry,
            }
        })
        .collect()
}

/// One decimal place followed by `%`; non-finite values render as `0.0%`.
#[must_use]
pub fn format_win_rate(win_rate: f64) -> String {
    let value = if win_rate.is_finite() { win_rate } else { 0.0 };
    format!("{value:.1}%")
}
