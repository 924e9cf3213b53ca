//! Records mirrored from collaborator JSON, validated at the boundary.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

use crate::error::SchemaViolation;

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u32> for $name {
            fn from(value: u32) -> Self {
                Self(value)
            }
        }
    };
}

id_type!(
    /// Identifier assigned by the player service.
    PlayerId
);
id_type!(
    /// Identifier of a catalog (species) monster.
    MonsterId
);
id_type!(
    /// Identifier of a player-owned roster entry.
    RosterEntryId
);
id_type!(BattleId);

/// Boundary check applied after a response body parses.
pub trait Validate {
    /// # Errors
    ///
    /// Returns the first field that breaks the schema.
    fn validate(&self) -> Result<(), SchemaViolation>;
}

impl<T: Validate> Validate for Vec<T> {
    fn validate(&self) -> Result<(), SchemaViolation> {
        self.iter().try_for_each(Validate::validate)
    }
}

fn require_text(entity: &'static str, field: &'static str, value: &str) -> Result<(), SchemaViolation> {
    if value.trim().is_empty() {
        Err(SchemaViolation::new(entity, field, "must not be empty"))
    } else {
        Ok(())
    }
}

fn require_non_negative(
    entity: &'static str,
    field: &'static str,
    value: i32,
) -> Result<(), SchemaViolation> {
    if value < 0 {
        Err(SchemaViolation::new(
            entity,
            field,
            format!("must not be negative (got {value})"),
        ))
    } else {
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub username: String,
    #[serde(default)]
    pub points: i32,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Validate for Player {
    fn validate(&self) -> Result<(), SchemaViolation> {
        require_text("Player", "username", &self.username)
    }
}

/// Base or concrete stats of a monster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatBlock {
    pub hp: i32,
    pub attack: i32,
    pub defense: i32,
    pub speed: i32,
}

impl StatBlock {
    fn validate_for(&self, entity: &'static str) -> Result<(), SchemaViolation> {
        require_non_negative(entity, "hp", self.hp)?;
        require_non_negative(entity, "attack", self.attack)?;
        require_non_negative(entity, "defense", self.defense)?;
        require_non_negative(entity, "speed", self.speed)
    }
}

/// Species template shared by every player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Monster {
    pub id: MonsterId,
    pub name: String,
    pub type1: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type2: Option<String>,
    pub base_hp: i32,
    pub base_attack: i32,
    pub base_defense: i32,
    pub base_speed: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Monster {
    #[must_use]
    pub const fn base_stats(&self) -> StatBlock {
        StatBlock {
            hp: self.base_hp,
            attack: self.base_attack,
            defense: self.base_defense,
            speed: self.base_speed,
        }
    }

    /// Elemental types; an empty or blank `type2` counts as absent.
    #[must_use]
    pub fn types(&self) -> SmallVec<[&str; 2]> {
        let mut types = SmallVec::new();
        types.push(self.type1.as_str());
        if let Some(second) = self.type2.as_deref().filter(|t| !t.trim().is_empty()) {
            types.push(second);
        }
        types
    }
}

impl Validate for Monster {
    fn validate(&self) -> Result<(), SchemaViolation> {
        require_text("Monster", "name", &self.name)?;
        require_text("Monster", "type1", &self.type1)?;
        self.base_stats().validate_for("Monster")
    }
}

const fn default_level() -> i32 {
    1
}

/// An owned instance of a catalog monster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerMonster {
    pub id: RosterEntryId,
    pub player_id: PlayerId,
    #[serde(default)]
    pub monster_id: Option<MonsterId>,
    #[serde(default)]
    pub nickname: String,
    #[serde(default = "default_level")]
    pub level: i32,
    #[serde(flatten)]
    pub stats: StatBlock,
    #[serde(default)]
    pub experience: Option<i32>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Validate for PlayerMonster {
    fn validate(&self) -> Result<(), SchemaViolation> {
        if self.level < 1 {
            return Err(SchemaViolation::new(
                "PlayerMonster",
                "level",
                format!("must be at least 1 (got {})", self.level),
            ));
        }
        self.stats.validate_for("PlayerMonster")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Battle {
    pub id: BattleId,
    pub player1_id: PlayerId,
    pub player2_id: PlayerId,
    pub monster1_id: RosterEntryId,
    pub monster2_id: RosterEntryId,
    pub winner_id: PlayerId,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub battle_log: String,
    #[serde(default)]
    pub points_won: i32,
    #[serde(default)]
    pub points_lost: i32,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Battle {
    #[must_use]
    pub fn involves(&self, player: PlayerId) -> bool {
        self.player1_id == player || self.player2_id == player
    }

    /// A winner has been recorded. Rows stored before resolution carry 0.
    #[must_use]
    pub const fn has_winner(&self) -> bool {
        self.winner_id.0 != 0
    }
}

impl Validate for Battle {
    fn validate(&self) -> Result<(), SchemaViolation> {
        if self.has_winner() && !self.involves(self.winner_id) {
            return Err(SchemaViolation::new(
                "Battle",
                "winner_id",
                format!(
                    "winner {} is neither {} nor {}",
                    self.winner_id, self.player1_id, self.player2_id
                ),
            ));
        }
        require_non_negative("Battle", "points_won", self.points_won)?;
        require_non_negative("Battle", "points_lost", self.points_lost)
    }
}

/// Derived ranking row; computed entirely by the ranking service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub player_id: PlayerId,
    pub username: String,
    #[serde(default)]
    pub total_points: i32,
    #[serde(default)]
    pub wins: i32,
    #[serde(default)]
    pub losses: i32,
    #[serde(default)]
    pub win_rate: f64,
    #[serde(default)]
    pub rank: u32,
}

impl LeaderboardEntry {
    #[must_use]
    pub const fn battles(&self) -> i32 {
        self.wins.saturating_add(self.losses)
    }
}

fn validate_win_rate(entity: &'static str, win_rate: f64) -> Result<(), SchemaViolation> {
    if win_rate.is_finite() && (0.0..=100.0).contains(&win_rate) {
        Ok(())
    } else {
        Err(SchemaViolation::new(
            entity,
            "win_rate",
            format!("must be a percentage (got {win_rate})"),
        ))
    }
}

impl Validate for LeaderboardEntry {
    fn validate(&self) -> Result<(), SchemaViolation> {
        require_text("LeaderboardEntry", "username", &self.username)?;
        require_non_negative("LeaderboardEntry", "wins", self.wins)?;
        require_non_negative("LeaderboardEntry", "losses", self.losses)?;
        validate_win_rate("LeaderboardEntry", self.win_rate)
    }
}

/// Single-player ranking detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRanking {
    pub player_id: PlayerId,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub total_points: i32,
    #[serde(default)]
    pub total_battles: i32,
    #[serde(default)]
    pub wins: i32,
    #[serde(default)]
    pub losses: i32,
    #[serde(default)]
    pub win_rate: f64,
    #[serde(default)]
    pub rank: u32,
}

impl Validate for PlayerRanking {
    fn validate(&self) -> Result<(), SchemaViolation> {
        require_non_negative("PlayerRanking", "total_battles", self.total_battles)?;
        validate_win_rate("PlayerRanking", self.win_rate)
    }
}

/// Body of `POST /players`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPlayer {
    pub username: String,
}

impl NewPlayer {
    /// Trims surrounding whitespace; anything else the player service
    /// accepts is kept as typed.
    ///
    /// # Errors
    ///
    /// Rejects blank names.
    pub fn new(username: &str) -> Result<Self, SchemaViolation> {
        let username = username.trim();
        require_text("NewPlayer", "username", username)?;
        Ok(Self {
            username: username.to_string(),
        })
    }
}

/// Body of `POST /players/{id}/monster`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRosterEntry {
    pub monster_id: MonsterId,
    pub nickname: String,
    pub level: i32,
    pub hp: i32,
    pub attack: i32,
    pub defense: i32,
    pub speed: i32,
}

impl NewRosterEntry {
    #[must_use]
    pub const fn stats(&self) -> StatBlock {
        StatBlock {
            hp: self.hp,
            attack: self.attack,
            defense: self.defense,
            speed: self.speed,
        }
    }
}

/// Body of `POST /battles`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBattle {
    pub player1_id: PlayerId,
    pub player2_id: PlayerId,
    pub monster1_id: RosterEntryId,
    pub monster2_id: RosterEntryId,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn player_parses_go_timestamps() {
        let player: Player = serde_json::from_value(json!({
            "id": 7,
            "username": "Ash",
            "points": 0,
            "created_at": "2024-05-01T10:20:30.123456789Z",
            "updated_at": "2024-05-01T10:20:30Z"
        }))
        .unwrap();
        assert_eq!(player.id, PlayerId(7));
        assert!(player.created_at.is_some());
        assert!(player.validate().is_ok());
    }

    #[test]
    fn monster_types_skip_blank_secondary() {
        let mut monster = Monster {
            id: MonsterId(25),
            name: String::from("Pikachu"),
            type1: String::from("electric"),
            type2: Some(String::new()),
            base_hp: 35,
            base_attack: 55,
            base_defense: 40,
            base_speed: 90,
            description: None,
        };
        assert_eq!(monster.types().as_slice(), &["electric"]);
        monster.type2 = Some(String::from("steel"));
        assert_eq!(monster.types().as_slice(), &["electric", "steel"]);
    }

    #[test]
    fn roster_entry_flattens_stats_and_defaults_level() {
        let entry: PlayerMonster = serde_json::from_value(json!({
            "id": 3,
            "player_id": 7,
            "monster_id": 25,
            "nickname": "Sparky",
            "hp": 35,
            "attack": 55,
            "defense": 40,
            "speed": 90
        }))
        .unwrap();
        assert_eq!(entry.level, 1);
        assert_eq!(entry.stats.speed, 90);
        assert!(entry.validate().is_ok());
    }

    #[test]
    fn battle_winner_must_be_a_participant() {
        let mut battle: Battle = serde_json::from_value(json!({
            "id": 1,
            "player1_id": 1,
            "player2_id": 2,
            "monster1_id": 10,
            "monster2_id": 20,
            "winner_id": 3,
            "status": "completed",
            "battle_log": "",
            "points_won": 60,
            "points_lost": 25
        }))
        .unwrap();
        let violation = battle.validate().unwrap_err();
        assert_eq!(violation.field, "winner_id");

        battle.status = String::from("pending");
        assert!(battle.validate().is_err());
    }

    #[test]
    fn unresolved_battle_without_winner_is_valid() {
        let battle: Battle = serde_json::from_value(json!({
            "id": 2,
            "player1_id": 1,
            "player2_id": 2,
            "monster1_id": 10,
            "monster2_id": 20,
            "winner_id": 0,
            "status": "in_progress",
            "points_won": 0,
            "points_lost": 0
        }))
        .unwrap();
        assert!(!battle.has_winner());
        assert!(battle.validate().is_ok());
    }

    #[test]
    fn leaderboard_rejects_out_of_range_win_rate() {
        let entry = LeaderboardEntry {
            player_id: PlayerId(1),
            username: String::from("Gary"),
            total_points: 1200,
            wins: 3,
            losses: 1,
            win_rate: 175.0,
            rank: 1,
        };
        assert_eq!(entry.validate().unwrap_err().field, "win_rate");
        assert_eq!(entry.battles(), 4);
    }

    #[test]
    fn vec_validation_reports_first_bad_element() {
        let players = vec![
            Player {
                id: PlayerId(1),
                username: String::from("ok"),
                points: 0,
                created_at: None,
                updated_at: None,
            },
            Player {
                id: PlayerId(2),
                username: String::from("  "),
                points: 0,
                created_at: None,
                updated_at: None,
            },
        ];
        assert_eq!(players.validate().unwrap_err().entity, "Player");
    }

    #[test]
    fn new_player_only_rejects_blank_names() {
        assert_eq!(NewPlayer::new("  Ash ").unwrap().username, "Ash");
        assert!(NewPlayer::new("").is_err());
        assert!(NewPlayer::new(" \t ").is_err());
        assert_eq!(NewPlayer::new("Ash Ketchum").unwrap().username, "Ash Ketchum");
        assert_eq!(NewPlayer::new("Zoë").unwrap().username, "Zoë");
        assert!(NewPlayer::new(&"a".repeat(40)).is_ok());
    }

    #[test]
    fn new_battle_serializes_wire_names() {
        let body = NewBattle {
            player1_id: PlayerId(1),
            player2_id: PlayerId(2),
            monster1_id: RosterEntryId(10),
            monster2_id: RosterEntryId(20),
        };
        assert_eq!(
            serde_json::to_value(body).unwrap(),
            json!({"player1_id": 1, "player2_id": 2, "monster1_id": 10, "monster2_id": 20})
        );
    }
}
