//! Client-side battle selection workflow.
//!
//! Own monster, opponent and opponent monster are picked in any order;
//! picking an opponent issues a roster request that the caller fulfils.
//! Responses for an opponent who is no longer selected are dropped.
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, SetupError};
use crate::model::{Battle, NewBattle, PlayerId, PlayerMonster, RosterEntryId};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RosterLoad {
    #[default]
    Idle,
    Loading {
        player: PlayerId,
    },
    Loaded {
        player: PlayerId,
        entries: Vec<PlayerMonster>,
    },
    Failed {
        player: PlayerId,
        reason: String,
    },
}

impl RosterLoad {
    #[must_use]
    pub const fn player(&self) -> Option<PlayerId> {
        match self {
            Self::Idle => None,
            Self::Loading { player } | Self::Loaded { player, .. } | Self::Failed { player, .. } => {
                Some(*player)
            }
        }
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Submission {
    #[default]
    Idle,
    InFlight,
    Completed(Battle),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SetupPhase {
    NoSelection,
    OwnMonsterSelected,
    OpponentSelected,
    OpponentMonsterSelected,
    Submitting,
    ResultReady,
}

/// Opponent roster fetch the caller must perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RosterRequest {
    pub player: PlayerId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    ResultReady(Battle),
    /// The request failed; selections are kept and the setup is submittable again.
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BattleSetup {
    own_monster: Option<RosterEntryId>,
    opponent: Option<PlayerId>,
    opponent_roster: RosterLoad,
    opponent_monster: Option<RosterEntryId>,
    submission: Submission,
}

impl BattleSetup {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn own_monster(&self) -> Option<RosterEntryId> {
        self.own_monster
    }

    #[must_use]
    pub const fn opponent(&self) -> Option<PlayerId> {
        self.opponent
    }

    #[must_use]
    pub const fn opponent_monster(&self) -> Option<RosterEntryId> {
        self.opponent_monster
    }

    #[must_use]
    pub const fn opponent_roster(&self) -> &RosterLoad {
        &self.opponent_roster
    }

    #[must_use]
    pub const fn submission(&self) -> &Submission {
        &self.submission
    }

    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        matches!(self.submission, Submission::InFlight)
    }

    #[must_use]
    pub const fn phase(&self) -> SetupPhase {
        match self.submission {
            Submission::InFlight => SetupPhase::Submitting,
            Submission::Completed(_) => SetupPhase::ResultReady,
            Submission::Idle => {
                if self.opponent_monster.is_some() {
                    SetupPhase::OpponentMonsterSelected
                } else if self.opponent.is_some() {
                    SetupPhase::OpponentSelected
                } else if self.own_monster.is_some() {
                    SetupPhase::OwnMonsterSelected
                } else {
                    SetupPhase::NoSelection
                }
            }
        }
    }

    fn guard_in_flight(&self) -> Result<(), SetupError> {
        if self.is_submitting() {
            Err(SetupError::SubmissionInFlight)
        } else {
            Ok(())
        }
    }

    /// Leave a finished battle behind once the user edits the selection.
    fn reopen(&mut self) {
        if matches!(self.submission, Submission::Completed(_)) {
            self.submission = Submission::Idle;
        }
    }

    /// # Errors
    ///
    /// Rejected while a submission is in flight.
    pub fn select_own_monster(&mut self, id: RosterEntryId) -> Result<(), SetupError> {
        self.guard_in_flight()?;
        self.reopen();
        self.own_monster = Some(id);
        Ok(())
    }

    /// Choose an opponent. Returns the roster fetch to perform, or `None`
    /// when this opponent is already selected.
    ///
    /// # Errors
    ///
    /// Rejected while a submission is in flight, and when `acting` names
    /// the opponent.
    pub fn select_opponent(
        &mut self,
        opponent: PlayerId,
        acting: Option<PlayerId>,
    ) -> Result<Option<RosterRequest>, SetupError> {
        self.guard_in_flight()?;
        if acting == Some(opponent) {
            return Err(SetupError::SelfOpponent(opponent));
        }
        if self.opponent == Some(opponent) {
            return Ok(None);
        }
        self.reopen();
        self.opponent = Some(opponent);
        self.opponent_monster = None;
        self.opponent_roster = RosterLoad::Loading { player: opponent };
        Ok(Some(RosterRequest { player: opponent }))
    }

    /// Apply a roster response. Returns `false` when the response belongs to
    /// an opponent who is no longer selected.
    pub fn apply_opponent_roster(
        &mut self,
        player: PlayerId,
        result: Result<Vec<PlayerMonster>, ApiError>,
    ) -> bool {
        if self.opponent != Some(player) {
            log::debug!("dropping stale roster response for player {player}");
            return false;
        }
        self.opponent_roster = match result {
            Ok(entries) => RosterLoad::Loaded { player, entries },
            Err(err) => {
                log::warn!("failed to load roster of player {player}: {err}");
                RosterLoad::Failed {
                    player,
                    reason: err.user_message(),
                }
            }
        };
        true
    }

    /// Roster entries of the currently selected opponent, if loaded.
    #[must_use]
    pub fn visible_opponent_roster(&self) -> &[PlayerMonster] {
        match (&self.opponent_roster, self.opponent) {
            (RosterLoad::Loaded { player, entries }, Some(opponent)) if *player == opponent => {
                entries
            }
            _ => &[],
        }
    }

    /// # Errors
    ///
    /// Rejected without an opponent, while in flight, or when `id` is not on
    /// the opponent's loaded roster.
    pub fn select_opponent_monster(&mut self, id: RosterEntryId) -> Result<(), SetupError> {
        self.guard_in_flight()?;
        if self.opponent.is_none() {
            return Err(SetupError::MissingOpponent);
        }
        if !self.visible_opponent_roster().iter().any(|entry| entry.id == id) {
            return Err(SetupError::NotOnOpponentRoster(id));
        }
        self.reopen();
        self.opponent_monster = Some(id);
        Ok(())
    }

    #[must_use]
    pub const fn can_submit(&self) -> bool {
        self.own_monster.is_some()
            && self.opponent.is_some()
            && self.opponent_monster.is_some()
            && !self.is_submitting()
    }

    /// Move to `Submitting` and build the creation request.
    ///
    /// # Errors
    ///
    /// Names the first missing selection, or reports a submission already in flight.
    pub fn begin_submit(&mut self, acting: PlayerId) -> Result<NewBattle, SetupError> {
        self.guard_in_flight()?;
        let monster1_id = self.own_monster.ok_or(SetupError::MissingOwnMonster)?;
        let player2_id = self.opponent.ok_or(SetupError::MissingOpponent)?;
        let monster2_id = self
            .opponent_monster
            .ok_or(SetupError::MissingOpponentMonster)?;
        if player2_id == acting {
            return Err(SetupError::SelfOpponent(acting));
        }
        self.submission = Submission::InFlight;
        Ok(NewBattle {
            player1_id: acting,
            player2_id,
            monster1_id,
            monster2_id,
        })
    }

    pub fn finish_submit(&mut self, result: Result<Battle, ApiError>) -> SubmitOutcome {
        match result {
            Ok(battle) => {
                self.submission = Submission::Completed(battle.clone());
                SubmitOutcome::ResultReady(battle)
            }
            Err(err) => {
                log::error!("battle submission failed: {err}");
                self.submission = Submission::Idle;
                SubmitOutcome::Failed(err.user_message())
            }
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BattleId, StatBlock};

    fn entry(id: u32, player: u32) -> PlayerMonster {
        PlayerMonster {
            id: RosterEntryId(id),
            player_id: PlayerId(player),
            monster_id: None,
            nickname: format!("mon-{id}"),
            level: 1,
            stats: StatBlock {
                hp: 30,
                attack: 20,
                defense: 10,
                speed: 15,
            },
            experience: None,
            created_at: None,
        }
    }

    fn battle(winner: u32) -> Battle {
        Battle {
            id: BattleId(1),
            player1_id: PlayerId(1),
            player2_id: PlayerId(2),
            monster1_id: RosterEntryId(10),
            monster2_id: RosterEntryId(20),
            winner_id: PlayerId(winner),
            status: String::from("completed"),
            battle_log: String::new(),
            points_won: 70,
            points_lost: 30,
            created_at: None,
            completed_at: None,
        }
    }

    fn ready_setup() -> BattleSetup {
        let mut setup = BattleSetup::new();
        setup.select_own_monster(RosterEntryId(10)).unwrap();
        setup.select_opponent(PlayerId(2), Some(PlayerId(1))).unwrap();
        assert!(setup.apply_opponent_roster(PlayerId(2), Ok(vec![entry(20, 2), entry(21, 2)])));
        setup.select_opponent_monster(RosterEntryId(20)).unwrap();
        setup
    }

    #[test]
    fn own_monster_selection_is_order_independent() {
        let mut setup = BattleSetup::new();
        assert_eq!(setup.phase(), SetupPhase::NoSelection);
        setup.select_opponent(PlayerId(2), None).unwrap();
        setup.apply_opponent_roster(PlayerId(2), Ok(vec![entry(20, 2)]));
        setup.select_opponent_monster(RosterEntryId(20)).unwrap();
        assert!(!setup.can_submit());
        setup.select_own_monster(RosterEntryId(10)).unwrap();
        assert!(setup.can_submit());
        assert_eq!(setup.phase(), SetupPhase::OpponentMonsterSelected);
    }

    #[test]
    fn switching_opponent_clears_opponent_monster() {
        let mut setup = ready_setup();
        let request = setup.select_opponent(PlayerId(3), Some(PlayerId(1))).unwrap();
        assert_eq!(request, Some(RosterRequest { player: PlayerId(3) }));
        assert_eq!(setup.opponent_monster(), None);
        assert!(setup.visible_opponent_roster().is_empty());
        assert!(!setup.can_submit());
        assert_eq!(setup.phase(), SetupPhase::OpponentSelected);
    }

    #[test]
    fn reselecting_same_opponent_keeps_selection() {
        let mut setup = ready_setup();
        assert_eq!(setup.select_opponent(PlayerId(2), Some(PlayerId(1))).unwrap(), None);
        assert_eq!(setup.opponent_monster(), Some(RosterEntryId(20)));
    }

    #[test]
    fn stale_roster_response_is_dropped() {
        let mut setup = BattleSetup::new();
        setup.select_opponent(PlayerId(2), None).unwrap();
        setup.select_opponent(PlayerId(3), None).unwrap();
        assert!(!setup.apply_opponent_roster(PlayerId(2), Ok(vec![entry(20, 2)])));
        assert!(setup.opponent_roster().is_loading());
        assert!(setup.visible_opponent_roster().is_empty());
        assert_eq!(
            setup.select_opponent_monster(RosterEntryId(20)),
            Err(SetupError::NotOnOpponentRoster(RosterEntryId(20)))
        );
    }

    #[test]
    fn cannot_pick_self_as_opponent() {
        let mut setup = BattleSetup::new();
        assert_eq!(
            setup.select_opponent(PlayerId(1), Some(PlayerId(1))),
            Err(SetupError::SelfOpponent(PlayerId(1)))
        );
        assert_eq!(setup.opponent(), None);
    }

    #[test]
    fn submit_requires_all_three_selections() {
        let mut setup = BattleSetup::new();
        assert_eq!(
            setup.begin_submit(PlayerId(1)),
            Err(SetupError::MissingOwnMonster)
        );
        setup.select_own_monster(RosterEntryId(10)).unwrap();
        assert_eq!(
            setup.begin_submit(PlayerId(1)),
            Err(SetupError::MissingOpponent)
        );
        setup.select_opponent(PlayerId(2), None).unwrap();
        assert_eq!(
            setup.begin_submit(PlayerId(1)),
            Err(SetupError::MissingOpponentMonster)
        );
    }

    #[test]
    fn in_flight_submission_disables_submit_and_edits() {
        let mut setup = ready_setup();
        let request = setup.begin_submit(PlayerId(1)).unwrap();
        assert_eq!(request.player1_id, PlayerId(1));
        assert_eq!(request.player2_id, PlayerId(2));
        assert_eq!(request.monster1_id, RosterEntryId(10));
        assert_eq!(request.monster2_id, RosterEntryId(20));
        assert!(!setup.can_submit());
        assert_eq!(setup.phase(), SetupPhase::Submitting);
        assert_eq!(
            setup.select_own_monster(RosterEntryId(11)),
            Err(SetupError::SubmissionInFlight)
        );
        assert_eq!(
            setup.begin_submit(PlayerId(1)),
            Err(SetupError::SubmissionInFlight)
        );
    }

    #[test]
    fn failed_submission_returns_to_submittable() {
        let mut setup = ready_setup();
        setup.begin_submit(PlayerId(1)).unwrap();
        let outcome = setup.finish_submit(Err(ApiError::Status {
            status: 500,
            body: String::from("Failed to create battle"),
        }));
        assert_eq!(
            outcome,
            SubmitOutcome::Failed(String::from("Failed to create battle (500)"))
        );
        assert!(setup.can_submit());
        assert_eq!(setup.opponent_monster(), Some(RosterEntryId(20)));
    }

    #[test]
    fn successful_submission_carries_server_record() {
        let mut setup = ready_setup();
        setup.begin_submit(PlayerId(1)).unwrap();
        let outcome = setup.finish_submit(Ok(battle(1)));
        assert_eq!(outcome, SubmitOutcome::ResultReady(battle(1)));
        assert_eq!(setup.phase(), SetupPhase::ResultReady);
        setup.select_own_monster(RosterEntryId(11)).unwrap();
        assert_eq!(setup.phase(), SetupPhase::OpponentMonsterSelected);
    }

    #[test]
    fn failed_roster_load_is_empty_and_reset_clears() {
        let mut setup = BattleSetup::new();
        setup.select_opponent(PlayerId(2), None).unwrap();
        assert!(setup.apply_opponent_roster(
            PlayerId(2),
            Err(ApiError::Status {
                status: 404,
                body: String::new()
            })
        ));
        assert!(matches!(setup.opponent_roster(), RosterLoad::Failed { .. }));
        assert!(setup.visible_opponent_roster().is_empty());
        setup.reset();
        assert_eq!(setup, BattleSetup::default());
    }
}
