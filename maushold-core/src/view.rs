//! Screen selection and its preconditions.
use serde::{Deserialize, Serialize};

use crate::error::NavigationError;
use crate::model::{Battle, BattleId, PlayerId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Screen {
    Login,
    #[default]
    Home,
    Profile,
    Battle,
    BattleResult,
    Leaderboard,
    History,
    BattleDetail(BattleId),
}

impl Screen {
    /// Screens that make no sense without an active player.
    #[must_use]
    pub const fn requires_player(self) -> bool {
        matches!(self, Self::Profile | Self::Battle)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewAction {
    GoHome,
    OpenProfile,
    OpenBattle,
    ViewLeaderboard,
    ViewLastResult,
    OpenLogin,
    OpenHistory,
    OpenBattleDetail(BattleId),
}

impl ViewAction {
    #[must_use]
    pub const fn target(self) -> Screen {
        match self {
            Self::GoHome => Screen::Home,
            Self::OpenProfile => Screen::Profile,
            Self::OpenBattle => Screen::Battle,
            Self::ViewLeaderboard => Screen::Leaderboard,
            Self::ViewLastResult => Screen::BattleResult,
            Self::OpenLogin => Screen::Login,
            Self::OpenHistory => Screen::History,
            Self::OpenBattleDetail(id) => Screen::BattleDetail(id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ViewState {
    screen: Screen,
    active_player: Option<PlayerId>,
    last_battle: Option<Battle>,
}

impl ViewState {
    #[must_use]
    pub fn new(active_player: Option<PlayerId>) -> Self {
        Self {
            screen: if active_player.is_some() {
                Screen::Home
            } else {
                Screen::Login
            },
            active_player,
            last_battle: None,
        }
    }

    #[must_use]
    pub const fn screen(&self) -> Screen {
        self.screen
    }

    #[must_use]
    pub const fn active_player(&self) -> Option<PlayerId> {
        self.active_player
    }

    #[must_use]
    pub const fn last_battle(&self) -> Option<&Battle> {
        self.last_battle.as_ref()
    }

    /// Check whether `action` may run in the current state.
    ///
    /// # Errors
    ///
    /// Profile and battle need an active player; the last result needs a
    /// completed battle.
    pub const fn check(&self, action: ViewAction) -> Result<Screen, NavigationError> {
        let target = action.target();
        if target.requires_player() && self.active_player.is_none() {
            return Err(NavigationError::NoActivePlayer);
        }
        if matches!(target, Screen::BattleResult) && self.last_battle.is_none() {
            return Err(NavigationError::NoBattleResult);
        }
        Ok(target)
    }

    /// Overwrite the current screen. A rejected action leaves it unchanged.
    ///
    /// # Errors
    ///
    /// See [`ViewState::check`].
    pub fn apply(&mut self, action: ViewAction) -> Result<Screen, NavigationError> {
        let target = self.check(action)?;
        self.screen = target;
        Ok(target)
    }

    /// Change the active player; leaving a player-only screen falls back to login.
    pub fn set_active_player(&mut self, player: Option<PlayerId>) {
        if player != self.active_player {
            self.last_battle = None;
        }
        self.active_player = player;
        if player.is_none() && self.screen.requires_player() {
            self.screen = Screen::Login;
        }
    }

    /// Store a finished battle and show its result.
    pub fn record_battle(&mut self, battle: Battle) {
        self.last_battle = Some(battle);
        self.screen = Screen::BattleResult;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RosterEntryId;

    fn battle() -> Battle {
        Battle {
            id: BattleId(4),
            player1_id: PlayerId(1),
            player2_id: PlayerId(2),
            monster1_id: RosterEntryId(1),
            monster2_id: RosterEntryId(2),
            winner_id: PlayerId(2),
            status: String::from("completed"),
            battle_log: String::new(),
            points_won: 55,
            points_lost: 22,
            created_at: None,
            completed_at: None,
        }
    }

    #[test]
    fn player_screens_require_active_player() {
        let mut view = ViewState::new(None);
        assert_eq!(view.screen(), Screen::Login);
        assert_eq!(
            view.apply(ViewAction::OpenProfile),
            Err(NavigationError::NoActivePlayer)
        );
        assert_eq!(
            view.apply(ViewAction::OpenBattle),
            Err(NavigationError::NoActivePlayer)
        );
        assert_eq!(view.screen(), Screen::Login);
        assert_eq!(view.apply(ViewAction::ViewLeaderboard), Ok(Screen::Leaderboard));
    }

    #[test]
    fn last_result_requires_completed_battle() {
        let mut view = ViewState::new(Some(PlayerId(1)));
        assert_eq!(
            view.apply(ViewAction::ViewLastResult),
            Err(NavigationError::NoBattleResult)
        );
        view.record_battle(battle());
        assert_eq!(view.screen(), Screen::BattleResult);
        view.apply(ViewAction::GoHome).unwrap();
        assert_eq!(view.apply(ViewAction::ViewLastResult), Ok(Screen::BattleResult));
    }

    #[test]
    fn logging_out_on_profile_returns_to_login() {
        let mut view = ViewState::new(Some(PlayerId(1)));
        view.apply(ViewAction::OpenProfile).unwrap();
        view.record_battle(battle());
        view.apply(ViewAction::OpenProfile).unwrap();
        view.set_active_player(None);
        assert_eq!(view.screen(), Screen::Login);
        assert!(view.last_battle().is_none());
    }

    #[test]
    fn actions_overwrite_screen_unconditionally() {
        let mut view = ViewState::new(Some(PlayerId(1)));
        view.apply(ViewAction::OpenBattle).unwrap();
        view.apply(ViewAction::OpenBattleDetail(BattleId(8))).unwrap();
        assert_eq!(view.screen(), Screen::BattleDetail(BattleId(8)));
        view.apply(ViewAction::OpenHistory).unwrap();
        assert_eq!(view.screen(), Screen::History);
    }
}
