use maushold_core::{BattleId, Screen, ViewAction};
use yew_router::prelude::*;

#[derive(Clone, Debug, Routable, PartialEq, Eq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/login")]
    Login,
    #[at("/profile")]
    Profile,
    #[at("/battle")]
    Battle,
    #[at("/battle/result")]
    BattleResult,
    #[at("/leaderboard")]
    Leaderboard,
    #[at("/history")]
    History,
    #[at("/history/:id")]
    BattleDetail { id: u32 },
    #[at("/404")]
    #[not_found]
    NotFound,
}

impl Route {
    #[must_use]
    pub const fn from_screen(screen: Screen) -> Self {
        match screen {
            Screen::Login => Self::Login,
            Screen::Home => Self::Home,
            Screen::Profile => Self::Profile,
            Screen::Battle => Self::Battle,
            Screen::BattleResult => Self::BattleResult,
            Screen::Leaderboard => Self::Leaderboard,
            Screen::History => Self::History,
            Screen::BattleDetail(BattleId(id)) => Self::BattleDetail { id },
        }
    }

    /// The navigation a visit to this route asks for.
    #[must_use]
    pub const fn to_action(&self) -> Option<ViewAction> {
        match self {
            Self::Home => Some(ViewAction::GoHome),
            Self::Login => Some(ViewAction::OpenLogin),
            Self::Profile => Some(ViewAction::OpenProfile),
            Self::Battle => Some(ViewAction::OpenBattle),
            Self::BattleResult => Some(ViewAction::ViewLastResult),
            Self::Leaderboard => Some(ViewAction::ViewLeaderboard),
            Self::History => Some(ViewAction::OpenHistory),
            Self::BattleDetail { id } => Some(ViewAction::OpenBattleDetail(BattleId(*id))),
            Self::NotFound => None, // Preserve the current screen on 404.
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_screen_round_trips_through_its_route() {
        for screen in [
            Screen::Login,
            Screen::Home,
            Screen::Profile,
            Screen::Battle,
            Screen::BattleResult,
            Screen::Leaderboard,
            Screen::History,
            Screen::BattleDetail(BattleId(9)),
        ] {
            let action = Route::from_screen(screen).to_action().unwrap();
            assert_eq!(action.target(), screen);
        }
    }

    #[test]
    fn detail_route_carries_battle_id() {
        assert_eq!(
            Route::recognize("/history/42"),
            Some(Route::BattleDetail { id: 42 })
        );
        assert_eq!(Route::BattleDetail { id: 42 }.to_path(), "/history/42");
        assert_eq!(Route::recognize("/nowhere"), Some(Route::NotFound));
        assert!(Route::NotFound.to_action().is_none());
    }
}
