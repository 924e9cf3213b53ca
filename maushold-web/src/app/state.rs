use maushold_core::{
    ApiError, Availability, Battle, BattleSetup, LoginMode, PlayerId, PlayerMonster,
    PlayerRanking, PortalData, RosterEntryId, Session, SetupError, ViewState,
};
use std::rc::Rc;
use yew::prelude::*;

#[derive(Clone)]
pub struct AppState {
    pub view: UseStateHandle<ViewState>,
    pub session: UseStateHandle<Option<Session>>,
    pub portal: UseStateHandle<PortalData>,
    pub roster: UseStateHandle<Vec<PlayerMonster>>,
    pub player_battles: UseStateHandle<Availability<Vec<Battle>>>,
    pub ranking: UseStateHandle<Option<Availability<PlayerRanking>>>,
    pub history: UseStateHandle<Availability<Vec<Battle>>>,
    pub detail: UseStateHandle<Option<Battle>>,
    pub setup: UseReducerHandle<SetupStore>,
    pub login_mode: UseStateHandle<LoginMode>,
    pub alert: UseStateHandle<Option<String>>,
    pub loading: UseStateHandle<bool>,
    /// A screen-level refresh is in flight.
    pub fetching: UseStateHandle<bool>,
    pub busy: UseStateHandle<bool>,
    pub current_language: UseStateHandle<String>,
}

#[hook]
pub fn use_app_state() -> AppState {
    AppState {
        view: use_state(|| ViewState::new(None)),
        session: use_state(|| None::<Session>),
        portal: use_state(PortalData::default),
        roster: use_state(Vec::<PlayerMonster>::new),
        player_battles: use_state(Availability::<Vec<Battle>>::default),
        ranking: use_state(|| None::<Availability<PlayerRanking>>),
        history: use_state(Availability::<Vec<Battle>>::default),
        detail: use_state(|| None::<Battle>),
        setup: use_reducer(SetupStore::default),
        login_mode: use_state(LoginMode::default),
        alert: use_state(|| None::<String>),
        loading: use_state(|| true),
        fetching: use_state(|| false),
        busy: use_state(|| false),
        current_language: use_state(crate::i18n::current_lang),
    }
}

impl AppState {
    #[must_use]
    pub fn active_player(&self) -> Option<PlayerId> {
        self.session.as_ref().map(Session::player_id)
    }
}

/// Battle selection held in a reducer so late roster responses are applied
/// to the latest selection rather than the one captured by a callback.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SetupStore {
    pub setup: BattleSetup,
}

pub enum SetupAction {
    SelectOwn(RosterEntryId),
    SelectOpponent {
        opponent: PlayerId,
        acting: Option<PlayerId>,
    },
    RosterLoaded {
        player: PlayerId,
        result: Result<Vec<PlayerMonster>, ApiError>,
    },
    SelectOpponentMonster(RosterEntryId),
    /// Adopt the state left behind by a finished submission.
    Sync(BattleSetup),
    Reset,
}

impl Reducible for SetupStore {
    type Action = SetupAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut setup = self.setup.clone();
        let applied: Result<(), SetupError> = match action {
            SetupAction::SelectOwn(id) => setup.select_own_monster(id),
            SetupAction::SelectOpponent { opponent, acting } => {
                setup.select_opponent(opponent, acting).map(|_| ())
            }
            SetupAction::RosterLoaded { player, result } => {
                if !setup.apply_opponent_roster(player, result) {
                    log::debug!("dropped roster of player {player}: no longer the selected opponent");
                    return self;
                }
                Ok(())
            }
            SetupAction::SelectOpponentMonster(id) => setup.select_opponent_monster(id),
            SetupAction::Sync(next) => {
                setup = next;
                Ok(())
            }
            SetupAction::Reset => {
                setup.reset();
                Ok(())
            }
        };
        match applied {
            Ok(()) => Rc::new(Self { setup }),
            Err(err) => {
                log::warn!("battle selection rejected: {err}");
                self
            }
        }
    }
}
