//! Maushold client core
//!
//! Platform-agnostic logic for the Maushold monster-battling portal: validated
//! data model, collaborator endpoints, the HTTP-agnostic API facade, battle
//! selection workflow, view state, session persistence and result framing.
//! This crate has no DOM or network stack; platforms plug in a [`Transport`]
//! and a [`SessionStorage`].

pub mod api;
pub mod availability;
pub mod battle_setup;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod leaderboard;
pub mod model;
pub mod outcome;
pub mod portal;
pub mod roster;
pub mod sandbox;
pub mod session;
pub mod transport;
pub mod view;
pub mod workflow;

// Re-export commonly used types
pub use api::{HttpApi, MausholdApi, decode};
pub use availability::Availability;
pub use battle_setup::{BattleSetup, RosterLoad, RosterRequest, SetupPhase, SubmitOutcome, Submission};
pub use config::{ApiConfig, DEFAULT_GATEWAY_URL, ServiceLayout};
pub use endpoints::{Collaborator, CollaboratorPolicy, Endpoint};
pub use error::{
    ApiError, NavigationError, SchemaViolation, SessionError, SetupError, TransportError,
    WorkflowError,
};
pub use leaderboard::{Medal, RankSource, RankedRow, format_win_rate, rank_rows};
pub use model::{
    Battle, BattleId, LeaderboardEntry, Monster, MonsterId, NewBattle, NewPlayer, NewRosterEntry,
    Player, PlayerId, PlayerMonster, PlayerRanking, RosterEntryId, StatBlock, Validate,
};
pub use outcome::{BattleOutcome, history_label, player_label, winner_label};
pub use portal::{LoadReport, PortalData, load_portal_data};
pub use roster::{RosterRow, UNKNOWN_SPECIES, resolve_roster, seed_entry};
pub use sandbox::{SandboxBackend, starter_catalog};
pub use session::{
    MemorySessionStorage, SESSION_STORAGE_KEY, Session, SessionStorage, clear_session,
    load_session, restore_session, save_session,
};
pub use transport::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use view::{Screen, ViewAction, ViewState};
pub use workflow::{
    BattleReport, LoginMode, add_catalog_monster, delete_account, login_or_register, logout,
    reload_after_battle, submit_battle,
};
