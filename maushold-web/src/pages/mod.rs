pub mod battle;
pub mod battle_detail;
pub mod battle_result;
pub mod history;
pub mod home;
pub mod leaderboard;
pub mod login;
pub mod not_found;
pub mod profile;
