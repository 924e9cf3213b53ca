pub mod battle_log;
pub mod battle_setup_panel;
pub mod catalog_grid;
pub mod leaderboard_table;
pub mod player_list;
pub mod roster_grid;
