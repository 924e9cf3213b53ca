use chrono::{TimeZone, Utc};
use futures::executor::block_on;
use maushold_core::{
    Availability, Battle, BattleId, BattleSetup, LeaderboardEntry, LoginMode, Player, PlayerId,
    PlayerMonster, PlayerRanking, RosterEntryId, StatBlock, starter_catalog,
};
use maushold_web::pages::{
    battle::{BattlePage, BattlePageProps},
    battle_detail::{BattleDetailPage, BattleDetailPageProps},
    battle_result::{BattleResultPage, BattleResultPageProps},
    history::{HistoryPage, HistoryPageProps},
    home::{HomePage, HomePageProps},
    leaderboard::{LeaderboardPage, LeaderboardPageProps},
    login::{LoginPage, LoginPageProps},
    not_found::{NotFound, Props as NotFoundProps},
    profile::{ProfilePage, ProfilePageProps},
};
use yew::{Callback, LocalServerRenderer};

fn player(id: u32, name: &str, points: i32) -> Player {
    Player {
        id: PlayerId(id),
        username: name.to_string(),
        points,
        created_at: None,
        updated_at: None,
    }
}

fn entry(id: u32, owner: u32, species: u32, nickname: &str) -> PlayerMonster {
    PlayerMonster {
        id: RosterEntryId(id),
        player_id: PlayerId(owner),
        monster_id: Some(maushold_core::MonsterId(species)),
        nickname: nickname.to_string(),
        level: 3,
        stats: StatBlock {
            hp: 45,
            attack: 49,
            defense: 49,
            speed: 45,
        },
        experience: None,
        created_at: None,
    }
}

fn battle(winner: u32) -> Battle {
    Battle {
        id: BattleId(11),
        player1_id: PlayerId(1),
        player2_id: PlayerId(2),
        monster1_id: RosterEntryId(10),
        monster2_id: RosterEntryId(20),
        winner_id: PlayerId(winner),
        status: String::from("completed"),
        battle_log: String::from("Round 1: Sprout hits Ember"),
        points_won: 62,
        points_lost: 27,
        created_at: Some(Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()),
        completed_at: None,
    }
}

fn standings() -> Vec<LeaderboardEntry> {
    ["Ash", "Misty", "Brock"]
        .iter()
        .zip(1u32..)
        .map(|(name, id)| LeaderboardEntry {
            player_id: PlayerId(id),
            username: (*name).to_string(),
            total_points: 300 - i32::try_from(id).unwrap() * 50,
            wins: 5,
            losses: 1,
            win_rate: 83.3,
            rank: 0,
        })
        .collect()
}

fn roster() -> Vec<PlayerMonster> {
    vec![entry(10, 1, 1, "Sprout")]
}

#[test]
fn not_found_page_offers_way_home() {
    maushold_web::i18n::set_lang("en");
    let props = NotFoundProps {
        on_go_home: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<NotFound>::with_props(props).render());
    assert!(html.contains("Page not found"));
    assert!(html.contains("Back to home"));
}

#[test]
fn login_page_switches_copy_with_mode() {
    maushold_web::i18n::set_lang("en");
    let props = LoginPageProps {
        mode: LoginMode::Login,
        busy: false,
        on_submit: Callback::noop(),
        on_toggle_mode: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<LoginPage>::with_props(props).render());
    assert!(html.contains("username-input"));
    assert!(html.contains("New here? Create a player"));

    let props = LoginPageProps {
        mode: LoginMode::Register,
        busy: true,
        on_submit: Callback::noop(),
        on_toggle_mode: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<LoginPage>::with_props(props).render());
    assert!(html.contains("Create player"));
    assert!(html.contains("disabled"));
}

#[test]
fn home_page_without_player_lists_players() {
    maushold_web::i18n::set_lang("en");
    let props = HomePageProps {
        player: None,
        players: vec![player(1, "Ash", 120), player(2, "Misty", 80)],
        roster_size: 0,
        battles: Availability::default(),
        ranking: None,
        leaderboard: Availability::Available(standings()),
        loading: false,
        on_navigate: Callback::noop(),
        on_select_player: Callback::noop(),
        on_refresh: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<HomePage>::with_props(props).render());
    assert!(html.contains("Welcome to Maushold"));
    assert!(html.contains("data-player-id=\"2\""));
    assert!(html.contains("120 points"));
}

#[test]
fn home_page_dashboard_shows_stats_and_preview() {
    maushold_web::i18n::set_lang("en");
    let ash = player(1, "Ash", 120);
    let props = HomePageProps {
        player: Some(ash),
        players: Vec::new(),
        roster_size: 0,
        battles: Availability::Available(vec![battle(1), battle(2)]),
        ranking: Some(Availability::Available(PlayerRanking {
            player_id: PlayerId(1),
            username: String::from("Ash"),
            total_points: 120,
            total_battles: 2,
            wins: 1,
            losses: 1,
            win_rate: 50.0,
            rank: 4,
        })),
        leaderboard: Availability::Available(standings()),
        loading: false,
        on_navigate: Callback::noop(),
        on_select_player: Callback::noop(),
        on_refresh: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<HomePage>::with_props(props).render());
    assert!(html.contains("Welcome back, Ash!"));
    assert!(html.contains("#4"));
    assert!(html.contains("Your team is empty"));
    assert!(html.contains("Brock"));
}

#[test]
fn home_page_dashboard_survives_missing_optional_services() {
    maushold_web::i18n::set_lang("en");
    let props = HomePageProps {
        player: Some(player(1, "Ash", 0)),
        players: Vec::new(),
        roster_size: 2,
        battles: Availability::Unavailable { reason: String::from("battle service down") },
        ranking: Some(Availability::Unavailable { reason: String::from("ranking down") }),
        leaderboard: Availability::Unavailable { reason: String::from("ranking down") },
        loading: false,
        on_navigate: Callback::noop(),
        on_select_player: Callback::noop(),
        on_refresh: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<HomePage>::with_props(props).render());
    assert!(html.contains("—"));
    assert!(html.contains("The leaderboard is unavailable right now."));
    assert!(!html.contains("Your team is empty"));
}

#[test]
fn profile_page_lists_team_with_species() {
    maushold_web::i18n::set_lang("en");
    let props = ProfilePageProps {
        player: player(1, "Ash", 120),
        roster: roster(),
        catalog: starter_catalog(),
        busy: false,
        on_add_monster: Callback::noop(),
        on_navigate: Callback::noop(),
        on_delete_account: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<ProfilePage>::with_props(props).render());
    assert!(html.contains("My Monster Team (1 monster)"));
    assert!(html.contains("Sprout"));
    assert!(html.contains("Bulbasaur"));
    assert!(html.contains("Delete account"));
}

#[test]
fn battle_page_requires_a_monster() {
    maushold_web::i18n::set_lang("en");
    let props = BattlePageProps {
        roster: Vec::new(),
        catalog: starter_catalog(),
        opponents: vec![player(2, "Misty", 80)],
        setup: BattleSetup::new(),
        on_select_own: Callback::noop(),
        on_select_opponent: Callback::noop(),
        on_select_opponent_monster: Callback::noop(),
        on_submit: Callback::noop(),
        on_navigate: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<BattlePage>::with_props(props).render());
    assert!(html.contains("You need at least one monster to battle."));
}

#[test]
fn battle_page_enables_submit_once_selection_is_complete() {
    maushold_web::i18n::set_lang("en");
    let mut setup = BattleSetup::new();
    setup.select_own_monster(RosterEntryId(10)).unwrap();
    setup
        .select_opponent(PlayerId(2), Some(PlayerId(1)))
        .unwrap();
    assert!(setup.apply_opponent_roster(PlayerId(2), Ok(vec![entry(20, 2, 4, "Ember")])));
    setup.select_opponent_monster(RosterEntryId(20)).unwrap();

    let props = BattlePageProps {
        roster: roster(),
        catalog: starter_catalog(),
        opponents: vec![player(2, "Misty", 80)],
        setup,
        on_select_own: Callback::noop(),
        on_select_opponent: Callback::noop(),
        on_select_opponent_monster: Callback::noop(),
        on_submit: Callback::noop(),
        on_navigate: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<BattlePage>::with_props(props).render());
    assert!(html.contains("Ember"));
    assert!(html.contains("Charmander"));
    let submit = html
        .split("id=\"start-battle\"")
        .nth(1)
        .and_then(|rest| rest.split('>').next())
        .unwrap();
    assert!(!submit.contains("disabled"));
}

#[test]
fn battle_result_page_frames_outcome_for_viewer() {
    maushold_web::i18n::set_lang("en");
    let players = vec![player(1, "Ash", 120), player(2, "Misty", 80)];
    let props = BattleResultPageProps {
        battle: battle(1),
        viewer: Some(PlayerId(1)),
        players: players.clone(),
        on_navigate: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<BattleResultPage>::with_props(props).render());
    assert!(html.contains("Victory!"));
    assert!(html.contains("+62"));
    assert!(html.contains("Round 1: Sprout hits Ember"));

    let props = BattleResultPageProps {
        battle: battle(1),
        viewer: Some(PlayerId(2)),
        players,
        on_navigate: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<BattleResultPage>::with_props(props).render());
    assert!(html.contains("Defeat"));
    assert!(html.contains("-27"));
}

#[test]
fn history_page_resolves_names_and_handles_outage() {
    maushold_web::i18n::set_lang("en");
    let props = HistoryPageProps {
        battles: Availability::Available(vec![battle(2)]),
        players: vec![player(1, "Ash", 120)],
        loading: false,
        on_open: Callback::noop(),
        on_refresh: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<HistoryPage>::with_props(props).render());
    assert!(html.contains("Ash"));
    assert!(html.contains("ID: 2"));
    assert!(html.contains("data-battle-id=\"11\""));

    let props = HistoryPageProps {
        battles: Availability::Unavailable { reason: String::from("down") },
        players: Vec::new(),
        loading: false,
        on_open: Callback::noop(),
        on_refresh: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<HistoryPage>::with_props(props).render());
    assert!(html.contains("Battle history is unavailable right now."));
}

#[test]
fn battle_detail_page_covers_loading_missing_and_found() {
    maushold_web::i18n::set_lang("en");
    let base = BattleDetailPageProps {
        id: BattleId(11),
        battle: None,
        loading: true,
        players: vec![player(1, "Ash", 120), player(2, "Misty", 80)],
        on_navigate: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<BattleDetailPage>::with_props(base.clone()).render());
    assert!(html.contains("Loading battle results..."));

    let missing = BattleDetailPageProps {
        loading: false,
        ..base.clone()
    };
    let html = block_on(LocalServerRenderer::<BattleDetailPage>::with_props(missing).render());
    assert!(html.contains("Battle #11 could not be found."));

    let found = BattleDetailPageProps {
        battle: Some(battle(2)),
        loading: false,
        ..base
    };
    let html = block_on(LocalServerRenderer::<BattleDetailPage>::with_props(found).render());
    assert!(html.contains("Ash vs Misty"));
    assert!(html.contains("Winner: Misty"));
}

#[test]
fn leaderboard_page_marks_medals_and_current_player() {
    maushold_web::i18n::set_lang("en");
    let props = LeaderboardPageProps {
        entries: Availability::Available(standings()),
        highlight: Some(PlayerId(2)),
        rank_source: maushold_core::RankSource::Position,
        loading: false,
        on_refresh: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<LeaderboardPage>::with_props(props).render());
    assert!(html.contains("current-player"));
    assert!(html.contains("Misty"));
    assert!(html.contains("Win Rate"));
}
