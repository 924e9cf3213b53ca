use futures::executor::block_on;
use maushold_core::{
    BattleOutcome, BattleSetup, Collaborator, LoginMode, MausholdApi, MemorySessionStorage,
    MonsterId, PortalData, SandboxBackend, Screen, ViewAction, ViewState, WorkflowError,
    add_catalog_monster, delete_account, load_portal_data, login_or_register, rank_rows,
    restore_session, submit_battle, RankSource,
};

const SEED: u64 = 0x5EED_CAFE;

#[test]
fn registered_player_starts_with_empty_roster() {
    let sandbox = SandboxBackend::new(SEED);
    let storage = MemorySessionStorage::default();
    let session =
        block_on(login_or_register(&sandbox, &storage, LoginMode::Register, "Ash")).unwrap();
    assert_eq!(session.player.points, 0);
    assert!(block_on(sandbox.list_roster(session.player_id())).unwrap().is_empty());
    assert_eq!(restore_session(&storage), Some(session));
}

#[test]
fn login_requires_existing_username() {
    let sandbox = SandboxBackend::new(SEED);
    sandbox.seed_player("Gary", 1200);
    let storage = MemorySessionStorage::default();

    let err = block_on(login_or_register(&sandbox, &storage, LoginMode::Login, "Ash")).unwrap_err();
    assert!(matches!(err, WorkflowError::PlayerNotFound(ref name) if name == "Ash"));
    assert!(restore_session(&storage).is_none());

    let session =
        block_on(login_or_register(&sandbox, &storage, LoginMode::Login, " Gary ")).unwrap();
    assert_eq!(session.player.points, 1200);
}

#[test]
fn blank_usernames_never_reach_the_service() {
    let sandbox = SandboxBackend::new(SEED);
    let storage = MemorySessionStorage::default();
    for mode in [LoginMode::Register, LoginMode::Login] {
        let err = block_on(login_or_register(&sandbox, &storage, mode, "   ")).unwrap_err();
        assert!(matches!(err, WorkflowError::Invalid(_)));
    }
    assert!(block_on(sandbox.list_players()).unwrap().is_empty());
}

#[test]
fn stored_usernames_log_in_as_typed() {
    let sandbox = SandboxBackend::new(SEED);
    let storage = MemorySessionStorage::default();
    let long_name = "Professor Samuel Oak of Pallet Town";
    sandbox.seed_player("Ash Ketchum", 500);
    sandbox.seed_player(long_name, 40);
    sandbox.seed_player("Zoë", 0);

    let ash =
        block_on(login_or_register(&sandbox, &storage, LoginMode::Login, "Ash Ketchum")).unwrap();
    assert_eq!(ash.player.points, 500);
    assert_eq!(restore_session(&storage), Some(ash));

    let oak = block_on(login_or_register(&sandbox, &storage, LoginMode::Login, long_name)).unwrap();
    assert_eq!(oak.player.username, long_name);
    assert!(block_on(login_or_register(&sandbox, &storage, LoginMode::Login, "Zoë")).is_ok());

    let misty =
        block_on(login_or_register(&sandbox, &storage, LoginMode::Register, "Misty Waterflower"))
            .unwrap();
    assert_eq!(misty.player.username, "Misty Waterflower");
}

#[test]
fn ash_pikachu_versus_gary() {
    let sandbox = SandboxBackend::new(SEED);
    let gary = sandbox.seed_player("Gary", 0);
    let garys_monster = sandbox.seed_roster_entry(gary.id, MonsterId(7)).unwrap();
    let storage = MemorySessionStorage::default();
    let ash = block_on(login_or_register(&sandbox, &storage, LoginMode::Register, "Ash"))
        .unwrap()
        .player;

    let (portal, report) = block_on(load_portal_data(&sandbox, &PortalData::default()));
    assert!(report.is_clean());
    let pikachu = portal
        .monsters
        .iter()
        .find(|monster| monster.name == "Pikachu")
        .unwrap();
    let roster = block_on(add_catalog_monster(&sandbox, ash.id, pikachu)).unwrap();
    assert_eq!(roster.len(), 1);
    assert_eq!(roster[0].stats.hp, 35);
    assert_eq!(roster[0].level, 1);

    let mut setup = BattleSetup::new();
    setup.select_own_monster(roster[0].id).unwrap();
    let request = setup.select_opponent(gary.id, Some(ash.id)).unwrap().unwrap();
    let opponent_roster = block_on(sandbox.list_roster(request.player));
    assert!(setup.apply_opponent_roster(request.player, opponent_roster));
    let first = setup.visible_opponent_roster()[0].id;
    assert_eq!(first, garys_monster.id);
    setup.select_opponent_monster(first).unwrap();
    assert!(setup.can_submit());

    let report = block_on(submit_battle(&sandbox, &mut setup, ash.id, &portal)).unwrap();
    let battle = report.battle.clone();
    let outcome = BattleOutcome::for_viewer(&battle, Some(ash.id));
    if battle.winner_id == ash.id {
        assert_eq!(outcome, BattleOutcome::Victory { points: battle.points_won });
    } else {
        assert_eq!(outcome, BattleOutcome::Defeat { points: battle.points_lost });
    }

    let refreshed = report.player.unwrap();
    let expected = if battle.winner_id == ash.id {
        battle.points_won
    } else {
        -battle.points_lost
    };
    assert_eq!(refreshed.points, expected);
    assert_eq!(report.portal.player(ash.id).unwrap().points, expected);
    assert_eq!(report.roster.unwrap().len(), 1);

    let mut view = ViewState::new(Some(ash.id));
    view.record_battle(battle);
    assert_eq!(view.screen(), Screen::BattleResult);
    view.apply(ViewAction::GoHome).unwrap();
    assert_eq!(view.apply(ViewAction::ViewLastResult), Ok(Screen::BattleResult));
}

#[test]
fn failed_battle_submission_keeps_selection() {
    let sandbox = SandboxBackend::new(SEED);
    let ash = sandbox.seed_player("Ash", 0);
    let gary = sandbox.seed_player("Gary", 0);
    let mine = sandbox.seed_roster_entry(ash.id, MonsterId(25)).unwrap();
    let theirs = sandbox.seed_roster_entry(gary.id, MonsterId(4)).unwrap();

    let mut setup = BattleSetup::new();
    setup.select_own_monster(mine.id).unwrap();
    setup.select_opponent(gary.id, Some(ash.id)).unwrap();
    setup.apply_opponent_roster(gary.id, Ok(vec![theirs.clone()]));
    setup.select_opponent_monster(theirs.id).unwrap();

    sandbox.set_down(Collaborator::Battles, true);
    let err = block_on(submit_battle(&sandbox, &mut setup, ash.id, &PortalData::default()))
        .unwrap_err();
    assert!(matches!(err, WorkflowError::BattleRejected(_)));
    assert!(setup.can_submit());
    assert!(sandbox.battles().is_empty());

    sandbox.set_down(Collaborator::Battles, false);
    assert!(block_on(submit_battle(&sandbox, &mut setup, ash.id, &PortalData::default())).is_ok());
}

#[test]
fn startup_load_keeps_prior_collections_on_failure() {
    let sandbox = SandboxBackend::new(SEED);
    sandbox.seed_player("Gary", 40);
    let (first, _) = block_on(load_portal_data(&sandbox, &PortalData::default()));
    assert_eq!(first.players.len(), 1);

    sandbox.seed_player("Misty", 10);
    sandbox.set_down(Collaborator::Players, true);
    sandbox.set_down(Collaborator::Rankings, true);
    let (second, report) = block_on(load_portal_data(&sandbox, &first));
    assert!(report.players_failed);
    assert!(!report.monsters_failed);
    assert!(report.leaderboard_unavailable);
    assert_eq!(second.players, first.players);
    assert_eq!(second.monsters.len(), first.monsters.len());
    assert!(second.leaderboard.clone().unwrap_or_default().is_empty());
}

#[test]
fn leaderboard_rows_follow_service_order() {
    let sandbox = SandboxBackend::new(SEED);
    for (name, points) in [("Brock", 10), ("Gary", 900), ("Misty", 300), ("Ash", 50)] {
        sandbox.seed_player(name, points);
    }
    let board = block_on(sandbox.leaderboard()).unwrap_or_default();
    let rows = rank_rows(&board, RankSource::Position);
    let labels: Vec<_> = rows.iter().map(|row| row.rank_label()).collect();
    assert_eq!(labels, ["🥇", "🥈", "🥉", "#4"]);
    assert_eq!(rows[0].entry.username, "Gary");
    assert_eq!(rows[3].entry.username, "Brock");
}

#[test]
fn deleting_account_clears_session() {
    let sandbox = SandboxBackend::new(SEED);
    let storage = MemorySessionStorage::default();
    let session =
        block_on(login_or_register(&sandbox, &storage, LoginMode::Register, "Brock")).unwrap();
    block_on(delete_account(&sandbox, &storage, session.player_id())).unwrap();
    assert!(restore_session(&storage).is_none());
    assert!(block_on(sandbox.get_player(session.player_id())).is_err());
}
