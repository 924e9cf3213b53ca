//! In-memory stand-in for the four backend services.
//!
//! Deterministic for a given seed. Battles are resolved with a simple
//! speed-ordered exchange of blows so the client has realistic records to
//! render; it makes no attempt at balance.
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt::Write as _;

use crate::api::MausholdApi;
use crate::availability::Availability;
use crate::endpoints::Collaborator;
use crate::error::ApiError;
use crate::model::{
    Battle, BattleId, LeaderboardEntry, Monster, MonsterId, NewBattle, NewPlayer, NewRosterEntry,
    Player, PlayerId, PlayerMonster, PlayerRanking, RosterEntryId,
};

const MAX_ROUNDS: u32 = 20;
const CLOCK_START: i64 = 1_717_200_000;

fn species(
    id: u32,
    name: &str,
    type1: &str,
    type2: Option<&str>,
    stats: [i32; 4],
    description: &str,
) -> Monster {
    Monster {
        id: MonsterId(id),
        name: name.to_string(),
        type1: type1.to_string(),
        type2: type2.map(str::to_string),
        base_hp: stats[0],
        base_attack: stats[1],
        base_defense: stats[2],
        base_speed: stats[3],
        description: Some(description.to_string()),
    }
}

/// Starter species the catalog service ships with.
#[must_use]
pub fn starter_catalog() -> Vec<Monster> {
    vec![
        species(1, "Bulbasaur", "Grass", Some("Poison"), [45, 49, 49, 45], "A strange seed was planted on its back at birth."),
        species(4, "Charmander", "Fire", None, [39, 52, 43, 65], "Obviously prefers hot places."),
        species(6, "Charizard", "Fire", Some("Flying"), [78, 84, 78, 100], "Spits fire that is hot enough to melt boulders."),
        species(7, "Squirtle", "Water", None, [44, 48, 65, 43], "After birth, its back swells and hardens into a shell."),
        species(25, "Pikachu", "Electric", None, [35, 55, 40, 90], "When several gather, their electricity can build and cause storms."),
        species(39, "Jigglypuff", "Normal", Some("Fairy"), [115, 45, 20, 20], "When its huge eyes light up, it sings a soothing melody."),
        species(94, "Gengar", "Ghost", Some("Poison"), [60, 65, 60, 110], "Under a full moon it likes to mimic the shadows of people."),
        species(133, "Eevee", "Normal", None, [55, 55, 50, 55], "Its genetic code is irregular."),
        species(143, "Snorlax", "Normal", None, [160, 110, 65, 30], "Very lazy. Just eats and sleeps."),
        species(150, "Mewtwo", "Psychic", None, [106, 110, 90, 130], "Created by a scientist after years of gene splicing."),
    ]
}

#[derive(Debug)]
struct SandboxState {
    players: Vec<Player>,
    catalog: Vec<Monster>,
    roster: Vec<PlayerMonster>,
    battles: Vec<Battle>,
    next_player: u32,
    next_entry: u32,
    next_battle: u32,
    clock: i64,
    rng: ChaCha20Rng,
    down: HashSet<Collaborator>,
}

impl SandboxState {
    fn tick(&mut self) -> Option<DateTime<Utc>> {
        self.clock += 1;
        DateTime::from_timestamp(self.clock, 0)
    }

    fn check_up(&self, collaborator: Collaborator) -> Result<(), ApiError> {
        if self.down.contains(&collaborator) {
            Err(ApiError::Status {
                status: 503,
                body: format!("{} unavailable", collaborator.label()),
            })
        } else {
            Ok(())
        }
    }

    fn player_index(&self, id: PlayerId) -> Result<usize, ApiError> {
        self.players
            .iter()
            .position(|player| player.id == id)
            .ok_or_else(|| not_found("Player not found"))
    }

    fn owned_entry(&self, player: PlayerId, entry: RosterEntryId) -> Result<PlayerMonster, ApiError> {
        self.roster
            .iter()
            .find(|candidate| candidate.id == entry && candidate.player_id == player)
            .cloned()
            .ok_or_else(|| ApiError::Status {
                status: 400,
                body: format!("monster {entry} does not belong to player {player}"),
            })
    }

    fn record_for(&self, player: &Player) -> (i32, i32) {
        self.battles
            .iter()
            .filter(|battle| battle.has_winner() && battle.involves(player.id))
            .fold((0, 0), |(wins, losses), battle| {
                if battle.winner_id == player.id {
                    (wins + 1, losses)
                } else {
                    (wins, losses + 1)
                }
            })
    }

    fn standings(&self) -> Vec<LeaderboardEntry> {
        let mut ordered: Vec<&Player> = self.players.iter().collect();
        ordered.sort_by(|a, b| b.points.cmp(&a.points).then(a.id.cmp(&b.id)));
        ordered
            .into_iter()
            .zip(1u32..)
            .map(|(player, rank)| {
                let (wins, losses) = self.record_for(player);
                LeaderboardEntry {
                    player_id: player.id,
                    username: player.username.clone(),
                    total_points: player.points,
                    wins,
                    losses,
                    win_rate: win_rate(wins, losses),
                    rank,
                }
            })
            .collect()
    }
}

fn not_found(message: &str) -> ApiError {
    ApiError::Status {
        status: 404,
        body: message.to_string(),
    }
}

fn win_rate(wins: i32, losses: i32) -> f64 {
    let total = wins + losses;
    if total == 0 {
        0.0
    } else {
        f64::from(wins) / f64::from(total) * 100.0
    }
}

fn damage(rng: &mut ChaCha20Rng, attack: i32, defense: i32) -> i32 {
    let base = (attack - defense / 2).max(1);
    let variance = rng.gen_range(0..10) - 5;
    (base + variance).max(1)
}

fn strike(
    rng: &mut ChaCha20Rng,
    attacker: &PlayerMonster,
    defender: &PlayerMonster,
    defender_hp: &mut i32,
    log: &mut String,
) {
    let dealt = damage(rng, attacker.stats.attack, defender.stats.defense);
    *defender_hp -= dealt;
    let _ = writeln!(
        log,
        "{} attacks for {dealt} damage! {} HP: {}",
        attacker.nickname,
        defender.nickname,
        (*defender_hp).max(0)
    );
}

/// Returns `true` when the first monster wins, plus the battle log.
fn resolve(rng: &mut ChaCha20Rng, first: &PlayerMonster, second: &PlayerMonster) -> (bool, String) {
    let mut log = String::new();
    let mut hp1 = first.stats.hp;
    let mut hp2 = second.stats.hp;
    let _ = writeln!(
        log,
        "Battle Start!\n{} (HP: {hp1}) vs {} (HP: {hp2})\n",
        first.nickname, second.nickname
    );

    let mut round = 1;
    while hp1 > 0 && hp2 > 0 && round <= MAX_ROUNDS {
        let _ = writeln!(log, "=== Round {round} ===");
        if first.stats.speed >= second.stats.speed {
            strike(rng, first, second, &mut hp2, &mut log);
            if hp2 > 0 {
                strike(rng, second, first, &mut hp1, &mut log);
            }
        } else {
            strike(rng, second, first, &mut hp1, &mut log);
            if hp1 > 0 {
                strike(rng, first, second, &mut hp2, &mut log);
            }
        }
        log.push('\n');
        round += 1;
    }

    let first_wins = hp1 > hp2;
    let winner = if first_wins { first } else { second };
    let _ = writeln!(log, "{} wins!", winner.nickname);
    (first_wins, log)
}

/// Offline [`MausholdApi`] implementation.
#[derive(Debug)]
pub struct SandboxBackend {
    state: RefCell<SandboxState>,
}

impl SandboxBackend {
    /// Empty backend with the starter catalog.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::with_catalog(seed, starter_catalog())
    }

    #[must_use]
    pub fn with_catalog(seed: u64, catalog: Vec<Monster>) -> Self {
        Self {
            state: RefCell::new(SandboxState {
                players: Vec::new(),
                catalog,
                roster: Vec::new(),
                battles: Vec::new(),
                next_player: 1,
                next_entry: 1,
                next_battle: 1,
                clock: CLOCK_START,
                rng: ChaCha20Rng::seed_from_u64(seed),
                down: HashSet::new(),
            }),
        }
    }

    /// Take a collaborator offline or bring it back.
    pub fn set_down(&self, collaborator: Collaborator, down: bool) {
        let mut state = self.state.borrow_mut();
        if down {
            state.down.insert(collaborator);
        } else {
            state.down.remove(&collaborator);
        }
    }

    /// Insert a player directly, bypassing validation; returns the record.
    pub fn seed_player(&self, username: &str, points: i32) -> Player {
        let mut state = self.state.borrow_mut();
        let id = PlayerId(state.next_player);
        state.next_player += 1;
        let stamp = state.tick();
        let player = Player {
            id,
            username: username.to_string(),
            points,
            created_at: stamp,
            updated_at: stamp,
        };
        state.players.push(player.clone());
        player
    }

    /// Give `player` a monster of species `monster` at base stats.
    pub fn seed_roster_entry(&self, player: PlayerId, monster: MonsterId) -> Option<PlayerMonster> {
        let species = self
            .state
            .borrow()
            .catalog
            .iter()
            .find(|candidate| candidate.id == monster)
            .cloned()?;
        let entry = crate::roster::seed_entry(&species);
        Some(self.insert_entry(player, &entry))
    }

    #[must_use]
    pub fn battles(&self) -> Vec<Battle> {
        self.state.borrow().battles.clone()
    }

    fn insert_entry(&self, player: PlayerId, entry: &NewRosterEntry) -> PlayerMonster {
        let mut state = self.state.borrow_mut();
        let id = RosterEntryId(state.next_entry);
        state.next_entry += 1;
        let created_at = state.tick();
        let record = PlayerMonster {
            id,
            player_id: player,
            monster_id: Some(entry.monster_id),
            nickname: entry.nickname.clone(),
            level: entry.level,
            stats: entry.stats(),
            experience: Some(0),
            created_at,
        };
        state.roster.push(record.clone());
        record
    }
}

#[async_trait(?Send)]
impl MausholdApi for SandboxBackend {
    async fn list_players(&self) -> Result<Vec<Player>, ApiError> {
        let state = self.state.borrow();
        state.check_up(Collaborator::Players)?;
        Ok(state.players.clone())
    }

    async fn get_player(&self, id: PlayerId) -> Result<Player, ApiError> {
        let state = self.state.borrow();
        state.check_up(Collaborator::Players)?;
        let index = state.player_index(id)?;
        Ok(state.players[index].clone())
    }

    async fn create_player(&self, player: &NewPlayer) -> Result<Player, ApiError> {
        {
            let state = self.state.borrow();
            state.check_up(Collaborator::Players)?;
            if state
                .players
                .iter()
                .any(|existing| existing.username == player.username)
            {
                return Err(ApiError::Status {
                    status: 409,
                    body: String::from("username already taken"),
                });
            }
        }
        Ok(self.seed_player(&player.username, 0))
    }

    async fn delete_player(&self, id: PlayerId) -> Result<(), ApiError> {
        let mut state = self.state.borrow_mut();
        state.check_up(Collaborator::Players)?;
        let index = state.player_index(id)?;
        state.players.remove(index);
        state.roster.retain(|entry| entry.player_id != id);
        Ok(())
    }

    async fn list_monsters(&self) -> Result<Vec<Monster>, ApiError> {
        let state = self.state.borrow();
        state.check_up(Collaborator::Catalog)?;
        Ok(state.catalog.clone())
    }

    async fn get_monster(&self, id: MonsterId) -> Result<Monster, ApiError> {
        let state = self.state.borrow();
        state.check_up(Collaborator::Catalog)?;
        state
            .catalog
            .iter()
            .find(|monster| monster.id == id)
            .cloned()
            .ok_or_else(|| not_found("Monster not found"))
    }

    async fn list_roster(&self, player: PlayerId) -> Result<Vec<PlayerMonster>, ApiError> {
        let state = self.state.borrow();
        state.check_up(Collaborator::Players)?;
        Ok(state
            .roster
            .iter()
            .filter(|entry| entry.player_id == player)
            .cloned()
            .collect())
    }

    async fn add_roster_entry(
        &self,
        player: PlayerId,
        entry: &NewRosterEntry,
    ) -> Result<PlayerMonster, ApiError> {
        {
            let state = self.state.borrow();
            state.check_up(Collaborator::Players)?;
            state.player_index(player)?;
        }
        Ok(self.insert_entry(player, entry))
    }

    async fn create_battle(&self, battle: &NewBattle) -> Result<Battle, ApiError> {
        let mut state = self.state.borrow_mut();
        state.check_up(Collaborator::Battles)?;
        let first = state.owned_entry(battle.player1_id, battle.monster1_id)?;
        let second = state.owned_entry(battle.player2_id, battle.monster2_id)?;
        let p1 = state.player_index(battle.player1_id)?;
        let p2 = state.player_index(battle.player2_id)?;

        let (first_wins, battle_log) = resolve(&mut state.rng, &first, &second);
        let points_won = 50 + state.rng.gen_range(0..50);
        let points_lost = 20 + state.rng.gen_range(0..30);
        let (winner, loser) = if first_wins { (p1, p2) } else { (p2, p1) };
        let stamp = state.tick();
        state.players[winner].points += points_won;
        state.players[loser].points -= points_lost;
        state.players[winner].updated_at = stamp;
        state.players[loser].updated_at = stamp;

        let id = BattleId(state.next_battle);
        state.next_battle += 1;
        let record = Battle {
            id,
            player1_id: battle.player1_id,
            player2_id: battle.player2_id,
            monster1_id: battle.monster1_id,
            monster2_id: battle.monster2_id,
            winner_id: state.players[winner].id,
            status: String::from("completed"),
            battle_log,
            points_won,
            points_lost,
            created_at: stamp,
            completed_at: stamp,
        };
        state.battles.push(record.clone());
        Ok(record)
    }

    async fn get_battle(&self, id: BattleId) -> Result<Battle, ApiError> {
        let state = self.state.borrow();
        state.check_up(Collaborator::Battles)?;
        state
            .battles
            .iter()
            .find(|battle| battle.id == id)
            .cloned()
            .ok_or_else(|| not_found("Battle not found"))
    }

    async fn list_battles(&self) -> Availability<Vec<Battle>> {
        let state = self.state.borrow();
        Availability::from_result(
            state
                .check_up(Collaborator::Battles)
                .map(|()| state.battles.clone()),
        )
    }

    async fn list_player_battles(&self, player: PlayerId) -> Availability<Vec<Battle>> {
        let state = self.state.borrow();
        Availability::from_result(state.check_up(Collaborator::Battles).map(|()| {
            state
                .battles
                .iter()
                .filter(|battle| battle.involves(player))
                .cloned()
                .collect()
        }))
    }

    async fn leaderboard(&self) -> Availability<Vec<LeaderboardEntry>> {
        let state = self.state.borrow();
        Availability::from_result(
            state
                .check_up(Collaborator::Rankings)
                .map(|()| state.standings()),
        )
    }

    async fn player_ranking(&self, player: PlayerId) -> Availability<PlayerRanking> {
        let state = self.state.borrow();
        let result = state.check_up(Collaborator::Rankings).and_then(|()| {
            state
                .standings()
                .into_iter()
                .find(|entry| entry.player_id == player)
                .map(|entry| {
                    let total_battles = entry.battles();
                    PlayerRanking {
                        player_id: entry.player_id,
                        username: entry.username,
                        total_points: entry.total_points,
                        total_battles,
                        wins: entry.wins,
                        losses: entry.losses,
                        win_rate: entry.win_rate,
                        rank: entry.rank,
                    }
                })
                .ok_or_else(|| not_found("Ranking not found"))
        });
        Availability::from_result(result)
    }
}
