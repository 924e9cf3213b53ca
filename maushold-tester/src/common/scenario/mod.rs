use anyhow::{Context, Result};
use async_trait::async_trait;
use maushold_core::{
    MausholdApi, Monster, NewPlayer, Player, PlayerId, PlayerMonster, add_catalog_monster,
};

use crate::browser::AppPage;

pub mod battle;
pub mod leaderboard;
pub mod roster;
pub mod session;
pub mod smoke;

/// Per-run inputs shared by every scenario.
#[derive(Debug, Clone)]
pub struct ScenarioCtx {
    pub seed: u64,
    /// Suffix that keeps usernames unique across runs against one backend.
    pub run_tag: String,
    pub verbose: bool,
}

impl ScenarioCtx {
    /// Username for a scenario role, e.g. `ash-0412`.
    #[must_use]
    pub fn username(&self, role: &str) -> String {
        let mut name = format!("{role}-{}", self.run_tag);
        name.truncate(32);
        name
    }
}

// Workflow scenario, driven through the API facade
#[async_trait(?Send)]
pub trait ApiScenario {
    async fn run_api(&self, api: &dyn MausholdApi, ctx: &ScenarioCtx) -> Result<()>;
}

// Browser scenario, driven through the rendered app
#[async_trait(?Send)]
pub trait BrowserScenario {
    async fn run_browser(&self, page: &AppPage<'_>, ctx: &ScenarioCtx) -> Result<()>;
}

pub trait CombinedScenario: ApiScenario + BrowserScenario {
    fn name(&self) -> &'static str;

    fn has_browser_steps(&self) -> bool {
        true
    }
}

/// Players a scenario registered, deleted again once it finishes.
pub struct Fixture<'a> {
    api: &'a dyn MausholdApi,
    created: Vec<PlayerId>,
}

impl<'a> Fixture<'a> {
    pub fn new(api: &'a dyn MausholdApi) -> Self {
        Self {
            api,
            created: Vec::new(),
        }
    }

    pub async fn register(&mut self, username: &str) -> Result<Player> {
        let request = NewPlayer::new(username)?;
        let player = self
            .api
            .create_player(&request)
            .await
            .with_context(|| format!("registering {username}"))?;
        self.created.push(player.id);
        Ok(player)
    }

    /// Track a player registered outside the fixture.
    pub fn track(&mut self, player: PlayerId) {
        self.created.push(player);
    }

    /// Stop tracking a player the scenario removed itself.
    pub fn forget(&mut self, player: PlayerId) {
        self.created.retain(|id| *id != player);
    }

    /// Give `player` one monster of the first preferred species the catalog has.
    pub async fn give(&self, player: &Player, preferred: &[&str]) -> Result<PlayerMonster> {
        let catalog = self.api.list_monsters().await.context("listing catalog")?;
        let species = pick_species(&catalog, preferred)?;
        let roster = add_catalog_monster(self.api, player.id, species)
            .await
            .with_context(|| format!("adding {} to {}", species.name, player.username))?;
        roster
            .into_iter()
            .rev()
            .find(|entry| entry.monster_id == Some(species.id))
            .with_context(|| format!("{} missing from reloaded roster", species.name))
    }

    pub async fn cleanup(self) {
        for id in self.created {
            if let Err(err) = self.api.delete_player(id).await {
                log::warn!("could not delete scenario player {id}: {err}");
            }
        }
    }
}

/// First catalog species named in `preferred`, else the first species listed.
pub fn pick_species<'c>(catalog: &'c [Monster], preferred: &[&str]) -> Result<&'c Monster> {
    preferred
        .iter()
        .find_map(|name| catalog.iter().find(|monster| monster.name == *name))
        .or_else(|| catalog.first())
        .context("catalog is empty")
}

pub const ALL_SCENARIOS: &[&str] = &[
    "smoke",
    "session",
    "roster-seeding",
    "opponent-switch",
    "battle-roundtrip",
    "leaderboard-order",
];

pub fn get_scenario(name: &str) -> Option<Box<dyn CombinedScenario>> {
    match name.to_lowercase().as_str() {
        "smoke" => Some(Box::new(smoke::SmokeScenario)),
        "session" | "login" => Some(Box::new(session::SessionScenario)),
        "roster-seeding" | "roster" => Some(Box::new(roster::RosterSeedingScenario)),
        "opponent-switch" | "opponent" => Some(Box::new(battle::OpponentSwitchScenario)),
        "battle-roundtrip" | "battle" => Some(Box::new(battle::BattleRoundtripScenario)),
        "leaderboard-order" | "leaderboard" => Some(Box::new(leaderboard::LeaderboardScenario)),
        _ => None,
    }
}

pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    vec![
        ("smoke", "Portal loads players, catalog and rankings"),
        ("session", "Register, log in, persist and end a session"),
        ("roster-seeding", "New roster entries copy species base stats"),
        ("opponent-switch", "Switching opponents clears the opponent monster"),
        ("battle-roundtrip", "Ash's Pikachu battles Gary; state reloads after"),
        ("leaderboard-order", "Rows keep server order with top three medals"),
    ]
}
