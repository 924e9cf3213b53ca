use anyhow::{Context, Result, bail, ensure};
use async_trait::async_trait;
use maushold_core::{MausholdApi, add_catalog_monster, resolve_roster};

use super::{ApiScenario, BrowserScenario, CombinedScenario, Fixture, ScenarioCtx, pick_species};
use crate::browser::AppPage;

pub struct RosterSeedingScenario;

async fn roster_steps(
    fixture: &mut Fixture<'_>,
    api: &dyn MausholdApi,
    ctx: &ScenarioCtx,
) -> Result<()> {
    let keeper = fixture.register(&ctx.username("keeper")).await?;
    let bystander = fixture.register(&ctx.username("bystander")).await?;
    ensure!(
        api.list_roster(keeper.id).await?.is_empty(),
        "a new player should start with no monsters"
    );

    let catalog = api.list_monsters().await.context("listing catalog")?;
    let species = pick_species(&catalog, &["Pikachu"])?;
    let roster = add_catalog_monster(api, keeper.id, species)
        .await
        .context("adding a catalog monster")?;

    let [entry] = roster.as_slice() else {
        bail!("expected exactly one roster entry, got {}", roster.len());
    };
    ensure!(entry.player_id == keeper.id, "entry belongs to {}", entry.player_id);
    ensure!(entry.monster_id == Some(species.id), "entry references {:?}", entry.monster_id);
    ensure!(entry.nickname == species.name, "nickname {:?}", entry.nickname);
    ensure!(entry.level == 1, "new monsters start at level 1, got {}", entry.level);
    ensure!(
        entry.stats == species.base_stats(),
        "stats {:?} should copy base stats {:?}",
        entry.stats,
        species.base_stats()
    );

    let rows = resolve_roster(&roster, &catalog);
    ensure!(rows[0].species_name() == species.name, "species resolved as {}", rows[0].species_name());
    ensure!(rows[0].primary_type() == species.type1, "type resolved as {}", rows[0].primary_type());

    ensure!(
        api.list_roster(bystander.id).await?.is_empty(),
        "adding to one roster leaked into another"
    );

    if ctx.verbose {
        println!("  🐭 {} joined {}'s team", species.name, keeper.username);
    }
    Ok(())
}

#[async_trait(?Send)]
impl ApiScenario for RosterSeedingScenario {
    async fn run_api(&self, api: &dyn MausholdApi, ctx: &ScenarioCtx) -> Result<()> {
        let mut fixture = Fixture::new(api);
        let outcome = roster_steps(&mut fixture, api, ctx).await;
        fixture.cleanup().await;
        outcome
    }
}

#[async_trait(?Send)]
impl BrowserScenario for RosterSeedingScenario {
    async fn run_browser(&self, _page: &AppPage<'_>, _ctx: &ScenarioCtx) -> Result<()> {
        bail!("roster seeding has no browser steps")
    }
}

impl CombinedScenario for RosterSeedingScenario {
    fn name(&self) -> &'static str {
        "Roster Seeding"
    }

    fn has_browser_steps(&self) -> bool {
        false
    }
}
