use anyhow::{Context, Result, bail, ensure};
use async_trait::async_trait;
use maushold_core::{
    BattleOutcome, BattleSetup, MausholdApi, PortalData, SetupError, load_portal_data,
    submit_battle,
};

use super::{ApiScenario, BrowserScenario, CombinedScenario, Fixture, ScenarioCtx};
use crate::browser::AppPage;

pub struct OpponentSwitchScenario;

async fn opponent_switch_steps(
    fixture: &mut Fixture<'_>,
    api: &dyn MausholdApi,
    ctx: &ScenarioCtx,
) -> Result<()> {
    let ash = fixture.register(&ctx.username("ash")).await?;
    let gary = fixture.register(&ctx.username("gary")).await?;
    let misty = fixture.register(&ctx.username("misty")).await?;
    let pikachu = fixture.give(&ash, &["Pikachu"]).await?;
    let charmander = fixture.give(&gary, &["Charmander"]).await?;
    let squirtle = fixture.give(&misty, &["Squirtle"]).await?;

    let mut setup = BattleSetup::new();
    setup.select_own_monster(pikachu.id)?;
    ensure!(
        matches!(setup.select_opponent(ash.id, Some(ash.id)), Err(SetupError::SelfOpponent(_))),
        "a player must not battle themselves"
    );

    let request = setup
        .select_opponent(gary.id, Some(ash.id))?
        .context("first opponent should request a roster")?;
    let gary_roster = api.list_roster(request.player).await;
    ensure!(setup.apply_opponent_roster(request.player, gary_roster), "roster for current opponent dropped");
    setup.select_opponent_monster(charmander.id)?;
    ensure!(setup.can_submit(), "three selections should enable submit");

    let request = setup
        .select_opponent(misty.id, Some(ash.id))?
        .context("switching opponents should request a roster")?;
    ensure!(!setup.can_submit(), "switching opponents must clear the opponent monster");
    ensure!(setup.visible_opponent_roster().is_empty(), "old roster still visible after switch");

    let late = api.list_roster(gary.id).await;
    ensure!(!setup.apply_opponent_roster(gary.id, late), "stale roster was applied");

    let misty_roster = api.list_roster(request.player).await;
    ensure!(setup.apply_opponent_roster(request.player, misty_roster), "roster for current opponent dropped");
    ensure!(
        setup.select_opponent_monster(charmander.id).is_err(),
        "previous opponent's monster should no longer be selectable"
    );
    setup.select_opponent_monster(squirtle.id)?;
    ensure!(setup.can_submit(), "new opponent monster should enable submit");

    if ctx.verbose {
        println!("  🔁 Switched {} from {} to {}", ash.username, gary.username, misty.username);
    }
    Ok(())
}

#[async_trait(?Send)]
impl ApiScenario for OpponentSwitchScenario {
    async fn run_api(&self, api: &dyn MausholdApi, ctx: &ScenarioCtx) -> Result<()> {
        let mut fixture = Fixture::new(api);
        let outcome = opponent_switch_steps(&mut fixture, api, ctx).await;
        fixture.cleanup().await;
        outcome
    }
}

#[async_trait(?Send)]
impl BrowserScenario for OpponentSwitchScenario {
    async fn run_browser(&self, _page: &AppPage<'_>, _ctx: &ScenarioCtx) -> Result<()> {
        bail!("opponent switching has no browser steps")
    }
}

impl CombinedScenario for OpponentSwitchScenario {
    fn name(&self) -> &'static str {
        "Opponent Switch"
    }

    fn has_browser_steps(&self) -> bool {
        false
    }
}

pub struct BattleRoundtripScenario;

async fn roundtrip_steps(
    fixture: &mut Fixture<'_>,
    api: &dyn MausholdApi,
    ctx: &ScenarioCtx,
) -> Result<()> {
    let ash = fixture.register(&ctx.username("ash")).await?;
    let gary = fixture.register(&ctx.username("gary")).await?;
    let pikachu = fixture.give(&ash, &["Pikachu"]).await?;
    let rival = fixture.give(&gary, &["Charmander"]).await?;

    let (prior, _) = load_portal_data(api, &PortalData::default()).await;
    let mut setup = BattleSetup::new();
    setup.select_own_monster(pikachu.id)?;
    if let Some(request) = setup.select_opponent(gary.id, Some(ash.id))? {
        let roster = api.list_roster(request.player).await;
        setup.apply_opponent_roster(request.player, roster);
    }
    setup.select_opponent_monster(rival.id)?;

    let report = submit_battle(api, &mut setup, ash.id, &prior)
        .await
        .context("submitting battle")?;
    let battle = &report.battle;
    ensure!(
        battle.player1_id == ash.id && battle.player2_id == gary.id,
        "battle pairs {} and {}",
        battle.player1_id,
        battle.player2_id
    );
    ensure!(
        battle.winner_id == ash.id || battle.winner_id == gary.id,
        "winner {} did not take part",
        battle.winner_id
    );
    ensure!(!setup.is_submitting(), "setup still in flight after the response");

    let refreshed = report.player.as_ref().context("acting player was not reloaded")?;
    let current = api.get_player(ash.id).await?;
    ensure!(
        refreshed.points == current.points,
        "reported points {} differ from server {}",
        refreshed.points,
        current.points
    );
    let listed = report
        .portal
        .player(gary.id)
        .context("opponent missing from reloaded player list")?;

    let outcome = BattleOutcome::for_viewer(battle, Some(ash.id));
    let (winner_after, winner_before, loser_after, loser_before) = if outcome.is_victory() {
        (refreshed.points, ash.points, listed.points, gary.points)
    } else {
        (listed.points, gary.points, refreshed.points, ash.points)
    };
    ensure!(winner_after >= winner_before, "winner lost points");
    ensure!(loser_after <= loser_before, "loser gained points");
    ensure!(
        report.roster.as_ref().is_some_and(|roster| roster.iter().any(|entry| entry.id == pikachu.id)),
        "acting roster was not reloaded"
    );

    let fetched = api.get_battle(battle.id).await.context("fetching battle detail")?;
    ensure!(fetched.id == battle.id && fetched.winner_id == battle.winner_id, "detail disagrees with result");
    if let Some(history) = api.list_player_battles(ash.id).await.available() {
        ensure!(history.iter().any(|item| item.id == battle.id), "battle missing from player history");
    }

    if ctx.verbose {
        let label = outcome.points_label().unwrap_or_default();
        println!("  ⚔️  Battle {} finished for {}: {label}", battle.id, ash.username);
    }
    Ok(())
}

#[async_trait(?Send)]
impl ApiScenario for BattleRoundtripScenario {
    async fn run_api(&self, api: &dyn MausholdApi, ctx: &ScenarioCtx) -> Result<()> {
        let mut fixture = Fixture::new(api);
        let outcome = roundtrip_steps(&mut fixture, api, ctx).await;
        fixture.cleanup().await;
        outcome
    }
}

#[async_trait(?Send)]
impl BrowserScenario for BattleRoundtripScenario {
    async fn run_browser(&self, _page: &AppPage<'_>, _ctx: &ScenarioCtx) -> Result<()> {
        bail!("battle round trip has no browser steps")
    }
}

impl CombinedScenario for BattleRoundtripScenario {
    fn name(&self) -> &'static str {
        "Battle Round Trip"
    }

    fn has_browser_steps(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maushold_core::{Collaborator, SandboxBackend};

    fn ctx(seed: u64) -> ScenarioCtx {
        ScenarioCtx {
            seed,
            run_tag: "0".to_string(),
            verbose: false,
        }
    }

    #[test]
    fn opponent_switch_passes_against_the_sandbox() {
        let sandbox = SandboxBackend::new(5);
        tokio_test::block_on(OpponentSwitchScenario.run_api(&sandbox, &ctx(5))).unwrap();
    }

    #[test]
    fn roundtrip_passes_for_several_seeds() {
        for seed in [1, 2, 3, 1337] {
            let sandbox = SandboxBackend::new(seed);
            tokio_test::block_on(BattleRoundtripScenario.run_api(&sandbox, &ctx(seed))).unwrap();
            assert_eq!(sandbox.battles().len(), 1);
        }
    }

    #[test]
    fn roundtrip_reports_battle_service_outage() {
        let sandbox = SandboxBackend::new(9);
        sandbox.set_down(Collaborator::Battles, true);
        let err =
            tokio_test::block_on(BattleRoundtripScenario.run_api(&sandbox, &ctx(9))).unwrap_err();
        assert!(format!("{err:#}").contains("submitting battle"));
    }
}
