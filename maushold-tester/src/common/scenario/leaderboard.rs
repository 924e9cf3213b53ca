use anyhow::{Context, Result, ensure};
use async_trait::async_trait;
use maushold_core::{
    Availability, MausholdApi, Medal, NewBattle, PlayerId, RankSource, rank_rows,
};

use super::{ApiScenario, BrowserScenario, CombinedScenario, Fixture, ScenarioCtx};
use crate::browser::AppPage;

pub struct LeaderboardScenario;

fn position(ids: &[PlayerId], id: PlayerId) -> Option<usize> {
    ids.iter().position(|candidate| *candidate == id)
}

async fn leaderboard_steps(
    fixture: &mut Fixture<'_>,
    api: &dyn MausholdApi,
    ctx: &ScenarioCtx,
) -> Result<()> {
    let red = fixture.register(&ctx.username("red")).await?;
    let blue = fixture.register(&ctx.username("blue")).await?;
    fixture.register(&ctx.username("green")).await?;
    let red_monster = fixture.give(&red, &["Charizard"]).await?;
    let blue_monster = fixture.give(&blue, &["Squirtle"]).await?;

    let battle = api
        .create_battle(&NewBattle {
            player1_id: red.id,
            player2_id: blue.id,
            monster1_id: red_monster.id,
            monster2_id: blue_monster.id,
        })
        .await
        .context("creating ranking battle")?;
    let loser = if battle.winner_id == red.id { blue.id } else { red.id };

    let entries = match api.leaderboard().await {
        Availability::Available(entries) => entries,
        Availability::Unavailable { reason } => {
            log::warn!("rankings unavailable, skipping order checks: {reason}");
            return Ok(());
        }
    };

    let rows = rank_rows(&entries, RankSource::Position);
    let served: Vec<PlayerId> = entries.iter().map(|entry| entry.player_id).collect();
    let shown: Vec<PlayerId> = rows.iter().map(|row| row.entry.player_id).collect();
    ensure!(served == shown, "rows were reordered");
    for (index, row) in rows.iter().enumerate() {
        ensure!(row.rank as usize == index + 1, "row {index} ranked {}", row.rank);
        ensure!(row.medal == Medal::for_index(index), "row {index} has medal {:?}", row.medal);
    }

    if let (Some(winner_at), Some(loser_at)) =
        (position(&served, battle.winner_id), position(&served, loser))
    {
        ensure!(winner_at < loser_at, "winner ranked below loser");
    }

    if let Some(ranking) = api.player_ranking(battle.winner_id).await.available() {
        ensure!(ranking.player_id == battle.winner_id, "ranking for wrong player");
        ensure!(ranking.wins >= 1, "winner ranking shows no wins");
    }

    if ctx.verbose {
        println!("  🏆 {} ranked rows, leader {}", rows.len(), rows.first().map_or("-", |row| row.entry.username.as_str()));
    }
    Ok(())
}

#[async_trait(?Send)]
impl ApiScenario for LeaderboardScenario {
    async fn run_api(&self, api: &dyn MausholdApi, ctx: &ScenarioCtx) -> Result<()> {
        let mut fixture = Fixture::new(api);
        let outcome = leaderboard_steps(&mut fixture, api, ctx).await;
        fixture.cleanup().await;
        outcome
    }
}

#[async_trait(?Send)]
impl BrowserScenario for LeaderboardScenario {
    async fn run_browser(&self, page: &AppPage<'_>, ctx: &ScenarioCtx) -> Result<()> {
        page.open("/leaderboard").await?;
        page.find("#leaderboard-title").await?;

        if page.exists("table.leaderboard-table").await? {
            let first = page.text("table.leaderboard-table tbody tr td.rank").await?;
            ensure!(first == Medal::Gold.emoji(), "first row shows {first:?}");
        } else {
            page.find(".leaderboard .empty-message").await?;
        }

        if ctx.verbose {
            println!("  🏆 Leaderboard rendered");
        }
        Ok(())
    }
}

impl CombinedScenario for LeaderboardScenario {
    fn name(&self) -> &'static str {
        "Leaderboard Order"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maushold_core::{Collaborator, SandboxBackend};

    fn ctx() -> ScenarioCtx {
        ScenarioCtx {
            seed: 21,
            run_tag: "0".to_string(),
            verbose: false,
        }
    }

    #[test]
    fn order_checks_pass_against_the_sandbox() {
        let sandbox = SandboxBackend::new(21);
        tokio_test::block_on(LeaderboardScenario.run_api(&sandbox, &ctx())).unwrap();
    }

    #[test]
    fn missing_rankings_are_not_a_failure() {
        let sandbox = SandboxBackend::new(21);
        sandbox.set_down(Collaborator::Rankings, true);
        tokio_test::block_on(LeaderboardScenario.run_api(&sandbox, &ctx())).unwrap();
    }

    #[test]
    fn position_finds_ids() {
        let ids = [PlayerId(4), PlayerId(2)];
        assert_eq!(position(&ids, PlayerId(2)), Some(1));
        assert_eq!(position(&ids, PlayerId(9)), None);
    }
}
