use anyhow::{Context, Result, ensure};
use async_trait::async_trait;
use maushold_core::{MausholdApi, PortalData, load_portal_data};

use super::{ApiScenario, BrowserScenario, CombinedScenario, ScenarioCtx};
use crate::browser::AppPage;

pub struct SmokeScenario;

#[async_trait(?Send)]
impl ApiScenario for SmokeScenario {
    async fn run_api(&self, api: &dyn MausholdApi, ctx: &ScenarioCtx) -> Result<()> {
        let catalog = api.list_monsters().await.context("listing catalog")?;
        ensure!(!catalog.is_empty(), "catalog should list at least one species");

        let first = &catalog[0];
        let fetched = api
            .get_monster(first.id)
            .await
            .with_context(|| format!("looking up species {}", first.id))?;
        ensure!(
            fetched.name == first.name,
            "species {} should be {}, got {}",
            first.id,
            first.name,
            fetched.name
        );

        let (portal, report) = load_portal_data(api, &PortalData::default()).await;
        ensure!(!report.players_failed, "player list failed to load");
        ensure!(!report.monsters_failed, "catalog failed to load");

        if ctx.verbose {
            println!(
                "  📦 {} players, {} species, rankings {}",
                portal.players.len(),
                portal.monsters.len(),
                if report.leaderboard_unavailable {
                    "unavailable"
                } else {
                    "available"
                }
            );
        }
        Ok(())
    }
}

#[async_trait(?Send)]
impl BrowserScenario for SmokeScenario {
    async fn run_browser(&self, page: &AppPage<'_>, ctx: &ScenarioCtx) -> Result<()> {
        page.open("/").await?;

        let brand = page.text("header.navbar .brand").await?;
        ensure!(brand.contains("Maushold"), "unexpected brand text {brand:?}");
        page.find("#status-live").await?;
        page.find("a[href='#main']").await?;

        page.select_language("es").await?;
        let lang = page.html_lang().await?;
        ensure!(lang.as_deref() == Some("es"), "html lang should follow the selector, got {lang:?}");
        page.select_language("en").await?;

        if ctx.verbose {
            println!("  🌐 App shell rendered at {}", page.url_for("/"));
        }
        Ok(())
    }
}

impl CombinedScenario for SmokeScenario {
    fn name(&self) -> &'static str {
        "Smoke Test"
    }
}
