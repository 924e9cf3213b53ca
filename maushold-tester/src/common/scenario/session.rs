use anyhow::{Context, Result, bail, ensure};
use async_trait::async_trait;
use maushold_core::{
    LoginMode, MausholdApi, MemorySessionStorage, WorkflowError, delete_account, load_session,
    login_or_register, logout,
};

use super::{ApiScenario, BrowserScenario, CombinedScenario, Fixture, ScenarioCtx};
use crate::browser::AppPage;

pub struct SessionScenario;

async fn session_steps(
    fixture: &mut Fixture<'_>,
    api: &dyn MausholdApi,
    ctx: &ScenarioCtx,
) -> Result<()> {
    let storage = MemorySessionStorage::default();
    let username = ctx.username("trainer");

    match login_or_register(api, &storage, LoginMode::Login, &username).await {
        Err(WorkflowError::PlayerNotFound(name)) => ensure!(name == username),
        Err(other) => return Err(other).context("logging in an unknown player"),
        Ok(session) => bail!("unknown player logged in as {}", session.player.id),
    }

    let registered = login_or_register(api, &storage, LoginMode::Register, &username)
        .await
        .context("registering")?;
    let id = registered.player_id();
    fixture.track(id);
    let roster = api.list_roster(id).await.context("listing new roster")?;
    ensure!(roster.is_empty(), "a new player should start with no monsters");
    ensure!(
        load_session(&storage)?.as_ref() == Some(&registered),
        "registration should persist the session"
    );

    let again = login_or_register(api, &storage, LoginMode::Login, &username)
        .await
        .context("logging back in")?;
    ensure!(again.player_id() == id, "login should find the registered player");

    logout(&storage)?;
    ensure!(load_session(&storage)?.is_none(), "logout should clear the session");

    login_or_register(api, &storage, LoginMode::Login, &username).await?;
    delete_account(api, &storage, id)
        .await
        .context("deleting account")?;
    fixture.forget(id);
    ensure!(load_session(&storage)?.is_none(), "deleting should clear the session");
    ensure!(api.get_player(id).await.is_err(), "deleted player {id} is still served");

    if ctx.verbose {
        println!("  👤 Session lifecycle ok for {username} ({id})");
    }
    Ok(())
}

#[async_trait(?Send)]
impl ApiScenario for SessionScenario {
    async fn run_api(&self, api: &dyn MausholdApi, ctx: &ScenarioCtx) -> Result<()> {
        let mut fixture = Fixture::new(api);
        let outcome = session_steps(&mut fixture, api, ctx).await;
        fixture.cleanup().await;
        outcome
    }
}

#[async_trait(?Send)]
impl BrowserScenario for SessionScenario {
    async fn run_browser(&self, page: &AppPage<'_>, ctx: &ScenarioCtx) -> Result<()> {
        let username = ctx.username("web");
        page.open("/login").await?;
        page.click(".login-view .btn-link").await?;
        page.fill("#username-input", &username).await?;
        page.click(".login-view .btn-submit").await?;

        let shown = page.text(".nav-player strong").await?;
        ensure!(shown == username, "navbar shows {shown:?} instead of {username:?}");

        let stored = page
            .stored_session()
            .await?
            .context("registration did not persist a session")?;
        ensure!(
            stored["player"]["username"] == username.as_str(),
            "stored session names {}",
            stored["player"]["username"]
        );

        page.click(".nav-account .btn-secondary").await?;
        ensure!(page.stored_session().await?.is_none(), "logout left a stored session");

        if ctx.verbose {
            println!("  👤 Registered and signed out {username} in the browser");
        }
        Ok(())
    }
}

impl CombinedScenario for SessionScenario {
    fn name(&self) -> &'static str {
        "Session Lifecycle"
    }
}
