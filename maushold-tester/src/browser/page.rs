//! Thin helpers over a WebDriver session pointed at the deployed app.
use anyhow::{Context, Result};
use maushold_core::SESSION_STORAGE_KEY;
use serde_json::Value;
use thirtyfour::components::SelectElement;
use thirtyfour::prelude::*;

/// Absolute URL for an app route under `base_url`.
pub fn route_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[derive(Debug, Clone)]
pub struct AppPage<'a> {
    driver: &'a WebDriver,
    base_url: String,
}

impl<'a> AppPage<'a> {
    pub fn new(driver: &'a WebDriver, base_url: &str) -> Self {
        Self {
            driver,
            base_url: base_url.to_string(),
        }
    }

    pub fn url_for(&self, path: &str) -> String {
        route_url(&self.base_url, path)
    }

    /// Load a route and wait for the app shell to mount.
    pub async fn open(&self, path: &str) -> Result<()> {
        let url = self.url_for(path);
        self.driver
            .goto(&url)
            .await
            .with_context(|| format!("navigating to {url}"))?;
        self.find("main#main")
            .await
            .with_context(|| format!("app shell did not render at {url}"))?;
        Ok(())
    }

    pub async fn find(&self, css: &str) -> Result<WebElement> {
        self.driver
            .find(By::Css(css))
            .await
            .with_context(|| format!("no element matches {css}"))
    }

    pub async fn exists(&self, css: &str) -> Result<bool> {
        Ok(!self.driver.find_all(By::Css(css)).await?.is_empty())
    }

    pub async fn text(&self, css: &str) -> Result<String> {
        Ok(self.find(css).await?.text().await?.trim().to_string())
    }

    pub async fn click(&self, css: &str) -> Result<()> {
        self.find(css)
            .await?
            .click()
            .await
            .with_context(|| format!("clicking {css}"))
    }

    pub async fn fill(&self, css: &str, value: &str) -> Result<()> {
        let input = self.find(css).await?;
        input.clear().await?;
        input.send_keys(value).await?;
        Ok(())
    }

    pub async fn select_language(&self, code: &str) -> Result<()> {
        let select = SelectElement::new(&self.find("#lang-select").await?).await?;
        select
            .select_by_value(code)
            .await
            .with_context(|| format!("selecting language {code}"))
    }

    pub async fn html_lang(&self) -> Result<Option<String>> {
        Ok(self.find("html").await?.attr("lang").await?)
    }

    /// The persisted session, parsed, if one is stored.
    pub async fn stored_session(&self) -> Result<Option<Value>> {
        let ret = self
            .driver
            .execute(
                "return window.localStorage.getItem(arguments[0]);",
                vec![SESSION_STORAGE_KEY.into()],
            )
            .await?;
        ret.json()
            .as_str()
            .map(|raw| serde_json::from_str(raw).context("stored session is not JSON"))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_url_joins_without_double_slashes() {
        assert_eq!(route_url("http://localhost:8080/", "/login"), "http://localhost:8080/login");
        assert_eq!(route_url("http://localhost:8080/maushold", "history/3"), "http://localhost:8080/maushold/history/3");
        assert_eq!(route_url("http://localhost:8080", "/"), "http://localhost:8080/");
    }
}
