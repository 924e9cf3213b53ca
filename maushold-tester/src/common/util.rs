use anyhow::{Context, Result};
use maushold_core::SESSION_STORAGE_KEY;
use std::path::Path;
use thirtyfour::prelude::*;

/// `<base>/<browser>/<scenario>/seed-<n>/<utc timestamp>`
pub fn artifacts_dir(base: &str, browser: &str, scenario: &str, seed: u64) -> String {
    let stamp = chrono::Utc::now().format("%Y%m%dT%H%M%S");
    format!("{base}/{browser}/{scenario}/seed-{seed}/{stamp}")
}

/// What the browser showed when a scenario failed. Every part is optional
/// because the session may already be half gone.
#[derive(Debug, Default)]
struct FailureArtifacts {
    screenshot: Option<Vec<u8>>,
    dom: Option<String>,
    session: Option<String>,
    error: String,
}

impl FailureArtifacts {
    async fn collect(driver: &WebDriver, err: &anyhow::Error) -> Self {
        let session = match driver
            .execute(
                "return window.localStorage.getItem(arguments[0]);",
                vec![SESSION_STORAGE_KEY.into()],
            )
            .await
        {
            Ok(ret) => ret.json().as_str().map(str::to_owned),
            Err(_) => None,
        };
        Self {
            screenshot: driver.screenshot_as_png().await.ok(),
            dom: driver.source().await.ok(),
            session,
            error: format!("{err:#}"),
        }
    }

    fn save(&self, dir: &Path) -> Result<()> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("creating artifacts dir {}", dir.display()))?;
        let files: [(&str, Option<&[u8]>); 4] = [
            ("screenshot.png", self.screenshot.as_deref()),
            ("dom.html", self.dom.as_deref().map(str::as_bytes)),
            ("session.json", self.session.as_deref().map(str::as_bytes)),
            ("error.txt", Some(self.error.as_bytes())),
        ];
        for (name, bytes) in files {
            let Some(bytes) = bytes else { continue };
            if let Err(err) = std::fs::write(dir.join(name), bytes) {
                log::warn!("could not write {name}: {err}");
            }
        }
        Ok(())
    }
}

/// Save a screenshot, the DOM, the stored session and the error chain.
pub async fn capture_artifacts(driver: &WebDriver, dir: &str, err: &anyhow::Error) -> Result<()> {
    FailureArtifacts::collect(driver, err).await.save(Path::new(dir))
}

pub fn split_csv(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_owned)
        .collect()
}
