//! Collaborator addressing.
//!
//! Earlier deployments talked to each service on its own port; later ones
//! route everything through one gateway under `/api`. Both shapes are
//! expressed by [`ServiceLayout`].
use serde::{Deserialize, Serialize};

use crate::endpoints::{Collaborator, Endpoint};

pub const DEFAULT_GATEWAY_URL: &str = "http://localhost:8000";
const GATEWAY_PREFIX: &str = "/api";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "layout", rename_all = "snake_case")]
pub enum ServiceLayout {
    Gateway {
        base_url: String,
    },
    Direct {
        players: String,
        monsters: String,
        battles: String,
        rankings: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(flatten)]
    pub layout: ServiceLayout,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::default_config()
    }
}

fn normalize(base: &str) -> String {
    base.trim().trim_end_matches('/').to_string()
}

impl ApiConfig {
    #[must_use]
    pub fn default_config() -> Self {
        Self::gateway(DEFAULT_GATEWAY_URL)
    }

    #[must_use]
    pub fn gateway(base_url: &str) -> Self {
        Self {
            layout: ServiceLayout::Gateway {
                base_url: normalize(base_url),
            },
        }
    }

    /// Gateway config from an optional override, falling back to the default URL.
    #[must_use]
    pub fn gateway_or_default(base_url: Option<&str>) -> Self {
        base_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map_or_else(Self::default_config, Self::gateway)
    }

    /// Parse a JSON config document.
    ///
    /// # Errors
    ///
    /// Returns an error when the document does not describe a known layout.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let parsed: Self = serde_json::from_str(json)?;
        Ok(parsed.normalized())
    }

    #[must_use]
    fn normalized(self) -> Self {
        let layout = match self.layout {
            ServiceLayout::Gateway { base_url } => ServiceLayout::Gateway {
                base_url: normalize(&base_url),
            },
            ServiceLayout::Direct {
                players,
                monsters,
                battles,
                rankings,
            } => ServiceLayout::Direct {
                players: normalize(&players),
                monsters: normalize(&monsters),
                battles: normalize(&battles),
                rankings: normalize(&rankings),
            },
        };
        Self { layout }
    }

    /// Address prefix in front of a collaborator's resource root.
    #[must_use]
    pub fn root_for(&self, collaborator: Collaborator) -> String {
        match &self.layout {
            ServiceLayout::Gateway { base_url } => format!("{base_url}{GATEWAY_PREFIX}"),
            ServiceLayout::Direct {
                players,
                monsters,
                battles,
                rankings,
            } => match collaborator {
                Collaborator::Players => players.clone(),
                Collaborator::Catalog => monsters.clone(),
                Collaborator::Battles => battles.clone(),
                Collaborator::Rankings => rankings.clone(),
            },
        }
    }

    #[must_use]
    pub fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.root_for(endpoint.collaborator()), endpoint.path())
    }
}
