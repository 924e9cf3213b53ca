//! Deployment paths: router base and collaborator addresses.
use maushold_core::ApiConfig;

/// Base path for the router (e.g., `/portal` when hosted under a subdirectory).
///
/// Returns `None` when no base path is configured so the router falls back to root.
#[must_use]
pub fn router_base() -> Option<String> {
    router_base_with_base(option_env!("PUBLIC_URL").unwrap_or(""))
}

/// Collaborator addressing for this build.
///
/// `MAUSHOLD_API_BASE_URL` at compile time points the gateway elsewhere;
/// without it the default local gateway is used.
#[must_use]
pub fn api_config() -> ApiConfig {
    ApiConfig::gateway_or_default(option_env!("MAUSHOLD_API_BASE_URL"))
}

fn router_base_with_base(base: &str) -> Option<String> {
    let base = base.trim_end_matches('/').trim();
    if base.is_empty() {
        None
    } else {
        Some(base.to_string())
    }
}
