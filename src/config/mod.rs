// src/config/mod.rs
mod models;

pub use models::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Load configuration from a file (YAML or JSON), falling back to an
/// env-only configuration when the file does not exist. Environment
/// variables override file values either way.
pub async fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();

    let mut config: Config = if path.exists() {
        let contents = tokio::fs::read_to_string(path)
            .await
            .context("Failed to read config file")?;

        let ext = path.extension().and_then(|s| s.to_str());
        if ext == Some("yaml") || ext == Some("yml") {
            serde_yaml::from_str(&contents).context("Failed to parse YAML config")?
        } else {
            serde_json::from_str(&contents).context("Failed to parse JSON config")?
        }
    } else {
        tracing::info!(
            "Config file {} not found, using defaults and environment",
            path.display()
        );
        Config::default()
    };

    apply_env_overrides(&mut config);
    config.validate()?;
    Ok(config)
}

fn apply_env_overrides(config: &mut Config) {
    if let Ok(base_url) = std::env::var("GAS_BASE_URL") {
        config.upstream.base_url = base_url;
    }
    if let Ok(api_key) = std::env::var("GAS_API_KEY") {
        config.upstream.api_key = api_key;
    }
    if let Ok(addr) = std::env::var("LISTEN_ADDR") {
        match addr.parse() {
            Ok(addr) => config.server.listen_addr = addr,
            Err(e) => tracing::warn!("Ignoring invalid LISTEN_ADDR {:?}: {}", addr, e),
        }
    }
}
