// src/config/models.rs
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address the gateway listens on.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: SocketAddr,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// The single upstream endpoint every request is forwarded to.
    #[serde(default)]
    pub base_url: String,

    /// Credential injected into the outbound query string when the caller
    /// did not supply one. May be empty, in which case nothing is injected.
    #[serde(default)]
    pub api_key: String,

    /// Per-call deadline for the upstream request, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_listen_addr() -> SocketAddr {
    ([0, 0, 0, 0], 8080).into()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_key: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl UpstreamConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    /// Startup-time validation. The gateway itself never re-checks its
    /// configuration per request, so misconfiguration must be caught here.
    pub fn validate(&self) -> Result<()> {
        if self.upstream.base_url.is_empty() {
            bail!("upstream.base_url must be set (config file or GAS_BASE_URL)");
        }

        let url = Url::parse(&self.upstream.base_url)
            .context("upstream.base_url is not a valid URL")?;
        if url.scheme() != "http" && url.scheme() != "https" {
            bail!("upstream.base_url must use http or https, got {}", url.scheme());
        }

        if self.upstream.timeout_secs == 0 {
            bail!("upstream.timeout_secs must be greater than zero");
        }

        if self.upstream.api_key.is_empty() {
            tracing::warn!(
                "no upstream credential configured; requests without their own apiKey \
                 will reach the upstream uncredentialed"
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_fails_validation_without_base_url() {
        assert!(Config::default().validate().is_err());
    }

    #[test]
    fn non_http_scheme_is_rejected() {
        let mut config = Config::default();
        config.upstream.base_url = "ftp://example.com/exec".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let mut config = Config::default();
        config.upstream.base_url = "http://example.com/exec".to_string();
        config.upstream.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn empty_api_key_is_allowed() {
        let mut config = Config::default();
        config.upstream.base_url = "https://example.com/exec".to_string();
        assert!(config.validate().is_ok());
    }
}
