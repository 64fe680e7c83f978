//! Connector configuration - passed from the host page or program

use crate::assets::Theme;
use crate::error::{ConnectorError, ConnectorResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_HUB_ENDPOINT: &str = "https://hub.pass3.me";
pub const DEFAULT_ROOT_DOMAIN: &str = "rss3.bio";
pub const DEFAULT_COOKIE_EXPIRES_DAYS: u32 = 14;
pub const MAX_COOKIE_EXPIRES_DAYS: u32 = 365 * 100;

/// Connector configuration. Hosts construct this.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConnectorConfig {
    /// Used for the native file store directory.
    pub app: String,
    pub hub_endpoint: String,
    /// Cookies are scoped to `.{root_domain}` so every subdomain shares a login.
    pub root_domain: String,
    pub cookie_expires_days: u32,
    /// Chain id to JSON-RPC url handed to the relay transport.
    pub relay_rpc: BTreeMap<u64, String>,
    pub themes: Vec<Theme>,
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            app: "hubconnect".into(),
            hub_endpoint: DEFAULT_HUB_ENDPOINT.into(),
            root_domain: DEFAULT_ROOT_DOMAIN.into(),
            cookie_expires_days: DEFAULT_COOKIE_EXPIRES_DAYS,
            relay_rpc: BTreeMap::from([(1, "https://cloudflare-eth.com".to_string())]),
            themes: Vec::new(),
        }
    }
}

impl ConnectorConfig {
    pub fn new(hub_endpoint: impl Into<String>) -> Self {
        Self { hub_endpoint: hub_endpoint.into(), ..Default::default() }
    }
    pub fn with_app(mut self, app: impl Into<String>) -> Self { self.app = app.into(); self }
    pub fn with_root_domain(mut self, domain: impl Into<String>) -> Self { self.root_domain = domain.into(); self }
    pub fn with_cookie_expires_days(mut self, days: u32) -> Self { self.cookie_expires_days = days; self }
    pub fn with_relay_rpc(mut self, chain_id: u64, url: impl Into<String>) -> Self { self.relay_rpc.insert(chain_id, url.into()); self }
    pub fn with_theme(mut self, theme: Theme) -> Self { self.themes.push(theme); self }
    pub fn with_themes(mut self, themes: Vec<Theme>) -> Self { self.themes = themes; self }

    /// Hub endpoint without a trailing slash.
    pub fn hub(&self) -> &str {
        self.hub_endpoint.trim_end_matches('/')
    }

    pub fn validate(&self) -> ConnectorResult<()> {
        let hub = self.hub();
        if !(hub.starts_with("http://") || hub.starts_with("https://")) {
            return Err(ConnectorError::Config(format!("hub endpoint must be http(s): {hub:?}")));
        }
        if self.root_domain.trim().is_empty() {
            return Err(ConnectorError::Config("root domain is empty".into()));
        }
        if self.cookie_expires_days > MAX_COOKIE_EXPIRES_DAYS {
            return Err(ConnectorError::Config(format!(
                "cookie expiry of {} days exceeds {MAX_COOKIE_EXPIRES_DAYS}",
                self.cookie_expires_days
            )));
        }
        Ok(())
    }

    /// Defaults overridden by `HUBCONNECT_*` environment variables.
    #[cfg(feature = "native")]
    pub fn from_env() -> ConnectorResult<Self> {
        let mut config = Self::default();
        if let Ok(endpoint) = std::env::var("HUBCONNECT_HUB_ENDPOINT") {
            config.hub_endpoint = endpoint;
        }
        if let Ok(domain) = std::env::var("HUBCONNECT_ROOT_DOMAIN") {
            config.root_domain = domain;
        }
        if let Ok(days) = std::env::var("HUBCONNECT_COOKIE_EXPIRES_DAYS") {
            config.cookie_expires_days = days
                .parse()
                .map_err(|e| ConnectorError::Config(format!("HUBCONNECT_COOKIE_EXPIRES_DAYS: {e}")))?;
        }
        config.validate()?;
        Ok(config)
    }
}
