use crate::types::ProviderKind;
use std::time::Duration;
use thiserror::Error;
use url::Url;

pub const LIVE_POLL_INTERVAL: Duration = Duration::from_secs(15);
pub const SYNTHETIC_POLL_INTERVAL: Duration = Duration::from_secs(3);
pub const DEMO_START_BLOCK: u64 = 18_500_000;
/// 25.3 gwei
pub const DEMO_GAS_PRICE: u128 = 25_300_000_000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid node url: {0}")]
    InvalidUrl(String),
    #[error("Invalid node url scheme {0}, expected http, https, ws or wss")]
    InvalidScheme(String),
    #[error("Poll interval must be greater than zero")]
    ZeroInterval,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrackerConfig {
    pub mode: ProviderKind,
    /// Node endpoint, only set in live mode.
    pub node_url: Option<Url>,
    pub poll_interval: Duration,
    pub demo_start_block: u64,
    /// Gas price reported by the synthetic provider, in wei.
    pub demo_gas_price: u128,
}

impl TrackerConfig {
    /// Configuration for polling a node at `node_url`.
    ///
    /// # Errors
    ///
    /// The url must parse and use one of the http, https, ws or wss schemes.
    pub fn live(node_url: &str) -> Result<Self, ConfigError> {
        let url =
            Url::parse(node_url).map_err(|error| ConfigError::InvalidUrl(error.to_string()))?;
        if !matches!(url.scheme(), "http" | "https" | "ws" | "wss") {
            return Err(ConfigError::InvalidScheme(url.scheme().to_string()));
        }
        Ok(Self {
            mode: ProviderKind::Live,
            node_url: Some(url),
            poll_interval: LIVE_POLL_INTERVAL,
            demo_start_block: DEMO_START_BLOCK,
            demo_gas_price: DEMO_GAS_PRICE,
        })
    }

    #[must_use]
    pub const fn synthetic() -> Self {
        Self {
            mode: ProviderKind::Synthetic,
            node_url: None,
            poll_interval: SYNTHETIC_POLL_INTERVAL,
            demo_start_block: DEMO_START_BLOCK,
            demo_gas_price: DEMO_GAS_PRICE,
        }
    }

    /// Picks live mode when a node url is given, synthetic otherwise.
    ///
    /// # Errors
    ///
    /// See [`TrackerConfig::live`].
    pub fn from_node_url(node_url: Option<&str>) -> Result<Self, ConfigError> {
        match node_url.map(str::trim).filter(|url| !url.is_empty()) {
            Some(url) => Self::live(url),
            None => Ok(Self::synthetic()),
        }
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroInterval`] for a zero duration.
    pub fn with_poll_interval(mut self, interval: Duration) -> Result<Self, ConfigError> {
        if interval.is_zero() {
            return Err(ConfigError::ZeroInterval);
        }
        self.poll_interval = interval;
        Ok(self)
    }
}

/// Whether `url` should be served by a websocket transport.
#[must_use]
pub fn is_websocket(url: &Url) -> bool {
    matches!(url.scheme(), "ws" | "wss")
}
