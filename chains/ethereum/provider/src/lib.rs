use anyhow::{Context, Result};
use async_trait::async_trait;
use block_tracker_core::{prelude::*, BlockRecord, FetchFailure, ProviderKind, TrackerConfig};

mod live;
mod synthetic;

pub use live::LiveProvider;
pub use synthetic::{SyntheticProvider, BLOCK_INTERVAL};

/// The provider picked at startup: a real node when one is configured, fabricated blocks
/// otherwise. Everything downstream only sees [`ChainProvider`].
pub enum ChainSource {
    Live(LiveProvider),
    Synthetic(SyntheticProvider),
}

impl ChainSource {
    /// # Errors
    ///
    /// Returns `Err` if the configured node cannot be reached.
    pub async fn connect(config: &TrackerConfig) -> Result<Self> {
        match (config.mode, config.node_url.as_ref()) {
            (ProviderKind::Live, Some(url)) => {
                log::info!("connecting to {url}");
                let provider = LiveProvider::connect(url.clone())
                    .await
                    .context("failed to create live provider")?;
                Ok(Self::Live(provider))
            },
            (ProviderKind::Live, None) => anyhow::bail!("live mode requires a node url"),
            (ProviderKind::Synthetic, _) => {
                log::info!("no node configured, generating synthetic blocks");
                Ok(Self::Synthetic(SyntheticProvider::new(config)))
            },
        }
    }
}

#[async_trait]
impl ChainProvider for ChainSource {
    fn kind(&self) -> ProviderKind {
        match self {
            Self::Live(live) => live.kind(),
            Self::Synthetic(synthetic) => synthetic.kind(),
        }
    }

    fn describe(&self) -> String {
        match self {
            Self::Live(live) => live.describe(),
            Self::Synthetic(synthetic) => synthetic.describe(),
        }
    }

    async fn latest_block_number(&self) -> Result<u64, FetchFailure> {
        match self {
            Self::Live(live) => live.latest_block_number().await,
            Self::Synthetic(synthetic) => synthetic.latest_block_number().await,
        }
    }

    async fn block(&self, number: u64) -> Result<BlockRecord, FetchFailure> {
        match self {
            Self::Live(live) => live.block(number).await,
            Self::Synthetic(synthetic) => synthetic.block(number).await,
        }
    }

    async fn gas_price(&self) -> Result<u128, FetchFailure> {
        match self {
            Self::Live(live) => live.gas_price().await,
            Self::Synthetic(synthetic) => synthetic.gas_price().await,
        }
    }

    async fn balance(&self, address: &str) -> Result<u128, FetchFailure> {
        match self {
            Self::Live(live) => live.balance(address).await,
            Self::Synthetic(synthetic) => synthetic.balance(address).await,
        }
    }
}
