use async_trait::async_trait;
use block_tracker_core::{prelude::*, BlockRecord, FetchFailure, ProviderKind, TrackerConfig};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::{ops::Range, time::Duration};
use tokio::time::Instant;

/// Interval at which the synthetic chain produces a block.
pub const BLOCK_INTERVAL: Duration = Duration::from_secs(3);
const TRANSACTION_COUNT: Range<u64> = 50..250;
const GAS_USED: Range<u64> = 5_000_000..20_000_000;

/// Fabricates plausible post-merge blocks when no node is available.
///
/// The head advances by one block every [`BLOCK_INTERVAL`] of tokio time, starting one
/// past `start_block`. Blocks are derived from `(seed, number)`, so fetching the same
/// number twice yields the same record.
#[derive(Debug, Clone)]
pub struct SyntheticProvider {
    start_block: u64,
    block_interval: Duration,
    gas_price: u128,
    seed: u64,
    started_at: Instant,
}

impl SyntheticProvider {
    #[must_use]
    pub fn new(config: &TrackerConfig) -> Self {
        Self::with_seed(config, rand::random())
    }

    #[must_use]
    pub fn with_seed(config: &TrackerConfig, seed: u64) -> Self {
        Self {
            start_block: config.demo_start_block,
            block_interval: BLOCK_INTERVAL,
            gas_price: config.demo_gas_price,
            seed,
            started_at: Instant::now(),
        }
    }

    #[must_use]
    pub fn head(&self) -> u64 {
        let produced = self.started_at.elapsed().as_millis() / self.block_interval.as_millis();
        self.start_block
            .saturating_add(1)
            .saturating_add(u64::try_from(produced).unwrap_or(u64::MAX))
    }

    fn fabricate(&self, number: u64) -> BlockRecord {
        let mut rng = StdRng::seed_from_u64(self.seed.wrapping_add(number));
        let transaction_count = rng.gen_range(TRANSACTION_COUNT);
        let gas_used = rng.gen_range(GAS_USED);
        let transactions = (0..transaction_count)
            .map(|_| {
                let hash: [u8; 32] = rng.gen();
                format!("0x{}", hex::encode(hash))
            })
            .collect();
        BlockRecord { number, transactions, gas_used, difficulty: 0 }
    }
}

#[async_trait]
impl ChainProvider for SyntheticProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Synthetic
    }

    fn describe(&self) -> String {
        format!("synthetic chain from block {}", self.start_block)
    }

    async fn latest_block_number(&self) -> Result<u64, FetchFailure> {
        Ok(self.head())
    }

    async fn block(&self, number: u64) -> Result<BlockRecord, FetchFailure> {
        if number > self.head() {
            return Err(FetchFailure::BlockNotFound(number));
        }
        Ok(self.fabricate(number))
    }

    async fn gas_price(&self) -> Result<u128, FetchFailure> {
        Ok(self.gas_price)
    }

    async fn balance(&self, _address: &str) -> Result<u128, FetchFailure> {
        Err(FetchFailure::Unsupported("balance lookup requires a live node"))
    }
}
