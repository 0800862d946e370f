use crate::error::FetchFailure;
use crate::types::{BlockRecord, Field, ProviderKind};

/// Source of chain data. Implemented by the live node client and the synthetic generator.
#[async_trait::async_trait]
pub trait ChainProvider: Send + Sync {
    fn kind(&self) -> ProviderKind;

    /// Human readable description of where the data comes from.
    fn describe(&self) -> String;

    async fn latest_block_number(&self) -> Result<u64, FetchFailure>;

    async fn block(&self, number: u64) -> Result<BlockRecord, FetchFailure>;

    /// Current gas price in wei.
    async fn gas_price(&self) -> Result<u128, FetchFailure>;

    /// Balance of `address` at the latest block, in wei.
    async fn balance(&self, address: &str) -> Result<u128, FetchFailure>;
}

/// Receiver of the rolling series, e.g. a chart widget.
pub trait ChartSink {
    fn set_labels(&mut self, labels: Vec<u64>);
    fn set_values(&mut self, values: Vec<u64>);
    fn redraw(&mut self);
}

/// Receiver of formatted dashboard values.
pub trait DisplaySink {
    fn set_text(&mut self, field: Field, text: String);
}
