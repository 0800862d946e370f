use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// A block as seen by the tracker, either fetched from a node or fabricated.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockRecord {
    pub number: u64,
    /// Transaction hashes, in block order.
    pub transactions: Vec<String>,
    pub gas_used: u64,
    /// Always zero after the merge.
    #[serde(default)]
    pub difficulty: u128,
}

impl BlockRecord {
    #[must_use]
    pub fn transaction_count(&self) -> u64 {
        self.transactions.len() as u64
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesPoint {
    pub block_number: u64,
    pub transaction_count: u64,
}

impl SeriesPoint {
    #[must_use]
    pub const fn new(block_number: u64, transaction_count: u64) -> Self {
        Self { block_number, transaction_count }
    }
}

impl From<&BlockRecord> for SeriesPoint {
    fn from(block: &BlockRecord) -> Self {
        Self::new(block.number, block.transaction_count())
    }
}

/// Which flavour of chain provider is driving the tracker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    Live,
    Synthetic,
}

/// Identifiers of the values shown on the dashboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Status,
    BlockNumber,
    TxCount,
    GasUsed,
    GasPrice,
    Difficulty,
    BalanceResult,
    TransactionList,
}

impl Field {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Status => "Status",
            Self::BlockNumber => "Latest Block",
            Self::TxCount => "Transactions",
            Self::GasUsed => "Gas Used",
            Self::GasPrice => "Gas Price",
            Self::Difficulty => "Difficulty",
            Self::BalanceResult => "Balance",
            Self::TransactionList => "Recent Transactions",
        }
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
