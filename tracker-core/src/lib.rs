mod config;
mod context;
mod error;
pub mod format;
mod series;
mod traits;
mod types;

pub use config::{is_websocket, ConfigError, TrackerConfig};
pub use context::AppContext;
pub use error::FetchFailure;
pub use series::{RollingSeries, SERIES_CAPACITY};
pub use traits::{ChainProvider, ChartSink, DisplaySink};
pub use types::{BlockRecord, Field, ProviderKind, SeriesPoint};

/// Easy imports of frequently used traits.
pub mod prelude {
    pub use crate::traits::{ChainProvider, ChartSink, DisplaySink};
}
