use anyhow::Result;
use block_tracker_core::{format, ChainProvider, DisplaySink, FetchFailure, Field, TrackerConfig};
use block_tracker_ethereum::ChainSource;
use serde_json::{json, Value};

/// Connects to the configured chain, flagging the status field when that fails.
pub async fn connect_or_report<D: DisplaySink>(
    config: &TrackerConfig,
    display: &mut D,
) -> Result<ChainSource> {
    match ChainSource::connect(config).await {
        Ok(provider) => Ok(provider),
        Err(error) => {
            log::error!("Initialization error: {error:?}");
            display.set_text(Field::Status, "Connection Error".into());
            Err(error)
        },
    }
}

/// Latest block and gas price as a json document.
pub async fn stats_report<P: ChainProvider + ?Sized>(provider: &P) -> Result<Value, FetchFailure> {
    let number = provider.latest_block_number().await?;
    let block = provider.block(number).await?;
    let gas_price = provider.gas_price().await?;
    Ok(json!({
        "source": provider.describe(),
        "gasPrice": gas_price.to_string(),
        "gasPriceGwei": format::to_units(gas_price, format::GWEI_DECIMALS).to_string(),
        "block": block,
    }))
}
