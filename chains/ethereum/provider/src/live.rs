use anyhow::{Context, Result};
use async_trait::async_trait;
use block_tracker_core::{is_websocket, prelude::*, BlockRecord, FetchFailure, ProviderKind};
use ethers::{
    providers::{Http, Middleware, Provider, Ws},
    types::{Address, Block, BlockId, BlockNumber, H256, U256, U64},
};
use url::Url;

enum Transport {
    Http(Provider<Http>),
    Ws(Provider<Ws>),
}

/// Polls an Ethereum node over json-rpc.
pub struct LiveProvider {
    url: Url,
    transport: Transport,
}

impl LiveProvider {
    /// Connects over websocket for `ws://` and `wss://` urls, plain http otherwise.
    ///
    /// # Errors
    ///
    /// Fails if the websocket handshake fails. Http connections are lazy and never fail here.
    pub async fn connect(url: Url) -> Result<Self> {
        let transport = if is_websocket(&url) {
            let ws = Ws::connect(url.as_str())
                .await
                .with_context(|| format!("failed to connect to {url}"))?;
            Transport::Ws(Provider::new(ws))
        } else {
            Transport::Http(Provider::new(Http::new(url.clone())))
        };
        log::info!("connected to {url}");
        Ok(Self { url, transport })
    }

    async fn get_block(&self, number: u64) -> Result<Option<Block<H256>>, FetchFailure> {
        let id = BlockId::Number(BlockNumber::Number(U64::from(number)));
        match &self.transport {
            Transport::Http(provider) => provider.get_block(id).await,
            Transport::Ws(provider) => provider.get_block(id).await,
        }
        .map_err(FetchFailure::rpc)
    }
}

fn to_u128(value: U256, what: &str) -> Result<u128, FetchFailure> {
    u128::try_from(value).map_err(|_| FetchFailure::Rpc(format!("{what} overflows u128: {value}")))
}

fn block_record(number: u64, block: Block<H256>) -> Result<BlockRecord, FetchFailure> {
    let gas_used = u64::try_from(block.gas_used)
        .map_err(|_| FetchFailure::Rpc(format!("gas used overflows u64: {}", block.gas_used)))?;
    Ok(BlockRecord {
        number: block.number.map_or(number, |n| n.as_u64()),
        transactions: block.transactions.iter().map(|hash| format!("{hash:#x}")).collect(),
        gas_used,
        difficulty: to_u128(block.difficulty, "difficulty")?,
    })
}

#[async_trait]
impl ChainProvider for LiveProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Live
    }

    fn describe(&self) -> String {
        self.url.to_string()
    }

    async fn latest_block_number(&self) -> Result<u64, FetchFailure> {
        let number = match &self.transport {
            Transport::Http(provider) => provider.get_block_number().await,
            Transport::Ws(provider) => provider.get_block_number().await,
        }
        .map_err(FetchFailure::rpc)?;
        Ok(number.as_u64())
    }

    async fn block(&self, number: u64) -> Result<BlockRecord, FetchFailure> {
        let Some(block) = self.get_block(number).await? else {
            return Err(FetchFailure::BlockNotFound(number));
        };
        block_record(number, block)
    }

    async fn gas_price(&self) -> Result<u128, FetchFailure> {
        let price = match &self.transport {
            Transport::Http(provider) => provider.get_gas_price().await,
            Transport::Ws(provider) => provider.get_gas_price().await,
        }
        .map_err(FetchFailure::rpc)?;
        to_u128(price, "gas price")
    }

    async fn balance(&self, address: &str) -> Result<u128, FetchFailure> {
        let address: Address =
            address.parse().map_err(|_| FetchFailure::InvalidAddress(address.to_string()))?;
        let balance = match &self.transport {
            Transport::Http(provider) => provider.get_balance(address, None).await,
            Transport::Ws(provider) => provider.get_balance(address, None).await,
        }
        .map_err(FetchFailure::rpc)?;
        to_u128(balance, "balance")
    }
}
