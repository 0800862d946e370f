use clap::Parser;

#[derive(Parser)]
#[clap(name = "block-tracker", about = "Ethereum block statistics in the terminal")]
pub struct Opts {
    /// Json-rpc endpoint (http, https, ws or wss). Without it synthetic blocks are shown.
    #[clap(long, env = "ETH_RPC_URL")]
    pub url: Option<String>,
    /// Poll interval in seconds, defaults to 15 for a node and 3 for synthetic blocks.
    #[clap(long)]
    pub interval: Option<u64>,
    #[clap(subcommand)]
    pub cmd: Option<Command>,
}

#[derive(Parser)]
pub enum Command {
    /// Follow new blocks until interrupted.
    Watch,
    /// Print the current statistics once.
    Stats(StatsOpts),
    /// Look up the ether balance of an address.
    Balance(BalanceOpts),
}

#[derive(Parser)]
pub struct StatsOpts {
    #[clap(long)]
    pub json: bool,
}

#[derive(Parser)]
pub struct BalanceOpts {
    pub address: String,
}
