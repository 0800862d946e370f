use crate::args::{Command, Opts, StatsOpts};
use crate::report::{connect_or_report, stats_report};
use crate::terminal::{TerminalChart, TerminalDisplay};
use anyhow::Result;
use block_tracker_core::{AppContext, TrackerConfig};
use block_tracker_ethereum::ChainSource;
use clap::Parser;
use std::time::Duration;

mod args;
mod report;
mod terminal;

type Tracker = AppContext<
    ChainSource,
    TerminalChart<std::io::Stdout>,
    TerminalDisplay<std::io::Stdout>,
>;

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        log::error!("failed to listen for ctrl-c: {error}");
        std::future::pending::<()>().await;
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let opts = Opts::parse();

    let mut config = TrackerConfig::from_node_url(opts.url.as_deref())?;
    if let Some(secs) = opts.interval {
        config = config.with_poll_interval(Duration::from_secs(secs))?;
    }

    let mut display = TerminalDisplay::stdout();
    let provider = connect_or_report(&config, &mut display).await?;

    let mut tracker: Tracker = AppContext::new(config, provider, TerminalChart::stdout(), display);

    match opts.cmd.unwrap_or(Command::Watch) {
        Command::Watch => {
            tracker.init().await;
            tracker.run(shutdown_signal()).await;
        },
        Command::Stats(StatsOpts { json: true }) => {
            let report = stats_report(tracker.provider()).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        },
        Command::Stats(StatsOpts { json: false }) => {
            tracker.init().await;
            if !tracker.tick().await {
                anyhow::bail!("failed to fetch the latest block");
            }
        },
        Command::Balance(opts) => {
            tracker.check_balance(&opts.address).await;
        },
    }
    Ok(())
}
