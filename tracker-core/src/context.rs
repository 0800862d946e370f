use crate::{
    config::TrackerConfig,
    format,
    series::RollingSeries,
    traits::{ChainProvider, ChartSink, DisplaySink},
    types::{BlockRecord, Field, ProviderKind, SeriesPoint},
};
use std::future::Future;
use tokio::time::MissedTickBehavior;

/// State owned by the tracker for its whole lifetime: the data source, the rolling
/// series and the sinks it feeds.
pub struct AppContext<P, C, D> {
    config: TrackerConfig,
    provider: P,
    series: RollingSeries,
    chart: C,
    display: D,
}

impl<P, C, D> AppContext<P, C, D>
where
    P: ChainProvider,
    C: ChartSink,
    D: DisplaySink,
{
    pub fn new(config: TrackerConfig, provider: P, chart: C, display: D) -> Self {
        Self { config, provider, series: RollingSeries::new(), chart, display }
    }

    pub const fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub const fn provider(&self) -> &P {
        &self.provider
    }

    pub const fn series(&self) -> &RollingSeries {
        &self.series
    }

    pub const fn chart(&self) -> &C {
        &self.chart
    }

    pub const fn display(&self) -> &D {
        &self.display
    }

    /// Tears the context down, handing back the sinks.
    pub fn into_sinks(self) -> (C, D) {
        (self.chart, self.display)
    }

    pub async fn init(&mut self) {
        let status = match self.provider.kind() {
            ProviderKind::Live => format!("Connected via {}", self.provider.describe()),
            ProviderKind::Synthetic => "Demo mode: no node configured".to_string(),
        };
        log::info!("{status}");
        self.display.set_text(Field::Status, status);
        self.update_stats().await;
    }

    /// Polls the provider until `shutdown` resolves.
    pub async fn run<F>(&mut self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        let mut interval = tokio::time::interval(self.config.poll_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                () = &mut shutdown => {
                    log::info!("shutting down tracker");
                    break;
                },
                _ = interval.tick() => {
                    self.tick().await;
                },
            }
        }
    }

    /// Fetches the latest block and pushes it to the display and the chart.
    ///
    /// Returns `false` if the provider failed, in which case nothing was updated.
    pub async fn tick(&mut self) -> bool {
        let block = match self.fetch_latest_block().await {
            Ok(block) => block,
            Err(error) => {
                log::error!("Block fetch error: {error}");
                return false;
            },
        };
        log::debug!("block {} with {} transactions", block.number, block.transaction_count());
        self.update_block_info(&block);
        self.update_chart(&block);
        true
    }

    async fn fetch_latest_block(&self) -> Result<BlockRecord, crate::FetchFailure> {
        let number = self.provider.latest_block_number().await?;
        self.provider.block(number).await
    }

    pub fn update_block_info(&mut self, block: &BlockRecord) {
        self.display.set_text(Field::BlockNumber, format::block_number(block.number));
        self.display.set_text(Field::TxCount, block.transaction_count().to_string());
        self.display.set_text(Field::GasUsed, format::gas_used(block.gas_used));
        self.display.set_text(Field::TransactionList, format::recent_transactions(block));
    }

    /// Refreshes gas price and difficulty. Each value is updated independently.
    pub async fn update_stats(&mut self) {
        match self.provider.gas_price().await {
            Ok(price) => self.display.set_text(Field::GasPrice, format::gas_price(price)),
            Err(error) => log::error!("Stats error: {error}"),
        }
        match self.fetch_latest_block().await {
            Ok(block) => {
                self.display.set_text(Field::Difficulty, format::difficulty(block.difficulty));
            },
            Err(error) => log::error!("Stats error: {error}"),
        }
    }

    pub fn update_chart(&mut self, block: &BlockRecord) {
        // Polling faster than the chain produces blocks returns the same head again.
        if self.series.last().is_some_and(|last| last.block_number == block.number) {
            log::debug!("block {} already charted", block.number);
            return;
        }
        self.series.append(SeriesPoint::from(block));
        self.chart.set_labels(self.series.labels());
        self.chart.set_values(self.series.values());
        self.chart.redraw();
    }

    pub async fn check_balance(&mut self, address: &str) {
        let address = address.trim();
        if address.is_empty() {
            self.display.set_text(Field::BalanceResult, "Please enter a valid address".into());
            return;
        }
        let text = match self.provider.balance(address).await {
            Ok(wei) => format::balance(address, wei),
            Err(error) => {
                log::error!("Balance error for {address}: {error}");
                format!("Error fetching balance: {error}")
            },
        };
        self.display.set_text(Field::BalanceResult, text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FetchFailure;
    use std::collections::{BTreeMap, VecDeque};
    use std::sync::Mutex;
    use std::time::Duration;

    #[derive(Default)]
    struct MockProvider {
        heads: Mutex<VecDeque<Result<u64, FetchFailure>>>,
        gas_price: Option<u128>,
    }

    impl MockProvider {
        fn with_heads(heads: impl IntoIterator<Item = Result<u64, FetchFailure>>) -> Self {
            Self { heads: Mutex::new(heads.into_iter().collect()), gas_price: Some(30_000_000_000) }
        }
    }

    #[async_trait::async_trait]
    impl ChainProvider for MockProvider {
        fn kind(&self) -> ProviderKind {
            ProviderKind::Live
        }

        fn describe(&self) -> String {
            "mock".into()
        }

        async fn latest_block_number(&self) -> Result<u64, FetchFailure> {
            self.heads
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(FetchFailure::Rpc("no more heads".into())))
        }

        async fn block(&self, number: u64) -> Result<BlockRecord, FetchFailure> {
            Ok(BlockRecord {
                number,
                transactions: (0..number % 7).map(|i| format!("0x{i:064x}")).collect(),
                gas_used: number * 1_000,
                difficulty: 0,
            })
        }

        async fn gas_price(&self) -> Result<u128, FetchFailure> {
            self.gas_price.ok_or(FetchFailure::Rpc("gas price unavailable".into()))
        }

        async fn balance(&self, address: &str) -> Result<u128, FetchFailure> {
            if address.starts_with("0x") {
                Ok(2_500_000_000_000_000_000)
            } else {
                Err(FetchFailure::InvalidAddress(address.into()))
            }
        }
    }

    #[derive(Default)]
    struct RecordingChart {
        labels: Vec<u64>,
        values: Vec<u64>,
        redraws: usize,
    }

    impl ChartSink for RecordingChart {
        fn set_labels(&mut self, labels: Vec<u64>) {
            self.labels = labels;
        }

        fn set_values(&mut self, values: Vec<u64>) {
            self.values = values;
        }

        fn redraw(&mut self) {
            self.redraws += 1;
        }
    }

    #[derive(Default)]
    struct RecordingDisplay(BTreeMap<Field, String>);

    impl DisplaySink for RecordingDisplay {
        fn set_text(&mut self, field: Field, text: String) {
            self.0.insert(field, text);
        }
    }

    type TestContext = AppContext<MockProvider, RecordingChart, RecordingDisplay>;

    fn context(provider: MockProvider) -> TestContext {
        AppContext::new(
            TrackerConfig::synthetic(),
            provider,
            RecordingChart::default(),
            RecordingDisplay::default(),
        )
    }

    #[tokio::test]
    async fn tick_updates_display_and_chart() {
        let mut ctx = context(MockProvider::with_heads([Ok(1_000_003)]));
        assert!(ctx.tick().await);

        let display = &ctx.display().0;
        assert_eq!(display[&Field::BlockNumber], "1,000,003");
        assert_eq!(display[&Field::TxCount], (1_000_003 % 7).to_string());
        assert_eq!(display[&Field::GasUsed], "1000.00M");
        assert!(display.contains_key(&Field::TransactionList));

        assert_eq!(ctx.chart().labels, vec![1_000_003]);
        assert_eq!(ctx.chart().values, vec![1_000_003 % 7]);
        assert_eq!(ctx.chart().redraws, 1);
    }

    #[tokio::test]
    async fn failed_tick_leaves_state_unchanged() {
        let mut ctx =
            context(MockProvider::with_heads([Ok(10), Err(FetchFailure::Rpc("timeout".into()))]));
        assert!(ctx.tick().await);
        let before = ctx.display().0.clone();

        assert!(!ctx.tick().await);
        assert_eq!(ctx.display().0, before);
        assert_eq!(ctx.series().labels(), vec![10]);
        assert_eq!(ctx.chart().redraws, 1);

        // the next tick proceeds regardless
        assert!(!ctx.tick().await);
    }

    #[tokio::test]
    async fn repeated_head_is_charted_once() {
        let mut ctx = context(MockProvider::with_heads([Ok(5), Ok(5), Ok(6)]));
        for _ in 0..3 {
            assert!(ctx.tick().await);
        }
        assert_eq!(ctx.series().labels(), vec![5, 6]);
        assert_eq!(ctx.chart().redraws, 2);
    }

    #[tokio::test]
    async fn chart_keeps_last_ten_blocks() {
        let mut ctx = context(MockProvider::with_heads((1..=12).map(Ok)));
        for _ in 1..=12 {
            ctx.tick().await;
        }
        assert_eq!(ctx.chart().labels, (3..=12).collect::<Vec<_>>());
        assert_eq!(ctx.chart().values.len(), 10);
    }

    #[tokio::test]
    async fn init_sets_status_and_stats() {
        let mut ctx = context(MockProvider::with_heads([Ok(42)]));
        ctx.init().await;
        let display = &ctx.display().0;
        assert_eq!(display[&Field::Status], "Connected via mock");
        assert_eq!(display[&Field::GasPrice], "30.00 Gwei");
        assert_eq!(display[&Field::Difficulty], "0 (PoS)");
        // stats do not feed the chart
        assert!(ctx.series().is_empty());
    }

    #[tokio::test]
    async fn stats_failures_are_independent() {
        let provider = MockProvider { gas_price: None, ..MockProvider::with_heads([Ok(42)]) };
        let mut ctx = context(provider);
        ctx.update_stats().await;
        let display = &ctx.display().0;
        assert!(!display.contains_key(&Field::GasPrice));
        assert_eq!(display[&Field::Difficulty], "0 (PoS)");
    }

    #[tokio::test]
    async fn balance_messages() {
        let mut ctx = context(MockProvider::default());

        ctx.check_balance("  ").await;
        assert_eq!(ctx.display().0[&Field::BalanceResult], "Please enter a valid address");

        ctx.check_balance("0xabc").await;
        assert_eq!(ctx.display().0[&Field::BalanceResult], "Address: 0xabc\nBalance: 2.500000 ETH");

        ctx.check_balance("nope").await;
        assert_eq!(
            ctx.display().0[&Field::BalanceResult],
            "Error fetching balance: invalid address: nope"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn run_ticks_until_shutdown() {
        let mut ctx = context(MockProvider::with_heads((1..=100).map(Ok)));
        // first tick fires immediately, then every 3 seconds
        ctx.run(tokio::time::sleep(Duration::from_millis(7_500))).await;
        assert_eq!(ctx.series().labels(), vec![1, 2, 3]);
        let (chart, _) = ctx.into_sinks();
        assert_eq!(chart.redraws, 3);
    }
}
