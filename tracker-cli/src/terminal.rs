use block_tracker_core::{ChartSink, DisplaySink, Field};
use std::collections::BTreeMap;
use std::io::{self, Stdout, Write};

const LABEL_WIDTH: usize = 20;
const BAR_WIDTH: usize = 40;

/// Writes dashboard fields as `label: value` lines, skipping values that did not change.
pub struct TerminalDisplay<W: Write> {
    out: W,
    fields: BTreeMap<Field, String>,
}

impl TerminalDisplay<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalDisplay<W> {
    pub const fn new(out: W) -> Self {
        Self { out, fields: BTreeMap::new() }
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_field(&mut self, field: Field, text: &str) -> io::Result<()> {
        let mut lines = text.lines();
        let first = lines.next().unwrap_or_default();
        writeln!(self.out, "{:>LABEL_WIDTH$}: {first}", field.label())?;
        for line in lines {
            writeln!(self.out, "{:>LABEL_WIDTH$}  {line}", "")?;
        }
        self.out.flush()
    }
}

impl<W: Write> DisplaySink for TerminalDisplay<W> {
    fn set_text(&mut self, field: Field, text: String) {
        if self.fields.get(&field) == Some(&text) {
            return;
        }
        if let Err(error) = self.write_field(field, &text) {
            log::warn!("failed to write {field}: {error}");
        }
        self.fields.insert(field, text);
    }
}

/// Horizontal bar chart of transactions per block.
pub struct TerminalChart<W: Write> {
    out: W,
    labels: Vec<u64>,
    values: Vec<u64>,
}

impl TerminalChart<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalChart<W> {
    pub const fn new(out: W) -> Self {
        Self { out, labels: Vec::new(), values: Vec::new() }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn render(&mut self) -> io::Result<()> {
        let max = u128::from(self.values.iter().copied().max().unwrap_or(0).max(1));
        writeln!(self.out, "{:>LABEL_WIDTH$}", "Transactions")?;
        for (label, value) in self.labels.iter().zip(&self.values) {
            // round to nearest, never wider than BAR_WIDTH
            let len = usize::try_from((u128::from(*value) * BAR_WIDTH as u128 + max / 2) / max)
                .unwrap_or(BAR_WIDTH)
                .min(BAR_WIDTH);
            writeln!(self.out, "{label:>LABEL_WIDTH$} | {} {value}", "#".repeat(len))?;
        }
        self.out.flush()
    }
}

impl<W: Write> ChartSink for TerminalChart<W> {
    fn set_labels(&mut self, labels: Vec<u64>) {
        self.labels = labels;
    }

    fn set_values(&mut self, values: Vec<u64>) {
        self.values = values;
    }

    fn redraw(&mut self) {
        if self.labels.len() != self.values.len() {
            log::warn!("chart labels and values differ in length");
        }
        if let Err(error) = self.render() {
            log::warn!("failed to draw chart: {error}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(bytes: Vec<u8>) -> String {
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn display_writes_changed_fields_only() {
        let mut display = TerminalDisplay::new(Vec::new());
        display.set_text(Field::BlockNumber, "18,500,001".into());
        display.set_text(Field::BlockNumber, "18,500,001".into());
        display.set_text(Field::TxCount, "120".into());
        assert_eq!(display.get(Field::TxCount), Some("120"));

        let out = output(display.into_inner());
        assert_eq!(out.matches("18,500,001").count(), 1);
        assert!(out.contains("        Latest Block: 18,500,001\n"));
        assert!(out.contains("        Transactions: 120\n"));
    }

    #[test]
    fn display_indents_multiline_values() {
        let mut display = TerminalDisplay::new(Vec::new());
        display.set_text(Field::BalanceResult, "Address: 0xabc\nBalance: 1.000000 ETH".into());
        let out = output(display.into_inner());
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines[0], "             Balance: Address: 0xabc");
        assert_eq!(lines[1], format!("{:LABEL_WIDTH$}  Balance: 1.000000 ETH", ""));
    }

    #[test]
    fn chart_scales_bars_to_largest_value() {
        let mut chart = TerminalChart::new(Vec::new());
        chart.set_labels(vec![1, 2]);
        chart.set_values(vec![200, 100]);
        chart.redraw();

        let out = output(chart.into_inner());
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].ends_with(&format!("| {} 200", "#".repeat(BAR_WIDTH))));
        assert!(lines[2].ends_with(&format!("| {} 100", "#".repeat(BAR_WIDTH / 2))));
    }

    #[test]
    fn chart_handles_values_near_u64_max() {
        let mut chart = TerminalChart::new(Vec::new());
        chart.set_labels(vec![1, 2]);
        chart.set_values(vec![u64::MAX, u64::MAX / 2]);
        chart.redraw();

        let out = output(chart.into_inner());
        let lines: Vec<_> = out.lines().collect();
        assert!(lines[1].ends_with(&format!("| {} {}", "#".repeat(BAR_WIDTH), u64::MAX)));
        assert!(lines[2].ends_with(&format!("| {} {}", "#".repeat(BAR_WIDTH / 2), u64::MAX / 2)));
    }

    #[test]
    fn empty_chart_only_draws_header() {
        let mut chart = TerminalChart::new(Vec::new());
        chart.redraw();
        assert_eq!(output(chart.into_inner()).lines().count(), 1);
    }
}
