use comfy_table::presets::ASCII_MARKDOWN;
use comfy_table::{CellAlignment, Table};
use yfin_types::PriceBar;

pub const HISTORY_COLUMNS: [&str; 8] = [
    "Date",
    "Open",
    "High",
    "Low",
    "Close",
    "Volume",
    "Dividends",
    "Stock Splits",
];

/// Bar timestamps keep the exchange offset they were reported in.
pub const BAR_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%:z";

/// Renders price bars as a markdown table, one row per bar.
#[must_use]
pub fn price_table(bars: &[PriceBar]) -> String {
    let mut table = Table::new();
    table.load_preset(ASCII_MARKDOWN).set_header(HISTORY_COLUMNS.to_vec());

    for bar in bars {
        table.add_row(vec![
            bar.timestamp.format(BAR_TIMESTAMP_FORMAT).to_string(),
            bar.open.to_string(),
            bar.high.to_string(),
            bar.low.to_string(),
            bar.close.to_string(),
            bar.volume.to_string(),
            bar.dividends.to_string(),
            bar.stock_splits.to_string(),
        ]);
    }

    for index in 1..HISTORY_COLUMNS.len() {
        if let Some(column) = table.column_mut(index) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }

    table.to_string()
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, FixedOffset};

    use super::*;

    fn bar(timestamp: &str, close: f64, dividends: f64) -> PriceBar {
        let timestamp: DateTime<FixedOffset> =
            DateTime::parse_from_rfc3339(timestamp).expect("valid timestamp");
        PriceBar {
            timestamp,
            open: 187.15,
            high: 188.44,
            low: 183.89,
            close,
            volume: 82_488_700,
            dividends,
            stock_splits: 0.0,
        }
    }

    #[test]
    fn renders_one_row_per_bar_with_exchange_offset() {
        let bars = vec![
            bar("2024-01-02T09:30:00-05:00", 185.64, 0.0),
            bar("2024-01-03T09:30:00-05:00", 184.25, 0.24),
        ];

        let table = price_table(&bars);
        let lines: Vec<_> = table.lines().collect();

        assert!(lines[0].contains("Date"));
        assert!(lines[0].contains("Stock Splits"));
        assert_eq!(lines.iter().filter(|line| line.contains("2024-01-0")).count(), 2);
        assert!(table.contains("2024-01-02 09:30:00-05:00"));
        assert!(table.contains("185.64"));
        assert!(table.contains("82488700"));
        assert!(lines.last().is_some_and(|line| line.contains("0.24")));
    }

    #[test]
    fn empty_history_renders_header_only() {
        let table = price_table(&[]);
        assert!(table.contains("Open"));
        assert!(!table.contains("2024"));
    }
}
