//! Pure date parsing and profit/loss arithmetic.

use std::error::Error;
use std::fmt;

use chrono::NaiveDate;
use yfin_types::{PriceBar, ProfitLossResult};

pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateParseError {
    pub value: String,
    pub reason: String,
}

impl fmt::Display for DateParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not a YYYY-MM-DD date ({})", self.value, self.reason)
    }
}

impl Error for DateParseError {}

/// Parses a calendar date in `YYYY-MM-DD` form.
///
/// # Errors
/// Returns `DateParseError` naming the offending input.
pub fn parse_iso_date(value: &str) -> Result<NaiveDate, DateParseError> {
    NaiveDate::parse_from_str(value, ISO_DATE_FORMAT).map_err(|err| DateParseError {
        value: value.to_string(),
        reason: err.to_string(),
    })
}

/// Computes profit or loss from the first to the last close in `bars`.
///
/// Returns `None` when there are no bars. `percent_change` is `None` when the
/// starting close is zero.
#[must_use]
pub fn profit_loss(
    symbol: &str,
    start_date: &str,
    end_date: &str,
    bars: &[PriceBar],
) -> Option<ProfitLossResult> {
    let start_price = bars.first()?.close;
    let end_price = bars.last()?.close;
    let delta = end_price - start_price;
    let percent_change = (start_price != 0.0).then(|| delta / start_price * 100.0);

    Some(ProfitLossResult {
        symbol: symbol.to_string(),
        start_date: start_date.to_string(),
        end_date: end_date.to_string(),
        start_price,
        end_price,
        profit_loss: delta,
        percent_change,
    })
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;

    use super::*;

    fn closes(values: &[f64]) -> Vec<PriceBar> {
        values
            .iter()
            .enumerate()
            .map(|(day, close)| PriceBar {
                timestamp: DateTime::parse_from_rfc3339(&format!("2024-01-{:02}T09:30:00-05:00", day + 2))
                    .expect("valid timestamp"),
                open: *close,
                high: *close,
                low: *close,
                close: *close,
                volume: 1_000,
                dividends: 0.0,
                stock_splits: 0.0,
            })
            .collect()
    }

    #[test]
    fn parses_iso_dates_only() {
        assert_eq!(
            parse_iso_date("2024-01-02"),
            Ok(NaiveDate::from_ymd_opt(2024, 1, 2).expect("valid date"))
        );
        let err = parse_iso_date("01/02/2024").expect_err("slash dates are rejected");
        assert_eq!(err.value, "01/02/2024");
        assert!(err.to_string().contains("'01/02/2024'"));
        assert!(parse_iso_date("2024-02-30").is_err());
    }

    #[test]
    fn uses_first_and_last_close() {
        let result = profit_loss("AAPL", "2024-01-02", "2024-01-05", &closes(&[100.0, 90.0, 110.0]))
            .expect("bars present");
        assert!((result.start_price - 100.0).abs() < f64::EPSILON);
        assert!((result.end_price - 110.0).abs() < f64::EPSILON);
        assert!((result.profit_loss - 10.0).abs() < f64::EPSILON);
        assert!(result.percent_change.is_some_and(|pct| (pct - 10.0).abs() < 1e-9));
    }

    #[test]
    fn losses_are_negative() {
        let result = profit_loss("AAPL", "2024-01-02", "2024-01-03", &closes(&[200.0, 150.0]))
            .expect("bars present");
        assert!((result.profit_loss + 50.0).abs() < f64::EPSILON);
        assert!(result.percent_change.is_some_and(|pct| (pct + 25.0).abs() < 1e-9));
    }

    #[test]
    fn zero_start_price_has_no_percent_change() {
        let result = profit_loss("DEAD", "2024-01-02", "2024-01-03", &closes(&[0.0, 5.0]))
            .expect("bars present");
        assert_eq!(result.percent_change, None);
        let json = serde_json::to_value(&result).expect("result serializes");
        assert!(json["percent_change"].is_null());
    }

    #[test]
    fn no_bars_no_result() {
        assert_eq!(profit_loss("AAPL", "2024-01-02", "2024-01-03", &[]), None);
    }
}
