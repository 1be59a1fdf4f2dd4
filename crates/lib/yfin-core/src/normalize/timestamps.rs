use chrono::DateTime;
use serde_json::Value;
use tracing::warn;
use yfin_types::TickerInfo;

/// Field-name suffixes that mark a value as epoch seconds.
pub const DATE_LIKE_SUFFIXES: [&str; 6] = ["date", "start", "end", "timestamp", "time", "quarter"];

/// Rendering used for converted fields, always in UTC.
pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldOutcome {
    Converted,
    LeftAsIs { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldConversion {
    pub key: String,
    pub outcome: FieldOutcome,
}

/// Ticker record with date-like fields rendered, plus what happened to each one.
#[derive(Debug, Clone)]
pub struct HumanizedInfo {
    pub info: TickerInfo,
    pub conversions: Vec<FieldConversion>,
}

impl HumanizedInfo {
    #[must_use]
    pub fn converted_count(&self) -> usize {
        self.conversions
            .iter()
            .filter(|conversion| conversion.outcome == FieldOutcome::Converted)
            .count()
    }
}

/// Returns true when `key` ends with a date-like suffix, ignoring case.
#[must_use]
pub fn is_date_like(key: &str) -> bool {
    let lower = key.to_lowercase();
    DATE_LIKE_SUFFIXES.iter().any(|suffix| lower.ends_with(suffix))
}

/// Renders a numeric epoch-seconds value in UTC, dropping sub-second precision.
///
/// # Errors
/// Returns a reason string when the value is not numeric or is out of range.
pub fn render_epoch_seconds(value: &Value) -> Result<String, String> {
    let Value::Number(number) = value else {
        return Err(format!("expected epoch seconds, found {}", kind_of(value)));
    };
    let moment = if let Some(seconds) = number.as_i64() {
        DateTime::from_timestamp(seconds, 0)
    } else {
        number
            .as_f64()
            .filter(|seconds| seconds.is_finite())
            .and_then(|seconds| {
                #[allow(clippy::cast_possible_truncation)]
                let whole = seconds.floor() as i64;
                DateTime::from_timestamp(whole, 0)
            })
    };
    moment
        .map(|moment| moment.format(DISPLAY_FORMAT).to_string())
        .ok_or_else(|| format!("{number} is outside the representable time range"))
}

/// Copies `info`, rewriting every date-like numeric field as a UTC date-time.
///
/// Fields that cannot be converted are kept unchanged and logged. The input
/// record is never modified.
#[must_use]
pub fn humanize_timestamps(info: &TickerInfo) -> HumanizedInfo {
    let mut humanized = TickerInfo::new();
    let mut conversions = Vec::new();

    for (key, value) in info {
        if !is_date_like(key) {
            humanized.insert(key.clone(), value.clone());
            continue;
        }

        match render_epoch_seconds(value) {
            Ok(rendered) => {
                humanized.insert(key.clone(), Value::String(rendered));
                conversions.push(FieldConversion {
                    key: key.clone(),
                    outcome: FieldOutcome::Converted,
                });
            }
            Err(reason) => {
                warn!(field = %key, value = %value, reason = %reason, "left date-like field unconverted");
                humanized.insert(key.clone(), value.clone());
                conversions.push(FieldConversion {
                    key: key.clone(),
                    outcome: FieldOutcome::LeftAsIs { reason },
                });
            }
        }
    }

    HumanizedInfo {
        info: humanized,
        conversions,
    }
}

const fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn record(value: Value) -> TickerInfo {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn converts_date_like_numbers_and_keeps_everything_else() {
        let info = record(json!({
            "symbol": "AAPL",
            "exDividendDate": 1_700_000_000,
            "lastFiscalYearEnd": 1_727_395_200,
            "regularMarketTime": 1_704_402_000.75,
            "marketCap": 2_900_000_000_000_u64,
        }));

        let humanized = humanize_timestamps(&info);

        assert_eq!(humanized.info["symbol"], "AAPL");
        assert_eq!(humanized.info["exDividendDate"], "2023-11-14 22:13:20");
        assert_eq!(humanized.info["lastFiscalYearEnd"], "2024-09-27 00:00:00");
        assert_eq!(humanized.info["regularMarketTime"], "2024-01-04 21:00:00");
        assert_eq!(humanized.info["marketCap"], 2_900_000_000_000_u64);
        assert_eq!(humanized.converted_count(), 3);
    }

    #[test]
    fn suffix_match_ignores_case() {
        assert!(is_date_like("MostRecentQuarter"));
        assert!(is_date_like("earningsTIMESTAMP"));
        assert!(is_date_like("windowStart"));
        assert!(!is_date_like("dateFormat"));
        assert!(!is_date_like("timezone"));
    }

    #[test]
    fn unconvertible_values_are_left_in_place() {
        let info = record(json!({
            "nameChangeDate": "2023-06-01",
            "isEarningsDate": true,
            "isEarningsDateEstimate": true,
            "compensationAsOfEpochDate": null,
            "earningsTimestamp": 1e300,
        }));

        let humanized = humanize_timestamps(&info);

        assert_eq!(humanized.info, info);
        assert_eq!(humanized.converted_count(), 0);
        assert_eq!(humanized.conversions.len(), 4);
        assert!(
            humanized
                .conversions
                .iter()
                .all(|conversion| conversion.key != "isEarningsDateEstimate")
        );
        assert!(humanized.conversions.iter().all(|conversion| matches!(
            conversion.outcome,
            FieldOutcome::LeftAsIs { .. }
        )));
    }

    #[test]
    fn input_order_is_preserved() {
        let info = record(json!({"zeta": 1, "alpha": 2, "firstTradeDate": 0}));
        let humanized = humanize_timestamps(&info);
        let keys: Vec<_> = humanized.info.keys().map(String::as_str).collect();
        assert_eq!(keys, ["zeta", "alpha", "firstTradeDate"]);
        assert_eq!(humanized.info["firstTradeDate"], "1970-01-01 00:00:00");
    }
}
