use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::params::{Interval, Period};

/// Provider-defined ticker profile. Keys keep the provider's order.
pub type TickerInfo = Map<String, Value>;

/// News article attached to a ticker.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewsItem {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Publication time in epoch seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related_tickers: Vec<String>,
}

/// Raw search response split by result kind.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SearchResults {
    pub quotes: Vec<Value>,
    pub news: Vec<Value>,
    pub lists: Vec<Value>,
    pub research: Vec<Value>,
    pub nav: Vec<Value>,
}

/// Entry in a provider ranking list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RankedEntity {
    pub symbol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ytd_return: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub growth_estimate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_price: Option<f64>,
}

impl RankedEntity {
    #[must_use]
    pub fn new(symbol: impl Into<String>, name: Option<String>) -> Self {
        Self {
            symbol: symbol.into(),
            name,
            rating: None,
            market_weight: None,
            ytd_return: None,
            growth_estimate: None,
            last_price: None,
            target_price: None,
        }
    }
}

/// Sector-level rankings returned by the provider.
///
/// `top_companies` is `None` when the provider did not return the table.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SectorOverview {
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub top_etfs: Vec<RankedEntity>,
    pub top_mutual_funds: Vec<RankedEntity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_companies: Option<Vec<RankedEntity>>,
}

/// Industry-level rankings returned by the provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct IndustryOverview {
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_growth_companies: Option<Vec<RankedEntity>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_performing_companies: Option<Vec<RankedEntity>>,
}

/// Time window for a price history request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryWindow {
    /// Relative window ending now.
    Period(Period),
    /// Calendar range, `start` inclusive and `end` exclusive.
    Range { start: NaiveDate, end: NaiveDate },
}

/// Price history request sent to the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRequest {
    pub symbol: String,
    pub window: HistoryWindow,
    pub interval: Interval,
}

impl HistoryRequest {
    #[must_use]
    pub fn period(symbol: impl Into<String>, period: Period, interval: Interval) -> Self {
        Self {
            symbol: symbol.into(),
            window: HistoryWindow::Period(period),
            interval,
        }
    }

    #[must_use]
    pub fn range(
        symbol: impl Into<String>,
        start: NaiveDate,
        end: NaiveDate,
        interval: Interval,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            window: HistoryWindow::Range { start, end },
            interval,
        }
    }
}

/// Single OHLCV bar, stamped in the exchange's offset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriceBar {
    pub timestamp: DateTime<FixedOffset>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
    #[serde(default)]
    pub dividends: f64,
    #[serde(default)]
    pub stock_splits: f64,
}

/// Profit or loss of holding a symbol between two dates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProfitLossResult {
    pub symbol: String,
    pub start_date: String,
    pub end_date: String,
    pub start_price: f64,
    pub end_price: f64,
    pub profit_loss: f64,
    /// `None` when the start price is zero.
    pub percent_change: Option<f64>,
}
