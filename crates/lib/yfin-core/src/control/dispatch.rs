use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::debug;
use yfin_types::{Interval, Period, SearchType, Sector, TopType};

use crate::provider::MarketDataProvider;

use super::{ControlError, INVALID_SEARCH_TYPE, INVALID_TOP_TYPE, YfinControlPlane};

pub const DEFAULT_TOP_N: i64 = 10;

const fn default_top_n() -> i64 {
    DEFAULT_TOP_N
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolName {
    GetTickerInfo,
    GetTickerNews,
    Search,
    GetTop,
    GetPriceHistory,
    CalculateProfitLoss,
}

impl ToolName {
    pub const ALL: &'static [Self] = &[
        Self::GetTickerInfo,
        Self::GetTickerNews,
        Self::Search,
        Self::GetTop,
        Self::GetPriceHistory,
        Self::CalculateProfitLoss,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GetTickerInfo => "get_ticker_info",
            Self::GetTickerNews => "get_ticker_news",
            Self::Search => "search",
            Self::GetTop => "get_top",
            Self::GetPriceHistory => "get_price_history",
            Self::CalculateProfitLoss => "calculate_profit_loss",
        }
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolName {
    type Err = ControlError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|tool| tool.as_str() == value)
            .ok_or_else(|| ControlError::UnknownTool(value.to_string()))
    }
}

/// A tool invocation with its arguments.
///
/// Sectors, periods, and intervals are closed sets checked while decoding.
/// `search_type` and `top_type` stay as text so an unknown selector produces
/// the tool's own message instead of a decode failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "name", content = "arguments", rename_all = "snake_case")]
pub enum ToolCall {
    GetTickerInfo {
        symbol: String,
    },
    GetTickerNews {
        symbol: String,
    },
    Search {
        query: String,
        search_type: String,
    },
    GetTop {
        sector: Sector,
        top_type: String,
        #[serde(default = "default_top_n")]
        top_n: i64,
    },
    GetPriceHistory {
        symbol: String,
        #[serde(default)]
        period: Period,
        #[serde(default)]
        interval: Interval,
    },
    CalculateProfitLoss {
        symbol: String,
        start_date: String,
        end_date: String,
    },
}

impl ToolCall {
    #[must_use]
    pub const fn name(&self) -> ToolName {
        match self {
            Self::GetTickerInfo { .. } => ToolName::GetTickerInfo,
            Self::GetTickerNews { .. } => ToolName::GetTickerNews,
            Self::Search { .. } => ToolName::Search,
            Self::GetTop { .. } => ToolName::GetTop,
            Self::GetPriceHistory { .. } => ToolName::GetPriceHistory,
            Self::CalculateProfitLoss { .. } => ToolName::CalculateProfitLoss,
        }
    }

    /// Decodes a call from a tool name and its JSON arguments.
    ///
    /// # Errors
    /// Returns `ControlError::UnknownTool` for an unrecognized name and
    /// `ControlError::InvalidArguments` when the arguments do not fit the tool.
    pub fn from_parts(name: &str, arguments: Value) -> Result<Self, ControlError> {
        let tool: ToolName = name.parse()?;
        serde_json::from_value(json!({ "name": tool.as_str(), "arguments": arguments })).map_err(
            |err| ControlError::InvalidArguments {
                tool: tool.as_str(),
                message: err.to_string(),
            },
        )
    }
}

impl<P: MarketDataProvider> YfinControlPlane<P> {
    /// Routes a decoded call to its operation.
    ///
    /// # Errors
    /// Returns `ControlError` when the operation's provider call fails.
    pub async fn dispatch(&self, call: ToolCall) -> Result<String, ControlError> {
        debug!(tool = %call.name(), "dispatching tool call");
        match call {
            ToolCall::GetTickerInfo { symbol } => self.get_ticker_info(&symbol).await,
            ToolCall::GetTickerNews { symbol } => self.get_ticker_news(&symbol).await,
            ToolCall::Search { query, search_type } => {
                match SearchType::parse_selector(&search_type) {
                    Ok(search_type) => self.search(&query, search_type).await,
                    Err(_) => Ok(INVALID_SEARCH_TYPE.to_string()),
                }
            }
            ToolCall::GetTop {
                sector,
                top_type,
                top_n,
            } => match top_type.parse::<TopType>() {
                Ok(top_type) => self.get_top(sector, top_type, top_n).await,
                Err(_) => Ok(INVALID_TOP_TYPE.to_string()),
            },
            ToolCall::GetPriceHistory {
                symbol,
                period,
                interval,
            } => self.get_price_history(&symbol, period, interval).await,
            ToolCall::CalculateProfitLoss {
                symbol,
                start_date,
                end_date,
            } => {
                self.calculate_profit_loss(&symbol, &start_date, &end_date)
                    .await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_names_round_trip() {
        for tool in ToolName::ALL {
            assert_eq!(tool.as_str().parse::<ToolName>().ok(), Some(*tool));
        }
        assert!(matches!(
            "get_quote".parse::<ToolName>(),
            Err(ControlError::UnknownTool(name)) if name == "get_quote"
        ));
    }

    #[test]
    fn from_parts_applies_defaults() {
        let call = ToolCall::from_parts("get_price_history", json!({ "symbol": "AAPL" }))
            .expect("defaults fill period and interval");
        assert_eq!(
            call,
            ToolCall::GetPriceHistory {
                symbol: "AAPL".to_string(),
                period: Period::OneMonth,
                interval: Interval::OneDay,
            }
        );

        let call = ToolCall::from_parts(
            "get_top",
            json!({ "sector": "technology", "top_type": "top_etfs" }),
        )
        .expect("top_n defaults");
        assert!(matches!(call, ToolCall::GetTop { top_n: DEFAULT_TOP_N, .. }));
    }

    #[test]
    fn from_parts_rejects_values_outside_closed_sets() {
        let err = ToolCall::from_parts(
            "get_top",
            json!({ "sector": "crypto", "top_type": "top_etfs" }),
        )
        .expect_err("crypto is not a sector");
        assert!(matches!(err, ControlError::InvalidArguments { tool: "get_top", .. }));

        let err = ToolCall::from_parts(
            "get_price_history",
            json!({ "symbol": "AAPL", "period": "2mo" }),
        )
        .expect_err("2mo is not a period");
        assert!(matches!(err, ControlError::InvalidArguments { .. }));
    }

    #[test]
    fn selectors_stay_textual() {
        let call = ToolCall::from_parts(
            "search",
            json!({ "query": "Apple", "search_type": "videos" }),
        )
        .expect("selector is validated at dispatch");
        assert_eq!(call.name(), ToolName::Search);
    }
}
