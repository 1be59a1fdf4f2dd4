use rmcp::{
    ErrorData,
    handler::server::wrapper::Parameters,
    model::CallToolResult,
    schemars,
    tool,
    tool_router,
};
use serde::{Deserialize, Serialize};
use yfin_core::control::ToolCall;
use yfin_core::provider::MarketDataProvider;
use yfin_types::{Interval, Period};

use crate::YfinMcp;

/// Parameters for a price history table.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct PriceHistoryParams {
    pub symbol: String,
    #[serde(default)]
    pub period: Period,
    #[serde(default)]
    pub interval: Interval,
}

/// Parameters for a profit/loss calculation. Dates are `YYYY-MM-DD`.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ProfitLossParams {
    pub symbol: String,
    pub start_date: String,
    pub end_date: String,
}

#[tool_router(router = tool_router_history, vis = "pub")]
impl<P: MarketDataProvider> YfinMcp<P> {
    #[tool(description = "Get historical OHLCV bars as a markdown table. Defaults to period '1mo' and interval '1d'.")]
    async fn get_price_history(
        &self,
        Parameters(params): Parameters<PriceHistoryParams>,
    ) -> Result<CallToolResult, ErrorData> {
        self.run(ToolCall::GetPriceHistory {
            symbol: params.symbol,
            period: params.period,
            interval: params.interval,
        })
        .await
    }

    #[tool(description = "Calculate profit or loss between two dates (inclusive) from the first and last daily close.")]
    async fn calculate_profit_loss(
        &self,
        Parameters(params): Parameters<ProfitLossParams>,
    ) -> Result<CallToolResult, ErrorData> {
        self.run(ToolCall::CalculateProfitLoss {
            symbol: params.symbol,
            start_date: params.start_date,
            end_date: params.end_date,
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{StubProvider, first_text};

    #[test]
    fn period_and_interval_default() {
        let params: PriceHistoryParams =
            serde_json::from_value(serde_json::json!({ "symbol": "AAPL" })).expect("params parse");
        assert_eq!(params.period, Period::OneMonth);
        assert_eq!(params.interval, Interval::OneDay);
    }

    #[tokio::test]
    async fn reversed_range_skips_the_provider() {
        let server = YfinMcp::new(StubProvider::default());
        let result = server
            .calculate_profit_loss(Parameters(ProfitLossParams {
                symbol: "AAPL".to_string(),
                start_date: "2024-03-01".to_string(),
                end_date: "2024-02-01".to_string(),
            }))
            .await
            .expect("validation is in-band");
        assert_eq!(
            first_text(&result),
            r#"{"error":"start_date must be earlier than end_date"}"#
        );
        assert!(server.control().provider().calls.lock().expect("calls lock").is_empty());
    }

    #[tokio::test]
    async fn empty_history_still_renders_a_header() {
        let server = YfinMcp::new(StubProvider::default());
        let result = server
            .get_price_history(Parameters(PriceHistoryParams {
                symbol: "AAPL".to_string(),
                period: Period::FiveDays,
                interval: Interval::OneHour,
            }))
            .await
            .expect("price history");
        assert!(first_text(&result).contains("Stock Splits"));
    }
}
