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

use crate::YfinMcp;

/// Parameters for single-ticker lookups.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct SymbolParams {
    /// Ticker symbol, for example `AAPL` or `NESN.SW`.
    pub symbol: String,
}

#[tool_router(router = tool_router_ticker, vis = "pub")]
impl<P: MarketDataProvider> YfinMcp<P> {
    #[tool(description = "Get ticker profile and quote details as JSON, with date fields rendered in UTC.")]
    async fn get_ticker_info(
        &self,
        Parameters(params): Parameters<SymbolParams>,
    ) -> Result<CallToolResult, ErrorData> {
        self.run(ToolCall::GetTickerInfo {
            symbol: params.symbol,
        })
        .await
    }

    #[tool(description = "Get recent news for a ticker as text.")]
    async fn get_ticker_news(
        &self,
        Parameters(params): Parameters<SymbolParams>,
    ) -> Result<CallToolResult, ErrorData> {
        self.run(ToolCall::GetTickerNews {
            symbol: params.symbol,
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{StubProvider, first_text};

    #[tokio::test]
    async fn ticker_info_is_humanized_json() {
        let server = YfinMcp::new(StubProvider::default());
        let result = server
            .get_ticker_info(Parameters(SymbolParams {
                symbol: "AAPL".to_string(),
            }))
            .await
            .expect("ticker info");
        let info: serde_json::Value =
            serde_json::from_str(&first_text(&result)).expect("ticker info is JSON");
        assert_eq!(info["regularMarketTime"], "2024-01-04 21:00:00");
    }

    #[tokio::test]
    async fn empty_news_is_plain_text() {
        let server = YfinMcp::new(StubProvider::default());
        let result = server
            .get_ticker_news(Parameters(SymbolParams {
                symbol: "ZZZZ".to_string(),
            }))
            .await
            .expect("ticker news");
        assert_eq!(first_text(&result), "No news found for ZZZZ");
    }
}
