use rmcp::{
    ErrorData,
    handler::server::wrapper::Parameters,
    model::CallToolResult,
    schemars,
    tool,
    tool_router,
};
use serde::{Deserialize, Serialize};
use yfin_core::control::{ToolCall, dispatch::DEFAULT_TOP_N};
use yfin_core::provider::MarketDataProvider;
use yfin_types::Sector;

use crate::YfinMcp;

const fn default_top_n() -> i64 {
    DEFAULT_TOP_N
}

/// Parameters for a Yahoo Finance search.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct SearchParams {
    pub query: String,
    /// One of `all`, `quotes`, or `news`, ignoring case.
    pub search_type: String,
}

/// Parameters for sector rankings.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct GetTopParams {
    pub sector: Sector,
    /// One of `top_etfs`, `top_mutual_funds`, `top_companies`,
    /// `top_growth_companies`, or `top_performing_companies`.
    pub top_type: String,
    /// Number of entries per ranking. Must be at least 1.
    #[serde(default = "default_top_n")]
    pub top_n: i64,
}

#[tool_router(router = tool_router_market, vis = "pub")]
impl<P: MarketDataProvider> YfinMcp<P> {
    #[tool(description = "Search Yahoo Finance. Returns all results, only quotes, or only news as JSON.")]
    async fn search(
        &self,
        Parameters(params): Parameters<SearchParams>,
    ) -> Result<CallToolResult, ErrorData> {
        self.run(ToolCall::Search {
            query: params.query,
            search_type: params.search_type,
        })
        .await
    }

    #[tool(description = "Get top ETFs, mutual funds, companies, growth companies, or performing companies for a sector.")]
    async fn get_top(
        &self,
        Parameters(params): Parameters<GetTopParams>,
    ) -> Result<CallToolResult, ErrorData> {
        self.run(ToolCall::GetTop {
            sector: params.sector,
            top_type: params.top_type,
            top_n: params.top_n,
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use rmcp::model::ErrorCode;

    use super::*;
    use crate::test_support::{StubProvider, first_text};

    #[test]
    fn top_n_defaults_to_ten() {
        let params: GetTopParams = serde_json::from_value(serde_json::json!({
            "sector": "technology",
            "top_type": "top_etfs",
        }))
        .expect("params parse");
        assert_eq!(params.top_n, 10);
        assert_eq!(params.sector, Sector::Technology);
    }

    #[tokio::test]
    async fn get_top_returns_symbol_lines() {
        let server = YfinMcp::new(StubProvider::default());
        let result = server
            .get_top(Parameters(GetTopParams {
                sector: Sector::Technology,
                top_type: "top_etfs".to_string(),
                top_n: 1,
            }))
            .await
            .expect("top etfs");
        assert_eq!(first_text(&result), "XLK: Technology Select Sector SPDR Fund");
    }

    #[tokio::test]
    async fn invalid_selectors_are_text_results() {
        let server = YfinMcp::new(StubProvider::default());
        let result = server
            .get_top(Parameters(GetTopParams {
                sector: Sector::Energy,
                top_type: "top_bonds".to_string(),
                top_n: 5,
            }))
            .await
            .expect("invalid top_type is not a protocol error");
        assert_eq!(first_text(&result), "Invalid top_type");
        assert!(server.control().provider().calls.lock().expect("calls lock").is_empty());
    }

    #[tokio::test]
    async fn provider_failures_become_protocol_errors() {
        let server = YfinMcp::new(StubProvider::default());
        let err = server
            .search(Parameters(SearchParams {
                query: "Apple".to_string(),
                search_type: "quotes".to_string(),
            }))
            .await
            .expect_err("search provider is down");
        assert_eq!(err.code, ErrorCode::INTERNAL_ERROR);
        assert!(err.message.contains("search is down"));
    }
}
