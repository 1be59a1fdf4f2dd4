//! MCP server implementation for yfin-mcp.
//!
//! This crate wires the control plane into rmcp tool handlers and exposes the
//! market-data tools over stdio and streamable HTTP.

mod helpers;
mod tools;
pub mod server;

use rmcp::{
    ErrorData,
    ServerHandler,
    handler::server::tool::ToolRouter,
    tool,
    tool_handler,
    tool_router,
};
use rmcp::model::{CallToolResult, Content, ServerCapabilities, ServerInfo};
use yfin_core::control::{ToolCall, YfinControlPlane};
use yfin_core::provider::MarketDataProvider;

pub use tools::history::{PriceHistoryParams, ProfitLossParams};
pub use tools::market::{GetTopParams, SearchParams};
pub use tools::ticker::SymbolParams;

const SERVER_INSTRUCTIONS: &str = r"yfin-mcp provides MCP tools for Yahoo Finance market data.

Tools:
- `get_ticker_info` returns the ticker profile as JSON. Date-like fields are rendered as `YYYY-MM-DD HH:MM:SS` in UTC.
- `get_ticker_news` returns recent news as text blocks.
- `search` runs a Yahoo Finance search. `search_type` is `all`, `quotes`, or `news`.
- `get_top` returns sector rankings. `top_type` is one of `top_etfs`, `top_mutual_funds`,
  `top_companies`, `top_growth_companies`, or `top_performing_companies`; `top_n` defaults to 10.
- `get_price_history` returns a markdown table of OHLCV bars for a period and interval.
- `calculate_profit_loss` compares the first and last close between two `YYYY-MM-DD` dates, both inclusive.

Notes:
- Sector keys are kebab-case, for example `technology` or `financial-services`.
- Grouped rankings query every industry in the sector; an industry that fails is reported with an `error` field.
- `health` returns `ok`.";

/// MCP server wrapper around the control plane and tool routers.
pub struct YfinMcp<P: MarketDataProvider> {
    tool_router: ToolRouter<Self>,
    control: YfinControlPlane<P>,
}

impl<P: MarketDataProvider> Clone for YfinMcp<P> {
    fn clone(&self) -> Self {
        Self {
            tool_router: self.tool_router.clone(),
            control: self.control.clone(),
        }
    }
}

impl<P: MarketDataProvider> YfinMcp<P> {
    /// Creates a new server that owns its provider.
    #[must_use]
    pub fn new(provider: P) -> Self {
        Self::with_control(YfinControlPlane::new(provider))
    }

    /// Creates a new server over a shared control plane.
    #[must_use]
    pub fn with_control(control: YfinControlPlane<P>) -> Self {
        let tool_router = Self::tool_router_core()
            + Self::tool_router_ticker()
            + Self::tool_router_market()
            + Self::tool_router_history();
        Self {
            tool_router,
            control,
        }
    }

    pub const fn control(&self) -> &YfinControlPlane<P> {
        &self.control
    }

    pub(crate) async fn run(&self, call: ToolCall) -> Result<CallToolResult, ErrorData> {
        let text = self.control.dispatch(call).await.map_err(helpers::map_err)?;
        Ok(helpers::text_result(text))
    }
}

#[tool_router(router = tool_router_core, vis = "pub")]
impl<P: MarketDataProvider> YfinMcp<P> {
    #[tool(description = "Health check. Returns 'ok'.")]
    async fn health(&self) -> Result<CallToolResult, ErrorData> {
        Ok(CallToolResult::success(vec![Content::text("ok")]))
    }
}

#[tool_handler]
impl<P: MarketDataProvider> ServerHandler for YfinMcp<P> {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(SERVER_INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .build(),
            ..Default::default()
        }
    }
}
