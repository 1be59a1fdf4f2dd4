use std::{error::Error, fmt, sync::Arc};

use serde_json::json;

use crate::provider::{MarketDataProvider, ProviderError};

pub mod dispatch;
pub mod history;
pub mod search;
pub mod ticker;
pub mod top;

pub use dispatch::{ToolCall, ToolName};

pub const INVALID_SEARCH_TYPE: &str = "Invalid output_type. Use 'all', 'quotes', or 'news'.";
pub const INVALID_TOP_N: &str = "top_n must be greater than 0";
pub const INVALID_TOP_TYPE: &str = "Invalid top_type";
pub const REVERSED_DATE_RANGE: &str = "start_date must be earlier than end_date";
pub const NO_HISTORY: &str = "No historical data available for the given symbol and date range. \
Please verify the symbol and that the dates fall on trading days.";

#[derive(Debug)]
pub enum ControlError {
    Provider(ProviderError),
    Serialize(serde_json::Error),
    UnknownTool(String),
    InvalidArguments { tool: &'static str, message: String },
}

impl fmt::Display for ControlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Provider(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "failed to serialize tool output: {err}"),
            Self::UnknownTool(name) => write!(f, "unknown tool: {name}"),
            Self::InvalidArguments { tool, message } => {
                write!(f, "invalid arguments for {tool}: {message}")
            }
        }
    }
}

impl Error for ControlError {}

impl From<ProviderError> for ControlError {
    fn from(err: ProviderError) -> Self {
        Self::Provider(err)
    }
}

impl From<serde_json::Error> for ControlError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialize(err)
    }
}

/// Tool operations over a market-data provider.
///
/// Every operation returns the exact text handed back to the MCP client.
/// Argument problems the caller can fix come back as text, not as errors.
pub struct YfinControlPlane<P: MarketDataProvider> {
    provider: Arc<P>,
}

impl<P: MarketDataProvider> Clone for YfinControlPlane<P> {
    fn clone(&self) -> Self {
        Self {
            provider: self.provider.clone(),
        }
    }
}

impl<P: MarketDataProvider> YfinControlPlane<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider: Arc::new(provider),
        }
    }

    pub const fn from_arc(provider: Arc<P>) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }
}

/// Renders `{"error": message}`.
pub(crate) fn error_payload(message: impl Into<String>) -> String {
    json!({ "error": message.into() }).to_string()
}
