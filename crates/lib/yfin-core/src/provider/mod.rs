//! Market-data provider contract and implementations.
//!
//! The control plane only talks to a provider through `MarketDataProvider`;
//! `yahoo` holds the HTTP implementation used by the daemon.

pub mod yahoo;

use std::error::Error;
use std::fmt;
use std::future::Future;
use std::pin::Pin;

use yfin_types::{
    HistoryRequest,
    IndustryOverview,
    NewsItem,
    PriceBar,
    SearchResults,
    Sector,
    SectorOverview,
    TickerInfo,
};

pub use yahoo::{YahooConfig, YahooProvider};

pub type ProviderResult<T> = Result<T, ProviderError>;
pub type ProviderFuture<'a, T> = Pin<Box<dyn Future<Output = ProviderResult<T>> + Send + 'a>>;

#[derive(Debug)]
pub enum ProviderError {
    InvalidRequest(String),
    Transport(String),
    Status { status: u16, url: String },
    Auth(String),
    Upstream(String),
    /// The provider has no data for the request, such as an unknown symbol
    /// or a range outside the available history.
    NoData(String),
    Decode(String),
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRequest(message) => write!(f, "invalid provider request: {message}"),
            Self::Transport(message) => write!(f, "provider transport error: {message}"),
            Self::Status { status, url } => write!(f, "provider returned status {status} for {url}"),
            Self::Auth(message) => write!(f, "provider authentication failed: {message}"),
            Self::Upstream(message) => write!(f, "provider error: {message}"),
            Self::NoData(message) => write!(f, "no provider data: {message}"),
            Self::Decode(message) => write!(f, "failed to decode provider payload: {message}"),
        }
    }
}

impl Error for ProviderError {}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

/// Source of ticker, search, sector, industry, and price data.
///
/// Every call is a single round trip; implementations do not retry.
pub trait MarketDataProvider: Send + Sync + 'static {
    fn ticker_info<'a>(&'a self, symbol: &'a str) -> ProviderFuture<'a, TickerInfo>;

    fn ticker_news<'a>(&'a self, symbol: &'a str) -> ProviderFuture<'a, Vec<NewsItem>>;

    fn search<'a>(&'a self, query: &'a str) -> ProviderFuture<'a, SearchResults>;

    fn sector(&self, sector: Sector) -> ProviderFuture<'_, SectorOverview>;

    fn industry<'a>(&'a self, industry: &'a str) -> ProviderFuture<'a, IndustryOverview>;

    /// Fetches bars ordered by timestamp ascending.
    fn history<'a>(&'a self, request: &'a HistoryRequest) -> ProviderFuture<'a, Vec<PriceBar>>;
}
