use tracing::debug;

use crate::normalize::{format_news, humanize_timestamps};
use crate::provider::MarketDataProvider;

use super::{ControlError, YfinControlPlane};

impl<P: MarketDataProvider> YfinControlPlane<P> {
    /// Returns the ticker profile as JSON with date-like fields humanized.
    ///
    /// # Errors
    /// Returns `ControlError` if the provider call fails.
    pub async fn get_ticker_info(&self, symbol: &str) -> Result<String, ControlError> {
        let info = self.provider.ticker_info(symbol).await?;
        let humanized = humanize_timestamps(&info);
        debug!(
            symbol,
            fields = humanized.info.len(),
            converted = humanized.converted_count(),
            "humanized ticker info"
        );
        Ok(serde_json::to_string(&humanized.info)?)
    }

    /// Returns recent news for the ticker as text blocks.
    ///
    /// # Errors
    /// Returns `ControlError` if the provider call fails.
    pub async fn get_ticker_news(&self, symbol: &str) -> Result<String, ControlError> {
        let news = self.provider.ticker_news(symbol).await?;
        Ok(format_news(symbol, &news))
    }
}
