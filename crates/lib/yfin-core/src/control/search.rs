use yfin_types::SearchType;

use crate::provider::MarketDataProvider;

use super::{ControlError, YfinControlPlane};

impl<P: MarketDataProvider> YfinControlPlane<P> {
    /// Runs one provider search and returns the selected part as JSON.
    ///
    /// # Errors
    /// Returns `ControlError` if the provider call fails.
    pub async fn search(
        &self,
        query: &str,
        search_type: SearchType,
    ) -> Result<String, ControlError> {
        let results = self.provider.search(query).await?;
        let json = match search_type {
            SearchType::All => serde_json::to_string(&results)?,
            SearchType::Quotes => serde_json::to_string(&results.quotes)?,
            SearchType::News => serde_json::to_string(&results.news)?,
        };
        Ok(json)
    }
}
