use tracing::debug;
use yfin_types::{HistoryRequest, Interval, Period};

use crate::calc::{parse_iso_date, profit_loss};
use crate::normalize::price_table;
use crate::provider::{MarketDataProvider, ProviderError};

use super::{ControlError, NO_HISTORY, REVERSED_DATE_RANGE, YfinControlPlane, error_payload};

impl<P: MarketDataProvider> YfinControlPlane<P> {
    /// Returns the price series for `symbol` as a markdown table.
    ///
    /// # Errors
    /// Returns `ControlError` if the provider call fails.
    pub async fn get_price_history(
        &self,
        symbol: &str,
        period: Period,
        interval: Interval,
    ) -> Result<String, ControlError> {
        let request = HistoryRequest::period(symbol, period, interval);
        let bars = self.provider.history(&request).await?;
        debug!(symbol, %period, %interval, bars = bars.len(), "fetched price history");
        Ok(price_table(&bars))
    }

    /// Computes profit or loss between two inclusive calendar dates.
    ///
    /// Bad dates, a reversed range, and an empty series come back as JSON
    /// error objects. A provider reporting no data for the symbol or range
    /// counts as an empty series.
    ///
    /// # Errors
    /// Returns `ControlError` if the provider call fails.
    pub async fn calculate_profit_loss(
        &self,
        symbol: &str,
        start_date: &str,
        end_date: &str,
    ) -> Result<String, ControlError> {
        let (start, end) = match (parse_iso_date(start_date), parse_iso_date(end_date)) {
            (Ok(start), Ok(end)) => (start, end),
            (Err(err), _) | (_, Err(err)) => {
                return Ok(error_payload(format!("Invalid date format: {err}")));
            }
        };

        if start >= end {
            return Ok(error_payload(REVERSED_DATE_RANGE));
        }

        let Some(end_exclusive) = end.succ_opt() else {
            return Ok(error_payload(format!(
                "Invalid date format: '{end_date}' is past the last supported date"
            )));
        };

        let request = HistoryRequest::range(symbol, start, end_exclusive, Interval::OneDay);
        let bars = match self.provider.history(&request).await {
            Ok(bars) => bars,
            Err(ProviderError::NoData(reason)) => {
                debug!(symbol, %reason, "no price history in range");
                Vec::new()
            }
            Err(err) => return Err(err.into()),
        };

        let Some(result) = profit_loss(symbol, start_date, end_date, &bars) else {
            return Ok(error_payload(NO_HISTORY));
        };

        Ok(serde_json::to_string(&result)?)
    }
}
