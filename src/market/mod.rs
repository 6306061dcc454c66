//! Read-through caches in front of the CoinGecko client.

use crate::api::{CoinGeckoClient, FetchError};
use crate::cache::TtlCache;
use crate::config::Config;
use crate::data::{HistoricalSeries, LivePrices};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

pub struct MarketData {
    client: CoinGeckoClient,
    asset_ids: Vec<String>,
    vs_currency: String,
    prices: TtlCache<(), LivePrices>,
    history: TtlCache<(String, u32), HistoricalSeries>,
}

impl MarketData {
    pub fn new(client: CoinGeckoClient, asset_ids: Vec<String>, vs_currency: &str, ttl: Duration) -> Self {
        Self {
            client,
            asset_ids,
            vs_currency: vs_currency.to_string(),
            prices: TtlCache::new(ttl),
            history: TtlCache::new(ttl),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, FetchError> {
        let client = CoinGeckoClient::from_config(&config.api)?;
        Ok(Self::new(
            client,
            config.dashboard.asset_ids(),
            &config.api.vs_currency,
            config.cache.ttl(),
        ))
    }

    pub fn vs_currency(&self) -> &str {
        &self.vs_currency
    }

    pub fn asset_ids(&self) -> &[String] {
        &self.asset_ids
    }

    /// Spot prices for the configured assets.
    pub async fn live_prices(&self) -> Result<Arc<LivePrices>, FetchError> {
        self.prices
            .get_or_try_fetch((), || async {
                let response = self
                    .client
                    .simple_price(&self.asset_ids, &self.vs_currency)
                    .await
                    .inspect_err(|e| error!("Error fetching live prices: {}", e))?;

                let prices = LivePrices::from_response(&response, &self.asset_ids, &self.vs_currency);
                info!("Fetched live prices for {} assets", prices.prices.len());
                Ok::<_, FetchError>(prices)
            })
            .await
    }

    /// Daily prices for `asset_id` over the last `days` days.
    pub async fn history(&self, asset_id: &str, days: u32) -> Result<Arc<HistoricalSeries>, FetchError> {
        validate_asset_id(asset_id)?;
        if days == 0 {
            return Err(FetchError::InvalidRequest("days must be greater than zero".to_string()));
        }

        self.history
            .get_or_try_fetch((asset_id.to_string(), days), || async {
                let response = self
                    .client
                    .market_chart(asset_id, &self.vs_currency, days)
                    .await
                    .inspect_err(|e| error!("Error fetching historical data for {}: {}", asset_id, e))?;

                let series = HistoricalSeries::from_market_chart(asset_id, &response);
                info!("Fetched {} daily prices for {} ({}d)", series.len(), asset_id, days);
                Ok::<_, FetchError>(series)
            })
            .await
    }
}

/// CoinGecko ids are lowercase slugs such as `bitcoin` or `wrapped-bitcoin`.
pub fn validate_asset_id(asset_id: &str) -> Result<(), FetchError> {
    let valid = !asset_id.is_empty()
        && asset_id
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');

    if valid {
        Ok(())
    } else {
        Err(FetchError::InvalidRequest(format!("unsupported asset id '{}'", asset_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_asset_id() {
        assert!(validate_asset_id("bitcoin").is_ok());
        assert!(validate_asset_id("wrapped-bitcoin").is_ok());
        assert!(validate_asset_id("1inch").is_ok());
        assert!(validate_asset_id("").is_err());
        assert!(validate_asset_id("Bitcoin").is_err());
        assert!(validate_asset_id("../simple/price").is_err());
        assert!(validate_asset_id("bit coin").is_err());
    }

    #[tokio::test]
    async fn test_invalid_history_request_skips_network() {
        // Nothing listens here; a network call would surface as Transport.
        let client = CoinGeckoClient::new("http://127.0.0.1:9", Duration::from_secs(1)).unwrap();
        let market = MarketData::new(client, vec!["bitcoin".into()], "usd", Duration::from_secs(300));

        assert!(matches!(
            market.history("ethereum", 0).await,
            Err(FetchError::InvalidRequest(_))
        ));
        assert!(matches!(
            market.history("ETH", 7).await,
            Err(FetchError::InvalidRequest(_))
        ));
    }
}
