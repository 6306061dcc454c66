//! CoinGecko public REST API client
//!
//! Stateless GET calls for spot prices and daily market charts. No
//! authentication, no rate limiting, no retries.

use crate::api::error::FetchError;
use crate::api::models::{MarketChartResponse, SimplePriceResponse};
use crate::config::ApiConfig;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

const BODY_PREVIEW_CHARS: usize = 200;

pub struct CoinGeckoClient {
    client: Client,
    base_url: String,
}

impl CoinGeckoClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("coinboard/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self, FetchError> {
        Self::new(&config.base_url, config.timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T, FetchError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("CoinGecko request: {} with params: {:?}", path, params);

        let response = self.client.get(&url).query(params).send().await?;

        let status = response.status();
        let body = response.text().await?;
        let preview: String = body.chars().take(BODY_PREVIEW_CHARS).collect();

        debug!("CoinGecko response: {} - {}", status, preview);

        if !status.is_success() {
            warn!("CoinGecko request {} failed with status {}", path, status);
            return Err(FetchError::Status {
                status: status.as_u16(),
                body: preview,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }

    /// `GET /api/v3/simple/price?ids=a,b&vs_currencies=usd`
    pub async fn simple_price(
        &self,
        ids: &[String],
        vs_currency: &str,
    ) -> Result<SimplePriceResponse, FetchError> {
        let ids = ids.join(",");
        self.get(
            "/api/v3/simple/price",
            &[("ids", ids.as_str()), ("vs_currencies", vs_currency)],
        )
        .await
    }

    /// `GET /api/v3/coins/{id}/market_chart?vs_currency=usd&days=n&interval=daily`
    pub async fn market_chart(
        &self,
        asset_id: &str,
        vs_currency: &str,
        days: u32,
    ) -> Result<MarketChartResponse, FetchError> {
        let path = format!("/api/v3/coins/{}/market_chart", asset_id);
        let days = days.to_string();
        self.get(
            &path,
            &[
                ("vs_currency", vs_currency),
                ("days", days.as_str()),
                ("interval", "daily"),
            ],
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_trimmed() {
        let client = CoinGeckoClient::new("http://localhost:1234/", Duration::from_secs(5)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:1234");
    }
}
