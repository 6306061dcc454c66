use crate::api::models::SimplePriceResponse;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpotPrice {
    pub asset_id: String,
    pub currency: String,
    pub amount: Decimal,
    /// False when the API left this asset out and `amount` is the zero default.
    pub quoted: bool,
}

/// Spot prices for the requested assets, in request order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LivePrices {
    pub currency: String,
    pub prices: Vec<SpotPrice>,
    pub fetched_at: DateTime<Utc>,
}

impl LivePrices {
    /// Pick each requested asset out of the response. Assets or currencies
    /// the API left out are reported as zero.
    pub fn from_response(response: &SimplePriceResponse, asset_ids: &[String], currency: &str) -> Self {
        let prices = asset_ids
            .iter()
            .map(|asset_id| {
                let quote = response
                    .get(asset_id)
                    .and_then(|quotes| quotes.get(currency))
                    .copied();
                if quote.is_none() {
                    warn!("No {} price for '{}' in response, using 0", currency, asset_id);
                }

                SpotPrice {
                    asset_id: asset_id.clone(),
                    currency: currency.to_string(),
                    amount: quote.unwrap_or(Decimal::ZERO),
                    quoted: quote.is_some(),
                }
            })
            .collect();

        Self {
            currency: currency.to_string(),
            prices,
            fetched_at: Utc::now(),
        }
    }

    /// Price of `asset_id`, or zero if it was not requested.
    pub fn amount(&self, asset_id: &str) -> Decimal {
        self.prices
            .iter()
            .find(|p| p.asset_id == asset_id)
            .map(|p| p.amount)
            .unwrap_or(Decimal::ZERO)
    }

    /// True when the response quoted at least one requested asset.
    pub fn has_quotes(&self) -> bool {
        self.prices.iter().any(|p| p.quoted)
    }

    pub fn to_map(&self) -> HashMap<String, Decimal> {
        self.prices
            .iter()
            .map(|p| (p.asset_id.clone(), p.amount))
            .collect()
    }
}
