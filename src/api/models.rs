use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;

/// `/simple/price` body: `{ "bitcoin": { "usd": 65000 }, ... }`
pub type SimplePriceResponse = HashMap<String, HashMap<String, Decimal>>;

/// `/coins/{id}/market_chart` body. Only the price column is used.
#[derive(Debug, Clone, Deserialize)]
pub struct MarketChartResponse {
    /// `[timestamp_millis, price]` pairs in chronological order
    pub prices: Vec<(f64, Decimal)>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_simple_price_parsing() {
        let json = r#"{"bitcoin":{"usd":65000},"ethereum":{"usd":3200.55}}"#;
        let response: SimplePriceResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response["bitcoin"]["usd"], dec!(65000));
        assert_eq!(response["ethereum"]["usd"], dec!(3200.55));
    }

    #[test]
    fn test_market_chart_parsing() {
        let json = r#"{
            "prices": [[1717200000000, 3780.12], [1717286400000, 3815.9]],
            "market_caps": [[1717200000000, 1.0]],
            "total_volumes": [[1717200000000, 2.0]]
        }"#;
        let response: MarketChartResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.prices.len(), 2);
        assert_eq!(response.prices[0].0 as i64, 1717200000000);
        assert_eq!(response.prices[1].1, dec!(3815.9));
    }

    #[test]
    fn test_market_chart_without_prices_is_error() {
        let json = r#"{"error":"coin not found"}"#;
        assert!(serde_json::from_str::<MarketChartResponse>(json).is_err());
    }
}
