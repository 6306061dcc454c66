use crate::api::models::MarketChartResponse;
use chrono::{DateTime, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: Decimal,
}

/// Daily prices for one asset, in the order the API returned them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoricalSeries {
    pub asset_id: String,
    pub points: Vec<PricePoint>,
}

impl HistoricalSeries {
    pub fn new(asset_id: &str, points: Vec<PricePoint>) -> Self {
        Self {
            asset_id: asset_id.to_string(),
            points,
        }
    }

    /// One point per `[timestamp_millis, price]` pair, timestamp truncated to
    /// its UTC date. Pairs with an unrepresentable timestamp are skipped.
    pub fn from_market_chart(asset_id: &str, response: &MarketChartResponse) -> Self {
        let points = response
            .prices
            .iter()
            .filter_map(|(timestamp_ms, price)| {
                let date = DateTime::from_timestamp_millis(*timestamp_ms as i64)?.date_naive();
                Some(PricePoint { date, price: *price })
            })
            .collect();

        Self::new(asset_id, points)
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }

    /// Lowest and highest price in the series.
    pub fn price_range(&self) -> Option<(Decimal, Decimal)> {
        let mut iter = self.points.iter().map(|p| p.price);
        let first = iter.next()?;
        Some(iter.fold((first, first), |(min, max), price| (min.min(price), max.max(price))))
    }

    /// Points with strictly ascending dates, as chart widgets require. A later
    /// sample for the same date replaces the earlier one; samples that go
    /// back in time are dropped.
    pub fn chart_points(&self) -> Vec<&PricePoint> {
        let mut points: Vec<&PricePoint> = Vec::with_capacity(self.points.len());
        for point in &self.points {
            match points.last().map(|last| last.date) {
                Some(date) if date == point.date => {
                    if let Some(last) = points.last_mut() {
                        *last = point;
                    }
                }
                Some(date) if date > point.date => {}
                _ => points.push(point),
            }
        }
        points
    }

    /// `(days since first point, price)` pairs for plotting.
    pub fn plot_points(&self) -> Vec<(f64, f64)> {
        let points = self.chart_points();
        let Some(origin) = points.first().map(|p| p.date) else {
            return Vec::new();
        };

        points
            .into_iter()
            .map(|p| {
                let x = (p.date - origin).num_days() as f64;
                (x, p.price.to_f64().unwrap_or(0.0))
            })
            .collect()
    }
}
