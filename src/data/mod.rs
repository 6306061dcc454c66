pub mod history;
pub mod price;

pub use history::{HistoricalSeries, PricePoint};
pub use price::{LivePrices, SpotPrice};
