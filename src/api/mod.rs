pub mod error;
pub mod models;
pub mod rest;

pub use error::FetchError;
pub use rest::CoinGeckoClient;
