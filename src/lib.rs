pub mod api;
pub mod cache;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod market;
pub mod ui;
pub mod web;

pub use config::Config;
