pub mod app;
pub mod charts;
pub mod widgets;

pub use app::{draw_dashboard, App};
