pub mod banner;
pub mod header;
pub mod metrics;

pub use banner::{BannerKind, BannerWidget};
pub use header::HeaderWidget;
pub use metrics::MetricsWidget;
