//! Prometheus scrape endpoint and per-route HTTP metrics

pub mod handlers;
pub mod middleware;

pub use handlers::*;
pub use middleware::http_metrics_middleware;
