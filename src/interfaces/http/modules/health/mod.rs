//! Liveness and database readiness

pub mod handlers;

pub use handlers::*;
