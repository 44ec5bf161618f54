//! HTTP REST API
//!
//! - `common`: response envelope, error mapping, validated JSON extractor
//! - `middleware`: bearer-token authentication and role allow-lists
//! - `modules`: handlers and DTOs per resource
//! - `router`: route table, middleware stack and Swagger documentation

pub mod common;
pub mod middleware;
pub mod modules;
pub mod router;

pub use common::ApiResponse;
pub use router::{create_api_router, ApiContext, ApiDoc};
