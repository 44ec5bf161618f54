//! Authentication module: login, refresh-token, logout, current user

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
