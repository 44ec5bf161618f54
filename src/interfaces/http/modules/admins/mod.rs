//! Admin account management: SuperAdmin/Admin only

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
