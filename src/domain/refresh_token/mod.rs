//! Refresh token aggregate
//!
//! Stateful session credentials owned by an admin account.

pub mod model;
pub mod repository;

pub use model::{RefreshToken, TokenState, ACCESS_TOKEN_TTL_MINUTES, REFRESH_TOKEN_TTL_DAYS};
pub use repository::{
    RefreshTokenFilter, RefreshTokenRelation, RefreshTokenRepository, RevokeOutcome,
};
