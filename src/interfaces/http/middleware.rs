//! Authentication middleware for Axum
//!
//! `auth_middleware` verifies the bearer access token and attaches the caller
//! as [`AuthenticatedUser`]. `require_roles` then checks the caller's role
//! against a per-route allow-list.

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use tracing::debug;

use crate::domain::{AdminRole, AuthFailure, DomainError};
use crate::infrastructure::crypto::{AccessClaims, TokenIssuer};
use crate::shared::{Clock, SharedClock};

use super::common::ApiResponse;

/// Roles allowed to manage accounts other than creating them
pub const ADMIN_MANAGERS: &[AdminRole] = &[AdminRole::SuperAdmin, AdminRole::Admin];
pub const SUPER_ADMIN_ONLY: &[AdminRole] = &[AdminRole::SuperAdmin];

#[derive(Clone)]
pub struct AuthState {
    pub issuer: TokenIssuer,
    pub clock: SharedClock,
}

/// Caller identity taken from a verified access token
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: i32,
    pub username: String,
    pub role: AdminRole,
}

impl AuthenticatedUser {
    fn from_claims(claims: &AccessClaims) -> Option<Self> {
        Some(Self {
            user_id: claims.user_id()?,
            username: claims.name.clone(),
            role: claims.admin_role()?,
        })
    }

    pub fn has_any_role(&self, allowed: &[AdminRole]) -> bool {
        allowed.contains(&self.role)
    }
}

fn extract_token(auth_header: &str) -> Option<&str> {
    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Bearer token authentication middleware
pub async fn auth_middleware(
    State(auth_state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());
    let Some(auth_header) = auth_header else {
        return auth_error_response(AuthFailure::MissingToken);
    };
    let Some(token) = extract_token(auth_header) else {
        return auth_error_response(AuthFailure::InvalidAccessToken);
    };

    let claims = match auth_state
        .issuer
        .verify_access_token(token, auth_state.clock.now())
    {
        Ok(claims) => claims,
        Err(DomainError::Unauthorized(reason)) => return auth_error_response(reason),
        Err(e) => {
            debug!(error = %e, "Access token rejected");
            return auth_error_response(AuthFailure::InvalidAccessToken);
        }
    };

    // A signed token with an unknown role or a non-numeric subject
    let Some(user) = AuthenticatedUser::from_claims(&claims) else {
        return auth_error_response(AuthFailure::InvalidAccessToken);
    };

    request.extensions_mut().insert(user);
    next.run(request).await
}

/// Role allow-list check. Must run inside `auth_middleware`.
pub async fn require_roles(
    State(allowed): State<&'static [AdminRole]>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let Some(user) = request.extensions().get::<AuthenticatedUser>() else {
        return auth_error_response(AuthFailure::MissingToken);
    };

    if !user.has_any_role(allowed) {
        debug!(user_id = user.user_id, role = %user.role, "Role not allowed for route");
        let body = Json(ApiResponse::<()>::error("Insufficient permissions"));
        return (StatusCode::FORBIDDEN, body).into_response();
    }

    next.run(request).await
}

fn auth_error_response(reason: AuthFailure) -> Response {
    let body = Json(ApiResponse::<()>::error(reason.to_string()));
    (StatusCode::UNAUTHORIZED, body).into_response()
}
