//! Authentication API handlers

use std::sync::Arc;

use axum::{extract::State, Extension, Json};

use super::dto::{
    AdminUserDto, LoginRequest, LoginResponse, LogoutResponse, RefreshRequest,
    RefreshTokenRequest, RefreshTokenResponse,
};
use crate::application::AuthSessionService;
use crate::interfaces::http::common::{domain_error, ApiResponse, ApiResult, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedUser;

#[derive(Clone)]
pub struct AuthHandlerState {
    pub sessions: Arc<AuthSessionService>,
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Successful login", body = ApiResponse<LoginResponse>),
        (status = 400, description = "Username or password missing"),
        (status = 401, description = "Unknown user, disabled account or wrong password")
    )
)]
pub async fn login(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<LoginResponse> {
    let result = state
        .sessions
        .login(&request.username, &request.password)
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(LoginResponse {
        access_token: result.access_token.token,
        refresh_token: result.refresh_token.token,
        user: result.user.into(),
    })))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/refresh-token",
    tag = "Authentication",
    request_body = RefreshRequest,
    responses(
        (status = 200, description = "New access token", body = ApiResponse<RefreshTokenResponse>),
        (status = 401, description = "Refresh token missing, unknown, expired or revoked")
    )
)]
pub async fn refresh_token(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<RefreshRequest>,
) -> ApiResult<RefreshTokenResponse> {
    let result = state
        .sessions
        .refresh(&request.refresh_token)
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(RefreshTokenResponse {
        access_token: result.access_token.token,
        refresh_token: result.refresh_token,
    })))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    tag = "Authentication",
    request_body = RefreshTokenRequest,
    responses(
        (status = 200, description = "Refresh token revoked", body = ApiResponse<LogoutResponse>),
        (status = 400, description = "Refresh token missing"),
        (status = 404, description = "Refresh token unknown, expired or already revoked")
    )
)]
pub async fn logout(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<RefreshTokenRequest>,
) -> ApiResult<LogoutResponse> {
    let result = state
        .sessions
        .logout(&request.refresh_token)
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(LogoutResponse {
        message: "Logged out successfully".to_string(),
        revoked_token: result.revoked_token,
    })))
}

#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    tag = "Authentication",
    responses(
        (status = 200, description = "Current account", body = ApiResponse<AdminUserDto>),
        (status = 401, description = "Missing, invalid or expired access token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_current_user(
    State(state): State<AuthHandlerState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> ApiResult<AdminUserDto> {
    let account = state
        .sessions
        .current_user(user.user_id)
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(account.into())))
}
