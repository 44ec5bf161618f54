//! Admin account API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use tracing::info;

use super::dto::{CreateAdminRequest, UpdateAdminRequest};
use crate::application::identity::AdminUpdate;
use crate::application::AdminService;
use crate::domain::{AdminRole, DomainError};
use crate::interfaces::http::common::{
    domain_error, ApiError, ApiResponse, ApiResult, ValidatedJson,
};
use crate::interfaces::http::middleware::AuthenticatedUser;
use crate::interfaces::http::modules::auth::AdminUserDto;

#[derive(Clone)]
pub struct AdminHandlerState {
    pub admins: Arc<AdminService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/admins",
    tag = "Admins",
    responses(
        (status = 200, description = "Active admin accounts", body = ApiResponse<Vec<AdminUserDto>>),
        (status = 403, description = "Role not allowed")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_admins(State(state): State<AdminHandlerState>) -> ApiResult<Vec<AdminUserDto>> {
    let admins = state.admins.list_admins().await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(
        admins.into_iter().map(AdminUserDto::from).collect(),
    )))
}

#[utoipa::path(
    post,
    path = "/api/v1/admins",
    tag = "Admins",
    request_body = CreateAdminRequest,
    responses(
        (status = 201, description = "Admin created", body = ApiResponse<AdminUserDto>),
        (status = 400, description = "Invalid input or username taken"),
        (status = 403, description = "Only a SuperAdmin may create accounts")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_admin(
    State(state): State<AdminHandlerState>,
    Extension(caller): Extension<AuthenticatedUser>,
    ValidatedJson(request): ValidatedJson<CreateAdminRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AdminUserDto>>), ApiError> {
    let role = match request.role.as_deref() {
        Some(raw) => raw
            .parse::<AdminRole>()
            .map_err(|e| domain_error(DomainError::Validation(e)))?,
        None => AdminRole::default(),
    };

    let created = state
        .admins
        .create_admin(&request.username, &request.password, role)
        .await
        .map_err(domain_error)?;

    info!(by = caller.user_id, user_id = created.id, "Admin created via API");
    Ok((StatusCode::CREATED, Json(ApiResponse::success(created.into()))))
}

#[utoipa::path(
    patch,
    path = "/api/v1/admins/{id}",
    tag = "Admins",
    params(("id" = i32, Path, description = "Admin id")),
    request_body = UpdateAdminRequest,
    responses(
        (status = 200, description = "Admin updated", body = ApiResponse<AdminUserDto>),
        (status = 400, description = "Invalid input or username taken"),
        (status = 404, description = "Admin not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_admin(
    State(state): State<AdminHandlerState>,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<UpdateAdminRequest>,
) -> ApiResult<AdminUserDto> {
    let update = AdminUpdate {
        username: request.username,
        password: request.new_password,
    };
    let updated = state
        .admins
        .update_admin(id, update)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(updated.into())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/admins/{id}",
    tag = "Admins",
    params(("id" = i32, Path, description = "Admin id")),
    responses(
        (status = 200, description = "Admin and its refresh tokens deleted"),
        (status = 404, description = "Admin not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_admin(
    State(state): State<AdminHandlerState>,
    Path(id): Path<i32>,
) -> ApiResult<String> {
    state.admins.delete_admin(id).await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(format!("Admin {} deleted", id))))
}

#[utoipa::path(
    post,
    path = "/api/v1/admins/{id}/activate",
    tag = "Admins",
    params(("id" = i32, Path, description = "Admin id")),
    responses(
        (status = 200, description = "Admin activated", body = ApiResponse<AdminUserDto>),
        (status = 404, description = "Admin not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn activate_admin(
    State(state): State<AdminHandlerState>,
    Path(id): Path<i32>,
) -> ApiResult<AdminUserDto> {
    set_active(&state, id, true).await
}

#[utoipa::path(
    post,
    path = "/api/v1/admins/{id}/deactivate",
    tag = "Admins",
    params(("id" = i32, Path, description = "Admin id")),
    responses(
        (status = 200, description = "Admin deactivated", body = ApiResponse<AdminUserDto>),
        (status = 404, description = "Admin not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn deactivate_admin(
    State(state): State<AdminHandlerState>,
    Path(id): Path<i32>,
) -> ApiResult<AdminUserDto> {
    set_active(&state, id, false).await
}

async fn set_active(state: &AdminHandlerState, id: i32, active: bool) -> ApiResult<AdminUserDto> {
    let user = state
        .admins
        .set_active(id, active)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(user.into())))
}
