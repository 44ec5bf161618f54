use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAdminRequest {
    #[serde(default)]
    #[validate(length(
        min = 1,
        max = 50,
        message = "username must be 1-50 characters"
    ))]
    pub username: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
    /// `SuperAdmin`, `Admin` or `Employee`; defaults to `Admin`
    pub role: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAdminRequest {
    #[validate(length(
        min = 1,
        max = 50,
        message = "username must be 1-50 characters"
    ))]
    pub username: Option<String>,
    #[validate(length(min = 1, message = "newPassword must not be empty"))]
    pub new_password: Option<String>,
}
