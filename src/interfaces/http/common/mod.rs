//! Shared HTTP building blocks: the response envelope, domain error mapping
//! and the validating JSON extractor.

mod validated_json;

use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::domain::DomainError;

pub use validated_json::{ValidatedJson, ValidatedJsonRejection};

/// Standard API response envelope.
///
/// Success: `{"success": true, "data": {...}}`,
/// failure: `{"success": false, "data": null, "error": "message"}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Error half of every handler result
pub type ApiError = (StatusCode, Json<ApiResponse<()>>);

pub type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

pub fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(ApiResponse::error(message)))
}

/// Map a domain failure onto its HTTP status and a caller-safe message.
///
/// Internal failures are logged with their detail and reported generically.
pub fn domain_error(err: DomainError) -> ApiError {
    let status = match &err {
        DomainError::Validation(_) | DomainError::Conflict(_) => StatusCode::BAD_REQUEST,
        DomainError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        DomainError::Forbidden(_) => StatusCode::FORBIDDEN,
        DomainError::NotFound { .. } | DomainError::InvalidToken => StatusCode::NOT_FOUND,
        DomainError::Persistence(_) | DomainError::Crypto(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let message = match err {
        DomainError::Validation(msg) | DomainError::Conflict(msg) | DomainError::Forbidden(msg) => {
            msg
        }
        DomainError::Unauthorized(reason) => reason.to_string(),
        err @ (DomainError::NotFound { .. } | DomainError::InvalidToken) => err.to_string(),
        err @ (DomainError::Persistence(_) | DomainError::Crypto(_)) => {
            error!(error = %err, "Request failed with an internal error");
            "Internal server error".to_string()
        }
    };

    api_error(status, message)
}
