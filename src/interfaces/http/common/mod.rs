//! Response wrapper and error mapping shared by all handlers

pub mod validated_json;

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tracing::error;
use utoipa::ToSchema;

use crate::domain::DomainError;

pub use validated_json::ValidatedJson;

/// Message of every 500 response
pub const INTERNAL_ERROR: &str = "Internal server error";

/// Standard API response wrapper
///
/// Non-listing endpoints wrap their payload:
/// `{"success": true, "data": {...}}` on success,
/// `{"success": false, "data": null, "error": "..."}` on failure.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    /// Payload, `null` on error
    pub data: Option<T>,
    /// Error description, omitted on success
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

/// Empty payload for operations without return data
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EmptyData {}

/// Errors surfaced at the HTTP edge
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    /// Carries the raw failure, shown only in development mode
    #[error("Internal server error")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { entity, .. } => Self::NotFound(format!("{} not found", entity)),
            DomainError::Validation(message) => Self::BadRequest(message),
            DomainError::Conflict(message) => Self::Conflict(message),
            DomainError::Unauthorized(message) => Self::Unauthorized(message),
            DomainError::Database(e) => {
                error!(error = %e, "Database query failed");
                Self::Internal(e.to_string())
            }
            DomainError::Crypto(message) => {
                error!(error = %message, "Crypto operation failed");
                Self::Internal(message)
            }
        }
    }
}

/// Raw failure message attached to 500 responses as an extension
#[derive(Debug, Clone)]
pub struct ErrorDetail(pub String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let mut response =
            (status, Json(ApiResponse::<()>::error(self.to_string()))).into_response();
        if let Self::Internal(detail) = self {
            response.extensions_mut().insert(ErrorDetail(detail));
        }
        response
    }
}

pub type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

/// Whether 500 responses include the raw failure message
#[derive(Debug, Clone, Copy)]
pub struct ErrorExposure {
    pub expose_detail: bool,
}

/// Adds `"detail"` to 500 bodies when detail exposure is enabled.
pub async fn error_detail_middleware(
    State(exposure): State<ErrorExposure>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;
    let Some(ErrorDetail(detail)) = response.extensions_mut().remove::<ErrorDetail>() else {
        return response;
    };
    if !exposure.expose_detail {
        return response;
    }

    let body = Json(json!({
        "success": false,
        "data": null,
        "error": INTERNAL_ERROR,
        "detail": detail,
    }));
    (response.status(), body).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_map_to_status() {
        let cases = [
            (DomainError::not_found("Course", "id", 1), StatusCode::NOT_FOUND),
            (DomainError::Validation("bad".into()), StatusCode::BAD_REQUEST),
            (DomainError::Conflict("dup".into()), StatusCode::CONFLICT),
            (DomainError::Unauthorized("no".into()), StatusCode::UNAUTHORIZED),
            (
                DomainError::Database(sea_orm::DbErr::Custom("boom".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status(), status);
        }
    }

    #[test]
    fn internal_error_hides_message_but_keeps_detail() {
        let err = ApiError::from(DomainError::Database(sea_orm::DbErr::Custom("boom".into())));
        assert_eq!(err.to_string(), INTERNAL_ERROR);

        let response = err.into_response();
        let detail = response.extensions().get::<ErrorDetail>().unwrap();
        assert!(detail.0.contains("boom"));
    }

    #[test]
    fn not_found_names_the_entity() {
        let err = ApiError::from(DomainError::not_found("Professor", "id", 9));
        assert_eq!(err.to_string(), "Professor not found");
    }
}
