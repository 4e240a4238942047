//! API error type and its mapping onto HTTP responses.
//!
//! Every handler returns [`AppResult`]; conversions from [`CoreError`] and
//! [`sqlx::Error`] let `?` carry domain and database failures straight to
//! the wire with a consistent JSON body: `{"error": ..., "code": ...}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use assetdesk_core::error::CoreError;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::Core(core) => match core {
                CoreError::NotFound { .. } => {
                    (StatusCode::NOT_FOUND, "NOT_FOUND", core.to_string())
                }
                CoreError::Validation(_) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", core.to_string())
                }
                CoreError::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT", core.to_string()),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "Internal server error".to_string(),
                    )
                }
            },
            AppError::Database(err) => classify_sqlx_error(err),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Internal server error".to_string(),
                )
            }
        };
        (status, Json(json!({ "error": message, "code": code }))).into_response()
    }
}

/// Map database failures to client-facing responses without leaking SQL.
///
/// Named-constraint violations become 409s the client can act on; anything
/// else is logged and sanitized to a generic 500.
fn classify_sqlx_error(err: sqlx::Error) -> (StatusCode, &'static str, String) {
    match &err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            let constraint = db_err.constraint().unwrap_or("");
            if db_err.code().as_deref() == Some("23505") && constraint.starts_with("uq_") {
                return (
                    StatusCode::CONFLICT,
                    "CONFLICT",
                    format!("Duplicate value violates unique constraint: {constraint}"),
                );
            }
            if db_err.code().as_deref() == Some("23503") && constraint.starts_with("fk_") {
                return (
                    StatusCode::CONFLICT,
                    "CONFLICT",
                    format!("Operation violates foreign key constraint: {constraint}"),
                );
            }
            tracing::error!(error = %err, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "DATABASE_ERROR",
                "A database error occurred".to_string(),
            )
        }
        _ => {
            tracing::error!(error = %err, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "DATABASE_ERROR",
                "A database error occurred".to_string(),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_core_error_maps_to_404() {
        let err = AppError::Core(CoreError::NotFound {
            entity: "Asset",
            id: 42,
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn conflict_core_error_maps_to_409() {
        let err = AppError::Core(CoreError::Conflict("already deployed".to_string()));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn row_not_found_maps_to_404() {
        let err = AppError::Database(sqlx::Error::RowNotFound);
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn bad_request_maps_to_400() {
        let err = AppError::BadRequest("email: invalid".to_string());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn internal_error_is_sanitized() {
        let err = AppError::InternalError("secret detail".to_string());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
