//! # Error Handling Middleware
//!
//! Maps domain errors to HTTP status codes and JSON error responses so the
//! service layer stays transport-agnostic. Expected domain errors surface
//! with their kind-specific status and structured payload; anything else is
//! logged and returned as a generic 500.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use agenda_core::errors::AgendaError;

/// Application error wrapper that provides HTTP status code mapping.
///
/// `AppError` wraps [`AgendaError`] and implements `IntoResponse`, letting
/// handlers use `?` on service results and get consistent error bodies.
#[derive(Debug)]
pub struct AppError(pub AgendaError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self.0 {
            AgendaError::InvalidId(msg) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Invalid id", "message": msg }),
            ),
            AgendaError::InvalidDate(msg) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Invalid date", "message": msg }),
            ),
            AgendaError::InvalidRange => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "Invalid time range",
                    "message": "endTime must be after startTime",
                }),
            ),
            AgendaError::MissingFields(msg) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Missing required fields", "message": msg }),
            ),
            AgendaError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                json!({ "error": "Not found", "message": msg }),
            ),
            AgendaError::Conflict(block) => (
                StatusCode::CONFLICT,
                json!({
                    "error": "Schedule conflict",
                    "message": self.0.to_string(),
                    "conflictingBlock": block,
                }),
            ),
            AgendaError::Locked { appointments } => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "Time block is locked",
                    "message": self.0.to_string(),
                    "appointmentsCount": appointments,
                }),
            ),
            AgendaError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({ "error": "Malformed data", "errors": errors }),
            ),
            AgendaError::EmailTaken => (
                StatusCode::CONFLICT,
                json!({
                    "error": "Email already exists",
                    "message": self.0.to_string(),
                    "field": "email",
                }),
            ),
            AgendaError::Authentication(msg) => (
                StatusCode::UNAUTHORIZED,
                json!({ "error": "Authentication failed", "message": msg }),
            ),
            AgendaError::Authorization { role } => (
                StatusCode::FORBIDDEN,
                json!({
                    "error": "Access denied",
                    "message": self.0.to_string(),
                    "userRole": role,
                }),
            ),
            AgendaError::Database(_) | AgendaError::Internal(_) => {
                // Unexpected failure: log with full detail, answer generically.
                tracing::error!(error = %self.0, "unexpected error while handling request");

                let mut body = json!({
                    "error": "Internal server error",
                    "message": "An unexpected error occurred",
                });
                if development_mode() {
                    body["detail"] = json!(self.0.to_string());
                }
                (StatusCode::INTERNAL_SERVER_ERROR, body)
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Whether 500 responses should carry error detail. Read at response time
/// so it matches `ApiConfig::from_env` without threading config into every
/// error path.
fn development_mode() -> bool {
    matches!(
        std::env::var("API_DEVELOPMENT").as_deref(),
        Ok("true") | Ok("1")
    )
}

/// Allows using `?` with `Result<T, AgendaError>` in handlers returning
/// `Result<T, AppError>`.
impl From<AgendaError> for AppError {
    fn from(err: AgendaError) -> Self {
        AppError(err)
    }
}

/// Wraps raw store failures as `AgendaError::Database`.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(AgendaError::Database(err))
    }
}
