use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use fleetkeep_core::error::{CoreError, RuleError};
use fleetkeep_core::validation::ValidationErrors;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Every variant renders as `{ "error", "code" }` JSON.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Malformed request outside the schema layer, e.g. a bad header.
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("No route for {0}")]
    RouteNotFound(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<ValidationErrors> for AppError {
    fn from(err: ValidationErrors) -> Self {
        Self::Core(CoreError::Validation(err))
    }
}

impl From<RuleError> for AppError {
    fn from(err: RuleError) -> Self {
        Self::Core(err.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Core(core) => match core {
                CoreError::Validation(errors) => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    json!({
                        "error": errors.to_string(),
                        "code": "VALIDATION_ERROR",
                        "violations": errors.violations(),
                    }),
                ),
                CoreError::BusinessRule(violation) => (
                    StatusCode::CONFLICT,
                    json!({
                        "error": violation.message,
                        "code": violation.code.as_str(),
                    }),
                ),
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    json!({
                        "error": format!("{entity} with id {id} not found"),
                        "code": "NOT_FOUND",
                    }),
                ),
                CoreError::Storage(err) => {
                    tracing::error!(error = %err, "Storage failure");
                    internal()
                }
            },
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": msg, "code": "BAD_REQUEST" }),
            ),
            AppError::RouteNotFound(path) => (
                StatusCode::NOT_FOUND,
                json!({ "error": format!("No route for {path}"), "code": "NOT_FOUND" }),
            ),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        };

        (status, axum::Json(body)).into_response()
    }
}

fn internal() -> (StatusCode, serde_json::Value) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({
            "error": "An internal error occurred",
            "code": "INTERNAL_ERROR",
        }),
    )
}
