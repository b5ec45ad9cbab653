use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::json;
use spycats_core::error::CoreError;
use validator::{ValidationErrors, ValidationErrorsKind};

/// Message returned in place of anything that must not leak to clients.
const SANITIZED_MESSAGE: &str = "An internal error occurred";

/// One failing request field, reported in 422 responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Dotted path to the field, e.g. `name` or `targets[1].country`.
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses:
///
/// - field validation failures: 422 `{"detail": [{"field", "message"}]}`
/// - everything else: 400 `{"detail": "<message>"}`
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `spycats_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// One or more request fields failed validation.
    #[error("Validation failed for {} field(s)", .0.len())]
    Validation(Vec<FieldError>),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(field_errors(&errors))
    }
}

impl AppError {
    /// Field errors sorted by path, or `Ok(())` when there are none.
    pub fn validation(mut fields: Vec<FieldError>) -> AppResult<()> {
        if fields.is_empty() {
            return Ok(());
        }
        fields.sort_by(|a, b| a.field.cmp(&b.field));
        Err(AppError::Validation(fields))
    }
}

/// Flatten a `ValidationErrors` tree into field errors sorted by path.
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut fields = Vec::new();
    flatten_validation_errors(errors, "", &mut fields);
    fields.sort_by(|a, b| a.field.cmp(&b.field));
    fields
}

/// Walk a (possibly nested) `ValidationErrors` tree into flat field paths.
fn flatten_validation_errors(errors: &ValidationErrors, prefix: &str, out: &mut Vec<FieldError>) {
    for (field, kind) in errors.errors() {
        let path = format!("{prefix}{field}");
        match kind {
            ValidationErrorsKind::Field(failures) => {
                for failure in failures {
                    let message = failure
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| failure.code.to_string());
                    out.push(FieldError::new(path.clone(), message));
                }
            }
            ValidationErrorsKind::Struct(inner) => {
                flatten_validation_errors(inner, &format!("{path}."), out);
            }
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    flatten_validation_errors(inner, &format!("{path}[{index}]."), out);
                }
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = match self {
            AppError::Validation(fields) => {
                let body = json!({ "detail": fields });
                return (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(body)).into_response();
            }

            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { .. } | CoreError::Conflict(_) => core.to_string(),
                CoreError::Validation(msg) => msg,
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    SANITIZED_MESSAGE.to_string()
                }
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(&err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => msg,
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                SANITIZED_MESSAGE.to_string()
            }
        };

        let body = json!({ "detail": message });
        (StatusCode::BAD_REQUEST, axum::Json(body)).into_response()
    }
}

/// Turn a sqlx error into a client-facing message.
///
/// - `RowNotFound` reads as a missing resource.
/// - Foreign key violations (23503) name the dangling reference.
/// - Check violations (23514) name the constraint.
/// - Everything else is logged and sanitized.
fn classify_sqlx_error(err: &sqlx::Error) -> String {
    match err {
        sqlx::Error::RowNotFound => "Resource not found".to_string(),
        sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
            Some("23503") => {
                let constraint = db_err.constraint().unwrap_or("unknown");
                format!("Referenced record does not exist: {constraint}")
            }
            Some("23514") => {
                let constraint = db_err.constraint().unwrap_or("unknown");
                format!("Value violates check constraint: {constraint}")
            }
            _ => {
                tracing::error!(error = %db_err, "Database error");
                SANITIZED_MESSAGE.to_string()
            }
        },
        other => {
            tracing::error!(error = %other, "Database error");
            SANITIZED_MESSAGE.to_string()
        }
    }
}
