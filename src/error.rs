/// Application Error Handling
///
/// One error taxonomy for the whole service. Handlers return `AppError` and
/// the `ResponseError` impl maps each variant onto its HTTP status:
/// validation failures 400, missing or bad credentials 401, rejected tokens
/// 403, duplicate emails 409, storage trouble 503, everything else 500.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use std::error::Error as StdError;
use std::fmt;

/// Validation errors for request input
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    MissingField(&'static str),
    TooShort(&'static str, usize),
    TooLong(&'static str, usize),
    InvalidFormat(&'static str),
    WeakPassword,
    PasswordMismatch,
    NotFound(&'static str),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingField(field) => write!(f, "{} is required", field),
            ValidationError::TooShort(field, min) => {
                write!(f, "{} is too short (minimum {} characters)", field, min)
            }
            ValidationError::TooLong(field, max) => {
                write!(f, "{} is too long (maximum {} characters)", field, max)
            }
            ValidationError::InvalidFormat(field) => write!(f, "{} has invalid format", field),
            ValidationError::WeakPassword => write!(
                f,
                "password must contain at least one digit, one lowercase and one uppercase letter"
            ),
            ValidationError::PasswordMismatch => write!(f, "passwords do not match"),
            ValidationError::NotFound(what) => write!(f, "{} not found", what),
        }
    }
}

impl StdError for ValidationError {}

/// Email delivery errors
///
/// Never surfaced over HTTP: reset mails go out from a spawned task and
/// failures end up in the logs only.
#[derive(Debug, Clone)]
pub enum EmailError {
    InvalidAddress(String),
    SendFailed(String),
}

impl fmt::Display for EmailError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmailError::InvalidAddress(msg) => write!(f, "Invalid email address: {}", msg),
            EmailError::SendFailed(msg) => write!(f, "Failed to send email: {}", msg),
        }
    }
}

impl StdError for EmailError {}

/// Central error type for request handling
#[derive(Debug)]
pub enum AppError {
    Validation(ValidationError),
    Unauthorized(String),
    Forbidden(String),
    Conflict(String),
    Unavailable(String),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(e) => write!(f, "Validation error: {}", e),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::Unavailable(msg) => write!(f, "Service unavailable: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl StdError for AppError {}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Validation(err)
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        let message = err.to_string();
        if message.contains("duplicate key") || message.contains("unique constraint") {
            AppError::Conflict("email already exists".to_string())
        } else {
            AppError::Unavailable(message)
        }
    }
}

/// Structured error response body
#[derive(Debug, serde::Serialize)]
pub struct ErrorResponse {
    pub error_id: String,
    pub message: String,
    pub code: String,
    pub status: u16,
    pub timestamp: String,
}

/// Request-scoped context for correlated log lines
#[derive(Debug, Clone)]
pub struct ErrorContext {
    pub request_id: String,
    pub operation: String,
}

impl ErrorContext {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            request_id: uuid::Uuid::new_v4().to_string(),
            operation: operation.into(),
        }
    }
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            AppError::Forbidden(_) => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            AppError::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            AppError::Unavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }

    /// Message safe to show to clients. Credential failures stay uniform and
    /// server-side details are masked.
    fn public_message(&self) -> String {
        match self {
            AppError::Validation(e) => e.to_string(),
            AppError::Unauthorized(_) => "unauthorized".to_string(),
            AppError::Forbidden(_) => "forbidden".to_string(),
            AppError::Conflict(msg) => msg.clone(),
            AppError::Unavailable(_) => "service temporarily unavailable".to_string(),
            AppError::Internal(_) => "internal server error".to_string(),
        }
    }

    fn log(&self, error_id: &str) {
        if self.status_code().is_server_error() {
            tracing::error!(error_id = %error_id, error = %self, "Request failed");
        } else {
            tracing::warn!(error_id = %error_id, error = %self, "Request rejected");
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.parts().0
    }

    fn error_response(&self) -> HttpResponse {
        let error_id = uuid::Uuid::new_v4().to_string();
        self.log(&error_id);

        let (status, code) = self.parts();
        let body = ErrorResponse {
            error_id,
            message: self.public_message(),
            code: code.to_string(),
            status: status.as_u16(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        };
        HttpResponse::build(status).json(body)
    }
}
