//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Kasir                                  │
//! │                                                                         │
//! │  Handler → Result<T, ApiError>                                          │
//! │                │                                                        │
//! │  ValidationError (dates) ──────────────► VALIDATION_ERROR    400        │
//! │  LedgerError::Rejected(CoreError)                                       │
//! │     ├── InvalidQuantity ───────────────► INVALID_QUANTITY    400        │
//! │     ├── ProductNotFound ───────────────► PRODUCT_NOT_FOUND   400        │
//! │     ├── InsufficientStock ─────────────► INSUFFICIENT_STOCK  400        │
//! │     └── anything else ─────────────────► VALIDATION_ERROR    400        │
//! │  LedgerError::Store / DbError ─ logged ► DATABASE_ERROR      500        │
//! │     └── DbError::Internal ─────────────► INTERNAL            500        │
//! │  malformed JSON body ──────────────────► VALIDATION_ERROR    400        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The code is chosen from the error's kind, never from its message.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::{error, warn};

use kasir_core::{CoreError, ErrorKind, ValidationError};
use kasir_db::{DbError, LedgerError};

/// Error body returned by every failing endpoint.
///
/// ```json
/// {
///   "code": "INSUFFICIENT_STOCK",
///   "message": "insufficient stock for product id 1: requested 8, available 7"
/// }
/// ```
#[derive(Debug, Clone, Serialize, thiserror::Error)]
#[error("[{code:?}] {message}")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Quantity of zero or less (400)
    InvalidQuantity,

    /// Unknown product id (400)
    ProductNotFound,

    /// Not enough stock (400)
    InsufficientStock,

    /// Any other malformed input (400)
    ValidationError,

    /// Store failure, safe to retry (500)
    DatabaseError,

    /// Internal server error (500)
    Internal,
}

impl ErrorCode {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorCode::InvalidQuantity
            | ErrorCode::ProductNotFound
            | ErrorCode::InsufficientStock
            | ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
            ErrorCode::DatabaseError | ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ErrorKind> for ErrorCode {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::InvalidQuantity => ErrorCode::InvalidQuantity,
            ErrorKind::ProductNotFound => ErrorCode::ProductNotFound,
            ErrorKind::InsufficientStock => ErrorCode::InsufficientStock,
            ErrorKind::InvalidRequest => ErrorCode::ValidationError,
            ErrorKind::Store => ErrorCode::DatabaseError,
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    pub fn status(&self) -> StatusCode {
        self.code.status()
    }
}

/// Business rejections carry their own message.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        ApiError::new(err.kind().into(), err.to_string())
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

/// Store failures are logged in full and returned without detail.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        if let DbError::Internal(_) = err {
            error!(error = %err, "Unexpected store failure");
            return ApiError::internal("internal server error");
        }
        if err.is_transient() {
            warn!(error = %err, "Store busy");
            ApiError::new(ErrorCode::DatabaseError, "database is busy, please retry")
        } else {
            error!(error = %err, "Store operation failed");
            ApiError::new(ErrorCode::DatabaseError, "database operation failed")
        }
    }
}

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::Rejected(e) => e.into(),
            LedgerError::Store(e) => e.into(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::validation(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}
