//! # API Error Type
//!
//! Unified error type for counter commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Brew Counter                       │
//! │                                                                         │
//! │  Command Function  →  Result<T, ApiError>                              │
//! │         │                                                               │
//! │         ├── CoreError (before any mutation)                            │
//! │         │     InsufficientStock, DiscountRejected, EmptyCart, ...      │
//! │         │     → nothing changed, operator corrects and retries         │
//! │         │                                                               │
//! │         └── DbError (store call failed)                                │
//! │               → PERSIST_FAILED, logged with error!                     │
//! │               → an in-memory change made before the call STANDS        │
//! │                                                                         │
//! │  Terminal prints:  [INSUFFICIENT_STOCK] Insufficient stock for ...     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::error;

use brew_core::CoreError;
use brew_db::DbError;

/// Error returned from counter commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "INSUFFICIENT_STOCK",
///   "message": "Insufficient stock for Muffin: available 1, requested 2"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Product, code or invoice id does not exist
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Addition would take stock below zero
    InsufficientStock,

    /// Discount code unknown or inactive
    DiscountRejected,

    /// Completion requested for an empty cart
    EmptyCart,

    /// A display line could not be parsed back
    UnrecoverableLine,

    /// A store write or read failed
    PersistFailed,

    /// Anything else
    Internal,
}

impl ErrorCode {
    /// The serialized name, e.g. `PERSIST_FAILED`.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::InsufficientStock => "INSUFFICIENT_STOCK",
            ErrorCode::DiscountRejected => "DISCOUNT_REJECTED",
            ErrorCode::EmptyCart => "EMPTY_CART",
            ErrorCode::UnrecoverableLine => "UNRECOVERABLE_LINE",
            ErrorCode::PersistFailed => "PERSIST_FAILED",
            ErrorCode::Internal => "INTERNAL",
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

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: impl std::fmt::Display) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    /// Wraps a failed store call, naming what was being persisted.
    pub fn persist(context: &str, err: DbError) -> Self {
        error!(context = %context, error = %err, "Store call failed");
        ApiError::new(
            ErrorCode::PersistFailed,
            format!("Failed to {}: {}", context, err),
        )
    }
}

/// Converts database errors to API errors.
///
/// Missing rows and duplicates are operator-correctable; every other store
/// failure is PERSIST_FAILED.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, id),
            DbError::UniqueViolation { field, value } => ApiError::new(
                ErrorCode::ValidationError,
                format!("{} '{}' already exists", field, value),
            ),
            other => {
                error!(error = %other, "Database operation failed");
                ApiError::new(ErrorCode::PersistFailed, other.to_string())
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let code = match &err {
            CoreError::ProductNotFound(_) => ErrorCode::NotFound,
            CoreError::InsufficientStock { .. } => ErrorCode::InsufficientStock,
            CoreError::DiscountRejected { .. } => ErrorCode::DiscountRejected,
            CoreError::EmptyCart => ErrorCode::EmptyCart,
            CoreError::UnrecoverableLine { .. } => ErrorCode::UnrecoverableLine,
            CoreError::Validation(_) => ErrorCode::ValidationError,
        };
        ApiError::new(code, err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for ApiError {}
