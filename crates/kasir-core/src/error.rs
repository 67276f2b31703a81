//! # Error Types
//!
//! Domain-specific error types for kasir-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  kasir-core errors (this file)                                         │
//! │  ├── CoreError        - Checkout rejections (caller input at fault)    │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  kasir-db errors (separate crate)                                      │
//! │  ├── DbError          - Store failures                                 │
//! │  └── LedgerError      - Rejected(CoreError) | Store(DbError)           │
//! │                                                                         │
//! │  kasir-api errors (in app)                                             │
//! │  └── ApiError         - What HTTP clients see (serialized)             │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → LedgerError → ApiError → Client   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Classification
//! The boundary picks an HTTP status from [`CoreError::kind`], never from
//! the rendered message.

use thiserror::Error;

// =============================================================================
// Error Kind
// =============================================================================

/// Machine-readable classification of a failed operation.
///
/// Everything except [`ErrorKind::Store`] is the caller's fault and must not
/// be retried automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A checkout line asked for zero or a negative quantity.
    InvalidQuantity,
    /// A checkout line referenced a product that does not exist.
    ProductNotFound,
    /// A checkout line asked for more than the product has in stock.
    InsufficientStock,
    /// Any other malformed request (empty checkout, bad dates, ...).
    InvalidRequest,
    /// Connectivity, constraint or lock-timeout failure in the store.
    /// The unit of work was rolled back, so the caller may retry.
    Store,
}

impl ErrorKind {
    /// Returns true for errors caused by the caller's input.
    #[inline]
    pub const fn is_business(&self) -> bool {
        !matches!(self, ErrorKind::Store)
    }
}

// =============================================================================
// Core Error
// =============================================================================

/// Checkout rejections.
///
/// These errors represent business rule violations. None of them leave any
/// trace in the store: the unit of work that produced them is rolled back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Requested quantity is zero or negative.
    #[error("quantity must be greater than 0 for product id {product_id}")]
    InvalidQuantity { product_id: i64, quantity: i64 },

    /// Product cannot be found.
    #[error("product id {0} not found")]
    ProductNotFound(i64),

    /// Insufficient stock to complete the checkout.
    ///
    /// ## User Workflow
    /// ```text
    /// Checkout (product 1, qty: 8)
    ///      │
    ///      ▼
    /// Read stock (locked): available=7
    ///      │
    ///      ▼
    /// InsufficientStock { product_id: 1, available: 7, requested: 8 }
    ///      │
    ///      ▼
    /// Whole checkout rolled back, client gets 400
    /// ```
    #[error("insufficient stock for product id {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: i64,
        available: i64,
        requested: i64,
    },

    /// The checkout request contained no items.
    #[error("checkout must contain at least one item")]
    EmptyCheckout,

    /// A subtotal or the running total does not fit in the money type.
    #[error("amount overflow while pricing product id {product_id}")]
    AmountOverflow { product_id: i64 },

    /// Validation error (wraps ValidationError).
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Returns the machine-readable kind of this error.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            CoreError::InvalidQuantity { .. } => ErrorKind::InvalidQuantity,
            CoreError::ProductNotFound(_) => ErrorKind::ProductNotFound,
            CoreError::InsufficientStock { .. } => ErrorKind::InsufficientStock,
            CoreError::EmptyCheckout
            | CoreError::AmountOverflow { .. }
            | CoreError::Validation(_) => ErrorKind::InvalidRequest,
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when request input doesn't meet requirements.
/// Used for early validation before any store access.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Collection exceeds its maximum size.
    #[error("{field} must have at most {max} entries")]
    TooMany { field: String, max: usize },

    /// Invalid format (e.g., invalid date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// A range whose start lies after its end.
    #[error("{start_field} must not be after {end_field}")]
    InvertedRange {
        start_field: String,
        end_field: String,
    },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientStock {
            product_id: 1,
            available: 7,
            requested: 8,
        };
        assert_eq!(
            err.to_string(),
            "insufficient stock for product id 1: requested 8, available 7"
        );

        let err = CoreError::ProductNotFound(42);
        assert_eq!(err.to_string(), "product id 42 not found");
    }

    #[test]
    fn test_kinds_are_structural() {
        assert_eq!(
            CoreError::InvalidQuantity {
                product_id: 1,
                quantity: 0
            }
            .kind(),
            ErrorKind::InvalidQuantity
        );
        assert_eq!(CoreError::ProductNotFound(9).kind(), ErrorKind::ProductNotFound);
        assert_eq!(CoreError::EmptyCheckout.kind(), ErrorKind::InvalidRequest);
        assert!(CoreError::EmptyCheckout.kind().is_business());
        assert!(!ErrorKind::Store.is_business());
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "product_id".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
        assert_eq!(core_err.kind(), ErrorKind::InvalidRequest);
    }
}
