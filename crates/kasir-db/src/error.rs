//! # Database Error Types
//!
//! Error types for store operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  sqlx::Error                     CoreError (kasir-core)                 │
//! │       │                               │                                 │
//! │       ▼                               │                                 │
//! │  DbError  ← categorized by            │                                 │
//! │       │     sqlx::error::ErrorKind    │                                 │
//! │       │     and SQLSTATE / result code│                                 │
//! │       ▼                               ▼                                 │
//! │  LedgerError::Store(DbError)   LedgerError::Rejected(CoreError)         │
//! │       │                               │                                 │
//! │       └───────────────┬───────────────┘                                 │
//! │                       ▼                                                 │
//! │              ApiError (kasir-api) ← 5xx / 4xx                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use kasir_core::{CoreError, ErrorKind};
use thiserror::Error;

/// SQLite result codes for a held lock (`SQLITE_BUSY` and its extended codes).
const SQLITE_BUSY_CODES: &[&str] = &["5", "261", "517", "773"];

/// PostgreSQL SQLSTATEs for lock timeouts, deadlocks and serialization failures.
const PG_CONTENTION_CODES: &[&str] = &["55P03", "40P01", "40001"];

/// Database operation errors.
///
/// These errors wrap sqlx errors and provide additional context
/// for logging. None of them is the caller's fault.
#[derive(Debug, Error)]
pub enum DbError {
    /// Entity not found in database.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Unique constraint violation.
    #[error("unique constraint violated: {message}")]
    UniqueViolation { message: String },

    /// Foreign key constraint violation.
    ///
    /// ## When This Occurs
    /// - A detail row referencing a product that vanished
    #[error("foreign key violation: {message}")]
    ForeignKeyViolation { message: String },

    /// CHECK constraint violation.
    ///
    /// ## When This Occurs
    /// - An unlocked checkout racing another one past `stock >= 0`
    #[error("check constraint violated: {message}")]
    CheckViolation { message: String },

    /// The store gave up waiting for a lock, or broke a deadlock.
    #[error("lock contention: {0}")]
    LockContention(String),

    /// Database connection failed.
    ///
    /// ## When This Occurs
    /// - Database file can't be created
    /// - Server unreachable
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("query failed: {0}")]
    QueryFailed(String),

    /// Pool exhausted (all connections in use).
    #[error("connection pool exhausted")]
    PoolExhausted,

    /// Internal database error.
    #[error("internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Whether retrying the same unit of work could succeed.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            DbError::LockContention(_) | DbError::PoolExhausted | DbError::ConnectionFailed(_)
        )
    }
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::RowNotFound    → DbError::NotFound
/// sqlx::Error::Database       → by ErrorKind, then by result code
/// sqlx::Error::PoolTimedOut   → DbError::PoolExhausted
/// Other                       → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::not_found("record", "unknown"),

            sqlx::Error::Database(db_err) => {
                let message = db_err.message().to_string();

                match db_err.kind() {
                    sqlx::error::ErrorKind::UniqueViolation => {
                        DbError::UniqueViolation { message }
                    }
                    sqlx::error::ErrorKind::ForeignKeyViolation => {
                        DbError::ForeignKeyViolation { message }
                    }
                    sqlx::error::ErrorKind::CheckViolation => DbError::CheckViolation { message },
                    _ => {
                        let contended = db_err.code().is_some_and(|code| {
                            let code: &str = &code;
                            SQLITE_BUSY_CODES.contains(&code) || PG_CONTENTION_CODES.contains(&code)
                        });
                        if contended {
                            DbError::LockContention(message)
                        } else {
                            DbError::QueryFailed(message)
                        }
                    }
                }
            }

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("pool is closed".to_string()),

            sqlx::Error::Io(e) => DbError::ConnectionFailed(e.to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

// =============================================================================
// Ledger Error
// =============================================================================

/// Failure of a checkout unit of work.
///
/// Either way the unit of work was rolled back and no stock moved.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The request broke a checkout rule.
    #[error(transparent)]
    Rejected(#[from] CoreError),

    /// The store failed.
    #[error(transparent)]
    Store(#[from] DbError),
}

impl LedgerError {
    /// Returns the machine-readable kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            LedgerError::Rejected(e) => e.kind(),
            LedgerError::Store(_) => ErrorKind::Store,
        }
    }
}

impl From<sqlx::Error> for LedgerError {
    fn from(err: sqlx::Error) -> Self {
        LedgerError::Store(err.into())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlx_mapping() {
        assert!(matches!(
            DbError::from(sqlx::Error::RowNotFound),
            DbError::NotFound { .. }
        ));
        assert!(matches!(
            DbError::from(sqlx::Error::PoolTimedOut),
            DbError::PoolExhausted
        ));
        assert!(DbError::from(sqlx::Error::PoolTimedOut).is_transient());
    }

    #[test]
    fn test_ledger_error_kind() {
        let rejected = LedgerError::from(CoreError::ProductNotFound(3));
        assert_eq!(rejected.kind(), ErrorKind::ProductNotFound);
        assert_eq!(rejected.to_string(), "product id 3 not found");

        let store = LedgerError::from(sqlx::Error::PoolClosed);
        assert_eq!(store.kind(), ErrorKind::Store);
    }
}
