//! # kasir-db: Database Layer for Kasir
//!
//! This crate owns every SQL statement Kasir runs. It uses SQLite by
//! default, PostgreSQL with the `postgres` feature, both through sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Kasir Data Flow                                 │
//! │                                                                         │
//! │  POST /checkout, GET /report  (kasir-api)                              │
//! │       │                                                                 │
//! │       ▼  Arc<dyn CheckoutStore>                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     kasir-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────────┐  ┌────────────┐  │   │
//! │  │   │   Database    │    │  Repositories      │  │ Migrations │  │   │
//! │  │   │   (pool.rs)   │◄───│  StockLedger       │  │ (embedded) │  │   │
//! │  │   │  SqlitePool   │    │  SummaryAggregator │  │ 001_init   │  │   │
//! │  │   │               │    │  ProductRepository │  │            │  │   │
//! │  │   └───────────────┘    └────────────────────┘  └────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   PgDatabase (postgres.rs, feature = "postgres")                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  kasir.db (SQLite, WAL)   or   PostgreSQL                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Ledger, reports and products
//! - [`store`] - The [`CheckoutStore`] trait the HTTP layer depends on
//!
//! ## Usage
//!
//! ```rust,ignore
//! use kasir_db::{Database, DbConfig};
//! use kasir_core::{CheckoutItem, DateRange, LockMode};
//!
//! let db = Database::new(DbConfig::new("kasir.db")).await?;
//!
//! let txn = db
//!     .ledger()
//!     .create_transaction(vec![CheckoutItem::new(1, 3)], LockMode::Exclusive)
//!     .await?;
//! let report = db.reports().summary(DateRange::unbounded()).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
#[cfg(feature = "postgres")]
pub mod postgres;
pub mod repository;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult, LedgerError};
pub use pool::{Database, DbConfig};
#[cfg(feature = "postgres")]
pub use postgres::{PgConfig, PgDatabase};
pub use store::CheckoutStore;

// Repository re-exports for convenience
pub use repository::ledger::StockLedger;
pub use repository::product::ProductRepository;
pub use repository::report::SummaryAggregator;
