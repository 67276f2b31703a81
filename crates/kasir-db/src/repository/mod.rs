//! # Repository Module
//!
//! Store repositories for Kasir.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CheckoutService (kasir-api)                                           │
//! │       │                                                                 │
//! │       │  db.ledger().create_transaction(items, lock)                   │
//! │       │  db.reports().summary(range)                                   │
//! │       ▼                                                                 │
//! │  StockLedger        ── one checkout = one unit of work                 │
//! │  SummaryAggregator  ── revenue / count / best seller                   │
//! │  ProductRepository  ── catalogue rows (seed + tests)                   │
//! │       │                                                                 │
//! │       │  SQL                                                            │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All SQL lives here. Callers never build queries.

pub mod ledger;
pub mod product;
pub mod report;
