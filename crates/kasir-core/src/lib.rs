//! # kasir-core: Pure Business Logic for Kasir
//!
//! This crate holds the checkout rules of the Kasir point-of-sale backend as
//! pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Kasir Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 kasir-api (axum HTTP boundary)                   │   │
//! │  │        POST /checkout ──► CheckoutService ──► GET /report        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ kasir-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │ checkout  │  │ validation│  │   │
//! │  │   │ Product   │  │   Money   │  │   Plan    │  │   rules   │  │   │
//! │  │   │Transaction│  │           │  │   Tally   │  │  dates    │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 kasir-db (Stock Ledger, Reports)                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Transaction, SalesSummary, ...)
//! - [`money`] - Money type with checked integer arithmetic
//! - [`checkout`] - Lock ordering and the per-item checkout tally
//! - [`error`] - Domain error types and their machine-readable kinds
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use kasir_core::checkout::{CheckoutPlan, CheckoutTally, StockSnapshot};
//! use kasir_core::CheckoutItem;
//!
//! let plan = CheckoutPlan::new(vec![CheckoutItem::new(1, 3)]).unwrap();
//! let mut tally = CheckoutTally::for_plan(&plan);
//!
//! for step in plan.steps() {
//!     let snapshot = StockSnapshot {
//!         name: "Indomie Goreng".to_string(),
//!         price: 3500,
//!         stock: 10,
//!     };
//!     tally.record(step, Some(snapshot)).unwrap();
//! }
//!
//! let (total, details) = tally.finish();
//! assert_eq!(total.amount(), 10_500);
//! assert_eq!(details[0].subtotal, 10_500);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod checkout;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ErrorKind, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum number of lines accepted in a single checkout.
///
/// ## Business Reason
/// Every line takes a row lock for the whole unit of work. Bounding the
/// request bounds how long a single checkout can hold locks.
pub const MAX_CHECKOUT_ITEMS: usize = 100;
