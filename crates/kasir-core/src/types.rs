//! # Domain Types
//!
//! Core domain types used throughout Kasir.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────────┐   │
//! │  │    Product      │   │  Transaction    │   │ TransactionDetail   │   │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────────  │   │
//! │  │  id (store)     │   │  id (store)     │◆──│  product_id         │   │
//! │  │  name           │   │  total_amount   │1..N  product_name (⧉)  │   │
//! │  │  price          │   │  created_at     │   │  quantity           │   │
//! │  │  stock ≥ 0      │   │  details        │   │  subtotal           │   │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────────┘   │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────────┐   │
//! │  │  CheckoutItem   │   │  SalesSummary   │   │     DateRange       │   │
//! │  │  product_id     │   │  total_revenue  │   │  start (inclusive)  │   │
//! │  │  quantity > 0   │   │  best_products  │   │  end   (inclusive)  │   │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! A [`TransactionDetail`] copies the product name and prices the line at
//! checkout time. Renaming or repricing a product later never rewrites
//! history.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Product {
    /// Store-assigned identifier.
    pub id: i64,

    /// Display name, copied into every detail that sells it.
    pub name: String,

    /// Unit price in the smallest currency unit.
    pub price: i64,

    /// Units on hand. Never negative.
    pub stock: i64,
}

/// A product that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub price: i64,
    pub stock: i64,
}

impl NewProduct {
    pub fn new(name: impl Into<String>, price: i64, stock: i64) -> Self {
        NewProduct {
            name: name.into(),
            price,
            stock,
        }
    }
}

// =============================================================================
// Checkout Input
// =============================================================================

/// One line of a checkout request. Not persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CheckoutItem {
    pub product_id: i64,
    pub quantity: i64,
}

impl CheckoutItem {
    #[inline]
    pub const fn new(product_id: i64, quantity: i64) -> Self {
        CheckoutItem {
            product_id,
            quantity,
        }
    }
}

/// Body of `POST /checkout`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CheckoutRequest {
    pub items: Vec<CheckoutItem>,
}

/// Whether a checkout takes exclusive locks on the product rows it reads.
///
/// ```text
/// Exclusive : read stock ──► row locked until commit/rollback
///             concurrent checkouts of the same product serialize
///
/// Unlocked  : read stock ──► no lock
///             concurrent checkouts may both see the same stock
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockMode {
    #[default]
    Exclusive,
    Unlocked,
}

impl LockMode {
    #[inline]
    pub const fn is_exclusive(&self) -> bool {
        matches!(self, LockMode::Exclusive)
    }
}

impl From<bool> for LockMode {
    fn from(use_lock: bool) -> Self {
        if use_lock {
            LockMode::Exclusive
        } else {
            LockMode::Unlocked
        }
    }
}

// =============================================================================
// Transaction
// =============================================================================

/// A line of a completed transaction, frozen at checkout time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct TransactionDetail {
    pub product_id: i64,
    /// Product name at time of sale (frozen).
    pub product_name: String,
    pub quantity: i64,
    /// Unit price at time of sale × quantity.
    pub subtotal: i64,
}

/// A completed checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Transaction {
    /// Store-generated identifier.
    pub id: i64,
    /// Sum of all detail subtotals.
    pub total_amount: i64,
    /// Details in the order the request listed them.
    pub details: Vec<TransactionDetail>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Reporting
// =============================================================================

/// Inclusive calendar-date bounds for a report. `None` means unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub const fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        DateRange { start, end }
    }

    /// A range with neither bound set.
    pub const fn unbounded() -> Self {
        DateRange {
            start: None,
            end: None,
        }
    }

    /// A range covering exactly one calendar day.
    pub const fn single_day(day: NaiveDate) -> Self {
        DateRange {
            start: Some(day),
            end: Some(day),
        }
    }
}

/// The best-selling product of a report window.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BestProduct {
    pub name: String,
    pub quantity: i64,
}

impl BestProduct {
    /// The placeholder reported when no detail matches the window.
    pub fn none() -> Self {
        BestProduct::default()
    }
}

/// Revenue report over a [`DateRange`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SalesSummary {
    pub total_revenue: i64,
    pub total_transaction: i64,
    pub best_products: BestProduct,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_lock_mode_from_bool() {
        assert_eq!(LockMode::from(true), LockMode::Exclusive);
        assert_eq!(LockMode::from(false), LockMode::Unlocked);
        assert!(LockMode::default().is_exclusive());
    }

    #[test]
    fn test_date_range_constructors() {
        let today = day("2026-03-04");
        assert_eq!(
            DateRange::single_day(today),
            DateRange::new(Some(today), Some(today))
        );
        assert_eq!(DateRange::unbounded(), DateRange::default());
    }

    #[test]
    fn test_checkout_request_wire_format() {
        let req: CheckoutRequest = serde_json::from_str(
            r#"{"items":[{"product_id":1,"quantity":3},{"product_id":2,"quantity":1}]}"#,
        )
        .unwrap();
        assert_eq!(req.items, vec![CheckoutItem::new(1, 3), CheckoutItem::new(2, 1)]);
    }

    #[test]
    fn test_empty_summary_wire_format() {
        let json = serde_json::to_value(SalesSummary::default()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "total_revenue": 0,
                "total_transaction": 0,
                "best_products": { "name": "", "quantity": 0 }
            })
        );
    }
}
