//! # Checkout Rules
//!
//! The pure half of a checkout. The store drives the unit of work; this
//! module decides lock order, whether each line can be sold, and what gets
//! recorded.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  request items (request order)                                          │
//! │     [ {3, 1}, {1, 2}, {3, 4} ]                                          │
//! │          │                                                              │
//! │          ▼ CheckoutPlan::new  (validate, stable sort by product id)     │
//! │     steps: slot 1 {1,2} → slot 0 {3,1} → slot 2 {3,4}                   │
//! │          │                                                              │
//! │          ▼ for each step: store locks + reads the row                   │
//! │     CheckoutTally::record(step, snapshot)                               │
//! │       ├── None            → ProductNotFound                             │
//! │       ├── stock < qty     → InsufficientStock                           │
//! │       └── ok              → subtotal, running total, detail[slot]       │
//! │          │                                                              │
//! │          ▼ CheckoutTally::finish                                        │
//! │     total + details back in request order                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Lock Order
//! Two checkouts that lock the same products in opposite orders can
//! deadlock. Visiting lines in ascending product id gives every checkout the
//! same total lock order.

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{CheckoutItem, TransactionDetail};
use crate::validation::validate_checkout_items;

// =============================================================================
// Plan
// =============================================================================

/// One line to process, tagged with its position in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutStep {
    /// Index of the line in the original request.
    pub slot: usize,
    pub item: CheckoutItem,
}

/// A validated checkout with its lock order.
#[derive(Debug, Clone)]
pub struct CheckoutPlan {
    items: Vec<CheckoutItem>,
    order: Vec<usize>,
}

impl CheckoutPlan {
    /// Validates the items and computes the lock order.
    ///
    /// ## Errors
    /// - [`CoreError::EmptyCheckout`] for an empty request
    /// - [`CoreError::InvalidQuantity`] for a quantity ≤ 0
    /// - [`CoreError::Validation`] for a bad product id or too many lines
    pub fn new(items: Vec<CheckoutItem>) -> CoreResult<Self> {
        validate_checkout_items(&items)?;

        let mut order: Vec<usize> = (0..items.len()).collect();
        // sort_by_key is stable: duplicate product lines keep request order
        order.sort_by_key(|&slot| items[slot].product_id);

        Ok(CheckoutPlan { items, order })
    }

    /// The items in request order.
    pub fn items(&self) -> &[CheckoutItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The lines in lock order (ascending product id).
    pub fn steps(&self) -> impl Iterator<Item = CheckoutStep> + '_ {
        self.order.iter().map(move |&slot| CheckoutStep {
            slot,
            item: self.items[slot],
        })
    }
}

// =============================================================================
// Tally
// =============================================================================

/// Product attributes read inside the unit of work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockSnapshot {
    pub name: String,
    pub price: i64,
    pub stock: i64,
}

/// Running state of a checkout: total and per-line snapshots.
#[derive(Debug, Clone)]
pub struct CheckoutTally {
    total: Money,
    details: Vec<Option<TransactionDetail>>,
}

impl CheckoutTally {
    /// Creates an empty tally sized for `plan`.
    pub fn for_plan(plan: &CheckoutPlan) -> Self {
        CheckoutTally {
            total: Money::zero(),
            details: vec![None; plan.len()],
        }
    }

    /// Records one line against the product row the store just read.
    ///
    /// `snapshot` is `None` when the product does not exist.
    ///
    /// ## Returns
    /// The stock left on the row once this line is applied. The caller
    /// writes the decrement through before reading the next line, so a
    /// product listed twice is checked against its reduced stock.
    pub fn record(
        &mut self,
        step: CheckoutStep,
        snapshot: Option<StockSnapshot>,
    ) -> CoreResult<i64> {
        let item = step.item;
        let snapshot = snapshot.ok_or(CoreError::ProductNotFound(item.product_id))?;

        if snapshot.stock < item.quantity {
            return Err(CoreError::InsufficientStock {
                product_id: item.product_id,
                available: snapshot.stock,
                requested: item.quantity,
            });
        }

        let overflow = CoreError::AmountOverflow {
            product_id: item.product_id,
        };
        let subtotal = Money::from_minor(snapshot.price)
            .checked_mul_quantity(item.quantity)
            .ok_or_else(|| overflow.clone())?;
        self.total = self.total.checked_add(subtotal).ok_or(overflow)?;

        self.details[step.slot] = Some(TransactionDetail {
            product_id: item.product_id,
            product_name: snapshot.name,
            quantity: item.quantity,
            subtotal: subtotal.amount(),
        });

        Ok(snapshot.stock - item.quantity)
    }

    /// Total of the lines recorded so far.
    pub fn total(&self) -> Money {
        self.total
    }

    /// Consumes the tally, returning the total and the details in request
    /// order. Expects every step of the plan to have been recorded.
    pub fn finish(self) -> (Money, Vec<TransactionDetail>) {
        (self.total, self.details.into_iter().flatten().collect())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
