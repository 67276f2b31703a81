//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Representation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Prices, subtotals and totals are whole numbers of the smallest         │
//! │  currency unit (e.g. 3500 = Rp 3.500).                                  │
//! │                                                                         │
//! │  • No floating point anywhere in the checkout path                      │
//! │  • price × quantity and Σ subtotals are CHECKED: an overflow is a       │
//! │    rejected checkout, never a wrapped total                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use kasir_core::money::Money;
//!
//! let price = Money::from_minor(3500);
//! let subtotal = price.checked_mul_quantity(3).unwrap();
//! assert_eq!(subtotal.amount(), 10_500);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit.
///
/// ## Design Decisions
/// - **i64 (signed)**: matches the `BIGINT` columns in the store
/// - **Single field tuple struct**: zero-cost, serializes as a bare integer
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from the smallest currency unit.
    #[inline]
    pub const fn from_minor(amount: i64) -> Self {
        Money(amount)
    }

    /// Returns the value in the smallest currency unit.
    #[inline]
    pub const fn amount(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Multiplies a unit price by a quantity, returning `None` on overflow.
    ///
    /// ## Example
    /// ```rust
    /// use kasir_core::money::Money;
    ///
    /// assert_eq!(Money::from_minor(3000).checked_mul_quantity(2), Some(Money::from_minor(6000)));
    /// assert_eq!(Money::from_minor(i64::MAX).checked_mul_quantity(2), None);
    /// ```
    #[inline]
    pub const fn checked_mul_quantity(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(v) => Some(Money(v)),
            None => None,
        }
    }

    /// Adds two amounts, returning `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Money(v)),
            None => None,
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Money> for i64 {
    fn from(money: Money) -> Self {
        money.0
    }
}

// Plain addition is only used on amounts already read back from the store,
// where the column type bounds them.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_minor() {
        let m = Money::from_minor(3500);
        assert_eq!(m.amount(), 3500);
        assert_eq!(i64::from(m), 3500);
        assert_eq!(m.to_string(), "3500");
    }

    #[test]
    fn test_checked_multiply() {
        let price = Money::from_minor(12_000);
        assert_eq!(price.checked_mul_quantity(3), Some(Money::from_minor(36_000)));
        assert_eq!(Money::from_minor(i64::MAX / 2 + 1).checked_mul_quantity(2), None);
    }

    #[test]
    fn test_checked_add() {
        let a = Money::from_minor(i64::MAX);
        assert_eq!(a.checked_add(Money::from_minor(1)), None);
        assert_eq!(
            Money::from_minor(1).checked_add(Money::from_minor(2)),
            Some(Money::from_minor(3))
        );
    }

    #[test]
    fn test_sum_and_zero() {
        let total: Money = [3500, 3000, 12_000].into_iter().map(Money::from_minor).sum();
        assert_eq!(total.amount(), 18_500);
        assert!(Money::zero().is_zero());
        assert_eq!(Money::default(), Money::zero());
    }

    #[test]
    fn test_serializes_as_bare_integer() {
        let json = serde_json::to_string(&Money::from_minor(10_500)).unwrap();
        assert_eq!(json, "10500");
    }
}
