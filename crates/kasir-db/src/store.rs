//! # Checkout Store
//!
//! The narrow interface the checkout service depends on. Both backends
//! implement it, so the HTTP layer never knows which one it talks to.

use async_trait::async_trait;

use crate::error::{DbResult, LedgerError};
use crate::pool::Database;
use kasir_core::{CheckoutItem, DateRange, LockMode, SalesSummary, Transaction};

/// A store that can run checkouts and build sales reports.
#[async_trait]
pub trait CheckoutStore: Send + Sync {
    /// Runs one checkout as an atomic unit of work.
    async fn create_transaction(
        &self,
        items: Vec<CheckoutItem>,
        lock: LockMode,
    ) -> Result<Transaction, LedgerError>;

    /// Revenue, transaction count and best seller over `range`.
    async fn summary(&self, range: DateRange) -> DbResult<SalesSummary>;

    /// Whether the store answers queries.
    async fn health_check(&self) -> bool;

    /// Closes every pooled connection.
    async fn close(&self);
}

#[async_trait]
impl CheckoutStore for Database {
    async fn create_transaction(
        &self,
        items: Vec<CheckoutItem>,
        lock: LockMode,
    ) -> Result<Transaction, LedgerError> {
        self.ledger().create_transaction(items, lock).await
    }

    async fn summary(&self, range: DateRange) -> DbResult<SalesSummary> {
        self.reports().summary(range).await
    }

    async fn health_check(&self) -> bool {
        Database::health_check(self).await
    }

    async fn close(&self) {
        Database::close(self).await
    }
}
