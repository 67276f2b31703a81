//! Checkout service.
//!
//! A thin pass-through between handlers and the store. It fixes the lock
//! mode, opens one tracing span per call and never reclassifies errors.

use std::sync::Arc;

use tracing::{debug, instrument, Span};

use kasir_core::{CheckoutItem, DateRange, LockMode, SalesSummary, Transaction};
use kasir_db::{CheckoutStore, DbResult, LedgerError};

#[derive(Clone)]
pub struct CheckoutService {
    store: Arc<dyn CheckoutStore>,
    lock: LockMode,
}

impl CheckoutService {
    pub fn new(store: Arc<dyn CheckoutStore>, lock: LockMode) -> Self {
        CheckoutService { store, lock }
    }

    /// Runs one checkout with the configured lock mode.
    #[instrument(
        name = "checkout",
        skip_all,
        fields(lines = items.len(), lock = ?self.lock, outcome = tracing::field::Empty)
    )]
    pub async fn checkout(&self, items: Vec<CheckoutItem>) -> Result<Transaction, LedgerError> {
        let result = self.store.create_transaction(items, self.lock).await;

        let outcome = match &result {
            Ok(txn) => {
                debug!(transaction_id = txn.id, total = txn.total_amount, "Checkout done");
                "committed"
            }
            Err(e) if e.kind().is_business() => "rejected",
            Err(_) => "failed",
        };
        Span::current().record("outcome", outcome);

        result
    }

    /// Sales summary over `range`.
    #[instrument(name = "summary", skip(self), fields(start = ?range.start, end = ?range.end))]
    pub async fn summary(&self, range: DateRange) -> DbResult<SalesSummary> {
        self.store.summary(range).await
    }

    pub async fn health(&self) -> bool {
        self.store.health_check().await
    }

    pub async fn shutdown(&self) {
        self.store.close().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kasir_core::{ErrorKind, NewProduct};
    use kasir_db::{Database, DbConfig};

    #[tokio::test]
    async fn test_service_passes_errors_through() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let kecap = db
            .products()
            .insert(&NewProduct::new("Kecap", 12_000, 20))
            .await
            .unwrap();
        let service = CheckoutService::new(Arc::new(db), LockMode::Exclusive);

        let txn = service
            .checkout(vec![CheckoutItem::new(kecap.id, 2)])
            .await
            .unwrap();
        assert_eq!(txn.total_amount, 24_000);

        let err = service
            .checkout(vec![CheckoutItem::new(kecap.id, 19)])
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InsufficientStock);

        let summary = service.summary(DateRange::unbounded()).await.unwrap();
        assert_eq!(summary.total_revenue, 24_000);
        assert!(service.health().await);
    }
}
