//! # Stock Ledger
//!
//! Runs a checkout as one unit of work against the SQLite store.
//!
//! ## Unit of Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CheckoutPlan::new(items)        ← rejects bad input, no store access  │
//! │       │                                                                 │
//! │  BEGIN                                                                  │
//! │       │                                                                 │
//! │  for each step (ascending product id):                                 │
//! │     ├── lock claim      UPDATE products SET stock = stock WHERE id     │
//! │     ├── read            SELECT name, price, stock                      │
//! │     ├── tally.record    ProductNotFound / InsufficientStock            │
//! │     └── decrement       UPDATE products SET stock = stock - qty        │
//! │       │                                                                 │
//! │  INSERT INTO transactions ... RETURNING id                             │
//! │  INSERT INTO transaction_details VALUES (...), (...), ...              │
//! │       │                                                                 │
//! │  COMMIT                   any error above: ROLLBACK, nothing persists  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Locking on SQLite
//! SQLite has no row locks. Under [`LockMode::Exclusive`] the first statement
//! of the unit of work is a no-op write to the product row, which takes the
//! database write lock before anything is read. Competing checkouts wait in
//! the busy handler and read committed stock once they get the lock. Lock
//! granularity is the whole database.
//!
//! Under [`LockMode::Unlocked`] the read comes first. A checkout whose
//! snapshot went stale fails its decrement with a busy error instead of
//! overselling.

use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};
use tracing::{debug, info};

use crate::error::{DbError, DbResult, LedgerError};
use kasir_core::checkout::{CheckoutPlan, CheckoutTally, StockSnapshot};
use kasir_core::{CheckoutItem, LockMode, Transaction, TransactionDetail};

/// Executes checkouts and reads back what they recorded.
#[derive(Debug, Clone)]
pub struct StockLedger {
    pool: SqlitePool,
}

impl StockLedger {
    /// Creates a new StockLedger.
    pub fn new(pool: SqlitePool) -> Self {
        StockLedger { pool }
    }

    /// Converts a checkout request into stock decrements and a stored
    /// transaction, atomically.
    ///
    /// ## Errors
    /// * `LedgerError::Rejected` - invalid input, missing product, short stock,
    ///   amount overflow
    /// * `LedgerError::Store` - anything the store reports, lock timeouts included
    ///
    /// On any error the store is left exactly as it was.
    pub async fn create_transaction(
        &self,
        items: Vec<CheckoutItem>,
        lock: LockMode,
    ) -> Result<Transaction, LedgerError> {
        let plan = CheckoutPlan::new(items)?;

        debug!(lines = plan.len(), lock = ?lock, "Starting checkout");

        let mut tx = self.pool.begin().await?;
        let mut tally = CheckoutTally::for_plan(&plan);

        for step in plan.steps() {
            let product_id = step.item.product_id;

            if lock.is_exclusive() {
                claim_row(&mut tx, product_id).await?;
            }

            let snapshot = read_stock(&mut tx, product_id).await?;
            let remaining = tally.record(step, snapshot)?;
            decrement_stock(&mut tx, product_id, step.item.quantity).await?;

            debug!(product_id, quantity = step.item.quantity, remaining, "Line recorded");
        }

        let (total, details) = tally.finish();
        let created_at = Utc::now();

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO transactions (total_amount, created_at)
            VALUES (?1, ?2)
            RETURNING id
            "#,
        )
        .bind(total.amount())
        .bind(created_at)
        .fetch_one(&mut *tx)
        .await?;

        insert_details(&mut tx, id, &details).await?;

        tx.commit().await?;

        info!(transaction_id = id, total = %total, lines = details.len(), "Checkout committed");

        Ok(Transaction {
            id,
            total_amount: total.amount(),
            details,
            created_at,
        })
    }

    /// Loads a stored transaction with its details in insertion order.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Transaction>> {
        let header: Option<(i64, i64, DateTime<Utc>)> = sqlx::query_as(
            r#"
            SELECT id, total_amount, created_at
            FROM transactions
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some((id, total_amount, created_at)) = header else {
            return Ok(None);
        };

        Ok(Some(Transaction {
            id,
            total_amount,
            details: self.details_of(id).await?,
            created_at,
        }))
    }

    /// Details of one transaction, in the order the checkout listed them.
    pub async fn details_of(&self, transaction_id: i64) -> DbResult<Vec<TransactionDetail>> {
        let details = sqlx::query_as::<_, TransactionDetail>(
            r#"
            SELECT product_id, product_name, quantity, subtotal
            FROM transaction_details
            WHERE transaction_id = ?1
            ORDER BY id
            "#,
        )
        .bind(transaction_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(details)
    }

    /// Number of stored transactions.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM transactions")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Statements
// =============================================================================

/// Takes the write lock before the row is read.
async fn claim_row(conn: &mut SqliteConnection, product_id: i64) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE products SET stock = stock WHERE id = ?1")
        .bind(product_id)
        .execute(conn)
        .await?;
    Ok(())
}

async fn read_stock(
    conn: &mut SqliteConnection,
    product_id: i64,
) -> Result<Option<StockSnapshot>, sqlx::Error> {
    let row: Option<(String, i64, i64)> =
        sqlx::query_as("SELECT name, price, stock FROM products WHERE id = ?1")
            .bind(product_id)
            .fetch_optional(conn)
            .await?;

    Ok(row.map(|(name, price, stock)| StockSnapshot { name, price, stock }))
}

async fn decrement_stock(
    conn: &mut SqliteConnection,
    product_id: i64,
    quantity: i64,
) -> Result<(), DbError> {
    let result = sqlx::query("UPDATE products SET stock = stock - ?1 WHERE id = ?2")
        .bind(quantity)
        .bind(product_id)
        .execute(conn)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::not_found("product", product_id));
    }
    Ok(())
}

/// Inserts every detail in one statement, preserving their order.
async fn insert_details(
    conn: &mut SqliteConnection,
    transaction_id: i64,
    details: &[TransactionDetail],
) -> Result<(), sqlx::Error> {
    let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(
        "INSERT INTO transaction_details (transaction_id, product_id, product_name, quantity, subtotal) ",
    );

    builder.push_values(details, |mut row, detail| {
        row.push_bind(transaction_id)
            .push_bind(detail.product_id)
            .push_bind(detail.product_name.clone())
            .push_bind(detail.quantity)
            .push_bind(detail.subtotal);
    });

    builder.build().execute(conn).await?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use kasir_core::{CoreError, ErrorKind, NewProduct, Product};

    async fn setup() -> (Database, Product, Product) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let indomie = db
            .products()
            .insert(&NewProduct::new("Indomie Goreng", 3500, 10))
            .await
            .unwrap();
        let vit = db
            .products()
            .insert(&NewProduct::new("Vit 1000ml", 3000, 40))
            .await
            .unwrap();
        (db, indomie, vit)
    }

    async fn stock_of(db: &Database, id: i64) -> i64 {
        db.products().get_by_id(id).await.unwrap().unwrap().stock
    }

    #[tokio::test]
    async fn test_indomie_checkout() {
        let (db, indomie, _) = setup().await;
        let ledger = db.ledger();

        let txn = ledger
            .create_transaction(vec![CheckoutItem::new(indomie.id, 3)], LockMode::Exclusive)
            .await
            .unwrap();

        assert_eq!(txn.total_amount, 10_500);
        assert_eq!(
            txn.details,
            vec![TransactionDetail {
                product_id: indomie.id,
                product_name: "Indomie Goreng".to_string(),
                quantity: 3,
                subtotal: 10_500,
            }]
        );
        assert_eq!(stock_of(&db, indomie.id).await, 7);

        let err = ledger
            .create_transaction(vec![CheckoutItem::new(indomie.id, 8)], LockMode::Exclusive)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Rejected(CoreError::InsufficientStock {
                available: 7,
                requested: 8,
                ..
            })
        ));
        assert_eq!(stock_of(&db, indomie.id).await, 7);
        assert_eq!(ledger.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_stored_transaction_matches_result() {
        let (db, indomie, vit) = setup().await;
        let ledger = db.ledger();

        let txn = ledger
            .create_transaction(
                vec![CheckoutItem::new(vit.id, 2), CheckoutItem::new(indomie.id, 1)],
                LockMode::Exclusive,
            )
            .await
            .unwrap();

        // Request order, even though the ledger visited indomie first
        let ids: Vec<i64> = txn.details.iter().map(|d| d.product_id).collect();
        assert_eq!(ids, vec![vit.id, indomie.id]);
        assert_eq!(txn.total_amount, 2 * 3000 + 3500);
        assert_eq!(
            txn.total_amount,
            txn.details.iter().map(|d| d.subtotal).sum::<i64>()
        );

        let stored = ledger.get_by_id(txn.id).await.unwrap().unwrap();
        assert_eq!(stored.total_amount, txn.total_amount);
        assert_eq!(stored.details, txn.details);
        assert_eq!(
            stored.created_at.timestamp_millis(),
            txn.created_at.timestamp_millis()
        );
        assert!(ledger.get_by_id(txn.id + 1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_details_survive_product_rename() {
        let (db, indomie, _) = setup().await;
        let ledger = db.ledger();

        let txn = ledger
            .create_transaction(vec![CheckoutItem::new(indomie.id, 2)], LockMode::Exclusive)
            .await
            .unwrap();

        sqlx::query("UPDATE products SET name = ?1, price = ?2 WHERE id = ?3")
            .bind("Indomie Goreng Jumbo")
            .bind(5000_i64)
            .bind(indomie.id)
            .execute(db.pool())
            .await
            .unwrap();

        let stored = ledger.get_by_id(txn.id).await.unwrap().unwrap();
        assert_eq!(stored.details.len(), 1);
        assert_eq!(stored.details[0].product_name, "Indomie Goreng");
        assert_eq!(stored.details[0].subtotal, 7000);
        assert_eq!(stored.total_amount, 7000);
    }

    #[tokio::test]
    async fn test_failure_on_later_line_rolls_back_earlier_lines() {
        let (db, indomie, vit) = setup().await;
        let ledger = db.ledger();

        let err = ledger
            .create_transaction(
                vec![CheckoutItem::new(indomie.id, 2), CheckoutItem::new(vit.id + 50, 1)],
                LockMode::Exclusive,
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ProductNotFound);

        let err = ledger
            .create_transaction(
                vec![CheckoutItem::new(indomie.id, 2), CheckoutItem::new(vit.id, 41)],
                LockMode::Exclusive,
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InsufficientStock);

        assert_eq!(stock_of(&db, indomie.id).await, 10);
        assert_eq!(stock_of(&db, vit.id).await, 40);
        assert_eq!(ledger.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_invalid_quantity_never_reaches_the_store() {
        let (db, indomie, _) = setup().await;
        let ledger = db.ledger();
        db.close().await;

        // A closed pool would fail any query, so this error proves none ran
        let err = ledger
            .create_transaction(
                vec![CheckoutItem::new(indomie.id, 1), CheckoutItem::new(indomie.id, 0)],
                LockMode::Exclusive,
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidQuantity);

        let err = ledger
            .create_transaction(vec![], LockMode::Exclusive)
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::Rejected(CoreError::EmptyCheckout)));
    }

    #[tokio::test]
    async fn test_closed_pool_is_a_store_error() {
        let (db, indomie, _) = setup().await;
        db.close().await;

        let err = db
            .ledger()
            .create_transaction(vec![CheckoutItem::new(indomie.id, 1)], LockMode::Exclusive)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Store);
    }

    #[tokio::test]
    async fn test_duplicate_lines_see_earlier_decrements() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let kecap = db
            .products()
            .insert(&NewProduct::new("Kecap", 12_000, 5))
            .await
            .unwrap();
        let ledger = db.ledger();

        let err = ledger
            .create_transaction(
                vec![CheckoutItem::new(kecap.id, 3), CheckoutItem::new(kecap.id, 3)],
                LockMode::Exclusive,
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Rejected(CoreError::InsufficientStock {
                available: 2,
                requested: 3,
                ..
            })
        ));
        assert_eq!(stock_of(&db, kecap.id).await, 5);

        let txn = ledger
            .create_transaction(
                vec![CheckoutItem::new(kecap.id, 2), CheckoutItem::new(kecap.id, 3)],
                LockMode::Exclusive,
            )
            .await
            .unwrap();
        assert_eq!(txn.details.len(), 2);
        assert_eq!(txn.details[0].quantity, 2);
        assert_eq!(txn.details[1].quantity, 3);
        assert_eq!(txn.total_amount, 60_000);
        assert_eq!(stock_of(&db, kecap.id).await, 0);
    }

    #[tokio::test]
    async fn test_unlocked_checkout_applies_the_same_rules() {
        let (db, indomie, _) = setup().await;

        let txn = db
            .ledger()
            .create_transaction(vec![CheckoutItem::new(indomie.id, 10)], LockMode::Unlocked)
            .await
            .unwrap();
        assert_eq!(txn.total_amount, 35_000);
        assert_eq!(stock_of(&db, indomie.id).await, 0);

        let err = db
            .ledger()
            .create_transaction(vec![CheckoutItem::new(indomie.id, 1)], LockMode::Unlocked)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InsufficientStock);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_locked_checkouts_never_oversell() {
        const STOCK: i64 = 10;

        let dir = tempfile::tempdir().unwrap();
        let config = DbConfig::new(dir.path().join("kasir.db")).max_connections(8);
        let db = Database::new(config).await.unwrap();
        let indomie = db
            .products()
            .insert(&NewProduct::new("Indomie Goreng", 3500, STOCK))
            .await
            .unwrap();

        let mut handles = Vec::new();
        for _ in 0..=STOCK {
            let ledger = db.ledger();
            let id = indomie.id;
            handles.push(tokio::spawn(async move {
                ledger
                    .create_transaction(vec![CheckoutItem::new(id, 1)], LockMode::Exclusive)
                    .await
            }));
        }

        let mut succeeded = 0;
        let mut short = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => succeeded += 1,
                Err(e) => {
                    assert_eq!(e.kind(), ErrorKind::InsufficientStock, "{e}");
                    short += 1;
                }
            }
        }

        assert_eq!(succeeded, STOCK);
        assert_eq!(short, 1);
        assert_eq!(stock_of(&db, indomie.id).await, 0);
        assert_eq!(db.ledger().count().await.unwrap(), STOCK);
    }
}
