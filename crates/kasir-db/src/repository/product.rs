//! # Product Repository
//!
//! Catalogue rows. Checkout only reads and decrements them through the
//! [`StockLedger`](super::ledger::StockLedger); this repository exists for
//! seeding and inspection.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use kasir_core::{NewProduct, Product};

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// let indomie = repo.insert(&NewProduct::new("Indomie Goreng", 3500, 10)).await?;
/// let product = repo.get_by_id(indomie.id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Inserts a new product and returns it with its store-assigned id.
    ///
    /// ## Errors
    /// * `DbError::CheckViolation` - negative price or stock
    pub async fn insert(&self, product: &NewProduct) -> DbResult<Product> {
        debug!(name = %product.name, price = product.price, stock = product.stock, "Inserting product");

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO products (name, price, stock)
            VALUES (?1, ?2, ?3)
            RETURNING id
            "#,
        )
        .bind(&product.name)
        .bind(product.price)
        .bind(product.stock)
        .fetch_one(&self.pool)
        .await?;

        Ok(Product {
            id,
            name: product.name.clone(),
            price: product.price,
            stock: product.stock,
        })
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, price, stock
            FROM products
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Lists all products ordered by id.
    pub async fn list(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, price, stock
            FROM products
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Counts products.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::error::DbError;
    use crate::pool::{Database, DbConfig};
    use kasir_core::NewProduct;

    #[tokio::test]
    async fn test_insert_and_get() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products();

        let indomie = repo
            .insert(&NewProduct::new("Indomie Goreng", 3500, 10))
            .await
            .unwrap();
        assert!(indomie.id > 0);

        let loaded = repo.get_by_id(indomie.id).await.unwrap().unwrap();
        assert_eq!(loaded, indomie);

        assert!(repo.get_by_id(indomie.id + 100).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_and_count() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products();

        repo.insert(&NewProduct::new("Indomie Goreng", 3500, 10)).await.unwrap();
        repo.insert(&NewProduct::new("Vit 1000ml", 3000, 40)).await.unwrap();

        let names: Vec<String> = repo.list().await.unwrap().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Indomie Goreng", "Vit 1000ml"]);
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_negative_stock_is_refused() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let err = db
            .products()
            .insert(&NewProduct::new("Broken", 1000, -1))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::CheckViolation { .. }));
    }
}
