//! # Summary Aggregator
//!
//! Revenue, transaction count and best seller over a date window.
//!
//! ```text
//! DateRange { start: 2026-01-01, end: 2026-01-31 }
//!      │
//!      ▼  WHERE DATE(t.created_at) >= start AND DATE(t.created_at) <= end
//! ┌───────────────────────────┐   ┌──────────────────────────────────────┐
//! │ SUM(total_amount)         │   │ SUM(quantity) per product            │
//! │ COUNT(DISTINCT id)        │   │ ORDER BY qty DESC, id ASC LIMIT 1    │
//! └───────────────────────────┘   └──────────────────────────────────────┘
//!      │                                   │
//!      └────────────► SalesSummary ◄───────┘
//! ```
//!
//! The best seller's name comes from the current product row. Ties go to
//! the lowest product id.

use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use kasir_core::{BestProduct, DateRange, SalesSummary};

/// Read-only report queries.
#[derive(Debug, Clone)]
pub struct SummaryAggregator {
    pool: SqlitePool,
}

impl SummaryAggregator {
    /// Creates a new SummaryAggregator.
    pub fn new(pool: SqlitePool) -> Self {
        SummaryAggregator { pool }
    }

    /// Builds the sales summary for `range`. Both bounds are inclusive
    /// calendar days (UTC); a missing bound is unbounded.
    ///
    /// An empty window yields zeros and an empty best product.
    pub async fn summary(&self, range: DateRange) -> DbResult<SalesSummary> {
        debug!(start = ?range.start, end = ?range.end, "Building sales summary");

        let mut totals: QueryBuilder<Sqlite> = QueryBuilder::new(
            r#"
            SELECT
                CAST(COALESCE(SUM(t.total_amount), 0) AS INTEGER),
                COUNT(DISTINCT t.id)
            FROM transactions t
            "#,
        );
        push_window(&mut totals, range);

        let (total_revenue, total_transaction) = totals
            .build_query_as::<(i64, i64)>()
            .fetch_one(&self.pool)
            .await?;

        let mut best: QueryBuilder<Sqlite> = QueryBuilder::new(
            r#"
            SELECT p.name, CAST(SUM(td.quantity) AS INTEGER) AS total_quantity
            FROM transaction_details td
            JOIN transactions t ON td.transaction_id = t.id
            JOIN products p ON td.product_id = p.id
            "#,
        );
        push_window(&mut best, range);
        best.push(" GROUP BY p.id, p.name ORDER BY total_quantity DESC, p.id ASC LIMIT 1");

        let best_products = best
            .build_query_as::<(String, i64)>()
            .fetch_optional(&self.pool)
            .await?
            .map(|(name, quantity)| BestProduct { name, quantity })
            .unwrap_or_else(BestProduct::none);

        Ok(SalesSummary {
            total_revenue,
            total_transaction,
            best_products,
        })
    }
}

fn push_window(builder: &mut QueryBuilder<'_, Sqlite>, range: DateRange) {
    builder.push(" WHERE t.total_amount IS NOT NULL");
    if let Some(start) = range.start {
        builder.push(" AND DATE(t.created_at) >= ").push_bind(start);
    }
    if let Some(end) = range.end {
        builder.push(" AND DATE(t.created_at) <= ").push_bind(end);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
