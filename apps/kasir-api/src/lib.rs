//! # Kasir API
//!
//! HTTP server for checkout and sales reports.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Kasir API Server                                 │
//! │                                                                         │
//! │  POST /checkout          ─┐                                             │
//! │  GET  /report            ─┼─► handlers ─► CheckoutService ─► store     │
//! │  GET  /report/hari-ini   ─┘                (lock mode)     (kasir-db)   │
//! │  GET  /health                                                           │
//! │                                                                         │
//! │  Every route except /health is also mounted under /api.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod service;

use std::sync::Arc;

use anyhow::Context;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

use kasir_core::LockMode;
use kasir_db::{CheckoutStore, Database, DbConfig};

use crate::config::{ApiConfig, DatabaseUrl};
use crate::service::CheckoutService;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub service: CheckoutService,
}

impl AppState {
    pub fn new(store: Arc<dyn CheckoutStore>, lock: LockMode) -> Self {
        AppState {
            service: CheckoutService::new(store, lock),
        }
    }
}

/// Builds the router with every route and the request trace layer.
pub fn router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/checkout", post(handlers::checkout))
        .route("/report", get(handlers::report))
        .route("/report/hari-ini", get(handlers::report_today));

    Router::new()
        .merge(routes.clone())
        .nest("/api", routes)
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Opens the store named by the configuration.
pub async fn open_store(config: &ApiConfig) -> anyhow::Result<Arc<dyn CheckoutStore>> {
    match &config.database {
        DatabaseUrl::Sqlite(path) => {
            let mut db_config = DbConfig::new(path.clone());
            if let Some(max) = config.max_connections {
                db_config = db_config.max_connections(max);
            }
            let db = Database::new(db_config)
                .await
                .with_context(|| format!("failed to open SQLite store at {}", path.display()))?;
            info!(path = %path.display(), "SQLite store ready");
            Ok(Arc::new(db))
        }
        #[cfg(feature = "postgres")]
        DatabaseUrl::Postgres(url) => {
            let mut pg_config = kasir_db::PgConfig::new(url.clone());
            if let Some(max) = config.max_connections {
                pg_config = pg_config.max_connections(max);
            }
            let db = kasir_db::PgDatabase::connect(pg_config)
                .await
                .context("failed to connect to PostgreSQL")?;
            info!("PostgreSQL store ready");
            Ok(Arc::new(db))
        }
        #[cfg(not(feature = "postgres"))]
        DatabaseUrl::Postgres(_) => Err(config::ConfigError::UnsupportedDatabase(
            "postgres (rebuild with --features postgres)".to_string(),
        )
        .into()),
    }
}
