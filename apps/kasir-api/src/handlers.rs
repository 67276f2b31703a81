//! HTTP handlers.
//!
//! Each handler checks the request shape, calls the service and serializes
//! the result. Business rules live in kasir-core, SQL in kasir-db.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use kasir_core::validation::validate_date_range;
use kasir_core::{CheckoutRequest, DateRange, SalesSummary, Transaction};

use crate::error::ApiError;
use crate::AppState;

/// Query string of `GET /report`.
#[derive(Debug, Default, Deserialize)]
pub struct ReportParams {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Body of `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub database: bool,
}

/// `POST /checkout`
pub async fn checkout(
    State(state): State<AppState>,
    payload: Result<Json<CheckoutRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Transaction>), ApiError> {
    let Json(request) = payload?;
    let txn = state.service.checkout(request.items).await?;
    Ok((StatusCode::CREATED, Json(txn)))
}

/// `GET /report?start_date=YYYY-MM-DD&end_date=YYYY-MM-DD`
pub async fn report(
    State(state): State<AppState>,
    Query(params): Query<ReportParams>,
) -> Result<Json<SalesSummary>, ApiError> {
    let range = validate_date_range(params.start_date.as_deref(), params.end_date.as_deref())?;
    let summary = state.service.summary(range).await?;
    Ok(Json(summary))
}

/// `GET /report/hari-ini`: the current UTC day.
pub async fn report_today(State(state): State<AppState>) -> Result<Json<SalesSummary>, ApiError> {
    let today = Utc::now().date_naive();
    let summary = state.service.summary(DateRange::single_day(today)).await?;
    Ok(Json(summary))
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        message: "API is running",
        database: state.service.health().await,
    })
}
