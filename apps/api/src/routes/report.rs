//! # Sales Report Routes
//!
//! `start_date` and `end_date` are calendar days (`YYYY-MM-DD`). When either
//! is missing the report covers today in UTC. Days expand to
//! `00:00:00..=23:59:59`.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use chrono::Utc;
use kasir_core::report::range_from_query;
use kasir_core::{get_sales_report, SalesReport};
use serde::Deserialize;
use tracing::debug;

use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Serves both `/api/report` and `/api/report/today`.
pub async fn sales_report(
    State(state): State<AppState>,
    query: Result<Query<ReportQuery>, QueryRejection>,
) -> ApiResult<Json<SalesReport>> {
    let Query(query) = query?;

    let today = Utc::now().date_naive();
    let range = range_from_query(query.start_date.as_deref(), query.end_date.as_deref(), today)?;

    debug!(start = %range.start, end = %range.end, "sales_report handler");

    let report = get_sales_report(&state.store(), range).await?;
    Ok(Json(report))
}
