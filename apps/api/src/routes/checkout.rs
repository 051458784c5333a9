//! # Checkout and Transaction Routes
//!
//! ## Checkout Request
//! ```json
//! POST /api/checkout
//! { "items": [ { "product_id": 1, "quantity": 2 } ] }
//! ```
//! Responds `201` with the persisted transaction, lines under `details`.

use std::time::Instant;

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use kasir_core::{checkout, CartLine, Transaction, TransactionId};
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{ApiError, ApiResult};
use crate::routes::MessageResponse;
use crate::state::AppState;

/// Body of `POST /api/checkout`.
#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    /// A missing key is treated as an empty cart and rejected by validation.
    #[serde(default)]
    pub items: Vec<CartLine>,
}

pub async fn create_checkout(
    State(state): State<AppState>,
    payload: Result<Json<CheckoutRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Transaction>)> {
    let start = Instant::now();
    let Json(request) = payload?;

    debug!(lines = request.items.len(), "create_checkout handler");

    let transaction = checkout(&state.store(), &request.items).await?;

    info!(
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        transaction_id = transaction.id,
        total_amount = transaction.total_amount,
        "create_checkout complete"
    );

    Ok((StatusCode::CREATED, Json(transaction)))
}

pub async fn get_transaction(
    State(state): State<AppState>,
    id: Result<Path<TransactionId>, PathRejection>,
) -> ApiResult<Json<Transaction>> {
    let Path(id) = id?;

    state
        .db()
        .transactions()
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Transaction", id))
}

pub async fn delete_transaction(
    State(state): State<AppState>,
    id: Result<Path<TransactionId>, PathRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Path(id) = id?;

    state.db().transactions().delete(id).await?;

    Ok(Json(MessageResponse::new("Transaction deleted")))
}
