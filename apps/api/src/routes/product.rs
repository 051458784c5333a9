//! # Product Routes
//!
//! Catalogue maintenance over [`kasir_db::ProductRepository`].

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use kasir_core::validation::validate_new_product;
use kasir_core::{NewProduct, Product, ProductId};
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{ApiError, ApiResult};
use crate::routes::MessageResponse;
use crate::state::AppState;

/// Query string for `GET /api/products`.
#[derive(Debug, Default, Deserialize)]
pub struct ProductQuery {
    /// Case-insensitive substring of the product name.
    pub name: Option<String>,
}

pub async fn list_products(
    State(state): State<AppState>,
    query: Result<Query<ProductQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Product>>> {
    let Query(query) = query?;

    debug!(name = ?query.name, "list_products handler");

    let products = state.db().products().list(query.name.as_deref()).await?;
    Ok(Json(products))
}

pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<NewProduct>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Product>)> {
    let Json(payload) = payload?;
    validate_new_product(&payload)?;

    let product = state.db().products().insert(&payload).await?;

    info!(id = product.id, name = %product.name, "Product created");
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn get_product(
    State(state): State<AppState>,
    id: Result<Path<ProductId>, PathRejection>,
) -> ApiResult<Json<Product>> {
    let Path(id) = id?;

    debug!(id, "get_product handler");

    state
        .db()
        .products()
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Product", id))
}

pub async fn update_product(
    State(state): State<AppState>,
    id: Result<Path<ProductId>, PathRejection>,
    payload: Result<Json<NewProduct>, JsonRejection>,
) -> ApiResult<Json<Product>> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    validate_new_product(&payload)?;

    let product = state.db().products().update(id, &payload).await?;

    info!(id, "Product updated");
    Ok(Json(product))
}

pub async fn delete_product(
    State(state): State<AppState>,
    id: Result<Path<ProductId>, PathRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Path(id) = id?;

    state.db().products().delete(id).await?;

    info!(id, "Product deleted");
    Ok(Json(MessageResponse::new("Product deleted")))
}
