//! # Category Routes

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use kasir_core::validation::validate_new_category;
use kasir_core::{Category, CategoryId, NewCategory};
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::routes::MessageResponse;
use crate::state::AppState;

pub async fn list_categories(State(state): State<AppState>) -> ApiResult<Json<Vec<Category>>> {
    Ok(Json(state.db().categories().list().await?))
}

pub async fn create_category(
    State(state): State<AppState>,
    payload: Result<Json<NewCategory>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Category>)> {
    let Json(payload) = payload?;
    validate_new_category(&payload)?;

    let category = state.db().categories().insert(&payload).await?;

    info!(id = category.id, name = %category.name, "Category created");
    Ok((StatusCode::CREATED, Json(category)))
}

pub async fn get_category(
    State(state): State<AppState>,
    id: Result<Path<CategoryId>, PathRejection>,
) -> ApiResult<Json<Category>> {
    let Path(id) = id?;

    state
        .db()
        .categories()
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Category", id))
}

pub async fn update_category(
    State(state): State<AppState>,
    id: Result<Path<CategoryId>, PathRejection>,
    payload: Result<Json<NewCategory>, JsonRejection>,
) -> ApiResult<Json<Category>> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    validate_new_category(&payload)?;

    Ok(Json(state.db().categories().update(id, &payload).await?))
}

pub async fn delete_category(
    State(state): State<AppState>,
    id: Result<Path<CategoryId>, PathRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Path(id) = id?;

    state.db().categories().delete(id).await?;

    info!(id, "Category deleted");
    Ok(Json(MessageResponse::new("Category deleted")))
}
