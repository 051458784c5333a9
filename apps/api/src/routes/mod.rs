//! # Routes
//!
//! ## Route Map
//! ```text
//! GET     /health
//!
//! GET     /api/products?name=       POST /api/products
//! GET     /api/products/{id}        PUT  /api/products/{id}    DELETE /api/products/{id}
//!
//! GET     /api/categories           POST /api/categories
//! GET     /api/categories/{id}      PUT  /api/categories/{id}  DELETE /api/categories/{id}
//!
//! POST    /api/checkout
//! GET     /api/transactions/{id}    DELETE /api/transactions/{id}
//!
//! GET     /api/report?start_date=YYYY-MM-DD&end_date=YYYY-MM-DD
//! GET     /api/report/today
//! ```

use axum::routing::{get, post};
use axum::Router;
use serde::Serialize;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub mod category;
pub mod checkout;
pub mod health;
pub mod product;
pub mod report;

/// Builds the full application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/products", get(product::list_products).post(product::create_product))
        .route(
            "/api/products/{id}",
            get(product::get_product)
                .put(product::update_product)
                .delete(product::delete_product),
        )
        .route(
            "/api/categories",
            get(category::list_categories).post(category::create_category),
        )
        .route(
            "/api/categories/{id}",
            get(category::get_category)
                .put(category::update_category)
                .delete(category::delete_category),
        )
        .route("/api/checkout", post(checkout::create_checkout))
        .route(
            "/api/transactions/{id}",
            get(checkout::get_transaction).delete(checkout::delete_transaction),
        )
        .route("/api/report", get(report::sales_report))
        .route("/api/report/today", get(report::sales_report))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Body returned by delete endpoints.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        MessageResponse {
            message: message.into(),
        }
    }
}
