//! Stockroom API Library
//!
//! Inventory and order management: customer/supplier/product/order CRUD,
//! stock-adjusting order lines, and sales/profit reporting.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

// Core modules
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod migrator;
pub mod services;
pub mod validation;

use axum::{extract::State, http::StatusCode, response::Json, routing::get, Router};
use serde_json::{json, Value};
use std::sync::Arc;

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<db::DbPool>,
    pub config: config::AppConfig,
    pub services: handlers::AppServices,
}

/// The `/api` surface: five entity routers plus the report router.
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .nest("/customers", handlers::customers::customer_routes())
        .nest("/suppliers", handlers::suppliers::supplier_routes())
        .nest("/products", handlers::products::product_routes())
        .nest("/orders", handlers::orders::order_routes())
        .nest(
            "/productOrders",
            handlers::product_orders::product_order_routes(),
        )
        .nest("/reports", handlers::reports::report_routes())
}

async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<Value>) {
    match db::check_connection(&state.db).await {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "ok" }))),
        Err(_) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "unavailable" })),
        ),
    }
}

/// Builds the full application router over the shared state.
pub fn app_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(|| async { "stockroom-api up" }))
        .route("/health", get(health))
        .nest("/api", api_routes())
        .with_state(state)
}
