use super::common::{created_response, no_content_response, success_response};
use crate::{
    entities::product_order::Model as ProductOrder, errors::ServiceError, handlers::AppState,
    services::product_orders::ProductOrderRequest,
};
use axum::{
    extract::{Json, Path, State},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
struct GetProductOrderRequest {
    product_order_id: i32,
}

#[derive(Serialize)]
struct ProductOrderResponse {
    product_order: ProductOrder,
}

#[derive(Serialize)]
struct ProductOrderListResponse {
    product_orders: Vec<ProductOrder>,
}

async fn list_product_orders(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ServiceError> {
    let product_orders = state.services.product_orders.list().await?;
    Ok(success_response(ProductOrderListResponse { product_orders }))
}

async fn get_product_order(
    State(state): State<Arc<AppState>>,
    Json(request): Json<GetProductOrderRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let product_order = state
        .services
        .product_orders
        .get(request.product_order_id)
        .await?;
    Ok(success_response(ProductOrderResponse { product_order }))
}

/// Creation returns both the stored line and the product's remaining stock.
async fn create_product_order(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ProductOrderRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let created = state.services.product_orders.create(request).await?;
    Ok(created_response(created))
}

async fn update_product_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(request): Json<ProductOrderRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let product_order = state.services.product_orders.update(id, request).await?;
    Ok(success_response(ProductOrderResponse { product_order }))
}

async fn delete_product_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.product_orders.delete(id).await?;
    Ok(no_content_response())
}

pub fn product_order_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_product_orders).post(create_product_order))
        .route("/productOrder", post(get_product_order))
        .route("/update/:id", post(update_product_order))
        .route(
            "/delete/:id",
            post(delete_product_order).delete(delete_product_order),
        )
}
