use super::common::{created_response, no_content_response, success_response};
use crate::{
    entities::order::Model as Order, errors::ServiceError, handlers::AppState,
    services::orders::OrderRequest,
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
struct GetOrderRequest {
    order_id: i32,
}

#[derive(Serialize)]
struct OrderResponse {
    order: Order,
}

#[derive(Serialize)]
struct OrderListResponse {
    orders: Vec<Order>,
}

async fn list_orders(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ServiceError> {
    let orders = state.services.orders.list().await?;
    Ok(success_response(OrderListResponse { orders }))
}

async fn get_order(
    State(state): State<Arc<AppState>>,
    Json(request): Json<GetOrderRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let order = state.services.orders.get(request.order_id).await?;
    Ok(success_response(OrderResponse { order }))
}

async fn create_order(
    State(state): State<Arc<AppState>>,
    Json(request): Json<OrderRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let order = state.services.orders.create(request).await?;
    Ok(created_response(OrderResponse { order }))
}

async fn update_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(request): Json<OrderRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let order = state.services.orders.update(id, request).await?;
    Ok(success_response(OrderResponse { order }))
}

async fn delete_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.orders.delete(id).await?;
    Ok(no_content_response())
}

pub fn order_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_orders).post(create_order))
        .route("/order", post(get_order))
        .route("/update/:id", post(update_order))
        .route("/delete/:id", post(delete_order).delete(delete_order))
}
