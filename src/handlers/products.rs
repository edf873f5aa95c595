use super::common::{created_response, no_content_response, success_response};
use crate::{
    entities::product::Model as Product, errors::ServiceError, handlers::AppState,
    services::products::ProductRequest,
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
struct GetProductRequest {
    product_id: i32,
}

#[derive(Serialize)]
struct ProductResponse {
    product: Product,
}

#[derive(Serialize)]
struct ProductListResponse {
    products: Vec<Product>,
}

async fn list_products(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ServiceError> {
    let products = state.services.products.list().await?;
    Ok(success_response(ProductListResponse { products }))
}

async fn get_product(
    State(state): State<Arc<AppState>>,
    Json(request): Json<GetProductRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let product = state.services.products.get(request.product_id).await?;
    Ok(success_response(ProductResponse { product }))
}

async fn create_product(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ProductRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let product = state.services.products.create(request).await?;
    Ok(created_response(ProductResponse { product }))
}

async fn update_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(request): Json<ProductRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let product = state.services.products.update(id, request).await?;
    Ok(success_response(ProductResponse { product }))
}

async fn delete_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.products.delete(id).await?;
    Ok(no_content_response())
}

pub fn product_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/product", post(get_product))
        .route("/update/:id", post(update_product))
        .route("/delete/:id", post(delete_product).delete(delete_product))
}
