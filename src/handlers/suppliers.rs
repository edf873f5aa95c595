use super::common::{created_response, no_content_response, success_response};
use crate::{
    entities::supplier::Model as Supplier, errors::ServiceError, handlers::AppState,
    services::suppliers::SupplierRequest,
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
struct GetSupplierRequest {
    supplier_id: i32,
}

#[derive(Serialize)]
struct SupplierResponse {
    supplier: Supplier,
}

#[derive(Serialize)]
struct SupplierListResponse {
    suppliers: Vec<Supplier>,
}

async fn list_suppliers(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ServiceError> {
    let suppliers = state.services.suppliers.list().await?;
    Ok(success_response(SupplierListResponse { suppliers }))
}

async fn get_supplier(
    State(state): State<Arc<AppState>>,
    Json(request): Json<GetSupplierRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let supplier = state.services.suppliers.get(request.supplier_id).await?;
    Ok(success_response(SupplierResponse { supplier }))
}

async fn create_supplier(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SupplierRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let supplier = state.services.suppliers.create(request).await?;
    Ok(created_response(SupplierResponse { supplier }))
}

async fn update_supplier(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(request): Json<SupplierRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let supplier = state.services.suppliers.update(id, request).await?;
    Ok(success_response(SupplierResponse { supplier }))
}

async fn delete_supplier(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.suppliers.delete(id).await?;
    Ok(no_content_response())
}

pub fn supplier_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_suppliers).post(create_supplier))
        .route("/supplier", post(get_supplier))
        .route("/update/:id", post(update_supplier))
        .route("/delete/:id", post(delete_supplier).delete(delete_supplier))
}
