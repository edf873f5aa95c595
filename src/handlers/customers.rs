use super::common::{created_response, no_content_response, success_response};
use crate::{
    entities::customer::Model as Customer, errors::ServiceError, handlers::AppState,
    services::customers::CustomerRequest,
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
struct GetCustomerRequest {
    customer_id: i32,
}

#[derive(Serialize)]
struct CustomerResponse {
    customer: Customer,
}

#[derive(Serialize)]
struct CustomerListResponse {
    customers: Vec<Customer>,
}

async fn list_customers(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ServiceError> {
    let customers = state.services.customers.list().await?;
    Ok(success_response(CustomerListResponse { customers }))
}

async fn get_customer(
    State(state): State<Arc<AppState>>,
    Json(request): Json<GetCustomerRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let customer = state.services.customers.get(request.customer_id).await?;
    Ok(success_response(CustomerResponse { customer }))
}

async fn create_customer(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CustomerRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let customer = state.services.customers.create(request).await?;
    Ok(created_response(CustomerResponse { customer }))
}

async fn update_customer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(request): Json<CustomerRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let customer = state.services.customers.update(id, request).await?;
    Ok(success_response(CustomerResponse { customer }))
}

async fn delete_customer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.customers.delete(id).await?;
    Ok(no_content_response())
}

pub fn customer_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_customers).post(create_customer))
        .route("/customer", post(get_customer))
        .route("/update/:id", post(update_customer))
        .route("/delete/:id", post(delete_customer).delete(delete_customer))
}
