use super::common::success_response;
use crate::{
    entities::product_order::Model as ProductOrder,
    errors::ServiceError,
    handlers::AppState,
    services::reports::{BillReport, CustomerOrderLine},
};
use axum::{
    extract::{Json, State},
    response::IntoResponse,
    routing::post,
    Router,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

// Request and response DTOs

#[derive(Debug, Deserialize)]
struct ProductReportRequest {
    product_id: i32,
}

#[derive(Debug, Deserialize)]
struct ProductYearRequest {
    product_id: i32,
    year: i32,
}

#[derive(Debug, Deserialize)]
struct CustomerReportRequest {
    customer_id: i32,
}

#[derive(Debug, Deserialize)]
struct CustomerYearRequest {
    customer_id: i32,
    year: i32,
}

#[derive(Debug, Deserialize)]
struct OrderReportRequest {
    order_id: i32,
}

#[derive(Serialize)]
struct ProductOrderRowsResponse {
    orders: Vec<ProductOrder>,
}

#[derive(Serialize)]
struct CustomerOrderLinesResponse {
    orders: Vec<CustomerOrderLine>,
}

#[derive(Serialize)]
struct OrderDetailsResponse {
    order_details: Vec<ProductOrder>,
}

#[derive(Serialize)]
struct YearlyQuantityResponse {
    total_quantity_ordered: i64,
}

#[derive(Serialize)]
struct YearlySalesResponse {
    total_sales_revenue: Decimal,
}

#[derive(Serialize)]
struct YearlyProfitResponse {
    total_profit: Decimal,
}

#[derive(Serialize)]
struct OrderTotalResponse {
    total: Decimal,
}

#[derive(Serialize)]
struct BillResponse {
    bill: BillReport,
}

// Handler functions

async fn orders_by_product(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ProductReportRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let orders = state
        .services
        .reports
        .orders_by_product(request.product_id)
        .await?;
    Ok(success_response(ProductOrderRowsResponse { orders }))
}

async fn product_orders_by_customer(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CustomerReportRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let orders = state
        .services
        .reports
        .product_orders_by_customer(request.customer_id)
        .await?;
    Ok(success_response(CustomerOrderLinesResponse { orders }))
}

async fn order_details(
    State(state): State<Arc<AppState>>,
    Json(request): Json<OrderReportRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let order_details = state.services.reports.order_details(request.order_id).await?;
    Ok(success_response(OrderDetailsResponse { order_details }))
}

async fn product_yearly_orders(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ProductYearRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let total_quantity_ordered = state
        .services
        .reports
        .product_yearly_orders(request.product_id, request.year)
        .await?;
    Ok(success_response(YearlyQuantityResponse {
        total_quantity_ordered,
    }))
}

async fn product_yearly_sales(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ProductYearRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let total_sales_revenue = state
        .services
        .reports
        .product_yearly_sales(request.product_id, request.year)
        .await?;
    Ok(success_response(YearlySalesResponse {
        total_sales_revenue,
    }))
}

async fn product_yearly_profit(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ProductYearRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let total_profit = state
        .services
        .reports
        .product_yearly_profit(request.product_id, request.year)
        .await?;
    Ok(success_response(YearlyProfitResponse { total_profit }))
}

async fn customer_yearly_orders(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CustomerYearRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let orders = state
        .services
        .reports
        .customer_yearly_orders(request.customer_id, request.year)
        .await?;
    Ok(success_response(CustomerOrderLinesResponse { orders }))
}

async fn order_total(
    State(state): State<Arc<AppState>>,
    Json(request): Json<OrderReportRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let total = state.services.reports.order_total(request.order_id).await?;
    Ok(success_response(OrderTotalResponse { total }))
}

async fn bill(
    State(state): State<Arc<AppState>>,
    Json(request): Json<OrderReportRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let bill = state.services.reports.bill(request.order_id).await?;
    Ok(success_response(BillResponse { bill }))
}

/// Creates the router for report endpoints
pub fn report_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/prodIdOrders", post(orders_by_product))
        .route("/customerOrders", post(product_orders_by_customer))
        .route("/orderDetails", post(order_details))
        .route("/prodYearlyOrders", post(product_yearly_orders))
        .route("/prodYearlySales", post(product_yearly_sales))
        .route("/prodYearlyProfit", post(product_yearly_profit))
        .route("/customerYearlyOrders", post(customer_yearly_orders))
        .route("/orderTotal", post(order_total))
        .route("/bills", post(bill))
}
