pub mod common;
pub mod customers;
pub mod orders;
pub mod product_orders;
pub mod products;
pub mod reports;
pub mod suppliers;

use crate::db::DbPool;
use crate::services::{
    customers::CustomerService, orders::OrderService, product_orders::ProductOrderService,
    products::ProductService, reports::ReportService, suppliers::SupplierService,
};
use std::sync::Arc;

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

/// Services layer that encapsulates business logic used by HTTP handlers
#[derive(Clone)]
pub struct AppServices {
    pub customers: Arc<CustomerService>,
    pub suppliers: Arc<SupplierService>,
    pub products: Arc<ProductService>,
    pub orders: Arc<OrderService>,
    pub product_orders: Arc<ProductOrderService>,
    pub reports: Arc<ReportService>,
}

impl AppServices {
    /// Builds the service container over one injected pool handle.
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self {
            customers: Arc::new(CustomerService::new(db_pool.clone())),
            suppliers: Arc::new(SupplierService::new(db_pool.clone())),
            products: Arc::new(ProductService::new(db_pool.clone())),
            orders: Arc::new(OrderService::new(db_pool.clone())),
            product_orders: Arc::new(ProductOrderService::new(db_pool.clone())),
            reports: Arc::new(ReportService::new(db_pool)),
        }
    }
}
