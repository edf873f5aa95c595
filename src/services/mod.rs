pub mod customers;
pub mod orders;
pub mod product_orders;
pub mod products;
pub mod reports;
pub mod suppliers;
