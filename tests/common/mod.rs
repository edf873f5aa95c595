use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, Set};
use std::sync::Arc;

use stockroom_api::db::{self, DbConfig, DbPool};
use stockroom_api::entities::{customer, order, product};

/// Fresh in-memory database with the schema applied. A single pooled
/// connection keeps every statement on the same SQLite instance.
pub async fn setup_db() -> Arc<DbPool> {
    let config = DbConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        min_connections: 1,
        ..Default::default()
    };
    let pool = db::establish_connection_with_config(&config)
        .await
        .expect("Failed to create DB pool");
    db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");
    Arc::new(pool)
}

pub async fn seed_customer(db: &DbPool, name: &str) -> customer::Model {
    customer::ActiveModel {
        name: Set(name.to_string()),
        phone: Set("0123456789".to_string()),
        address: Set("1 Depot Road".to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to seed customer")
}

pub async fn seed_product(
    db: &DbPool,
    name: &str,
    quantity: i32,
    price: Decimal,
    cost: Decimal,
) -> product::Model {
    product::ActiveModel {
        name: Set(name.to_string()),
        quantity: Set(quantity),
        expiry_date: Set(NaiveDate::from_ymd_opt(2027, 1, 1).unwrap()),
        price_per_unit: Set(price),
        cost_per_unit: Set(cost),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to seed product")
}

pub async fn seed_order(db: &DbPool, customer_id: i32, order_date: NaiveDate) -> order::Model {
    order::ActiveModel {
        customer_id: Set(customer_id),
        order_date: Set(order_date),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to seed order")
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}
