mod common;

use assert_matches::assert_matches;
use chrono::Utc;
use rust_decimal_macros::dec;

use stockroom_api::{
    errors::ServiceError,
    services::{
        orders::{OrderRequest, OrderService},
        product_orders::{ProductOrderRequest, ProductOrderService},
        products::ProductService,
    },
};

use common::{date, seed_customer, seed_order, seed_product, setup_db};

#[tokio::test]
async fn stock_is_deducted_with_every_committed_line() {
    let db = setup_db().await;
    let customer = seed_customer(&db, "Nora Osei").await;
    let product = seed_product(&db, "Basmati rice 5kg", 10, dec!(12.00), dec!(8.00)).await;
    let order = seed_order(&db, customer.customer_id, date(2024, 3, 1)).await;

    let lines = ProductOrderService::new(db.clone());
    let products = ProductService::new(db.clone());

    let first = lines
        .create(ProductOrderRequest {
            order_id: order.order_id,
            product_id: product.product_id,
            quantity: 4,
        })
        .await
        .expect("first line");
    assert_eq!(first.remaining_quantity, 6);
    assert_eq!(first.product_order.quantity, 4);

    let second = lines
        .create(ProductOrderRequest {
            order_id: order.order_id,
            product_id: product.product_id,
            quantity: 6,
        })
        .await
        .expect("second line");
    assert_eq!(second.remaining_quantity, 0);

    // Stock is exhausted: one more unit must be rejected with no write.
    let err = lines
        .create(ProductOrderRequest {
            order_id: order.order_id,
            product_id: product.product_id,
            quantity: 1,
        })
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::Validation(_));

    let stored = products.get(product.product_id).await.unwrap();
    assert_eq!(stored.quantity, 0);
    assert_eq!(lines.list().await.unwrap().len(), 2);
}

#[tokio::test]
async fn quantity_above_on_hand_fails_validation_without_writing() {
    let db = setup_db().await;
    let customer = seed_customer(&db, "Priya Shah").await;
    let product = seed_product(&db, "Espresso beans 1kg", 10, dec!(18.00), dec!(11.00)).await;
    let order = seed_order(&db, customer.customer_id, date(2024, 5, 20)).await;

    let lines = ProductOrderService::new(db.clone());
    let products = ProductService::new(db.clone());

    let err = lines
        .create(ProductOrderRequest {
            order_id: order.order_id,
            product_id: product.product_id,
            quantity: 11,
        })
        .await
        .unwrap_err();

    let ServiceError::Validation(failures) = err else {
        panic!("expected validation failure");
    };
    assert!(failures
        .0
        .iter()
        .any(|e| e.field == "quantity" && e.message.contains("10")));

    assert!(lines.list().await.unwrap().is_empty());
    assert_eq!(products.get(product.product_id).await.unwrap().quantity, 10);
}

#[tokio::test]
async fn unknown_foreign_ids_fail_validation_without_writing() {
    let db = setup_db().await;
    let customer = seed_customer(&db, "Liu Wen").await;
    let product = seed_product(&db, "Soap bar", 30, dec!(2.50), dec!(1.00)).await;
    let order = seed_order(&db, customer.customer_id, date(2024, 7, 4)).await;

    let lines = ProductOrderService::new(db.clone());

    // Unknown product id.
    let err = lines
        .create(ProductOrderRequest {
            order_id: order.order_id,
            product_id: product.product_id + 999,
            quantity: 1,
        })
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::Validation(_));

    // Unknown order id.
    let err = lines
        .create(ProductOrderRequest {
            order_id: order.order_id + 999,
            product_id: product.product_id,
            quantity: 1,
        })
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::Validation(_));

    // Both at once: the failure list names both fields.
    let err = lines
        .create(ProductOrderRequest {
            order_id: order.order_id + 999,
            product_id: product.product_id + 999,
            quantity: 1,
        })
        .await
        .unwrap_err();
    let ServiceError::Validation(failures) = err else {
        panic!("expected validation failure");
    };
    assert!(failures.0.iter().any(|e| e.field == "order_id"));
    assert!(failures.0.iter().any(|e| e.field == "product_id"));

    assert!(lines.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn order_creation_validates_customer_and_defaults_date() {
    let db = setup_db().await;
    let customer = seed_customer(&db, "Tomás Rivera").await;

    let orders = OrderService::new(db.clone());

    let err = orders
        .create(OrderRequest {
            customer_id: customer.customer_id + 7,
            order_date: None,
        })
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::Validation(_));
    assert!(orders.list().await.unwrap().is_empty());

    let before = Utc::now().date_naive();
    let order = orders
        .create(OrderRequest {
            customer_id: customer.customer_id,
            order_date: None,
        })
        .await
        .expect("order with defaulted date");
    let after = Utc::now().date_naive();
    assert!(order.order_date == before || order.order_date == after);
}

#[tokio::test]
async fn listed_rows_round_trip_through_get() {
    let db = setup_db().await;
    let customer = seed_customer(&db, "Amara Diallo").await;
    seed_product(&db, "Green tea 100g", 40, dec!(4.25), dec!(2.75)).await;
    seed_product(&db, "Black tea 100g", 15, dec!(3.75), dec!(2.25)).await;
    seed_order(&db, customer.customer_id, date(2023, 11, 11)).await;

    let products = ProductService::new(db.clone());
    let orders = OrderService::new(db.clone());

    for listed in products.list().await.unwrap() {
        let fetched = products.get(listed.product_id).await.unwrap();
        assert_eq!(listed, fetched);
    }

    for listed in orders.list().await.unwrap() {
        let fetched = orders.get(listed.order_id).await.unwrap();
        assert_eq!(listed, fetched);
    }
}

#[tokio::test]
async fn update_and_delete_miss_report_not_found() {
    let db = setup_db().await;
    let customer = seed_customer(&db, "Jonas Berg").await;
    let order = seed_order(&db, customer.customer_id, date(2024, 1, 15)).await;

    let orders = OrderService::new(db.clone());

    let err = orders
        .update(
            order.order_id + 50,
            OrderRequest {
                customer_id: customer.customer_id,
                order_date: Some(date(2024, 2, 1)),
            },
        )
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::NotFound(_));

    let err = orders.delete(order.order_id + 50).await.unwrap_err();
    assert_matches!(err, ServiceError::NotFound(_));

    // The real row is untouched and still deletable.
    orders.delete(order.order_id).await.expect("delete order");
    let err = orders.get(order.order_id).await.unwrap_err();
    assert_matches!(err, ServiceError::NotFound(_));
}

#[tokio::test]
async fn deleting_a_line_does_not_restock() {
    let db = setup_db().await;
    let customer = seed_customer(&db, "Hana Sato").await;
    let product = seed_product(&db, "Candles 6-pack", 20, dec!(7.50), dec!(4.50)).await;
    let order = seed_order(&db, customer.customer_id, date(2024, 9, 9)).await;

    let lines = ProductOrderService::new(db.clone());
    let products = ProductService::new(db.clone());

    let created = lines
        .create(ProductOrderRequest {
            order_id: order.order_id,
            product_id: product.product_id,
            quantity: 5,
        })
        .await
        .unwrap();
    assert_eq!(created.remaining_quantity, 15);

    lines
        .delete(created.product_order.product_order_id)
        .await
        .expect("delete line");

    assert_eq!(products.get(product.product_id).await.unwrap().quantity, 15);
}
