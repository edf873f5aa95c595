mod common;

use chrono::Datelike;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;

use stockroom_api::{
    db::DbPool,
    services::{
        product_orders::{ProductOrderRequest, ProductOrderService},
        reports::ReportService,
    },
};

use common::{date, seed_customer, seed_order, seed_product, setup_db};

async fn add_line(db: &Arc<DbPool>, order_id: i32, product_id: i32, quantity: i32) {
    ProductOrderService::new(db.clone())
        .create(ProductOrderRequest {
            order_id,
            product_id,
            quantity,
        })
        .await
        .expect("Failed to add order line");
}

/// Two customers, two products, orders across two years.
struct Fixture {
    reports: ReportService,
    customer1: i32,
    customer2: i32,
    product1: i32,
    product2: i32,
    order1: i32,
    empty_order: i32,
}

async fn seed_fixture(db: &Arc<DbPool>) -> Fixture {
    let c1 = seed_customer(db, "Maya Lindqvist").await;
    let c2 = seed_customer(db, "Omar Haddad").await;
    let p1 = seed_product(db, "Honey 500g", 100, dec!(5.00), dec!(3.00)).await;
    let p2 = seed_product(db, "Oat flakes 1kg", 50, dec!(2.50), dec!(1.00)).await;

    let o1 = seed_order(db, c1.customer_id, date(2024, 3, 1)).await;
    let o2 = seed_order(db, c1.customer_id, date(2024, 10, 15)).await;
    let o3 = seed_order(db, c2.customer_id, date(2024, 6, 5)).await;
    let o4 = seed_order(db, c1.customer_id, date(2023, 8, 20)).await;
    let o5 = seed_order(db, c2.customer_id, date(2024, 12, 24)).await;

    add_line(db, o1.order_id, p1.product_id, 4).await;
    add_line(db, o1.order_id, p2.product_id, 2).await;
    add_line(db, o2.order_id, p1.product_id, 3).await;
    add_line(db, o3.order_id, p1.product_id, 5).await;
    add_line(db, o3.order_id, p2.product_id, 10).await;
    add_line(db, o4.order_id, p1.product_id, 7).await;

    Fixture {
        reports: ReportService::new(db.clone()),
        customer1: c1.customer_id,
        customer2: c2.customer_id,
        product1: p1.product_id,
        product2: p2.product_id,
        order1: o1.order_id,
        empty_order: o5.order_id,
    }
}

#[tokio::test]
async fn yearly_quantity_sums_only_the_requested_year() {
    let db = setup_db().await;
    let fx = seed_fixture(&db).await;

    assert_eq!(
        fx.reports
            .product_yearly_orders(fx.product1, 2024)
            .await
            .unwrap(),
        12
    );
    assert_eq!(
        fx.reports
            .product_yearly_orders(fx.product1, 2023)
            .await
            .unwrap(),
        7
    );
    assert_eq!(
        fx.reports
            .product_yearly_orders(fx.product2, 2024)
            .await
            .unwrap(),
        12
    );
    // No orders at all in that year: the null sum reads as zero.
    assert_eq!(
        fx.reports
            .product_yearly_orders(fx.product2, 2020)
            .await
            .unwrap(),
        0
    );
}

#[tokio::test]
async fn yearly_revenue_and_profit_follow_the_aggregation_laws() {
    let db = setup_db().await;
    let fx = seed_fixture(&db).await;

    // Revenue = price * summed quantity: 5.00 * 12 and 2.50 * 12.
    assert_eq!(
        fx.reports
            .product_yearly_sales(fx.product1, 2024)
            .await
            .unwrap(),
        dec!(60.00)
    );
    assert_eq!(
        fx.reports
            .product_yearly_sales(fx.product2, 2024)
            .await
            .unwrap(),
        dec!(30.00)
    );

    // Profit = (price - cost) * summed quantity.
    assert_eq!(
        fx.reports
            .product_yearly_profit(fx.product1, 2024)
            .await
            .unwrap(),
        dec!(24.00)
    );
    assert_eq!(
        fx.reports
            .product_yearly_profit(fx.product2, 2024)
            .await
            .unwrap(),
        dec!(18.00)
    );

    // A year with no sales aggregates to zero, not an error.
    assert_eq!(
        fx.reports
            .product_yearly_sales(fx.product1, 2020)
            .await
            .unwrap(),
        Decimal::ZERO
    );
}

#[tokio::test]
async fn selling_below_cost_reports_negative_profit() {
    let db = setup_db().await;
    let customer = seed_customer(&db, "Ines Costa").await;
    let loss_leader = seed_product(&db, "Clearance mugs", 30, dec!(1.00), dec!(3.00)).await;
    let order = seed_order(&db, customer.customer_id, date(2024, 4, 2)).await;
    add_line(&db, order.order_id, loss_leader.product_id, 2).await;

    let reports = ReportService::new(db.clone());
    assert_eq!(
        reports
            .product_yearly_profit(loss_leader.product_id, 2024)
            .await
            .unwrap(),
        dec!(-4.00)
    );
}

#[tokio::test]
async fn row_reports_return_matching_lines() {
    let db = setup_db().await;
    let fx = seed_fixture(&db).await;

    let by_product = fx.reports.orders_by_product(fx.product2).await.unwrap();
    assert_eq!(by_product.len(), 2);
    assert!(by_product.iter().all(|l| l.product_id == fx.product2));

    let details = fx.reports.order_details(fx.order1).await.unwrap();
    assert_eq!(details.len(), 2);
    assert!(details.iter().all(|l| l.order_id == fx.order1));

    let customer_lines = fx
        .reports
        .product_orders_by_customer(fx.customer1)
        .await
        .unwrap();
    assert_eq!(customer_lines.len(), 4);
    assert!(customer_lines.iter().all(|l| l.customer_id == fx.customer1));

    // The yearly variant drops the 2023 order.
    let yearly = fx
        .reports
        .customer_yearly_orders(fx.customer1, 2024)
        .await
        .unwrap();
    assert_eq!(yearly.len(), 3);
    assert!(yearly.iter().all(|l| l.order_date.year() == 2024));

    let other_customer = fx
        .reports
        .product_orders_by_customer(fx.customer2)
        .await
        .unwrap();
    assert_eq!(other_customer.len(), 2);

    let unknown = fx.reports.product_orders_by_customer(9999).await.unwrap();
    assert!(unknown.is_empty());
}

#[tokio::test]
async fn bill_is_complete_and_consistent_with_order_total() {
    let db = setup_db().await;
    let fx = seed_fixture(&db).await;

    let bill = fx.reports.bill(fx.order1).await.unwrap();
    assert_eq!(bill.order_id, fx.order1);
    assert_eq!(bill.lines.len(), 2);

    // 4 * 5.00 and 2 * 2.50.
    let mut line_totals: Vec<Decimal> = bill.lines.iter().map(|l| l.line_total).collect();
    line_totals.sort();
    assert_eq!(line_totals, vec![dec!(5.00), dec!(20.00)]);

    let sum: Decimal = bill.lines.iter().map(|l| l.line_total).sum();
    assert_eq!(bill.total, sum);
    assert_eq!(
        bill.total,
        fx.reports.order_total(fx.order1).await.unwrap()
    );

    // An order with no lines yields an empty bill with a zero total.
    let empty = fx.reports.bill(fx.empty_order).await.unwrap();
    assert!(empty.lines.is_empty());
    assert_eq!(empty.total, Decimal::ZERO);
    assert_eq!(
        fx.reports.order_total(fx.empty_order).await.unwrap(),
        Decimal::ZERO
    );
}

#[tokio::test]
async fn seeded_scenario_matches_expected_figures() {
    let db = setup_db().await;
    let customer = seed_customer(&db, "Ravi Patel").await;
    let product = seed_product(&db, "Jasmine rice 1kg", 10, dec!(5.00), dec!(3.00)).await;
    let order = seed_order(&db, customer.customer_id, date(2024, 3, 1)).await;

    let lines = ProductOrderService::new(db.clone());
    let created = lines
        .create(ProductOrderRequest {
            order_id: order.order_id,
            product_id: product.product_id,
            quantity: 4,
        })
        .await
        .unwrap();
    assert_eq!(created.remaining_quantity, 6);

    let reports = ReportService::new(db.clone());
    assert_eq!(
        reports.order_total(order.order_id).await.unwrap(),
        dec!(20.00)
    );
    assert_eq!(
        reports
            .product_yearly_profit(product.product_id, 2024)
            .await
            .unwrap(),
        dec!(8.00)
    );
}
