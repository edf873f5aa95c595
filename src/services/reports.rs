use crate::{
    db::DbPool,
    entities::{
        order, product,
        product_order::{self, Entity as ProductOrderEntity, Model as ProductOrderModel},
    },
    errors::ServiceError,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    sea_query::{Expr, Func, SimpleExpr},
    ColumnTrait, EntityTrait, FromQueryResult, JoinType, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::instrument;

/// Read-only reporting over the order/order-line/product graph. Every
/// aggregate is computed inside the relational engine (`SUM` pushed down
/// through the query builder), never by folding rows in application memory.
#[derive(Clone)]
pub struct ReportService {
    db_pool: Arc<DbPool>,
}

/// An order line joined with its parent order, as returned by the
/// per-customer reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromQueryResult)]
pub struct CustomerOrderLine {
    pub product_order_id: i32,
    pub order_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub customer_id: i32,
    pub order_date: NaiveDate,
}

/// One itemized bill row: `line_total = price_per_unit * quantity`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromQueryResult)]
pub struct BillLine {
    pub order_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub line_total: Decimal,
}

/// The itemized lines for one order together with its total. Always carries
/// both parts.
#[derive(Debug, Clone, Serialize)]
pub struct BillReport {
    pub order_id: i32,
    pub lines: Vec<BillLine>,
    pub total: Decimal,
}

/// Inclusive calendar bounds of a year, `None` when the year is outside the
/// representable range (reports then see an empty window).
fn year_bounds(year: i32) -> Option<(NaiveDate, NaiveDate)> {
    Some((
        NaiveDate::from_ymd_opt(year, 1, 1)?,
        NaiveDate::from_ymd_opt(year, 12, 31)?,
    ))
}

/// `price_per_unit * quantity` over the Product ⋈ ProductOrder join.
fn line_revenue() -> SimpleExpr {
    Expr::col((product::Entity, product::Column::PricePerUnit)).mul(Expr::col((
        product_order::Entity,
        product_order::Column::Quantity,
    )))
}

/// `(price_per_unit - cost_per_unit) * quantity`.
fn line_profit() -> SimpleExpr {
    Expr::expr(
        Expr::col((product::Entity, product::Column::PricePerUnit)).sub(Expr::col((
            product::Entity,
            product::Column::CostPerUnit,
        ))),
    )
    .mul(Expr::col((
        product_order::Entity,
        product_order::Column::Quantity,
    )))
}

impl ReportService {
    /// Creates a new report service instance
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    /// All order lines for a product. Empty when the product has none (or
    /// does not exist) — not an error.
    #[instrument(skip(self))]
    pub async fn orders_by_product(
        &self,
        product_id: i32,
    ) -> Result<Vec<ProductOrderModel>, ServiceError> {
        let db = &*self.db_pool;
        ProductOrderEntity::find()
            .filter(product_order::Column::ProductId.eq(product_id))
            .order_by_asc(product_order::Column::ProductId)
            .all(db)
            .await
            .map_err(ServiceError::db("orders by product"))
    }

    /// All order lines belonging to a customer's orders, ordered by order id.
    #[instrument(skip(self))]
    pub async fn product_orders_by_customer(
        &self,
        customer_id: i32,
    ) -> Result<Vec<CustomerOrderLine>, ServiceError> {
        let db = &*self.db_pool;
        ProductOrderEntity::find()
            .join(JoinType::InnerJoin, product_order::Relation::Order.def())
            .filter(order::Column::CustomerId.eq(customer_id))
            .order_by_asc(product_order::Column::OrderId)
            .select_only()
            .columns([
                product_order::Column::ProductOrderId,
                product_order::Column::OrderId,
                product_order::Column::ProductId,
                product_order::Column::Quantity,
            ])
            .column(order::Column::CustomerId)
            .column(order::Column::OrderDate)
            .into_model::<CustomerOrderLine>()
            .all(db)
            .await
            .map_err(ServiceError::db("product orders by customer"))
    }

    /// All order lines for one order.
    #[instrument(skip(self))]
    pub async fn order_details(
        &self,
        order_id: i32,
    ) -> Result<Vec<ProductOrderModel>, ServiceError> {
        let db = &*self.db_pool;
        ProductOrderEntity::find()
            .filter(product_order::Column::OrderId.eq(order_id))
            .order_by_asc(product_order::Column::ProductOrderId)
            .all(db)
            .await
            .map_err(ServiceError::db("order details"))
    }

    /// Total quantity of a product ordered within a calendar year. A `NULL`
    /// sum (no matching lines) is zero, never an error.
    #[instrument(skip(self))]
    pub async fn product_yearly_orders(
        &self,
        product_id: i32,
        year: i32,
    ) -> Result<i64, ServiceError> {
        let Some((start, end)) = year_bounds(year) else {
            return Ok(0);
        };

        let db = &*self.db_pool;
        let total: Option<Option<i64>> = ProductOrderEntity::find()
            .join(JoinType::InnerJoin, product_order::Relation::Order.def())
            .filter(product_order::Column::ProductId.eq(product_id))
            .filter(order::Column::OrderDate.between(start, end))
            .select_only()
            .expr_as(product_order::Column::Quantity.sum(), "total_quantity")
            .into_tuple()
            .one(db)
            .await
            .map_err(ServiceError::db("product yearly orders"))?;

        Ok(total.flatten().unwrap_or(0))
    }

    /// Sales revenue for a product within a calendar year:
    /// `SUM(price_per_unit * quantity)` over the three-way join.
    #[instrument(skip(self))]
    pub async fn product_yearly_sales(
        &self,
        product_id: i32,
        year: i32,
    ) -> Result<Decimal, ServiceError> {
        let Some((start, end)) = year_bounds(year) else {
            return Ok(Decimal::ZERO);
        };

        let db = &*self.db_pool;
        let total: Option<Option<Decimal>> = ProductOrderEntity::find()
            .join(JoinType::InnerJoin, product_order::Relation::Product.def())
            .join(JoinType::InnerJoin, product_order::Relation::Order.def())
            .filter(product_order::Column::ProductId.eq(product_id))
            .filter(order::Column::OrderDate.between(start, end))
            .select_only()
            .expr_as(Func::sum(line_revenue()), "total_sales_revenue")
            .into_tuple()
            .one(db)
            .await
            .map_err(ServiceError::db("product yearly sales"))?;

        Ok(total.flatten().unwrap_or(Decimal::ZERO))
    }

    /// Profit for a product within a calendar year:
    /// `SUM((price - cost) * quantity)`. Negative when the product sells
    /// below cost — reported, not rejected.
    #[instrument(skip(self))]
    pub async fn product_yearly_profit(
        &self,
        product_id: i32,
        year: i32,
    ) -> Result<Decimal, ServiceError> {
        let Some((start, end)) = year_bounds(year) else {
            return Ok(Decimal::ZERO);
        };

        let db = &*self.db_pool;
        let total: Option<Option<Decimal>> = ProductOrderEntity::find()
            .join(JoinType::InnerJoin, product_order::Relation::Product.def())
            .join(JoinType::InnerJoin, product_order::Relation::Order.def())
            .filter(product_order::Column::ProductId.eq(product_id))
            .filter(order::Column::OrderDate.between(start, end))
            .select_only()
            .expr_as(Func::sum(line_profit()), "total_profit")
            .into_tuple()
            .one(db)
            .await
            .map_err(ServiceError::db("product yearly profit"))?;

        Ok(total.flatten().unwrap_or(Decimal::ZERO))
    }

    /// Every order line a customer placed within a calendar year.
    #[instrument(skip(self))]
    pub async fn customer_yearly_orders(
        &self,
        customer_id: i32,
        year: i32,
    ) -> Result<Vec<CustomerOrderLine>, ServiceError> {
        let Some((start, end)) = year_bounds(year) else {
            return Ok(Vec::new());
        };

        let db = &*self.db_pool;
        ProductOrderEntity::find()
            .join(JoinType::InnerJoin, product_order::Relation::Order.def())
            .filter(order::Column::CustomerId.eq(customer_id))
            .filter(order::Column::OrderDate.between(start, end))
            .order_by_asc(product_order::Column::OrderId)
            .select_only()
            .columns([
                product_order::Column::ProductOrderId,
                product_order::Column::OrderId,
                product_order::Column::ProductId,
                product_order::Column::Quantity,
            ])
            .column(order::Column::CustomerId)
            .column(order::Column::OrderDate)
            .into_model::<CustomerOrderLine>()
            .all(db)
            .await
            .map_err(ServiceError::db("customer yearly orders"))
    }

    /// Monetary total of one order: `SUM(price_per_unit * quantity)` over its
    /// lines. Zero when the order has none.
    #[instrument(skip(self))]
    pub async fn order_total(&self, order_id: i32) -> Result<Decimal, ServiceError> {
        let db = &*self.db_pool;
        let total: Option<Option<Decimal>> = ProductOrderEntity::find()
            .join(JoinType::InnerJoin, product_order::Relation::Product.def())
            .filter(product_order::Column::OrderId.eq(order_id))
            .select_only()
            .expr_as(Func::sum(line_revenue()), "total")
            .into_tuple()
            .one(db)
            .await
            .map_err(ServiceError::db("order total"))?;

        Ok(total.flatten().unwrap_or(Decimal::ZERO))
    }

    /// The itemized bill for one order: one row per line with its
    /// `line_total`, plus the order total, returned together.
    #[instrument(skip(self))]
    pub async fn bill(&self, order_id: i32) -> Result<BillReport, ServiceError> {
        let db = &*self.db_pool;
        let lines = ProductOrderEntity::find()
            .join(JoinType::InnerJoin, product_order::Relation::Product.def())
            .filter(product_order::Column::OrderId.eq(order_id))
            .order_by_asc(product_order::Column::ProductOrderId)
            .select_only()
            .columns([
                product_order::Column::OrderId,
                product_order::Column::ProductId,
                product_order::Column::Quantity,
            ])
            .expr_as(line_revenue(), "line_total")
            .into_model::<BillLine>()
            .all(db)
            .await
            .map_err(ServiceError::db("bill lines"))?;

        let total = self.order_total(order_id).await?;

        Ok(BillReport {
            order_id,
            lines,
            total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_bounds_are_inclusive_calendar_edges() {
        let (start, end) = year_bounds(2024).unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
    }

    #[test]
    fn unrepresentable_year_yields_empty_window() {
        assert!(year_bounds(i32::MAX).is_none());
    }
}
