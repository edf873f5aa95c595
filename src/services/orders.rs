use crate::{
    db::DbPool,
    entities::{
        customer,
        order::{self, Entity as OrderEntity, Model as OrderModel},
    },
    errors::ServiceError,
    validation::ValidationFailures,
};
use chrono::{NaiveDate, Utc};
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, QuerySelect, Set};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Fields accepted when creating or updating an order. `order_date` defaults
/// to the current date when omitted.
#[derive(Debug, Serialize, Deserialize)]
pub struct OrderRequest {
    pub customer_id: i32,
    pub order_date: Option<NaiveDate>,
}

/// Service for managing orders
#[derive(Clone)]
pub struct OrderService {
    db_pool: Arc<DbPool>,
}

impl OrderService {
    /// Creates a new order service instance
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    /// The supplied customer id must be in the customer id set, fetched
    /// fresh per validation.
    async fn validate_customer(&self, customer_id: i32) -> Result<(), ServiceError> {
        let db = &*self.db_pool;
        let customer_ids: Vec<i32> = customer::Entity::find()
            .select_only()
            .column(customer::Column::CustomerId)
            .into_tuple()
            .all(db)
            .await
            .map_err(ServiceError::db("list customer ids for order validation"))?;

        if !customer_ids.contains(&customer_id) {
            let mut failures = ValidationFailures::new();
            failures.push_unknown_id("customer_id", customer_id);
            return Err(ServiceError::validation(failures));
        }
        Ok(())
    }

    /// Creates an order and returns the stored row.
    #[instrument(skip(self, request), fields(customer_id = request.customer_id))]
    pub async fn create(&self, request: OrderRequest) -> Result<OrderModel, ServiceError> {
        self.validate_customer(request.customer_id).await?;

        let db = &*self.db_pool;
        let order_date = request
            .order_date
            .unwrap_or_else(|| Utc::now().date_naive());

        let model = order::ActiveModel {
            customer_id: Set(request.customer_id),
            order_date: Set(order_date),
            ..Default::default()
        };

        let created = model
            .insert(db)
            .await
            .map_err(ServiceError::db("insert order"))?;

        info!(order_id = created.order_id, "Order created");
        Ok(created)
    }

    /// Lists all orders.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<OrderModel>, ServiceError> {
        let db = &*self.db_pool;
        OrderEntity::find()
            .order_by_asc(order::Column::OrderId)
            .all(db)
            .await
            .map_err(ServiceError::db("list orders"))
    }

    /// Gets an order by id.
    #[instrument(skip(self))]
    pub async fn get(&self, order_id: i32) -> Result<OrderModel, ServiceError> {
        let db = &*self.db_pool;
        OrderEntity::find_by_id(order_id)
            .one(db)
            .await
            .map_err(ServiceError::db("get order"))?
            .ok_or_else(|| ServiceError::NotFound(format!("Order {} not found", order_id)))
    }

    /// Updates an order; fails with `NotFound` when the id matches no row.
    #[instrument(skip(self, request), fields(order_id = order_id))]
    pub async fn update(
        &self,
        order_id: i32,
        request: OrderRequest,
    ) -> Result<OrderModel, ServiceError> {
        self.validate_customer(request.customer_id).await?;

        let db = &*self.db_pool;
        let existing = OrderEntity::find_by_id(order_id)
            .one(db)
            .await
            .map_err(ServiceError::db("find order for update"))?
            .ok_or_else(|| {
                warn!(order_id, "Order not found for update");
                ServiceError::NotFound(format!("Order {} not found", order_id))
            })?;

        let current_date = existing.order_date;
        let mut model: order::ActiveModel = existing.into();
        model.customer_id = Set(request.customer_id);
        model.order_date = Set(request.order_date.unwrap_or(current_date));

        let updated = model
            .update(db)
            .await
            .map_err(ServiceError::db("update order"))?;

        info!(order_id, "Order updated");
        Ok(updated)
    }

    /// Deletes an order; fails with `NotFound` when the id matches no row.
    #[instrument(skip(self))]
    pub async fn delete(&self, order_id: i32) -> Result<(), ServiceError> {
        let db = &*self.db_pool;
        let result = OrderEntity::delete_by_id(order_id)
            .exec(db)
            .await
            .map_err(ServiceError::db("delete order"))?;

        if result.rows_affected == 0 {
            return Err(ServiceError::NotFound(format!(
                "Order {} not found",
                order_id
            )));
        }

        info!(order_id, "Order deleted");
        Ok(())
    }

    /// All order ids, fetched fresh.
    #[instrument(skip(self))]
    pub async fn list_ids(&self) -> Result<Vec<i32>, ServiceError> {
        let db = &*self.db_pool;
        OrderEntity::find()
            .select_only()
            .column(order::Column::OrderId)
            .into_tuple()
            .all(db)
            .await
            .map_err(ServiceError::db("list order ids"))
    }
}
