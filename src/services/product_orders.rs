use crate::{
    db::DbPool,
    entities::{
        order, product,
        product_order::{self, Entity as ProductOrderEntity, Model as ProductOrderModel},
    },
    errors::ServiceError,
    validation::ValidationFailures,
};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseTransaction, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument, warn};
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct ProductOrderRequest {
    pub order_id: i32,
    pub product_id: i32,
    #[validate(range(min = 1, message = "Quantity must be a positive integer"))]
    pub quantity: i32,
}

/// Result of committing an order line: the stored line together with the
/// product's remaining on-hand quantity.
#[derive(Debug, Serialize)]
pub struct CreatedProductOrder {
    pub product_order: ProductOrderModel,
    pub remaining_quantity: i32,
}

/// Service for order lines and the stock deduction that commits with them.
#[derive(Clone)]
pub struct ProductOrderService {
    db_pool: Arc<DbPool>,
}

impl ProductOrderService {
    /// Creates a new product order service instance
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    /// Field, referential, and stock-ceiling checks against fresh reads.
    /// Collects every violation before reporting.
    async fn validate_request(
        &self,
        request: &ProductOrderRequest,
    ) -> Result<(), ServiceError> {
        let mut failures = ValidationFailures::new();
        if let Err(errors) = request.validate() {
            failures = errors.into();
        }

        let db = &*self.db_pool;
        let order_ids: Vec<i32> = order::Entity::find()
            .select_only()
            .column(order::Column::OrderId)
            .into_tuple()
            .all(db)
            .await
            .map_err(ServiceError::db("list order ids for line validation"))?;
        if !order_ids.contains(&request.order_id) {
            failures.push_unknown_id("order_id", request.order_id);
        }

        match product::Entity::find_by_id(request.product_id)
            .one(db)
            .await
            .map_err(ServiceError::db("find product for line validation"))?
        {
            Some(product) => {
                if request.quantity > product.quantity {
                    failures.push(
                        "quantity",
                        format!(
                            "Quantity must be less than or equal to {}",
                            product.quantity
                        ),
                    );
                }
            }
            None => failures.push_unknown_id("product_id", request.product_id),
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(ServiceError::validation(failures))
        }
    }

    /// Deducts the ordered quantity from the product's stock, refusing to go
    /// below zero. Zero rows affected means the stock moved since validation
    /// (or the product vanished); the caller rolls the transaction back.
    async fn deduct_stock(
        &self,
        txn: &DatabaseTransaction,
        product_id: i32,
        quantity: i32,
    ) -> Result<(), ServiceError> {
        let result = product::Entity::update_many()
            .col_expr(
                product::Column::Quantity,
                Expr::col(product::Column::Quantity).sub(quantity),
            )
            .filter(product::Column::ProductId.eq(product_id))
            .filter(product::Column::Quantity.gte(quantity))
            .exec(txn)
            .await
            .map_err(ServiceError::db("deduct product stock"))?;

        if result.rows_affected == 0 {
            let on_hand = product::Entity::find_by_id(product_id)
                .one(txn)
                .await
                .map_err(ServiceError::db("re-read product stock"))?;
            return match on_hand {
                Some(product) => {
                    warn!(
                        product_id,
                        requested = quantity,
                        on_hand = product.quantity,
                        "Stock changed concurrently; rejecting order line"
                    );
                    Err(ServiceError::validation(ValidationFailures::single(
                        "quantity",
                        format!(
                            "Quantity must be less than or equal to {}",
                            product.quantity
                        ),
                    )))
                }
                None => Err(ServiceError::NotFound(format!(
                    "Product {} not found",
                    product_id
                ))),
            };
        }

        Ok(())
    }

    /// Creates an order line. The line insert and the stock deduction commit
    /// as one transaction; on any failure nothing is applied.
    #[instrument(
        skip(self, request),
        fields(order_id = request.order_id, product_id = request.product_id, quantity = request.quantity)
    )]
    pub async fn create(
        &self,
        request: ProductOrderRequest,
    ) -> Result<CreatedProductOrder, ServiceError> {
        self.validate_request(&request).await?;

        let db = &*self.db_pool;
        let txn = db
            .begin()
            .await
            .map_err(ServiceError::db("begin order line transaction"))?;

        match self
            .create_in_txn(&txn, &request)
            .await
        {
            Ok(created) => {
                txn.commit()
                    .await
                    .map_err(ServiceError::db("commit order line transaction"))?;
                info!(
                    product_order_id = created.product_order.product_order_id,
                    remaining_quantity = created.remaining_quantity,
                    "Order line created"
                );
                Ok(created)
            }
            Err(err) => {
                if let Err(rollback_err) = txn.rollback().await {
                    warn!(error = %rollback_err, "Order line rollback failed");
                }
                Err(err)
            }
        }
    }

    async fn create_in_txn(
        &self,
        txn: &DatabaseTransaction,
        request: &ProductOrderRequest,
    ) -> Result<CreatedProductOrder, ServiceError> {
        self.deduct_stock(txn, request.product_id, request.quantity)
            .await?;

        let line = product_order::ActiveModel {
            order_id: Set(request.order_id),
            product_id: Set(request.product_id),
            quantity: Set(request.quantity),
            ..Default::default()
        };
        let created = line
            .insert(txn)
            .await
            .map_err(ServiceError::db("insert order line"))?;

        let remaining_quantity = product::Entity::find_by_id(request.product_id)
            .one(txn)
            .await
            .map_err(ServiceError::db("read remaining stock"))?
            .map(|p| p.quantity)
            .unwrap_or(0);

        Ok(CreatedProductOrder {
            product_order: created,
            remaining_quantity,
        })
    }

    /// Lists all order lines.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<ProductOrderModel>, ServiceError> {
        let db = &*self.db_pool;
        ProductOrderEntity::find()
            .order_by_asc(product_order::Column::ProductOrderId)
            .all(db)
            .await
            .map_err(ServiceError::db("list order lines"))
    }

    /// Gets an order line by id.
    #[instrument(skip(self))]
    pub async fn get(&self, product_order_id: i32) -> Result<ProductOrderModel, ServiceError> {
        let db = &*self.db_pool;
        ProductOrderEntity::find_by_id(product_order_id)
            .one(db)
            .await
            .map_err(ServiceError::db("get order line"))?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Product order {} not found", product_order_id))
            })
    }

    /// Updates an order line; fails with `NotFound` when the id matches no
    /// row. Stock is deducted at creation time only: updating a line does
    /// not restock or re-deduct.
    #[instrument(skip(self, request), fields(product_order_id = product_order_id))]
    pub async fn update(
        &self,
        product_order_id: i32,
        request: ProductOrderRequest,
    ) -> Result<ProductOrderModel, ServiceError> {
        self.validate_request(&request).await?;

        let db = &*self.db_pool;
        let existing = ProductOrderEntity::find_by_id(product_order_id)
            .one(db)
            .await
            .map_err(ServiceError::db("find order line for update"))?
            .ok_or_else(|| {
                warn!(product_order_id, "Order line not found for update");
                ServiceError::NotFound(format!("Product order {} not found", product_order_id))
            })?;

        let mut model: product_order::ActiveModel = existing.into();
        model.order_id = Set(request.order_id);
        model.product_id = Set(request.product_id);
        model.quantity = Set(request.quantity);

        let updated = model
            .update(db)
            .await
            .map_err(ServiceError::db("update order line"))?;

        info!(product_order_id, "Order line updated");
        Ok(updated)
    }

    /// Deletes an order line; fails with `NotFound` when the id matches no
    /// row. The product's stock is left untouched.
    #[instrument(skip(self))]
    pub async fn delete(&self, product_order_id: i32) -> Result<(), ServiceError> {
        let db = &*self.db_pool;
        let result = ProductOrderEntity::delete_by_id(product_order_id)
            .exec(db)
            .await
            .map_err(ServiceError::db("delete order line"))?;

        if result.rows_affected == 0 {
            return Err(ServiceError::NotFound(format!(
                "Product order {} not found",
                product_order_id
            )));
        }

        info!(product_order_id, "Order line deleted");
        Ok(())
    }

    /// All order line ids, fetched fresh.
    #[instrument(skip(self))]
    pub async fn list_ids(&self) -> Result<Vec<i32>, ServiceError> {
        let db = &*self.db_pool;
        ProductOrderEntity::find()
            .select_only()
            .column(product_order::Column::ProductOrderId)
            .into_tuple()
            .all(db)
            .await
            .map_err(ServiceError::db("list order line ids"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_rejects_non_positive_quantity() {
        for quantity in [0, -3] {
            let request = ProductOrderRequest {
                order_id: 1,
                product_id: 1,
                quantity,
            };
            assert!(request.validate().is_err(), "quantity {}", quantity);
        }
    }
}
