use crate::{
    db::DbPool,
    entities::product::{self, Entity as ProductEntity, Model as ProductModel},
    errors::ServiceError,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, QuerySelect, Set};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument, warn};
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct ProductRequest {
    #[validate(length(min = 1, message = "Product name is required"))]
    pub name: String,
    #[validate(range(min = 0, message = "Quantity must not be negative"))]
    pub quantity: i32,
    pub expiry_date: NaiveDate,
    #[validate(custom = "crate::validation::non_negative_decimal")]
    pub price_per_unit: Decimal,
    #[validate(custom = "crate::validation::non_negative_decimal")]
    pub cost_per_unit: Decimal,
}

/// Service for managing products and their on-hand stock
#[derive(Clone)]
pub struct ProductService {
    db_pool: Arc<DbPool>,
}

impl ProductService {
    /// Creates a new product service instance
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    /// Creates a product and returns the stored row.
    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create(&self, request: ProductRequest) -> Result<ProductModel, ServiceError> {
        request.validate()?;

        let db = &*self.db_pool;
        let model = product::ActiveModel {
            name: Set(request.name),
            quantity: Set(request.quantity),
            expiry_date: Set(request.expiry_date),
            price_per_unit: Set(request.price_per_unit),
            cost_per_unit: Set(request.cost_per_unit),
            ..Default::default()
        };

        let created = model
            .insert(db)
            .await
            .map_err(ServiceError::db("insert product"))?;

        info!(product_id = created.product_id, "Product created");
        Ok(created)
    }

    /// Lists all products.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<ProductModel>, ServiceError> {
        let db = &*self.db_pool;
        ProductEntity::find()
            .order_by_asc(product::Column::ProductId)
            .all(db)
            .await
            .map_err(ServiceError::db("list products"))
    }

    /// Gets a product by id.
    #[instrument(skip(self))]
    pub async fn get(&self, product_id: i32) -> Result<ProductModel, ServiceError> {
        let db = &*self.db_pool;
        ProductEntity::find_by_id(product_id)
            .one(db)
            .await
            .map_err(ServiceError::db("get product"))?
            .ok_or_else(|| ServiceError::NotFound(format!("Product {} not found", product_id)))
    }

    /// Updates a product; fails with `NotFound` when the id matches no row.
    /// Every persistence failure propagates.
    #[instrument(skip(self, request), fields(product_id = product_id))]
    pub async fn update(
        &self,
        product_id: i32,
        request: ProductRequest,
    ) -> Result<ProductModel, ServiceError> {
        request.validate()?;

        let db = &*self.db_pool;
        let existing = ProductEntity::find_by_id(product_id)
            .one(db)
            .await
            .map_err(ServiceError::db("find product for update"))?
            .ok_or_else(|| {
                warn!(product_id, "Product not found for update");
                ServiceError::NotFound(format!("Product {} not found", product_id))
            })?;

        let mut model: product::ActiveModel = existing.into();
        model.name = Set(request.name);
        model.quantity = Set(request.quantity);
        model.expiry_date = Set(request.expiry_date);
        model.price_per_unit = Set(request.price_per_unit);
        model.cost_per_unit = Set(request.cost_per_unit);

        let updated = model
            .update(db)
            .await
            .map_err(ServiceError::db("update product"))?;

        info!(product_id, "Product updated");
        Ok(updated)
    }

    /// Deletes a product; fails with `NotFound` when the id matches no row.
    #[instrument(skip(self))]
    pub async fn delete(&self, product_id: i32) -> Result<(), ServiceError> {
        let db = &*self.db_pool;
        let result = ProductEntity::delete_by_id(product_id)
            .exec(db)
            .await
            .map_err(ServiceError::db("delete product"))?;

        if result.rows_affected == 0 {
            return Err(ServiceError::NotFound(format!(
                "Product {} not found",
                product_id
            )));
        }

        info!(product_id, "Product deleted");
        Ok(())
    }

    /// All product ids, fetched fresh. Used by validation for
    /// referential-existence checks.
    #[instrument(skip(self))]
    pub async fn list_ids(&self) -> Result<Vec<i32>, ServiceError> {
        let db = &*self.db_pool;
        ProductEntity::find()
            .select_only()
            .column(product::Column::ProductId)
            .into_tuple()
            .all(db)
            .await
            .map_err(ServiceError::db("list product ids"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn valid_request() -> ProductRequest {
        ProductRequest {
            name: "Olive oil 1l".into(),
            quantity: 25,
            expiry_date: NaiveDate::from_ymd_opt(2026, 6, 30).unwrap(),
            price_per_unit: dec!(9.50),
            cost_per_unit: dec!(6.20),
        }
    }

    #[test]
    fn request_accepts_valid_fields() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn request_rejects_negative_quantity_and_price() {
        let request = ProductRequest {
            quantity: -1,
            price_per_unit: dec!(-0.50),
            ..valid_request()
        };
        let failures: crate::validation::ValidationFailures =
            request.validate().unwrap_err().into();
        assert_eq!(failures.0.len(), 2);
    }

    #[test]
    fn cost_above_price_is_not_rejected() {
        // Selling at a loss is a reporting concern, not a validation error.
        let request = ProductRequest {
            price_per_unit: dec!(1.00),
            cost_per_unit: dec!(3.00),
            ..valid_request()
        };
        assert!(request.validate().is_ok());
    }
}
