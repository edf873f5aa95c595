use crate::{
    db::DbPool,
    entities::customer::{self, Entity as CustomerEntity, Model as CustomerModel},
    errors::ServiceError,
};
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, QuerySelect, Set};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument, warn};
use validator::Validate;

/// Fields accepted when creating or updating a customer.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CustomerRequest {
    #[validate(length(min = 1, message = "Customer name is required"))]
    pub name: String,
    #[validate(custom = "crate::validation::digits_only")]
    pub phone: String,
    pub address: String,
}

/// Service for managing customers
#[derive(Clone)]
pub struct CustomerService {
    db_pool: Arc<DbPool>,
}

impl CustomerService {
    /// Creates a new customer service instance
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    /// Creates a customer and returns the stored row.
    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create(&self, request: CustomerRequest) -> Result<CustomerModel, ServiceError> {
        request.validate()?;

        let db = &*self.db_pool;
        let model = customer::ActiveModel {
            name: Set(request.name),
            phone: Set(request.phone),
            address: Set(request.address),
            ..Default::default()
        };

        let created = model
            .insert(db)
            .await
            .map_err(ServiceError::db("insert customer"))?;

        info!(customer_id = created.customer_id, "Customer created");
        Ok(created)
    }

    /// Lists all customers.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<CustomerModel>, ServiceError> {
        let db = &*self.db_pool;
        CustomerEntity::find()
            .order_by_asc(customer::Column::CustomerId)
            .all(db)
            .await
            .map_err(ServiceError::db("list customers"))
    }

    /// Gets a customer by id.
    #[instrument(skip(self))]
    pub async fn get(&self, customer_id: i32) -> Result<CustomerModel, ServiceError> {
        let db = &*self.db_pool;
        CustomerEntity::find_by_id(customer_id)
            .one(db)
            .await
            .map_err(ServiceError::db("get customer"))?
            .ok_or_else(|| ServiceError::NotFound(format!("Customer {} not found", customer_id)))
    }

    /// Updates a customer; fails with `NotFound` when the id matches no row.
    #[instrument(skip(self, request), fields(customer_id = customer_id))]
    pub async fn update(
        &self,
        customer_id: i32,
        request: CustomerRequest,
    ) -> Result<CustomerModel, ServiceError> {
        request.validate()?;

        let db = &*self.db_pool;
        let existing = CustomerEntity::find_by_id(customer_id)
            .one(db)
            .await
            .map_err(ServiceError::db("find customer for update"))?
            .ok_or_else(|| {
                warn!(customer_id, "Customer not found for update");
                ServiceError::NotFound(format!("Customer {} not found", customer_id))
            })?;

        let mut model: customer::ActiveModel = existing.into();
        model.name = Set(request.name);
        model.phone = Set(request.phone);
        model.address = Set(request.address);

        let updated = model
            .update(db)
            .await
            .map_err(ServiceError::db("update customer"))?;

        info!(customer_id, "Customer updated");
        Ok(updated)
    }

    /// Deletes a customer; fails with `NotFound` when the id matches no row.
    /// Orders referencing the customer are left untouched.
    #[instrument(skip(self))]
    pub async fn delete(&self, customer_id: i32) -> Result<(), ServiceError> {
        let db = &*self.db_pool;
        let result = CustomerEntity::delete_by_id(customer_id)
            .exec(db)
            .await
            .map_err(ServiceError::db("delete customer"))?;

        if result.rows_affected == 0 {
            return Err(ServiceError::NotFound(format!(
                "Customer {} not found",
                customer_id
            )));
        }

        info!(customer_id, "Customer deleted");
        Ok(())
    }

    /// All customer ids, fetched fresh. Used by validation for
    /// referential-existence checks.
    #[instrument(skip(self))]
    pub async fn list_ids(&self) -> Result<Vec<i32>, ServiceError> {
        let db = &*self.db_pool;
        CustomerEntity::find()
            .select_only()
            .column(customer::Column::CustomerId)
            .into_tuple()
            .all(db)
            .await
            .map_err(ServiceError::db("list customer ids"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_rejects_empty_name_and_bad_phone() {
        let request = CustomerRequest {
            name: String::new(),
            phone: "12-34".into(),
            address: "1 Main St".into(),
        };
        let failures: crate::validation::ValidationFailures =
            request.validate().unwrap_err().into();
        assert_eq!(failures.0.len(), 2);
    }

    #[test]
    fn request_accepts_valid_fields() {
        let request = CustomerRequest {
            name: "Ada".into(),
            phone: "0123456789".into(),
            address: "1 Main St".into(),
        };
        assert!(request.validate().is_ok());
    }
}
