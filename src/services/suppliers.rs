use crate::{
    db::DbPool,
    entities::supplier::{self, Entity as SupplierEntity, Model as SupplierModel},
    errors::ServiceError,
};
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, QuerySelect, Set};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument, warn};
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct SupplierRequest {
    #[validate(length(min = 1, message = "Supplier name is required"))]
    pub name: String,
    #[validate(custom = "crate::validation::digits_only")]
    pub phone: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

/// Service for managing suppliers
#[derive(Clone)]
pub struct SupplierService {
    db_pool: Arc<DbPool>,
}

impl SupplierService {
    /// Creates a new supplier service instance
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    /// Creates a supplier and returns the stored row.
    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create(&self, request: SupplierRequest) -> Result<SupplierModel, ServiceError> {
        request.validate()?;

        let db = &*self.db_pool;
        let model = supplier::ActiveModel {
            name: Set(request.name),
            phone: Set(request.phone),
            email: Set(request.email),
            ..Default::default()
        };

        let created = model
            .insert(db)
            .await
            .map_err(ServiceError::db("insert supplier"))?;

        info!(supplier_id = created.supplier_id, "Supplier created");
        Ok(created)
    }

    /// Lists all suppliers.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<SupplierModel>, ServiceError> {
        let db = &*self.db_pool;
        SupplierEntity::find()
            .order_by_asc(supplier::Column::SupplierId)
            .all(db)
            .await
            .map_err(ServiceError::db("list suppliers"))
    }

    /// Gets a supplier by id.
    #[instrument(skip(self))]
    pub async fn get(&self, supplier_id: i32) -> Result<SupplierModel, ServiceError> {
        let db = &*self.db_pool;
        SupplierEntity::find_by_id(supplier_id)
            .one(db)
            .await
            .map_err(ServiceError::db("get supplier"))?
            .ok_or_else(|| ServiceError::NotFound(format!("Supplier {} not found", supplier_id)))
    }

    /// Updates a supplier; fails with `NotFound` when the id matches no row.
    #[instrument(skip(self, request), fields(supplier_id = supplier_id))]
    pub async fn update(
        &self,
        supplier_id: i32,
        request: SupplierRequest,
    ) -> Result<SupplierModel, ServiceError> {
        request.validate()?;

        let db = &*self.db_pool;
        let existing = SupplierEntity::find_by_id(supplier_id)
            .one(db)
            .await
            .map_err(ServiceError::db("find supplier for update"))?
            .ok_or_else(|| {
                warn!(supplier_id, "Supplier not found for update");
                ServiceError::NotFound(format!("Supplier {} not found", supplier_id))
            })?;

        let mut model: supplier::ActiveModel = existing.into();
        model.name = Set(request.name);
        model.phone = Set(request.phone);
        model.email = Set(request.email);

        let updated = model
            .update(db)
            .await
            .map_err(ServiceError::db("update supplier"))?;

        info!(supplier_id, "Supplier updated");
        Ok(updated)
    }

    /// Deletes a supplier; fails with `NotFound` when the id matches no row.
    #[instrument(skip(self))]
    pub async fn delete(&self, supplier_id: i32) -> Result<(), ServiceError> {
        let db = &*self.db_pool;
        let result = SupplierEntity::delete_by_id(supplier_id)
            .exec(db)
            .await
            .map_err(ServiceError::db("delete supplier"))?;

        if result.rows_affected == 0 {
            return Err(ServiceError::NotFound(format!(
                "Supplier {} not found",
                supplier_id
            )));
        }

        info!(supplier_id, "Supplier deleted");
        Ok(())
    }

    /// All supplier ids, fetched fresh.
    #[instrument(skip(self))]
    pub async fn list_ids(&self) -> Result<Vec<i32>, ServiceError> {
        let db = &*self.db_pool;
        SupplierEntity::find()
            .select_only()
            .column(supplier::Column::SupplierId)
            .into_tuple()
            .all(db)
            .await
            .map_err(ServiceError::db("list supplier ids"))
    }
}
