use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Suppliers are not linked to products or orders in the current schema;
/// the entity is plain CRUD until the domain settles that wiring.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "supplier")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub supplier_id: i32,
    pub name: String,
    pub phone: String,
    pub email: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
