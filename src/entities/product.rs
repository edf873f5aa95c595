use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub product_id: i32,

    pub name: String,

    /// On-hand stock. Decremented as order lines are committed; never
    /// observed below zero.
    pub quantity: i32,

    pub expiry_date: NaiveDate,

    pub price_per_unit: Decimal,

    pub cost_per_unit: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::product_order::Entity")]
    ProductOrders,
}

impl Related<super::product_order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductOrders.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
