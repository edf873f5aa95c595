use chrono::NaiveDate;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub order_id: i32,

    /// Must reference an existing customer; checked by the validation layer,
    /// not by a schema constraint.
    pub customer_id: i32,

    /// Calendar date only, no time component. Defaults to the creation date.
    pub order_date: NaiveDate,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::customer::Entity",
        from = "Column::CustomerId",
        to = "super::customer::Column::CustomerId"
    )]
    Customer,
    #[sea_orm(has_many = "super::product_order::Entity")]
    ProductOrders,
}

impl Related<super::customer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl Related<super::product_order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductOrders.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
