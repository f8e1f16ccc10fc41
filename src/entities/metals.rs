//! SeaORM Entity for metals

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "metals")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub symbol: Option<String>,
    /// Current value per unit of pure metal, in the base currency
    #[sea_orm(column_type = "Decimal(Some((24, 8)))")]
    pub reference_value: Decimal,
    pub is_active: bool,
    /// Display rank; mutated only by the move operation
    pub sort_order: i32,
    pub created_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
