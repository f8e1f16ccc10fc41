//! SeaORM Entity for the append-only metal reference-value history

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "metal_reference_history")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub metal_id: i32,
    #[sea_orm(column_type = "Decimal(Some((24, 8)))")]
    pub reference_value: Decimal,
    pub effective_at: DateTimeWithTimeZone,
    pub created_at: Option<DateTimeWithTimeZone>,
    pub created_by: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
