//! SeaORM Entity for currencies

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "currencies")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// ISO-style code, stored uppercase, unique
    pub code: String,
    pub name: String,
    pub symbol: String,
    /// Exactly one currency carries this flag after bootstrap
    pub is_base: bool,
    pub is_active: bool,
    pub created_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
