//! SeaORM Entity for metal variants (purity-differentiated SKUs)

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// How a variant's final prices are derived: computed from the metal's
/// reference value and factors, or fixed manually.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PricingMode {
    #[sea_orm(string_value = "AUTO")]
    Auto,
    #[sea_orm(string_value = "OVERRIDE")]
    Override,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "variants")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub metal_id: i32,
    pub name: String,
    /// Globally unique across all metals
    pub sku: String,
    /// Pure-metal fraction in (0, 1]
    #[sea_orm(column_type = "Decimal(Some((10, 6)))")]
    pub purity: Decimal,
    pub is_active: bool,
    /// At most one variant per metal carries this flag
    pub is_favorite: bool,
    pub pricing_mode: PricingMode,
    #[sea_orm(column_type = "Decimal(Some((24, 8)))")]
    pub buy_factor: Decimal,
    #[sea_orm(column_type = "Decimal(Some((24, 8)))")]
    pub sale_factor: Decimal,
    /// Kept (possibly stale) while pricing_mode is AUTO; only read under OVERRIDE
    #[sea_orm(column_type = "Decimal(Some((24, 8)))", nullable)]
    pub purchase_price_override: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((24, 8)))", nullable)]
    pub sale_price_override: Option<Decimal>,
    pub created_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
