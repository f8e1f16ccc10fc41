//! Single-slot favorite selection: at most one favorite variant per metal.
//!
//! Modeled as explicit commands over the metal's whole variant set instead of
//! per-row toggles. The clear-then-set runs in one transaction, so two
//! favorites are never observable and an interrupted switch leaves the
//! previous favorite in place.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};

use crate::entities::{prelude::*, variants};
use crate::services::error::ValuationError;
use crate::services::metal_registry;
use crate::services::variant_pricing;

/// Make `variant_id` the favorite of its metal, clearing any previous one
pub async fn set_favorite(
    db: &DatabaseConnection,
    variant_id: i32,
) -> Result<variants::Model, ValuationError> {
    let variant = variant_pricing::find(db, variant_id).await?;

    let txn = db.begin().await?;
    Variants::update_many()
        .col_expr(variants::Column::IsFavorite, Expr::value(false))
        .filter(variants::Column::MetalId.eq(variant.metal_id))
        .filter(variants::Column::IsFavorite.eq(true))
        .filter(variants::Column::Id.ne(variant_id))
        .exec(&txn)
        .await?;

    let mut row: variants::ActiveModel = variant.into();
    row.is_favorite = Set(true);
    let updated = row.update(&txn).await?;
    txn.commit().await?;

    Ok(updated)
}

/// Explicit "no favorite" for a metal; this is also the initial state
pub async fn clear_favorite(
    db: &DatabaseConnection,
    metal_id: i32,
) -> Result<u64, ValuationError> {
    metal_registry::find(db, metal_id).await?;

    let result = Variants::update_many()
        .col_expr(variants::Column::IsFavorite, Expr::value(false))
        .filter(variants::Column::MetalId.eq(metal_id))
        .filter(variants::Column::IsFavorite.eq(true))
        .exec(db)
        .await?;

    Ok(result.rows_affected)
}
