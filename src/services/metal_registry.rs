//! Metal set: reference values in the base currency, manual display order,
//! and the append-only reference-value history behind each metal.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, Order, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};

use crate::entities::{metal_reference_history, metals, prelude::*, variants};
use crate::services::error::ValuationError;
use crate::services::rate_store;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    /// Toward the top of the list (lower sort_order)
    Up,
    /// Toward the bottom (higher sort_order)
    Down,
}

pub struct UpdateMetalPatch {
    pub name: Option<String>,
    /// `Some("")` clears the symbol
    pub symbol: Option<String>,
    pub reference_value: Option<Decimal>,
}

pub struct RefHistory {
    /// Synthesized from the history log, falling back to the metal row when
    /// no history exists yet
    pub current: Decimal,
    pub history: Vec<metal_reference_history::Model>,
}

fn validate_reference_value(value: Decimal) -> Result<(), ValuationError> {
    if value < Decimal::ZERO {
        return Err(ValuationError::InvalidValue(format!(
            "reference value must not be negative, got {}",
            value
        )));
    }
    Ok(())
}

/// Duplicate-name (case-insensitive) and duplicate-non-empty-symbol checks,
/// excluding the metal being updated when `exclude_id` is set. The metal list
/// is a handful of rows, so it is checked in memory.
fn check_duplicates(
    existing: &[metals::Model],
    name: &str,
    symbol: Option<&str>,
    exclude_id: Option<i32>,
) -> Result<(), ValuationError> {
    let name_lower = name.to_lowercase();
    for metal in existing {
        if Some(metal.id) == exclude_id {
            continue;
        }
        if metal.name.to_lowercase() == name_lower {
            return Err(ValuationError::DuplicateName(name.to_string()));
        }
        if let (Some(candidate), Some(taken)) = (symbol, metal.symbol.as_deref()) {
            if !candidate.is_empty() && candidate.eq_ignore_ascii_case(taken) {
                return Err(ValuationError::DuplicateSymbol(candidate.to_string()));
            }
        }
    }
    Ok(())
}

/// Create a metal at the end of the display order. When a starting reference
/// value is given, an initial history row is appended in the same transaction
/// so the log and the row never disagree.
pub async fn create(
    db: &DatabaseConnection,
    name: &str,
    symbol: Option<String>,
    reference_value: Option<Decimal>,
    actor: Option<String>,
) -> Result<metals::Model, ValuationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValuationError::InvalidValue(
            "metal name must not be empty".to_string(),
        ));
    }
    let symbol = symbol
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());
    let value = reference_value.unwrap_or(Decimal::ZERO);
    validate_reference_value(value)?;

    let existing = Metals::find().all(db).await?;
    check_duplicates(&existing, name, symbol.as_deref(), None)?;
    let next_order = existing.iter().map(|m| m.sort_order).max().unwrap_or(0) + 1;

    let txn = db.begin().await?;
    let metal = metals::ActiveModel {
        name: Set(name.to_string()),
        symbol: Set(symbol),
        reference_value: Set(value),
        is_active: Set(true),
        sort_order: Set(next_order),
        created_at: Set(Some(Utc::now().into())),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    if reference_value.is_some() {
        rate_store::append_metal_reference(&txn, metal.id, value, None, actor).await?;
    }
    txn.commit().await?;

    Ok(metal)
}

pub async fn find(db: &DatabaseConnection, metal_id: i32) -> Result<metals::Model, ValuationError> {
    Metals::find_by_id(metal_id)
        .one(db)
        .await?
        .ok_or_else(|| ValuationError::NotFound(format!("metal {}", metal_id)))
}

/// All metals in display order
pub async fn list(db: &DatabaseConnection) -> Result<Vec<metals::Model>, ValuationError> {
    Ok(Metals::find()
        .order_by(metals::Column::SortOrder, Order::Asc)
        .all(db)
        .await?)
}

/// Update name/symbol/reference value. A changed reference value appends a
/// history row effective now, in the same transaction as the update.
pub async fn update(
    db: &DatabaseConnection,
    metal_id: i32,
    patch: UpdateMetalPatch,
    actor: Option<String>,
) -> Result<metals::Model, ValuationError> {
    let metal = find(db, metal_id).await?;

    let name = match &patch.name {
        Some(n) => {
            let n = n.trim();
            if n.is_empty() {
                return Err(ValuationError::InvalidValue(
                    "metal name must not be empty".to_string(),
                ));
            }
            n.to_string()
        }
        None => metal.name.clone(),
    };
    let symbol = match patch.symbol {
        Some(s) => {
            let s = s.trim().to_string();
            if s.is_empty() { None } else { Some(s) }
        }
        None => metal.symbol.clone(),
    };

    let existing = Metals::find().all(db).await?;
    check_duplicates(&existing, &name, symbol.as_deref(), Some(metal_id))?;

    let value_changed = patch
        .reference_value
        .map(|v| v != metal.reference_value)
        .unwrap_or(false);
    if let Some(value) = patch.reference_value {
        validate_reference_value(value)?;
    }

    let txn = db.begin().await?;
    let mut row: metals::ActiveModel = metal.into();
    row.name = Set(name);
    row.symbol = Set(symbol);
    if let Some(value) = patch.reference_value {
        row.reference_value = Set(value);
    }
    let updated = row.update(&txn).await?;

    if value_changed {
        rate_store::append_metal_reference(&txn, metal_id, updated.reference_value, None, actor)
            .await?;
    }
    txn.commit().await?;

    Ok(updated)
}

/// Swap sort_order with the adjacent ACTIVE metal. At an extremity this is a
/// no-op, not an error; returns whether anything moved.
pub async fn move_metal(
    db: &DatabaseConnection,
    metal_id: i32,
    direction: MoveDirection,
) -> Result<bool, ValuationError> {
    let metal = find(db, metal_id).await?;

    let neighbor = match direction {
        MoveDirection::Up => {
            Metals::find()
                .filter(metals::Column::IsActive.eq(true))
                .filter(metals::Column::SortOrder.lt(metal.sort_order))
                .order_by(metals::Column::SortOrder, Order::Desc)
                .one(db)
                .await?
        }
        MoveDirection::Down => {
            Metals::find()
                .filter(metals::Column::IsActive.eq(true))
                .filter(metals::Column::SortOrder.gt(metal.sort_order))
                .order_by(metals::Column::SortOrder, Order::Asc)
                .one(db)
                .await?
        }
    };

    let Some(neighbor) = neighbor else {
        return Ok(false);
    };

    let metal_order = metal.sort_order;
    let neighbor_order = neighbor.sort_order;

    let txn = db.begin().await?;
    let mut first: metals::ActiveModel = metal.into();
    first.sort_order = Set(neighbor_order);
    first.update(&txn).await?;
    let mut second: metals::ActiveModel = neighbor.into();
    second.sort_order = Set(metal_order);
    second.update(&txn).await?;
    txn.commit().await?;

    Ok(true)
}

pub async fn toggle_active(
    db: &DatabaseConnection,
    metal_id: i32,
    is_active: bool,
) -> Result<metals::Model, ValuationError> {
    let metal = find(db, metal_id).await?;
    let mut row: metals::ActiveModel = metal.into();
    row.is_active = Set(is_active);
    Ok(row.update(db).await?)
}

/// Hard delete. Rejected while any variant (active or inactive) or any
/// reference-history row exists; priced metals are soft-deactivated instead.
pub async fn delete(db: &DatabaseConnection, metal_id: i32) -> Result<(), ValuationError> {
    let metal = find(db, metal_id).await?;

    let variant_count = Variants::find()
        .filter(variants::Column::MetalId.eq(metal_id))
        .count(db)
        .await?;
    if variant_count > 0 {
        return Err(ValuationError::InUse(format!(
            "{} variant(s) belong to metal {}",
            variant_count, metal.name
        )));
    }

    let history_count = MetalReferenceHistory::find()
        .filter(metal_reference_history::Column::MetalId.eq(metal_id))
        .count(db)
        .await?;
    if history_count > 0 {
        return Err(ValuationError::InUse(format!(
            "{} reference-history row(s) exist for metal {}",
            history_count, metal.name
        )));
    }

    Metals::delete_by_id(metal_id).exec(db).await?;
    Ok(())
}

/// Current value plus paged history, most recent first
pub async fn ref_history(
    db: &DatabaseConnection,
    metal_id: i32,
    take: Option<u64>,
) -> Result<RefHistory, ValuationError> {
    let metal = find(db, metal_id).await?;

    let current = rate_store::current_metal_reference(db, metal_id)
        .await?
        .map(|r| r.reference_value)
        .unwrap_or(metal.reference_value);
    let history = rate_store::metal_reference_page(db, metal_id, take).await?;

    Ok(RefHistory { current, history })
}
