//! Append-only value history for the two timestamped series: currency
//! exchange rates and metal reference values.
//!
//! Rows are never updated or deleted; "current" is a projection over the log
//! (max `effective_at` not greater than now). Ties on `effective_at` are broken
//! by insertion order: later `created_at`, then higher id, wins.
//!
//! Operations are generic over [`ConnectionTrait`] so the registries can call
//! them inside a transaction (the base-currency switch appends N history rows
//! that must commit together with the flag flip).

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, Order, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use crate::entities::{currency_rates, metal_reference_history, prelude::*};
use crate::services::error::ValuationError;

/// Default page size for history queries
pub const DEFAULT_TAKE: u64 = 20;

/// Hard cap on history page size
pub const MAX_TAKE: u64 = 500;

pub fn clamp_take(take: Option<u64>) -> u64 {
    take.unwrap_or(DEFAULT_TAKE).min(MAX_TAKE)
}

/// Default a missing `effective_at` to now; reject future-dated entries.
/// Backdating is allowed.
pub fn resolve_effective_at(
    requested: Option<DateTimeWithTimeZone>,
) -> Result<DateTimeWithTimeZone, ValuationError> {
    let now: DateTimeWithTimeZone = Utc::now().into();
    match requested {
        None => Ok(now),
        Some(ts) if ts > now => Err(ValuationError::InvalidTimestamp(format!(
            "effective_at {} is in the future",
            ts
        ))),
        Some(ts) => Ok(ts),
    }
}

/// Append an exchange-rate record. Rates are expressed in the base currency
/// and must be strictly positive.
pub async fn append_currency_rate<C: ConnectionTrait>(
    conn: &C,
    currency_id: i32,
    rate: Decimal,
    effective_at: Option<DateTimeWithTimeZone>,
    created_by: Option<String>,
) -> Result<currency_rates::Model, ValuationError> {
    if rate <= Decimal::ZERO {
        return Err(ValuationError::InvalidValue(format!(
            "exchange rate must be positive, got {}",
            rate
        )));
    }
    let effective_at = resolve_effective_at(effective_at)?;

    let record = currency_rates::ActiveModel {
        currency_id: Set(currency_id),
        rate: Set(rate),
        effective_at: Set(effective_at),
        created_at: Set(Some(Utc::now().into())),
        created_by: Set(created_by),
        ..Default::default()
    };
    Ok(record.insert(conn).await?)
}

/// Append a metal reference-value record. Zero is legal (a metal may be
/// listed before it is priced), negative values are not.
pub async fn append_metal_reference<C: ConnectionTrait>(
    conn: &C,
    metal_id: i32,
    reference_value: Decimal,
    effective_at: Option<DateTimeWithTimeZone>,
    created_by: Option<String>,
) -> Result<metal_reference_history::Model, ValuationError> {
    if reference_value < Decimal::ZERO {
        return Err(ValuationError::InvalidValue(format!(
            "reference value must not be negative, got {}",
            reference_value
        )));
    }
    let effective_at = resolve_effective_at(effective_at)?;

    let record = metal_reference_history::ActiveModel {
        metal_id: Set(metal_id),
        reference_value: Set(reference_value),
        effective_at: Set(effective_at),
        created_at: Set(Some(Utc::now().into())),
        created_by: Set(created_by),
        ..Default::default()
    };
    Ok(record.insert(conn).await?)
}

/// Latest rate with `effective_at` not greater than now, or `None` if the
/// currency has no recorded rate (callers supply the fallback, e.g. the base
/// currency's implicit 1).
pub async fn current_currency_rate<C: ConnectionTrait>(
    conn: &C,
    currency_id: i32,
) -> Result<Option<currency_rates::Model>, ValuationError> {
    let now: DateTimeWithTimeZone = Utc::now().into();
    Ok(CurrencyRates::find()
        .filter(currency_rates::Column::CurrencyId.eq(currency_id))
        .filter(currency_rates::Column::EffectiveAt.lte(now))
        .order_by(currency_rates::Column::EffectiveAt, Order::Desc)
        .order_by(currency_rates::Column::CreatedAt, Order::Desc)
        .order_by(currency_rates::Column::Id, Order::Desc)
        .one(conn)
        .await?)
}

/// Latest reference value with `effective_at` not greater than now
pub async fn current_metal_reference<C: ConnectionTrait>(
    conn: &C,
    metal_id: i32,
) -> Result<Option<metal_reference_history::Model>, ValuationError> {
    let now: DateTimeWithTimeZone = Utc::now().into();
    Ok(MetalReferenceHistory::find()
        .filter(metal_reference_history::Column::MetalId.eq(metal_id))
        .filter(metal_reference_history::Column::EffectiveAt.lte(now))
        .order_by(metal_reference_history::Column::EffectiveAt, Order::Desc)
        .order_by(metal_reference_history::Column::CreatedAt, Order::Desc)
        .order_by(metal_reference_history::Column::Id, Order::Desc)
        .one(conn)
        .await?)
}

/// Rate history, most recent `effective_at` first, snapshot at call time
pub async fn currency_rate_history<C: ConnectionTrait>(
    conn: &C,
    currency_id: i32,
    take: Option<u64>,
) -> Result<Vec<currency_rates::Model>, ValuationError> {
    Ok(CurrencyRates::find()
        .filter(currency_rates::Column::CurrencyId.eq(currency_id))
        .order_by(currency_rates::Column::EffectiveAt, Order::Desc)
        .order_by(currency_rates::Column::CreatedAt, Order::Desc)
        .order_by(currency_rates::Column::Id, Order::Desc)
        .limit(clamp_take(take))
        .all(conn)
        .await?)
}

/// Reference-value history, most recent `effective_at` first
pub async fn metal_reference_page<C: ConnectionTrait>(
    conn: &C,
    metal_id: i32,
    take: Option<u64>,
) -> Result<Vec<metal_reference_history::Model>, ValuationError> {
    Ok(MetalReferenceHistory::find()
        .filter(metal_reference_history::Column::MetalId.eq(metal_id))
        .order_by(metal_reference_history::Column::EffectiveAt, Order::Desc)
        .order_by(metal_reference_history::Column::CreatedAt, Order::Desc)
        .order_by(metal_reference_history::Column::Id, Order::Desc)
        .limit(clamp_take(take))
        .all(conn)
        .await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_resolve_effective_at_defaults_to_now() {
        let before: DateTimeWithTimeZone = Utc::now().into();
        let resolved = resolve_effective_at(None).unwrap();
        let after: DateTimeWithTimeZone = Utc::now().into();
        assert!(resolved >= before && resolved <= after);
    }

    #[test]
    fn test_resolve_effective_at_allows_backdating() {
        let yesterday: DateTimeWithTimeZone = (Utc::now() - Duration::days(1)).into();
        let resolved = resolve_effective_at(Some(yesterday)).unwrap();
        assert_eq!(resolved, yesterday);
    }

    #[test]
    fn test_resolve_effective_at_rejects_future() {
        let tomorrow: DateTimeWithTimeZone = (Utc::now() + Duration::days(1)).into();
        let err = resolve_effective_at(Some(tomorrow)).unwrap_err();
        assert!(matches!(err, ValuationError::InvalidTimestamp(_)));
        assert_eq!(err.code(), "INVALID_TIMESTAMP");
    }

    #[test]
    fn test_clamp_take_bounds() {
        assert_eq!(clamp_take(None), DEFAULT_TAKE);
        assert_eq!(clamp_take(Some(5)), 5);
        assert_eq!(clamp_take(Some(10_000)), MAX_TAKE);
    }
}
