//! Currency set with the protected-base invariant: exactly one currency is
//! the base at all times (after bootstrap), the base cannot be deactivated,
//! deleted, or given manual rates.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, Order, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::info;

use crate::entities::{currencies, currency_rates, metals, prelude::*, quotes};
use crate::services::error::ValuationError;
use crate::services::rate_store;

/// A currency plus its synthesized current rate. The base currency always
/// reports exactly 1 and never reads the rate log; rows recorded before a
/// currency became base stay in storage for audit but are not surfaced.
pub struct CurrencyWithRate {
    pub currency: currencies::Model,
    pub current_rate: Option<Decimal>,
}

#[derive(Debug)]
pub struct BaseSwitchOutcome {
    pub changed: bool,
    pub previous_base_id: Option<i32>,
    /// Rate of the new base expressed in the old base; every metal's
    /// reference value was divided by it
    pub rate_applied: Option<Decimal>,
    pub metals_recomputed: usize,
    pub effective_at: Option<DateTimeWithTimeZone>,
}

/// Create a currency. The code is trimmed and uppercased; uniqueness is
/// checked against every row, active or inactive. The first currency ever
/// created becomes the base.
pub async fn create(
    db: &DatabaseConnection,
    code: &str,
    name: &str,
    symbol: &str,
) -> Result<currencies::Model, ValuationError> {
    let code = code.trim().to_uppercase();
    if code.is_empty() {
        return Err(ValuationError::InvalidValue(
            "currency code must not be empty".to_string(),
        ));
    }
    let name = name.trim();
    if name.is_empty() {
        return Err(ValuationError::InvalidValue(
            "currency name must not be empty".to_string(),
        ));
    }

    // Stored codes are uppercase, so an equality check is case-insensitive
    let existing = Currencies::find()
        .filter(currencies::Column::Code.eq(&code))
        .one(db)
        .await?;
    if existing.is_some() {
        return Err(ValuationError::DuplicateCode(code));
    }

    let is_first = Currencies::find().count(db).await? == 0;

    let currency = currencies::ActiveModel {
        code: Set(code),
        name: Set(name.to_string()),
        symbol: Set(symbol.trim().to_string()),
        is_base: Set(is_first),
        is_active: Set(true),
        created_at: Set(Some(Utc::now().into())),
        ..Default::default()
    };
    Ok(currency.insert(db).await?)
}

pub async fn find(
    db: &DatabaseConnection,
    currency_id: i32,
) -> Result<currencies::Model, ValuationError> {
    Currencies::find_by_id(currency_id)
        .one(db)
        .await?
        .ok_or_else(|| ValuationError::NotFound(format!("currency {}", currency_id)))
}

/// Every currency, code order, with its synthesized current rate
pub async fn list(db: &DatabaseConnection) -> Result<Vec<CurrencyWithRate>, ValuationError> {
    let rows = Currencies::find()
        .order_by(currencies::Column::Code, Order::Asc)
        .all(db)
        .await?;

    let mut out = Vec::with_capacity(rows.len());
    for currency in rows {
        let current_rate = if currency.is_base {
            Some(Decimal::ONE)
        } else {
            rate_store::current_currency_rate(db, currency.id)
                .await?
                .map(|r| r.rate)
        };
        out.push(CurrencyWithRate {
            currency,
            current_rate,
        });
    }
    Ok(out)
}

/// Switch the base currency. Flag flip, N metal recomputations, and N history
/// appends commit in one transaction; partial application would leave prices
/// in mixed currencies.
///
/// Previously the old base had implicit rate 1 and the new base some rate `r`
/// in the old base, so every metal's reference value is divided by `r`.
pub async fn set_base(
    db: &DatabaseConnection,
    currency_id: i32,
    effective_at: Option<DateTimeWithTimeZone>,
    actor: Option<String>,
) -> Result<BaseSwitchOutcome, ValuationError> {
    let target = find(db, currency_id).await?;
    if !target.is_active {
        return Err(ValuationError::InvalidValue(format!(
            "currency {} is inactive and cannot become base",
            target.code
        )));
    }
    if target.is_base {
        return Ok(BaseSwitchOutcome {
            changed: false,
            previous_base_id: Some(target.id),
            rate_applied: None,
            metals_recomputed: 0,
            effective_at: None,
        });
    }
    let effective_at = rate_store::resolve_effective_at(effective_at)?;

    let txn = db.begin().await?;

    let rate = rate_store::current_currency_rate(&txn, currency_id)
        .await?
        .map(|r| r.rate)
        .ok_or_else(|| {
            ValuationError::InvalidValue(format!(
                "no exchange rate recorded for {}, cannot recompute metal values",
                target.code
            ))
        })?;

    let previous = Currencies::find()
        .filter(currencies::Column::IsBase.eq(true))
        .one(&txn)
        .await?;
    let previous_base_id = previous.as_ref().map(|c| c.id);

    if let Some(previous) = previous {
        let mut prev: currencies::ActiveModel = previous.into();
        prev.is_base = Set(false);
        prev.update(&txn).await?;
    }
    let mut new_base: currencies::ActiveModel = target.clone().into();
    new_base.is_base = Set(true);
    new_base.update(&txn).await?;

    // Recompute every metal, inactive ones included, so a later reactivation
    // cannot resurrect a value expressed in the old base. One history row per
    // metal, all sharing the same effective_at, keeps the switch a single
    // auditable event.
    let all_metals = Metals::find().all(&txn).await?;
    let metals_recomputed = all_metals.len();
    for metal in all_metals {
        let recomputed = metal.reference_value / rate;
        let metal_id = metal.id;
        let mut row: metals::ActiveModel = metal.into();
        row.reference_value = Set(recomputed);
        row.update(&txn).await?;
        rate_store::append_metal_reference(
            &txn,
            metal_id,
            recomputed,
            Some(effective_at),
            actor.clone(),
        )
        .await?;
    }

    txn.commit().await?;

    info!(
        currency_id = currency_id,
        code = %target.code,
        rate = %rate,
        metals_recomputed = metals_recomputed,
        "Base currency switched"
    );

    Ok(BaseSwitchOutcome {
        changed: true,
        previous_base_id,
        rate_applied: Some(rate),
        metals_recomputed,
        effective_at: Some(effective_at),
    })
}

pub async fn toggle_active(
    db: &DatabaseConnection,
    currency_id: i32,
    is_active: bool,
) -> Result<currencies::Model, ValuationError> {
    let currency = find(db, currency_id).await?;
    if currency.is_base && !is_active {
        return Err(ValuationError::CannotDeactivateBase);
    }
    let mut row: currencies::ActiveModel = currency.into();
    row.is_active = Set(is_active);
    Ok(row.update(db).await?)
}

/// Hard delete. Rejected while the currency is base or while any quote or
/// rate row references it (history must never be orphaned).
pub async fn delete(db: &DatabaseConnection, currency_id: i32) -> Result<(), ValuationError> {
    let currency = find(db, currency_id).await?;
    if currency.is_base {
        return Err(ValuationError::InUse("currency is the base currency".to_string()));
    }

    let quote_count = Quotes::find()
        .filter(quotes::Column::CurrencyId.eq(currency_id))
        .count(db)
        .await?;
    if quote_count > 0 {
        return Err(ValuationError::InUse(format!(
            "{} quote(s) reference currency {}",
            quote_count, currency.code
        )));
    }

    let rate_count = CurrencyRates::find()
        .filter(currency_rates::Column::CurrencyId.eq(currency_id))
        .count(db)
        .await?;
    if rate_count > 0 {
        return Err(ValuationError::InUse(format!(
            "{} rate record(s) exist for currency {}",
            rate_count, currency.code
        )));
    }

    Currencies::delete_by_id(currency_id).exec(db).await?;
    Ok(())
}

/// Record a manual exchange rate. The base currency's rate is implicitly 1
/// and never persisted.
pub async fn add_rate(
    db: &DatabaseConnection,
    currency_id: i32,
    rate: Decimal,
    effective_at: Option<DateTimeWithTimeZone>,
    actor: Option<String>,
) -> Result<currency_rates::Model, ValuationError> {
    let currency = find(db, currency_id).await?;
    if currency.is_base {
        return Err(ValuationError::BaseCurrencyImmutable);
    }
    rate_store::append_currency_rate(db, currency_id, rate, effective_at, actor).await
}

/// Rate history for display. The base currency surfaces an empty history:
/// rows recorded before it became base are kept for audit only.
pub async fn rate_history(
    db: &DatabaseConnection,
    currency_id: i32,
    take: Option<u64>,
) -> Result<Vec<currency_rates::Model>, ValuationError> {
    let currency = find(db, currency_id).await?;
    if currency.is_base {
        return Ok(Vec::new());
    }
    rate_store::currency_rate_history(db, currency_id, take).await
}
