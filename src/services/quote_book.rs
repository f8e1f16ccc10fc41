//! Manually entered, currency-specific price points, distinct from the
//! computed base-currency prices. Append-only; the latest row per
//! (variant, currency) is "the" displayed quote.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, Order, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use crate::entities::{prelude::*, quotes};
use crate::services::currency_registry;
use crate::services::error::ValuationError;
use crate::services::rate_store;
use crate::services::variant_pricing;

#[derive(Debug)]
pub struct QuoteOutcome {
    pub quote: quotes::Model,
    /// Set when the sale price is below the purchase price. Deliberately a
    /// warning, not an error; the operator decides.
    pub warning: Option<String>,
}

pub async fn add_quote(
    db: &DatabaseConnection,
    variant_id: i32,
    currency_id: i32,
    purchase_price: Decimal,
    sale_price: Decimal,
    effective_at: Option<DateTimeWithTimeZone>,
    created_by: Option<String>,
) -> Result<QuoteOutcome, ValuationError> {
    let variant = variant_pricing::find(db, variant_id).await?;
    if !variant.is_active {
        return Err(ValuationError::InvalidValue(format!(
            "variant {} is inactive",
            variant.sku
        )));
    }
    let currency = currency_registry::find(db, currency_id).await?;
    if !currency.is_active {
        return Err(ValuationError::InvalidValue(format!(
            "currency {} is inactive",
            currency.code
        )));
    }
    if purchase_price < Decimal::ZERO || sale_price < Decimal::ZERO {
        return Err(ValuationError::InvalidValue(
            "quote prices must not be negative".to_string(),
        ));
    }
    let effective_at = rate_store::resolve_effective_at(effective_at)?;

    let quote = quotes::ActiveModel {
        variant_id: Set(variant_id),
        currency_id: Set(currency_id),
        purchase_price: Set(purchase_price),
        sale_price: Set(sale_price),
        effective_at: Set(effective_at),
        created_at: Set(Some(Utc::now().into())),
        created_by: Set(created_by),
        ..Default::default()
    }
    .insert(db)
    .await?;

    let warning = (sale_price < purchase_price).then(|| {
        format!(
            "sale price {} is below purchase price {}",
            sale_price, purchase_price
        )
    });

    Ok(QuoteOutcome { quote, warning })
}

/// The displayed quote for (variant, currency): latest `effective_at` not in
/// the future, same tie-break as the rate log
pub async fn latest_quote(
    db: &DatabaseConnection,
    variant_id: i32,
    currency_id: i32,
) -> Result<Option<quotes::Model>, ValuationError> {
    let now: DateTimeWithTimeZone = Utc::now().into();
    Ok(Quotes::find()
        .filter(quotes::Column::VariantId.eq(variant_id))
        .filter(quotes::Column::CurrencyId.eq(currency_id))
        .filter(quotes::Column::EffectiveAt.lte(now))
        .order_by(quotes::Column::EffectiveAt, Order::Desc)
        .order_by(quotes::Column::CreatedAt, Order::Desc)
        .order_by(quotes::Column::Id, Order::Desc)
        .one(db)
        .await?)
}

/// Quote history for a variant, optionally narrowed to one currency,
/// most recent first
pub async fn quote_history(
    db: &DatabaseConnection,
    variant_id: i32,
    currency_id: Option<i32>,
    take: Option<u64>,
) -> Result<Vec<quotes::Model>, ValuationError> {
    variant_pricing::find(db, variant_id).await?;

    let mut query = Quotes::find().filter(quotes::Column::VariantId.eq(variant_id));
    if let Some(currency_id) = currency_id {
        query = query.filter(quotes::Column::CurrencyId.eq(currency_id));
    }
    Ok(query
        .order_by(quotes::Column::EffectiveAt, Order::Desc)
        .order_by(quotes::Column::CreatedAt, Order::Desc)
        .order_by(quotes::Column::Id, Order::Desc)
        .limit(rate_store::clamp_take(take))
        .all(db)
        .await?)
}
