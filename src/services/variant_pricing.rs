//! Per-metal variants and price derivation.
//!
//! A variant is a purity-differentiated SKU. Its prices are either computed
//! from the metal's current reference value (AUTO) or fixed manually
//! (OVERRIDE); the mode is a free two-way switch with no forbidden
//! transitions. Overrides left behind while the mode is AUTO are kept but
//! unused until the mode flips back.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, Order, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use crate::entities::variants::PricingMode;
use crate::entities::{prelude::*, quotes, variants};
use crate::services::error::ValuationError;
use crate::services::metal_registry;
use crate::services::rate_store;

/// Derived prices for one variant, all in the base currency
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VariantPrices {
    pub suggested: Decimal,
    pub purchase: Decimal,
    pub sale: Decimal,
}

pub struct CreateVariant {
    pub name: String,
    pub sku: String,
    pub purity: Decimal,
    pub buy_factor: Option<Decimal>,
    pub sale_factor: Option<Decimal>,
}

pub struct UpdateVariantPatch {
    pub name: Option<String>,
    pub sku: Option<String>,
    pub purity: Option<Decimal>,
}

#[derive(Default)]
pub struct PricingPatch {
    pub pricing_mode: Option<PricingMode>,
    pub buy_factor: Option<Decimal>,
    pub sale_factor: Option<Decimal>,
    pub purchase_price_override: Option<Decimal>,
    pub sale_price_override: Option<Decimal>,
    pub clear_purchase_override: bool,
    pub clear_sale_override: bool,
}

pub struct PricedVariant {
    pub variant: variants::Model,
    pub prices: VariantPrices,
}

pub fn suggested_price(reference_value: Decimal, purity: Decimal) -> Decimal {
    reference_value * purity
}

pub fn final_purchase_price(variant: &variants::Model, reference_value: Decimal) -> Decimal {
    match (variant.pricing_mode, variant.purchase_price_override) {
        (PricingMode::Override, Some(price)) => price,
        _ => suggested_price(reference_value, variant.purity) * variant.buy_factor,
    }
}

pub fn final_sale_price(variant: &variants::Model, reference_value: Decimal) -> Decimal {
    match (variant.pricing_mode, variant.sale_price_override) {
        (PricingMode::Override, Some(price)) => price,
        _ => suggested_price(reference_value, variant.purity) * variant.sale_factor,
    }
}

/// All three derived prices at once. Sale below purchase is legal here;
/// the quote-entry path surfaces it as a warning.
pub fn compute_prices(variant: &variants::Model, reference_value: Decimal) -> VariantPrices {
    VariantPrices {
        suggested: suggested_price(reference_value, variant.purity),
        purchase: final_purchase_price(variant, reference_value),
        sale: final_sale_price(variant, reference_value),
    }
}

fn validate_purity(purity: Decimal) -> Result<(), ValuationError> {
    if purity <= Decimal::ZERO || purity > Decimal::ONE {
        return Err(ValuationError::InvalidValue(format!(
            "purity must be in (0, 1], got {}",
            purity
        )));
    }
    Ok(())
}

fn validate_factor(label: &str, factor: Decimal) -> Result<(), ValuationError> {
    if factor <= Decimal::ZERO {
        return Err(ValuationError::InvalidValue(format!(
            "{} must be positive, got {}",
            label, factor
        )));
    }
    Ok(())
}

fn validate_override(label: &str, price: Decimal) -> Result<(), ValuationError> {
    if price < Decimal::ZERO {
        return Err(ValuationError::InvalidValue(format!(
            "{} must not be negative, got {}",
            label, price
        )));
    }
    Ok(())
}

/// SKU uniqueness is global across all metals, observed behavior of the
/// business, not a per-metal scope
async fn check_sku_free(
    db: &DatabaseConnection,
    sku: &str,
    exclude_id: Option<i32>,
) -> Result<(), ValuationError> {
    let mut query = Variants::find().filter(variants::Column::Sku.eq(sku));
    if let Some(id) = exclude_id {
        query = query.filter(variants::Column::Id.ne(id));
    }
    if query.one(db).await?.is_some() {
        return Err(ValuationError::DuplicateSku(sku.to_string()));
    }
    Ok(())
}

pub async fn create(
    db: &DatabaseConnection,
    metal_id: i32,
    req: CreateVariant,
) -> Result<variants::Model, ValuationError> {
    metal_registry::find(db, metal_id).await?;

    let sku = req.sku.trim().to_string();
    if sku.is_empty() {
        return Err(ValuationError::InvalidValue("sku must not be empty".to_string()));
    }
    validate_purity(req.purity)?;
    let buy_factor = req.buy_factor.unwrap_or(Decimal::ONE);
    let sale_factor = req.sale_factor.unwrap_or(Decimal::ONE);
    validate_factor("buy factor", buy_factor)?;
    validate_factor("sale factor", sale_factor)?;
    check_sku_free(db, &sku, None).await?;

    let variant = variants::ActiveModel {
        metal_id: Set(metal_id),
        name: Set(req.name.trim().to_string()),
        sku: Set(sku),
        purity: Set(req.purity),
        is_active: Set(true),
        is_favorite: Set(false),
        pricing_mode: Set(PricingMode::Auto),
        buy_factor: Set(buy_factor),
        sale_factor: Set(sale_factor),
        purchase_price_override: Set(None),
        sale_price_override: Set(None),
        created_at: Set(Some(Utc::now().into())),
        ..Default::default()
    };
    Ok(variant.insert(db).await?)
}

pub async fn find(
    db: &DatabaseConnection,
    variant_id: i32,
) -> Result<variants::Model, ValuationError> {
    Variants::find_by_id(variant_id)
        .one(db)
        .await?
        .ok_or_else(|| ValuationError::NotFound(format!("variant {}", variant_id)))
}

pub async fn update(
    db: &DatabaseConnection,
    variant_id: i32,
    patch: UpdateVariantPatch,
) -> Result<variants::Model, ValuationError> {
    let variant = find(db, variant_id).await?;

    if let Some(purity) = patch.purity {
        validate_purity(purity)?;
    }
    let sku = match patch.sku {
        Some(s) => {
            let s = s.trim().to_string();
            if s.is_empty() {
                return Err(ValuationError::InvalidValue("sku must not be empty".to_string()));
            }
            check_sku_free(db, &s, Some(variant_id)).await?;
            Some(s)
        }
        None => None,
    };

    let mut row: variants::ActiveModel = variant.into();
    if let Some(name) = patch.name {
        row.name = Set(name.trim().to_string());
    }
    if let Some(sku) = sku {
        row.sku = Set(sku);
    }
    if let Some(purity) = patch.purity {
        row.purity = Set(purity);
    }
    Ok(row.update(db).await?)
}

/// Apply a pricing patch. `clear_*` flags null an override without touching
/// the mode, so a variant can carry stale overrides under AUTO.
pub async fn update_pricing(
    db: &DatabaseConnection,
    variant_id: i32,
    patch: PricingPatch,
) -> Result<variants::Model, ValuationError> {
    let variant = find(db, variant_id).await?;

    if patch.clear_purchase_override && patch.purchase_price_override.is_some() {
        return Err(ValuationError::InvalidValue(
            "cannot set and clear the purchase override in one request".to_string(),
        ));
    }
    if patch.clear_sale_override && patch.sale_price_override.is_some() {
        return Err(ValuationError::InvalidValue(
            "cannot set and clear the sale override in one request".to_string(),
        ));
    }
    if let Some(factor) = patch.buy_factor {
        validate_factor("buy factor", factor)?;
    }
    if let Some(factor) = patch.sale_factor {
        validate_factor("sale factor", factor)?;
    }
    if let Some(price) = patch.purchase_price_override {
        validate_override("purchase override", price)?;
    }
    if let Some(price) = patch.sale_price_override {
        validate_override("sale override", price)?;
    }

    let mut row: variants::ActiveModel = variant.into();
    if let Some(mode) = patch.pricing_mode {
        row.pricing_mode = Set(mode);
    }
    if let Some(factor) = patch.buy_factor {
        row.buy_factor = Set(factor);
    }
    if let Some(factor) = patch.sale_factor {
        row.sale_factor = Set(factor);
    }
    if patch.clear_purchase_override {
        row.purchase_price_override = Set(None);
    } else if let Some(price) = patch.purchase_price_override {
        row.purchase_price_override = Set(Some(price));
    }
    if patch.clear_sale_override {
        row.sale_price_override = Set(None);
    } else if let Some(price) = patch.sale_price_override {
        row.sale_price_override = Set(Some(price));
    }
    Ok(row.update(db).await?)
}

pub async fn toggle_active(
    db: &DatabaseConnection,
    variant_id: i32,
    is_active: bool,
) -> Result<variants::Model, ValuationError> {
    let variant = find(db, variant_id).await?;
    let mut row: variants::ActiveModel = variant.into();
    row.is_active = Set(is_active);
    Ok(row.update(db).await?)
}

/// Hard delete, rejected while any quote references the variant
pub async fn delete(db: &DatabaseConnection, variant_id: i32) -> Result<(), ValuationError> {
    let variant = find(db, variant_id).await?;

    let quote_count = Quotes::find()
        .filter(quotes::Column::VariantId.eq(variant_id))
        .count(db)
        .await?;
    if quote_count > 0 {
        return Err(ValuationError::InUse(format!(
            "{} quote(s) reference variant {}",
            quote_count, variant.sku
        )));
    }

    Variants::delete_by_id(variant_id).exec(db).await?;
    Ok(())
}

/// Variants of a metal with prices derived against the metal's current
/// reference value
pub async fn list_for_metal(
    db: &DatabaseConnection,
    metal_id: i32,
) -> Result<Vec<PricedVariant>, ValuationError> {
    let metal = metal_registry::find(db, metal_id).await?;
    let reference_value = rate_store::current_metal_reference(db, metal_id)
        .await?
        .map(|r| r.reference_value)
        .unwrap_or(metal.reference_value);

    let rows = Variants::find()
        .filter(variants::Column::MetalId.eq(metal_id))
        .order_by(variants::Column::Purity, Order::Desc)
        .order_by(variants::Column::Id, Order::Asc)
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .map(|variant| {
            let prices = compute_prices(&variant, reference_value);
            PricedVariant { variant, prices }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn make_variant(
        mode: PricingMode,
        purity: Decimal,
        buy_factor: Decimal,
        sale_factor: Decimal,
        purchase_override: Option<Decimal>,
        sale_override: Option<Decimal>,
    ) -> variants::Model {
        variants::Model {
            id: 1,
            metal_id: 1,
            name: "18k".to_string(),
            sku: "ORO-750".to_string(),
            purity,
            is_active: true,
            is_favorite: false,
            pricing_mode: mode,
            buy_factor,
            sale_factor,
            purchase_price_override: purchase_override,
            sale_price_override: sale_override,
            created_at: None,
        }
    }

    #[test]
    fn test_auto_pricing_scenario() {
        // Oro at 100000 in the base currency, 18k variant
        let v = make_variant(
            PricingMode::Auto,
            dec!(0.75),
            dec!(0.95),
            dec!(1.1),
            None,
            None,
        );
        let prices = compute_prices(&v, dec!(100000));
        assert_eq!(prices.suggested, dec!(75000));
        assert_eq!(prices.purchase, dec!(71250.00));
        assert_eq!(prices.sale, dec!(82500.000));
    }

    #[test]
    fn test_override_wins_when_set() {
        let v = make_variant(
            PricingMode::Override,
            dec!(0.75),
            dec!(0.95),
            dec!(1.1),
            Some(dec!(100)),
            Some(dec!(120)),
        );
        assert_eq!(final_purchase_price(&v, dec!(100000)), dec!(100));
        assert_eq!(final_sale_price(&v, dec!(100000)), dec!(120));
    }

    #[test]
    fn test_override_mode_with_missing_override_falls_back() {
        let v = make_variant(
            PricingMode::Override,
            dec!(0.5),
            dec!(1),
            dec!(2),
            None,
            Some(dec!(999)),
        );
        // Purchase has no override, so the AUTO formula applies
        assert_eq!(final_purchase_price(&v, dec!(1000)), dec!(500));
        assert_eq!(final_sale_price(&v, dec!(1000)), dec!(999));
    }

    #[test]
    fn test_stale_override_ignored_under_auto() {
        let v = make_variant(
            PricingMode::Auto,
            dec!(0.5),
            dec!(1),
            dec!(1),
            Some(dec!(123)),
            Some(dec!(456)),
        );
        assert_eq!(final_purchase_price(&v, dec!(1000)), dec!(500));
        assert_eq!(final_sale_price(&v, dec!(1000)), dec!(500));
    }

    #[test]
    fn test_crossed_prices_are_not_an_error() {
        // Misconfigured factors legally produce sale below purchase
        let v = make_variant(
            PricingMode::Auto,
            dec!(1),
            dec!(1.2),
            dec!(0.8),
            None,
            None,
        );
        let prices = compute_prices(&v, dec!(100));
        assert!(prices.sale < prices.purchase);
    }

    #[test]
    fn test_purity_bounds() {
        assert!(validate_purity(dec!(0.000001)).is_ok());
        assert!(validate_purity(dec!(1)).is_ok());
        assert!(validate_purity(dec!(0)).is_err());
        assert!(validate_purity(dec!(-0.5)).is_err());
        assert!(validate_purity(dec!(1.000001)).is_err());
    }

    #[test]
    fn test_factor_and_override_validation() {
        assert!(validate_factor("buy factor", dec!(0.0001)).is_ok());
        assert!(validate_factor("buy factor", dec!(0)).is_err());
        assert!(validate_factor("buy factor", dec!(-1)).is_err());
        assert!(validate_override("purchase override", dec!(0)).is_ok());
        assert!(validate_override("purchase override", dec!(-1)).is_err());
    }
}
