//! Variant request/response models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::entities::variants::{self, PricingMode};
use crate::services::variant_pricing::{PricedVariant, PricingPatch};

#[derive(Debug, Clone, Deserialize)]
pub struct CreateVariantRequest {
    pub name: String,
    pub sku: String,
    pub purity: Decimal,
    pub buy_factor: Option<Decimal>,
    pub sale_factor: Option<Decimal>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateVariantRequest {
    pub name: Option<String>,
    pub sku: Option<String>,
    pub purity: Option<Decimal>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PricingPatchRequest {
    pub pricing_mode: Option<PricingMode>,
    pub buy_factor: Option<Decimal>,
    pub sale_factor: Option<Decimal>,
    pub purchase_price_override: Option<Decimal>,
    pub sale_price_override: Option<Decimal>,
    #[serde(default)]
    pub clear_purchase_override: bool,
    #[serde(default)]
    pub clear_sale_override: bool,
}

impl From<PricingPatchRequest> for PricingPatch {
    fn from(req: PricingPatchRequest) -> Self {
        PricingPatch {
            pricing_mode: req.pricing_mode,
            buy_factor: req.buy_factor,
            sale_factor: req.sale_factor,
            purchase_price_override: req.purchase_price_override,
            sale_price_override: req.sale_price_override,
            clear_purchase_override: req.clear_purchase_override,
            clear_sale_override: req.clear_sale_override,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct VariantResponse {
    pub id: i32,
    pub metal_id: i32,
    pub name: String,
    pub sku: String,
    pub purity: Decimal,
    pub is_active: bool,
    pub is_favorite: bool,
    pub pricing_mode: PricingMode,
    pub buy_factor: Decimal,
    pub sale_factor: Decimal,
    pub purchase_price_override: Option<Decimal>,
    pub sale_price_override: Option<Decimal>,
}

impl From<variants::Model> for VariantResponse {
    fn from(v: variants::Model) -> Self {
        Self {
            id: v.id,
            metal_id: v.metal_id,
            name: v.name,
            sku: v.sku,
            purity: v.purity,
            is_active: v.is_active,
            is_favorite: v.is_favorite,
            pricing_mode: v.pricing_mode,
            buy_factor: v.buy_factor,
            sale_factor: v.sale_factor,
            purchase_price_override: v.purchase_price_override,
            sale_price_override: v.sale_price_override,
        }
    }
}

/// A variant with its derived prices, all in the base currency
#[derive(Debug, Serialize)]
pub struct PricedVariantResponse {
    #[serde(flatten)]
    pub variant: VariantResponse,
    pub suggested_price: Decimal,
    pub final_purchase_price: Decimal,
    pub final_sale_price: Decimal,
}

impl From<PricedVariant> for PricedVariantResponse {
    fn from(priced: PricedVariant) -> Self {
        Self {
            variant: priced.variant.into(),
            suggested_price: priced.prices.suggested,
            final_purchase_price: priced.prices.purchase,
            final_sale_price: priced.prices.sale,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PricedVariantsResponse {
    pub metal_id: i32,
    pub variants: Vec<PricedVariantResponse>,
}

#[derive(Debug, Serialize)]
pub struct ClearFavoriteResponse {
    pub cleared: u64,
}
