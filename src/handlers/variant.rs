//! Variant endpoints: CRUD, pricing patches, favorite selection

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::info;

use crate::AppState;
use crate::handlers::{ApiError, map_valuation_error};
use crate::models::currency::ToggleActiveRequest;
use crate::models::variant::{
    ClearFavoriteResponse, CreateVariantRequest, PricedVariantResponse, PricedVariantsResponse,
    PricingPatchRequest, UpdateVariantRequest, VariantResponse,
};
use crate::services::favorites;
use crate::services::variant_pricing::{self, CreateVariant, UpdateVariantPatch};

/// GET /api/metals/{id}/variants
///
/// Variants with prices derived against the metal's current reference value
pub async fn get_metal_variants(
    State(state): State<AppState>,
    Path(metal_id): Path<i32>,
) -> Result<Json<PricedVariantsResponse>, ApiError> {
    let priced = variant_pricing::list_for_metal(&state.db, metal_id)
        .await
        .map_err(map_valuation_error)?;

    Ok(Json(PricedVariantsResponse {
        metal_id,
        variants: priced.into_iter().map(PricedVariantResponse::from).collect(),
    }))
}

/// POST /api/metals/{id}/variants
pub async fn create_variant(
    State(state): State<AppState>,
    Path(metal_id): Path<i32>,
    Json(payload): Json<CreateVariantRequest>,
) -> Result<(StatusCode, Json<VariantResponse>), ApiError> {
    info!(metal_id = metal_id, sku = %payload.sku, "Creating variant");

    let variant = variant_pricing::create(
        &state.db,
        metal_id,
        CreateVariant {
            name: payload.name,
            sku: payload.sku,
            purity: payload.purity,
            buy_factor: payload.buy_factor,
            sale_factor: payload.sale_factor,
        },
    )
    .await
    .map_err(map_valuation_error)?;

    Ok((StatusCode::CREATED, Json(variant.into())))
}

/// PATCH /api/variants/{id}
pub async fn update_variant(
    State(state): State<AppState>,
    Path(variant_id): Path<i32>,
    Json(payload): Json<UpdateVariantRequest>,
) -> Result<Json<VariantResponse>, ApiError> {
    let variant = variant_pricing::update(
        &state.db,
        variant_id,
        UpdateVariantPatch {
            name: payload.name,
            sku: payload.sku,
            purity: payload.purity,
        },
    )
    .await
    .map_err(map_valuation_error)?;

    Ok(Json(variant.into()))
}

/// PATCH /api/variants/{id}/pricing
pub async fn update_variant_pricing(
    State(state): State<AppState>,
    Path(variant_id): Path<i32>,
    Json(payload): Json<PricingPatchRequest>,
) -> Result<Json<VariantResponse>, ApiError> {
    let variant = variant_pricing::update_pricing(&state.db, variant_id, payload.into())
        .await
        .map_err(map_valuation_error)?;

    Ok(Json(variant.into()))
}

/// PATCH /api/variants/{id}/active
pub async fn toggle_variant_active(
    State(state): State<AppState>,
    Path(variant_id): Path<i32>,
    Json(payload): Json<ToggleActiveRequest>,
) -> Result<Json<VariantResponse>, ApiError> {
    let variant = variant_pricing::toggle_active(&state.db, variant_id, payload.is_active)
        .await
        .map_err(map_valuation_error)?;
    Ok(Json(variant.into()))
}

/// DELETE /api/variants/{id}
pub async fn delete_variant(
    State(state): State<AppState>,
    Path(variant_id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    variant_pricing::delete(&state.db, variant_id)
        .await
        .map_err(map_valuation_error)?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/variants/{id}/favorite
pub async fn set_favorite_variant(
    State(state): State<AppState>,
    Path(variant_id): Path<i32>,
) -> Result<Json<VariantResponse>, ApiError> {
    info!(variant_id = variant_id, "Setting favorite variant");

    let variant = favorites::set_favorite(&state.db, variant_id)
        .await
        .map_err(map_valuation_error)?;

    Ok(Json(variant.into()))
}

/// DELETE /api/metals/{id}/favorite
pub async fn clear_favorite_variant(
    State(state): State<AppState>,
    Path(metal_id): Path<i32>,
) -> Result<Json<ClearFavoriteResponse>, ApiError> {
    let cleared = favorites::clear_favorite(&state.db, metal_id)
        .await
        .map_err(map_valuation_error)?;

    Ok(Json(ClearFavoriteResponse { cleared }))
}
