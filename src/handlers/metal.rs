//! Metal endpoints: CRUD, display-order moves, reference-value history

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
};
use tracing::info;

use crate::AppState;
use crate::handlers::{ApiError, actor_from_headers, map_valuation_error};
use crate::models::common::HistoryQuery;
use crate::models::currency::ToggleActiveRequest;
use crate::models::metal::{
    CreateMetalRequest, MetalResponse, MetalsListResponse, MoveMetalRequest, MoveMetalResponse,
    RefHistoryEntry, RefHistoryResponse, UpdateMetalRequest,
};
use crate::services::metal_registry::{self, UpdateMetalPatch};

/// GET /api/metals
pub async fn list_metals(
    State(state): State<AppState>,
) -> Result<Json<MetalsListResponse>, ApiError> {
    let metals = metal_registry::list(&state.db)
        .await
        .map_err(map_valuation_error)?;

    Ok(Json(MetalsListResponse {
        metals: metals.into_iter().map(MetalResponse::from).collect(),
    }))
}

/// POST /api/metals
pub async fn create_metal(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateMetalRequest>,
) -> Result<(StatusCode, Json<MetalResponse>), ApiError> {
    info!(name = %payload.name, "Creating metal");

    let metal = metal_registry::create(
        &state.db,
        &payload.name,
        payload.symbol,
        payload.reference_value,
        actor_from_headers(&headers),
    )
    .await
    .map_err(map_valuation_error)?;

    Ok((StatusCode::CREATED, Json(metal.into())))
}

/// PATCH /api/metals/{id}
pub async fn update_metal(
    State(state): State<AppState>,
    Path(metal_id): Path<i32>,
    headers: HeaderMap,
    Json(payload): Json<UpdateMetalRequest>,
) -> Result<Json<MetalResponse>, ApiError> {
    let metal = metal_registry::update(
        &state.db,
        metal_id,
        UpdateMetalPatch {
            name: payload.name,
            symbol: payload.symbol,
            reference_value: payload.reference_value,
        },
        actor_from_headers(&headers),
    )
    .await
    .map_err(map_valuation_error)?;

    Ok(Json(metal.into()))
}

/// POST /api/metals/{id}/move
pub async fn move_metal(
    State(state): State<AppState>,
    Path(metal_id): Path<i32>,
    Json(payload): Json<MoveMetalRequest>,
) -> Result<Json<MoveMetalResponse>, ApiError> {
    let changed = metal_registry::move_metal(&state.db, metal_id, payload.direction.into())
        .await
        .map_err(map_valuation_error)?;

    Ok(Json(MoveMetalResponse { changed }))
}

/// PATCH /api/metals/{id}/active
pub async fn toggle_metal_active(
    State(state): State<AppState>,
    Path(metal_id): Path<i32>,
    Json(payload): Json<ToggleActiveRequest>,
) -> Result<Json<MetalResponse>, ApiError> {
    let metal = metal_registry::toggle_active(&state.db, metal_id, payload.is_active)
        .await
        .map_err(map_valuation_error)?;
    Ok(Json(metal.into()))
}

/// DELETE /api/metals/{id}
pub async fn delete_metal(
    State(state): State<AppState>,
    Path(metal_id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    metal_registry::delete(&state.db, metal_id)
        .await
        .map_err(map_valuation_error)?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/metals/{id}/reference-history?take=
pub async fn get_metal_reference_history(
    State(state): State<AppState>,
    Path(metal_id): Path<i32>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<RefHistoryResponse>, ApiError> {
    let ref_history = metal_registry::ref_history(&state.db, metal_id, query.take)
        .await
        .map_err(map_valuation_error)?;

    Ok(Json(RefHistoryResponse {
        metal_id,
        current: ref_history.current,
        history: ref_history
            .history
            .into_iter()
            .map(RefHistoryEntry::from)
            .collect(),
    }))
}
