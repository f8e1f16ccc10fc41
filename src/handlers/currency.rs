//! Currency endpoints: CRUD, base switch, manual rates, rate history

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
};
use tracing::{info, warn};

use crate::AppState;
use crate::handlers::{ApiError, actor_from_headers, map_valuation_error};
use crate::models::common::HistoryQuery;
use crate::models::currency::{
    AddRateRequest, BaseSwitchResponse, CreateCurrencyRequest, CurrenciesListResponse,
    CurrencyResponse, RateHistoryResponse, RateResponse, SetBaseRequest, ToggleActiveRequest,
};
use crate::services::currency_registry;

/// GET /api/currencies
pub async fn list_currencies(
    State(state): State<AppState>,
) -> Result<Json<CurrenciesListResponse>, ApiError> {
    let currencies = currency_registry::list(&state.db)
        .await
        .map_err(map_valuation_error)?;

    Ok(Json(CurrenciesListResponse {
        currencies: currencies.into_iter().map(CurrencyResponse::from).collect(),
    }))
}

/// POST /api/currencies
pub async fn create_currency(
    State(state): State<AppState>,
    Json(payload): Json<CreateCurrencyRequest>,
) -> Result<(StatusCode, Json<CurrencyResponse>), ApiError> {
    info!(code = %payload.code, "Creating currency");

    let currency =
        currency_registry::create(&state.db, &payload.code, &payload.name, &payload.symbol)
            .await
            .map_err(map_valuation_error)?;

    let current_rate = currency
        .is_base
        .then_some(rust_decimal::Decimal::ONE);
    Ok((
        StatusCode::CREATED,
        Json(CurrencyResponse::from_model(currency, current_rate)),
    ))
}

/// POST /api/currencies/{id}/base
///
/// The one multi-row operation: flips the base flag and recomputes every
/// metal's reference value in a single transaction.
pub async fn set_base_currency(
    State(state): State<AppState>,
    Path(currency_id): Path<i32>,
    headers: HeaderMap,
    payload: Option<Json<SetBaseRequest>>,
) -> Result<Json<BaseSwitchResponse>, ApiError> {
    let correlation_id = uuid::Uuid::new_v4().to_string();
    let effective_at = payload.and_then(|Json(p)| p.effective_at);
    info!(
        correlation_id = %correlation_id,
        currency_id = currency_id,
        "Base currency switch requested"
    );

    let outcome = currency_registry::set_base(
        &state.db,
        currency_id,
        effective_at,
        actor_from_headers(&headers),
    )
    .await
    .map_err(|e| {
        warn!(correlation_id = %correlation_id, error = %e, "Base currency switch rejected");
        map_valuation_error(e)
    })?;

    info!(
        correlation_id = %correlation_id,
        changed = outcome.changed,
        metals_recomputed = outcome.metals_recomputed,
        "Base currency switch completed"
    );
    Ok(Json(outcome.into()))
}

/// PATCH /api/currencies/{id}/active
pub async fn toggle_currency_active(
    State(state): State<AppState>,
    Path(currency_id): Path<i32>,
    Json(payload): Json<ToggleActiveRequest>,
) -> Result<Json<CurrencyResponse>, ApiError> {
    let currency = currency_registry::toggle_active(&state.db, currency_id, payload.is_active)
        .await
        .map_err(map_valuation_error)?;
    Ok(Json(CurrencyResponse::from_model(currency, None)))
}

/// DELETE /api/currencies/{id}
pub async fn delete_currency(
    State(state): State<AppState>,
    Path(currency_id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    currency_registry::delete(&state.db, currency_id)
        .await
        .map_err(map_valuation_error)?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/currencies/{id}/rates
pub async fn add_currency_rate(
    State(state): State<AppState>,
    Path(currency_id): Path<i32>,
    headers: HeaderMap,
    Json(payload): Json<AddRateRequest>,
) -> Result<(StatusCode, Json<RateResponse>), ApiError> {
    info!(currency_id = currency_id, rate = %payload.rate, "Recording exchange rate");

    let rate = currency_registry::add_rate(
        &state.db,
        currency_id,
        payload.rate,
        payload.effective_at,
        actor_from_headers(&headers),
    )
    .await
    .map_err(map_valuation_error)?;

    Ok((StatusCode::CREATED, Json(rate.into())))
}

/// GET /api/currencies/{id}/rates?take=
pub async fn get_currency_rates(
    State(state): State<AppState>,
    Path(currency_id): Path<i32>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<RateHistoryResponse>, ApiError> {
    let rates = currency_registry::rate_history(&state.db, currency_id, query.take)
        .await
        .map_err(map_valuation_error)?;

    Ok(Json(RateHistoryResponse {
        currency_id,
        rates: rates.into_iter().map(RateResponse::from).collect(),
    }))
}
