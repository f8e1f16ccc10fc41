//! Quote endpoints: manual currency-specific price entry and history

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
};
use tracing::{info, warn};

use crate::AppState;
use crate::handlers::{ApiError, actor_from_headers, map_valuation_error};
use crate::models::quote::{
    AddQuoteRequest, AddQuoteResponse, QuoteHistoryQuery, QuoteHistoryResponse, QuoteResponse,
};
use crate::services::quote_book;

/// POST /api/variants/{id}/quotes
pub async fn add_quote(
    State(state): State<AppState>,
    Path(variant_id): Path<i32>,
    headers: HeaderMap,
    Json(payload): Json<AddQuoteRequest>,
) -> Result<(StatusCode, Json<AddQuoteResponse>), ApiError> {
    info!(
        variant_id = variant_id,
        currency_id = payload.currency_id,
        "Recording quote"
    );

    let outcome = quote_book::add_quote(
        &state.db,
        variant_id,
        payload.currency_id,
        payload.purchase_price,
        payload.sale_price,
        payload.effective_at,
        actor_from_headers(&headers),
    )
    .await
    .map_err(map_valuation_error)?;

    if let Some(warning) = &outcome.warning {
        warn!(variant_id = variant_id, warning = %warning, "Quote entered with crossed prices");
    }

    Ok((
        StatusCode::CREATED,
        Json(AddQuoteResponse {
            quote: outcome.quote.into(),
            warning: outcome.warning,
        }),
    ))
}

/// GET /api/variants/{id}/quotes?currency_id=&take=
pub async fn get_quote_history(
    State(state): State<AppState>,
    Path(variant_id): Path<i32>,
    Query(query): Query<QuoteHistoryQuery>,
) -> Result<Json<QuoteHistoryResponse>, ApiError> {
    let quotes = quote_book::quote_history(&state.db, variant_id, query.currency_id, query.take)
        .await
        .map_err(map_valuation_error)?;

    Ok(Json(QuoteHistoryResponse {
        variant_id,
        quotes: quotes.into_iter().map(QuoteResponse::from).collect(),
    }))
}
