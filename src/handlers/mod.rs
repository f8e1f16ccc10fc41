pub mod currency;
pub mod metal;
pub mod quote;
pub mod variant;

use axum::Json;
use axum::http::{HeaderMap, StatusCode};
use tracing::error;

use crate::models::common::ErrorResponse;
use crate::services::error::ValuationError;

pub type ApiError = (StatusCode, Json<ErrorResponse>);

/// Map a service error to an HTTP response. Conflicts (duplicates, in-use,
/// protected base) get 409 so callers can tell them from bad input.
pub fn map_valuation_error(err: ValuationError) -> ApiError {
    let status = match &err {
        ValuationError::DuplicateCode(_)
        | ValuationError::DuplicateName(_)
        | ValuationError::DuplicateSymbol(_)
        | ValuationError::DuplicateSku(_)
        | ValuationError::InUse(_)
        | ValuationError::CannotDeactivateBase
        | ValuationError::BaseCurrencyImmutable => StatusCode::CONFLICT,
        ValuationError::InvalidTimestamp(_) | ValuationError::InvalidValue(_) => {
            StatusCode::BAD_REQUEST
        }
        ValuationError::NotFound(_) => StatusCode::NOT_FOUND,
        ValuationError::Database(e) => {
            error!(error = %e, "Database error");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
            code: Some(err.code().to_string()),
        }),
    )
}

/// `created_by` attribution from the `x-actor` header, filled in by the
/// auth layer in front of this service
pub fn actor_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-actor")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
