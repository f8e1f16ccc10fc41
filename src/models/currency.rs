//! Currency request/response models

use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::entities::{currencies, currency_rates};
use crate::services::currency_registry::{BaseSwitchOutcome, CurrencyWithRate};

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCurrencyRequest {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub symbol: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ToggleActiveRequest {
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SetBaseRequest {
    pub effective_at: Option<DateTime<FixedOffset>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddRateRequest {
    pub rate: Decimal,
    pub effective_at: Option<DateTime<FixedOffset>>,
}

#[derive(Debug, Serialize)]
pub struct CurrencyResponse {
    pub id: i32,
    pub code: String,
    pub name: String,
    pub symbol: String,
    pub is_base: bool,
    pub is_active: bool,
    /// Implicit 1 for the base currency; absent when no rate is recorded
    pub current_rate: Option<Decimal>,
}

impl CurrencyResponse {
    pub fn from_model(currency: currencies::Model, current_rate: Option<Decimal>) -> Self {
        Self {
            id: currency.id,
            code: currency.code,
            name: currency.name,
            symbol: currency.symbol,
            is_base: currency.is_base,
            is_active: currency.is_active,
            current_rate,
        }
    }
}

impl From<CurrencyWithRate> for CurrencyResponse {
    fn from(row: CurrencyWithRate) -> Self {
        Self::from_model(row.currency, row.current_rate)
    }
}

#[derive(Debug, Serialize)]
pub struct CurrenciesListResponse {
    pub currencies: Vec<CurrencyResponse>,
}

#[derive(Debug, Serialize)]
pub struct RateResponse {
    pub id: i64,
    pub rate: Decimal,
    pub effective_at: DateTime<FixedOffset>,
    pub created_at: Option<DateTime<FixedOffset>>,
    pub created_by: Option<String>,
}

impl From<currency_rates::Model> for RateResponse {
    fn from(rate: currency_rates::Model) -> Self {
        Self {
            id: rate.id,
            rate: rate.rate,
            effective_at: rate.effective_at,
            created_at: rate.created_at,
            created_by: rate.created_by,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RateHistoryResponse {
    pub currency_id: i32,
    pub rates: Vec<RateResponse>,
}

#[derive(Debug, Serialize)]
pub struct BaseSwitchResponse {
    pub changed: bool,
    pub previous_base_id: Option<i32>,
    pub rate_applied: Option<Decimal>,
    pub metals_recomputed: usize,
    pub effective_at: Option<DateTime<FixedOffset>>,
}

impl From<BaseSwitchOutcome> for BaseSwitchResponse {
    fn from(outcome: BaseSwitchOutcome) -> Self {
        Self {
            changed: outcome.changed,
            previous_base_id: outcome.previous_base_id,
            rate_applied: outcome.rate_applied,
            metals_recomputed: outcome.metals_recomputed,
            effective_at: outcome.effective_at,
        }
    }
}
