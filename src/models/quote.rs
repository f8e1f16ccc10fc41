//! Quote request/response models

use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::entities::quotes;

#[derive(Debug, Clone, Deserialize)]
pub struct AddQuoteRequest {
    pub currency_id: i32,
    pub purchase_price: Decimal,
    pub sale_price: Decimal,
    pub effective_at: Option<DateTime<FixedOffset>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuoteHistoryQuery {
    pub currency_id: Option<i32>,
    pub take: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub id: i64,
    pub variant_id: i32,
    pub currency_id: i32,
    pub purchase_price: Decimal,
    pub sale_price: Decimal,
    pub effective_at: DateTime<FixedOffset>,
    pub created_by: Option<String>,
}

impl From<quotes::Model> for QuoteResponse {
    fn from(q: quotes::Model) -> Self {
        Self {
            id: q.id,
            variant_id: q.variant_id,
            currency_id: q.currency_id,
            purchase_price: q.purchase_price,
            sale_price: q.sale_price,
            effective_at: q.effective_at,
            created_by: q.created_by,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AddQuoteResponse {
    pub quote: QuoteResponse,
    /// Soft validation only: present when the sale price is below the
    /// purchase price
    pub warning: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct QuoteHistoryResponse {
    pub variant_id: i32,
    pub quotes: Vec<QuoteResponse>,
}
