//! Metal request/response models

use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::entities::{metal_reference_history, metals};
use crate::services::metal_registry::MoveDirection;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateMetalRequest {
    pub name: String,
    pub symbol: Option<String>,
    pub reference_value: Option<Decimal>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateMetalRequest {
    pub name: Option<String>,
    /// An empty string clears the symbol
    pub symbol: Option<String>,
    pub reference_value: Option<Decimal>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MoveDirectionParam {
    Up,
    Down,
}

impl From<MoveDirectionParam> for MoveDirection {
    fn from(dir: MoveDirectionParam) -> Self {
        match dir {
            MoveDirectionParam::Up => MoveDirection::Up,
            MoveDirectionParam::Down => MoveDirection::Down,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MoveMetalRequest {
    pub direction: MoveDirectionParam,
}

#[derive(Debug, Serialize)]
pub struct MoveMetalResponse {
    pub changed: bool,
}

#[derive(Debug, Serialize)]
pub struct MetalResponse {
    pub id: i32,
    pub name: String,
    pub symbol: Option<String>,
    pub reference_value: Decimal,
    pub is_active: bool,
    pub sort_order: i32,
}

impl From<metals::Model> for MetalResponse {
    fn from(metal: metals::Model) -> Self {
        Self {
            id: metal.id,
            name: metal.name,
            symbol: metal.symbol,
            reference_value: metal.reference_value,
            is_active: metal.is_active,
            sort_order: metal.sort_order,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MetalsListResponse {
    pub metals: Vec<MetalResponse>,
}

#[derive(Debug, Serialize)]
pub struct RefHistoryEntry {
    pub id: i64,
    pub reference_value: Decimal,
    pub effective_at: DateTime<FixedOffset>,
    pub created_at: Option<DateTime<FixedOffset>>,
    pub created_by: Option<String>,
}

impl From<metal_reference_history::Model> for RefHistoryEntry {
    fn from(row: metal_reference_history::Model) -> Self {
        Self {
            id: row.id,
            reference_value: row.reference_value,
            effective_at: row.effective_at,
            created_at: row.created_at,
            created_by: row.created_by,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RefHistoryResponse {
    pub metal_id: i32,
    pub current: Decimal,
    pub history: Vec<RefHistoryEntry>,
}
