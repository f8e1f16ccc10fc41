//! Error taxonomy for the valuation engine.
//!
//! Every rejected operation maps to one of these kinds so callers can tell
//! "fix your input" apart from "this row is referenced elsewhere". Validation
//! happens before any mutation; a returned error means nothing was written.

use sea_orm::DbErr;

#[derive(Debug)]
pub enum ValuationError {
    /// Currency code already taken (checked case-insensitively, active or not)
    DuplicateCode(String),
    DuplicateName(String),
    DuplicateSymbol(String),
    DuplicateSku(String),
    /// Delete blocked by dependent quote/variant/history rows
    InUse(String),
    CannotDeactivateBase,
    /// The base currency never accepts manual rates
    BaseCurrencyImmutable,
    /// Rate or history rows may be backdated but never future-dated
    InvalidTimestamp(String),
    InvalidValue(String),
    NotFound(String),
    Database(DbErr),
}

impl ValuationError {
    /// Stable machine-readable code surfaced in error payloads
    pub fn code(&self) -> &'static str {
        match self {
            ValuationError::DuplicateCode(_) => "DUPLICATE_CODE",
            ValuationError::DuplicateName(_) => "DUPLICATE_NAME",
            ValuationError::DuplicateSymbol(_) => "DUPLICATE_SYMBOL",
            ValuationError::DuplicateSku(_) => "DUPLICATE_SKU",
            ValuationError::InUse(_) => "IN_USE",
            ValuationError::CannotDeactivateBase => "CANNOT_DEACTIVATE_BASE",
            ValuationError::BaseCurrencyImmutable => "BASE_CURRENCY_IMMUTABLE",
            ValuationError::InvalidTimestamp(_) => "INVALID_TIMESTAMP",
            ValuationError::InvalidValue(_) => "INVALID_VALUE",
            ValuationError::NotFound(_) => "NOT_FOUND",
            ValuationError::Database(_) => "DATABASE_ERROR",
        }
    }
}

impl std::fmt::Display for ValuationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValuationError::DuplicateCode(code) => {
                write!(f, "Currency code already exists: {}", code)
            }
            ValuationError::DuplicateName(name) => write!(f, "Name already exists: {}", name),
            ValuationError::DuplicateSymbol(symbol) => {
                write!(f, "Symbol already exists: {}", symbol)
            }
            ValuationError::DuplicateSku(sku) => write!(f, "SKU already exists: {}", sku),
            ValuationError::InUse(what) => write!(f, "Cannot delete, still referenced: {}", what),
            ValuationError::CannotDeactivateBase => {
                write!(f, "The base currency cannot be deactivated")
            }
            ValuationError::BaseCurrencyImmutable => {
                write!(f, "The base currency has an implicit rate of 1 and accepts no manual rates")
            }
            ValuationError::InvalidTimestamp(msg) => write!(f, "Invalid timestamp: {}", msg),
            ValuationError::InvalidValue(msg) => write!(f, "Invalid value: {}", msg),
            ValuationError::NotFound(what) => write!(f, "Not found: {}", what),
            ValuationError::Database(err) => write!(f, "Database error: {}", err),
        }
    }
}

impl std::error::Error for ValuationError {}

impl From<DbErr> for ValuationError {
    fn from(err: DbErr) -> Self {
        ValuationError::Database(err)
    }
}
