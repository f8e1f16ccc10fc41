use serde::{Deserialize, Serialize};

/// Error payload returned by every endpoint on rejection
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: Option<String>,
}

/// Shared `?take=` pagination parameter for history endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryQuery {
    pub take: Option<u64>,
}
