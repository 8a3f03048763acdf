use serde::{Deserialize, Serialize};

use crate::models::domain::{ExtractionResult, MatchResult};

/// Response for the diagnose endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnoseResponse {
    #[serde(flatten)]
    pub result: MatchResult,
    pub elapsed_ms: u64,
}

/// Response for the extract endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractResponse {
    pub program_id: String,
    pub extraction: ExtractionResult,
    pub saved: bool,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
