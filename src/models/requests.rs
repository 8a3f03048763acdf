use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{RawProgramText, UserProfile};

/// Request to match the active program corpus against one profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnoseRequest {
    #[serde(flatten)]
    pub profile: UserProfile,
}

/// Request to run extraction over one raw text record.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ExtractRequest {
    #[validate(length(min = 1))]
    pub program_id: String,
    #[serde(flatten)]
    pub raw: RawProgramText,
    /// Persist the result to the program record; off by default so callers
    /// can preview extraction output.
    #[serde(default)]
    pub save: bool,
}
