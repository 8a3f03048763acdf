//! jiwon-algo - Eligibility extraction and matching engine for Korean
//! government support programs.
//!
//! Extraction turns free-form program notices into structured criteria;
//! the matching engine scores a program corpus against a user profile
//! through a knockout + coverage-weighted scoring pipeline and returns
//! tiered recommendations.

pub mod config;
pub mod core;
pub mod extraction;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{MatchPolicy, Matcher};
pub use extraction::{extract, extract_program};
pub use models::{
    ExtractionResult, MatchResult, Program, RawProgramText, ScoredProgram, UserProfile,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let result = extract(&["전국 소상공인 대상"], None, None);
        assert_eq!(result.region_scope, models::RegionScope::National);
    }
}
