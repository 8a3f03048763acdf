// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    BusinessProfile, ExtractionConfidence, ExtractionResult, MatchResult, PersonalProfile,
    Program, RawProgramText, RegionScope, ScoredProgram, ServiceType, Tier, UserProfile,
};
pub use requests::{DiagnoseRequest, ExtractRequest};
pub use responses::{DiagnoseResponse, ErrorResponse, ExtractResponse, HealthResponse};
