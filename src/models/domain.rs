use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Who a program is for, as declared (or guessed) at ingestion time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceType {
    Business,
    Personal,
    Both,
    Unknown,
}

impl Default for ServiceType {
    fn default() -> Self {
        ServiceType::Unknown
    }
}

/// Geographic applicability of a program.
///
/// `Regional` means extraction confirmed specific provinces, `National` means
/// the text or the issuing organization confirmed nationwide applicability,
/// `Unknown` means extraction found nothing either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionScope {
    National,
    Regional,
    Unknown,
}

impl Default for RegionScope {
    fn default() -> Self {
        RegionScope::Unknown
    }
}

/// Recommendation tier a scored program falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Tailored,
    Recommended,
    Exploratory,
}

/// Raw text fields supplied by the ingestion collaborators.
///
/// All fields are optional; a record with no text at all is valid and yields
/// a minimally-confident extraction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProgramText {
    pub title: Option<String>,
    pub organization: Option<String>,
    pub eligibility_text: Option<String>,
    pub exclusion_text: Option<String>,
    pub preference_text: Option<String>,
}

impl RawProgramText {
    /// Body text sources in extraction order (eligibility, exclusion, preference).
    pub fn body_texts(&self) -> Vec<&str> {
        [
            self.eligibility_text.as_deref(),
            self.exclusion_text.as_deref(),
            self.preference_text.as_deref(),
        ]
        .into_iter()
        .flatten()
        .filter(|t| !t.trim().is_empty())
        .collect()
    }
}

/// Per-dimension extraction confidence.
///
/// Deliberately a fixed high/low signal per dimension rather than a continuous
/// measure of pattern-match quality; absence of a match still yields a low
/// fixed value, never a missing entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtractionConfidence {
    pub regions: f64,
    pub business_types: f64,
    pub employee: f64,
    pub revenue: f64,
    pub business_age: f64,
    pub founder_age: f64,
    pub age: f64,
    pub household_types: f64,
    pub income_levels: f64,
    pub employment_statuses: f64,
    pub benefit_categories: f64,
}

/// Structured eligibility criteria extracted from one program's raw text.
///
/// Recomputed wholesale on any re-extraction; never mutated incrementally.
/// Invariants after validation: every min/max pair satisfies min <= max, and
/// `sub_regions` only contains districts whose parent province is in `regions`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtractionResult {
    pub regions: BTreeSet<String>,
    pub sub_regions: BTreeSet<String>,
    pub business_types: BTreeSet<String>,
    pub employee_min: Option<u32>,
    pub employee_max: Option<u32>,
    pub revenue_min: Option<i64>,
    pub revenue_max: Option<i64>,
    pub business_age_min_months: Option<i32>,
    pub business_age_max_months: Option<i32>,
    pub founder_age_min: Option<u32>,
    pub founder_age_max: Option<u32>,
    pub age_min: Option<u32>,
    pub age_max: Option<u32>,
    pub household_types: BTreeSet<String>,
    pub income_levels: BTreeSet<String>,
    pub employment_statuses: BTreeSet<String>,
    pub benefit_categories: BTreeSet<String>,
    pub confidence: ExtractionConfidence,
    pub region_scope: RegionScope,
}

/// A government support program as read from storage.
///
/// The matching engine only reads these; ownership of the record and its
/// lifecycle belongs to the ingestion/persistence collaborators.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    pub id: String,
    pub title: String,
    pub organization: String,
    pub category: String,
    #[serde(default)]
    pub service_type: ServiceType,
    #[serde(default)]
    pub start_date: Option<chrono::NaiveDate>,
    #[serde(default)]
    pub end_date: Option<chrono::NaiveDate>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub detail_url: Option<String>,
    pub extraction: ExtractionResult,
}

fn default_true() -> bool {
    true
}

/// Business-track user input.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessProfile {
    pub business_type: String,
    pub region: String,
    #[serde(default)]
    pub sub_region: Option<String>,
    pub employee_count: u32,
    pub annual_revenue: i64,
    /// Months since founding; -1 means "not yet founded" (prospective founder).
    pub business_age_months: i32,
    pub founder_age: u32,
}

/// Personal-track user input.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalProfile {
    pub age_group: String,
    pub region: String,
    #[serde(default)]
    pub sub_region: Option<String>,
    pub household_type: String,
    pub income_level: String,
    pub employment_status: String,
    #[serde(default)]
    pub interest_categories: Vec<String>,
}

/// User profile, one per request. Closed sum over the two tracks so every
/// scorer and filter that depends on track must match exhaustively.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "userType", rename_all = "lowercase")]
pub enum UserProfile {
    Business(BusinessProfile),
    Personal(PersonalProfile),
}

impl UserProfile {
    pub fn region(&self) -> &str {
        match self {
            UserProfile::Business(p) => &p.region,
            UserProfile::Personal(p) => &p.region,
        }
    }

    pub fn sub_region(&self) -> Option<&str> {
        match self {
            UserProfile::Business(p) => p.sub_region.as_deref(),
            UserProfile::Personal(p) => p.sub_region.as_deref(),
        }
    }
}

/// One program scored against one profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredProgram {
    pub program: Program,
    pub score: f64,
    pub tier: Tier,
    /// Raw per-dimension scores (0 for dimensions without data), for UI explainability.
    pub breakdown: BTreeMap<String, f64>,
    /// Weight-averaged confidence over active dimensions.
    pub confidence: f64,
    /// Weighted mean of active dimension scores before the coverage factor.
    pub weighted: f64,
    /// Coverage factor applied to the weighted mean.
    pub coverage: f64,
}

/// Full matching output for one profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub tailored: Vec<ScoredProgram>,
    pub recommended: Vec<ScoredProgram>,
    pub exploratory: Vec<ScoredProgram>,
    /// Tiers merged in order, bounded by the total cap.
    pub all: Vec<ScoredProgram>,
    pub total_analyzed: usize,
    pub knocked_out: usize,
    pub filtered_by_service_type: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_profile_tagged_roundtrip() {
        let profile = UserProfile::Business(BusinessProfile {
            business_type: "정보통신업".to_string(),
            region: "서울".to_string(),
            sub_region: Some("강남구".to_string()),
            employee_count: 5,
            annual_revenue: 300_000_000,
            business_age_months: 24,
            founder_age: 34,
        });

        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["userType"], "business");
        assert_eq!(json["region"], "서울");

        let back: UserProfile = serde_json::from_value(json).unwrap();
        assert!(matches!(back, UserProfile::Business(_)));
    }

    #[test]
    fn test_prospective_founder_sentinel_survives_serde() {
        let json = serde_json::json!({
            "userType": "business",
            "businessType": "제조업",
            "region": "경기",
            "employeeCount": 0,
            "annualRevenue": 0,
            "businessAgeMonths": -1,
            "founderAge": 29,
        });
        let profile: UserProfile = serde_json::from_value(json).unwrap();
        match profile {
            UserProfile::Business(p) => assert_eq!(p.business_age_months, -1),
            _ => panic!("expected business track"),
        }
    }

    #[test]
    fn test_raw_text_body_sources_skip_empty() {
        let raw = RawProgramText {
            title: Some("청년 창업 지원".to_string()),
            organization: None,
            eligibility_text: Some("만 39세 이하".to_string()),
            exclusion_text: Some("  ".to_string()),
            preference_text: None,
        };
        assert_eq!(raw.body_texts(), vec!["만 39세 이하"]);
    }
}
