//! Main matching orchestrator.
//!
//! # Pipeline Stages
//! 1. Service-type filter (unknown-audience programs always pass)
//! 2. Knockout filter (hard rejection on unambiguous mismatches)
//! 3. Coverage-weighted scoring with confidence blending
//! 4. Tier classification with demotion rules
//! 5. Organization diversity and tier/total caps

use std::collections::{BTreeMap, HashMap};

use serde::Deserialize;

use crate::core::dimensions::{
    business_dimensions, is_knocked_out_business, is_knocked_out_personal, personal_dimensions,
    DimensionInfo,
};
use crate::models::{
    MatchResult, Program, RegionScope, ScoredProgram, ServiceType, Tier, UserProfile,
};

/// Tunable tier thresholds, caps and bonuses. Defaults are the production
/// values; overridable through configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MatchPolicy {
    pub tailored_threshold: f64,
    pub recommended_threshold: f64,
    pub exploratory_threshold: f64,
    pub tailored_cap: usize,
    pub recommended_cap: usize,
    pub exploratory_cap: usize,
    pub total_cap: usize,
    pub max_per_org: usize,
    /// Tailored placements without a strong specific-dimension score must
    /// clear this stricter bar or drop a tier.
    pub tailored_strict_bar: f64,
    pub sub_region_bonus: f64,
    pub interest_bonus: f64,
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self {
            tailored_threshold: 0.45,
            recommended_threshold: 0.30,
            exploratory_threshold: 0.18,
            tailored_cap: 20,
            recommended_cap: 25,
            exploratory_cap: 25,
            total_cap: 70,
            max_per_org: 3,
            tailored_strict_bar: 0.60,
            sub_region_bonus: 0.15,
            interest_bonus: 0.08,
        }
    }
}

/// A specific dimension scoring at least this marks a genuine targeted match.
const SPECIFIC_MATCH_SCORE: f64 = 0.8;

/// Low-confidence dimensions are blended toward this neutral prior.
const NEUTRAL_PRIOR: f64 = 0.5;
const BLEND_CONF: f64 = 0.6;

/// Coverage factor floor; sparse evidence caps the ceiling but never zeroes
/// the score outright.
const COVERAGE_FLOOR: f64 = 0.2;

struct PipelineScore {
    final_score: f64,
    match_score: f64,
    coverage_factor: f64,
    has_specific_match: bool,
}

/// Stateless matching engine; scoring one corpus never affects the next call.
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    policy: MatchPolicy,
}

impl Matcher {
    pub fn new(policy: MatchPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &MatchPolicy {
        &self.policy
    }

    /// Score a corpus snapshot against one profile.
    ///
    /// Deterministic for a fixed (corpus, profile) pair: the sort is stable
    /// and ties keep evaluation order.
    pub fn match_programs(&self, programs: &[Program], profile: &UserProfile) -> MatchResult {
        let mut scored: Vec<ScoredProgram> = Vec::new();
        let mut knocked_out = 0;
        let mut filtered_by_service_type = 0;

        for program in programs {
            if !service_type_matches(program.service_type, profile) {
                filtered_by_service_type += 1;
                continue;
            }
            let sub_region_match = profile
                .sub_region()
                .is_some_and(|sub| program.extraction.sub_regions.contains(sub));

            let (dims, interest_bonus) = match profile {
                UserProfile::Business(p) => {
                    if is_knocked_out_business(&program.extraction, p) {
                        knocked_out += 1;
                        continue;
                    }
                    (business_dimensions(&program.extraction, p), false)
                }
                UserProfile::Personal(p) => {
                    if is_knocked_out_personal(&program.extraction, p) {
                        knocked_out += 1;
                        continue;
                    }
                    let bonus = !p.interest_categories.is_empty()
                        && program
                            .extraction
                            .benefit_categories
                            .iter()
                            .any(|c| p.interest_categories.iter().any(|i| i == c));
                    (personal_dimensions(&program.extraction, p), bonus)
                }
            };

            if let Some(entry) = self.score_program(program, &dims, interest_bonus, sub_region_match)
            {
                scored.push(entry);
            }
        }

        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));

        let tailored_all = self.enforce_org_diversity(
            scored.iter().filter(|s| s.tier == Tier::Tailored).cloned().collect(),
        );
        let recommended_all = self.enforce_org_diversity(
            scored.iter().filter(|s| s.tier == Tier::Recommended).cloned().collect(),
        );
        let exploratory_all = self.enforce_org_diversity(
            scored.iter().filter(|s| s.tier == Tier::Exploratory).cloned().collect(),
        );

        let mut tailored = tailored_all;
        tailored.truncate(self.policy.tailored_cap);
        // A nearly empty tailored tier donates its headroom to recommended.
        let rec_cap = if tailored.len() < 3 {
            self.policy.recommended_cap + (self.policy.tailored_cap - tailored.len())
        } else {
            self.policy.recommended_cap
        };
        let mut recommended = recommended_all;
        recommended.truncate(rec_cap);
        let mut exploratory = exploratory_all;
        exploratory.truncate(self.policy.exploratory_cap);

        let all: Vec<ScoredProgram> = tailored
            .iter()
            .chain(recommended.iter())
            .chain(exploratory.iter())
            .take(self.policy.total_cap)
            .cloned()
            .collect();

        MatchResult {
            tailored,
            recommended,
            exploratory,
            all,
            total_analyzed: programs.len(),
            knocked_out,
            filtered_by_service_type,
        }
    }

    fn score_program(
        &self,
        program: &Program,
        dims: &[DimensionInfo],
        interest_bonus: bool,
        sub_region_match: bool,
    ) -> Option<ScoredProgram> {
        let mut result = score_pipeline(dims)?;
        if interest_bonus {
            result.final_score = (result.final_score + self.policy.interest_bonus).min(1.0);
        }
        // District-exact match offsets the coverage penalty so hyper-local
        // programs stay visible.
        if sub_region_match {
            result.final_score = (result.final_score + self.policy.sub_region_bonus).min(1.0);
        }

        let mut tier = self.tier_for(result.final_score)?;
        if !result.has_specific_match
            && tier == Tier::Tailored
            && result.final_score < self.policy.tailored_strict_bar
        {
            tier = Tier::Recommended;
        }
        // Tailored means the region is confirmed; unknown scope tops out at
        // recommended.
        if program.extraction.region_scope == RegionScope::Unknown && tier == Tier::Tailored {
            tier = Tier::Recommended;
        }

        let mut breakdown = BTreeMap::new();
        for d in dims {
            breakdown.insert(
                d.key.to_string(),
                if d.has_data { round3(d.raw_score) } else { 0.0 },
            );
        }
        let active: Vec<&DimensionInfo> = dims.iter().filter(|d| d.has_data).collect();
        let total_weight: f64 = active.iter().map(|d| d.weight).sum();
        let confidence = if active.is_empty() {
            0.0
        } else {
            active.iter().map(|d| d.confidence * d.weight).sum::<f64>() / total_weight.max(f64::MIN_POSITIVE)
        };

        Some(ScoredProgram {
            program: program.clone(),
            score: round3(result.final_score),
            tier,
            breakdown,
            confidence: round3(confidence),
            weighted: round3(result.match_score),
            coverage: round3(result.coverage_factor),
        })
    }

    fn tier_for(&self, score: f64) -> Option<Tier> {
        if score >= self.policy.tailored_threshold {
            Some(Tier::Tailored)
        } else if score >= self.policy.recommended_threshold {
            Some(Tier::Recommended)
        } else if score >= self.policy.exploratory_threshold {
            Some(Tier::Exploratory)
        } else {
            None
        }
    }

    /// Keep at most `max_per_org` programs per organization, scanning in
    /// score order; excess entries are skipped, not reinserted later.
    fn enforce_org_diversity(&self, items: Vec<ScoredProgram>) -> Vec<ScoredProgram> {
        let mut org_count: HashMap<String, usize> = HashMap::new();
        items
            .into_iter()
            .filter(|item| {
                let count = org_count.entry(item.program.organization.clone()).or_insert(0);
                if *count >= self.policy.max_per_org {
                    return false;
                }
                *count += 1;
                true
            })
            .collect()
    }
}

fn service_type_matches(service_type: ServiceType, profile: &UserProfile) -> bool {
    match service_type {
        ServiceType::Both | ServiceType::Unknown => true,
        ServiceType::Business => matches!(profile, UserProfile::Business(_)),
        ServiceType::Personal => matches!(profile, UserProfile::Personal(_)),
    }
}

/// Coverage-weighted aggregation over active dimensions.
///
/// Returns `None` when the program has too little usable data to score: no
/// active dimension at all, or no specific dimension and fewer than two
/// active dimensions total.
fn score_pipeline(dims: &[DimensionInfo]) -> Option<PipelineScore> {
    let active: Vec<&DimensionInfo> = dims.iter().filter(|d| d.has_data).collect();
    if active.is_empty() {
        return None;
    }
    let specific: Vec<&&DimensionInfo> = active.iter().filter(|d| d.is_specific).collect();
    let has_specific_match = specific.iter().any(|d| d.raw_score >= SPECIFIC_MATCH_SCORE);
    if specific.is_empty() && active.len() < 2 {
        return None;
    }

    let total_active_weight: f64 = active.iter().map(|d| d.weight).sum();
    let match_score = active
        .iter()
        .map(|d| {
            let effective = if d.confidence < BLEND_CONF {
                d.raw_score * d.confidence + NEUTRAL_PRIOR * (1.0 - d.confidence)
            } else {
                d.raw_score
            };
            effective * d.weight
        })
        .sum::<f64>()
        / total_active_weight.max(f64::MIN_POSITIVE);
    let coverage_factor = COVERAGE_FLOOR + (1.0 - COVERAGE_FLOOR) * total_active_weight;

    Some(PipelineScore {
        final_score: match_score * coverage_factor,
        match_score,
        coverage_factor,
        has_specific_match,
    })
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BusinessProfile, ExtractionConfidence, ExtractionResult, PersonalProfile};

    fn program(id: &str, org: &str, extraction: ExtractionResult) -> Program {
        Program {
            id: id.to_string(),
            title: format!("program {id}"),
            organization: org.to_string(),
            category: "취업".to_string(),
            service_type: ServiceType::Both,
            start_date: None,
            end_date: None,
            is_active: true,
            detail_url: None,
            extraction,
        }
    }

    fn high_conf() -> ExtractionConfidence {
        ExtractionConfidence {
            regions: 0.9,
            business_types: 0.7,
            employee: 0.8,
            revenue: 0.8,
            business_age: 0.85,
            founder_age: 0.8,
            age: 0.85,
            household_types: 0.8,
            income_levels: 0.8,
            employment_statuses: 0.75,
            benefit_categories: 0.7,
        }
    }

    fn seoul_business_extraction() -> ExtractionResult {
        ExtractionResult {
            regions: ["서울".to_string()].into(),
            business_types: ["제조업".to_string()].into(),
            employee_max: Some(50),
            business_age_max_months: Some(84),
            founder_age_max: Some(39),
            confidence: high_conf(),
            region_scope: RegionScope::Regional,
            ..Default::default()
        }
    }

    fn business_profile() -> UserProfile {
        UserProfile::Business(BusinessProfile {
            business_type: "제조업".to_string(),
            region: "서울".to_string(),
            sub_region: Some("강남구".to_string()),
            employee_count: 10,
            annual_revenue: 500_000_000,
            business_age_months: 24,
            founder_age: 34,
        })
    }

    fn personal_profile(interests: &[&str]) -> UserProfile {
        UserProfile::Personal(PersonalProfile {
            age_group: "20대".to_string(),
            region: "서울".to_string(),
            sub_region: None,
            household_type: "1인".to_string(),
            income_level: "중위100이하".to_string(),
            employment_status: "구직자".to_string(),
            interest_categories: interests.iter().map(|s| s.to_string()).collect(),
        })
    }

    #[test]
    fn test_well_matched_program_is_tailored() {
        let matcher = Matcher::default();
        let programs = vec![program("a", "서울산업진흥원", seoul_business_extraction())];
        let result = matcher.match_programs(&programs, &business_profile());
        assert_eq!(result.tailored.len(), 1);
        assert_eq!(result.knocked_out, 0);
        assert!(result.tailored[0].score > 0.45);
    }

    #[test]
    fn test_wrong_region_knocked_out() {
        let matcher = Matcher::default();
        let mut extraction = seoul_business_extraction();
        extraction.regions = ["부산".to_string()].into();
        let programs = vec![program("a", "부산테크노파크", extraction)];
        let result = matcher.match_programs(&programs, &business_profile());
        assert_eq!(result.knocked_out, 1);
        assert!(result.all.is_empty());
    }

    #[test]
    fn test_service_type_filter_counts() {
        let matcher = Matcher::default();
        let mut p = program("a", "org", seoul_business_extraction());
        p.service_type = ServiceType::Personal;
        let result = matcher.match_programs(&[p], &business_profile());
        assert_eq!(result.filtered_by_service_type, 1);
        assert_eq!(result.total_analyzed, 1);
    }

    #[test]
    fn test_scope_only_program_lands_in_exploratory() {
        let matcher = Matcher::default();
        // Unknown scope: only the region dimension is active, at the lenient
        // fallback score.
        let extraction = ExtractionResult {
            confidence: high_conf(),
            ..Default::default()
        };
        let programs = vec![program("a", "org", extraction)];
        let result = matcher.match_programs(&programs, &business_profile());
        assert_eq!(result.knocked_out, 0);
        // region weight 0.22: coverage = 0.2 + 0.8*0.22 = 0.376, score = 0.5*0.376 = 0.188
        assert_eq!(result.exploratory.len(), 1);
    }

    #[test]
    fn test_unknown_scope_never_tailored() {
        let matcher = Matcher::default();
        let mut extraction = seoul_business_extraction();
        extraction.regions.clear();
        extraction.region_scope = RegionScope::Unknown;
        let programs = vec![program("a", "org", extraction)];
        let result = matcher.match_programs(&programs, &business_profile());
        assert!(result.tailored.is_empty());
    }

    #[test]
    fn test_org_diversity_cap() {
        let matcher = Matcher::default();
        let programs: Vec<Program> = (0..6)
            .map(|i| program(&format!("p{i}"), "같은기관", seoul_business_extraction()))
            .collect();
        let result = matcher.match_programs(&programs, &business_profile());
        let from_org = result
            .all
            .iter()
            .filter(|s| s.program.organization == "같은기관")
            .count();
        assert_eq!(from_org, 3);
    }

    #[test]
    fn test_total_cap() {
        let matcher = Matcher::default();
        let programs: Vec<Program> = (0..200)
            .map(|i| program(&format!("p{i}"), &format!("org{}", i / 2), seoul_business_extraction()))
            .collect();
        let result = matcher.match_programs(&programs, &business_profile());
        assert!(result.all.len() <= matcher.policy().total_cap);
        assert!(result.tailored.len() <= matcher.policy().tailored_cap);
    }

    #[test]
    fn test_interest_category_bonus() {
        let matcher = Matcher::default();
        let extraction = ExtractionResult {
            regions: ["서울".to_string()].into(),
            age_min: Some(19),
            age_max: Some(34),
            benefit_categories: ["취업".to_string()].into(),
            confidence: high_conf(),
            region_scope: RegionScope::Regional,
            ..Default::default()
        };
        let programs = vec![program("a", "org", extraction)];
        let with = matcher.match_programs(&programs, &personal_profile(&["취업"]));
        let without = matcher.match_programs(&programs, &personal_profile(&[]));
        assert!(with.all[0].score > without.all[0].score);
    }

    #[test]
    fn test_sub_region_bonus_applied() {
        let matcher = Matcher::default();
        let mut extraction = seoul_business_extraction();
        extraction.sub_regions = ["강남구".to_string()].into();
        let programs = vec![program("a", "org", extraction.clone())];
        let with = matcher.match_programs(&programs, &business_profile());

        extraction.sub_regions = ["서초구".to_string()].into();
        let programs = vec![program("a", "org", extraction)];
        let without = matcher.match_programs(&programs, &business_profile());
        assert!(with.all[0].score > without.all[0].score);
    }

    #[test]
    fn test_deterministic_output() {
        let matcher = Matcher::default();
        let programs: Vec<Program> = (0..30)
            .map(|i| program(&format!("p{i}"), &format!("org{i}"), seoul_business_extraction()))
            .collect();
        let profile = business_profile();
        let first = matcher.match_programs(&programs, &profile);
        let second = matcher.match_programs(&programs, &profile);
        let ids =
            |r: &MatchResult| r.all.iter().map(|s| s.program.id.clone()).collect::<Vec<_>>();
        assert_eq!(ids(&first), ids(&second));
    }

    #[test]
    fn test_tailored_headroom_donated_to_recommended() {
        let matcher = Matcher::default();
        // Regional match but only non-specific strength: scores land mid-band.
        let extraction = ExtractionResult {
            regions: ["서울".to_string()].into(),
            founder_age_max: Some(39),
            revenue_max: Some(1_000_000_000),
            confidence: high_conf(),
            region_scope: RegionScope::Regional,
            ..Default::default()
        };
        let programs: Vec<Program> = (0..40)
            .map(|i| program(&format!("p{i}"), &format!("org{i}"), extraction.clone()))
            .collect();
        let result = matcher.match_programs(&programs, &business_profile());
        if result.tailored.len() < 3 {
            assert!(result.recommended.len() <= matcher.policy().recommended_cap + matcher.policy().tailored_cap);
        }
    }
}
