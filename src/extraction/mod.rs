//! Structured eligibility extraction from free-form Korean program text.
//!
//! Pure regex + keyword dictionaries, no ML. Extraction never fails: unmatched
//! patterns degrade to "no data, low confidence", and implausible numbers are
//! clamped to absent rather than rejecting the whole record.

pub mod audience;
pub mod business_age;
pub mod business_type;
pub mod category;
pub mod employee;
pub mod founder_age;
pub mod region;
pub mod revenue;

pub use audience::{
    extract_age_range, extract_employment_statuses, extract_household_types,
    extract_income_levels, INCOME_ORDER,
};
pub use business_age::extract_business_age;
pub use business_type::extract_business_types;
pub use category::extract_benefit_categories;
pub use employee::extract_employee_range;
pub use founder_age::extract_founder_age;
pub use region::{is_nationwide, preprocess_organization, resolve, ResolvedRegions};
pub use revenue::extract_revenue_range;

use crate::models::{ExtractionConfidence, ExtractionResult, RawProgramText, RegionScope};
use once_cell::sync::Lazy;
use regex::Regex;

/// Institution names that contain a province name but carry no geographic
/// restriction (서울시립대학교 says nothing about where applicants live).
static REGION_FALSE_POSITIVES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        "서울대학교|서울과학기술대학교|서울시립대학교|서울교육대학교|부산대학교|부산교육대학교|\
         경북대학교|전남대학교|충남대학교|충북대학교|강원대학교|인천대학교|인천교육대학교|\
         대구대학교|대구교육대학교|대전대학교|제주대학교|경인교육대학교|광주과학기술원|\
         대구경북과학기술원|울산과학기술원",
    )
    .expect("static regex")
});

/// Central-government ministries and agencies; a program issued by one of
/// these is national unless the text names a region.
static CENTRAL_GOV_KEYWORDS: &[&str] = &[
    "국방부", "법무부", "환경부", "과학기술", "중소벤처기업부", "산업통상자원부", "고용노동부",
    "보건복지부", "국토교통부", "농림축산식품부", "해양수산부", "문화체육관광부", "교육부",
    "여성가족부", "행정안전부", "기획재정부", "금융위원회", "공정거래위원회", "국세청", "병무청",
    "통계청", "소방청", "특허청", "산림청", "기상청", "조달청",
];

// Sanity limits; values outside are clamped to absent.
const MAX_EMPLOYEES: u32 = 100_000;
const MIN_REVENUE: i64 = 1_000_000;
const MAX_REVENUE: i64 = 10_000_000_000_000;
const MAX_BUSINESS_AGE_MONTHS: i32 = 600;
const MIN_FOUNDER_AGE: u32 = 15;
const MAX_FOUNDER_AGE: u32 = 100;
const MAX_INDIVIDUAL_AGE: u32 = 100;

const CONF_LOW: f64 = 0.1;

/// Extract structured eligibility criteria from the given text sources.
///
/// The title is prepended to the geography text (district names frequently
/// appear only in titles) and the preprocessed organization name is appended;
/// dimension extractors run on the body texts only.
pub fn extract(texts: &[&str], title: Option<&str>, organization: Option<&str>) -> ExtractionResult {
    let body: Vec<&str> = texts.iter().copied().filter(|t| !t.trim().is_empty()).collect();
    let combined = body.join(" ");

    let org_cleaned = organization.map(preprocess_organization);
    let mut geo_text = String::new();
    if let Some(t) = title {
        geo_text.push_str(t);
        geo_text.push(' ');
    }
    geo_text.push_str(&combined);
    if let Some(org) = &org_cleaned {
        geo_text.push(' ');
        geo_text.push_str(org);
    }

    let mut resolved = resolve(&geo_text);
    if REGION_FALSE_POSITIVES.is_match(&geo_text) {
        let cleaned = REGION_FALSE_POSITIVES.replace_all(&geo_text, "");
        resolved = resolve(&cleaned);
    }

    let business_types = extract_business_types(&combined);
    let employees = extract_employee_range(&combined);
    let revenue = extract_revenue_range(&combined);
    let business_age = extract_business_age(&combined);
    let founder_age = extract_founder_age(&body);
    let age = extract_age_range(&combined);
    let household_types = extract_household_types(&combined);
    let income_levels = extract_income_levels(&combined);
    let employment_statuses = extract_employment_statuses(&combined);
    let benefit_categories = extract_benefit_categories(title.unwrap_or(""), &combined);

    let region_scope = determine_region_scope(&resolved, organization, &geo_text);

    let mut result = ExtractionResult {
        regions: resolved.regions,
        sub_regions: resolved.sub_regions,
        business_types,
        employee_min: employees.min,
        employee_max: employees.max,
        revenue_min: revenue.min,
        revenue_max: revenue.max,
        business_age_min_months: business_age.min_months,
        business_age_max_months: business_age.max_months,
        founder_age_min: founder_age.min,
        founder_age_max: founder_age.max,
        age_min: age.min,
        age_max: age.max,
        household_types,
        income_levels,
        employment_statuses,
        benefit_categories,
        confidence: ExtractionConfidence::default(),
        region_scope,
    };
    validate(&mut result);
    result.confidence = confidence_for(&result);
    result
}

/// Convenience wrapper over [`extract`] for a whole raw-text record.
pub fn extract_program(raw: &RawProgramText) -> ExtractionResult {
    extract(
        &raw.body_texts(),
        raw.title.as_deref(),
        raw.organization.as_deref(),
    )
}

/// Region-scope classification: a resolved region wins, then explicit
/// nationwide wording or a central-government issuer, otherwise unknown.
fn determine_region_scope(
    resolved: &ResolvedRegions,
    organization: Option<&str>,
    raw_text: &str,
) -> RegionScope {
    if !resolved.regions.is_empty() {
        return RegionScope::Regional;
    }
    if is_nationwide(raw_text) {
        return RegionScope::National;
    }
    match organization.map(str::trim) {
        Some("중앙정부") => RegionScope::National,
        Some(org) if CENTRAL_GOV_KEYWORDS.iter().any(|kw| org.contains(kw)) => RegionScope::National,
        _ => RegionScope::Unknown,
    }
}

fn swap_if_inverted<T: PartialOrd + Copy>(min: &mut Option<T>, max: &mut Option<T>) {
    if let (Some(lo), Some(hi)) = (*min, *max) {
        if lo > hi {
            *min = Some(hi);
            *max = Some(lo);
        }
    }
}

fn clamp_range<T: PartialOrd + Copy>(value: &mut Option<T>, lo: T, hi: T) {
    if let Some(v) = *value {
        if v < lo || v > hi {
            *value = None;
        }
    }
}

/// Post-extraction validation: swap inverted pairs, clamp implausible values
/// to absent. Runs before confidence so a clamped dimension reports low
/// confidence like any other miss.
fn validate(result: &mut ExtractionResult) {
    swap_if_inverted(&mut result.employee_min, &mut result.employee_max);
    swap_if_inverted(&mut result.revenue_min, &mut result.revenue_max);
    swap_if_inverted(&mut result.business_age_min_months, &mut result.business_age_max_months);
    swap_if_inverted(&mut result.founder_age_min, &mut result.founder_age_max);
    swap_if_inverted(&mut result.age_min, &mut result.age_max);

    clamp_range(&mut result.employee_min, 0, MAX_EMPLOYEES);
    clamp_range(&mut result.employee_max, 0, MAX_EMPLOYEES);
    clamp_range(&mut result.revenue_min, MIN_REVENUE, MAX_REVENUE);
    clamp_range(&mut result.revenue_max, MIN_REVENUE, MAX_REVENUE);
    clamp_range(&mut result.business_age_min_months, 0, MAX_BUSINESS_AGE_MONTHS);
    clamp_range(&mut result.business_age_max_months, 0, MAX_BUSINESS_AGE_MONTHS);
    clamp_range(&mut result.founder_age_min, MIN_FOUNDER_AGE, MAX_FOUNDER_AGE);
    clamp_range(&mut result.founder_age_max, MIN_FOUNDER_AGE, MAX_FOUNDER_AGE);
    clamp_range(&mut result.age_min, 0, MAX_INDIVIDUAL_AGE);
    clamp_range(&mut result.age_max, 0, MAX_INDIVIDUAL_AGE);
}

/// Fixed high/low confidence per dimension, keyed off whether the dimension
/// produced any data after validation.
fn confidence_for(result: &ExtractionResult) -> ExtractionConfidence {
    let arr = |non_empty: bool, high: f64| if non_empty { high } else { CONF_LOW };
    ExtractionConfidence {
        regions: arr(!result.regions.is_empty(), 0.9),
        business_types: arr(!result.business_types.is_empty(), 0.7),
        employee: arr(result.employee_min.is_some() || result.employee_max.is_some(), 0.8),
        revenue: arr(result.revenue_min.is_some() || result.revenue_max.is_some(), 0.8),
        business_age: arr(
            result.business_age_min_months.is_some() || result.business_age_max_months.is_some(),
            0.85,
        ),
        founder_age: arr(result.founder_age_min.is_some() || result.founder_age_max.is_some(), 0.8),
        age: arr(result.age_min.is_some() || result.age_max.is_some(), 0.85),
        household_types: arr(!result.household_types.is_empty(), 0.8),
        income_levels: arr(!result.income_levels.is_empty(), 0.8),
        employment_statuses: arr(!result.employment_statuses.is_empty(), 0.75),
        benefit_categories: arr(!result.benefit_categories.is_empty(), 0.7),
    }
}
