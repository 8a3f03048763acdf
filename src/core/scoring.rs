//! Per-dimension scorers, all pure `(criterion, user value) -> [0, 1]`.

use once_cell::sync::Lazy;
use std::collections::{BTreeMap, BTreeSet};

use crate::models::RegionScope;

pub use crate::extraction::INCOME_ORDER;

/// Fallback denominators for range decay when a criterion has a single bound
/// or a zero-width span.
pub const EMPLOYEE_FALLBACK: f64 = 10.0;
pub const REVENUE_FALLBACK: f64 = 100_000_000.0;
pub const FOUNDER_AGE_FALLBACK: f64 = 10.0;
pub const AGE_FALLBACK: f64 = 10.0;
pub const BUSINESS_AGE_FALLBACK: f64 = 12.0;

/// Score a numeric value against an optional [min, max] criterion.
///
/// Inside the bounds is 1.0. Outside, the score decays linearly: over the
/// span when both bounds exist, over `fallback_denom` when the span is zero,
/// and over `max(bound, fallback_denom)` when only one bound exists. Always
/// floored at 0; no criterion at all is unrestricted (1.0).
pub fn score_range(min: Option<f64>, max: Option<f64>, value: f64, fallback_denom: f64) -> f64 {
    match (min, max) {
        (Some(lo), Some(hi)) => {
            if value >= lo && value <= hi {
                return 1.0;
            }
            let span = hi - lo;
            if span > 0.0 {
                if value < lo {
                    return (1.0 - (lo - value) / span).max(0.0);
                }
                return (1.0 - (value - hi) / span).max(0.0);
            }
            (1.0 - (value - lo).abs() / fallback_denom).max(0.0)
        }
        (None, Some(hi)) => {
            if value <= hi {
                1.0
            } else {
                (1.0 - (value - hi) / hi.max(fallback_denom)).max(0.0)
            }
        }
        (Some(lo), None) => {
            if value >= lo {
                1.0
            } else {
                (1.0 - (lo - value) / lo.max(fallback_denom)).max(0.0)
            }
        }
        (None, None) => 1.0,
    }
}

/// User-facing business-type labels mapped to the canonical KSIC-style
/// category names extraction produces.
static BUSINESS_TYPE_ALIASES: Lazy<BTreeMap<&'static str, Vec<&'static str>>> = Lazy::new(|| {
    BTreeMap::from([
        ("도매 및 소매업", vec!["도매업", "소매업", "도매 및 소매업"]),
        ("숙박 및 음식점업", vec!["숙박업", "음식점업", "숙박 및 음식점업"]),
        ("운수 및 창고업", vec!["운수업", "운수 및 창고업"]),
        ("전문, 과학 및 기술 서비스업", vec!["전문서비스업", "전문, 과학 및 기술 서비스업"]),
        ("교육 서비스업", vec!["교육서비스업", "교육 서비스업"]),
        ("보건업 및 사회복지 서비스업", vec!["보건업", "보건업 및 사회복지 서비스업"]),
        ("기타", vec!["기타서비스업", "기타", "예술/스포츠"]),
    ])
});

/// Expand a user business type to itself plus its known aliases.
pub fn expand_business_type(user_type: &str) -> Vec<&str> {
    let mut expanded = vec![user_type];
    if let Some(aliases) = BUSINESS_TYPE_ALIASES.get(user_type) {
        expanded.extend(aliases.iter().copied());
    }
    expanded
}

/// Set membership after alias expansion; empty criterion is unrestricted.
pub fn score_business_type(types: &BTreeSet<String>, user_type: &str) -> f64 {
    if types.is_empty() {
        return 1.0;
    }
    let expanded = expand_business_type(user_type);
    if types.iter().any(|t| expanded.contains(&t.as_str())) {
        1.0
    } else {
        0.0
    }
}

/// Business-age score in months. A user value of -1 is the prospective-founder
/// sentinel: 0.0 against a criterion requiring a positive minimum age, 1.0
/// against one that admits zero-age businesses, 0.5 when the criterion says
/// nothing either way.
pub fn score_business_age(
    min_months: Option<i32>,
    max_months: Option<i32>,
    user_age_months: i32,
) -> f64 {
    if user_age_months == -1 {
        if min_months.is_some_and(|m| m > 0) {
            return 0.0;
        }
        if max_months.is_some_and(|m| m >= 0) {
            return 1.0;
        }
        return 0.5;
    }
    score_range(
        min_months.map(f64::from),
        max_months.map(f64::from),
        f64::from(user_age_months),
        BUSINESS_AGE_FALLBACK,
    )
}

/// Decade labels mapped to a representative age for range scoring.
static AGE_GROUP_TO_VALUE: &[(&str, f64)] = &[
    ("10대", 17.0),
    ("20대", 25.0),
    ("30대", 35.0),
    ("40대", 45.0),
    ("50대", 55.0),
    ("60대이상", 70.0),
];

pub fn age_group_value(age_group: &str) -> Option<f64> {
    AGE_GROUP_TO_VALUE
        .iter()
        .find(|(label, _)| *label == age_group)
        .map(|(_, v)| *v)
}

/// Personal-track age score against the user's decade label.
pub fn score_age(target_min: Option<u32>, target_max: Option<u32>, age_group: &str) -> f64 {
    let Some(user_age) = age_group_value(age_group) else {
        return 0.5;
    };
    if target_min.is_none() && target_max.is_none() {
        return 1.0;
    }
    score_range(
        target_min.map(f64::from),
        target_max.map(f64::from),
        user_age,
        AGE_FALLBACK,
    )
}

/// Set membership; empty criterion is unrestricted.
pub fn score_household_type(target_types: &BTreeSet<String>, user_type: &str) -> f64 {
    if target_types.is_empty() {
        return 1.0;
    }
    if target_types.contains(user_type) {
        1.0
    } else {
        0.0
    }
}

fn income_rank(level: &str) -> Option<usize> {
    INCOME_ORDER.iter().position(|l| *l == level)
}

/// Ordinal income score. Exact membership is 1.0; a user at or below the
/// criterion's highest declared level still fits (0.8); above the ceiling the
/// score drops 0.3 per ordinal rank crossed. Unranked labels score a neutral
/// 0.5 on either side.
pub fn score_income_level(target_levels: &BTreeSet<String>, user_level: &str) -> f64 {
    if target_levels.is_empty() {
        return 1.0;
    }
    if target_levels.contains(user_level) {
        return 1.0;
    }
    let Some(user_idx) = income_rank(user_level) else {
        return 0.5;
    };
    let Some(max_target_idx) = target_levels.iter().filter_map(|l| income_rank(l)).max() else {
        return 0.5;
    };
    if user_idx <= max_target_idx {
        return 0.8;
    }
    (1.0 - (user_idx - max_target_idx) as f64 * 0.3).max(0.0)
}

/// Set membership; empty criterion is unrestricted.
pub fn score_employment_status(target_statuses: &BTreeSet<String>, user_status: &str) -> f64 {
    if target_statuses.is_empty() {
        return 1.0;
    }
    if target_statuses.contains(user_status) {
        1.0
    } else {
        0.0
    }
}

pub const REGION_SCORE_NATIONAL: f64 = 0.7;
pub const REGION_SCORE_UNKNOWN: f64 = 0.5;
pub const REGION_SCORE_SUB_MISMATCH: f64 = 0.6;
pub const REGION_SCORE_PROVINCE_ONLY: f64 = 0.9;

/// Geography score combining scope with sub-region precision.
///
/// Regional programs: exact province + district match 1.0, province match
/// with no district criterion 0.9, province match but a different district
/// 0.6, wrong province 0.0. National programs score a fixed moderate value
/// and unknown-scope programs a lenient fallback, so incomplete extraction
/// is penalized but not erased.
pub fn score_region_with_district(
    regions: &BTreeSet<String>,
    sub_regions: &BTreeSet<String>,
    scope: RegionScope,
    user_region: &str,
    user_sub_region: Option<&str>,
) -> f64 {
    match scope {
        RegionScope::National => REGION_SCORE_NATIONAL,
        RegionScope::Unknown => REGION_SCORE_UNKNOWN,
        RegionScope::Regional => {
            if regions.is_empty() {
                return REGION_SCORE_UNKNOWN;
            }
            if !regions.contains(user_region) {
                return 0.0;
            }
            if sub_regions.is_empty() {
                return REGION_SCORE_PROVINCE_ONLY;
            }
            match user_sub_region {
                Some(sub) if sub_regions.contains(sub) => 1.0,
                Some(_) => REGION_SCORE_SUB_MISMATCH,
                // Province matches and the user gave no district.
                None => REGION_SCORE_PROVINCE_ONLY,
            }
        }
    }
}
