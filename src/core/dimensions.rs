//! Dimension collection and knockout filtering.
//!
//! Knockout multipliers are deliberately loose: extraction is imperfect, so
//! hard rejection only fires on unambiguous high-confidence mismatches.

use std::collections::BTreeSet;

use crate::core::scoring::{
    age_group_value, expand_business_type, score_age, score_business_age, score_business_type,
    score_employment_status, score_household_type, score_income_level, score_range,
    score_region_with_district, AGE_FALLBACK, EMPLOYEE_FALLBACK, FOUNDER_AGE_FALLBACK,
    INCOME_ORDER, REVENUE_FALLBACK,
};
use crate::models::{BusinessProfile, ExtractionResult, PersonalProfile, RegionScope};

/// Business-track dimension weights; sum to 1.0.
pub struct BusinessWeights;
impl BusinessWeights {
    pub const REGION: f64 = 0.22;
    pub const BUSINESS_AGE: f64 = 0.20;
    pub const BUSINESS_TYPE: f64 = 0.18;
    pub const EMPLOYEE: f64 = 0.15;
    pub const FOUNDER_AGE: f64 = 0.15;
    pub const REVENUE: f64 = 0.10;
}

/// Personal-track dimension weights; sum to 1.0.
pub struct PersonalWeights;
impl PersonalWeights {
    pub const REGION: f64 = 0.20;
    pub const AGE: f64 = 0.25;
    pub const HOUSEHOLD_TYPE: f64 = 0.20;
    pub const INCOME_LEVEL: f64 = 0.20;
    pub const EMPLOYMENT_STATUS: f64 = 0.15;
}

/// Extraction confidence below this never counts as usable data.
const MIN_CONF: f64 = 0.3;

/// Confidence reported for the region dimension when scope is national or
/// unknown; scope itself is the signal there, not the (empty) region list.
const SCOPE_CONF: f64 = 0.9;

/// One scoring dimension for one (program, profile) pair.
///
/// `is_specific` marks dimensions precise enough to justify a tailored-tier
/// placement on their own (geography, type, core demographics).
#[derive(Debug, Clone)]
pub struct DimensionInfo {
    pub key: &'static str,
    pub weight: f64,
    pub has_data: bool,
    pub confidence: f64,
    pub raw_score: f64,
    pub is_specific: bool,
}

fn has_arr(arr: &BTreeSet<String>, conf: f64) -> bool {
    !arr.is_empty() && conf >= MIN_CONF
}

fn has_range<T>(min: Option<T>, max: Option<T>, conf: f64) -> bool {
    (min.is_some() || max.is_some()) && conf >= MIN_CONF
}

/// Collect the six business-track dimensions for one program.
pub fn business_dimensions(
    extraction: &ExtractionResult,
    profile: &BusinessProfile,
) -> Vec<DimensionInfo> {
    let c = &extraction.confidence;
    let scope = extraction.region_scope;
    // Non-regional scope is itself data: the region scorer turns it into a
    // fixed moderate score instead of dropping the dimension.
    let region_has_data = scope != RegionScope::Regional || has_arr(&extraction.regions, c.regions);

    vec![
        DimensionInfo {
            key: "region",
            weight: BusinessWeights::REGION,
            is_specific: true,
            has_data: region_has_data,
            confidence: if scope != RegionScope::Regional { SCOPE_CONF } else { c.regions },
            raw_score: score_region_with_district(
                &extraction.regions,
                &extraction.sub_regions,
                scope,
                &profile.region,
                profile.sub_region.as_deref(),
            ),
        },
        DimensionInfo {
            key: "businessType",
            weight: BusinessWeights::BUSINESS_TYPE,
            is_specific: true,
            has_data: has_arr(&extraction.business_types, c.business_types),
            confidence: c.business_types,
            raw_score: if extraction.business_types.is_empty() {
                0.0
            } else {
                score_business_type(&extraction.business_types, &profile.business_type)
            },
        },
        DimensionInfo {
            key: "employee",
            weight: BusinessWeights::EMPLOYEE,
            is_specific: true,
            has_data: has_range(extraction.employee_min, extraction.employee_max, c.employee),
            confidence: c.employee,
            raw_score: if extraction.employee_min.is_some() || extraction.employee_max.is_some() {
                score_range(
                    extraction.employee_min.map(f64::from),
                    extraction.employee_max.map(f64::from),
                    f64::from(profile.employee_count),
                    EMPLOYEE_FALLBACK,
                )
            } else {
                0.0
            },
        },
        DimensionInfo {
            key: "revenue",
            weight: BusinessWeights::REVENUE,
            is_specific: false,
            has_data: has_range(extraction.revenue_min, extraction.revenue_max, c.revenue),
            confidence: c.revenue,
            raw_score: if extraction.revenue_min.is_some() || extraction.revenue_max.is_some() {
                score_range(
                    extraction.revenue_min.map(|v| v as f64),
                    extraction.revenue_max.map(|v| v as f64),
                    profile.annual_revenue as f64,
                    REVENUE_FALLBACK,
                )
            } else {
                0.0
            },
        },
        DimensionInfo {
            key: "businessAge",
            weight: BusinessWeights::BUSINESS_AGE,
            is_specific: true,
            has_data: has_range(
                extraction.business_age_min_months,
                extraction.business_age_max_months,
                c.business_age,
            ),
            confidence: c.business_age,
            raw_score: if extraction.business_age_min_months.is_some()
                || extraction.business_age_max_months.is_some()
            {
                score_business_age(
                    extraction.business_age_min_months,
                    extraction.business_age_max_months,
                    profile.business_age_months,
                )
            } else {
                0.0
            },
        },
        DimensionInfo {
            key: "founderAge",
            weight: BusinessWeights::FOUNDER_AGE,
            is_specific: false,
            has_data: has_range(extraction.founder_age_min, extraction.founder_age_max, c.founder_age),
            confidence: c.founder_age,
            raw_score: if extraction.founder_age_min.is_some() || extraction.founder_age_max.is_some()
            {
                score_range(
                    extraction.founder_age_min.map(f64::from),
                    extraction.founder_age_max.map(f64::from),
                    f64::from(profile.founder_age),
                    FOUNDER_AGE_FALLBACK,
                )
            } else {
                0.0
            },
        },
    ]
}

/// Collect the five personal-track dimensions for one program.
pub fn personal_dimensions(
    extraction: &ExtractionResult,
    profile: &PersonalProfile,
) -> Vec<DimensionInfo> {
    let c = &extraction.confidence;
    let scope = extraction.region_scope;
    let region_has_data = scope != RegionScope::Regional || has_arr(&extraction.regions, c.regions);

    vec![
        DimensionInfo {
            key: "region",
            weight: PersonalWeights::REGION,
            is_specific: true,
            has_data: region_has_data,
            confidence: if scope != RegionScope::Regional { SCOPE_CONF } else { c.regions },
            raw_score: score_region_with_district(
                &extraction.regions,
                &extraction.sub_regions,
                scope,
                &profile.region,
                profile.sub_region.as_deref(),
            ),
        },
        DimensionInfo {
            key: "age",
            weight: PersonalWeights::AGE,
            is_specific: true,
            has_data: has_range(extraction.age_min, extraction.age_max, c.age),
            confidence: c.age,
            raw_score: if extraction.age_min.is_some() || extraction.age_max.is_some() {
                score_age(extraction.age_min, extraction.age_max, &profile.age_group)
            } else {
                0.0
            },
        },
        DimensionInfo {
            key: "householdType",
            weight: PersonalWeights::HOUSEHOLD_TYPE,
            is_specific: true,
            has_data: has_arr(&extraction.household_types, c.household_types),
            confidence: c.household_types,
            raw_score: score_household_type(&extraction.household_types, &profile.household_type),
        },
        DimensionInfo {
            key: "incomeLevel",
            weight: PersonalWeights::INCOME_LEVEL,
            is_specific: true,
            has_data: has_arr(&extraction.income_levels, c.income_levels),
            confidence: c.income_levels,
            raw_score: score_income_level(&extraction.income_levels, &profile.income_level),
        },
        DimensionInfo {
            key: "employmentStatus",
            weight: PersonalWeights::EMPLOYMENT_STATUS,
            is_specific: false,
            has_data: has_arr(&extraction.employment_statuses, c.employment_statuses),
            confidence: c.employment_statuses,
            raw_score: score_employment_status(
                &extraction.employment_statuses,
                &profile.employment_status,
            ),
        },
    ]
}

/// Confidence floor for membership-based knockouts.
const KNOCKOUT_CONF: f64 = 0.5;

/// Hard rejection for the business track. Geography only knocks out on
/// confirmed regional scope; numeric bounds tolerate 50% overshoot on
/// employees, 2x on revenue, 50% on business age, 10 years on founder age.
pub fn is_knocked_out_business(extraction: &ExtractionResult, profile: &BusinessProfile) -> bool {
    let c = &extraction.confidence;

    if extraction.region_scope == RegionScope::Regional
        && !extraction.regions.is_empty()
        && c.regions >= KNOCKOUT_CONF
        && !extraction.regions.contains(&profile.region)
    {
        return true;
    }

    if !extraction.business_types.is_empty() && c.business_types >= KNOCKOUT_CONF {
        let expanded = expand_business_type(&profile.business_type);
        if !extraction.business_types.iter().any(|t| expanded.contains(&t.as_str())) {
            return true;
        }
    }

    let employees = f64::from(profile.employee_count);
    if extraction.employee_max.is_some_and(|max| employees > f64::from(max) * 1.5) {
        return true;
    }
    if extraction.employee_min.is_some_and(|min| employees < f64::from(min) * 0.5) {
        return true;
    }
    if extraction
        .revenue_max
        .is_some_and(|max| profile.annual_revenue as f64 > max as f64 * 2.0)
    {
        return true;
    }
    if profile.business_age_months != -1 {
        if extraction.business_age_max_months.is_some_and(|max| {
            max > 0 && f64::from(profile.business_age_months) > f64::from(max) * 1.5
        }) {
            return true;
        }
    }
    if extraction
        .founder_age_max
        .is_some_and(|max| profile.founder_age > max + 10)
    {
        return true;
    }
    if extraction
        .founder_age_min
        .is_some_and(|min| profile.founder_age + 10 < min)
    {
        return true;
    }

    false
}

/// Hard rejection for the personal track.
pub fn is_knocked_out_personal(extraction: &ExtractionResult, profile: &PersonalProfile) -> bool {
    let c = &extraction.confidence;

    if extraction.region_scope == RegionScope::Regional
        && !extraction.regions.is_empty()
        && c.regions >= KNOCKOUT_CONF
        && !extraction.regions.contains(&profile.region)
    {
        return true;
    }

    if let Some(user_age) = age_group_value(&profile.age_group) {
        if extraction.age_max.is_some_and(|max| user_age > f64::from(max) + 5.0) {
            return true;
        }
        if extraction.age_min.is_some_and(|min| user_age < f64::from(min) - 5.0) {
            return true;
        }
    }

    if !extraction.household_types.is_empty()
        && c.household_types >= KNOCKOUT_CONF
        && !extraction.household_types.contains(&profile.household_type)
    {
        return true;
    }

    if !extraction.income_levels.is_empty() && c.income_levels >= KNOCKOUT_CONF {
        let user_idx = INCOME_ORDER.iter().position(|l| *l == profile.income_level);
        let max_target = extraction
            .income_levels
            .iter()
            .filter_map(|l| INCOME_ORDER.iter().position(|o| o == l))
            .max();
        if let (Some(user_idx), Some(max_target)) = (user_idx, max_target) {
            if user_idx > max_target + 1 {
                return true;
            }
        }
    }

    if !extraction.employment_statuses.is_empty()
        && c.employment_statuses >= KNOCKOUT_CONF
        && !extraction.employment_statuses.contains(&profile.employment_status)
    {
        return true;
    }

    false
}
