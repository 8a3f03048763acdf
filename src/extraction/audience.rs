//! Personal-track audience extraction: individual age, household type,
//! income level, employment status.
//!
//! Welfare notices describe their audience with life-stage words (영유아,
//! 청년, 어르신) at least as often as with numeric ages, so explicit numeric
//! patterns are tried first and the keyword map is the fallback.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AgeRange {
    pub min: Option<u32>,
    pub max: Option<u32>,
}

/// Life-stage keyword -> representative age band.
static AGE_KEYWORDS: &[(&str, AgeRange)] = &[
    ("영유아", AgeRange { min: Some(0), max: Some(6) }),
    ("영아", AgeRange { min: Some(0), max: Some(2) }),
    ("유아", AgeRange { min: Some(3), max: Some(6) }),
    ("아동", AgeRange { min: Some(0), max: Some(12) }),
    ("초등", AgeRange { min: Some(6), max: Some(12) }),
    ("중학", AgeRange { min: Some(12), max: Some(15) }),
    ("고등", AgeRange { min: Some(15), max: Some(18) }),
    ("청소년", AgeRange { min: Some(9), max: Some(18) }),
    ("청년", AgeRange { min: Some(19), max: Some(34) }),
    ("중장년", AgeRange { min: Some(40), max: Some(64) }),
    ("장년", AgeRange { min: Some(50), max: Some(64) }),
    ("노인", AgeRange { min: Some(65), max: None }),
    ("고령자", AgeRange { min: Some(65), max: None }),
    ("어르신", AgeRange { min: Some(65), max: None }),
    ("임산부", AgeRange { min: Some(15), max: Some(49) }),
    ("신생아", AgeRange { min: Some(0), max: Some(1) }),
];

static AGE_RANGE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"만\s*(\d{1,3})\s*[~\-–]\s*(\d{1,3})\s*세",
        r"만\s*(\d{1,3})\s*세\s*이상\s*(\d{1,3})\s*세\s*이하",
        r"(\d{1,3})\s*세\s*이상\s*(\d{1,3})\s*세\s*이하",
        r"(\d{1,3})\s*세\s*이상\s*(\d{1,3})\s*세\s*미만",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("static regex"))
    .collect()
});

static AGE_MIN_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [r"만\s*(\d{1,3})\s*세\s*이상", r"(\d{1,3})\s*세\s*이상"]
        .iter()
        .map(|p| Regex::new(p).expect("static regex"))
        .collect()
});

static AGE_MAX_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"만\s*(\d{1,3})\s*세\s*이하",
        r"(\d{1,3})\s*세\s*이하",
        r"만\s*(\d{1,3})\s*세\s*미만",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("static regex"))
    .collect()
});

/// Extract an individual-age range.
pub fn extract_age_range(text: &str) -> AgeRange {
    if text.is_empty() {
        return AgeRange::default();
    }

    for pattern in AGE_RANGE_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(text) {
            return AgeRange {
                min: caps.get(1).and_then(|m| m.as_str().parse().ok()),
                max: caps.get(2).and_then(|m| m.as_str().parse().ok()),
            };
        }
    }

    let mut range = AgeRange::default();
    for pattern in AGE_MIN_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(text) {
            range.min = caps.get(1).and_then(|m| m.as_str().parse().ok());
            break;
        }
    }
    for pattern in AGE_MAX_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(text) {
            range.max = caps.get(1).and_then(|m| m.as_str().parse().ok());
            break;
        }
    }
    if range.min.is_some() || range.max.is_some() {
        return range;
    }

    for (keyword, range) in AGE_KEYWORDS {
        if text.contains(keyword) {
            return *range;
        }
    }

    AgeRange::default()
}

static HOUSEHOLD_PATTERNS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (r"1인\s*가구", "1인"),
        (r"단독\s*가구", "1인"),
        (r"신혼\s*부부|신혼\s*가구|결혼\s*\d", "신혼부부"),
        (r"영유아\s*(가구|가정|자녀)", "영유아"),
        (r"다자녀|다\s*자녀\s*가구|3자녀|셋째", "다자녀"),
        (r"한부모|한\s*부모\s*가(구|정)|조손\s*가(구|정)", "한부모"),
        (r"다문화\s*가(구|정)", "다문화"),
        (r"장애인\s*가(구|정)", "장애인"),
        (r"임산부|임신", "임산부"),
        (r"소년소녀\s*가(장|정)", "소년소녀가장"),
    ]
    .iter()
    .map(|(p, t)| (Regex::new(p).expect("static regex"), *t))
    .collect()
});

/// Extract targeted household types; empty means unrestricted.
pub fn extract_household_types(text: &str) -> BTreeSet<String> {
    HOUSEHOLD_PATTERNS
        .iter()
        .filter(|(pattern, _)| pattern.is_match(text))
        .map(|(_, ty)| ty.to_string())
        .collect()
}

/// Income-level ordering, lowest first. Shared with the income scorer.
pub static INCOME_ORDER: &[&str] = &["기초생활", "차상위", "중위50이하", "중위100이하", "중위100초과"];

static BASIC_LIVELIHOOD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"기초생활\s*수급").expect("static regex"));
static NEAR_POVERTY: Lazy<Regex> = Lazy::new(|| Regex::new(r"차상위").expect("static regex"));
static MEDIAN_INCOME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:기준\s*)?중위\s*소득\s*(\d+)\s*%").expect("static regex"));
static LOW_INCOME: Lazy<Regex> = Lazy::new(|| Regex::new(r"저소득").expect("static regex"));

/// Extract targeted income levels; empty means unrestricted.
pub fn extract_income_levels(text: &str) -> BTreeSet<String> {
    let mut result: BTreeSet<String> = BTreeSet::new();

    if BASIC_LIVELIHOOD.is_match(text) {
        result.insert("기초생활".to_string());
    }
    if NEAR_POVERTY.is_match(text) {
        result.insert("차상위".to_string());
    }

    for caps in MEDIAN_INCOME.captures_iter(text) {
        if let Some(pct) = caps.get(1).and_then(|m| m.as_str().parse::<u32>().ok()) {
            let level = if pct <= 50 {
                "중위50이하"
            } else if pct <= 100 {
                "중위100이하"
            } else {
                "중위100초과"
            };
            result.insert(level.to_string());
        }
    }

    if result.is_empty() && LOW_INCOME.is_match(text) {
        result.insert("중위50이하".to_string());
    }

    result
}

static EMPLOYMENT_PATTERNS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (r"재직자|재직\s*중|직장인|근로자", "재직자"),
        (r"구직자|구직\s*중|실업(자)?|미취업(자)?", "구직자"),
        (r"학생|대학(생|교)|재학", "학생"),
        (r"자영업(자)?|소상공인|영세\s*상인", "자영업"),
        (r"경력\s*단절|경단녀", "무직"),
        (r"무직|비경제\s*활동", "무직"),
        (r"은퇴(자)?|퇴직(자)?", "은퇴"),
    ]
    .iter()
    .map(|(p, s)| (Regex::new(p).expect("static regex"), *s))
    .collect()
});

/// Extract targeted employment statuses; empty means unrestricted.
pub fn extract_employment_statuses(text: &str) -> BTreeSet<String> {
    EMPLOYMENT_PATTERNS
        .iter()
        .filter(|(pattern, _)| pattern.is_match(text))
        .map(|(_, status)| status.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_age_range() {
        let range = extract_age_range("만 19~34세 청년");
        assert_eq!(range, AgeRange { min: Some(19), max: Some(34) });
    }

    #[test]
    fn test_numeric_beats_keyword() {
        // 노인 alone would give 65+, but the explicit bound wins.
        let range = extract_age_range("노인 중 만 70세 이상");
        assert_eq!(range.min, Some(70));
    }

    #[test]
    fn test_keyword_band_fallback() {
        assert_eq!(extract_age_range("청년 월세 지원"), AgeRange { min: Some(19), max: Some(34) });
        assert_eq!(extract_age_range("어르신 돌봄").min, Some(65));
    }

    #[test]
    fn test_min_and_max_from_separate_phrases() {
        let range = extract_age_range("만 19세 이상, 만 39세 이하 신청 가능");
        assert_eq!(range, AgeRange { min: Some(19), max: Some(39) });
    }

    #[test]
    fn test_household_types() {
        let types = extract_household_types("한부모 가정 및 다자녀 가구 우대");
        assert!(types.contains("한부모"));
        assert!(types.contains("다자녀"));
    }

    #[test]
    fn test_income_median_buckets() {
        let levels = extract_income_levels("기준 중위소득 150% 이하, 차상위 계층 우선");
        assert!(levels.contains("차상위"));
        assert!(levels.contains("중위100초과"));
    }

    #[test]
    fn test_low_income_only_when_nothing_else() {
        let levels = extract_income_levels("저소득 가구 대상");
        assert_eq!(levels.iter().collect::<Vec<_>>(), vec!["중위50이하"]);
    }

    #[test]
    fn test_employment_statuses() {
        let statuses = extract_employment_statuses("미취업 청년 및 경력단절 여성");
        assert!(statuses.contains("구직자"));
        assert!(statuses.contains("무직"));
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(extract_age_range(""), AgeRange::default());
        assert!(extract_household_types("").is_empty());
        assert!(extract_income_levels("").is_empty());
        assert!(extract_employment_statuses("").is_empty());
    }
}
