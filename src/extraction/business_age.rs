//! Business-age (업력) extraction, normalized to months.
//!
//! The 예비창업 marker means "not yet founded" and yields a hard ceiling of
//! zero months, which is distinct from having no age restriction at all.

use once_cell::sync::Lazy;
use regex::Regex;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BusinessAgeRange {
    pub min_months: Option<i32>,
    pub max_months: Option<i32>,
}

type Extractor = fn(&regex::Captures) -> BusinessAgeRange;

static AGE_PATTERNS: Lazy<Vec<(Regex, Extractor)>> = Lazy::new(|| {
    vec![
        (
            Regex::new(r"예비\s*창업").expect("static regex"),
            |_| BusinessAgeRange { min_months: None, max_months: Some(0) },
        ),
        (
            Regex::new(r"(?:창업|설립|개업)\s*(\d+)\s*년\s*(?:이내|이하|미만)").expect("static regex"),
            |c| BusinessAgeRange { min_months: None, max_months: years(c, 1) },
        ),
        (
            Regex::new(r"(\d+)\s*년\s*이내\s*(?:(?:예비)?창업|설립)").expect("static regex"),
            |c| BusinessAgeRange { min_months: None, max_months: years(c, 1) },
        ),
        (
            Regex::new(r"(\d+)\s*개월\s*(?:이내|이하)\s*(?:창업|설립)?").expect("static regex"),
            |c| BusinessAgeRange { min_months: None, max_months: months(c, 1) },
        ),
        (
            Regex::new(r"(?:업력|창업)\s*(\d+)\s*년\s*(?:~|～|이상)\s*(\d+)\s*년\s*(?:이하|이내)?")
                .expect("static regex"),
            |c| BusinessAgeRange { min_months: years(c, 1), max_months: years(c, 2) },
        ),
        (
            Regex::new(r"(\d+)\s*년\s*(?:이상|초과)\s*(\d+)\s*년\s*(?:이하|미만|이내)").expect("static regex"),
            |c| BusinessAgeRange { min_months: years(c, 1), max_months: years(c, 2) },
        ),
        (
            Regex::new(r"(?:창업|설립|사업)\s*(\d+)\s*년\s*(?:이상|초과)").expect("static regex"),
            |c| BusinessAgeRange { min_months: years(c, 1), max_months: None },
        ),
        (
            Regex::new(r"(\d+)\s*년\s*이상\s*(?:경과|된|이상인)").expect("static regex"),
            |c| BusinessAgeRange { min_months: years(c, 1), max_months: None },
        ),
        (
            Regex::new(r"초기\s*창업").expect("static regex"),
            |_| BusinessAgeRange { min_months: None, max_months: Some(36) },
        ),
        (
            Regex::new(r"청년\s*창업").expect("static regex"),
            |_| BusinessAgeRange { min_months: None, max_months: Some(84) },
        ),
    ]
});

fn years(caps: &regex::Captures, idx: usize) -> Option<i32> {
    caps.get(idx).and_then(|m| m.as_str().parse::<i32>().ok()).map(|y| y * 12)
}

fn months(caps: &regex::Captures, idx: usize) -> Option<i32> {
    caps.get(idx).and_then(|m| m.as_str().parse().ok())
}

/// Extract a business-age range in months; first matching rule wins.
pub fn extract_business_age(text: &str) -> BusinessAgeRange {
    for (pattern, extract) in AGE_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(text) {
            return extract(&caps);
        }
    }
    BusinessAgeRange::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prospective_founder_marker() {
        let range = extract_business_age("예비창업자 및 초기창업기업");
        assert_eq!(range.max_months, Some(0));
    }

    #[test]
    fn test_years_within() {
        let range = extract_business_age("창업 7년 이내 기업");
        assert_eq!(range, BusinessAgeRange { min_months: None, max_months: Some(84) });
    }

    #[test]
    fn test_months_within() {
        let range = extract_business_age("설립 후 36개월 이내");
        assert_eq!(range.max_months, Some(36));
    }

    #[test]
    fn test_two_sided_range() {
        let range = extract_business_age("업력 3년 이상 7년 이하 기업");
        assert_eq!(range, BusinessAgeRange { min_months: Some(36), max_months: Some(84) });
    }

    #[test]
    fn test_floor_only() {
        let range = extract_business_age("사업 3년 이상 영위한 기업");
        assert_eq!(range, BusinessAgeRange { min_months: Some(36), max_months: None });
    }

    #[test]
    fn test_early_stage_keyword() {
        assert_eq!(extract_business_age("초기창업패키지").max_months, Some(36));
    }

    #[test]
    fn test_no_match() {
        assert_eq!(extract_business_age("전통시장 활성화"), BusinessAgeRange::default());
    }
}
