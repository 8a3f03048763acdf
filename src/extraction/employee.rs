//! Employee-count range extraction.
//!
//! Named company-size tiers are checked before numeric patterns, longest
//! keyword first so 중소기업 wins over the embedded 소기업.

use once_cell::sync::Lazy;
use regex::Regex;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmployeeRange {
    pub min: Option<u32>,
    pub max: Option<u32>,
}

/// Statutory size tiers and the employee ceilings they imply.
static NAMED_RANGES: &[(&str, EmployeeRange)] = &[
    ("중소기업", EmployeeRange { min: None, max: Some(300) }),
    ("소상공인", EmployeeRange { min: None, max: Some(10) }),
    ("소기업", EmployeeRange { min: None, max: Some(50) }),
    ("중견기업", EmployeeRange { min: Some(300), max: Some(1000) }),
    ("중기업", EmployeeRange { min: Some(50), max: Some(300) }),
    ("대기업", EmployeeRange { min: Some(1000), max: None }),
    ("영세기업", EmployeeRange { min: None, max: Some(5) }),
    ("1인 기업", EmployeeRange { min: Some(1), max: Some(1) }),
    ("1인기업", EmployeeRange { min: Some(1), max: Some(1) }),
];

type Extractor = fn(&regex::Captures) -> EmployeeRange;

static NUMERIC_PATTERNS: Lazy<Vec<(Regex, Extractor)>> = Lazy::new(|| {
    vec![
        (
            Regex::new(r"상시\s*(?:근로자|종업원|고용인원|인원)\s*(\d+)\s*(?:인|명)\s*(?:이하|미만)")
                .expect("static regex"),
            |c| EmployeeRange { min: None, max: num(c, 1) },
        ),
        (
            Regex::new(r"(?:종업원|근로자|직원)\s*(\d+)\s*(?:인|명)\s*이상\s*(\d+)\s*(?:인|명)\s*이하")
                .expect("static regex"),
            |c| EmployeeRange { min: num(c, 1), max: num(c, 2) },
        ),
        (
            Regex::new(r"(\d+)\s*(?:인|명)\s*(?:~|～|이상)\s*(\d+)\s*(?:인|명)\s*(?:이하|미만|까지)?")
                .expect("static regex"),
            |c| EmployeeRange { min: num(c, 1), max: num(c, 2) },
        ),
        (
            Regex::new(r"(\d+)\s*(?:인|명)\s*(?:이하|미만|까지)").expect("static regex"),
            |c| EmployeeRange { min: None, max: num(c, 1) },
        ),
        (
            Regex::new(r"(\d+)\s*(?:인|명)\s*(?:이상|초과|부터)").expect("static regex"),
            |c| EmployeeRange { min: num(c, 1), max: None },
        ),
        (
            Regex::new(r"(?:고용|채용)\s*(?:인원|규모)\s*(\d+)\s*(?:인|명)\s*이상").expect("static regex"),
            |c| EmployeeRange { min: num(c, 1), max: None },
        ),
    ]
});

fn num(caps: &regex::Captures, idx: usize) -> Option<u32> {
    caps.get(idx).and_then(|m| m.as_str().parse().ok())
}

/// Extract an employee-count range; `None`/`None` when no rule matches.
pub fn extract_employee_range(text: &str) -> EmployeeRange {
    for (name, range) in NAMED_RANGES {
        if text.contains(name) {
            return *range;
        }
    }

    for (pattern, extract) in NUMERIC_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(text) {
            return extract(&caps);
        }
    }

    EmployeeRange::default()
}
