//! Annual-revenue range extraction, in KRW.
//!
//! Explicit 매출 patterns (with Korean numeric units) win over statutory
//! size-tier estimates; the tier estimates exist because many notices only say
//! 소상공인/중소기업 and never state a revenue figure.

use once_cell::sync::Lazy;
use regex::Regex;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RevenueRange {
    pub min: Option<i64>,
    pub max: Option<i64>,
}

/// Parse a Korean amount expression like ("1.5", "억원") into won.
fn parse_korean_amount(num: &str, unit: &str) -> Option<i64> {
    let value: f64 = num.replace(',', "").parse().ok()?;
    let multiplier: i64 = match unit {
        "원" => 1,
        "만" | "만원" => 10_000,
        "백만" | "백만원" => 1_000_000,
        "천만" | "천만원" => 10_000_000,
        "억" | "억원" => 100_000_000,
        "십억" => 1_000_000_000,
        "조" | "조원" => 1_000_000_000_000,
        _ => return None,
    };
    Some((value * multiplier as f64).round() as i64)
}

/// Revenue ceilings implied by statutory size tiers (중소기업기본법).
static NAMED_RANGES: Lazy<Vec<(Regex, RevenueRange)>> = Lazy::new(|| {
    vec![
        (
            Regex::new(r"소상공인").expect("static regex"),
            RevenueRange { min: None, max: Some(1_000_000_000) },
        ),
        (
            Regex::new(r"소기업").expect("static regex"),
            RevenueRange { min: None, max: Some(12_000_000_000) },
        ),
        (
            Regex::new(r"중기업").expect("static regex"),
            RevenueRange { min: None, max: Some(150_000_000_000) },
        ),
        (
            Regex::new(r"중소기업").expect("static regex"),
            RevenueRange { min: None, max: Some(150_000_000_000) },
        ),
        (
            Regex::new(r"중소기업기본법\s*(?:시행령)?\s*(?:에\s*따른|상의?)?\s*규모\s*기준")
                .expect("static regex"),
            RevenueRange { min: None, max: Some(150_000_000_000) },
        ),
    ]
});

const AMOUNT_UNIT: &str = r"(억원?|천만원?|백만원?|만원?|원)";

type Extractor = fn(&regex::Captures) -> RevenueRange;

static REVENUE_PATTERNS: Lazy<Vec<(Regex, Extractor)>> = Lazy::new(|| {
    let head = r"(?:매출|매출액|연매출|연간매출|직전연도\s*매출|전년도\s*매출|매출규모)";
    vec![
        // Two-sided range first so single-value rules cannot partially match it.
        (
            Regex::new(&format!(
                r"{head}\s*([\d,.]+)\s*{AMOUNT_UNIT}\s*(?:~|～|이상|에서)\s*([\d,.]+)\s*{AMOUNT_UNIT}\s*(?:이하|미만)?"
            ))
            .expect("static regex"),
            |c| RevenueRange { min: amount(c, 1, 2), max: amount(c, 3, 4) },
        ),
        // Mixed units: 매출 5천만원 ~ 3억원.
        (
            Regex::new(&format!(
                r"{head}\s*([\d,.]+)\s*(천만원?|만원?)\s*(?:~|～|에서)\s*([\d,.]+)\s*(억원?)\s*(?:이하|미만)?"
            ))
            .expect("static regex"),
            |c| RevenueRange { min: amount(c, 1, 2), max: amount(c, 3, 4) },
        ),
        (
            Regex::new(&format!(
                r"{head}\s*(?:이|가)?\s*([\d,.]+)\s*{AMOUNT_UNIT}\s*(?:이하|미만|까지)"
            ))
            .expect("static regex"),
            |c| RevenueRange { min: None, max: amount(c, 1, 2) },
        ),
        (
            Regex::new(&format!(
                r"{head}\s*(?:이|가)?\s*([\d,.]+)\s*{AMOUNT_UNIT}\s*(?:이상|초과)"
            ))
            .expect("static regex"),
            |c| RevenueRange { min: amount(c, 1, 2), max: None },
        ),
        // 연 매출(액) with the 연 prefix space-separated.
        (
            Regex::new(&format!(
                r"연\s*매출(?:액)?\s*([\d,.]+)\s*(억원?|천만원?|백만원?|만원?)\s*(?:이하|미만)"
            ))
            .expect("static regex"),
            |c| RevenueRange { min: None, max: amount(c, 1, 2) },
        ),
        (
            Regex::new(&format!(
                r"연\s*매출(?:액)?\s*([\d,.]+)\s*(억원?|천만원?|백만원?|만원?)\s*(?:이상|초과)"
            ))
            .expect("static regex"),
            |c| RevenueRange { min: amount(c, 1, 2), max: None },
        ),
        // Any recorded revenue at all.
        (
            Regex::new(r"매출\s*실적이\s*있는").expect("static regex"),
            |_| RevenueRange { min: Some(1), max: None },
        ),
        (
            Regex::new(r"매출(?:이|이\s+)?발생").expect("static regex"),
            |_| RevenueRange { min: Some(1), max: None },
        ),
    ]
});

fn amount(caps: &regex::Captures, num_idx: usize, unit_idx: usize) -> Option<i64> {
    let num = caps.get(num_idx)?.as_str();
    let unit = caps.get(unit_idx)?.as_str();
    parse_korean_amount(num, unit)
}

/// Extract an annual-revenue range; falls back to size-tier estimates, then
/// to `None`/`None` when nothing matches.
pub fn extract_revenue_range(text: &str) -> RevenueRange {
    for (pattern, extract) in REVENUE_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(text) {
            return extract(&caps);
        }
    }

    for (pattern, range) in NAMED_RANGES.iter() {
        if pattern.is_match(text) {
            return *range;
        }
    }

    RevenueRange::default()
}
