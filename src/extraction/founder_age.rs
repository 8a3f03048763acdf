//! Founder (대표자) age extraction.
//!
//! 청년/시니어 keyword bounds plus explicit 만 XX세 patterns; an explicit
//! numeric bound overrides the keyword-derived one on the same side.

use once_cell::sync::Lazy;
use regex::Regex;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FounderAgeRange {
    pub min: Option<u32>,
    pub max: Option<u32>,
}

static RANGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{2})세?\s*[~\-]\s*(\d{2})세").expect("static regex"));
static YOUTH: Lazy<Regex> = Lazy::new(|| Regex::new(r"청년").expect("static regex"));
static MIDDLE_AGED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"중장년|시니어|장년|노인").expect("static regex"));
static MAX_BOUND: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"만?\s*(\d{2})세\s*이하").expect("static regex"));
static MIN_BOUND: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"만?\s*(\d{2})세\s*이상").expect("static regex"));

/// Extract a founder-age range from the given text sources.
pub fn extract_founder_age(texts: &[&str]) -> FounderAgeRange {
    let combined = texts.join(" ");
    let mut range = FounderAgeRange::default();

    // Explicit XX~YY세 ranges settle both bounds at once.
    if let Some(caps) = RANGE.captures(&combined) {
        range.min = caps.get(1).and_then(|m| m.as_str().parse().ok());
        range.max = caps.get(2).and_then(|m| m.as_str().parse().ok());
        return range;
    }

    // 청년 implies a ceiling of 39, unless 중장년/장년 appears alongside.
    if YOUTH.is_match(&combined) && !MIDDLE_AGED.is_match(&combined) {
        range.max = Some(39);
    }
    if MIDDLE_AGED.is_match(&combined) {
        range.min = Some(40);
    }

    if let Some(caps) = MAX_BOUND.captures(&combined) {
        range.max = caps.get(1).and_then(|m| m.as_str().parse().ok());
    }
    if let Some(caps) = MIN_BOUND.captures(&combined) {
        range.min = caps.get(1).and_then(|m| m.as_str().parse().ok());
    }

    range
}
