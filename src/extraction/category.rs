//! Benefit-category classification from title and body text.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

static CATEGORY_KEYWORDS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (r"월세|전세|임대|주택|주거|보증금|리모델링|수선|집수리|도배|LH", "주거"),
        (
            r"출산|보육|아동|양육|육아|어린이집|유치원|임신|산후|영유아|아이\s*돌봄|아이\s*사랑",
            "육아",
        ),
        (r"장학|학자금|교육|학비|수업료|입학|등록금|방과후|학습", "교육"),
        (r"취업|구직|일자리|채용|취창업|직업\s*훈련|인턴|고용|실업\s*급여|창업", "취업"),
        (
            r"건강|의료|진료|치료|병원|간병|요양|재활|검진|수술|의약품|치매|정신건강",
            "건강",
        ),
        (
            r"생활\s*(안정|지원|비)|기초\s*생활|긴급\s*지원|긴급\s*복지|재난|에너지\s*바우처|난방비|수도\s*요금|전기\s*요금",
            "생활",
        ),
        (r"문화|여가|체육|스포츠|관광|여행|공연|도서|박물관|미술관", "문화"),
    ]
    .iter()
    .map(|(p, c)| (Regex::new(p).expect("static regex"), *c))
    .collect()
});

/// Classify a program into benefit categories from its title and body.
/// Multiple categories are possible; empty when nothing matches.
pub fn extract_benefit_categories(title: &str, text: &str) -> BTreeSet<String> {
    let combined = format!("{title} {text}");
    if combined.trim().is_empty() {
        return BTreeSet::new();
    }

    CATEGORY_KEYWORDS
        .iter()
        .filter(|(pattern, _)| pattern.is_match(&combined))
        .map(|(_, category)| category.to_string())
        .collect()
}
