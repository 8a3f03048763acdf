//! Business-type extraction from eligibility text.
//!
//! Keyword dictionary over the 13 canonical business types, plus multi-mapping
//! keywords (소상공인 expands to several types, 중소기업 means no restriction)
//! and an exclusion pass that removes a type explicitly negated near its
//! keyword. An empty result set means "unrestricted".

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

/// Canonical type -> keywords that imply it.
pub static BUSINESS_TYPE_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "음식점업",
        &["음식점", "외식", "요식업", "식당", "카페", "베이커리", "제과", "배달", "급식", "푸드", "F&B", "프랜차이즈", "조리"],
    ),
    (
        "소매업",
        &["소매", "판매업", "유통", "상점", "가게", "매장", "편의점", "마트", "슈퍼", "리테일"],
    ),
    ("도매업", &["도매", "도소매", "중간유통", "벤더"]),
    (
        "제조업",
        &["제조", "생산", "공장", "가공", "제품", "산업단지", "스마트공장", "제조기업", "생산기업"],
    ),
    ("건설업", &["건설", "시공", "건축", "토목", "인테리어", "리모델링"]),
    ("운수업", &["운수", "운송", "물류", "택배", "배송", "화물", "교통"]),
    ("숙박업", &["숙박", "호텔", "모텔", "펜션", "게스트하우스", "민박"]),
    (
        "정보통신업",
        &[
            "정보통신", "IT", "ICT", "소프트웨어", "SW", "앱", "플랫폼", "인터넷", "데이터", "AI",
            "인공지능", "빅데이터", "클라우드", "블록체인", "핀테크", "디지털", "스타트업", "테크",
            "기술창업", "전자상거래", "SaaS", "IoT",
        ],
    ),
    (
        "전문서비스업",
        &["전문서비스", "컨설팅", "법률", "회계", "세무", "디자인", "광고", "마케팅", "연구", "엔지니어링", "번역"],
    ),
    (
        "교육서비스업",
        &["교육", "학원", "교습", "강의", "훈련", "연수", "학습", "EdTech", "에듀"],
    ),
    (
        "보건업",
        &["보건", "의료", "병원", "약국", "의원", "치과", "한의원", "바이오", "헬스케어", "건강", "의료기기"],
    ),
    (
        "예술/스포츠",
        &["예술", "스포츠", "문화", "공연", "영화", "음악", "체육", "레저", "관광", "엔터테인먼트", "게임", "콘텐츠"],
    ),
    (
        "기타서비스업",
        &["서비스업", "생활서비스", "수리", "세탁", "미용", "뷰티", "반려동물", "펫"],
    ),
];

/// Keywords that expand to several types, or (empty list) explicitly denote
/// "no restriction" and short-circuit to an unrestricted result.
static MULTI_MAP_KEYWORDS: &[(&str, &[&str])] = &[
    ("소상공인", &["음식점업", "소매업", "기타서비스업"]),
    ("자영업", &["음식점업", "소매업", "기타서비스업"]),
    ("벤처", &["정보통신업", "제조업"]),
    ("중소기업", &[]),
    ("중소벤처기업", &[]),
    ("소기업", &[]),
    ("영세기업", &["음식점업", "소매업", "기타서비스업"]),
];

static UNRESTRICTED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"업종\s*(제한|무관)\s*없|모든\s*업종|전\s*업종").expect("static regex"));

static EXCLUSION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(음식점|소매|도매|제조|건설|운수|숙박|정보통신|전문서비스|교육|보건|예술|스포츠|기타서비스)[^\s]*\s*(제외|불포함|불가|해당\s*없음)",
    )
    .expect("static regex")
});

/// Extract the set of targeted business types. Empty means unrestricted.
pub fn extract_business_types(text: &str) -> BTreeSet<String> {
    let mut found: BTreeSet<String> = BTreeSet::new();

    if UNRESTRICTED.is_match(text) {
        return found;
    }

    // Multi-map keywords first; a "no restriction" keyword wins outright.
    for (keyword, types) in MULTI_MAP_KEYWORDS {
        if text.contains(keyword) {
            if types.is_empty() {
                return BTreeSet::new();
            }
            found.extend(types.iter().map(|t| t.to_string()));
        }
    }

    for (canonical, keywords) in BUSINESS_TYPE_KEYWORDS {
        if keywords.iter().any(|k| text.contains(k)) {
            found.insert((*canonical).to_string());
        }
    }

    // Exclusion pass: "음식점업 제외" drops the type even if a keyword matched.
    for caps in EXCLUSION.captures_iter(text) {
        let excluded = &caps[1];
        for (canonical, keywords) in BUSINESS_TYPE_KEYWORDS {
            if keywords.iter().any(|k| k.contains(excluded)) {
                found.remove(*canonical);
            }
        }
    }

    found
}
