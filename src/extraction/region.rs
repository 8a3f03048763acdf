//! Dictionary-driven province/district resolution for Korean program text.
//!
//! Korean program text names regions in many surface forms (서울특별시, 서울시,
//! 서울, ...) and frequently embeds province names inside unrelated compound
//! words (대구 inside 해운대구, 경기 inside 경기침체). Every dictionary hit is
//! therefore validated with a Hangul word-boundary test before it counts.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

/// The 17 first-level provinces/metropolitan cities, each with its surface
/// variants ordered longest-first so the formal forms win before short codes.
pub static PROVINCE_VARIANTS: &[(&str, &[&str])] = &[
    ("서울", &["서울특별시", "서울시", "서울"]),
    ("부산", &["부산광역시", "부산시", "부산"]),
    ("대구", &["대구광역시", "대구시", "대구"]),
    ("인천", &["인천광역시", "인천시", "인천"]),
    ("광주", &["광주광역시", "광주시", "광주"]),
    ("대전", &["대전광역시", "대전시", "대전"]),
    ("울산", &["울산광역시", "울산시", "울산"]),
    ("세종", &["세종특별자치시", "세종시", "세종"]),
    ("경기", &["경기도", "경기"]),
    ("강원", &["강원특별자치도", "강원도", "강원"]),
    ("충북", &["충청북도", "충북"]),
    ("충남", &["충청남도", "충남"]),
    ("전북", &["전라북도", "전북특별자치도", "전북"]),
    ("전남", &["전라남도", "전남"]),
    ("경북", &["경상북도", "경북"]),
    ("경남", &["경상남도", "경남"]),
    ("제주", &["제주특별자치도", "제주도", "제주"]),
];

/// District -> parent province, for district names that occur under exactly
/// one province. A hit on one of these is enough evidence for the province
/// itself even when the province is never named directly.
static DISTRICT_PARENTS: &[(&str, &str)] = &[
    // 서울
    ("강남구", "서울"),
    ("강동구", "서울"),
    ("강북구", "서울"),
    ("관악구", "서울"),
    ("광진구", "서울"),
    ("구로구", "서울"),
    ("금천구", "서울"),
    ("노원구", "서울"),
    ("도봉구", "서울"),
    ("동대문구", "서울"),
    ("동작구", "서울"),
    ("마포구", "서울"),
    ("서대문구", "서울"),
    ("서초구", "서울"),
    ("성동구", "서울"),
    ("성북구", "서울"),
    ("송파구", "서울"),
    ("양천구", "서울"),
    ("영등포구", "서울"),
    ("용산구", "서울"),
    ("은평구", "서울"),
    ("종로구", "서울"),
    ("중랑구", "서울"),
    // 부산
    ("해운대구", "부산"),
    ("수영구", "부산"),
    ("사하구", "부산"),
    ("사상구", "부산"),
    ("금정구", "부산"),
    ("연제구", "부산"),
    ("동래구", "부산"),
    ("부산진구", "부산"),
    ("영도구", "부산"),
    ("기장군", "부산"),
    // 대구
    ("수성구", "대구"),
    ("달서구", "대구"),
    ("달성군", "대구"),
    // 인천
    ("연수구", "인천"),
    ("계양구", "인천"),
    ("부평구", "인천"),
    ("미추홀구", "인천"),
    ("강화군", "인천"),
    // 광주
    ("광산구", "광주"),
    // 대전
    ("유성구", "대전"),
    ("대덕구", "대전"),
    // 울산
    ("울주군", "울산"),
    // 경기
    ("수원시", "경기"),
    ("성남시", "경기"),
    ("고양시", "경기"),
    ("용인시", "경기"),
    ("부천시", "경기"),
    ("안산시", "경기"),
    ("안양시", "경기"),
    ("남양주시", "경기"),
    ("화성시", "경기"),
    ("평택시", "경기"),
    ("의정부시", "경기"),
    ("시흥시", "경기"),
    ("파주시", "경기"),
    ("김포시", "경기"),
    ("광명시", "경기"),
    ("군포시", "경기"),
    ("오산시", "경기"),
    ("이천시", "경기"),
    ("양주시", "경기"),
    ("구리시", "경기"),
    ("안성시", "경기"),
    ("포천시", "경기"),
    ("의왕시", "경기"),
    ("하남시", "경기"),
    ("여주시", "경기"),
    ("동두천시", "경기"),
    ("과천시", "경기"),
    // 강원
    ("춘천시", "강원"),
    ("원주시", "강원"),
    ("강릉시", "강원"),
    ("동해시", "강원"),
    ("속초시", "강원"),
    ("삼척시", "강원"),
    ("태백시", "강원"),
    // 충북
    ("청주시", "충북"),
    ("충주시", "충북"),
    ("제천시", "충북"),
    // 충남
    ("천안시", "충남"),
    ("아산시", "충남"),
    ("서산시", "충남"),
    ("당진시", "충남"),
    ("공주시", "충남"),
    ("보령시", "충남"),
    ("논산시", "충남"),
    ("계룡시", "충남"),
    // 전북
    ("전주시", "전북"),
    ("군산시", "전북"),
    ("익산시", "전북"),
    ("정읍시", "전북"),
    ("남원시", "전북"),
    ("김제시", "전북"),
    // 전남
    ("목포시", "전남"),
    ("여수시", "전남"),
    ("순천시", "전남"),
    ("나주시", "전남"),
    ("광양시", "전남"),
    // 경북
    ("포항시", "경북"),
    ("경주시", "경북"),
    ("구미시", "경북"),
    ("김천시", "경북"),
    ("안동시", "경북"),
    ("경산시", "경북"),
    ("영주시", "경북"),
    ("영천시", "경북"),
    ("문경시", "경북"),
    ("상주시", "경북"),
    // 경남
    ("창원시", "경남"),
    ("진주시", "경남"),
    ("김해시", "경남"),
    ("양산시", "경남"),
    ("거제시", "경남"),
    ("통영시", "경남"),
    ("사천시", "경남"),
    ("밀양시", "경남"),
    // 제주
    ("제주시", "제주"),
    ("서귀포시", "제주"),
];

/// District names that exist identically under several provinces. These never
/// contribute to province inference on their own; they are recorded only when
/// one of their candidate parents was already confirmed for the same text.
static AMBIGUOUS_DISTRICTS: &[(&str, &[&str])] = &[
    ("중구", &["서울", "부산", "대구", "인천", "대전", "울산"]),
    ("동구", &["부산", "대구", "인천", "광주", "대전", "울산"]),
    ("서구", &["부산", "대구", "인천", "광주", "대전"]),
    ("남구", &["부산", "대구", "인천", "광주", "울산"]),
    ("북구", &["부산", "대구", "광주", "울산"]),
    ("강서구", &["서울", "부산"]),
];

/// Grammatical particles/suffixes that may legitimately follow a short (<= 2
/// syllable) region code: 서울에, 부산은, 경기도, 전북권 and the like.
static TRAILING_PARTICLES: &[char] = &[
    '시', '도', '에', '의', '은', '는', '이', '가', '을', '를', '와', '과', '로', '만', '내', '권',
];

/// Institution units that fuse directly onto a leading short province code in
/// organization names (경기신용보증재단, 전북테크노파크, ...).
static FUSED_ORG_UNITS: &[&str] = &[
    "신용보증재단",
    "신보",
    "테크노파크",
    "경제진흥원",
    "경제통상진흥원",
    "일자리재단",
    "창조경제혁신센터",
    "지방중소벤처기업청",
    "중소벤처기업청",
];

static NATIONWIDE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"전\s*국|전지역|지역\s*(제한|무관)|제한\s*없").expect("static regex"));

/// Resolver output. Both sets use canonical names from the dictionaries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedRegions {
    pub regions: BTreeSet<String>,
    pub sub_regions: BTreeSet<String>,
}

fn is_hangul_syllable(c: char) -> bool {
    ('\u{AC00}'..='\u{D7A3}').contains(&c)
}

/// Word-boundary test for a dictionary hit at byte offset `idx`.
///
/// A hit is valid when the preceding character is not a Hangul syllable
/// (rejects 대구 inside 해운대구), and, for needles of at most two syllables,
/// the following character is absent, non-Hangul, or a known particle
/// (rejects 경기 inside 경기침체, 대전 inside 대전환).
fn boundary_ok(text: &str, idx: usize, needle: &str) -> bool {
    if let Some(prev) = text[..idx].chars().next_back() {
        if is_hangul_syllable(prev) {
            return false;
        }
    }
    if needle.chars().count() <= 2 {
        match text[idx + needle.len()..].chars().next() {
            None => true,
            Some(next) if !is_hangul_syllable(next) => true,
            Some(next) => TRAILING_PARTICLES.contains(&next),
        }
    } else {
        true
    }
}

/// True if `needle` occurs anywhere in `text` as a standalone word.
fn has_standalone(text: &str, needle: &str) -> bool {
    text.match_indices(needle)
        .any(|(idx, _)| boundary_ok(text, idx, needle))
}

/// True if the text explicitly declares nationwide applicability
/// (전국, 전지역, 지역 제한 없음, ...).
pub fn is_nationwide(text: &str) -> bool {
    NATIONWIDE.is_match(text)
}

/// Insert a boundary space after a leading short province code in fused
/// organization names, so 경기신용보증재단 resolves 경기 the same way free
/// text would. Names without a recognized fused unit pass through unchanged.
pub fn preprocess_organization(name: &str) -> String {
    let trimmed = name.trim();
    for (code, _) in PROVINCE_VARIANTS {
        if let Some(rest) = trimmed.strip_prefix(code) {
            if FUSED_ORG_UNITS.iter().any(|unit| rest.starts_with(unit)) {
                return format!("{} {}", code, rest);
            }
        }
    }
    trimmed.to_string()
}

/// Resolve every province and district named in `text`.
///
/// Never fails; unmatched text yields empty sets, and an explicit nationwide
/// phrase short-circuits to empty sets (no geographic restriction).
pub fn resolve(text: &str) -> ResolvedRegions {
    if text.is_empty() || is_nationwide(text) {
        return ResolvedRegions::default();
    }

    let mut regions: BTreeSet<String> = BTreeSet::new();
    let mut sub_regions: BTreeSet<String> = BTreeSet::new();

    for (canonical, variants) in PROVINCE_VARIANTS {
        for variant in *variants {
            if has_standalone(text, variant) {
                regions.insert((*canonical).to_string());
                break;
            }
        }
    }

    // Unambiguous districts carry their parent province with them.
    for (district, parent) in DISTRICT_PARENTS {
        if has_standalone(text, district) {
            regions.insert((*parent).to_string());
            sub_regions.insert((*district).to_string());
        }
    }

    // Generic ward names only count once their parent is already confirmed.
    for (district, parents) in AMBIGUOUS_DISTRICTS {
        if has_standalone(text, district) && parents.iter().any(|p| regions.contains(*p)) {
            sub_regions.insert((*district).to_string());
        }
    }

    ResolvedRegions {
        regions,
        sub_regions,
    }
}
