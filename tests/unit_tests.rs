// Public-API tests for the extraction and matching pipeline

use jiwon_algo::core::scoring::score_range;
use jiwon_algo::core::{MatchPolicy, Matcher};
use jiwon_algo::models::{
    BusinessProfile, ExtractionResult, PersonalProfile, Program, RegionScope, ServiceType, Tier,
    UserProfile,
};
use jiwon_algo::{extract, extract_program, RawProgramText};

fn business_profile(region: &str, employee_count: u32) -> UserProfile {
    UserProfile::Business(BusinessProfile {
        business_type: "제조업".to_string(),
        region: region.to_string(),
        sub_region: None,
        employee_count,
        annual_revenue: 500_000_000,
        business_age_months: 24,
        founder_age: 35,
    })
}

fn personal_profile(region: &str) -> UserProfile {
    UserProfile::Personal(PersonalProfile {
        age_group: "20대".to_string(),
        region: region.to_string(),
        sub_region: None,
        household_type: "1인".to_string(),
        income_level: "중위100이하".to_string(),
        employment_status: "구직자".to_string(),
        interest_categories: vec!["취업".to_string()],
    })
}

fn program(id: &str, org: &str, service_type: ServiceType, extraction: ExtractionResult) -> Program {
    Program {
        id: id.to_string(),
        title: format!("program {id}"),
        organization: org.to_string(),
        category: "취업".to_string(),
        service_type,
        start_date: None,
        end_date: None,
        is_active: true,
        detail_url: None,
        extraction,
    }
}

fn extracted(texts: &[&str], title: Option<&str>, org: Option<&str>) -> ExtractionResult {
    extract(texts, title, org)
}

#[test]
fn test_embedded_province_not_resolved() {
    // 해운대구 contains 대구; 경기침체 contains 경기; 대전환 contains 대전
    let result = extract(&["해운대구 청소년 장학금"], None, None);
    assert!(result.regions.contains("부산"));
    assert!(!result.regions.contains("대구"));

    let result = extract(&["경기침체 극복 지원"], None, None);
    assert!(result.regions.is_empty());

    let result = extract(&["대전환 시대의 창업"], None, None);
    assert!(!result.regions.contains("대전"));
}

#[test]
fn test_sub_regions_always_have_parent_province() {
    let samples = [
        "해운대구 소상공인 지원",
        "성남시 청년 정책",
        "수원시 및 용인시 거주자",
        "서울 강남구, 부산 사하구 대상",
    ];
    for text in samples {
        let result = extract(&[text], None, None);
        assert!(
            result.sub_regions.is_empty() || !result.regions.is_empty(),
            "sub-regions without a parent province in {text}"
        );
    }
    // and the parent is the right one
    let result = extract(&["해운대구 소상공인 지원"], None, None);
    assert_eq!(result.regions.iter().collect::<Vec<_>>(), vec!["부산"]);
}

#[test]
fn test_extraction_idempotent() {
    let raw = RawProgramText {
        title: Some("부산 해운대구 청년창업 지원".to_string()),
        organization: Some("부산테크노파크".to_string()),
        eligibility_text: Some("만 39세 이하, 창업 7년 이내, 연매출 10억원 이하".to_string()),
        exclusion_text: None,
        preference_text: None,
    };
    assert_eq!(extract_program(&raw), extract_program(&raw));
}

#[test]
fn test_range_score_single_bound_decay() {
    // employeeMax=50, fallback=10, user=60: 1 - 10/max(50,10) = 0.8
    let score = score_range(None, Some(50.0), 60.0, 10.0);
    assert!((score - 0.8).abs() < 1e-9);

    // monotonic decay away from the bound
    let mut prev = f64::MAX;
    for value in [50.0, 60.0, 70.0, 80.0, 200.0] {
        let score = score_range(None, Some(50.0), value, 10.0);
        assert!(score <= prev);
        prev = score;
    }
}

#[test]
fn test_knockout_scenario_loose_ceiling() {
    let matcher = Matcher::default();
    let extraction = extracted(&["근로자 10명 이하 기업"], None, None);
    assert_eq!(extraction.employee_max, Some(10));

    let programs = vec![program("a", "org", ServiceType::Business, extraction)];
    // 16 > 10 * 1.5: knocked out
    let result = matcher.match_programs(&programs, &business_profile("서울", 16));
    assert_eq!(result.knocked_out, 1);
    // 15 survives
    let result = matcher.match_programs(&programs, &business_profile("서울", 15));
    assert_eq!(result.knocked_out, 0);
}

#[test]
fn test_national_program_never_knocked_out_on_geography() {
    let matcher = Matcher::default();
    let extraction = extracted(&["전국 중소기업 대상"], None, Some("중소벤처기업부"));
    assert_eq!(extraction.region_scope, RegionScope::National);
    assert!(extraction.regions.is_empty());

    let programs = vec![program("a", "중소벤처기업부", ServiceType::Business, extraction)];
    for region in ["서울", "부산", "제주"] {
        let result = matcher.match_programs(&programs, &business_profile(region, 10));
        assert_eq!(result.knocked_out, 0);
        let scored = &result.all[0];
        let region_score = scored.breakdown["region"];
        assert!(region_score > 0.0 && region_score < 1.0);
    }
}

#[test]
fn test_regional_mismatch_knocked_out_end_to_end() {
    let matcher = Matcher::default();
    let extraction = extracted(&["부산광역시 거주 청년"], None, Some("부산광역시"));
    assert_eq!(extraction.region_scope, RegionScope::Regional);

    let programs = vec![program("a", "부산광역시", ServiceType::Personal, extraction)];
    let result = matcher.match_programs(&programs, &personal_profile("서울"));
    assert_eq!(result.knocked_out, 1);

    let result = matcher.match_programs(&programs, &personal_profile("부산"));
    assert_eq!(result.knocked_out, 0);
}

#[test]
fn test_service_type_filter_unknown_passes() {
    let matcher = Matcher::default();
    let extraction = extracted(&["전국 어디서나"], None, None);
    let programs = vec![
        program("biz", "org1", ServiceType::Business, extraction.clone()),
        program("unk", "org2", ServiceType::Unknown, extraction),
    ];
    let result = matcher.match_programs(&programs, &personal_profile("서울"));
    assert_eq!(result.filtered_by_service_type, 1);
    assert!(result.all.iter().all(|s| s.program.id != "biz"));
}

#[test]
fn test_org_diversity_and_total_cap() {
    let matcher = Matcher::default();
    let extraction = ExtractionResult {
        regions: ["서울".to_string()].into(),
        business_types: ["제조업".to_string()].into(),
        employee_max: Some(50),
        business_age_max_months: Some(84),
        confidence: extract(&["서울 제조업 50인 이하 창업 7년 이내"], None, None).confidence,
        region_scope: RegionScope::Regional,
        ..Default::default()
    };

    let programs: Vec<Program> = (0..300)
        .map(|i| {
            program(
                &format!("p{i}"),
                &format!("org{}", i % 10),
                ServiceType::Business,
                extraction.clone(),
            )
        })
        .collect();
    let result = matcher.match_programs(&programs, &business_profile("서울", 10));

    assert!(result.all.len() <= 70);
    for tier in [&result.tailored, &result.recommended, &result.exploratory] {
        for org in tier.iter().map(|s| &s.program.organization) {
            let count = tier.iter().filter(|s| &s.program.organization == org).count();
            assert!(count <= 3, "org {org} appears {count} times in one tier");
        }
    }
}

#[test]
fn test_tier_thresholds_monotonic() {
    let matcher = Matcher::new(MatchPolicy::default());
    let strong = extracted(
        &["서울 제조업, 상시근로자 50인 이하, 창업 7년 이내, 만 39세 이하"],
        None,
        Some("서울산업진흥원"),
    );
    let weak = extracted(&["상세 내용은 공고 참조"], None, None);

    let programs = vec![
        program("strong", "org1", ServiceType::Business, strong),
        program("weak", "org2", ServiceType::Business, weak),
    ];
    let result = matcher.match_programs(&programs, &business_profile("서울", 10));

    let tier_of = |id: &str| {
        result
            .all
            .iter()
            .find(|s| s.program.id == id)
            .map(|s| s.tier)
    };
    assert_eq!(tier_of("strong"), Some(Tier::Tailored));
    // weak program has at most the unknown-scope region dimension
    assert!(matches!(tier_of("weak"), None | Some(Tier::Exploratory)));
}

#[test]
fn test_matching_deterministic_across_calls() {
    let matcher = Matcher::default();
    let texts: Vec<ExtractionResult> = (0..50)
        .map(|i| {
            extracted(
                &[&format!("서울 거주 만 {}세 이하 청년", 30 + (i % 10))],
                None,
                None,
            )
        })
        .collect();
    let programs: Vec<Program> = texts
        .into_iter()
        .enumerate()
        .map(|(i, e)| program(&format!("p{i}"), &format!("org{i}"), ServiceType::Personal, e))
        .collect();

    let profile = personal_profile("서울");
    let first = matcher.match_programs(&programs, &profile);
    let second = matcher.match_programs(&programs, &profile);
    let ids = |r: &jiwon_algo::MatchResult| {
        r.all
            .iter()
            .map(|s| (s.program.id.clone(), s.score))
            .collect::<Vec<_>>()
    };
    assert_eq!(ids(&first), ids(&second));
}

#[test]
fn test_empty_corpus() {
    let matcher = Matcher::default();
    let result = matcher.match_programs(&[], &personal_profile("서울"));
    assert_eq!(result.total_analyzed, 0);
    assert!(result.all.is_empty());
}
