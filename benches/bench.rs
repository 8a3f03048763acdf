// Criterion benchmarks for jiwon-algo

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use jiwon_algo::core::Matcher;
use jiwon_algo::models::{BusinessProfile, Program, ServiceType, UserProfile};
use jiwon_algo::{extract, extract_program, RawProgramText};

const SAMPLE_TEXTS: &[&str] = &[
    "서울특별시 소재 소상공인, 창업 7년 이내, 만 39세 이하 대표자",
    "부산 해운대구 거주 청년, 만 19세 이상 34세 이하, 중위소득 100% 이하",
    "전국 중소기업 대상, 상시근로자 300인 이하, 연매출 150억원 이하",
    "경기도 성남시 예비창업자 및 초기창업기업, 기술보증 지원",
    "한부모 가정 및 다자녀 가구 대상 주거 안정 월세 지원",
    "대전광역시 제조업 영위 기업, 업력 3년 이상 7년 이하",
];

fn sample_raw(i: usize) -> RawProgramText {
    RawProgramText {
        title: Some(format!("지원사업 {i}")),
        organization: Some(
            ["중소벤처기업부", "서울산업진흥원", "부산테크노파크", "경기신용보증재단"]
                [i % 4]
                .to_string(),
        ),
        eligibility_text: Some(SAMPLE_TEXTS[i % SAMPLE_TEXTS.len()].to_string()),
        exclusion_text: None,
        preference_text: Some("청년 우대".to_string()),
    }
}

fn sample_corpus(size: usize) -> Vec<Program> {
    (0..size)
        .map(|i| {
            let raw = sample_raw(i);
            Program {
                id: format!("p{i}"),
                title: raw.title.clone().unwrap_or_default(),
                organization: raw.organization.clone().unwrap_or_default(),
                category: "취업".to_string(),
                service_type: ServiceType::Both,
                start_date: None,
                end_date: None,
                is_active: true,
                detail_url: None,
                extraction: extract_program(&raw),
            }
        })
        .collect()
}

fn business_profile() -> UserProfile {
    UserProfile::Business(BusinessProfile {
        business_type: "제조업".to_string(),
        region: "서울".to_string(),
        sub_region: Some("강남구".to_string()),
        employee_count: 8,
        annual_revenue: 700_000_000,
        business_age_months: 30,
        founder_age: 36,
    })
}

fn bench_extraction(c: &mut Criterion) {
    c.bench_function("extract_single_record", |b| {
        let raw = sample_raw(0);
        b.iter(|| extract_program(black_box(&raw)));
    });

    c.bench_function("geography_resolution", |b| {
        b.iter(|| {
            extract(
                black_box(&["부산 해운대구 및 경기도 성남시 거주자, 경기침체 대응"]),
                None,
                None,
            )
        });
    });
}

fn bench_matching(c: &mut Criterion) {
    let matcher = Matcher::default();
    let profile = business_profile();

    let mut group = c.benchmark_group("match_programs");
    for size in [100, 1000, 5000] {
        let corpus = sample_corpus(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &corpus, |b, corpus| {
            b.iter(|| matcher.match_programs(black_box(corpus), black_box(&profile)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_extraction, bench_matching);
criterion_main!(benches);
