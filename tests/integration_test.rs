// Integration tests for schemefit
use schemefit::{
    recommend, Catalog, Error, Level, MatchQuality, MatchResult, ModelStore, RankingEngine,
    RecommendationPolicy, SchemeRecord, SocialCategory, StorageError, UserProfile,
};
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

const CATALOG_CSV: &str = "\
scheme_name,slug,details,benefits,eligibility,level,schemeCategory
Old Age Pension,old-age-pension,Pension for senior citizens,Monthly pension of Rs 1000 for elderly persons,Senior citizens aged 60 years and above from BPL households,Central,Social welfare & Empowerment
PM Kisan,pm-kisan,Income support for farmers,Rs 6000 per year to farmer families,Small and marginal farmers owning cultivable agricultural land,Central,\"Agriculture,Rural & Environment\"
Mahila Shakti,mahila-shakti,Support for women,Skill training and loans for women and girls,\"Women, girl and widow applicants, mahila self help groups\",State,Women and Child
Yuva Kaushal,yuva-kaushal,Skilling for youth,Free vocational training and stipend,Young unemployed graduates between 18-35 years,State,Skills & Employment
Blank Scheme,blank-scheme,Has no eligibility,Nothing,,Central,Misc
";

fn catalog_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn engine() -> RankingEngine {
    let file = catalog_file(CATALOG_CSV);
    let catalog = Catalog::from_path(file.path()).unwrap();
    RankingEngine::new(catalog).unwrap()
}

fn senior(age: u32, income: f64) -> UserProfile {
    UserProfile {
        age,
        income,
        occupation: "Retired".to_string(),
        category: SocialCategory::General,
        location: "Delhi".to_string(),
        education: "High School".to_string(),
        family_size: 2,
        years_experience: 30,
    }
}

fn pension_index(engine: &RankingEngine) -> usize {
    engine
        .catalog()
        .iter()
        .position(|s| s.name == "Old Age Pension")
        .unwrap()
}

#[test]
fn test_catalog_loading_skips_blank_eligibility() {
    let engine = engine();
    assert_eq!(engine.total_schemes(), 4);
    assert_eq!(engine.catalog().skipped(), 1);

    let kisan = engine.catalog().iter().find(|s| s.slug == "pm-kisan").unwrap();
    assert_eq!(kisan.category, "Agriculture,Rural & Environment");
    assert_eq!(kisan.level, Level::Central);
}

#[test]
fn test_missing_column_is_reported() {
    let file = catalog_file("scheme_name,slug,level\nA,a,Central\n");
    match Catalog::from_path(file.path()) {
        Err(Error::MissingColumn(column)) => assert_eq!(column, "schemeCategory"),
        other => panic!("expected MissingColumn, got {other:?}"),
    }
}

#[test]
fn test_catalog_without_usable_rows() {
    let file = catalog_file(
        "scheme_name,slug,details,benefits,eligibility,level,schemeCategory\n\
         A,a,d,b,,Central,c\n,b,d,b,e,State,c\n",
    );
    assert!(matches!(
        Catalog::from_path(file.path()),
        Err(Error::EmptyCatalog { skipped: 2 })
    ));
}

#[test]
fn test_senior_low_income_ranks_pension_first() {
    let engine = engine();
    let results = engine.rank(&senior(67, 80_000.0), 10, 0.0);

    assert_eq!(results.len(), 4);
    let top = &results[0];
    assert_eq!(top.scheme_name, "Old Age Pension");
    // senior age boost stacked with the low-income boost
    assert!((top.breakdown.boost - 1.5 * 1.4).abs() < 1e-12);
    assert!(top.eligible);
    assert!(matches!(
        top.match_quality,
        MatchQuality::Excellent | MatchQuality::VeryGood
    ));
}

#[test]
fn test_women_profile_ranks_women_scheme_first() {
    let engine = engine();
    let profile = UserProfile {
        age: 40,
        income: 250_000.0,
        category: SocialCategory::Women,
        ..Default::default()
    };
    let results = engine.rank(&profile, 4, 0.0);
    assert_eq!(results[0].scheme_name, "Mahila Shakti");
    assert_eq!(results[0].breakdown.boost, 1.0);
}

fn record(name: &str, eligibility: &str, benefits: &str, category: &str) -> SchemeRecord {
    SchemeRecord {
        name: name.to_string(),
        slug: name.to_lowercase().replace(' ', "-"),
        level: "State".to_string(),
        category: category.to_string(),
        eligibility: eligibility.to_string(),
        benefits: benefits.to_string(),
        details: format!("{name} scheme"),
    }
}

fn position(results: &[MatchResult], name: &str) -> usize {
    results.iter().position(|r| r.scheme_name == name).unwrap()
}

#[test]
fn test_senior_pension_outranks_student_scholarship() {
    let catalog = Catalog::from_schemes(vec![
        record(
            "Student Scholarship",
            "student scholarship for undergraduate",
            "Tuition fee support",
            "Education & Learning",
        ),
        record(
            "Senior Pension",
            "senior citizen pension 60 years",
            "Monthly pension",
            "Social welfare & Empowerment",
        ),
    ])
    .unwrap();
    let engine = RankingEngine::new(catalog).unwrap();

    let profile = UserProfile {
        age: 65,
        income: 80_000.0,
        occupation: "Retired".to_string(),
        category: SocialCategory::General,
        location: "Maharashtra".to_string(),
        education: "Graduate".to_string(),
        family_size: 2,
        years_experience: 40,
    };
    let results = engine.rank(&profile, 10, 0.0);

    assert_eq!(results[0].scheme_name, "Senior Pension");
    assert!(position(&results, "Senior Pension") < position(&results, "Student Scholarship"));
    assert_eq!(results[0].breakdown.boost, 1.5);
    assert!(results[0].breakdown.eligibility > results[1].breakdown.eligibility);
}

#[test]
fn test_women_empowerment_outranks_identical_scheme() {
    let base = "Residents with a valid bank account seeking self employment support";
    let catalog = Catalog::from_schemes(vec![
        record(
            "Self Employment Plain",
            base,
            "Seed capital and training",
            "Skills & Employment",
        ),
        record(
            "Self Employment Women",
            &format!("{base} with focus on women empowerment"),
            "Seed capital and training",
            "Skills & Employment",
        ),
        record(
            "Kisan Support",
            "Small and marginal farmers owning cultivable land",
            "Income support to farmer families",
            "Agriculture,Rural & Environment",
        ),
    ])
    .unwrap();
    let engine = RankingEngine::new(catalog).unwrap();

    let profile = UserProfile {
        age: 30,
        income: 250_000.0,
        occupation: "Self Employed".to_string(),
        category: SocialCategory::Women,
        location: "Karnataka".to_string(),
        education: "Graduate".to_string(),
        family_size: 3,
        years_experience: 5,
    };
    let results = engine.rank(&profile, 10, 0.0);

    let women = &results[position(&results, "Self Employment Women")];
    let plain = &results[position(&results, "Self Employment Plain")];
    assert!(position(&results, "Self Employment Women") < position(&results, "Self Employment Plain"));
    assert!(women.similarity_score > plain.similarity_score);
    assert_eq!(women.breakdown.boost, plain.breakdown.boost);
    assert_eq!(women.breakdown.benefits, plain.breakdown.benefits);
}

#[test]
fn test_senior_boost_starts_at_sixty() {
    let engine = engine();
    let pension = pension_index(&engine);

    let at_sixty = engine.score_all(&senior(60, 150_000.0));
    let below = engine.score_all(&senior(59, 150_000.0));

    assert_eq!(at_sixty[pension].boost, 1.5);
    assert_eq!(below[pension].boost, 1.0);
}

#[test]
fn test_income_boost_is_strictly_below_threshold() {
    let engine = engine();
    let pension = pension_index(&engine);

    let at_threshold = engine.score_all(&senior(67, 100_000.0));
    let just_below = engine.score_all(&senior(67, 99_999.0));

    assert_eq!(at_threshold[pension].boost, 1.5);
    assert!((just_below[pension].boost - 2.1).abs() < 1e-12);
}

#[test]
fn test_ranking_invariants() {
    let engine = engine();
    let profiles = [
        senior(67, 80_000.0),
        UserProfile {
            age: 22,
            income: 40_000.0,
            occupation: "Student".to_string(),
            category: SocialCategory::SC,
            education: "Graduate".to_string(),
            ..Default::default()
        },
        UserProfile::default(),
    ];

    for profile in &profiles {
        let results = engine.rank(profile, 10, 0.0);
        assert_eq!(results.len(), engine.total_schemes());

        for pair in results.windows(2) {
            assert!(pair[0].similarity_score >= pair[1].similarity_score);
        }
        for r in &results {
            assert!((35.0..=98.0).contains(&r.probability));
            assert_eq!(r.eligible, r.probability >= 70.0);
            assert!(r.similarity_score >= 0.0);
        }
    }
}

#[test]
fn test_rank_is_deterministic() {
    let engine = engine();
    let profile = senior(70, 30_000.0);
    let first = engine.rank(&profile, 10, 0.0);
    let second = engine.rank(&profile, 10, 0.0);

    let ids = |rs: &[MatchResult]| rs.iter().map(|r| r.scheme_id).collect::<Vec<_>>();
    assert_eq!(ids(&first), ids(&second));
    for (a, b) in first.iter().zip(&second) {
        assert_eq!(a.probability, b.probability);
    }
}

#[test]
fn test_min_confidence_keeps_a_prefix() {
    let engine = engine();
    let profile = senior(67, 80_000.0);
    let all = engine.rank(&profile, 10, 0.0);
    let strict = engine.rank(&profile, 10, 60.0);

    assert!(strict.len() <= all.len());
    assert!(strict.iter().all(|r| r.probability >= 60.0));
    for (kept, original) in strict.iter().zip(&all) {
        assert_eq!(kept.scheme_id, original.scheme_id);
    }
    assert!(engine.rank(&profile, 0, 0.0).is_empty());
}

#[test]
fn test_recommend_falls_back_when_nothing_clears_the_bar() {
    let engine = engine();
    let policy = RecommendationPolicy {
        primary_top_n: 500,
        primary_min_confidence: 99.0,
        fallback_top_n: 2,
        fallback_min_confidence: 0.0,
    };
    let recommendation = recommend(&engine, &senior(67, 80_000.0), &policy);

    assert!(recommendation.used_fallback);
    assert_eq!(recommendation.results.len(), 2);
    assert_eq!(recommendation.summary.results_count, 2);
    assert_eq!(recommendation.summary.total_schemes, 4);
}

#[test]
fn test_model_store_roundtrip() {
    let dir = TempDir::new().unwrap();
    let store = ModelStore::new(dir.path()).unwrap();
    assert!(!store.exists());

    let engine = engine();
    let metadata = store.save(&engine).unwrap();
    assert!(store.exists());
    assert_eq!(metadata.total_schemes, 4);

    let loaded = store.load().unwrap();
    let profile = senior(67, 80_000.0);
    let before = engine.rank(&profile, 10, 0.0);
    let after = loaded.rank(&profile, 10, 0.0);

    assert_eq!(before.len(), after.len());
    for (a, b) in before.iter().zip(&after) {
        assert_eq!(a.scheme_id, b.scheme_id);
        assert_eq!(a.probability, b.probability);
    }
}

#[test]
fn test_model_store_detects_corruption() {
    let dir = TempDir::new().unwrap();
    let store = ModelStore::new(dir.path()).unwrap();
    store.save(&engine()).unwrap();

    let model = dir.path().join("model.bin.gz");
    let mut bytes = std::fs::read(&model).unwrap();
    let last = bytes.len() - 1;
    bytes[last] ^= 0xff;
    std::fs::write(&model, bytes).unwrap();

    assert!(matches!(
        store.load(),
        Err(StorageError::ChecksumMismatch { .. })
    ));
}
