// Criterion benchmarks for Coach Engine

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use coach_engine::core::{extract_array, match_quality, TemplateMatcher};
use coach_engine::models::{CatalogKind, Category, ClientProfile, Template};

const FOCUS: [&str; 4] = ["Hypertrophy", "Fat Loss", "General Fitness", "Powerlifting"];
const LEVELS: [&str; 3] = ["beginner", "intermediate", "advanced"];

fn create_category(id: usize) -> Category {
    Category {
        id: format!("c{}", id),
        name: format!("{} Block {}", FOCUS[id % FOCUS.len()], id),
        description: Some(format!("Programs for {} lifters", LEVELS[id % LEVELS.len()])),
        target_profile: None,
        criteria: vec!["gym".to_string()],
    }
}

fn create_template(id: usize, category_count: usize) -> Template {
    Template {
        id: format!("t{}", id),
        category_id: format!("c{}", id % category_count),
        name: format!("{} Day Plan {}", 2 + id % 5, id),
        description: None,
        difficulty: Some(LEVELS[id % LEVELS.len()].to_string()),
        days_per_week: Some(2 + (id % 5) as u8),
        equipment: vec!["dumbbells".to_string(), "barbell".to_string()],
        session_minutes: Some(30 + (id % 4) as u16 * 15),
        calorie_min: None,
        calorie_max: None,
        protein_target_g: None,
        tags: vec![],
    }
}

fn create_profile() -> ClientProfile {
    ClientProfile {
        experience_level: Some("Intermediate".to_string()),
        goal: Some("Build muscle".to_string()),
        training_days_per_week: Some(4),
        equipment: Some(vec!["Dumbbells".to_string(), "Bench".to_string()]),
        training_style: Some("Powerlifting".to_string()),
        session_length: Some("1 hour".to_string()),
        injuries: Some("none".to_string()),
        ..Default::default()
    }
}

fn truncated_payload(elements: usize) -> String {
    let mut raw = String::from("```json\n[");
    for i in 0..elements {
        raw.push_str(&format!(
            r#"{{"caption":"Day {} {{push}} \"heavy\"","tags":["strength","gym"]}},"#,
            i
        ));
    }
    raw.push_str(r#"{"caption":"cut off mid"#);
    raw
}

fn bench_match_quality(c: &mut Criterion) {
    c.bench_function("match_quality", |b| {
        b.iter(|| match_quality(black_box(72)));
    });
}

fn bench_score_categories(c: &mut Criterion) {
    let matcher = TemplateMatcher::with_default_weights();
    let profile = create_profile();

    let mut group = c.benchmark_group("score_categories");

    for category_count in [10, 50, 100, 500].iter() {
        let categories: Vec<Category> = (0..*category_count).map(create_category).collect();

        group.bench_with_input(
            BenchmarkId::new("workout", category_count),
            category_count,
            |b, _| {
                b.iter(|| {
                    matcher.score_categories(
                        black_box(&profile),
                        black_box(&categories),
                        CatalogKind::Workout,
                    )
                });
            },
        );
    }

    group.finish();
}

fn bench_recommend(c: &mut Criterion) {
    let matcher = TemplateMatcher::with_default_weights();
    let profile = create_profile();
    let categories: Vec<Category> = (0..20).map(create_category).collect();
    let templates: Vec<Template> = (0..400).map(|i| create_template(i, 20)).collect();

    c.bench_function("recommend_20_categories_400_templates", |b| {
        b.iter(|| matcher.recommend(black_box(&profile), black_box(&categories), black_box(&templates)));
    });
}

fn bench_extract_array(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_array");

    for element_count in [10, 100, 1000].iter() {
        let truncated = truncated_payload(*element_count);
        let complete = format!("{}]", truncated.trim_end_matches(r#"{"caption":"cut off mid"#).trim_end_matches(','));

        group.bench_with_input(
            BenchmarkId::new("complete", element_count),
            element_count,
            |b, _| {
                b.iter(|| extract_array(black_box(&complete)));
            },
        );

        group.bench_with_input(
            BenchmarkId::new("truncated", element_count),
            element_count,
            |b, _| {
                b.iter(|| extract_array(black_box(&truncated)));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_match_quality,
    bench_score_categories,
    bench_recommend,
    bench_extract_array
);

criterion_main!(benches);
