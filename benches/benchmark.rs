// Performance benchmarks for the TenderX engine
use chrono::{Duration, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;
use tenderx_core::{Document, Query, SimilarityIndex, VectorCache, Vectorizer};
use tenderx_similarity::{Preference, RecommendationRanker, TrendingAggregator};

const WORDS: &[&str] = &[
    "road", "bridge", "construction", "kubernetes", "cloud", "migration", "software", "licence",
    "furniture", "supply", "office", "medical", "equipment", "laboratory", "reagents", "security",
    "audit", "cleaning", "services", "catering", "transport", "fleet", "maintenance", "solar",
    "energy", "water", "drilling", "consultancy", "training", "printing",
];

const CATEGORIES: &[&str] = &["it_software", "construction", "office_supplies", "health", "energy"];

fn generate_text(rng: &mut impl Rng, words: usize) -> String {
    (0..words)
        .map(|_| WORDS[rng.random_range(0..WORDS.len())])
        .collect::<Vec<_>>()
        .join(" ")
}

fn generate_pool(size: usize) -> Vec<Document> {
    let mut rng = rand::rng();
    let now = Utc::now();
    (0..size)
        .map(|i| {
            Document::tender(i as u64, generate_text(&mut rng, 40), now - Duration::hours(rng.random_range(0..2000)))
                .with_category(CATEGORIES[rng.random_range(0..CATEGORIES.len())])
                .with_value(rng.random_range(1_000.0..500_000.0))
                .with_view_count(rng.random_range(0..1000))
        })
        .collect()
}

fn benchmark_vectorize(c: &mut Criterion) {
    let mut group = c.benchmark_group("vectorize");
    let mut rng = rand::rng();

    for words in [10, 100, 1000].iter() {
        let text = generate_text(&mut rng, *words);
        group.bench_with_input(BenchmarkId::new("uncached", words), &text, |b, text| {
            let vectorizer = Vectorizer::default();
            b.iter(|| black_box(vectorizer.vectorize(black_box(text))));
        });
        group.bench_with_input(BenchmarkId::new("cached", words), &text, |b, text| {
            let vectorizer = Vectorizer::default().with_cache(Arc::new(VectorCache::new()));
            b.iter(|| black_box(vectorizer.vectorize(black_box(text))));
        });
    }

    group.finish();
}

fn benchmark_find_similar(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_similar");
    let vectorizer = Vectorizer::default();
    let index = SimilarityIndex::new();

    for size in [100, 1000, 10000].iter() {
        let pool: Vec<Document> = generate_pool(*size)
            .into_iter()
            .map(|d| {
                let v = d.vector_or_compute(&vectorizer);
                d.with_vector(v)
            })
            .collect();
        let query = pool[0].clone();

        group.bench_with_input(BenchmarkId::new("top10", size), &pool, |b, pool| {
            b.iter(|| {
                let results = index.find_similar(
                    Query::Document(black_box(&query)),
                    pool,
                    &vectorizer,
                    10,
                    &HashSet::new(),
                );
                black_box(results);
            });
        });
    }

    group.finish();
}

fn benchmark_recommend(c: &mut Criterion) {
    let mut group = c.benchmark_group("recommend");
    let pool = generate_pool(10000);
    let ranker = RecommendationRanker::new(Vectorizer::default().with_cache(Arc::new(VectorCache::new())));
    let preference = Preference::new("bench")
        .with_categories(["it_software", "construction"])
        .with_keywords(["kubernetes", "cloud", "road"])
        .with_min_match_score(30.0);

    group.bench_function("two_phase_10k", |b| {
        b.iter(|| black_box(ranker.recommend(black_box(&preference), &pool, 20)));
    });

    group.finish();
}

fn benchmark_trending(c: &mut Criterion) {
    let mut group = c.benchmark_group("trending");
    let pool = generate_pool(10000);
    let aggregator = TrendingAggregator::default();
    let (start, end) = TrendingAggregator::last_days(Utc::now(), 30).unwrap();

    group.bench_function("last_30_days_10k", |b| {
        b.iter(|| black_box(aggregator.report(&pool, start, end, 10)));
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_vectorize,
    benchmark_find_similar,
    benchmark_recommend,
    benchmark_trending
);
criterion_main!(benches);
