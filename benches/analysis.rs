use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use sentiment_service::sentiment::{
    analyze_contextual, analyze_keywords, AnalysisMethod, FeatureExtractor,
    SentimentAnalyzerBuilder,
};

const REVIEW: &str = "The battery life is excellent and the screen is beautiful, \
                      but the speakers are really disappointing!";

fn bench_feature_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_input_size");

    for size in [32, 128, 512] {
        let extractor = FeatureExtractor::new(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &REVIEW, |b, text| {
            b.iter(|| extractor.extract(black_box(text)))
        });
    }
    group.finish();
}

fn bench_keywords(c: &mut Criterion) {
    c.bench_function("keywords_review", |b| {
        b.iter(|| analyze_keywords(black_box(REVIEW)))
    });
}

fn bench_keywords_text_length(c: &mut Criterion) {
    let mut group = c.benchmark_group("keywords_text_length");

    for repeats in [1, 10, 100] {
        let text = REVIEW.repeat(repeats);
        group.bench_with_input(BenchmarkId::from_parameter(repeats), &text, |b, text| {
            b.iter(|| analyze_keywords(black_box(text)))
        });
    }
    group.finish();
}

fn bench_contextual(c: &mut Criterion) {
    c.bench_function("contextual_review", |b| {
        b.iter(|| analyze_contextual(black_box(REVIEW)))
    });
}

fn bench_cached_analysis(c: &mut Criterion) {
    let analyzer = SentimentAnalyzerBuilder::new().heuristic_only().build();
    analyzer.analyze(REVIEW, AnalysisMethod::Auto);

    c.bench_function("analyze_cache_hit", |b| {
        b.iter(|| analyzer.analyze(black_box(REVIEW), AnalysisMethod::Auto))
    });
}

criterion_group!(
    benches,
    bench_feature_sizes,
    bench_keywords,
    bench_keywords_text_length,
    bench_contextual,
    bench_cached_analysis,
);
criterion_main!(benches);
