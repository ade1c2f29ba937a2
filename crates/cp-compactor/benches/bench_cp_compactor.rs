use cp_compactor::{Compressor, CompressorConfig, QualityMetrics, StatisticalFilter};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn generate_text(size_kb: usize) -> String {
    let base = "The quick brown fox jumps over the lazy dog. This is a test sentence for benchmarking prompt compression. \
        We need realistic content that includes repetition, technical terms like getUserData and src/main.rs, \
        and natural language patterns. Do not drop negations, and keep the Vectorizer domain term intact. \
        ```rust\nfn main() { println!(\"hi\"); }\n``` The config {\"key\": \"value\"} stays verbatim. ";
    let mut text = String::with_capacity(size_kb * 1024);
    while text.len() < size_kb * 1024 {
        text.push_str(base);
    }
    text.truncate(size_kb * 1024);
    text
}

fn bench_compress(c: &mut Criterion) {
    let config = CompressorConfig::default().with_min_input_bytes(100).with_min_input_tokens(10);
    for &(name, ratio) in &[("r30", 0.3), ("r50", 0.5), ("r70", 0.7)] {
        let compressor = Compressor::new(config.clone().with_target_ratio(ratio));
        for kb in [1, 10, 100] {
            let text = generate_text(kb);
            c.bench_function(&format!("compress_{name}_{kb}kb"), |b| {
                b.iter(|| black_box(compressor.compress(black_box(&text))))
            });
        }
    }
}

fn bench_score_words(c: &mut Criterion) {
    let filter = StatisticalFilter::default();
    let text_10k = generate_text(10);
    c.bench_function("score_words_10kb", |b| {
        b.iter(|| black_box(filter.score_words(black_box(&text_10k)).len()))
    });
}

fn bench_quality(c: &mut Criterion) {
    let filter = StatisticalFilter::default();
    let text_10k = generate_text(10);
    let compressed = filter.compress(&text_10k);
    c.bench_function("quality_metrics_10kb", |b| {
        b.iter(|| black_box(QualityMetrics::calculate(black_box(&text_10k), black_box(&compressed))))
    });
}

criterion_group!(benches, bench_compress, bench_score_words, bench_quality);
criterion_main!(benches);
