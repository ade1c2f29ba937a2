use cp_compactor::{
    CompressionError, Compressor, CompressorConfig, QualityMetrics, StatisticalFilter,
    StatisticalFilterConfig,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const VOCAB: &[&str] = &[
    "the", "system", "stores", "vectors", "in", "a", "compact", "index", "and", "queries",
    "them", "with", "cosine", "similarity", "Kestrel", "cluster", "replicates", "shards", "across",
    "nodes", "not", "every", "request", "is", "cached", "latency", "budget", "2048", "tokens", "of",
];

fn lenient(ratio: f64) -> CompressorConfig {
    CompressorConfig::default()
        .with_target_ratio(ratio)
        .with_min_input_bytes(100)
        .with_min_input_tokens(10)
}

fn random_document(rng: &mut StdRng, words: usize) -> String {
    let mut doc = String::new();
    for i in 0..words {
        if i > 0 {
            doc.push(if rng.gen_range(0..12) == 0 { '\n' } else { ' ' });
        }
        doc.push_str(VOCAB[rng.gen_range(0..VOCAB.len())]);
        if rng.gen_range(0..10) == 0 {
            doc.push('.');
        }
    }
    doc
}

#[test]
fn test_ratios_are_monotonic() {
    let text = "Artificial Intelligence has revolutionized many fields. Machine Learning algorithms can learn \
                from data. Deep Learning neural networks process complex patterns. Natural Language Processing \
                understands human language. "
        .repeat(20);

    let tokens: Vec<usize> = [0.3, 0.5, 0.7]
        .iter()
        .map(|&r| Compressor::new(lenient(r)).compress(&text).unwrap().compressed_tokens)
        .collect();

    assert_eq!(tokens, vec![156, 260, 364]);
}

#[test]
fn test_configured_domain_terms_survive() {
    let text = "The Kestrel engine talks to Moraine storage through the Ardent gateway, which is a fairly \
                ordinary piece of glue code that forwards requests and collects responses for later analysis. "
        .repeat(10);
    let filter = StatisticalFilterConfig::default().with_domain_terms(["Kestrel", "Moraine", "Ardent"]);
    let result = Compressor::with_filter_config(lenient(0.5), filter).compress(&text).unwrap();

    for term in ["Kestrel", "Moraine", "Ardent"] {
        assert_eq!(result.compressed.matches(term).count(), 10, "{term}");
    }
    assert!(result.compressed_tokens < result.original_tokens);
}

#[test]
fn test_negations_survive_aggressive_ratio() {
    let text = "This is not a test. You should never ignore this warning. The system will not proceed if you \
                don't confirm. This cannot be undone. We haven't seen this issue before. The data isn't available. "
        .repeat(10);
    let result = Compressor::new(lenient(0.3)).compress(&text).unwrap();
    let kept: Vec<&str> = result.compressed.split_whitespace().collect();

    for negation in ["not", "never", "don't", "cannot", "haven't", "isn't"] {
        assert!(kept.iter().any(|w| w.trim_matches('.') == negation), "{negation}");
    }
}

#[test]
fn test_code_block_kept_verbatim() {
    let block = "```rust\nfn main() {\n    let x = 42;\n    println!(\"{x}\");\n}\n```";
    let text = format!(
        "Here is an example of Rust code: {block} This code demonstrates a simple Rust program with variable \
         declaration and printing to stdout using the println macro. "
    )
    .repeat(5);
    let result = Compressor::new(lenient(0.3)).compress(&text).unwrap();
    assert_eq!(result.compressed.matches(block).count(), 5);
}

#[test]
fn test_rejections_are_specific() {
    let short = Compressor::default().compress("hello world").unwrap_err();
    assert!(matches!(short, CompressionError::InputTooShort { actual: 11, minimum: 1024, .. }));
    assert!(short.to_string().contains("bytes"));

    let text = "x ".repeat(60);
    let config = CompressorConfig::default().with_min_input_bytes(100).with_min_input_tokens(100);
    let few = Compressor::new(config).compress(&text).unwrap_err();
    assert!(matches!(few, CompressionError::InputTooShort { actual: 60, minimum: 100, .. }));
    assert!(few.to_string().contains("tokens"));
}

#[test]
fn test_random_documents_hold_invariants() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..20 {
        let words = rng.gen_range(200..600);
        let doc = random_document(&mut rng, words);
        let filter = StatisticalFilterConfig::default().with_domain_terms(["Kestrel"]);

        let mut previous = 0;
        for ratio in [0.2, 0.4, 0.6, 0.8] {
            let compressor = Compressor::with_filter_config(lenient(ratio), filter.clone());
            let result = compressor.compress(&doc).unwrap();

            assert!(result.compressed_tokens > 0);
            assert!(result.compressed_tokens < result.original_tokens);
            assert!(result.compressed_tokens >= result.protected_words);
            assert!(result.compressed_tokens >= previous);
            assert_eq!(result.tokens_removed, result.original_tokens - result.compressed_tokens);
            previous = result.compressed_tokens;

            let kept: Vec<&str> = result.compressed.split_whitespace().collect();
            let expect_not = doc.split_whitespace().filter(|w| w.trim_end_matches('.') == "not").count();
            let got_not = kept.iter().filter(|w| w.trim_end_matches('.') == "not").count();
            assert_eq!(got_not, expect_not);
            assert_eq!(result.compressed.matches("Kestrel").count(), doc.matches("Kestrel").count());
        }
    }
}

#[test]
fn test_output_words_come_from_input_in_order() {
    let mut rng = StdRng::seed_from_u64(42);
    let doc = random_document(&mut rng, 300);
    let out = StatisticalFilter::new(StatisticalFilterConfig::default().with_ratio(0.4)).compress(&doc);

    let source: Vec<&str> = doc.split_whitespace().collect();
    let mut cursor = 0;
    for word in out.split_whitespace() {
        let found = source[cursor..].iter().position(|w| *w == word);
        assert!(found.is_some(), "{word} out of order");
        cursor += found.unwrap_or(0) + 1;
    }
}

#[test]
fn test_quality_of_compression() {
    let text = "Vectorizer indexes documents for semantic search. The Synap cache keeps hot entries close to \
                the API layer. Engineers at HiveLLM rely on UMICP for inter-model messaging. "
        .repeat(8);
    let result = Compressor::new(lenient(0.5)).compress(&text).unwrap();
    let metrics = QualityMetrics::calculate(&text, &result.compressed);

    assert!((0.0..=1.0).contains(&metrics.overall_score));
    assert!(metrics.entity_retention > 0.0);
    assert!(result.compressed.contains("UMICP"));
    assert!(metrics.keyword_retention > 0.3);
}
