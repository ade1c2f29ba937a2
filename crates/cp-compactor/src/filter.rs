//! Statistical filter: score words and keep the best of them, plus everything protected.

use crate::protection::{self, ProtectedSpan, ProtectionDetector};
use crate::scorer::{self, Importance, WordImportance};
use crate::selector;
use crate::tokenizer::{self, Word};
use cp_core::StatisticalFilterConfig;

/// Result of one filtering pass.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOutcome {
    pub output: String,
    pub total_words: usize,
    pub kept_words: usize,
    pub protected_words: usize,
}

/// Word-level compression engine. Cheap to share; holds no per-call state.
#[derive(Debug, Clone)]
pub struct StatisticalFilter {
    config: StatisticalFilterConfig,
    detector: ProtectionDetector,
}

struct Analysis<'a> {
    words: Vec<Word<'a>>,
    span_of: Vec<Option<usize>>,
    importances: Vec<Importance>,
}

impl StatisticalFilter {
    pub fn new(config: StatisticalFilterConfig) -> Self {
        let detector = ProtectionDetector::new(&config.domain_terms, config.enable_protection_masks);
        Self { config, detector }
    }

    pub fn config(&self) -> &StatisticalFilterConfig {
        &self.config
    }

    pub fn detector(&self) -> &ProtectionDetector {
        &self.detector
    }

    /// Protected spans of `text`, sorted and disjoint.
    pub fn protected_spans(&self, text: &str) -> Vec<ProtectedSpan> {
        let words = tokenizer::words(text);
        self.detector.detect(text, &words)
    }

    /// Importance of every word, in document order.
    pub fn score_words<'a>(&self, text: &'a str) -> Vec<WordImportance<'a>> {
        let analysis = self.analyze(text);
        analysis
            .words
            .into_iter()
            .zip(analysis.importances)
            .enumerate()
            .map(|(position, (word, importance))| WordImportance { position, word, importance })
            .collect()
    }

    /// Compress with the configured `compression_ratio`.
    pub fn compress(&self, text: &str) -> String {
        self.compress_with_ratio(text, self.config.compression_ratio).output
    }

    /// Compress keeping roughly `ratio` of the words, plus every protected word.
    pub fn compress_with_ratio(&self, text: &str, ratio: f64) -> FilterOutcome {
        let analysis = self.analyze(text);
        let total_words = analysis.words.len();
        if total_words == 0 {
            return FilterOutcome {
                output: String::new(),
                total_words: 0,
                kept_words: 0,
                protected_words: 0,
            };
        }

        let keep = selector::select(&analysis.importances, ratio);
        let kept_words = keep.iter().filter(|k| **k).count();
        let protected_words = analysis.importances.iter().filter(|i| i.is_protected()).count();
        let output = selector::reconstruct(text, &analysis.words, &analysis.span_of, &keep);

        tracing::debug!(
            total_words,
            kept_words,
            protected_words,
            target = selector::target_count(total_words, ratio),
            "statistical filter pass"
        );

        FilterOutcome { output, total_words, kept_words, protected_words }
    }

    fn analyze<'a>(&self, text: &'a str) -> Analysis<'a> {
        let words = tokenizer::words(text);
        let spans = self.detector.detect(text, &words);
        let span_of = protection::assign_spans(&words, &spans);
        let importances = scorer::score(&words, &span_of, &self.config.weights);
        Analysis { words, span_of, importances }
    }
}

impl Default for StatisticalFilter {
    fn default() -> Self {
        Self::new(StatisticalFilterConfig::default())
    }
}
