//! Quality metrics: how much of the original's important content survived.

use crate::lexicon;
use crate::tokenizer;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::LazyLock;

static RE_EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w.+\-]+@[\w\-]+(\.[\w\-]+)+$").unwrap());

/// Retention scores, all in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityMetrics {
    pub keyword_retention: f64,
    pub entity_retention: f64,
    pub vocabulary_ratio: f64,
    /// Unique words per word in the compressed text. Informational, not part of `overall_score`.
    pub information_density: f64,
    pub overall_score: f64,
}

impl QualityMetrics {
    pub const KEYWORD_WEIGHT: f64 = 0.5;
    pub const ENTITY_WEIGHT: f64 = 0.3;
    pub const VOCABULARY_WEIGHT: f64 = 0.2;

    pub fn calculate(original: &str, compressed: &str) -> Self {
        let orig_words: Vec<&str> = original.split_whitespace().collect();
        let comp_words: Vec<&str> = compressed.split_whitespace().collect();

        let keyword_retention = retention(
            &Self::extract_keywords(&orig_words),
            &Self::extract_keywords(&comp_words),
        );
        // Entities come from the original only; one is retained when its surface form survives.
        let entity_retention = retention(&Self::extract_entities(&orig_words), &surface_tokens(&comp_words));

        let orig_vocab = vocabulary(&orig_words);
        let comp_vocab = vocabulary(&comp_words);
        let vocabulary_ratio = if orig_vocab.is_empty() {
            1.0
        } else {
            (comp_vocab.len() as f64 / orig_vocab.len() as f64).min(1.0)
        };

        let information_density = if comp_words.is_empty() {
            0.0
        } else {
            comp_vocab.len() as f64 / comp_words.len() as f64
        };

        let overall_score = (keyword_retention * Self::KEYWORD_WEIGHT
            + entity_retention * Self::ENTITY_WEIGHT
            + vocabulary_ratio * Self::VOCABULARY_WEIGHT)
            .clamp(0.0, 1.0);

        Self {
            keyword_retention,
            entity_retention,
            vocabulary_ratio,
            information_density,
            overall_score,
        }
    }

    /// Lowercased non-stopword, non-punctuation words.
    pub fn extract_keywords(words: &[&str]) -> HashSet<String> {
        words
            .iter()
            .map(|w| tokenizer::normalize(w))
            .filter(|w| !w.is_empty() && !lexicon::is_stopword(w))
            .collect()
    }

    /// Capitalized words that don't open a sentence, acronyms, and email addresses.
    pub fn extract_entities(words: &[&str]) -> HashSet<String> {
        let mut entities = HashSet::new();
        for (i, word) in words.iter().enumerate() {
            let core = tokenizer::trim_punct(word);
            if core.is_empty() {
                continue;
            }
            if core.contains('@') {
                if RE_EMAIL.is_match(core) {
                    entities.insert(core.to_lowercase());
                }
                continue;
            }
            if tokenizer::is_acronym(core) {
                entities.insert(core.to_string());
                continue;
            }
            let previous = i.checked_sub(1).map(|p| words[p]);
            if tokenizer::has_leading_uppercase(core)
                && core.chars().count() > 1
                && !tokenizer::is_sentence_start(previous)
            {
                entities.insert(core.to_string());
            }
        }
        entities
    }

    /// Human-readable multi-line report.
    pub fn format(&self) -> String {
        format!(
            "Quality Metrics:\n\
             - Keyword Retention: {:.1}%\n\
             - Entity Retention: {:.1}%\n\
             - Vocabulary Ratio: {:.1}%\n\
             - Info Density: {:.3}\n\
             - Overall Score: {:.1}%",
            self.keyword_retention * 100.0,
            self.entity_retention * 100.0,
            self.vocabulary_ratio * 100.0,
            self.information_density,
            self.overall_score * 100.0
        )
    }
}

fn vocabulary(words: &[&str]) -> HashSet<String> {
    words
        .iter()
        .map(|w| tokenizer::normalize(w))
        .filter(|w| !w.is_empty())
        .collect()
}

/// Word cores as written, plus lowercased email addresses to match `extract_entities`.
fn surface_tokens(words: &[&str]) -> HashSet<String> {
    let mut tokens = HashSet::new();
    for core in words.iter().map(|w| tokenizer::trim_punct(w)).filter(|c| !c.is_empty()) {
        if core.contains('@') {
            tokens.insert(core.to_lowercase());
        }
        tokens.insert(core.to_string());
    }
    tokens
}

/// Fraction of `original` still present in `compressed`; 1.0 when there was nothing to keep.
fn retention(original: &HashSet<String>, compressed: &HashSet<String>) -> f64 {
    if original.is_empty() {
        return 1.0;
    }
    original.intersection(compressed).count() as f64 / original.len() as f64
}
