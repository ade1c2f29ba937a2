//! Importance scoring: one `Importance` per word.

use crate::lexicon;
use crate::tokenizer::{self, Word};
use cp_core::ScoringWeights;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Length (in chars) at which the length sub-score saturates.
const LENGTH_CAP: usize = 12;

/// Importance of a single word.
///
/// `Protected` outranks every `Scored` value; it is a tag, not a large number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Importance {
    Protected,
    Scored(f64),
}

impl Importance {
    pub fn is_protected(&self) -> bool {
        matches!(self, Self::Protected)
    }

    pub fn score(&self) -> Option<f64> {
        match self {
            Self::Protected => None,
            Self::Scored(v) => Some(*v),
        }
    }

    /// Total order used for ranking: `Protected` first, then scores descending.
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Protected, Self::Protected) => Ordering::Equal,
            (Self::Protected, Self::Scored(_)) => Ordering::Greater,
            (Self::Scored(_), Self::Protected) => Ordering::Less,
            (Self::Scored(a), Self::Scored(b)) => a.total_cmp(b),
        }
    }
}

/// A word paired with its importance, as exposed by `StatisticalFilter::score_words`.
#[derive(Debug, Clone, PartialEq)]
pub struct WordImportance<'a> {
    pub position: usize,
    pub word: Word<'a>,
    pub importance: Importance,
}

impl WordImportance<'_> {
    pub fn text(&self) -> &str {
        self.word.text
    }
}

/// Score every word. `protected[i]` is `Some` when word `i` overlaps a protected span.
pub fn score(words: &[Word<'_>], protected: &[Option<usize>], weights: &ScoringWeights) -> Vec<Importance> {
    debug_assert_eq!(words.len(), protected.len());

    let keys: Vec<String> = words.iter().map(|w| tokenizer::normalize(w.text)).collect();
    let mut freq: HashMap<&str, usize> = HashMap::new();
    for key in &keys {
        if !key.is_empty() {
            *freq.entry(key.as_str()).or_insert(0) += 1;
        }
    }

    words
        .iter()
        .enumerate()
        .map(|(i, word)| {
            if protected[i].is_some() {
                return Importance::Protected;
            }
            let key = keys[i].as_str();
            if key.is_empty() {
                return Importance::Scored(0.0);
            }
            let previous = i.checked_sub(1).map(|p| words[p].text);
            let count = freq.get(key).copied().unwrap_or(1);
            Importance::Scored(score_word(word.core(), key, previous, count, weights))
        })
        .collect()
}

/// Weighted sum of the sub-scores, floored at zero.
fn score_word(
    core: &str,
    key: &str,
    previous: Option<&str>,
    count: usize,
    weights: &ScoringWeights,
) -> f64 {
    let stop = if lexicon::is_stopword(key) { 1.0 } else { 0.0 };
    let length = core.chars().count().min(LENGTH_CAP) as f64 / LENGTH_CAP as f64;
    let caps = capitalization(core, previous);
    let digits = if core.chars().any(|c| c.is_ascii_digit()) { 1.0 } else { 0.0 };
    let rarity = 1.0 / (1.0 + (count.max(1) as f64).ln());

    let total = weights.stopword * stop
        + weights.length * length
        + weights.capitalization * caps
        + weights.digits * digits
        + weights.rarity * rarity;
    total.max(0.0)
}

/// Named-entity likelihood from letter case and sentence position.
fn capitalization(core: &str, previous: Option<&str>) -> f64 {
    if tokenizer::is_acronym(core) {
        1.0
    } else if tokenizer::has_leading_uppercase(core) {
        if tokenizer::is_sentence_start(previous) { 0.2 } else { 0.7 }
    } else {
        0.0
    }
}
