use crate::error::{CompressionError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Orchestrator settings: target ratio plus the minimum input size worth compressing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompressorConfig {
    /// Fraction of tokens to keep, in (0, 1].
    pub target_ratio: f64,
    pub min_input_bytes: usize,
    pub min_input_tokens: usize,
}

impl Default for CompressorConfig {
    fn default() -> Self {
        Self {
            target_ratio: 0.5,
            min_input_bytes: 1024,
            min_input_tokens: 100,
        }
    }
}

impl CompressorConfig {
    pub fn with_target_ratio(mut self, ratio: f64) -> Self {
        self.target_ratio = ratio;
        self
    }

    pub fn with_min_input_bytes(mut self, bytes: usize) -> Self {
        self.min_input_bytes = bytes;
        self
    }

    pub fn with_min_input_tokens(mut self, tokens: usize) -> Self {
        self.min_input_tokens = tokens;
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_ratio("target_ratio", self.target_ratio)
    }
}

/// Weights combined by the importance scorer.
///
/// Each weight multiplies a sub-score in `[0, 1]`; the weighted sum is floored at zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    /// Applied when the word is a stopword. Negative.
    pub stopword: f64,
    /// Applied to `min(chars, 12) / 12`.
    pub length: f64,
    /// Applied to the capitalization sub-score (acronym 1.0, mid-sentence capital 0.7).
    pub capitalization: f64,
    /// Applied when the word contains a digit.
    pub digits: f64,
    /// Applied to `1 / (1 + ln(count))` of the word's document frequency.
    pub rarity: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            stopword: -2.0,
            length: 1.0,
            capitalization: 1.0,
            digits: 0.8,
            rarity: 0.6,
        }
    }
}

/// Word-level filter settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatisticalFilterConfig {
    /// Fraction of words retained, in (0, 1].
    pub compression_ratio: f64,
    /// Exact, case-sensitive terms that always survive.
    pub domain_terms: BTreeSet<String>,
    /// When false only negations and domain terms are protected.
    pub enable_protection_masks: bool,
    pub weights: ScoringWeights,
}

impl Default for StatisticalFilterConfig {
    fn default() -> Self {
        Self {
            compression_ratio: 0.5,
            domain_terms: BTreeSet::new(),
            enable_protection_masks: true,
            weights: ScoringWeights::default(),
        }
    }
}

impl StatisticalFilterConfig {
    pub fn with_ratio(mut self, ratio: f64) -> Self {
        self.compression_ratio = ratio;
        self
    }

    pub fn with_domain_terms<I, S>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.domain_terms.extend(terms.into_iter().map(Into::into));
        self
    }

    pub fn with_protection_masks(mut self, enabled: bool) -> Self {
        self.enable_protection_masks = enabled;
        self
    }

    pub fn with_weights(mut self, weights: ScoringWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_ratio("compression_ratio", self.compression_ratio)?;
        if self.domain_terms.iter().any(|t| t.trim().is_empty()) {
            return Err(CompressionError::InvalidConfig(
                "domain_terms must not contain blank entries".into(),
            ));
        }
        Ok(())
    }
}

fn validate_ratio(name: &str, ratio: f64) -> Result<()> {
    if ratio > 0.0 && ratio <= 1.0 {
        Ok(())
    } else {
        Err(CompressionError::InvalidConfig(format!(
            "{name} must be in (0, 1], got {ratio}"
        )))
    }
}
