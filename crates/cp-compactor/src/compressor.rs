//! Compressor: input validation and token accounting around the statistical filter.

use crate::filter::StatisticalFilter;
use crate::tokenizer;
use cp_core::{CompressionError, CompressorConfig, Result, StatisticalFilterConfig};
use serde::{Deserialize, Serialize};

/// Compression result with token accounting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompressionResult {
    pub compressed: String,
    pub original_tokens: usize,
    pub compressed_tokens: usize,
    pub tokens_removed: usize,
    /// `compressed_tokens / original_tokens`.
    pub compression_ratio: f64,
    /// Words that were kept unconditionally by the protection masks.
    pub protected_words: usize,
}

impl CompressionResult {
    /// Percentage of tokens removed.
    pub fn savings_pct(&self) -> f64 {
        (1.0 - self.compression_ratio) * 100.0
    }
}

/// The main compressor.
#[derive(Debug, Clone)]
pub struct Compressor {
    pub config: CompressorConfig,
    filter: StatisticalFilter,
}

impl Compressor {
    pub fn new(config: CompressorConfig) -> Self {
        Self::with_filter_config(config, StatisticalFilterConfig::default())
    }

    pub fn with_filter_config(config: CompressorConfig, filter_config: StatisticalFilterConfig) -> Self {
        Self { config, filter: StatisticalFilter::new(filter_config) }
    }

    pub fn filter(&self) -> &StatisticalFilter {
        &self.filter
    }

    /// Compress `input` at the configured `target_ratio`.
    ///
    /// Fails with `InputTooShort` before any scoring when the input is below either
    /// minimum, and with `NegativeGain` when filtering saved no tokens.
    pub fn compress(&self, input: &str) -> Result<CompressionResult> {
        let input_bytes = input.len();
        if input_bytes < self.config.min_input_bytes {
            tracing::debug!(input_bytes, minimum = self.config.min_input_bytes, "input rejected");
            return Err(CompressionError::too_few_bytes(input_bytes, self.config.min_input_bytes));
        }

        let original_tokens = tokenizer::count_tokens(input);
        if original_tokens < self.config.min_input_tokens {
            tracing::debug!(original_tokens, minimum = self.config.min_input_tokens, "input rejected");
            return Err(CompressionError::too_few_tokens(original_tokens, self.config.min_input_tokens));
        }

        self.config.validate()?;

        let outcome = self.filter.compress_with_ratio(input, self.config.target_ratio);
        let compressed_tokens = tokenizer::count_tokens(&outcome.output);
        if compressed_tokens == 0 {
            return Err(CompressionError::Internal("filter produced empty output".into()));
        }

        let compression_ratio = compressed_tokens as f64 / original_tokens as f64;
        if compressed_tokens >= original_tokens {
            tracing::debug!(compressed_tokens, original_tokens, protected = outcome.protected_words, "no net gain");
            return Err(CompressionError::NegativeGain { ratio: compression_ratio });
        }

        tracing::debug!(original_tokens, compressed_tokens, compression_ratio, "compressed");

        Ok(CompressionResult {
            compressed: outcome.output,
            original_tokens,
            compressed_tokens,
            tokens_removed: original_tokens - compressed_tokens,
            compression_ratio,
            protected_words: outcome.protected_words,
        })
    }

    /// Compress raw bytes. Invalid UTF-8 is reported as `Internal`.
    pub fn compress_bytes(&self, input: &[u8]) -> Result<CompressionResult> {
        let text = std::str::from_utf8(input)
            .map_err(|e| CompressionError::Internal(format!("input is not valid UTF-8: {e}")))?;
        self.compress(text)
    }
}

impl Default for Compressor {
    fn default() -> Self {
        Self::new(CompressorConfig::default())
    }
}

/// One-shot compression with explicit configs.
pub fn compress(
    text: &str,
    config: &CompressorConfig,
    filter_config: &StatisticalFilterConfig,
) -> Result<CompressionResult> {
    Compressor::with_filter_config(config.clone(), filter_config.clone()).compress(text)
}
