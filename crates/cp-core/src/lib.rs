//! Shared configuration and error types for the prompt compressor.

pub mod config;
pub mod error;

pub use config::{CompressorConfig, ScoringWeights, StatisticalFilterConfig};
pub use error::{CompressionError, Result};

#[cfg(test)]
mod tests;
