//! Statistical prompt compressor: drops low-information words to hit a token budget.
//!
//! Stages:
//! 1. Protection masks: code fences, JSON blocks, URLs, paths, identifiers,
//!    domain terms and negations are kept verbatim
//! 2. Scoring: stopword, length, capitalization, digit and frequency heuristics
//! 3. Selection: keep the top-ranked words up to `round(words * ratio)`,
//!    reassembled in document order
//!
//! `QualityMetrics` measures keyword/entity retention of any (original, compressed) pair.

pub mod compressor;
pub mod filter;
pub mod lexicon;
pub mod protection;
pub mod quality;
pub mod scorer;
pub mod selector;
pub mod tokenizer;

pub use compressor::{compress, CompressionResult, Compressor};
pub use cp_core::{CompressionError, CompressorConfig, Result, ScoringWeights, StatisticalFilterConfig};
pub use filter::{FilterOutcome, StatisticalFilter};
pub use protection::{ProtectedSpan, ProtectionDetector, ProtectionKind};
pub use quality::QualityMetrics;
pub use scorer::{Importance, WordImportance};
pub use tokenizer::Word;
