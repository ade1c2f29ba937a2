use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompressionError {
    #[error("Input too short ({actual} {unit}), minimum is {minimum}")]
    InputTooShort {
        actual: usize,
        minimum: usize,
        unit: &'static str,
    },
    #[error("Compression ratio {ratio:.2} >= 1.0, no tokens would be saved")]
    NegativeGain { ratio: f64 },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CompressionError {
    pub fn too_few_bytes(actual: usize, minimum: usize) -> Self {
        Self::InputTooShort { actual, minimum, unit: "bytes" }
    }

    pub fn too_few_tokens(actual: usize, minimum: usize) -> Self {
        Self::InputTooShort { actual, minimum, unit: "tokens" }
    }
}

pub type Result<T> = std::result::Result<T, CompressionError>;
