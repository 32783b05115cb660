//! Preprocessing Error Types

use thiserror::Error;

/// Errors raised while building or strictly applying a preprocessor
#[derive(Debug, Error)]
pub enum PreprocessError {
    /// A table does not have one entry per feature
    #[error("{field} has {actual} entries, expected {expected}")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Scale entry would make standardization undefined
    #[error("scale for {feature} (index {index}) must be finite and non-zero, got {value}")]
    InvalidScale {
        index: usize,
        feature: &'static str,
        value: f64,
    },

    /// Mean entry is NaN or infinite
    #[error("mean for {feature} (index {index}) must be finite, got {value}")]
    NonFiniteMean {
        index: usize,
        feature: &'static str,
        value: f64,
    },

    /// Artifact lists its features in a different order than the model expects
    #[error("feature order mismatch: expected {expected:?}, got {actual:?}")]
    FeatureOrderMismatch {
        expected: Vec<String>,
        actual: Vec<String>,
    },

    /// Activity name appears twice in the encoding table
    #[error("duplicate activity in encoding table: {0}")]
    DuplicateActivity(String),

    /// Activity name not present in the encoding table
    #[error("unknown activity: {0:?}")]
    UnknownActivity(String),

    /// Artifact could not be written as JSON
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Artifact could not be read or deserialized
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),
}
