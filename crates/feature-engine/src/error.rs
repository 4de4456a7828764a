//! Feature Engine Error Types

use thiserror::Error;

/// Errors raised while enriching or scoring a reading
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeatureError {
    /// A sensor field carried a value the engine cannot use
    #[error("Invalid input: {field} = {value}")]
    InvalidInput { field: &'static str, value: f64 },

    /// Loaded feature-name list does not match the known model columns
    #[error("Feature schema mismatch: {0}")]
    SchemaMismatch(String),

    /// The scoring model failed or broke its output contract
    #[error("Scoring failed: {0}")]
    ScoringFailure(String),
}
