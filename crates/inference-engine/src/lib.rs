//! ONNX Inference Engine
//!
//! Loads the failure model and its feature-name list, and exposes the model
//! as a [`feature_engine::Scorer`].

mod artifacts;
mod engine;

pub use artifacts::{load_feature_names, ModelArtifacts, ModelConfig};
pub use engine::InferenceEngine;

use feature_engine::FeatureError;
use thiserror::Error;

/// Errors during model loading or inference
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("Model load failed: {0}")]
    ModelLoadError(String),
    #[error("Feature list load failed: {0}")]
    FeatureListError(String),
    #[error("Inference failed: {0}")]
    InferenceFailed(String),
    #[error("Invalid input shape: expected {expected}, got {actual}")]
    InvalidInputShape { expected: usize, actual: usize },
    #[error("Model output {index} has no probability column {column}")]
    InvalidOutputShape { index: usize, column: usize },
}

impl From<InferenceError> for FeatureError {
    fn from(err: InferenceError) -> Self {
        FeatureError::ScoringFailure(err.to_string())
    }
}
