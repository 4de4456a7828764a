//! Inference Engine Implementation

use crate::InferenceError;
use feature_engine::{FeatureError, FeatureVector, Scorer};
use std::path::Path;
use std::time::Instant;
use tract_onnx::prelude::*;
use tracing::{debug, info};

type Plan = TypedRunnableModel<TypedModel>;

enum Backend {
    /// Optimized tract plan for the exported classifier
    Onnx(Plan),
    /// Fixed probability, for running without a model file
    Mock(f64),
}

/// Failure model backed by an ONNX export of the classifier
pub struct InferenceEngine {
    backend: Backend,
    /// Number of input columns the model was loaded with
    input_dim: usize,
    /// Which model output carries class probabilities
    output_index: usize,
    /// Column of the positive (failure) class within that output
    probability_column: usize,
    model_path: String,
}

impl InferenceEngine {
    /// Load and optimize the model for single-row `[1, input_dim]` f32 input
    pub fn load(
        model_path: impl AsRef<Path>,
        input_dim: usize,
        output_index: usize,
        probability_column: usize,
    ) -> Result<Self, InferenceError> {
        let path = model_path.as_ref();
        info!("Loading failure model from {}", path.display());

        if !path.exists() {
            return Err(InferenceError::ModelLoadError(format!(
                "model not found: {}",
                path.display()
            )));
        }

        let plan = tract_onnx::onnx()
            .model_for_path(path)
            .and_then(|model| model.with_input_fact(0, f32::fact([1, input_dim]).into()))
            .and_then(|model| model.into_optimized())
            .and_then(|model| model.into_runnable())
            .map_err(|e| InferenceError::ModelLoadError(e.to_string()))?;

        info!("Model loaded successfully ({} input columns)", input_dim);
        Ok(Self {
            backend: Backend::Onnx(plan),
            input_dim,
            output_index,
            probability_column,
            model_path: path.display().to_string(),
        })
    }

    /// Engine that answers every row with the same probability
    pub fn mock(probability: f64, input_dim: usize) -> Self {
        info!("Creating mock inference engine (p = {})", probability);
        Self {
            backend: Backend::Mock(probability),
            input_dim,
            output_index: 0,
            probability_column: 0,
            model_path: "mock".to_string(),
        }
    }

    /// Failure probability for one assembled row
    pub fn predict(&self, features: &FeatureVector) -> Result<f64, InferenceError> {
        if features.len() != self.input_dim {
            return Err(InferenceError::InvalidInputShape {
                expected: self.input_dim,
                actual: features.len(),
            });
        }

        let start = Instant::now();
        let probability = match &self.backend {
            Backend::Mock(p) => *p,
            Backend::Onnx(plan) => self.run_plan(plan, features)?,
        };
        debug!(
            "Inference completed in {}us (p = {:.4})",
            start.elapsed().as_micros(),
            probability
        );
        Ok(probability)
    }

    /// Failure probabilities for several rows, in input order
    pub fn predict_batch(&self, rows: &[FeatureVector]) -> Result<Vec<f64>, InferenceError> {
        rows.iter().map(|row| self.predict(row)).collect()
    }

    fn run_plan(&self, plan: &Plan, features: &FeatureVector) -> Result<f64, InferenceError> {
        let input: Tensor =
            tract_ndarray::Array2::from_shape_vec((1, self.input_dim), features.to_f32())
                .map_err(|e| InferenceError::InferenceFailed(e.to_string()))?
                .into();

        let outputs = plan
            .run(tvec!(input.into()))
            .map_err(|e| InferenceError::InferenceFailed(e.to_string()))?;

        let shape_error = || InferenceError::InvalidOutputShape {
            index: self.output_index,
            column: self.probability_column,
        };
        let output = outputs.get(self.output_index).ok_or_else(shape_error)?;
        let view = output
            .to_array_view::<f32>()
            .map_err(|e| InferenceError::InferenceFailed(e.to_string()))?;

        // Row 0 of a [1, classes] tensor, or the lone value of a [1] tensor
        let column = if view.len() == 1 { 0 } else { self.probability_column };
        view.iter()
            .nth(column)
            .map(|p| f64::from(*p))
            .ok_or_else(shape_error)
    }

    pub fn is_mock(&self) -> bool {
        matches!(self.backend, Backend::Mock(_))
    }

    pub fn input_dim(&self) -> usize {
        self.input_dim
    }

    /// Get model path
    pub fn model_path(&self) -> &str {
        &self.model_path
    }
}

impl Scorer for InferenceEngine {
    fn score(&self, features: &FeatureVector) -> Result<f64, FeatureError> {
        Ok(self.predict(features)?)
    }
}
