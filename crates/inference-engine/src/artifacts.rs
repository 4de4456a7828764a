//! Model Artifact Loading

use crate::engine::InferenceEngine;
use crate::InferenceError;
use feature_engine::FeatureSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Where the model artifacts live and how to read the model's output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// ONNX export of the classifier
    pub model_path: PathBuf,
    /// JSON array with the model's column names, in order
    pub feature_names_path: PathBuf,
    /// Model output holding class probabilities
    pub output_index: usize,
    /// Probability column of the failure class
    pub probability_column: usize,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("models/machine_model.onnx"),
            feature_names_path: PathBuf::from("models/feature_names.json"),
            // Binary classifier exported without ZipMap: [label, probabilities]
            output_index: 1,
            probability_column: 1,
        }
    }
}

/// Read the ordered feature-name list
pub fn load_feature_names(path: impl AsRef<Path>) -> Result<Vec<String>, InferenceError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)
        .map_err(|e| InferenceError::FeatureListError(format!("{}: {}", path.display(), e)))?;
    let names: Vec<String> = serde_json::from_str(&raw)
        .map_err(|e| InferenceError::FeatureListError(format!("{}: {}", path.display(), e)))?;
    info!("Loaded {} feature names from {}", names.len(), path.display());
    Ok(names)
}

/// The two load-once artifacts, validated against each other
pub struct ModelArtifacts {
    pub schema: FeatureSchema,
    pub engine: InferenceEngine,
}

impl ModelArtifacts {
    /// Load the feature list and the model; any failure is fatal for startup
    pub fn load(config: &ModelConfig) -> Result<Self, InferenceError> {
        let names = load_feature_names(&config.feature_names_path)?;
        let schema = FeatureSchema::from_names(&names)
            .map_err(|e| InferenceError::FeatureListError(e.to_string()))?;

        let engine = InferenceEngine::load(
            &config.model_path,
            schema.len(),
            config.output_index,
            config.probability_column,
        )?;

        Ok(Self { schema, engine })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feature_engine::{FeatureEngine, SensorReading};

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("{}-{}", std::process::id(), name));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_feature_names() {
        let path = write_temp(
            "names.json",
            r#"["footfall","tempMode","AQ","USS","CS","VOC","RP","IP","Temperature",
               "Power_Efficiency","Thermal_Stress","Mechanical_Strain"]"#,
        );
        let names = load_feature_names(&path).unwrap();
        assert_eq!(names.len(), 12);
        assert_eq!(names[0], "footfall");
        assert_eq!(names[11], "Mechanical_Strain");
        fs::remove_file(path).ok();
    }

    #[test]
    fn test_corrupt_feature_list() {
        let path = write_temp("corrupt.json", "footfall,tempMode");
        let err = load_feature_names(&path).unwrap_err();
        assert!(matches!(err, InferenceError::FeatureListError(_)));
        fs::remove_file(path).ok();
    }

    #[test]
    fn test_mismatched_feature_list_fails_before_model_load() {
        let path = write_temp("short.json", r#"["footfall","tempMode"]"#);
        let config = ModelConfig {
            feature_names_path: path.clone(),
            ..Default::default()
        };
        match ModelArtifacts::load(&config) {
            Err(InferenceError::FeatureListError(msg)) => assert!(msg.contains("missing column")),
            Err(other) => panic!("unexpected error: {}", other),
            Ok(_) => panic!("mismatched list accepted"),
        }
        fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_fixture_artifacts() {
        let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures");
        let config = ModelConfig {
            model_path: fixtures.join("tiny_classifier.onnx"),
            feature_names_path: fixtures.join("feature_names.json"),
            ..Default::default()
        };
        let artifacts = ModelArtifacts::load(&config).unwrap();
        assert_eq!(artifacts.schema, FeatureSchema::canonical());
        assert!(!artifacts.engine.is_mock());
        assert_eq!(artifacts.engine.input_dim(), 12);

        let engine = FeatureEngine::new(artifacts.schema, artifacts.engine);
        let (_, risk) = engine.enrich_and_score(SensorReading::default()).unwrap();
        assert!((risk.value() - 0.731_058_6).abs() < 1e-5, "got {}", risk);
    }

    #[test]
    fn test_missing_feature_list() {
        let config = ModelConfig {
            feature_names_path: PathBuf::from("/nonexistent/feature_names.json"),
            ..Default::default()
        };
        assert!(matches!(
            ModelArtifacts::load(&config),
            Err(InferenceError::FeatureListError(_))
        ));
    }
}
