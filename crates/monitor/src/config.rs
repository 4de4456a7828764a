//! Monitor configuration
//!
//! Layered as built-in defaults, then an optional TOML file, then
//! `MONITOR_*` environment variables (`__` separates nested keys, e.g.
//! `MONITOR_MODEL__MODEL_PATH`).

use alerting::RiskThresholds;
use data_validator::ValidationConfig;
use inference_engine::ModelConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "monitor.toml";

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Max level: trace, debug, info, warn or error
    pub level: String,
    /// Emit JSON lines instead of plain text
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Monitor configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    pub model: ModelConfig,
    pub thresholds: RiskThresholds,
    pub validation: ValidationConfig,
    pub logging: LoggingConfig,
    /// Score every reading with this probability instead of loading a model
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mock_probability: Option<f64>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            model: ModelConfig::default(),
            thresholds: RiskThresholds::default(),
            validation: ValidationConfig::default(),
            logging: LoggingConfig::default(),
            mock_probability: None,
        }
    }
}

impl MonitorConfig {
    /// Load configuration, reading `path` if given or `monitor.toml` if present
    pub fn load(path: Option<&Path>) -> Result<Self, ::config::ConfigError> {
        let file = match path {
            Some(p) => ::config::File::from(p).required(true),
            None => ::config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let config: Self = ::config::Config::builder()
            .add_source(::config::Config::try_from(&MonitorConfig::default())?)
            .add_source(file)
            .add_source(
                ::config::Environment::with_prefix("MONITOR")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would misclassify or misscore every reading
    pub fn validate(&self) -> Result<(), ::config::ConfigError> {
        self.thresholds
            .validate()
            .map_err(|e| ::config::ConfigError::Message(e.to_string()))?;

        if let Some(p) = self.mock_probability {
            if !(0.0..=1.0).contains(&p) {
                return Err(::config::ConfigError::Message(format!(
                    "mock_probability {} outside [0, 1]",
                    p
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    #[test]
    fn test_defaults() {
        let config = MonitorConfig::default();
        assert_eq!(config.thresholds.warning, 0.4);
        assert_eq!(config.thresholds.critical, 0.7);
        assert_eq!(config.model.output_index, 1);
        assert_eq!(config.validation.current_range, (1.0, 10.0));
        assert!(config.mock_probability.is_none());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let path = std::env::temp_dir().join(format!("monitor-{}.toml", std::process::id()));
        fs::write(
            &path,
            r#"
mock_probability = 0.25

[model]
model_path = "/opt/models/lgbm.onnx"

[thresholds]
critical = 0.8

[logging]
level = "debug"
"#,
        )
        .unwrap();

        let config = MonitorConfig::load(Some(&path)).unwrap();
        assert_eq!(config.model.model_path, PathBuf::from("/opt/models/lgbm.onnx"));
        assert_eq!(config.model.probability_column, 1);
        assert_eq!(config.thresholds.warning, 0.4);
        assert_eq!(config.thresholds.critical, 0.8);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.mock_probability, Some(0.25));
        fs::remove_file(path).ok();
    }

    #[test]
    fn test_inverted_thresholds_rejected() {
        let path = std::env::temp_dir()
            .join(format!("monitor-inverted-{}.toml", std::process::id()));
        fs::write(&path, "[thresholds]\nwarning = 0.9\ncritical = 0.2\n").unwrap();

        let err = MonitorConfig::load(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("Invalid risk thresholds"), "{}", err);
        fs::remove_file(path).ok();
    }

    #[test]
    fn test_out_of_range_mock_probability_rejected() {
        let config = MonitorConfig {
            mock_probability: Some(1.5),
            ..Default::default()
        };
        assert!(config.validate().is_err());
        assert!(MonitorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        assert!(MonitorConfig::load(Some(Path::new("/nonexistent/monitor.toml"))).is_err());
    }
}
