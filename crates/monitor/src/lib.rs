//! Machine Failure Monitor
//!
//! Wires configuration, model artifacts, validation, scoring and the session
//! history together, and renders the results as a text dashboard.

pub mod config;
pub mod presets;
pub mod report;
pub mod session;

pub use config::{LoggingConfig, MonitorConfig};
pub use presets::Preset;
pub use session::{Analysis, Session, SessionError};

use anyhow::Context;
use feature_engine::FeatureSchema;
use inference_engine::{InferenceEngine, ModelArtifacts};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

/// Initialize logging to stderr, leaving stdout for the report
pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<()> {
    let level: Level = config
        .level
        .parse()
        .with_context(|| format!("invalid log level '{}'", config.level))?;

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr);

    if config.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    }
    .context("failed to set tracing subscriber")
}

/// Load the model artifacts and open a fresh session
///
/// With `mock_probability` set the model file is not read and every reading
/// scores that value; otherwise a missing or corrupt artifact is fatal.
pub fn open_session(config: &MonitorConfig) -> anyhow::Result<Session<InferenceEngine>> {
    let (schema, engine) = match config.mock_probability {
        Some(p) => {
            warn!("Running with mock model (p = {})", p);
            let schema = FeatureSchema::canonical();
            let engine = InferenceEngine::mock(p, schema.len());
            (schema, engine)
        }
        None => {
            let artifacts = ModelArtifacts::load(&config.model)
                .context("failed to load model artifacts")?;
            (artifacts.schema, artifacts.engine)
        }
    };

    info!("Model columns: {}", schema.names().join(", "));
    Ok(Session::new(
        schema,
        engine,
        config.validation.clone(),
        config.thresholds,
    ))
}
