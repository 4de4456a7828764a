//! Feature Engineering Engine
//!
//! Enriches raw machine sensor readings with derived features, assembles the
//! column vector expected by the failure model and scores it.

mod engine;
mod error;
mod features;
mod reading;

pub use engine::{FeatureEngine, RiskScore, Scorer};
pub use error::FeatureError;
pub use features::{Feature, FeatureSchema, FeatureVector, FEATURE_DIMENSION};
pub use reading::{EnrichedReading, SensorReading, POWER_EPSILON};
