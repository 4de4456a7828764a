//! Enrichment and Scoring

use crate::error::FeatureError;
use crate::features::{FeatureSchema, FeatureVector};
use crate::reading::{EnrichedReading, SensorReading};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// Failure probability produced by the model, always within [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct RiskScore(f64);

impl RiskScore {
    /// Wrap a probability, rejecting anything outside [0, 1] or NaN
    pub fn new(probability: f64) -> Result<Self, FeatureError> {
        if probability.is_finite() && (0.0..=1.0).contains(&probability) {
            Ok(Self(probability))
        } else {
            Err(FeatureError::ScoringFailure(format!(
                "model output {} outside [0, 1]",
                probability
            )))
        }
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// Probability expressed as a percentage
    pub fn percent(&self) -> f64 {
        self.0 * 100.0
    }
}

impl TryFrom<f64> for RiskScore {
    type Error = FeatureError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RiskScore> for f64 {
    fn from(score: RiskScore) -> Self {
        score.0
    }
}

impl fmt::Display for RiskScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}%", self.percent())
    }
}

/// Opaque failure model: one assembled row in, one probability out
pub trait Scorer {
    fn score(&self, features: &FeatureVector) -> Result<f64, FeatureError>;
}

impl<S: Scorer + ?Sized> Scorer for &S {
    fn score(&self, features: &FeatureVector) -> Result<f64, FeatureError> {
        (**self).score(features)
    }
}

impl<S: Scorer + ?Sized> Scorer for Box<S> {
    fn score(&self, features: &FeatureVector) -> Result<f64, FeatureError> {
        (**self).score(features)
    }
}

/// Turns raw readings into scored, enriched readings
pub struct FeatureEngine<S> {
    schema: FeatureSchema,
    scorer: S,
}

impl<S: Scorer> FeatureEngine<S> {
    /// Create an engine for a validated schema and its model
    pub fn new(schema: FeatureSchema, scorer: S) -> Self {
        Self { schema, scorer }
    }

    /// Derive the extra features, rejecting non-finite sensor values
    pub fn enrich(&self, reading: SensorReading) -> Result<EnrichedReading, FeatureError> {
        if let Some((field, value)) = reading.fields().into_iter().find(|(_, v)| !v.is_finite()) {
            warn!("Rejecting reading: {} = {}", field, value);
            return Err(FeatureError::InvalidInput { field, value });
        }
        Ok(EnrichedReading::from_reading(reading))
    }

    /// Assemble the model row for an already enriched reading
    pub fn assemble(&self, enriched: &EnrichedReading) -> FeatureVector {
        self.schema.assemble(enriched)
    }

    /// Enrich a reading and score it with the model
    ///
    /// The model output is passed through unchanged; a value outside [0, 1]
    /// is reported as a scoring failure rather than clamped.
    pub fn enrich_and_score(
        &self,
        reading: SensorReading,
    ) -> Result<(EnrichedReading, RiskScore), FeatureError> {
        let enriched = self.enrich(reading)?;
        let features = self.assemble(&enriched);

        let probability = self.scorer.score(&features)?;
        let risk = RiskScore::new(probability)?;

        debug!(
            "Scored reading: efficiency={:.3}, thermal={:.1}, strain={:.2}, risk={}",
            enriched.power_efficiency, enriched.thermal_stress, enriched.mechanical_strain, risk
        );
        Ok((enriched, risk))
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    pub fn scorer(&self) -> &S {
        &self.scorer
    }
}
