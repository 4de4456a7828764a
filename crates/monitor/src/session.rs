//! One monitoring session: validate, enrich, score, record

use alerting::{GaugeReading, GaugeSpec, RiskBand, RiskClassifier, RiskThresholds};
use data_validator::{ValidationConfig, ValidationError, Validator};
use feature_engine::{FeatureEngine, FeatureError, FeatureSchema, Scorer, SensorReading};
use storage::{HistoryEntry, HistoryStore, StorageError};
use thiserror::Error;
use tracing::info;

/// Why a single analysis did not produce a history entry
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Invalid reading: {0}")]
    Invalid(#[from] ValidationError),
    #[error(transparent)]
    Feature(#[from] FeatureError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Everything the dashboard shows for one analysis
#[derive(Debug, Clone)]
pub struct Analysis {
    pub entry: HistoryEntry,
    pub band: RiskBand,
    pub gauges: [(GaugeSpec, GaugeReading); 4],
}

/// Scoring pipeline plus the session's history
pub struct Session<S> {
    engine: FeatureEngine<S>,
    validator: Validator,
    classifier: RiskClassifier,
    history: HistoryStore,
}

impl<S: Scorer> Session<S> {
    pub fn new(
        schema: FeatureSchema,
        scorer: S,
        validation: ValidationConfig,
        thresholds: RiskThresholds,
    ) -> Self {
        let classifier = RiskClassifier::new(thresholds);
        Self {
            engine: FeatureEngine::new(schema, scorer),
            validator: Validator::new(validation),
            history: HistoryStore::new(classifier.clone()),
            classifier,
        }
    }

    /// Validate, enrich and score a reading, then append it to the history
    ///
    /// Nothing is recorded unless every step succeeds.
    pub fn analyze(&self, reading: SensorReading) -> Result<Analysis, SessionError> {
        self.validator.check(&reading)?;
        let (enriched, risk) = self.engine.enrich_and_score(reading)?;
        let entry = self.history.record(enriched, risk)?;
        let band = self.classifier.classify(risk);

        info!(
            "Analysis #{}: risk {} ({})",
            self.history.len(),
            risk,
            band.as_str()
        );

        Ok(Analysis {
            gauges: GaugeSpec::dashboard(&entry.reading, risk),
            band,
            entry,
        })
    }

    /// Clear the session history
    pub fn reset(&self) -> Result<(), StorageError> {
        self.history.reset()
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn engine(&self) -> &FeatureEngine<S> {
        &self.engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::Preset;
    use feature_engine::FeatureVector;

    struct StubModel(f64);

    impl Scorer for StubModel {
        fn score(&self, _features: &FeatureVector) -> Result<f64, FeatureError> {
            Ok(self.0)
        }
    }

    fn session(p: f64) -> Session<StubModel> {
        Session::new(
            FeatureSchema::canonical(),
            StubModel(p),
            ValidationConfig::default(),
            RiskThresholds::default(),
        )
    }

    #[test]
    fn test_optimal_preset_end_to_end() {
        let session = session(0.15);
        let analysis = session.analyze(Preset::Optimal.reading()).unwrap();

        let enriched = analysis.entry.reading;
        assert!((enriched.power_efficiency - 24.9998).abs() < 1e-3);
        assert_eq!(enriched.thermal_stress, 20.0);
        assert_eq!(enriched.mechanical_strain, 12.5);
        assert_eq!(analysis.band, RiskBand::Normal);
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_history_length_tracks_predictions() {
        let session = session(0.85);
        for preset in Preset::ALL {
            session.analyze(preset.reading()).unwrap();
        }
        let stats = session.history().stats().unwrap();
        assert_eq!(stats.count, 4);
        assert_eq!(stats.critical_count, 4);

        session.reset().unwrap();
        assert!(matches!(
            session.history().stats(),
            Err(StorageError::EmptyHistory)
        ));
    }

    #[test]
    fn test_rejected_reading_not_recorded() {
        let session = session(0.5);
        let reading = SensorReading {
            current_draw: 12.0,
            ..Preset::Moderate.reading()
        };
        assert!(matches!(
            session.analyze(reading),
            Err(SessionError::Invalid(_))
        ));
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_model_contract_violation_not_recorded() {
        let session = session(1.3);
        assert!(matches!(
            session.analyze(Preset::Critical.reading()),
            Err(SessionError::Feature(FeatureError::ScoringFailure(_)))
        ));
        assert_eq!(session.history().len(), 0);
    }
}
