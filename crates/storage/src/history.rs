//! Session History Implementation

use crate::StorageError;
use alerting::{RiskBand, RiskClassifier};
use chrono::{DateTime, Local};
use feature_engine::{EnrichedReading, RiskScore};
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

/// One scored reading, immutable once recorded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub reading: EnrichedReading,
    pub risk: RiskScore,
    pub timestamp: DateTime<Local>,
}

impl HistoryEntry {
    pub fn new(reading: EnrichedReading, risk: RiskScore, timestamp: DateTime<Local>) -> Self {
        Self {
            reading,
            risk,
            timestamp,
        }
    }

    /// Entry stamped with the current local time
    pub fn now(reading: EnrichedReading, risk: RiskScore) -> Self {
        Self::new(reading, risk, Local::now())
    }
}

/// Aggregates over every recorded risk score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoryStats {
    pub count: usize,
    pub mean_risk: f64,
    pub max_risk: f64,
    pub min_risk: f64,
    pub critical_count: usize,
}

/// Display row for the history table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRow {
    /// Wall-clock time as HH:MM:SS
    pub timestamp: String,
    pub risk_percent: f64,
    pub band: RiskBand,
}

impl HistoryRow {
    pub fn band_label(&self) -> &'static str {
        self.band.label()
    }
}

/// Point on the risk trend chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// 1-based analysis number
    pub analysis: usize,
    pub risk_percent: f64,
}

/// Append-only log of the session's predictions
///
/// Created at session start and cleared only through [`HistoryStore::reset`].
/// Insertion order is chronological order. A single lock guards the log.
pub struct HistoryStore {
    entries: Mutex<Vec<HistoryEntry>>,
    classifier: RiskClassifier,
}

impl HistoryStore {
    /// Create an empty history that bands risks with `classifier`
    pub fn new(classifier: RiskClassifier) -> Self {
        info!("Creating session history");
        Self {
            entries: Mutex::new(Vec::new()),
            classifier,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<HistoryEntry>>, StorageError> {
        self.entries
            .lock()
            .map_err(|e| StorageError::LockPoisoned(e.to_string()))
    }

    /// Add an entry to the end of the log
    pub fn append(&self, entry: HistoryEntry) -> Result<(), StorageError> {
        let mut entries = self.lock()?;
        entries.push(entry);
        debug!("Appended history entry #{}", entries.len());
        Ok(())
    }

    /// Record a freshly scored reading at the current time
    pub fn record(
        &self,
        reading: EnrichedReading,
        risk: RiskScore,
    ) -> Result<HistoryEntry, StorageError> {
        let entry = HistoryEntry::now(reading, risk);
        self.append(entry.clone())?;
        Ok(entry)
    }

    /// Drop every entry
    pub fn reset(&self) -> Result<(), StorageError> {
        let mut entries = self.lock()?;
        let dropped = entries.len();
        entries.clear();
        info!("Session history reset ({} entries dropped)", dropped);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of Critical-band entries; 0 for an empty log
    pub fn critical_count(&self) -> usize {
        self.entries
            .lock()
            .map(|entries| self.count_critical(&entries))
            .unwrap_or(0)
    }

    fn count_critical(&self, entries: &[HistoryEntry]) -> usize {
        entries
            .iter()
            .filter(|e| self.classifier.classify(e.risk) == RiskBand::Critical)
            .count()
    }

    /// Aggregate statistics; fails on an empty log
    pub fn stats(&self) -> Result<HistoryStats, StorageError> {
        let entries = self.lock()?;
        if entries.is_empty() {
            return Err(StorageError::EmptyHistory);
        }

        let risks = entries.iter().map(|e| e.risk.value());
        let sum: f64 = risks.clone().sum();
        let max_risk = risks.clone().fold(f64::MIN, f64::max);
        let min_risk = risks.fold(f64::MAX, f64::min);

        Ok(HistoryStats {
            count: entries.len(),
            mean_risk: sum / entries.len() as f64,
            max_risk,
            min_risk,
            critical_count: self.count_critical(&entries),
        })
    }

    /// One display row per entry, oldest first
    pub fn as_table(&self) -> Result<Vec<HistoryRow>, StorageError> {
        let entries = self.lock()?;
        Ok(entries
            .iter()
            .map(|e| HistoryRow {
                timestamp: e.timestamp.format("%H:%M:%S").to_string(),
                risk_percent: e.risk.percent(),
                band: self.classifier.classify(e.risk),
            })
            .collect())
    }

    /// Risk trend, one point per analysis
    pub fn trend(&self) -> Result<Vec<TrendPoint>, StorageError> {
        let entries = self.lock()?;
        Ok(entries
            .iter()
            .enumerate()
            .map(|(idx, e)| TrendPoint {
                analysis: idx + 1,
                risk_percent: e.risk.percent(),
            })
            .collect())
    }

    /// Snapshot of every entry, oldest first
    pub fn entries(&self) -> Result<Vec<HistoryEntry>, StorageError> {
        Ok(self.lock()?.clone())
    }
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new(RiskClassifier::default())
    }
}
