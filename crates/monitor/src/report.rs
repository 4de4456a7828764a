//! Text rendering of analyses and session summaries

use crate::session::Analysis;
use alerting::GaugeReading;
use feature_engine::Feature;
use std::fmt;
use storage::{HistoryRow, HistoryStats, HistoryStore, StorageError, TrendPoint};

const BAR_WIDTH: usize = 20;

fn bar(gauge: &GaugeReading) -> String {
    let filled = ((gauge.display_percentage() / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

impl fmt::Display for Analysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reading = &self.entry.reading;

        writeln!(f, "=== FAILURE RISK ANALYSIS ===")?;
        for (spec, gauge) in &self.gauges {
            writeln!(
                f,
                "{:<18} {:>7.1} {} {}",
                spec.title,
                gauge.value,
                bar(gauge),
                gauge.status.as_str().to_uppercase()
            )?;
        }

        writeln!(f)?;
        writeln!(f, "{}", self.band.headline())?;
        writeln!(f, "  Risk Level: {:.1}%", self.entry.risk.percent())?;
        writeln!(f, "  {}", self.band.assessment())?;
        writeln!(f, "  Recommended Action: {}", self.band.recommended_action())?;

        writeln!(f)?;
        writeln!(f, "=== SENSOR READINGS ===")?;
        for (name, value) in reading.reading.fields() {
            writeln!(f, "  {:<12} {:>8.2}", name, value)?;
        }
        for (feature, value) in [
            (Feature::PowerEfficiency, reading.power_efficiency),
            (Feature::ThermalStress, reading.thermal_stress),
            (Feature::MechanicalStrain, reading.mechanical_strain),
        ] {
            writeln!(f, "  {:<18} {:>8.2}", feature.column_name(), value)?;
        }
        Ok(())
    }
}

/// Snapshot of a session's history, rendered as statistics, trend and table
#[derive(Debug, Clone)]
pub struct Summary {
    /// `None` until the first analysis is recorded
    stats: Option<HistoryStats>,
    trend: Vec<TrendPoint>,
    rows: Vec<HistoryRow>,
}

impl Summary {
    pub fn collect(history: &HistoryStore) -> Result<Self, StorageError> {
        let stats = match history.stats() {
            Ok(stats) => Some(stats),
            Err(StorageError::EmptyHistory) => None,
            Err(e) => return Err(e),
        };
        Ok(Self {
            stats,
            trend: history.trend()?,
            rows: history.as_table()?,
        })
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== HISTORICAL ANALYSIS ===")?;
        let Some(stats) = &self.stats else {
            return writeln!(f, "No analyses recorded yet.");
        };

        writeln!(f, "Total Scans:    {}", stats.count)?;
        writeln!(f, "Average Risk:   {:.1}%", stats.mean_risk * 100.0)?;
        writeln!(f, "Peak Risk:      {:.1}%", stats.max_risk * 100.0)?;
        writeln!(f, "Minimum Risk:   {:.1}%", stats.min_risk * 100.0)?;
        writeln!(f, "Critical Alerts: {}", stats.critical_count)?;

        writeln!(f)?;
        writeln!(f, "Risk trend:")?;
        for point in &self.trend {
            writeln!(f, "  #{:<3} {:>5.1}%", point.analysis, point.risk_percent)?;
        }

        writeln!(f)?;
        writeln!(f, "{:<10} {:>8}  {}", "Timestamp", "Risk %", "Status")?;
        for row in &self.rows {
            writeln!(
                f,
                "{:<10} {:>7.1}%  {}",
                row.timestamp,
                row.risk_percent,
                row.band_label()
            )?;
        }
        Ok(())
    }
}

/// Gauges, band guidance and sensor values for one analysis
pub fn render_analysis(analysis: &Analysis) -> String {
    analysis.to_string()
}

/// Session statistics, risk trend and history table
pub fn render_summary(history: &HistoryStore) -> Result<String, StorageError> {
    Ok(Summary::collect(history)?.to_string())
}
