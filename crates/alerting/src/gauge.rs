//! Diagnostic Gauges

use crate::classifier::RiskBand;
use feature_engine::{EnrichedReading, RiskScore};
use serde::{Deserialize, Serialize};

/// Status and fill level of one gauge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GaugeReading {
    pub value: f64,
    pub status: RiskBand,
    /// 100 × value / max_value, not capped
    pub percentage: f64,
}

impl GaugeReading {
    /// Percentage clamped to [0, 100] for drawing a bar
    pub fn display_percentage(&self) -> f64 {
        self.percentage.clamp(0.0, 100.0)
    }
}

/// Classify a gauge value against caller thresholds
///
/// Below `low` is Normal, below `high` is Warning, anything else Critical.
pub fn classify_gauge(value: f64, max_value: f64, thresholds: (f64, f64)) -> GaugeReading {
    let (low, high) = thresholds;
    let status = if value < low {
        RiskBand::Normal
    } else if value < high {
        RiskBand::Warning
    } else {
        RiskBand::Critical
    };
    GaugeReading {
        value,
        status,
        percentage: 100.0 * value / max_value,
    }
}

/// Scale and thresholds of a dashboard gauge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaugeSpec {
    pub title: &'static str,
    pub max_value: f64,
    pub thresholds: (f64, f64),
}

impl GaugeSpec {
    pub const FAILURE_RISK: GaugeSpec = GaugeSpec {
        title: "FAILURE RISK (%)",
        max_value: 100.0,
        thresholds: (40.0, 70.0),
    };
    pub const EFFICIENCY: GaugeSpec = GaugeSpec {
        title: "EFFICIENCY",
        max_value: 50.0,
        thresholds: (15.0, 30.0),
    };
    pub const THERMAL: GaugeSpec = GaugeSpec {
        title: "THERMAL (°C)",
        max_value: 50.0,
        thresholds: (15.0, 30.0),
    };
    pub const STRAIN: GaugeSpec = GaugeSpec {
        title: "STRAIN",
        max_value: 50.0,
        thresholds: (20.0, 35.0),
    };

    pub fn read(&self, value: f64) -> GaugeReading {
        classify_gauge(value, self.max_value, self.thresholds)
    }

    /// The four dashboard gauges for one scored reading
    ///
    /// Thermal stress is shown by magnitude; its sign is kept on the reading.
    pub fn dashboard(
        enriched: &EnrichedReading,
        risk: RiskScore,
    ) -> [(GaugeSpec, GaugeReading); 4] {
        [
            (Self::FAILURE_RISK, Self::FAILURE_RISK.read(risk.percent())),
            (Self::EFFICIENCY, Self::EFFICIENCY.read(enriched.power_efficiency)),
            (Self::THERMAL, Self::THERMAL.read(enriched.thermal_stress.abs())),
            (Self::STRAIN, Self::STRAIN.read(enriched.mechanical_strain)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feature_engine::SensorReading;

    #[test]
    fn test_gauge_bands() {
        assert_eq!(classify_gauge(10.0, 50.0, (15.0, 30.0)).status, RiskBand::Normal);
        assert_eq!(classify_gauge(29.9, 50.0, (15.0, 30.0)).status, RiskBand::Warning);
        assert_eq!(classify_gauge(30.0, 50.0, (15.0, 30.0)).status, RiskBand::Critical);
    }

    #[test]
    fn test_gauge_low_threshold_is_warning() {
        let gauge = classify_gauge(15.0, 50.0, (15.0, 30.0));
        assert_eq!(gauge.status, RiskBand::Warning);
        assert!((gauge.percentage - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_percentage_not_capped() {
        let gauge = GaugeSpec::EFFICIENCY.read(75.0);
        assert!((gauge.percentage - 150.0).abs() < 1e-9);
        assert_eq!(gauge.display_percentage(), 100.0);
    }

    #[test]
    fn test_dashboard_uses_thermal_magnitude() {
        let enriched = EnrichedReading::from_reading(SensorReading {
            actual_temperature: 50.0,
            target_temperature: 70.0,
            ..Default::default()
        });
        let gauges = GaugeSpec::dashboard(&enriched, RiskScore::new(0.15).unwrap());

        let (spec, thermal) = gauges[2];
        assert_eq!(spec.title, "THERMAL (°C)");
        assert_eq!(thermal.value, 20.0);
        assert_eq!(thermal.status, RiskBand::Warning);

        let (_, risk) = gauges[0];
        assert_eq!(risk.status, RiskBand::Normal);
        assert!((risk.percentage - 15.0).abs() < 1e-9);
    }
}
