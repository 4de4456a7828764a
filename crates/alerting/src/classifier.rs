//! Risk Band Classification

use crate::error::AlertingError;
use feature_engine::RiskScore;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Discretized risk level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskBand {
    Normal,
    Warning,
    Critical,
}

impl RiskBand {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskBand::Normal => "normal",
            RiskBand::Warning => "warning",
            RiskBand::Critical => "critical",
        }
    }

    /// Label shown in history tables
    pub fn label(&self) -> &'static str {
        match self {
            RiskBand::Normal => "Normal",
            RiskBand::Warning => "Warning",
            RiskBand::Critical => "Critical",
        }
    }

    pub fn headline(&self) -> &'static str {
        match self {
            RiskBand::Normal => "ALL SYSTEMS OPERATIONAL",
            RiskBand::Warning => "WARNING",
            RiskBand::Critical => "CRITICAL ALERT",
        }
    }

    /// What the operator should see about the machine's state
    pub fn assessment(&self) -> &'static str {
        match self {
            RiskBand::Normal => "Machine operating within normal parameters",
            RiskBand::Warning => "Machine showing elevated stress indicators",
            RiskBand::Critical => "Immediate maintenance required! System failure imminent.",
        }
    }

    /// Get recommended action
    pub fn recommended_action(&self) -> &'static str {
        match self {
            RiskBand::Normal => "Continue routine monitoring",
            RiskBand::Warning => "Schedule preventive maintenance",
            RiskBand::Critical => "Shut down and inspect immediately",
        }
    }
}

impl fmt::Display for RiskBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Upper bounds (inclusive) of the Normal and Warning bands
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskThresholds {
    /// Risk above this is at least Warning (default: 0.4)
    pub warning: f64,
    /// Risk above this is Critical (default: 0.7)
    pub critical: f64,
}

impl RiskThresholds {
    /// Thresholds that pass [`RiskThresholds::validate`]
    pub fn new(warning: f64, critical: f64) -> Result<Self, AlertingError> {
        let thresholds = Self { warning, critical };
        thresholds.validate()?;
        Ok(thresholds)
    }

    /// Require `0 <= warning <= critical <= 1`; NaN never passes
    pub fn validate(&self) -> Result<(), AlertingError> {
        if 0.0 <= self.warning && self.warning <= self.critical && self.critical <= 1.0 {
            Ok(())
        } else {
            Err(AlertingError::InvalidThresholds {
                warning: self.warning,
                critical: self.critical,
            })
        }
    }
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            warning: 0.4,
            critical: 0.7,
        }
    }
}

/// Classifies failure probabilities into bands
#[derive(Debug, Clone, Default)]
pub struct RiskClassifier {
    thresholds: RiskThresholds,
}

impl RiskClassifier {
    pub fn new(thresholds: RiskThresholds) -> Self {
        Self { thresholds }
    }

    /// Band for a probability; a value exactly on a threshold stays in the lower band
    pub fn classify(&self, risk: RiskScore) -> RiskBand {
        let p = risk.value();
        let band = if p > self.thresholds.critical {
            RiskBand::Critical
        } else if p > self.thresholds.warning {
            RiskBand::Warning
        } else {
            RiskBand::Normal
        };
        debug!("Risk {:.4} classified as {}", p, band.as_str());
        band
    }

    pub fn thresholds(&self) -> RiskThresholds {
        self.thresholds
    }
}
