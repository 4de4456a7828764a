//! Alerting Error Types

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AlertingError {
    #[error("Invalid risk thresholds: need 0 <= warning ({warning}) <= critical ({critical}) <= 1")]
    InvalidThresholds { warning: f64, critical: f64 },
}
