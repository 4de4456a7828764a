//! Alerting
//!
//! Maps failure probabilities and diagnostic gauges onto Normal / Warning /
//! Critical bands, with the maintenance guidance for each band.

mod classifier;
mod error;
mod gauge;

pub use classifier::{RiskBand, RiskClassifier, RiskThresholds};
pub use error::AlertingError;
pub use gauge::{classify_gauge, GaugeReading, GaugeSpec};
