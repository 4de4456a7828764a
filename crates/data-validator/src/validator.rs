//! Data Validator for Range Checking

use crate::error::ValidationError;
use feature_engine::SensorReading;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Validation configuration, one inclusive range per sensor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Footfall activity range
    pub footfall_range: (f64, f64),
    /// Target temperature range (°C)
    pub target_temp_range: (f64, f64),
    /// Air quality index range
    pub air_quality_range: (f64, f64),
    /// Ultrasonic range
    pub ultrasonic_range: (f64, f64),
    /// Current draw range (A)
    pub current_range: (f64, f64),
    /// VOC range (ppm)
    pub voc_range: (f64, f64),
    /// Real power range (W)
    pub real_power_range: (f64, f64),
    /// Input power range
    pub input_power_range: (f64, f64),
    /// Actual temperature range (°C)
    pub actual_temp_range: (f64, f64),
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            footfall_range: (0.0, 100.0),
            target_temp_range: (30.0, 60.0),
            air_quality_range: (50.0, 150.0),
            ultrasonic_range: (1.0, 5.0),
            current_range: (1.0, 10.0),
            voc_range: (0.0, 500.0),
            real_power_range: (100.0, 200.0),
            input_power_range: (2.0, 10.0),
            actual_temp_range: (50.0, 100.0),
        }
    }
}

impl ValidationConfig {
    /// Ranges in the same order as `SensorReading::fields`
    fn ranges(&self) -> [(f64, f64); 9] {
        [
            self.footfall_range,
            self.target_temp_range,
            self.air_quality_range,
            self.ultrasonic_range,
            self.current_range,
            self.voc_range,
            self.real_power_range,
            self.input_power_range,
            self.actual_temp_range,
        ]
    }
}

/// Result of validation
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether all values are valid
    pub valid: bool,
    /// List of validation errors
    pub errors: Vec<ValidationError>,
    /// Number of fields validated
    pub fields_checked: usize,
}

impl ValidationResult {
    /// Create a valid result
    pub fn valid(fields_checked: usize) -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            fields_checked,
        }
    }

    /// Create an invalid result with errors
    pub fn invalid(errors: Vec<ValidationError>, fields_checked: usize) -> Self {
        Self {
            valid: false,
            errors,
            fields_checked,
        }
    }
}

/// Validator for raw sensor readings
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    /// Create a new validator with given config
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Validate a single value against a range
    pub fn validate_range(
        &self,
        field: &'static str,
        value: f64,
        range: (f64, f64),
    ) -> Result<(), ValidationError> {
        if !value.is_finite() {
            Err(ValidationError::NonFinite { field, value })
        } else if value < range.0 || value > range.1 {
            Err(ValidationError::OutOfRange {
                field,
                value,
                min: range.0,
                max: range.1,
            })
        } else {
            Ok(())
        }
    }

    /// Check every field and collect all problems
    pub fn validate_reading(&self, reading: &SensorReading) -> ValidationResult {
        let fields = reading.fields();
        let errors: Vec<ValidationError> = fields
            .iter()
            .zip(self.config.ranges())
            .filter_map(|(&(field, value), range)| self.validate_range(field, value, range).err())
            .collect();

        if errors.is_empty() {
            ValidationResult::valid(fields.len())
        } else {
            debug!("Reading failed validation: {} error(s)", errors.len());
            ValidationResult::invalid(errors, fields.len())
        }
    }

    /// Fail on the first out-of-range field
    pub fn check(&self, reading: &SensorReading) -> Result<(), ValidationError> {
        match self.validate_reading(reading).errors.into_iter().next() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(ValidationConfig::default())
    }
}
