//! Sensor Readings and Derived Features

use serde::{Deserialize, Serialize};

/// Guard added to input power before dividing
pub const POWER_EPSILON: f64 = 1e-5;

/// One snapshot of all raw machine sensor values
///
/// Serialized field names follow the model's column names so readings can be
/// fed straight from the same JSON the model was trained on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    /// Activity level in the operational area
    pub footfall: f64,
    /// Desired operating temperature (°C)
    #[serde(rename = "tempMode")]
    pub target_temperature: f64,
    /// Ambient air quality index
    #[serde(rename = "AQ")]
    pub air_quality: f64,
    /// Ultrasonic vibration/distance measurement
    #[serde(rename = "USS")]
    pub ultrasonic: f64,
    /// Electrical current draw (A)
    #[serde(rename = "CS")]
    pub current_draw: f64,
    /// Volatile organic compounds (ppm)
    #[serde(rename = "VOC")]
    pub voc: f64,
    /// Active power consumption (W)
    #[serde(rename = "RP")]
    pub real_power: f64,
    /// Total input power
    #[serde(rename = "IP")]
    pub input_power: f64,
    /// Current operating temperature (°C)
    #[serde(rename = "Temperature")]
    pub actual_temperature: f64,
}

impl SensorReading {
    /// Raw fields paired with their model column names, in declaration order
    pub fn fields(&self) -> [(&'static str, f64); 9] {
        [
            ("footfall", self.footfall),
            ("tempMode", self.target_temperature),
            ("AQ", self.air_quality),
            ("USS", self.ultrasonic),
            ("CS", self.current_draw),
            ("VOC", self.voc),
            ("RP", self.real_power),
            ("IP", self.input_power),
            ("Temperature", self.actual_temperature),
        ]
    }
}

impl Default for SensorReading {
    /// Mid-range operating point used when no preset is selected
    fn default() -> Self {
        Self {
            footfall: 50.0,
            target_temperature: 45.0,
            air_quality: 100.0,
            ultrasonic: 3.0,
            current_draw: 5.0,
            voc: 250.0,
            real_power: 150.0,
            input_power: 6.0,
            actual_temperature: 75.0,
        }
    }
}

/// A reading plus the three derived diagnostic features
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnrichedReading {
    #[serde(flatten)]
    pub reading: SensorReading,
    /// real_power / (input_power + ε)
    #[serde(rename = "Power_Efficiency")]
    pub power_efficiency: f64,
    /// actual_temperature − target_temperature, signed
    #[serde(rename = "Thermal_Stress")]
    pub thermal_stress: f64,
    /// ultrasonic × current_draw
    #[serde(rename = "Mechanical_Strain")]
    pub mechanical_strain: f64,
}

impl EnrichedReading {
    /// Derive the extra features from a raw reading
    pub fn from_reading(reading: SensorReading) -> Self {
        Self {
            reading,
            power_efficiency: reading.real_power / (reading.input_power + POWER_EPSILON),
            thermal_stress: reading.actual_temperature - reading.target_temperature,
            mechanical_strain: reading.ultrasonic * reading.current_draw,
        }
    }
}

impl From<SensorReading> for EnrichedReading {
    fn from(reading: SensorReading) -> Self {
        Self::from_reading(reading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn optimal() -> SensorReading {
        SensorReading {
            footfall: 50.0,
            target_temperature: 45.0,
            air_quality: 80.0,
            ultrasonic: 2.5,
            current_draw: 5.0,
            voc: 150.0,
            real_power: 150.0,
            input_power: 6.0,
            actual_temperature: 65.0,
        }
    }

    #[test]
    fn test_power_efficiency_formula() {
        let enriched = EnrichedReading::from_reading(optimal());
        assert_eq!(enriched.power_efficiency, 150.0 / (6.0 + 1e-5));
        assert!((enriched.power_efficiency - 24.9998).abs() < 1e-3);
    }

    #[test]
    fn test_zero_input_power_is_finite() {
        let reading = SensorReading {
            input_power: 0.0,
            ..optimal()
        };
        let enriched = EnrichedReading::from_reading(reading);
        assert!(enriched.power_efficiency.is_finite());
        assert!((enriched.power_efficiency - 150.0 * 1e5).abs() < 1e-3);
    }

    #[test]
    fn test_thermal_stress_is_signed() {
        let reading = SensorReading {
            actual_temperature: 60.0,
            target_temperature: 75.0,
            ..optimal()
        };
        assert_eq!(EnrichedReading::from_reading(reading).thermal_stress, -15.0);
    }

    #[test]
    fn test_mechanical_strain() {
        let enriched = EnrichedReading::from_reading(optimal());
        assert_eq!(enriched.mechanical_strain, 12.5);
        assert_eq!(enriched.thermal_stress, 20.0);
    }

    #[test]
    fn test_serde_uses_model_column_names() {
        let json = serde_json::to_value(EnrichedReading::from_reading(optimal())).unwrap();
        assert_eq!(json["tempMode"], 45.0);
        assert_eq!(json["CS"], 5.0);
        assert_eq!(json["Mechanical_Strain"], 12.5);

        let parsed: SensorReading = serde_json::from_str(
            r#"{"footfall":10,"tempMode":55,"AQ":60,"USS":1.2,"CS":2.0,
                "VOC":50,"RP":110,"IP":3.0,"Temperature":52}"#,
        )
        .unwrap();
        assert_eq!(parsed.target_temperature, 55.0);
        assert_eq!(parsed.actual_temperature, 52.0);
    }

    proptest! {
        #[test]
        fn power_efficiency_finite_over_input_range(rp in 100.0f64..=200.0, ip in 0.0f64..=10.0) {
            let reading = SensorReading { real_power: rp, input_power: ip, ..optimal() };
            let enriched = EnrichedReading::from_reading(reading);
            prop_assert!(enriched.power_efficiency.is_finite());
            prop_assert_eq!(enriched.power_efficiency, rp / (ip + POWER_EPSILON));
        }
    }
}
