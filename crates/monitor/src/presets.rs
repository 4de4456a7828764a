//! Quick presets for common operating conditions

use clap::ValueEnum;
use feature_engine::SensorReading;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    Optimal,
    Moderate,
    Critical,
    ColdStart,
}

impl Preset {
    pub const ALL: [Preset; 4] = [
        Preset::Optimal,
        Preset::Moderate,
        Preset::Critical,
        Preset::ColdStart,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Preset::Optimal => "Optimal Performance",
            Preset::Moderate => "Moderate Load",
            Preset::Critical => "Critical Stress",
            Preset::ColdStart => "Cold Start",
        }
    }

    pub fn reading(&self) -> SensorReading {
        match self {
            Preset::Optimal => SensorReading {
                footfall: 50.0,
                target_temperature: 45.0,
                air_quality: 80.0,
                ultrasonic: 2.5,
                current_draw: 5.0,
                voc: 150.0,
                real_power: 150.0,
                input_power: 6.0,
                actual_temperature: 65.0,
            },
            Preset::Moderate => SensorReading {
                footfall: 70.0,
                target_temperature: 50.0,
                air_quality: 100.0,
                ultrasonic: 3.5,
                current_draw: 7.0,
                voc: 300.0,
                real_power: 175.0,
                input_power: 7.5,
                actual_temperature: 80.0,
            },
            Preset::Critical => SensorReading {
                footfall: 95.0,
                target_temperature: 35.0,
                air_quality: 140.0,
                ultrasonic: 4.8,
                current_draw: 9.5,
                voc: 480.0,
                real_power: 195.0,
                input_power: 9.8,
                actual_temperature: 98.0,
            },
            Preset::ColdStart => SensorReading {
                footfall: 10.0,
                target_temperature: 55.0,
                air_quality: 60.0,
                ultrasonic: 1.2,
                current_draw: 2.0,
                voc: 50.0,
                real_power: 110.0,
                input_power: 3.0,
                actual_temperature: 52.0,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_validator::Validator;

    #[test]
    fn test_presets_pass_validation() {
        let validator = Validator::default();
        for preset in Preset::ALL {
            assert!(validator.check(&preset.reading()).is_ok(), "{}", preset.name());
        }
    }

    #[test]
    fn test_cold_start_runs_below_target() {
        let reading = Preset::ColdStart.reading();
        assert!(reading.actual_temperature < reading.target_temperature);
    }
}
