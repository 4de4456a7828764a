//! Feature Vector Assembly

use crate::error::FeatureError;
use crate::reading::EnrichedReading;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Number of model columns (9 raw + 3 derived)
pub const FEATURE_DIMENSION: usize = 12;

/// A single model column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Feature {
    Footfall,
    TargetTemperature,
    AirQuality,
    Ultrasonic,
    CurrentDraw,
    Voc,
    RealPower,
    InputPower,
    ActualTemperature,
    PowerEfficiency,
    ThermalStress,
    MechanicalStrain,
}

impl Feature {
    /// All columns in the order the model was trained with
    pub const ALL: [Feature; FEATURE_DIMENSION] = [
        Feature::Footfall,
        Feature::TargetTemperature,
        Feature::AirQuality,
        Feature::Ultrasonic,
        Feature::CurrentDraw,
        Feature::Voc,
        Feature::RealPower,
        Feature::InputPower,
        Feature::ActualTemperature,
        Feature::PowerEfficiency,
        Feature::ThermalStress,
        Feature::MechanicalStrain,
    ];

    /// Column name as it appears in the feature-name artifact
    pub fn column_name(&self) -> &'static str {
        match self {
            Feature::Footfall => "footfall",
            Feature::TargetTemperature => "tempMode",
            Feature::AirQuality => "AQ",
            Feature::Ultrasonic => "USS",
            Feature::CurrentDraw => "CS",
            Feature::Voc => "VOC",
            Feature::RealPower => "RP",
            Feature::InputPower => "IP",
            Feature::ActualTemperature => "Temperature",
            Feature::PowerEfficiency => "Power_Efficiency",
            Feature::ThermalStress => "Thermal_Stress",
            Feature::MechanicalStrain => "Mechanical_Strain",
        }
    }

    /// Look up a column by its artifact name (exact match)
    pub fn from_column_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.column_name() == name)
    }

    /// Read this column's value out of an enriched reading
    pub fn value_of(&self, enriched: &EnrichedReading) -> f64 {
        let r = &enriched.reading;
        match self {
            Feature::Footfall => r.footfall,
            Feature::TargetTemperature => r.target_temperature,
            Feature::AirQuality => r.air_quality,
            Feature::Ultrasonic => r.ultrasonic,
            Feature::CurrentDraw => r.current_draw,
            Feature::Voc => r.voc,
            Feature::RealPower => r.real_power,
            Feature::InputPower => r.input_power,
            Feature::ActualTemperature => r.actual_temperature,
            Feature::PowerEfficiency => enriched.power_efficiency,
            Feature::ThermalStress => enriched.thermal_stress,
            Feature::MechanicalStrain => enriched.mechanical_strain,
        }
    }
}

/// Column order expected by the loaded model
///
/// The model matches columns by position only, so the schema is built from
/// the feature-name artifact and checked once at startup: every known column
/// must appear exactly once and nothing else may appear.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureSchema {
    columns: Vec<Feature>,
}

impl FeatureSchema {
    /// Build a schema from the ordered feature-name list
    pub fn from_names<I, S>(names: I) -> Result<Self, FeatureError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut columns = Vec::with_capacity(FEATURE_DIMENSION);
        for name in names {
            let name = name.as_ref();
            let feature = Feature::from_column_name(name).ok_or_else(|| {
                FeatureError::SchemaMismatch(format!("unknown column '{}'", name))
            })?;
            if columns.contains(&feature) {
                return Err(FeatureError::SchemaMismatch(format!(
                    "duplicate column '{}'",
                    name
                )));
            }
            columns.push(feature);
        }

        if let Some(missing) = Feature::ALL.iter().find(|f| !columns.contains(f)) {
            return Err(FeatureError::SchemaMismatch(format!(
                "missing column '{}'",
                missing.column_name()
            )));
        }

        info!("Feature schema validated: {} columns", columns.len());
        Ok(Self { columns })
    }

    /// Schema in training order, for callers without an artifact
    pub fn canonical() -> Self {
        Self {
            columns: Feature::ALL.to_vec(),
        }
    }

    /// Columns in model order
    pub fn columns(&self) -> &[Feature] {
        &self.columns
    }

    /// Column names in model order
    pub fn names(&self) -> Vec<&'static str> {
        self.columns.iter().map(Feature::column_name).collect()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Assemble the model input row for an enriched reading
    pub fn assemble(&self, enriched: &EnrichedReading) -> FeatureVector {
        let values: Vec<f64> = self.columns.iter().map(|f| f.value_of(enriched)).collect();
        debug!("Assembled feature vector: {:?}", values);
        FeatureVector {
            columns: self.columns.clone(),
            values,
        }
    }
}

impl Default for FeatureSchema {
    fn default() -> Self {
        Self::canonical()
    }
}

/// One model input row, values positioned by the schema
///
/// Only built through [`FeatureSchema::assemble`], so `columns` and `values`
/// always have the same length.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureVector {
    /// Column each value belongs to
    columns: Vec<Feature>,
    /// Raw feature values in model order
    values: Vec<f64>,
}

impl FeatureVector {
    /// Raw feature values in model order
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn columns(&self) -> &[Feature] {
        &self.columns
    }

    /// Column names in the same order as `values`
    pub fn names(&self) -> Vec<&'static str> {
        self.columns.iter().map(Feature::column_name).collect()
    }

    /// Value of a given column, wherever it sits
    pub fn get(&self, feature: Feature) -> Option<f64> {
        self.columns
            .iter()
            .position(|f| *f == feature)
            .and_then(|idx| self.values.get(idx).copied())
    }

    /// Values narrowed to f32 for model runtimes
    pub fn to_f32(&self) -> Vec<f32> {
        self.values.iter().map(|v| *v as f32).collect()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reading::SensorReading;

    fn enriched() -> EnrichedReading {
        EnrichedReading::from_reading(SensorReading {
            footfall: 50.0,
            target_temperature: 45.0,
            air_quality: 80.0,
            ultrasonic: 2.5,
            current_draw: 5.0,
            voc: 150.0,
            real_power: 150.0,
            input_power: 6.0,
            actual_temperature: 65.0,
        })
    }

    const TRAINING_ORDER: [&str; 12] = [
        "footfall",
        "tempMode",
        "AQ",
        "USS",
        "CS",
        "VOC",
        "RP",
        "IP",
        "Temperature",
        "Power_Efficiency",
        "Thermal_Stress",
        "Mechanical_Strain",
    ];

    #[test]
    fn test_vector_order_matches_loaded_names() {
        let schema = FeatureSchema::from_names(TRAINING_ORDER).unwrap();
        let vector = schema.assemble(&enriched());

        assert_eq!(vector.names(), TRAINING_ORDER.to_vec());
        assert_eq!(vector.len(), FEATURE_DIMENSION);
        assert_eq!(vector.values[0], 50.0);
        assert_eq!(vector.values[10], 20.0);
        assert_eq!(vector.values[11], 12.5);
    }

    #[test]
    fn test_shuffled_names_reorder_values() {
        let names = [
            "Mechanical_Strain",
            "Temperature",
            "footfall",
            "Power_Efficiency",
            "tempMode",
            "AQ",
            "Thermal_Stress",
            "USS",
            "CS",
            "IP",
            "VOC",
            "RP",
        ];
        let schema = FeatureSchema::from_names(names).unwrap();
        let vector = schema.assemble(&enriched());

        assert_eq!(vector.names(), names.to_vec());
        assert_eq!(vector.values[0], 12.5);
        assert_eq!(vector.values[1], 65.0);
        assert_eq!(vector.values[2], 50.0);
        assert_eq!(vector.values[6], 20.0);
        assert_eq!(vector.get(Feature::RealPower), Some(150.0));
    }

    #[test]
    fn test_unknown_column_rejected() {
        let mut names = TRAINING_ORDER.to_vec();
        names[3] = "Ultrasonic";
        let err = FeatureSchema::from_names(names).unwrap_err();
        assert!(matches!(err, FeatureError::SchemaMismatch(_)));
    }

    #[test]
    fn test_missing_column_rejected() {
        let err = FeatureSchema::from_names(&TRAINING_ORDER[..11]).unwrap_err();
        assert_eq!(
            err,
            FeatureError::SchemaMismatch("missing column 'Mechanical_Strain'".to_string())
        );
    }

    #[test]
    fn test_duplicate_column_rejected() {
        let mut names = TRAINING_ORDER.to_vec();
        names.push("CS");
        let err = FeatureSchema::from_names(names).unwrap_err();
        assert_eq!(
            err,
            FeatureError::SchemaMismatch("duplicate column 'CS'".to_string())
        );
    }

    #[test]
    fn test_get_on_short_values_is_none() {
        let vector = FeatureVector {
            columns: vec![Feature::Footfall, Feature::Voc],
            values: vec![1.0],
        };
        assert_eq!(vector.get(Feature::Footfall), Some(1.0));
        assert_eq!(vector.get(Feature::Voc), None);
        assert_eq!(vector.get(Feature::CurrentDraw), None);
    }

    #[test]
    fn test_canonical_is_training_order() {
        assert_eq!(FeatureSchema::canonical().names(), TRAINING_ORDER.to_vec());
    }
}
