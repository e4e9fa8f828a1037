//! Defines the soil and climate measurements a user submits for a recommendation.

use crate::preset::{BoundViolation, FieldBounds};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of numeric features the crop model consumes.
pub const CROP_FEATURE_COUNT: usize = 7;

/// The fixed set of soil types the form offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoilType {
    Sandy,
    Loamy,
    Black,
    Red,
    Clay,
}

impl SoilType {
    pub const ALL: [SoilType; 5] = [
        SoilType::Sandy,
        SoilType::Loamy,
        SoilType::Black,
        SoilType::Red,
        SoilType::Clay,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SoilType::Sandy => "sandy",
            SoilType::Loamy => "loamy",
            SoilType::Black => "black",
            SoilType::Red => "red",
            SoilType::Clay => "clay",
        }
    }

    /// Case-insensitive lookup of a soil type by name.
    pub fn from_label(label: &str) -> Option<Self> {
        let normalized = label.trim().to_lowercase();
        Self::ALL.into_iter().find(|s| s.as_str() == normalized)
    }
}

impl fmt::Display for SoilType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One form submission.
///
/// The soil type is kept as the lower-cased text that was supplied rather than a
/// [`SoilType`], so that a value outside the fixed set reaches the soil encoder
/// and is rejected there.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SoilSample {
    nitrogen: u32,
    phosphorus: u32,
    potassium: u32,
    temperature: f64,
    humidity: f64,
    ph: f64,
    rainfall: f64,
    soil_type: String,
}

impl SoilSample {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        nitrogen: u32,
        phosphorus: u32,
        potassium: u32,
        temperature: f64,
        humidity: f64,
        ph: f64,
        rainfall: f64,
        soil_type: &str,
    ) -> Self {
        Self {
            nitrogen,
            phosphorus,
            potassium,
            temperature,
            humidity,
            ph,
            rainfall,
            soil_type: soil_type.trim().to_lowercase(),
        }
    }

    pub fn nitrogen(&self) -> u32 {
        self.nitrogen
    }

    pub fn phosphorus(&self) -> u32 {
        self.phosphorus
    }

    pub fn potassium(&self) -> u32 {
        self.potassium
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn humidity(&self) -> f64 {
        self.humidity
    }

    pub fn ph(&self) -> f64 {
        self.ph
    }

    pub fn rainfall(&self) -> f64 {
        self.rainfall
    }

    pub fn soil_type(&self) -> &str {
        &self.soil_type
    }

    /// The soil type as one of the fixed set, or `None` for any other text.
    pub fn known_soil_type(&self) -> Option<SoilType> {
        SoilType::from_label(&self.soil_type)
    }

    /// The seven crop-model inputs in their fixed order: N, P, K, temperature,
    /// humidity, pH, rainfall.
    pub fn crop_features(&self) -> [f64; CROP_FEATURE_COUNT] {
        [
            f64::from(self.nitrogen),
            f64::from(self.phosphorus),
            f64::from(self.potassium),
            self.temperature,
            self.humidity,
            self.ph,
            self.rainfall,
        ]
    }

    /// Checks every numeric field against `bounds` and returns all violations.
    ///
    /// Soil type membership is not checked here.
    pub fn validate(&self, bounds: &FieldBounds) -> Result<(), Vec<BoundViolation>> {
        let checks = [
            ("nitrogen", f64::from(self.nitrogen), bounds.nitrogen.widen()),
            ("phosphorus", f64::from(self.phosphorus), bounds.phosphorus.widen()),
            ("potassium", f64::from(self.potassium), bounds.potassium.widen()),
            ("temperature", self.temperature, bounds.temperature),
            ("humidity", self.humidity, bounds.humidity),
            ("ph", self.ph, bounds.ph),
            ("rainfall", self.rainfall, bounds.rainfall),
        ];

        let violations: Vec<BoundViolation> = checks
            .into_iter()
            .filter(|(_, value, range)| !range.contains(*value))
            .map(|(field, value, range)| BoundViolation {
                field: field.to_string(),
                value,
                min: range.min,
                max: range.max,
            })
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}
