//! Form presets: the bounds and pre-filled values a front-end offers for each field.
//!
//! Different front-ends ship different defaults and slightly different ranges for
//! the same fields. Each is kept as its own named preset instead of being merged.

use crate::sample::{SoilSample, SoilType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An inclusive `[min, max]` range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range<T> {
    pub min: T,
    pub max: T,
}

impl<T: PartialOrd + Copy> Range<T> {
    pub fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: T) -> bool {
        value >= self.min && value <= self.max
    }
}

impl Range<u32> {
    pub fn widen(&self) -> Range<f64> {
        Range::new(f64::from(self.min), f64::from(self.max))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldBounds {
    pub nitrogen: Range<u32>,
    pub phosphorus: Range<u32>,
    pub potassium: Range<u32>,
    pub temperature: Range<f64>,
    pub humidity: Range<f64>,
    pub ph: Range<f64>,
    pub rainfall: Range<f64>,
}

/// Pre-filled values shown when the form opens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleDefaults {
    pub nitrogen: u32,
    pub phosphorus: u32,
    pub potassium: u32,
    pub temperature: f64,
    pub humidity: f64,
    pub ph: f64,
    pub rainfall: f64,
    pub soil_type: SoilType,
}

impl SampleDefaults {
    pub fn to_sample(&self) -> SoilSample {
        SoilSample::new(
            self.nitrogen,
            self.phosphorus,
            self.potassium,
            self.temperature,
            self.humidity,
            self.ph,
            self.rainfall,
            self.soil_type.as_str(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormPreset {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub bounds: FieldBounds,
    pub defaults: SampleDefaults,
}

impl FormPreset {
    pub const CLASSIC: &'static str = "classic";

    /// The single-page form: N/P/K in 0-200, temperature 0-45 °C, humidity 0-100 %,
    /// pH 0-10, rainfall 0-300 mm, pre-filled with a rice-growing sample.
    pub fn classic() -> Self {
        Self {
            name: Self::CLASSIC.to_string(),
            description: Some("Single-page recommendation form".to_string()),
            bounds: FieldBounds {
                nitrogen: Range::new(0, 200),
                phosphorus: Range::new(0, 200),
                potassium: Range::new(0, 200),
                temperature: Range::new(0.0, 45.0),
                humidity: Range::new(0.0, 100.0),
                ph: Range::new(0.0, 10.0),
                rainfall: Range::new(0.0, 300.0),
            },
            defaults: SampleDefaults {
                nitrogen: 90,
                phosphorus: 42,
                potassium: 43,
                temperature: 22.0,
                humidity: 82.0,
                ph: 6.5,
                rainfall: 200.0,
                soil_type: SoilType::Sandy,
            },
        }
    }
}

/// A numeric field that fell outside its preset range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundViolation {
    pub field: String,
    pub value: f64,
    pub min: f64,
    pub max: f64,
}

impl fmt::Display for BoundViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} = {} is outside [{}, {}]",
            self.field, self.value, self.min, self.max
        )
    }
}
