//! Interactive input form driven by a [`FormPreset`].
//!
//! Each numeric field is pre-filled with the preset default and re-prompted until
//! the value lies inside the preset range. Soil type is picked from the fixed set.

use anyhow::Result;
use cropforge_schemas::{
    preset::{FormPreset, Range},
    sample::{SoilSample, SoilType},
};
use dialoguer::{Confirm, Input, Select};
use std::fmt::Display;
use std::str::FromStr;

/// Prompt text for one numeric field, e.g. `Nitrogen (kg/ha) [0-200]`.
pub fn field_prompt<T: Display>(label: &str, unit: Option<&str>, range: &Range<T>) -> String {
    match unit {
        Some(unit) => format!("{} ({}) [{}-{}]", label, unit, range.min, range.max),
        None => format!("{} [{}-{}]", label, range.min, range.max),
    }
}

/// Error shown when a typed value falls outside its range.
pub fn range_error<T: Display + PartialOrd + Copy>(value: T, range: &Range<T>) -> Result<(), String> {
    if range.contains(value) {
        Ok(())
    } else {
        Err(format!("Enter a value between {} and {}", range.min, range.max))
    }
}

fn prompt_in_range<T>(label: &str, unit: Option<&str>, range: Range<T>, default: T) -> Result<T>
where
    T: Copy + PartialOrd + Display + FromStr + 'static,
    <T as FromStr>::Err: ToString,
{
    let value = Input::<T>::new()
        .with_prompt(field_prompt(label, unit, &range))
        .default(default)
        .validate_with(move |value: &T| range_error(*value, &range))
        .interact_text()?;
    Ok(value)
}

/// Collects one sample from the terminal.
pub fn prompt_sample(preset: &FormPreset) -> Result<SoilSample> {
    let bounds = &preset.bounds;
    let defaults = &preset.defaults;

    let nitrogen = prompt_in_range("Nitrogen", None, bounds.nitrogen, defaults.nitrogen)?;
    let phosphorus = prompt_in_range("Phosphorus", None, bounds.phosphorus, defaults.phosphorus)?;
    let potassium = prompt_in_range("Potassium", None, bounds.potassium, defaults.potassium)?;
    let temperature = prompt_in_range("Temperature", Some("°C"), bounds.temperature, defaults.temperature)?;
    let humidity = prompt_in_range("Humidity", Some("%"), bounds.humidity, defaults.humidity)?;
    let ph = prompt_in_range("pH", None, bounds.ph, defaults.ph)?;
    let rainfall = prompt_in_range("Rainfall", Some("mm"), bounds.rainfall, defaults.rainfall)?;

    let labels: Vec<&str> = SoilType::ALL.iter().map(SoilType::as_str).collect();
    let default_soil = SoilType::ALL
        .iter()
        .position(|soil| *soil == defaults.soil_type)
        .unwrap_or(0);
    let idx = Select::new()
        .with_prompt("Soil type")
        .items(&labels)
        .default(default_soil)
        .interact()?;

    Ok(SoilSample::new(
        nitrogen,
        phosphorus,
        potassium,
        temperature,
        humidity,
        ph,
        rainfall,
        SoilType::ALL[idx].as_str(),
    ))
}

pub fn confirm_another() -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt("Evaluate another sample?")
        .default(true)
        .interact()?)
}
