//! Categorical label encoding against a fitted vocabulary.

use crate::error::CropforgeError;
use cropforge_schemas::artifact::EncoderArtifact;
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct LabelEncoder {
    /// Field name used in error messages, e.g. "soil type".
    field: String,
    classes: Vec<String>,
    codes: HashMap<String, usize>,
}

impl LabelEncoder {
    pub fn new(field: &str, artifact: EncoderArtifact) -> Result<Self, CropforgeError> {
        if artifact.classes.is_empty() {
            return Err(CropforgeError::InvalidArtifact(format!(
                "{} encoder has an empty vocabulary",
                field
            )));
        }

        let mut codes = HashMap::with_capacity(artifact.classes.len());
        for (code, label) in artifact.classes.iter().enumerate() {
            if codes.insert(normalize(label), code).is_some() {
                return Err(CropforgeError::InvalidArtifact(format!(
                    "{} encoder lists '{}' twice",
                    field, label
                )));
            }
        }

        Ok(Self {
            field: field.to_string(),
            classes: artifact.classes,
            codes,
        })
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Maps a label to its integer code. Matching ignores case and surrounding
    /// whitespace on both the label and the vocabulary.
    pub fn transform(&self, label: &str) -> Result<usize, CropforgeError> {
        let normalized = normalize(label);
        self.codes
            .get(&normalized)
            .copied()
            .ok_or_else(|| CropforgeError::UnknownCategory {
                encoder: self.field.clone(),
                value: normalized,
            })
    }

    /// Maps a code back to its label. Negative codes and codes past the end of
    /// the vocabulary are unknown categories.
    pub fn inverse_transform(&self, code: i64) -> Result<&str, CropforgeError> {
        usize::try_from(code)
            .ok()
            .and_then(|i| self.classes.get(i))
            .map(String::as_str)
            .ok_or_else(|| CropforgeError::UnknownCategory {
                encoder: self.field.clone(),
                value: code.to_string(),
            })
    }
}

fn normalize(label: &str) -> String {
    label.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn soil_encoder() -> LabelEncoder {
        LabelEncoder::new(
            "soil type",
            EncoderArtifact {
                classes: ["black", "clay", "loamy", "red", "sandy"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            },
        )
        .unwrap()
    }

    #[test]
    fn codes_are_vocabulary_positions() {
        let encoder = soil_encoder();
        assert_eq!(encoder.transform("black").unwrap(), 0);
        assert_eq!(encoder.transform("sandy").unwrap(), 4);
    }

    #[test]
    fn transform_normalizes_case_and_whitespace() {
        assert_eq!(soil_encoder().transform(" Loamy ").unwrap(), 2);
    }

    #[test]
    fn unknown_label_is_an_unknown_category() {
        match soil_encoder().transform("Peat") {
            Err(CropforgeError::UnknownCategory { encoder, value }) => {
                assert_eq!(encoder, "soil type");
                assert_eq!(value, "peat");
            }
            other => panic!("expected unknown category, got {:?}", other),
        }
    }

    #[test]
    fn inverse_transform_returns_vocabulary_labels() {
        let encoder = soil_encoder();
        for code in 0..5 {
            let label = encoder.inverse_transform(code).unwrap();
            assert!(encoder.classes().iter().any(|c| c == label));
        }
    }

    #[test]
    fn inverse_transform_rejects_out_of_range_codes() {
        let encoder = soil_encoder();
        assert!(encoder.inverse_transform(5).unwrap_err().is_unknown_category());
        assert!(encoder.inverse_transform(-1).unwrap_err().is_unknown_category());
    }

    #[test]
    fn rejects_duplicate_vocabulary_entries() {
        let result = LabelEncoder::new(
            "crop",
            EncoderArtifact {
                classes: vec!["maize".to_string(), "maize".to_string()],
            },
        );
        assert!(matches!(result, Err(CropforgeError::InvalidArtifact(_))));
    }

    #[test]
    fn mixed_case_vocabulary_matches_any_spelling() {
        let encoder = LabelEncoder::new(
            "crop",
            EncoderArtifact {
                classes: vec!["Barley".to_string(), "Maize".to_string()],
            },
        )
        .unwrap();

        assert_eq!(encoder.transform("barley").unwrap(), 0);
        assert_eq!(encoder.transform("Barley").unwrap(), 0);
        assert_eq!(encoder.transform("MAIZE").unwrap(), 1);
        assert_eq!(encoder.inverse_transform(1).unwrap(), "Maize");
    }

    #[test]
    fn rejects_entries_differing_only_in_case() {
        let result = LabelEncoder::new(
            "fertilizer",
            EncoderArtifact {
                classes: vec!["Urea".to_string(), "urea ".to_string()],
            },
        );
        assert!(matches!(result, Err(CropforgeError::InvalidArtifact(_))));
    }
}
