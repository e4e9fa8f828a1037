use super::{ArtifactSet, FERTILIZER_FEATURE_COUNT};
use crate::{
    classifier::Classifier, encoder::LabelEncoder, error::CropforgeError, scaler::FeatureScaler,
};
use cropforge_schemas::{artifact::ClassLabel, sample::CROP_FEATURE_COUNT};

/// A fluent builder for assembling an `ArtifactSet` from components already in memory.
///
/// [`ArtifactSet::load`] uses this after reading the files; tests use it directly.
#[derive(Default)]
pub struct ArtifactSetBuilder {
    crop_model: Option<Classifier>,
    crop_scaler: Option<FeatureScaler>,
    fertilizer_model: Option<Classifier>,
    fertilizer_scaler: Option<FeatureScaler>,
    crop_encoder: Option<LabelEncoder>,
    soil_encoder: Option<LabelEncoder>,
    fertilizer_encoder: Option<LabelEncoder>,
}

impl ArtifactSetBuilder {
    /// Creates a new, empty `ArtifactSetBuilder`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the classifier mapping scaled soil and climate features to a crop name.
    pub fn with_crop_model(mut self, model: Classifier) -> Self {
        self.crop_model = Some(model);
        self
    }

    pub fn with_crop_scaler(mut self, scaler: FeatureScaler) -> Self {
        self.crop_scaler = Some(scaler);
        self
    }

    /// Sets the classifier mapping scaled fertilizer features to an encoded fertilizer.
    pub fn with_fertilizer_model(mut self, model: Classifier) -> Self {
        self.fertilizer_model = Some(model);
        self
    }

    pub fn with_fertilizer_scaler(mut self, scaler: FeatureScaler) -> Self {
        self.fertilizer_scaler = Some(scaler);
        self
    }

    pub fn with_crop_encoder(mut self, encoder: LabelEncoder) -> Self {
        self.crop_encoder = Some(encoder);
        self
    }

    pub fn with_soil_encoder(mut self, encoder: LabelEncoder) -> Self {
        self.soil_encoder = Some(encoder);
        self
    }

    pub fn with_fertilizer_encoder(mut self, encoder: LabelEncoder) -> Self {
        self.fertilizer_encoder = Some(encoder);
        self
    }

    /// Consumes the builder and returns the assembled `ArtifactSet`.
    ///
    /// # Errors
    ///
    /// Returns `ArtifactMissing` if any component was not provided, and
    /// `InvalidArtifact` if the components disagree on feature widths or the
    /// models emit the wrong kind of class.
    pub fn build(self) -> Result<ArtifactSet, CropforgeError> {
        let artifacts = ArtifactSet {
            crop_model: self.crop_model.ok_or_else(|| missing("crop_model"))?,
            crop_scaler: self.crop_scaler.ok_or_else(|| missing("crop_scaler"))?,
            fertilizer_model: self
                .fertilizer_model
                .ok_or_else(|| missing("fertilizer_model"))?,
            fertilizer_scaler: self
                .fertilizer_scaler
                .ok_or_else(|| missing("fertilizer_scaler"))?,
            crop_encoder: self.crop_encoder.ok_or_else(|| missing("crop_encoder"))?,
            soil_encoder: self.soil_encoder.ok_or_else(|| missing("soil_encoder"))?,
            fertilizer_encoder: self
                .fertilizer_encoder
                .ok_or_else(|| missing("fertilizer_encoder"))?,
        };

        expect_width("crop_scaler", artifacts.crop_scaler.n_features(), CROP_FEATURE_COUNT)?;
        expect_width("crop_model", artifacts.crop_model.n_features(), CROP_FEATURE_COUNT)?;
        expect_width(
            "fertilizer_scaler",
            artifacts.fertilizer_scaler.n_features(),
            FERTILIZER_FEATURE_COUNT,
        )?;
        expect_width(
            "fertilizer_model",
            artifacts.fertilizer_model.n_features(),
            FERTILIZER_FEATURE_COUNT,
        )?;

        let crop_classes_are_names = artifacts
            .crop_model
            .classes()
            .iter()
            .all(|c| matches!(c, ClassLabel::Name(name) if !name.trim().is_empty()));
        if !crop_classes_are_names {
            return Err(CropforgeError::InvalidArtifact(
                "crop_model classes must be non-empty crop names".to_string(),
            ));
        }

        let fertilizer_classes_are_codes = artifacts
            .fertilizer_model
            .classes()
            .iter()
            .all(|c| matches!(c, ClassLabel::Code(_)));
        if !fertilizer_classes_are_codes {
            return Err(CropforgeError::InvalidArtifact(
                "fertilizer_model classes must be encoded integers".to_string(),
            ));
        }

        Ok(artifacts)
    }
}

fn missing(name: &str) -> CropforgeError {
    CropforgeError::ArtifactMissing(name.to_string())
}

fn expect_width(name: &str, found: usize, expected: usize) -> Result<(), CropforgeError> {
    if found == expected {
        Ok(())
    } else {
        Err(CropforgeError::InvalidArtifact(format!(
            "{} expects {} features, the pipeline supplies {}",
            name, found, expected
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;

    #[test]
    fn builds_complete_set() {
        let artifacts = testing::artifacts();
        assert_eq!(artifacts.crop_scaler().n_features(), CROP_FEATURE_COUNT);
        assert_eq!(artifacts.fertilizer_scaler().n_features(), FERTILIZER_FEATURE_COUNT);
    }

    #[test]
    fn reports_missing_component() {
        let result = ArtifactSetBuilder::new()
            .with_crop_model(testing::crop_model())
            .with_crop_scaler(testing::identity_scaler(CROP_FEATURE_COUNT))
            .with_fertilizer_model(testing::fertilizer_model())
            .with_fertilizer_scaler(testing::identity_scaler(FERTILIZER_FEATURE_COUNT))
            .with_crop_encoder(testing::crop_encoder())
            .with_fertilizer_encoder(testing::fertilizer_encoder())
            .build();
        match result {
            Err(CropforgeError::ArtifactMissing(name)) => assert_eq!(name, "soil_encoder"),
            other => panic!("expected a missing artifact, got {:?}", other),
        }
    }

    #[test]
    fn rejects_scaler_of_wrong_width() {
        let result = testing::builder()
            .with_crop_scaler(testing::identity_scaler(6))
            .build();
        assert!(matches!(result, Err(CropforgeError::InvalidArtifact(_))));
    }

    #[test]
    fn rejects_fertilizer_model_with_text_classes() {
        let result = testing::builder()
            .with_fertilizer_model(testing::constant_classifier(
                FERTILIZER_FEATURE_COUNT,
                ClassLabel::Name("Urea".to_string()),
            ))
            .build();
        assert!(matches!(result, Err(CropforgeError::InvalidArtifact(_))));
    }

    #[test]
    fn rejects_crop_model_with_code_classes() {
        let result = testing::builder()
            .with_crop_model(testing::constant_classifier(
                CROP_FEATURE_COUNT,
                ClassLabel::Code(2),
            ))
            .build();
        assert!(matches!(result, Err(CropforgeError::InvalidArtifact(_))));
    }
}
