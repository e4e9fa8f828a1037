use crate::{artifacts::ArtifactSet, compatibility, error::CropforgeError};
use cropforge_schemas::{
    artifact::ClassLabel,
    recommendation::{CropResolution, FertilizerRecommendation, Outcome},
    sample::SoilSample,
};

/// Soil moisture fed to the fertilizer model.
///
/// The form does not collect moisture, so every fertilizer prediction uses this
/// fixed mid-range value. It is an approximation carried over from the training
/// data, not a measured input.
pub const ASSUMED_MOISTURE: f64 = 50.0;

/// Runs submissions through the two chained prediction stages.
pub struct RecommendationEngine {
    artifacts: ArtifactSet,
}

impl RecommendationEngine {
    pub fn new(artifacts: ArtifactSet) -> Self {
        Self { artifacts }
    }

    pub fn artifacts(&self) -> &ArtifactSet {
        &self.artifacts
    }

    /// Produces a recommendation for one sample.
    ///
    /// The crop stage always runs. A fertilizer-stage `UnknownCategory` turns into
    /// `Outcome::CompletedWithWarning`; it never escapes this function. Any other
    /// error is a broken contract between the caller and the artifacts and is
    /// returned as-is.
    pub fn recommend(&self, sample: &SoilSample) -> Result<Outcome, CropforgeError> {
        let crop = self.predict_crop(sample)?;
        let resolution = compatibility::resolve(&crop);
        if resolution.was_substituted {
            log::debug!(
                "No fertilizer data for '{}', using '{}' instead",
                resolution.predicted,
                resolution.resolved
            );
        }

        match self.recommend_fertilizer(&resolution, sample) {
            Ok(fertilizer) => Ok(Outcome::Completed {
                crop,
                resolution,
                fertilizer,
            }),
            Err(e) if e.is_unknown_category() => {
                log::warn!("Fertilizer stage failed for crop '{}': {}", crop, e);
                Ok(Outcome::CompletedWithWarning {
                    crop,
                    resolution,
                    warning: e.to_string(),
                })
            }
            Err(e) => Err(e),
        }
    }

    /// Normalizes the seven numeric fields and predicts a crop name.
    pub fn predict_crop(&self, sample: &SoilSample) -> Result<String, CropforgeError> {
        let scaled = self.artifacts.crop_scaler().transform(&sample.crop_features())?;
        match self.artifacts.crop_model().predict(&scaled)? {
            ClassLabel::Name(name) => Ok(name.clone()),
            // The builder only accepts crop models with text classes.
            ClassLabel::Code(code) => Ok(code.to_string()),
        }
    }

    /// Encodes the resolved crop and the sample's soil type.
    pub fn encode_categoricals(
        &self,
        crop: &str,
        soil_type: &str,
    ) -> Result<(usize, usize), CropforgeError> {
        let crop_code = self.artifacts.crop_encoder().transform(crop)?;
        let soil_code = self.artifacts.soil_encoder().transform(soil_type)?;
        Ok((crop_code, soil_code))
    }

    /// Encodes, scales, predicts and decodes a fertilizer for the resolved crop.
    pub fn recommend_fertilizer(
        &self,
        resolution: &CropResolution,
        sample: &SoilSample,
    ) -> Result<FertilizerRecommendation, CropforgeError> {
        let (crop_code, soil_code) =
            self.encode_categoricals(&resolution.resolved, sample.soil_type())?;

        let features = [
            crop_code as f64,
            soil_code as f64,
            f64::from(sample.nitrogen()),
            f64::from(sample.phosphorus()),
            f64::from(sample.potassium()),
            sample.temperature(),
            sample.humidity(),
            ASSUMED_MOISTURE,
        ];
        let scaled = self.artifacts.fertilizer_scaler().transform(&features)?;

        let encoder = self.artifacts.fertilizer_encoder();
        let fertilizer = match self.artifacts.fertilizer_model().predict(&scaled)? {
            ClassLabel::Code(code) => encoder.inverse_transform(*code)?,
            ClassLabel::Name(name) => {
                return Err(CropforgeError::UnknownCategory {
                    encoder: encoder.field().to_string(),
                    value: name.clone(),
                })
            }
        };

        Ok(FertilizerRecommendation {
            crop: resolution.resolved.clone(),
            fertilizer: fertilizer.to_string(),
            soil_type: sample.soil_type().to_string(),
        })
    }
}
