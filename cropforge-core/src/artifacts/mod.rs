//! The fitted artifacts the pipeline runs on, loaded once and never mutated.

pub mod builder;

use crate::{
    classifier::Classifier, encoder::LabelEncoder, error::CropforgeError, scaler::FeatureScaler,
};
use builder::ArtifactSetBuilder;
use cropforge_schemas::file_formats::{ClassifierFile, EncoderFile, ScalerFile};
use serde::de::DeserializeOwned;
use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// Width of the fertilizer model input: encoded crop, encoded soil, N, P, K,
/// temperature, humidity, moisture.
pub const FERTILIZER_FEATURE_COUNT: usize = 8;

const EXTENSIONS: [&str; 3] = ["yaml", "yml", "json"];

/// Immutable context holding every fitted estimator.
///
/// Construct with [`ArtifactSet::load`] or [`ArtifactSetBuilder`].
#[derive(Debug, Clone)]
pub struct ArtifactSet {
    crop_model: Classifier,
    crop_scaler: FeatureScaler,
    fertilizer_model: Classifier,
    fertilizer_scaler: FeatureScaler,
    crop_encoder: LabelEncoder,
    soil_encoder: LabelEncoder,
    fertilizer_encoder: LabelEncoder,
}

impl ArtifactSet {
    /// Loads the seven artifacts from `dir`.
    ///
    /// Each artifact is read from `<name>.yaml`, `<name>.yml` or `<name>.json`.
    /// Any missing or malformed file is reported as [`CropforgeError::ArtifactLoad`].
    pub fn load<P: AsRef<Path>>(dir: P) -> Result<Self, CropforgeError> {
        let dir = dir.as_ref();
        log::info!("Loading artifacts from '{}'", dir.display());

        let crop_model = load_artifact(dir, "crop_model", |file: ClassifierFile| {
            Classifier::new(file.classifier)
        })?;
        let crop_scaler = load_artifact(dir, "crop_scaler", |file: ScalerFile| {
            FeatureScaler::new(file.scaler)
        })?;
        let fertilizer_model = load_artifact(dir, "fertilizer_model", |file: ClassifierFile| {
            Classifier::new(file.classifier)
        })?;
        let fertilizer_scaler = load_artifact(dir, "fertilizer_scaler", |file: ScalerFile| {
            FeatureScaler::new(file.scaler)
        })?;
        let crop_encoder = load_artifact(dir, "crop_encoder", |file: EncoderFile| {
            LabelEncoder::new("crop", file.encoder)
        })?;
        let soil_encoder = load_artifact(dir, "soil_encoder", |file: EncoderFile| {
            LabelEncoder::new("soil type", file.encoder)
        })?;
        let fertilizer_encoder = load_artifact(dir, "fertilizer_encoder", |file: EncoderFile| {
            LabelEncoder::new("fertilizer", file.encoder)
        })?;

        let artifacts = ArtifactSetBuilder::new()
            .with_crop_model(crop_model)
            .with_crop_scaler(crop_scaler)
            .with_fertilizer_model(fertilizer_model)
            .with_fertilizer_scaler(fertilizer_scaler)
            .with_crop_encoder(crop_encoder)
            .with_soil_encoder(soil_encoder)
            .with_fertilizer_encoder(fertilizer_encoder)
            .build()
            .map_err(|e| CropforgeError::ArtifactLoad {
                artifact: "artifact set".to_string(),
                path: dir.display().to_string(),
                source: Box::new(e),
            })?;

        log::info!(
            "Artifacts loaded: {} crop classes, {} fertilizer classes",
            artifacts.crop_model.classes().len(),
            artifacts.fertilizer_encoder.classes().len()
        );
        Ok(artifacts)
    }

    pub fn crop_model(&self) -> &Classifier {
        &self.crop_model
    }

    pub fn crop_scaler(&self) -> &FeatureScaler {
        &self.crop_scaler
    }

    pub fn fertilizer_model(&self) -> &Classifier {
        &self.fertilizer_model
    }

    pub fn fertilizer_scaler(&self) -> &FeatureScaler {
        &self.fertilizer_scaler
    }

    pub fn crop_encoder(&self) -> &LabelEncoder {
        &self.crop_encoder
    }

    pub fn soil_encoder(&self) -> &LabelEncoder {
        &self.soil_encoder
    }

    pub fn fertilizer_encoder(&self) -> &LabelEncoder {
        &self.fertilizer_encoder
    }
}

fn find_artifact_file(dir: &Path, name: &str) -> Option<PathBuf> {
    EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("{}.{}", name, ext)))
        .find(|path| path.is_file())
}

/// Reads one artifact file and turns its wrapper into a pipeline component.
fn load_artifact<F, T, C>(dir: &Path, name: &str, construct: C) -> Result<T, CropforgeError>
where
    F: DeserializeOwned,
    C: FnOnce(F) -> Result<T, CropforgeError>,
{
    let load_error = |path: &Path, source: CropforgeError| CropforgeError::ArtifactLoad {
        artifact: name.to_string(),
        path: path.display().to_string(),
        source: Box::new(source),
    };

    let path = find_artifact_file(dir, name).ok_or_else(|| {
        let missing = dir.join(name);
        let not_found = io::Error::new(io::ErrorKind::NotFound, "no .yaml, .yml or .json file found");
        load_error(&missing, CropforgeError::FileIO(missing.display().to_string(), not_found))
    })?;
    log::debug!("Reading {} from '{}'", name, path.display());

    let path_str = path.display().to_string();
    let content = fs::read_to_string(&path)
        .map_err(|e| load_error(&path, CropforgeError::FileIO(path_str.clone(), e)))?;

    let file: F = if path.extension().map_or(false, |ext| ext == "json") {
        serde_json::from_str(&content).map_err(|e| load_error(&path, CropforgeError::JsonParsing(e)))?
    } else {
        serde_yaml::from_str(&content)
            .map_err(|e| load_error(&path, CropforgeError::YamlParsing(path_str.clone(), e)))?
    };

    construct(file).map_err(|e| load_error(&path, e))
}
