use crate::{
    artifact::{ClassifierArtifact, EncoderArtifact, ScalerArtifact},
    preset::FormPreset,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct ScalerFile {
    pub schema_version: String,
    pub scaler: ScalerArtifact,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EncoderFile {
    pub schema_version: String,
    pub encoder: EncoderArtifact,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClassifierFile {
    pub schema_version: String,
    pub classifier: ClassifierArtifact,
}

#[derive(Debug, Deserialize)]
pub struct PresetFile {
    pub schema_version: String,
    pub presets: Vec<FormPreset>,
}
