use thiserror::Error;

#[derive(Debug, Error)]
pub enum CropforgeError {
    #[error("Failed to load {artifact} from '{path}': {source}")]
    ArtifactLoad {
        artifact: String,
        path: String,
        #[source]
        source: Box<CropforgeError>,
    },

    #[error("Invalid artifact: {0}")]
    InvalidArtifact(String),

    #[error("Artifact '{0}' was not provided")]
    ArtifactMissing(String),

    #[error("Unknown {encoder} '{value}': not in the fitted vocabulary")]
    UnknownCategory { encoder: String, value: String },

    #[error("Expected {expected} features, found {found}")]
    FeatureShape { expected: usize, found: usize },

    #[error("I/O error for file '{0}': {1}")]
    FileIO(String, #[source] std::io::Error),

    #[error("Failed to parse YAML from '{0}': {1}")]
    YamlParsing(String, #[source] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParsing(#[from] serde_json::Error),

    #[error("Failed to process CSV file '{0}': {1}")]
    CsvError(String, #[source] csv::Error),
}

impl CropforgeError {
    pub fn is_unknown_category(&self) -> bool {
        matches!(self, CropforgeError::UnknownCategory { .. })
    }
}
