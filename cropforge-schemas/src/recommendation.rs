//! Result records produced for a single submission. Used for display and the
//! submission log only; nothing here is persisted between submissions.

use serde::{Deserialize, Serialize};

/// Result of looking a predicted crop up in the compatibility table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropResolution {
    /// Lower-cased crop the crop model predicted.
    pub predicted: String,
    /// Crop handed to the fertilizer stage.
    pub resolved: String,
    pub was_substituted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FertilizerRecommendation {
    pub crop: String,
    pub fertilizer: String,
    pub soil_type: String,
}

/// Terminal state of a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Completed {
        crop: String,
        resolution: CropResolution,
        fertilizer: FertilizerRecommendation,
    },
    /// The fertilizer stage failed; the crop result still stands.
    CompletedWithWarning {
        crop: String,
        resolution: CropResolution,
        warning: String,
    },
}

impl Outcome {
    pub fn crop(&self) -> &str {
        match self {
            Outcome::Completed { crop, .. } | Outcome::CompletedWithWarning { crop, .. } => crop,
        }
    }

    pub fn resolution(&self) -> &CropResolution {
        match self {
            Outcome::Completed { resolution, .. }
            | Outcome::CompletedWithWarning { resolution, .. } => resolution,
        }
    }

    pub fn fertilizer(&self) -> Option<&FertilizerRecommendation> {
        match self {
            Outcome::Completed { fertilizer, .. } => Some(fertilizer),
            Outcome::CompletedWithWarning { .. } => None,
        }
    }

    pub fn warning(&self) -> Option<&str> {
        match self {
            Outcome::Completed { .. } => None,
            Outcome::CompletedWithWarning { warning, .. } => Some(warning),
        }
    }

    pub fn status(&self) -> &'static str {
        match self {
            Outcome::Completed { .. } => "completed",
            Outcome::CompletedWithWarning { .. } => "completed_with_warning",
        }
    }
}
