use super::engine::RecommendationEngine;
use crate::error::CropforgeError;
use cropforge_schemas::{recommendation::Outcome, sample::SoilSample};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    AwaitingInput,
    Completed,
    CompletedWithWarning,
}

/// One form submission and, once submitted, its terminal outcome.
#[derive(Debug, Clone)]
pub struct Submission {
    sample: SoilSample,
    outcome: Option<Outcome>,
}

impl Submission {
    pub fn new(sample: SoilSample) -> Self {
        Self {
            sample,
            outcome: None,
        }
    }

    pub fn sample(&self) -> &SoilSample {
        &self.sample
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    pub fn state(&self) -> SubmissionState {
        match &self.outcome {
            None => SubmissionState::AwaitingInput,
            Some(Outcome::Completed { .. }) => SubmissionState::Completed,
            Some(Outcome::CompletedWithWarning { .. }) => SubmissionState::CompletedWithWarning,
        }
    }

    /// Runs the pipeline once. Both completed states are terminal: submitting
    /// again returns the stored outcome without re-running anything.
    pub fn submit(&mut self, engine: &RecommendationEngine) -> Result<&Outcome, CropforgeError> {
        let outcome = match self.outcome.take() {
            Some(outcome) => outcome,
            None => engine.recommend(&self.sample)?,
        };
        Ok(self.outcome.insert(outcome))
    }
}
