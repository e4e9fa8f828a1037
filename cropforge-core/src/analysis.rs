//! Aggregates over many recommendations, either in memory or read back from a
//! submission log.

use crate::{error::CropforgeError, logger::LogEntry};
use cropforge_schemas::recommendation::Outcome;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total: usize,
    pub completed: usize,
    pub with_warning: usize,
    pub substituted: usize,
    pub crop_counts: BTreeMap<String, usize>,
    pub fertilizer_counts: BTreeMap<String, usize>,
}

impl BatchSummary {
    pub fn record(&mut self, outcome: &Outcome) {
        self.add(
            outcome.crop(),
            outcome.resolution().was_substituted,
            outcome.fertilizer().map(|f| f.fertilizer.as_str()),
        );
    }

    fn add(&mut self, crop: &str, was_substituted: bool, fertilizer: Option<&str>) {
        self.total += 1;
        if was_substituted {
            self.substituted += 1;
        }
        *self.crop_counts.entry(crop.to_lowercase()).or_insert(0) += 1;
        match fertilizer {
            Some(fertilizer) => {
                self.completed += 1;
                *self.fertilizer_counts.entry(fertilizer.to_string()).or_insert(0) += 1;
            }
            None => self.with_warning += 1,
        }
    }

    /// The most frequent crop; ties go to the alphabetically first.
    pub fn top_crop(&self) -> Option<(&str, usize)> {
        self.crop_counts
            .iter()
            .fold(None, |best: Option<(&str, usize)>, (crop, count)| match best {
                Some((_, best_count)) if best_count >= *count => best,
                _ => Some((crop.as_str(), *count)),
            })
    }
}

pub fn summarize<'a, I>(outcomes: I) -> BatchSummary
where
    I: IntoIterator<Item = &'a Outcome>,
{
    let mut summary = BatchSummary::default();
    for outcome in outcomes {
        summary.record(outcome);
    }
    summary
}

/// Rebuilds a summary from a CSV file written by `RecommendationLogger`.
pub fn summarize_log<P: AsRef<Path>>(path: P) -> Result<BatchSummary, CropforgeError> {
    let path_str = path.as_ref().display().to_string();
    let mut reader =
        csv::Reader::from_path(path.as_ref()).map_err(|e| CropforgeError::CsvError(path_str.clone(), e))?;

    let mut summary = BatchSummary::default();
    for record in reader.deserialize() {
        let entry: LogEntry = record.map_err(|e| CropforgeError::CsvError(path_str.clone(), e))?;
        let fertilizer = (entry.status == "completed").then_some(entry.fertilizer.as_str());
        summary.add(&entry.predicted_crop, entry.was_substituted, fertilizer);
    }
    Ok(summary)
}
