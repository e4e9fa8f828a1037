use crate::error::CropforgeError;
use cropforge_schemas::{recommendation::Outcome, sample::SoilSample};
use csv::{Writer, WriterBuilder};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::path::Path;

/// One row of the submission log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: String,
    pub nitrogen: u32,
    pub phosphorus: u32,
    pub potassium: u32,
    pub temperature: f64,
    pub humidity: f64,
    pub ph: f64,
    pub rainfall: f64,
    pub soil_type: String,
    pub predicted_crop: String,
    pub resolved_crop: String,
    pub was_substituted: bool,
    pub fertilizer: String,
    pub status: String,
    pub warning: String,
}

impl LogEntry {
    pub fn new(sample: &SoilSample, outcome: &Outcome) -> Self {
        let resolution = outcome.resolution();
        Self {
            timestamp: chrono::Utc::now().to_rfc3339(),
            nitrogen: sample.nitrogen(),
            phosphorus: sample.phosphorus(),
            potassium: sample.potassium(),
            temperature: sample.temperature(),
            humidity: sample.humidity(),
            ph: sample.ph(),
            rainfall: sample.rainfall(),
            soil_type: sample.soil_type().to_string(),
            predicted_crop: outcome.crop().to_string(),
            resolved_crop: resolution.resolved.clone(),
            was_substituted: resolution.was_substituted,
            fertilizer: outcome
                .fertilizer()
                .map(|f| f.fertilizer.clone())
                .unwrap_or_default(),
            status: outcome.status().to_string(),
            warning: outcome.warning().unwrap_or_default().to_string(),
        }
    }
}

/// Appends one CSV row per submission.
pub struct RecommendationLogger {
    path: String,
    writer: Writer<fs::File>,
}

impl RecommendationLogger {
    /// Opens `path` for appending. The header row is written only when the file
    /// is new or empty.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, CropforgeError> {
        let path = path.as_ref();
        let path_str = path.display().to_string();
        let needs_header = fs::metadata(path).map(|m| m.len() == 0).unwrap_or(true);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| CropforgeError::FileIO(path_str.clone(), e))?;
        let writer = WriterBuilder::new()
            .has_headers(needs_header)
            .from_writer(file);
        Ok(Self { path: path_str, writer })
    }

    pub fn log_outcome(&mut self, sample: &SoilSample, outcome: &Outcome) -> Result<(), CropforgeError> {
        self.writer
            .serialize(LogEntry::new(sample, outcome))
            .map_err(|e| CropforgeError::CsvError(self.path.clone(), e))?;
        self.writer
            .flush()
            .map_err(|e| CropforgeError::FileIO(self.path.clone(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{pipeline::engine::RecommendationEngine, testing};
    use std::env;

    fn scratch_log(test: &str) -> std::path::PathBuf {
        let path = env::temp_dir().join(format!("cropforge-log-{}-{}.csv", test, std::process::id()));
        let _ = fs::remove_file(&path);
        path
    }

    #[test]
    fn writes_header_once_across_reopens() {
        let path = scratch_log("reopen");
        let engine = RecommendationEngine::new(testing::artifacts());
        let sample = SoilSample::new(90, 42, 43, 22.0, 82.0, 6.5, 200.0, "sandy");
        let outcome = engine.recommend(&sample).unwrap();

        RecommendationLogger::new(&path).unwrap().log_outcome(&sample, &outcome).unwrap();
        RecommendationLogger::new(&path).unwrap().log_outcome(&sample, &outcome).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 3);
        assert_eq!(content.matches("timestamp").count(), 1);

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let rows: Vec<LogEntry> = reader.deserialize().map(|r| r.unwrap()).collect();
        assert_eq!(rows[0].predicted_crop, "rice");
        assert_eq!(rows[0].resolved_crop, "barley");
        assert!(rows[0].was_substituted);
        assert_eq!(rows[1].status, "completed");
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn warning_rows_leave_fertilizer_empty() {
        let path = scratch_log("warning");
        let engine = RecommendationEngine::new(testing::artifacts());
        let sample = SoilSample::new(90, 42, 43, 22.0, 82.0, 6.5, 200.0, "peat");
        let outcome = engine.recommend(&sample).unwrap();

        RecommendationLogger::new(&path).unwrap().log_outcome(&sample, &outcome).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let row: LogEntry = reader.deserialize().next().unwrap().unwrap();
        assert_eq!(row.fertilizer, "");
        assert_eq!(row.status, "completed_with_warning");
        assert!(row.warning.contains("peat"));
        fs::remove_file(&path).unwrap();
    }
}
