use crate::{display, form, plotting};
use anyhow::{bail, Context, Result};
use cropforge_core::{
    analysis::{self, BatchSummary},
    logger::RecommendationLogger,
    pipeline::{engine::RecommendationEngine, state::Submission},
};
use cropforge_schemas::{
    preset::{FieldBounds, FormPreset},
    recommendation::Outcome,
    sample::{SoilSample, SoilType},
};
use serde::Deserialize;
use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// One row of a batch input file.
#[derive(Debug, Clone, Deserialize)]
pub struct SampleRow {
    pub nitrogen: u32,
    pub phosphorus: u32,
    pub potassium: u32,
    pub temperature: f64,
    pub humidity: f64,
    pub ph: f64,
    pub rainfall: f64,
    pub soil_type: String,
}

impl SampleRow {
    pub fn to_sample(&self) -> SoilSample {
        SoilSample::new(
            self.nitrogen,
            self.phosphorus,
            self.potassium,
            self.temperature,
            self.humidity,
            self.ph,
            self.rainfall,
            &self.soil_type,
        )
    }
}

fn check_bounds(sample: &SoilSample, bounds: &FieldBounds) -> Result<()> {
    if let Err(violations) = sample.validate(bounds) {
        let details: Vec<String> = violations.iter().map(|v| v.to_string()).collect();
        bail!("Sample rejected: {}", details.join("; "));
    }
    Ok(())
}

fn note_unknown_soil(sample: &SoilSample) {
    if sample.known_soil_type().is_none() {
        let known: Vec<&str> = SoilType::ALL.iter().map(SoilType::as_str).collect();
        log::warn!(
            "Soil type '{}' is not one of {}; no fertilizer can be recommended for it",
            sample.soil_type(),
            known.join(", ")
        );
    }
}

fn open_log(path: Option<&Path>) -> Result<Option<RecommendationLogger>> {
    path.map(|path| {
        RecommendationLogger::new(path).with_context(|| format!("Failed to open log file {:?}", path))
    })
    .transpose()
}

/// Runs one sample through the engine and reports the result.
pub fn run_single(
    engine: &RecommendationEngine,
    sample: SoilSample,
    bounds: &FieldBounds,
    log_path: Option<&Path>,
    as_json: bool,
) -> Result<Outcome> {
    check_bounds(&sample, bounds)?;
    note_unknown_soil(&sample);
    let mut logger = open_log(log_path)?;

    let mut submission = Submission::new(sample);
    let outcome = submission.submit(engine)?.clone();

    if as_json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        display::print_outcome(&outcome);
    }
    if let Some(logger) = logger.as_mut() {
        logger.log_outcome(submission.sample(), &outcome)?;
    }
    Ok(outcome)
}

/// Prompts for samples until the user stops.
pub fn run_interactive(engine: &RecommendationEngine, preset: &FormPreset, log_path: Option<&Path>) -> Result<()> {
    let mut logger = open_log(log_path)?;
    println!("--- Crop & Fertilizer Recommendation ({}) ---", preset.name);

    loop {
        let sample = form::prompt_sample(preset)?;
        let mut submission = Submission::new(sample.clone());
        let outcome = submission.submit(engine)?;

        println!();
        display::print_outcome(outcome);
        println!();

        if let Some(logger) = logger.as_mut() {
            logger.log_outcome(&sample, outcome)?;
        }
        if !form::confirm_another()? {
            break;
        }
    }
    Ok(())
}

/// Reads a batch file. Rows outside `bounds` are skipped with a warning; each
/// kept sample carries its 1-based data row number.
pub fn read_samples(path: &Path, bounds: &FieldBounds) -> Result<Vec<(usize, SoilSample)>> {
    let mut reader =
        csv::Reader::from_path(path).with_context(|| format!("Failed to open batch file {:?}", path))?;

    let mut samples = Vec::new();
    for (i, record) in reader.deserialize().enumerate() {
        let row_number = i + 1;
        let row: SampleRow = record.with_context(|| format!("Failed to parse row {} of {:?}", row_number, path))?;
        let sample = row.to_sample();
        match check_bounds(&sample, bounds) {
            Ok(()) => {
                note_unknown_soil(&sample);
                samples.push((row_number, sample))
            }
            Err(e) => log::warn!("Skipping row {}: {}", row_number, e),
        }
    }
    Ok(samples)
}

pub struct BatchOptions {
    pub plot: bool,
}

/// Creates a new `batch_<timestamp>` directory under `output_dir`. A run never
/// reuses an existing directory; a numeric suffix is added when the timestamp is
/// already taken.
pub fn create_run_dir(output_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory: {:?}", output_dir))?;

    let stem = format!("batch_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S_%3f"));
    let mut attempt = 1;
    loop {
        let run_dir = match attempt {
            1 => output_dir.join(&stem),
            n => output_dir.join(format!("{}_{}", stem, n)),
        };
        match fs::create_dir(&run_dir) {
            Ok(()) => return Ok(run_dir),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => attempt += 1,
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to create run directory: {:?}", run_dir))
            }
        }
    }
}

/// Runs every row of `input` and writes the results into a fresh timestamped
/// directory under `output_dir`.
pub fn run_batch(
    engine: &RecommendationEngine,
    preset: &FormPreset,
    input: &Path,
    output_dir: &Path,
    options: &BatchOptions,
) -> Result<PathBuf> {
    let run_dir = create_run_dir(output_dir)?;
    log::info!("[Workflow] Batch run writing to {:?}", run_dir);

    // Keep the input next to the results for traceability.
    let input_name = input.file_name().map_or_else(|| "input.csv".into(), |n| n.to_os_string());
    fs::copy(input, run_dir.join(input_name))
        .with_context(|| format!("Failed to copy {:?} into the run directory", input))?;

    let samples = read_samples(input, &preset.bounds)?;
    let mut logger = RecommendationLogger::new(run_dir.join("recommendations.csv"))?;
    let mut summary = BatchSummary::default();

    for (row_number, sample) in samples {
        let mut submission = Submission::new(sample.clone());
        let outcome = submission
            .submit(engine)
            .with_context(|| format!("Recommendation failed for row {}", row_number))?;
        log::debug!("Row {}: {} ({})", row_number, outcome.crop(), outcome.status());
        logger.log_outcome(&sample, outcome)?;
        summary.record(outcome);
    }

    fs::write(run_dir.join("summary.json"), serde_json::to_string_pretty(&summary)?)?;
    if options.plot {
        plotting::plot_crop_distribution(&run_dir, &summary)?;
    }

    print_summary_report(&summary);
    Ok(run_dir)
}

/// Rebuilds and prints the summary of an existing submission log.
pub fn summarize_log(path: &Path) -> Result<BatchSummary> {
    let summary = analysis::summarize_log(path)?;
    print_summary_report(&summary);
    Ok(summary)
}

fn print_summary_report(summary: &BatchSummary) {
    println!("\n--- [Summary Report] ---");
    println!("========================================");
    println!("  - Samples:                  {}", summary.total);
    println!("  - With fertilizer:          {}", summary.completed);
    println!("  - Fertilizer unavailable:   {}", summary.with_warning);
    println!("  - Crop substituted:         {}", summary.substituted);
    if let Some((crop, count)) = summary.top_crop() {
        println!("  - Most recommended crop:    {} ({})", display::capitalize(crop), count);
    }

    println!("\nCrops:");
    for (crop, count) in &summary.crop_counts {
        println!("    - {:<14} {:>5}", display::capitalize(crop), count);
    }
    println!("\nFertilizers:");
    for (fertilizer, count) in &summary.fertilizer_counts {
        println!("    - {:<14} {:>5}", fertilizer, count);
    }
    println!("========================================");
}

#[cfg(test)]
mod tests {
    use super::*;
    use cropforge_core::artifacts::ArtifactSet;
    use std::env;

    const BATCH: &str = "\
nitrogen,phosphorus,potassium,temperature,humidity,ph,rainfall,soil_type
90,42,43,22.0,82.0,6.5,200.0,Sandy
80,45,20,23.0,75.0,6.2,90.0,loamy
250,42,43,22.0,82.0,6.5,200.0,sandy
90,42,43,22.0,82.0,6.5,200.0,volcanic
";

    fn scratch_dir(test: &str) -> PathBuf {
        let dir = env::temp_dir().join(format!("cropforge-workflow-{}-{}", test, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn engine() -> RecommendationEngine {
        let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../data/artifacts");
        RecommendationEngine::new(ArtifactSet::load(dir).unwrap())
    }

    #[test]
    fn out_of_range_rows_are_skipped() {
        let dir = scratch_dir("read");
        let input = dir.join("samples.csv");
        fs::write(&input, BATCH).unwrap();

        let samples = read_samples(&input, &FormPreset::classic().bounds).unwrap();
        let rows: Vec<usize> = samples.iter().map(|(row, _)| *row).collect();
        assert_eq!(rows, vec![1, 2, 4]);
        assert_eq!(samples[0].1.soil_type(), "sandy");
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn single_run_rejects_out_of_range_sample() {
        let sample = SoilSample::new(90, 42, 43, 22.0, 82.0, 11.0, 200.0, "sandy");
        let err = run_single(&engine(), sample, &FormPreset::classic().bounds, None, false).unwrap_err();
        assert!(err.to_string().contains("ph"));
    }

    #[test]
    fn single_run_appends_to_log() {
        let dir = scratch_dir("single");
        let log = dir.join("log.csv");
        let sample = FormPreset::classic().defaults.to_sample();

        let outcome = run_single(&engine(), sample, &FormPreset::classic().bounds, Some(&log), true).unwrap();
        assert_eq!(outcome.crop(), "rice");
        assert_eq!(analysis::summarize_log(&log).unwrap().total, 1);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn batch_run_writes_results() {
        let dir = scratch_dir("batch");
        let input = dir.join("samples.csv");
        fs::write(&input, BATCH).unwrap();

        let run_dir = run_batch(
            &engine(),
            &FormPreset::classic(),
            &input,
            &dir.join("runs"),
            &BatchOptions { plot: false },
        )
        .unwrap();

        assert!(run_dir.join("samples.csv").exists());
        let summary: BatchSummary =
            serde_json::from_str(&fs::read_to_string(run_dir.join("summary.json")).unwrap()).unwrap();
        assert_eq!(summary.total, 3);
        assert_eq!(summary.completed, 2);
        assert_eq!(summary.with_warning, 1);
        assert_eq!(summary.crop_counts["rice"], 2);
        assert_eq!(analysis::summarize_log(run_dir.join("recommendations.csv")).unwrap(), summary);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn single_run_with_unknown_soil_warns_and_logs() {
        let dir = scratch_dir("unknown-soil");
        let log = dir.join("log.csv");
        let sample = SoilSample::new(90, 42, 43, 22.0, 82.0, 6.5, 200.0, "volcanic");

        let outcome = run_single(&engine(), sample, &FormPreset::classic().bounds, Some(&log), false).unwrap();
        assert_eq!(outcome.status(), "completed_with_warning");
        assert_eq!(outcome.crop(), "rice");
        assert!(outcome.warning().unwrap().contains("volcanic"));

        let summary = analysis::summarize_log(&log).unwrap();
        assert_eq!(summary.total, 1);
        assert_eq!(summary.with_warning, 1);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn run_dirs_are_never_shared() {
        let dir = scratch_dir("run-dirs");
        let first = create_run_dir(&dir).unwrap();
        let second = create_run_dir(&dir).unwrap();
        assert_ne!(first, second);
        assert!(first.is_dir() && second.is_dir());
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn back_to_back_batches_keep_separate_logs() {
        let dir = scratch_dir("back-to-back");
        let input = dir.join("samples.csv");
        fs::write(&input, BATCH).unwrap();
        let engine = engine();
        let options = BatchOptions { plot: false };

        let first = run_batch(&engine, &FormPreset::classic(), &input, &dir.join("runs"), &options).unwrap();
        let second = run_batch(&engine, &FormPreset::classic(), &input, &dir.join("runs"), &options).unwrap();
        assert_ne!(first, second);

        for run_dir in [first, second] {
            let summary: BatchSummary =
                serde_json::from_str(&fs::read_to_string(run_dir.join("summary.json")).unwrap()).unwrap();
            let from_log = analysis::summarize_log(run_dir.join("recommendations.csv")).unwrap();
            assert_eq!(from_log.total, 3);
            assert_eq!(from_log, summary);
        }
        fs::remove_dir_all(&dir).unwrap();
    }
}
