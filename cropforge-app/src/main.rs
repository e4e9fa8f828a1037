use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cropforge_core::{artifacts::ArtifactSet, pipeline::engine::RecommendationEngine};
use cropforge_schemas::{preset::FormPreset, sample::SoilSample};
use std::path::{Path, PathBuf};

mod config;
mod display;
mod form;
mod plotting;
mod workflow;

/// Crop and fertilizer recommendation from soil and climate measurements.
#[derive(Parser, Debug)]
#[command(name = "cropforge", version, about, long_about = None)]
struct Cli {
    /// Configuration file (defaults to ./cropforge.yaml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the fitted artifacts
    #[arg(short, long, global = true)]
    artifacts: Option<PathBuf>,

    /// Form preset supplying bounds and defaults
    #[arg(short, long, global = true)]
    preset: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Recommend for one sample given on the command line; unset fields take the preset default
    Recommend {
        #[arg(short = 'n', long)]
        nitrogen: Option<u32>,
        #[arg(short = 'P', long)]
        phosphorus: Option<u32>,
        #[arg(short = 'k', long)]
        potassium: Option<u32>,
        #[arg(short, long)]
        temperature: Option<f64>,
        #[arg(short = 'u', long)]
        humidity: Option<f64>,
        #[arg(long)]
        ph: Option<f64>,
        #[arg(short, long)]
        rainfall: Option<f64>,
        #[arg(short, long)]
        soil_type: Option<String>,

        /// Print the outcome as JSON
        #[arg(long, default_value = "false")]
        json: bool,

        /// Append the submission to this CSV log
        #[arg(long)]
        log: Option<PathBuf>,
    },

    /// Fill in the form interactively, one sample after another
    Interactive {
        /// Append every submission to this CSV log
        #[arg(long)]
        log: Option<PathBuf>,
    },

    /// Run every row of a CSV file and write a report into the output directory
    Batch {
        input: PathBuf,

        /// Skip the crop distribution chart
        #[arg(long, default_value = "false")]
        no_plot: bool,
    },

    /// Summarize an existing submission log
    Summarize { log: PathBuf },

    /// List the available form presets
    Presets,

    /// Show the vocabularies and feature widths of the loaded artifacts
    Inspect,
}

fn load_engine(dir: &Path) -> Result<RecommendationEngine> {
    let artifacts =
        ArtifactSet::load(dir).with_context(|| format!("Failed to load artifacts from {:?}", dir))?;
    Ok(RecommendationEngine::new(artifacts))
}

fn main() -> Result<()> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let config = config::AppConfig::load(cli.config.as_deref())?;
    let settings = config::Settings::resolve(config, cli.artifacts)?;
    let preset = settings.preset(cli.preset.as_deref())?;
    log::debug!("Using preset '{}'", preset.name);

    match cli.command {
        Commands::Recommend {
            nitrogen,
            phosphorus,
            potassium,
            temperature,
            humidity,
            ph,
            rainfall,
            soil_type,
            json,
            log,
        } => {
            let defaults = &preset.defaults;
            let sample = SoilSample::new(
                nitrogen.unwrap_or(defaults.nitrogen),
                phosphorus.unwrap_or(defaults.phosphorus),
                potassium.unwrap_or(defaults.potassium),
                temperature.unwrap_or(defaults.temperature),
                humidity.unwrap_or(defaults.humidity),
                ph.unwrap_or(defaults.ph),
                rainfall.unwrap_or(defaults.rainfall),
                soil_type.as_deref().unwrap_or(defaults.soil_type.as_str()),
            );
            let engine = load_engine(&settings.artifacts_dir)?;
            workflow::run_single(&engine, sample, &preset.bounds, log.as_deref(), json)?;
        }
        Commands::Interactive { log } => {
            let engine = load_engine(&settings.artifacts_dir)?;
            workflow::run_interactive(&engine, preset, log.as_deref())?;
        }
        Commands::Batch { input, no_plot } => {
            let engine = load_engine(&settings.artifacts_dir)?;
            let options = workflow::BatchOptions { plot: !no_plot };
            let run_dir = workflow::run_batch(&engine, preset, &input, &settings.output_dir, &options)?;
            println!("\nBatch complete. Results are in {:?}", run_dir);
        }
        Commands::Summarize { log } => {
            workflow::summarize_log(&log)?;
        }
        Commands::Presets => print_presets(&settings),
        Commands::Inspect => {
            let engine = load_engine(&settings.artifacts_dir)?;
            print_artifacts(engine.artifacts());
        }
    }

    Ok(())
}

fn print_presets(settings: &config::Settings) {
    for preset in settings.presets.values() {
        let marker = if preset.name == settings.default_preset { " (default)" } else { "" };
        println!("{}{}", preset.name, marker);
        if let Some(description) = &preset.description {
            println!("  {}", description);
        }
        print_preset_fields(preset);
    }
}

fn print_preset_fields(preset: &FormPreset) {
    let (b, d) = (&preset.bounds, &preset.defaults);
    println!("  - nitrogen     [{}-{}] default {}", b.nitrogen.min, b.nitrogen.max, d.nitrogen);
    println!("  - phosphorus   [{}-{}] default {}", b.phosphorus.min, b.phosphorus.max, d.phosphorus);
    println!("  - potassium    [{}-{}] default {}", b.potassium.min, b.potassium.max, d.potassium);
    println!("  - temperature  [{}-{}] default {}", b.temperature.min, b.temperature.max, d.temperature);
    println!("  - humidity     [{}-{}] default {}", b.humidity.min, b.humidity.max, d.humidity);
    println!("  - ph           [{}-{}] default {}", b.ph.min, b.ph.max, d.ph);
    println!("  - rainfall     [{}-{}] default {}", b.rainfall.min, b.rainfall.max, d.rainfall);
    println!("  - soil_type    default {}", d.soil_type);
}

fn print_artifacts(artifacts: &ArtifactSet) {
    let crops: Vec<String> = artifacts.crop_model().classes().iter().map(|c| c.to_string()).collect();
    println!("Crop model:        {} features, {} classes", artifacts.crop_model().n_features(), crops.len());
    println!("  {}", crops.join(", "));
    println!(
        "Fertilizer model:  {} features, {} classes",
        artifacts.fertilizer_model().n_features(),
        artifacts.fertilizer_model().classes().len()
    );
    for encoder in [
        artifacts.crop_encoder(),
        artifacts.soil_encoder(),
        artifacts.fertilizer_encoder(),
    ] {
        println!("{} vocabulary: {}", encoder.field(), encoder.classes().join(", "));
    }
}
