use anyhow::{bail, Context, Result};
use cropforge_schemas::{file_formats::PresetFile, preset::FormPreset};
use serde::Deserialize;
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

pub const DEFAULT_CONFIG_PATH: &str = "cropforge.yaml";

/// Contents of the YAML configuration file. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub artifacts_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub default_preset: Option<String>,
    /// Directory of extra preset files, each holding a `presets:` list.
    pub presets_dir: Option<PathBuf>,
    pub presets: Vec<FormPreset>,
}

impl AppConfig {
    /// Reads `path`. A missing file is only an error when it was asked for
    /// explicitly; the default path falls back to an empty configuration.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, explicit) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_PATH), false),
        };

        if !path.exists() {
            if explicit {
                bail!("Configuration file {:?} does not exist", path);
            }
            log::debug!("No configuration file at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read configuration {:?}", path))?;
        let config: AppConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse configuration {:?}", path))?;
        log::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }
}

/// Resolved settings after applying command-line overrides.
pub struct Settings {
    pub artifacts_dir: PathBuf,
    pub output_dir: PathBuf,
    pub default_preset: String,
    pub presets: BTreeMap<String, FormPreset>,
}

impl Settings {
    pub fn resolve(config: AppConfig, artifacts_override: Option<PathBuf>) -> Result<Self> {
        let mut presets = BTreeMap::new();
        presets.insert(FormPreset::CLASSIC.to_string(), FormPreset::classic());

        if let Some(dir) = &config.presets_dir {
            let from_dir = load_yaml_files_into_map(
                dir,
                |file: PresetFile| file.presets,
                |item: &FormPreset| item.name.clone(),
            )?;
            presets.extend(from_dir);
        }
        for preset in config.presets {
            presets.insert(preset.name.clone(), preset);
        }

        let default_preset = config
            .default_preset
            .unwrap_or_else(|| FormPreset::CLASSIC.to_string());
        if !presets.contains_key(&default_preset) {
            bail!("Default preset '{}' is not defined", default_preset);
        }

        Ok(Self {
            artifacts_dir: artifacts_override
                .or(config.artifacts_dir)
                .unwrap_or_else(|| PathBuf::from("./data/artifacts")),
            output_dir: config.output_dir.unwrap_or_else(|| PathBuf::from("./data/runs")),
            default_preset,
            presets,
        })
    }

    /// Looks up `name`, or the default preset when no name is given.
    pub fn preset(&self, name: Option<&str>) -> Result<&FormPreset> {
        let name = name.unwrap_or(&self.default_preset);
        self.presets.get(name).with_context(|| {
            format!(
                "Unknown preset '{}'. Available: {}",
                name,
                self.presets.keys().cloned().collect::<Vec<_>>().join(", ")
            )
        })
    }
}

/// Generic helper to load all YAML files in a directory into a map.
fn load_yaml_files_into_map<P, F, E, T, K>(
    dir_path: P,
    extract_vec: E,
    get_key: K,
) -> Result<BTreeMap<String, T>>
where
    P: AsRef<Path>,
    F: for<'de> serde::Deserialize<'de>, // The file wrapper struct (e.g., PresetFile)
    E: Fn(F) -> Vec<T>,                  // A closure to extract the Vec<T> from the wrapper
    K: Fn(&T) -> String,                 // A closure to get the key for the map from an item T
{
    let mut map = BTreeMap::new();
    for entry in fs::read_dir(dir_path.as_ref())
        .with_context(|| format!("Failed to read directory: {:?}", dir_path.as_ref()))?
    {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() && path.extension().map_or(false, |s| s == "yaml" || s == "yml") {
            let content = fs::read_to_string(&path)?;
            let file_wrapper: F = serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse YAML from {:?}", path))?;

            for item in extract_vec(file_wrapper) {
                map.insert(get_key(&item), item);
            }
        }
    }
    Ok(map)
}
