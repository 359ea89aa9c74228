//! # Survey Configuration
//!
//! File locations and fallback choices for the survey pipeline. Every field
//! has a built-in default, so the pipeline runs without any configuration
//! file. An optional YAML file can override individual fields.

use std::path::{Path, PathBuf};

use config::{Config as ConfigBuilder, File, FileFormat};
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::constants::{CSV_PATH, FALLBACK_SPOTS, JSON_PATH};

/// Failures while reading or deserializing `survey.yml`.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Survey configuration could not be loaded: {0}")]
    Load(#[from] config::ConfigError),
}

/// The root configuration structure, mapping directly to `survey.yml`.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct SurveyConfig {
    /// Where submissions are appended.
    #[serde(default = "default_csv_path")]
    pub csv_path: PathBuf,
    /// The read-only reference document.
    #[serde(default = "default_json_path")]
    pub json_path: PathBuf,
    /// Survey choices used when the reference document has no labels.
    #[serde(default = "default_fallback_spots")]
    pub fallback_spots: Vec<String>,
}

fn default_csv_path() -> PathBuf {
    PathBuf::from(CSV_PATH)
}

fn default_json_path() -> PathBuf {
    PathBuf::from(JSON_PATH)
}

fn default_fallback_spots() -> Vec<String> {
    FALLBACK_SPOTS.iter().map(|s| s.to_string()).collect()
}

impl Default for SurveyConfig {
    fn default() -> Self {
        Self {
            csv_path: default_csv_path(),
            json_path: default_json_path(),
            fallback_spots: default_fallback_spots(),
        }
    }
}

impl SurveyConfig {
    /// Places both data files inside `dir`, keeping their default names.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            csv_path: dir.join(CSV_PATH),
            json_path: dir.join(JSON_PATH),
            ..Default::default()
        }
    }
}

/// Loads the configuration.
///
/// - Layer 1: the built-in path defaults. `fallback_spots` is filled by serde
///   when no layer sets it.
/// - Layer 2: the YAML file at `path`, if given and present.
///
/// A missing file is not an error; a file that exists but cannot be parsed is.
pub fn get_config(path: Option<&Path>) -> Result<SurveyConfig, ConfigError> {
    let mut builder = ConfigBuilder::builder()
        .set_default("csv_path", CSV_PATH)?
        .set_default("json_path", JSON_PATH)?;

    if let Some(path) = path {
        if path.exists() {
            info!("Loading survey configuration from '{}'.", path.display());
        }
        builder = builder.add_source(
            File::from(path.to_path_buf())
                .format(FileFormat::Yaml)
                .required(false),
        );
    }

    let settings = builder.build()?;
    Ok(settings.try_deserialize()?)
}
