use anyhow::Result;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use surveyboard::{IngestionStore, SurveyConfig};
use tempfile::TempDir;

// --- Test Setup ---

/// A helper struct giving each test its own directory for `data.csv` and
/// `data.json`.
pub struct TestSetup {
    dir: TempDir,
    pub config: SurveyConfig,
}

impl TestSetup {
    /// Creates a new, isolated temporary directory. Neither data file exists yet.
    pub fn new() -> Result<Self> {
        surveyboard::logging::init_tracing();
        let dir = tempfile::tempdir()?;
        let config = SurveyConfig::in_dir(dir.path());
        Ok(Self { dir, config })
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    pub fn csv_path(&self) -> &PathBuf {
        &self.config.csv_path
    }

    pub fn json_path(&self) -> &PathBuf {
        &self.config.json_path
    }

    /// A store pointed at this setup's CSV path.
    pub fn store(&self) -> IngestionStore {
        IngestionStore::from_config(&self.config)
    }

    /// Writes raw text to the CSV path, replacing any previous content.
    pub fn write_csv(&self, contents: &str) -> Result<()> {
        fs::write(self.csv_path(), contents)?;
        Ok(())
    }

    /// Reads the CSV path back as text.
    pub fn read_csv(&self) -> Result<String> {
        Ok(fs::read_to_string(self.csv_path())?)
    }

    /// Serializes `payload` to the JSON path.
    pub fn write_reference(&self, payload: &Value) -> Result<()> {
        fs::write(self.json_path(), serde_json::to_string_pretty(payload)?)?;
        Ok(())
    }

    /// Writes raw, possibly malformed, text to the JSON path.
    pub fn write_reference_raw(&self, contents: &str) -> Result<()> {
        fs::write(self.json_path(), contents)?;
        Ok(())
    }
}

// --- Test-Specific Helpers ---

/// Counts lines of the CSV text that equal the canonical header.
pub fn header_count(csv_text: &str) -> usize {
    csv_text
        .lines()
        .filter(|line| line.trim() == "category,value")
        .count()
}
