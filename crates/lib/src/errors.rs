use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use thiserror::Error;
use tracing::{debug, warn};

/// Rejections raised before anything is written to the store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Category is required and cannot be blank")]
    EmptyCategory,
    #[error("Value is required and cannot be blank")]
    EmptyValue,
    #[error("Rating {rating} is outside the allowed range {min}..={max}")]
    RatingOutOfRange { rating: u8, min: u8, max: u8 },
}

/// Custom error types for the survey pipeline.
///
/// Only [`IngestionStore::submit`](crate::IngestionStore::submit) returns this
/// type. Loading and aggregation are fail-soft and never surface an error.
#[derive(Error, Debug)]
pub enum SurveyError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),
    #[error("Failed to write to the survey store: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to encode the survey row as CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("Refusing to append to '{path}': {reason}")]
    ForeignLayout { path: String, reason: String },
}

/// Why a backing file was replaced with its fallback value.
///
/// Every variant maps to the same default; the distinction only drives how
/// loudly the substitution is logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadFailure {
    /// The file does not exist.
    NotFound,
    /// The file exists but holds zero bytes.
    Empty,
    /// The file exists but could not be opened or read.
    Unreadable(String),
    /// The content could not be parsed at all.
    Parse(String),
    /// The content parsed but does not have the expected shape.
    Schema(String),
}

impl LoadFailure {
    /// Checks that `path` names a file with at least one byte.
    pub fn probe(path: &Path) -> Result<(), LoadFailure> {
        match fs::metadata(path) {
            Ok(meta) if meta.len() == 0 => Err(LoadFailure::Empty),
            Ok(_) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(LoadFailure::NotFound),
            Err(e) => Err(LoadFailure::Unreadable(e.to_string())),
        }
    }

    /// Missing and empty files are the normal state before the first
    /// submission; anything else points at a corrupted or foreign file.
    pub fn is_expected(&self) -> bool {
        matches!(self, LoadFailure::NotFound | LoadFailure::Empty)
    }

    /// Records that `component` substituted its fallback for `path`.
    pub fn log(&self, component: &str, path: &Path) {
        if self.is_expected() {
            debug!("[{component}] '{}': {self}. Using fallback.", path.display());
        } else {
            warn!("[{component}] '{}': {self}. Using fallback.", path.display());
        }
    }
}

impl fmt::Display for LoadFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadFailure::NotFound => write!(f, "file not found"),
            LoadFailure::Empty => write!(f, "file is empty"),
            LoadFailure::Unreadable(msg) => write!(f, "unreadable: {msg}"),
            LoadFailure::Parse(msg) => write!(f, "parse error: {msg}"),
            LoadFailure::Schema(msg) => write!(f, "unexpected layout: {msg}"),
        }
    }
}
