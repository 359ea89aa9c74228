//! # Ingestion Store
//!
//! Append-only persistence of survey submissions in a flat CSV file. The
//! first successful submission creates the file with a `category,value`
//! header; every later submission appends a single data row.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::SurveyConfig;
use crate::constants::COLUMNS;
use crate::errors::{LoadFailure, SurveyError, ValidationError};
use crate::types::{IngestionTable, RatingRecord};

/// A CSV-backed table of survey submissions at a fixed path.
#[derive(Debug, Clone)]
pub struct IngestionStore {
    path: PathBuf,
}

impl IngestionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_config(config: &SurveyConfig) -> Self {
        Self::new(config.csv_path.clone())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns true if the backing file exists and has at least one byte.
    pub fn exists_and_not_empty(&self) -> bool {
        LoadFailure::probe(&self.path).is_ok()
    }

    /// Validates and appends one submission.
    ///
    /// Both fields are trimmed. A blank field is rejected with a
    /// [`ValidationError`] and nothing is written. When the file is missing,
    /// empty, or holds only whitespace it is (re)created with the header row
    /// followed by the new row; otherwise only the data row is appended.
    ///
    /// An existing file that `load` would reject (a header without the
    /// `category` or `value` column, or a malformed row) is left untouched
    /// and reported as [`SurveyError::ForeignLayout`], since a row appended
    /// there could never be loaded back.
    pub fn submit(&self, category: &str, value: &str) -> Result<RatingRecord, SurveyError> {
        let record = validate_submission(category, value)?;

        let mode = self.write_mode()?;
        let needs_header = matches!(mode, WriteMode::Create);

        match mode {
            WriteMode::Create => {
                let file = OpenOptions::new()
                    .write(true)
                    .create(true)
                    .truncate(true)
                    .open(&self.path)?;
                let mut writer = csv::Writer::from_writer(file);
                writer.serialize(&record)?;
                writer.flush()?;
            }
            WriteMode::Append {
                newline_first,
                layout,
            } => {
                let mut file = OpenOptions::new().append(true).open(&self.path)?;
                // A hand-edited file may lack the trailing newline; without
                // this the new row would be glued onto the last one.
                if newline_first {
                    file.write_all(b"\n")?;
                }
                let mut writer = csv::WriterBuilder::new()
                    .has_headers(false)
                    .from_writer(file);
                writer.write_record(layout.arrange(&record))?;
                writer.flush()?;
            }
        }

        info!(
            "[store] Appended row ({}, {}) to '{}'{}.",
            record.category,
            record.value,
            self.path.display(),
            if needs_header { " with header" } else { "" }
        );
        Ok(record)
    }

    /// Decides how the next row goes into the file, checking that an
    /// existing header is one `load` can read.
    fn write_mode(&self) -> Result<WriteMode, SurveyError> {
        if matches!(
            LoadFailure::probe(&self.path),
            Err(LoadFailure::NotFound | LoadFailure::Empty)
        ) {
            return Ok(WriteMode::Create);
        }

        let contents = fs::read(&self.path)?;
        if contents.iter().all(u8::is_ascii_whitespace) {
            debug!(
                "[store] '{}' holds only whitespace; rewriting with header.",
                self.path.display()
            );
            return Ok(WriteMode::Create);
        }

        let mut reader = csv::Reader::from_reader(contents.as_slice());
        let headers = reader
            .headers()
            .map_err(|e| self.foreign_layout(LoadFailure::Parse(e.to_string())))?;
        let layout =
            column_positions(headers).map_err(|failure| self.foreign_layout(failure))?;
        for result in reader.records() {
            result.map_err(|e| self.foreign_layout(LoadFailure::Parse(e.to_string())))?;
        }

        Ok(WriteMode::Append {
            newline_first: contents.last() != Some(&b'\n'),
            layout,
        })
    }

    fn foreign_layout(&self, failure: LoadFailure) -> SurveyError {
        warn!(
            "[store] Not appending to '{}': {failure}.",
            self.path.display()
        );
        SurveyError::ForeignLayout {
            path: self.path.display().to_string(),
            reason: failure.to_string(),
        }
    }

    /// Reads the whole table in file order.
    ///
    /// This never fails. A missing, empty, unreadable, or malformed file
    /// yields an empty table with the canonical columns, and the cause is
    /// logged.
    pub fn load(&self) -> IngestionTable {
        match self.try_load() {
            Ok(table) => {
                debug!(
                    "[store] Loaded {} rows from '{}'.",
                    table.len(),
                    self.path.display()
                );
                table
            }
            Err(failure) => {
                failure.log("store", &self.path);
                IngestionTable::empty()
            }
        }
    }

    fn try_load(&self) -> Result<IngestionTable, LoadFailure> {
        LoadFailure::probe(&self.path)?;

        let mut reader = csv::ReaderBuilder::new()
            .from_path(&self.path)
            .map_err(|e| LoadFailure::Unreadable(e.to_string()))?;

        let headers = reader
            .headers()
            .map_err(|e| LoadFailure::Parse(e.to_string()))?;
        let layout = column_positions(headers)?;

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result.map_err(|e| LoadFailure::Parse(e.to_string()))?;
            rows.push(RatingRecord::new(
                record.get(layout.category).unwrap_or_default(),
                record.get(layout.value).unwrap_or_default(),
            ));
        }

        Ok(IngestionTable::from_rows(rows))
    }
}

/// Trims both fields and rejects blanks, category first.
pub fn validate_submission(category: &str, value: &str) -> Result<RatingRecord, ValidationError> {
    let category = category.trim();
    let value = value.trim();
    if category.is_empty() {
        return Err(ValidationError::EmptyCategory);
    }
    if value.is_empty() {
        return Err(ValidationError::EmptyValue);
    }
    Ok(RatingRecord::new(category, value))
}

enum WriteMode {
    Create,
    Append {
        newline_first: bool,
        layout: ColumnLayout,
    },
}

/// Where the two columns sit in an existing file's header.
#[derive(Debug, Clone, Copy)]
struct ColumnLayout {
    category: usize,
    value: usize,
    width: usize,
}

impl ColumnLayout {
    /// Places the record's fields at their header positions; any extra
    /// columns are left blank.
    fn arrange<'a>(&self, record: &'a RatingRecord) -> Vec<&'a str> {
        let mut fields = vec![""; self.width];
        fields[self.category] = record.category.as_str();
        fields[self.value] = record.value.as_str();
        fields
    }
}

/// Locates the `category` and `value` columns by name.
fn column_positions(headers: &csv::StringRecord) -> Result<ColumnLayout, LoadFailure> {
    let position = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| {
                LoadFailure::Schema(format!(
                    "missing column '{name}' in header {:?}",
                    headers.iter().collect::<Vec<_>>()
                ))
            })
    };
    Ok(ColumnLayout {
        category: position(COLUMNS[0])?,
        value: position(COLUMNS[1])?,
        width: headers.len(),
    })
}
