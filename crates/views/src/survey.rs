//! The data-collection page: a free-text form and a spot/rating form, both
//! appending to the ingestion store.

use serde::Serialize;
use surveyboard::constants::{RATING_DEFAULT, RATING_MAX, RATING_MIN};
use surveyboard::{
    load_spot_labels, IngestionStore, IngestionTable, RatingRecord, SurveyConfig, SurveyError,
    ValidationError,
};
use tracing::info;

/// The outcome of an accepted submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Submission {
    pub record: RatingRecord,
    pub message: String,
}

/// What the "Current Data" section shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DataPanel {
    Table(IngestionTable),
    Empty(String),
}

pub struct SurveyPage {
    store: IngestionStore,
    options: Vec<String>,
}

impl SurveyPage {
    /// Loads the spot choices once for the lifetime of the page.
    pub fn new(config: &SurveyConfig) -> Self {
        Self {
            store: IngestionStore::from_config(config),
            options: load_spot_labels(&config.json_path, &config.fallback_spots),
        }
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// `(min, max, default)` of the rating slider.
    pub fn rating_bounds(&self) -> (u8, u8, u8) {
        (RATING_MIN, RATING_MAX, RATING_DEFAULT)
    }

    /// Handles the free-text form.
    pub fn submit_entry(&self, category: &str, value: &str) -> Result<Submission, SurveyError> {
        let record = self.store.submit(category, value)?;
        let message = format!(
            "Your data has been submitted! You entered: Category: {}, Value: {}",
            record.category, record.value
        );
        Ok(Submission { record, message })
    }

    /// Handles the spot picker and 1-10 rating slider.
    pub fn submit_rating(&self, spot: &str, rating: u8) -> Result<Submission, SurveyError> {
        if !(RATING_MIN..=RATING_MAX).contains(&rating) {
            return Err(ValidationError::RatingOutOfRange {
                rating,
                min: RATING_MIN,
                max: RATING_MAX,
            }
            .into());
        }
        let record = self.store.submit(spot, &rating.to_string())?;
        info!("[survey] Rating {rating}/{RATING_MAX} recorded for '{}'.", record.category);
        let message = format!(
            "Saved! You chose {} and rated it {}/{RATING_MAX}.",
            record.category, record.value
        );
        Ok(Submission { record, message })
    }

    /// The current table, or a notice when there is nothing to show.
    pub fn current_data(&self) -> DataPanel {
        let table = self.store.load();
        if table.is_empty() {
            DataPanel::Empty(format!(
                "The '{}' file is empty or does not exist yet.",
                self.store.path().display()
            ))
        } else {
            DataPanel::Table(table)
        }
    }
}
