//! # Survey Ingestion and Aggregation
//!
//! This crate provides the data pipeline behind a small survey application:
//! submitted ratings are appended to a flat CSV store, a static JSON reference
//! document is loaded alongside it, and grouped summaries are computed for
//! charting.
//!
//! The pipeline exposes three operations to its callers:
//!
//! 1.  [`IngestionStore::submit`] validates and appends a single rating.
//! 2.  [`IngestionStore::load`] reads the whole table back. It never fails; a
//!     missing or malformed file degrades to an empty table.
//! 3.  [`aggregate`] filters, groups, and ranks the table by a [`Metric`].

pub mod aggregate;
pub mod categories;
pub mod config;
pub mod constants;
pub mod errors;
pub mod logging;
pub mod reference;
pub mod store;
pub mod types;

pub use aggregate::{
    aggregate, entry_series, has_numeric_values, numeric_projection, numeric_value,
};
pub use categories::{category_index, effective_selection, Favorites};
pub use config::{get_config, ConfigError, SurveyConfig};
pub use errors::{LoadFailure, SurveyError, ValidationError};
pub use reference::{load_reference, load_spot_labels};
pub use store::IngestionStore;
pub use types::{
    AggregateRequest, AggregateRow, IngestionTable, Metric, NumericRow, RatingRecord,
    ReferenceDocument, ReferenceRecord,
};
