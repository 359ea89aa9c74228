//! # Reference Loader
//!
//! Reads the static JSON reference document:
//!
//! ```json
//! { "chart_title": "Study Spots", "data_points": [{ "label": "Library", "value": 8 }] }
//! ```
//!
//! Both entry points are fail-soft. A missing, empty, or malformed document
//! is replaced with a default and the cause is logged.

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};
use tracing::debug;

use crate::constants::DEFAULT_CHART_TITLE;
use crate::errors::LoadFailure;
use crate::types::{ReferenceDocument, ReferenceRecord};

/// Loads the reference document, keeping only well-formed data points.
///
/// A point is kept when it is an object with a non-empty string `label` and
/// a numeric `value`. Everything else is dropped.
pub fn load_reference(path: impl AsRef<Path>) -> ReferenceDocument {
    let path = path.as_ref();
    let payload = match read_payload(path) {
        Ok(payload) => payload,
        Err(failure) => {
            failure.log("reference", path);
            return ReferenceDocument::default();
        }
    };

    let chart_title = payload
        .get("chart_title")
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_CHART_TITLE)
        .to_string();

    let data_points = match data_points(&payload) {
        Ok(points) => points.iter().filter_map(as_reference_record).collect(),
        Err(failure) => {
            failure.log("reference", path);
            Vec::new()
        }
    };

    let document = ReferenceDocument {
        chart_title,
        data_points,
    };
    debug!(
        "[reference] Loaded {} data points from '{}'.",
        document.data_points.len(),
        path.display()
    );
    document
}

/// Loads the survey's selectable labels from `data_points[].label`.
///
/// Unlike [`load_reference`], a point only needs a non-empty label. If the
/// document is unusable or yields no labels at all, `fallback` is returned.
pub fn load_spot_labels<S: AsRef<str>>(path: impl AsRef<Path>, fallback: &[S]) -> Vec<String> {
    let path = path.as_ref();
    let labels: Vec<String> = match read_payload(path).and_then(|payload| data_points(&payload)) {
        Ok(points) => points.iter().filter_map(label_of).collect(),
        Err(failure) => {
            failure.log("reference", path);
            Vec::new()
        }
    };

    if labels.is_empty() {
        debug!(
            "[reference] No labels found; using {} fallback spots.",
            fallback.len()
        );
        return fallback.iter().map(|s| s.as_ref().to_string()).collect();
    }
    labels
}

fn read_payload(path: &Path) -> Result<Map<String, Value>, LoadFailure> {
    LoadFailure::probe(path)?;
    let content = fs::read_to_string(path).map_err(|e| LoadFailure::Unreadable(e.to_string()))?;
    match serde_json::from_str::<Value>(&content) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(LoadFailure::Schema(format!(
            "expected a top-level object, found {}",
            kind_of(&other)
        ))),
        Err(e) => Err(LoadFailure::Parse(e.to_string())),
    }
}

/// A missing `data_points` key is an empty dataset; any non-array value is a
/// schema mismatch.
fn data_points(payload: &Map<String, Value>) -> Result<Vec<Value>, LoadFailure> {
    match payload.get("data_points") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(points)) => Ok(points.clone()),
        Some(other) => Err(LoadFailure::Schema(format!(
            "'data_points' should be an array, found {}",
            kind_of(other)
        ))),
    }
}

fn label_of(point: &Value) -> Option<String> {
    point
        .as_object()?
        .get("label")?
        .as_str()
        .filter(|label| !label.is_empty())
        .map(str::to_string)
}

fn as_reference_record(point: &Value) -> Option<ReferenceRecord> {
    let label = label_of(point)?;
    let value = point.get("value")?.as_f64()?;
    Some(ReferenceRecord { label, value })
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn points_without_numeric_value_are_dropped() {
        let points = [
            json!({"label": "Library", "value": 9}),
            json!({"label": "Dorm", "value": "4"}),
            json!({"label": "", "value": 3}),
            json!({"value": 2}),
            json!("Clough Commons"),
        ];
        let records: Vec<_> = points.iter().filter_map(as_reference_record).collect();
        assert_eq!(
            records,
            vec![ReferenceRecord {
                label: "Library".to_string(),
                value: 9.0
            }]
        );
    }

    #[test]
    fn labels_do_not_require_values() {
        let points = [json!({"label": "Dorm"}), json!({"label": null}), json!(7)];
        let labels: Vec<_> = points.iter().filter_map(label_of).collect();
        assert_eq!(labels, vec!["Dorm".to_string()]);
    }

    #[test]
    fn directory_in_place_of_document_is_unreadable() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        std::fs::write(dir.path().join("placeholder"), "x")?;

        let failure = read_payload(dir.path()).unwrap_err();
        assert!(matches!(failure, LoadFailure::Unreadable(_)));
        assert!(!failure.is_expected());
        assert_eq!(load_reference(dir.path()), ReferenceDocument::default());
        Ok(())
    }
}
