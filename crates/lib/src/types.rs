use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::constants::{COLUMNS, DEFAULT_CHART_TITLE, DEFAULT_TOP_K};

/// One survey submission, stored as a `category,value` CSV row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingRecord {
    pub category: String,
    pub value: String,
}

impl RatingRecord {
    pub fn new(category: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            value: value.into(),
        }
    }
}

/// The ingestion table in file order. Insertion order is arrival order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct IngestionTable {
    rows: Vec<RatingRecord>,
}

impl IngestionTable {
    /// An empty table with the canonical column layout.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: Vec<RatingRecord>) -> Self {
        Self { rows }
    }

    pub fn columns(&self) -> [&'static str; 2] {
        COLUMNS
    }

    pub fn rows(&self) -> &[RatingRecord] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RatingRecord> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<'a> IntoIterator for &'a IngestionTable {
    type Item = &'a RatingRecord;
    type IntoIter = std::slice::Iter<'a, RatingRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// A single labeled point from the reference document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceRecord {
    pub label: String,
    pub value: f64,
}

/// The static, externally produced reference dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceDocument {
    pub chart_title: String,
    pub data_points: Vec<ReferenceRecord>,
}

impl Default for ReferenceDocument {
    fn default() -> Self {
        Self {
            chart_title: DEFAULT_CHART_TITLE.to_string(),
            data_points: Vec::new(),
        }
    }
}

/// A table row with its parsed numeric value and 1-based entry position.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericRow {
    pub entry_index: usize,
    pub category: String,
    /// `None` when the stored value is not a number.
    pub value: Option<f64>,
}

/// The summary computed for each category group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    #[default]
    Sum,
    Average,
    Count,
}

impl Metric {
    /// Whether rows without a numeric value are dropped before grouping.
    pub fn requires_numeric(self) -> bool {
        !matches!(self, Metric::Count)
    }
}

/// One category's computed metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateRow {
    pub category: String,
    pub metric: f64,
}

impl AggregateRow {
    pub fn new(category: impl Into<String>, metric: f64) -> Self {
        Self {
            category: category.into(),
            metric,
        }
    }
}

/// The parameters of an [`aggregate`](crate::aggregate) call bundled together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateRequest {
    /// Categories to keep. Empty means every category.
    pub selected: BTreeSet<String>,
    pub metric: Metric,
    pub top_k: usize,
}

impl Default for AggregateRequest {
    fn default() -> Self {
        Self {
            selected: BTreeSet::new(),
            metric: Metric::Sum,
            top_k: DEFAULT_TOP_K,
        }
    }
}

impl AggregateRequest {
    pub fn new(metric: Metric, top_k: usize) -> Self {
        Self {
            metric,
            top_k,
            ..Default::default()
        }
    }

    pub fn with_selection<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected = categories.into_iter().map(Into::into).collect();
        self
    }

    pub fn run(&self, table: &IngestionTable) -> Vec<AggregateRow> {
        crate::aggregate::aggregate(table, &self.selected, self.metric, self.top_k)
    }
}
