//! The visualization page: one static chart of the reference document and
//! two interactive charts over the collected submissions.

use serde::Serialize;
use surveyboard::constants::DEFAULT_TOP_K;
use surveyboard::{
    aggregate, category_index, effective_selection, entry_series, has_numeric_values,
    load_reference, AggregateRow, Favorites, IngestionStore, IngestionTable, Metric,
    ReferenceDocument, SurveyConfig,
};
use tracing::debug;

/// A chart ready to draw, or the message shown in its place.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ChartPanel<T> {
    Chart { title: String, points: Vec<T> },
    Warning(String),
    Info(String),
}

impl<T> ChartPanel<T> {
    pub fn points(&self) -> Option<&[T]> {
        match self {
            ChartPanel::Chart { points, .. } => Some(points.as_slice()),
            _ => None,
        }
    }
}

/// Limits and starting value of the "top K" slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TopKBounds {
    pub min: usize,
    pub max: usize,
    pub default: usize,
}

/// Everything one render of the page needs, loaded once up front.
pub struct VisualsPage {
    table: IngestionTable,
    reference: ReferenceDocument,
    categories: Vec<String>,
}

impl VisualsPage {
    pub fn load(config: &SurveyConfig) -> Self {
        let table = IngestionStore::from_config(config).load();
        let reference = load_reference(&config.json_path);
        let categories = category_index(&table);
        debug!(
            "[visuals] {} rows, {} categories, {} reference points.",
            table.len(),
            categories.len(),
            reference.data_points.len()
        );
        Self {
            table,
            reference,
            categories,
        }
    }

    pub fn table(&self) -> &IngestionTable {
        &self.table
    }

    /// Sorted choices for the category pickers.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Static bar chart of the reference document.
    pub fn reference_chart(&self) -> ChartPanel<(String, f64)> {
        if self.reference.data_points.is_empty() {
            return ChartPanel::Warning("No valid reference data to plot yet.".to_string());
        }
        ChartPanel::Chart {
            title: self.reference.chart_title.clone(),
            points: self
                .reference
                .data_points
                .iter()
                .map(|p| (p.label.clone(), p.value))
                .collect(),
        }
    }

    pub fn top_k_bounds(&self) -> TopKBounds {
        let max = self.categories.len().max(1);
        TopKBounds {
            min: 1,
            max,
            default: DEFAULT_TOP_K.min(max),
        }
    }

    /// Ranked totals for the picked categories plus favorites.
    pub fn totals_chart<S: AsRef<str>>(
        &self,
        picked: &[S],
        favorites: &Favorites,
        top_k: usize,
    ) -> ChartPanel<AggregateRow> {
        if !has_numeric_values(&self.table) {
            return ChartPanel::Warning(
                "No numeric values submitted yet. Submit numeric ratings on the Survey page."
                    .to_string(),
            );
        }
        let selection = effective_selection(picked, favorites);
        let totals = aggregate(&self.table, &selection, Metric::Sum, top_k);
        if totals.is_empty() {
            return ChartPanel::Info("No rows match your current selection.".to_string());
        }
        ChartPanel::Chart {
            title: "Totals by category".to_string(),
            points: totals,
        }
    }

    /// The category the series picker starts on: the first favorite if it
    /// is still present in the data, otherwise the first category.
    pub fn default_series_category(&self, favorites: &Favorites) -> Option<&str> {
        favorites
            .first()
            .and_then(|fav| self.categories.iter().find(|c| c.as_str() == fav))
            .or_else(|| self.categories.first())
            .map(String::as_str)
    }

    /// One category's values plotted against entry order.
    pub fn series_chart(&self, category: &str) -> ChartPanel<(usize, f64)> {
        if !has_numeric_values(&self.table) || self.categories.is_empty() {
            return ChartPanel::Warning(
                "Add some numeric rows with categories to see this chart.".to_string(),
            );
        }
        let points = entry_series(&self.table, category);
        if points.is_empty() {
            return ChartPanel::Info("No numeric rows for the selected category yet.".to_string());
        }
        ChartPanel::Chart {
            title: format!("{category} over entry order"),
            points,
        }
    }
}
