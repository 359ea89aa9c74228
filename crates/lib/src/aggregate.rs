//! # Aggregation
//!
//! Derives a numeric projection of the ingestion table and computes ranked,
//! per-category summaries for charting. Nothing here is stored; every result
//! is recomputed from the table it is given.

use std::collections::{BTreeSet, HashMap};

use tracing::debug;

use crate::types::{AggregateRow, IngestionTable, Metric, NumericRow};

/// Parses a stored value as a finite number. Anything else is missing.
pub fn numeric_value(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Pairs every row with its parsed value and 1-based position in the table.
pub fn numeric_projection(table: &IngestionTable) -> Vec<NumericRow> {
    table
        .iter()
        .enumerate()
        .map(|(i, row)| NumericRow {
            entry_index: i + 1,
            category: row.category.clone(),
            value: numeric_value(&row.value),
        })
        .collect()
}

/// Returns true if at least one row carries a numeric value.
pub fn has_numeric_values(table: &IngestionTable) -> bool {
    table.iter().any(|row| numeric_value(&row.value).is_some())
}

/// Groups, summarizes, and ranks the table.
///
/// Rows with a blank category have no group and are skipped. A non-empty
/// `selected` set restricts the input to those categories. `Sum` and
/// `Average` ignore rows whose value is not numeric; `Count` counts them.
///
/// The result is sorted by metric descending. Ties keep the order in which
/// their categories first appeared in the table. At most `top_k` rows are
/// returned, and an empty result means nothing matched.
pub fn aggregate(
    table: &IngestionTable,
    selected: &BTreeSet<String>,
    metric: Metric,
    top_k: usize,
) -> Vec<AggregateRow> {
    // (category, sum, count) in first-encountered order.
    let mut groups: Vec<(&str, f64, usize)> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for row in table {
        let category = row.category.as_str();
        if category.is_empty() {
            continue;
        }
        if !selected.is_empty() && !selected.contains(category) {
            continue;
        }
        let value = numeric_value(&row.value);
        if metric.requires_numeric() && value.is_none() {
            continue;
        }

        let idx = *positions.entry(category).or_insert_with(|| {
            groups.push((category, 0.0, 0));
            groups.len() - 1
        });
        let group = &mut groups[idx];
        group.1 += value.unwrap_or(0.0);
        group.2 += 1;
    }

    let mut rows: Vec<AggregateRow> = groups
        .into_iter()
        .map(|(category, sum, count)| {
            let value = match metric {
                Metric::Sum => sum,
                Metric::Average => sum / count as f64,
                Metric::Count => count as f64,
            };
            AggregateRow::new(category, value)
        })
        .collect();

    // `sort_by` is stable, so equal metrics stay in first-seen order.
    rows.sort_by(|a, b| b.metric.total_cmp(&a.metric));
    rows.truncate(top_k);

    debug!(
        "[aggregate] {:?} over {} rows -> {} groups (top_k = {top_k}).",
        metric,
        table.len(),
        rows.len()
    );
    rows
}

/// The `(entry_index, value)` points of one category in table order.
///
/// Rows whose value is not numeric are left out, but they still occupy an
/// entry index so gaps in the series line up with the table.
pub fn entry_series(table: &IngestionTable, category: &str) -> Vec<(usize, f64)> {
    numeric_projection(table)
        .into_iter()
        .filter(|row| row.category == category)
        .filter_map(|row| row.value.map(|v| (row.entry_index, v)))
        .collect()
}
