//! Category index and the session-owned favorites set.

use std::collections::BTreeSet;

use crate::types::IngestionTable;

/// Sorted, distinct, non-blank categories present in the table.
pub fn category_index(table: &IngestionTable) -> Vec<String> {
    table
        .iter()
        .map(|row| row.category.as_str())
        .filter(|c| !c.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Categories a user has pinned during a session.
///
/// The caller owns this value and passes it in; the pipeline keeps no
/// favorites of its own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Favorites {
    categories: BTreeSet<String>,
}

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges the current picks into the set.
    pub fn add_picks<S: AsRef<str>>(&mut self, picks: &[S]) {
        self.categories
            .extend(picks.iter().map(|p| p.as_ref().to_string()));
    }

    /// The alphabetically first favorite.
    pub fn first(&self) -> Option<&str> {
        self.categories.iter().next().map(String::as_str)
    }

    pub fn contains(&self, category: &str) -> bool {
        self.categories.contains(category)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// The filter handed to [`aggregate`](crate::aggregate): picks plus favorites.
pub fn effective_selection<S: AsRef<str>>(picked: &[S], favorites: &Favorites) -> BTreeSet<String> {
    picked
        .iter()
        .map(|p| p.as_ref().to_string())
        .chain(favorites.iter().map(str::to_string))
        .collect()
}
