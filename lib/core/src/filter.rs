use std::collections::HashSet;

use crate::CatalogItem;

/// Equality constraints over catalog metadata columns, AND-combined.
///
/// Filtering is permissive by design: clauses with empty values impose no
/// constraint, and clauses naming columns the catalog does not have are
/// ignored rather than rejected. Value comparison is case-insensitive, so a
/// UI can pass `"summer"` against a catalog storing `"Summer"`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSpec {
    clauses: Vec<(String, String)>,
}

impl FilterSpec {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an equality clause. Later clauses AND with earlier ones.
    #[must_use]
    pub fn equals(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.clauses.push((column.into(), value.into()));
        self
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.clauses.push((column.into(), value.into()));
    }

    pub fn from_pairs<C, V>(pairs: impl IntoIterator<Item = (C, V)>) -> Self
    where
        C: Into<String>,
        V: Into<String>,
    {
        Self {
            clauses: pairs
                .into_iter()
                .map(|(c, v)| (c.into(), v.into()))
                .collect(),
        }
    }

    /// True when no clause imposes a constraint (no clauses, or only
    /// empty-valued ones).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.iter().all(|(_, value)| value.is_empty())
    }

    /// The clauses that actually constrain this catalog: non-empty values
    /// whose column exists in the catalog's column set.
    pub(crate) fn active_clauses<'a>(
        &'a self,
        known_columns: &HashSet<String>,
    ) -> Vec<(&'a str, &'a str)> {
        self.clauses
            .iter()
            .filter(|(column, value)| !value.is_empty() && known_columns.contains(column))
            .map(|(column, value)| (column.as_str(), value.as_str()))
            .collect()
    }
}

/// True when the item satisfies every clause. Items missing a value for a
/// constrained column fail that clause.
pub(crate) fn clauses_match(item: &CatalogItem, clauses: &[(&str, &str)]) -> bool {
    clauses.iter().all(|(column, value)| {
        item.attribute(column)
            .is_some_and(|actual| actual.eq_ignore_ascii_case(value))
    })
}
