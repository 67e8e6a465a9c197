//! List filtering.
//!
//! Filtering is pure and synchronous over records that were already fetched;
//! nothing here touches the backend. The three predicates are independent and
//! combined with AND. An unset predicate always matches.

use crate::core::kind::RecordKind;

/// Search text plus optional exact status and category filters.
#[derive(Debug, PartialEq, Eq)]
pub struct Filter<K: RecordKind> {
    /// Case-insensitive substring; empty matches everything.
    pub search: String,
    /// Exact status match.
    pub status: Option<K::Status>,
    /// Exact, case-insensitive category match (service type or position).
    pub category: Option<String>,
}

impl<K: RecordKind> Default for Filter<K> {
    fn default() -> Self {
        Self {
            search: String::new(),
            status: None,
            category: None,
        }
    }
}

impl<K: RecordKind> Clone for Filter<K> {
    fn clone(&self) -> Self {
        Self {
            search: self.search.clone(),
            status: self.status,
            category: self.category.clone(),
        }
    }
}

impl<K: RecordKind> Filter<K> {
    #[must_use]
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = text.into();
        self
    }

    #[must_use]
    pub fn status(mut self, status: Option<K::Status>) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub fn category(mut self, category: Option<String>) -> Self {
        self.category = category;
        self
    }

    /// True when any predicate narrows the set.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.search.trim().is_empty() || self.status.is_some() || self.category.is_some()
    }

    pub fn matches(&self, record: &K::Record) -> bool {
        let needle = self.search.trim().to_lowercase();
        self.matches_with(record, &needle)
    }

    /// Records passing every predicate, in their original order.
    pub fn apply<'a>(&self, records: &'a [K::Record]) -> Vec<&'a K::Record> {
        let needle = self.search.trim().to_lowercase();
        records
            .iter()
            .filter(|record| self.matches_with(record, &needle))
            .collect()
    }

    fn matches_with(&self, record: &K::Record, needle: &str) -> bool {
        let text_ok = needle.is_empty() || K::matches_text(record, needle);
        let status_ok = self.status.is_none_or(|status| K::status(record) == status);
        let category_ok = self
            .category
            .as_deref()
            .is_none_or(|category| {
                K::category(record).to_lowercase() == category.trim().to_lowercase()
            });
        text_ok && status_ok && category_ok
    }
}
