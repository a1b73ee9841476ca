//! Pure filter/search over a cached collection.
//!
//! Derives the display view entirely from local data; no network calls, no
//! internal state. Same collection + same query always produces the same
//! list in the same order.

use std::collections::BTreeMap;

use crate::entity::Entity;

/// A free-text query plus zero or more exact-match facets. An empty query
/// with no facets selects the whole collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionQuery {
    search: Option<String>,
    facets: BTreeMap<String, String>,
}

impl CollectionQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    pub fn with_facet(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.facets.insert(key.into(), value.into());
        self
    }

    pub fn is_unfiltered(&self) -> bool {
        self.normalized_search().is_none() && self.facets.is_empty()
    }

    fn normalized_search(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }
}

/// The ordered subset of `entries` satisfying every facet AND the text query,
/// most-recently-updated first with id as the deterministic tie-break.
pub fn filter_collection<E: Entity>(entries: &[E], query: &CollectionQuery) -> Vec<E> {
    let needle = query.normalized_search();

    let mut view: Vec<E> = entries
        .iter()
        .filter(|entry| {
            query
                .facets
                .iter()
                .all(|(key, value)| entry.facet(key).as_deref() == Some(value.as_str()))
        })
        .filter(|entry| match &needle {
            None => true,
            Some(needle) => entry
                .search_haystacks()
                .iter()
                .any(|haystack| haystack.to_lowercase().contains(needle)),
        })
        .cloned()
        .collect();

    view.sort_by(|a, b| {
        b.updated_at()
            .cmp(&a.updated_at())
            .then_with(|| a.id().cmp(b.id()))
    });
    view
}
