//! Local collection store: the in-memory mirror of backend state for one
//! console page.
//!
//! Two writers exist and no others: the full-collection refresh, and the
//! wholesale replacement of single entries after successful transitions. The
//! displayed status of any entry is always the status of the last successful
//! server response; nothing here synthesizes state the backend owns.

pub mod query;

pub use query::{filter_collection, CollectionQuery};

use crate::backend::{AuthToken, BackendError, EntityBackend};
use crate::entity::{Entity, EntityId};

/// Distinguishes "no data yet" from "failed to load". An empty loaded
/// collection and a failed one are different UI states and must never
/// collapse into a silent empty list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    NotLoaded,
    Loaded,
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct Collection<E> {
    entries: Vec<E>,
    load_state: LoadState,
}

impl<E: Entity> Collection<E> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            load_state: LoadState::NotLoaded,
        }
    }

    /// A collection pre-populated as if freshly fetched. Used by tests and
    /// the seed path.
    pub fn from_entries(entries: Vec<E>) -> Self {
        Self {
            entries,
            load_state: LoadState::Loaded,
        }
    }

    pub fn entries(&self) -> &[E] {
        &self.entries
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn is_loaded(&self) -> bool {
        self.load_state == LoadState::Loaded
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &EntityId) -> Option<&E> {
        self.entries.iter().find(|entry| entry.id() == id)
    }

    /// Replaces the whole collection with the backend's current state. On
    /// failure the collection degrades to empty entries plus an explicit
    /// failed state carrying the error message.
    pub async fn refresh<B: EntityBackend<E>>(
        &mut self,
        backend: &B,
        token: &AuthToken,
    ) -> Result<(), BackendError> {
        match backend.fetch_all(token).await {
            Ok(entries) => {
                tracing::debug!(kind = %E::kind(), count = entries.len(), "collection refreshed");
                self.entries = entries;
                self.load_state = LoadState::Loaded;
                Ok(())
            }
            Err(err) => {
                tracing::warn!(kind = %E::kind(), error = %err, "collection refresh failed");
                self.entries.clear();
                self.load_state = LoadState::Failed(err.to_string());
                Err(err)
            }
        }
    }

    /// Replaces the entry with the same id wholesale. No partial merge: the
    /// incoming record is the backend's full authoritative state. Returns
    /// false when the id is not present.
    pub fn replace(&mut self, entity: E) -> bool {
        match self.entries.iter_mut().find(|entry| entry.id() == entity.id()) {
            Some(slot) => {
                *slot = entity;
                true
            }
            None => false,
        }
    }

    /// Appends a newly created record.
    pub fn insert(&mut self, entity: E) {
        self.entries.push(entity);
    }
}

impl<E: Entity> Default for Collection<E> {
    fn default() -> Self {
        Self::new()
    }
}
