//! Generic transition execution.
//!
//! One engine instance serves one entity kind, configured entirely by the
//! kind's [`StatusGraph`] table; the per-page copies of "find allowed next
//! states, call update, swap the row" collapse into this type.

use std::collections::HashSet;
use std::marker::PhantomData;
use std::sync::{Arc, Mutex, PoisonError};

use crate::backend::{AuthToken, EntityBackend, UpdatePatch};
use crate::entity::{Entity, EntityId};
use crate::store::Collection;
use crate::workflow::errors::WorkflowError;
use crate::workflow::graph::{SideEffectData, StatusGraph};

pub struct WorkflowEngine<E: Entity, B: EntityBackend<E>> {
    backend: B,
    // At most one in-flight transition per entity id. A second concurrent
    // request fails fast instead of racing last-write-wins.
    in_flight: Arc<Mutex<HashSet<EntityId>>>,
    _entity: PhantomData<fn() -> E>,
}

/// Holds an id's slot in the in-flight set. Releasing happens in `Drop`, so
/// the slot is freed on every exit path, including a transition future that
/// is dropped mid-await.
struct InFlightGuard {
    set: Arc<Mutex<HashSet<EntityId>>>,
    id: EntityId,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.set
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.id);
    }
}

impl<E: Entity, B: EntityBackend<E>> WorkflowEngine<E, B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            in_flight: Arc::new(Mutex::new(HashSet::new())),
            _entity: PhantomData,
        }
    }

    fn mark_in_flight(&self, id: &EntityId) -> Result<InFlightGuard, WorkflowError> {
        let mut set = self
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if !set.insert(id.clone()) {
            return Err(WorkflowError::TransitionInFlight { id: id.clone() });
        }
        Ok(InFlightGuard {
            set: Arc::clone(&self.in_flight),
            id: id.clone(),
        })
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The statuses legally reachable from `status`, in declared order.
    /// Empty for terminal statuses.
    pub fn allowed_transitions(status: E::Status) -> &'static [E::Status] {
        status.transitions()
    }

    /// Repopulates the collection from the backend. On failure the collection
    /// degrades to an explicit failed state rather than a silent empty list.
    pub async fn refresh(
        &self,
        collection: &mut Collection<E>,
        token: &AuthToken,
    ) -> Result<(), WorkflowError> {
        collection
            .refresh(&self.backend, token)
            .await
            .map_err(WorkflowError::from)
    }

    /// Validates and executes a status transition.
    ///
    /// Legality and side-effect validation run locally first; nothing is sent
    /// unless both pass. On success the collection entry is replaced wholesale
    /// with the record the backend returned. On rejection or network failure
    /// the collection is left unchanged.
    pub async fn apply_transition(
        &self,
        collection: &mut Collection<E>,
        id: &EntityId,
        target: E::Status,
        side_effects: SideEffectData,
        token: &AuthToken,
    ) -> Result<E, WorkflowError> {
        let current = collection
            .get(id)
            .ok_or_else(|| WorkflowError::UnknownEntity { id: id.clone() })?
            .status();

        if !current.transitions().contains(&target) {
            return Err(WorkflowError::IllegalTransition {
                from: current.as_str().to_string(),
                to: target.as_str().to_string(),
            });
        }

        if let Some(rule) = E::Status::side_effect_rule(target) {
            rule.validate(&side_effects)
                .map_err(|reason| WorkflowError::ValidationFailed { reason })?;
        }

        let _guard = self.mark_in_flight(id)?;

        let patch = UpdatePatch {
            status: target,
            fields: side_effects,
        };
        match self.backend.update(id, patch, token).await {
            Ok(updated) => {
                if updated.id() != id {
                    tracing::warn!(
                        kind = %E::kind(),
                        id = %id,
                        returned_id = %updated.id(),
                        "backend returned a record for a different id, local state unchanged"
                    );
                    return Err(WorkflowError::NetworkFailure {
                        message: format!(
                            "backend returned record `{}` in response to update of `{id}`",
                            updated.id()
                        ),
                    });
                }
                tracing::info!(
                    kind = %E::kind(),
                    id = %id,
                    from = current.as_str(),
                    to = target.as_str(),
                    "transition applied"
                );
                collection.replace(updated.clone());
                Ok(updated)
            }
            Err(err) => {
                tracing::warn!(
                    kind = %E::kind(),
                    id = %id,
                    from = current.as_str(),
                    to = target.as_str(),
                    error = %err,
                    "transition failed, local state unchanged"
                );
                Err(err.into())
            }
        }
    }

    /// Creates a record via the backend and inserts the authoritative result
    /// into the collection. The backend assigns the id.
    pub async fn create(
        &self,
        collection: &mut Collection<E>,
        fields: serde_json::Value,
        token: &AuthToken,
    ) -> Result<E, WorkflowError> {
        let created = self.backend.create(fields, token).await?;
        tracing::info!(kind = %E::kind(), id = %created.id(), "entity created");
        collection.insert(created.clone());
        Ok(created)
    }
}
