//! Bulk transitions: one user action resolving dependent records.
//!
//! The console's moderation page removes a forum thread and resolves every
//! open report referencing it in the same click. The backend has no batch
//! endpoint, so this is explicitly best-effort: the primary transition runs
//! first, then each dependent as an independent sequential call. Dependent
//! failures are collected, never rolled back into the primary.

use crate::backend::{AuthToken, EntityBackend};
use crate::entity::{Entity, EntityId};
use crate::store::Collection;
use crate::workflow::engine::WorkflowEngine;
use crate::workflow::errors::WorkflowError;
use crate::workflow::graph::SideEffectData;

/// Report of a bulk transition. Shaped so callers can surface partial
/// failure instead of hiding it.
#[derive(Debug)]
pub struct BulkOutcome<P, D> {
    pub primary: P,
    pub resolved: Vec<D>,
    pub failed: Vec<(EntityId, WorkflowError)>,
}

impl<P, D> BulkOutcome<P, D> {
    pub fn fully_resolved(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Applies the primary transition, then the same dependent transition to each
/// id in `dependent_ids`. A primary failure aborts the whole operation;
/// dependent failures leave those specific records untouched and are reported
/// in the outcome.
#[allow(clippy::too_many_arguments)]
pub async fn transition_with_dependents<P, D, BP, BD>(
    primary_engine: &WorkflowEngine<P, BP>,
    primary_collection: &mut Collection<P>,
    primary_id: &EntityId,
    primary_target: P::Status,
    primary_data: SideEffectData,
    dependent_engine: &WorkflowEngine<D, BD>,
    dependent_collection: &mut Collection<D>,
    dependent_ids: &[EntityId],
    dependent_target: D::Status,
    token: &AuthToken,
) -> Result<BulkOutcome<P, D>, WorkflowError>
where
    P: Entity,
    D: Entity,
    BP: EntityBackend<P>,
    BD: EntityBackend<D>,
{
    let primary = primary_engine
        .apply_transition(
            primary_collection,
            primary_id,
            primary_target,
            primary_data,
            token,
        )
        .await?;

    let mut resolved = Vec::new();
    let mut failed = Vec::new();
    for id in dependent_ids {
        match dependent_engine
            .apply_transition(
                dependent_collection,
                id,
                dependent_target,
                SideEffectData::new(),
                token,
            )
            .await
        {
            Ok(entity) => resolved.push(entity),
            Err(err) => {
                tracing::warn!(
                    kind = %D::kind(),
                    id = %id,
                    primary_id = %primary_id,
                    error = %err,
                    "dependent transition failed, record left unresolved"
                );
                failed.push((id.clone(), err));
            }
        }
    }

    Ok(BulkOutcome {
        primary,
        resolved,
        failed,
    })
}
