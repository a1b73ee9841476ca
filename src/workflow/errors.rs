//! Workflow error taxonomy.
//!
//! The first three variants are raised locally before any network call and
//! are always recoverable; the backend-originated variants leave the local
//! collection untouched and are never retried by the engine itself.

use thiserror::Error;

use crate::backend::BackendError;
use crate::entity::EntityId;

#[derive(Debug, Error)]
pub enum WorkflowError {
    /// Requested target is not in the allowed set for the current status.
    #[error("illegal transition from `{from}` to `{to}`")]
    IllegalTransition { from: String, to: String },

    /// Required side-effect data for the target status is missing or empty.
    #[error("validation failed: {reason}")]
    ValidationFailed { reason: String },

    /// The backend refused a syntactically legal update.
    #[error("transition rejected by backend: {message}")]
    TransitionRejected { message: String },

    /// The update or fetch call could not complete.
    #[error("network failure: {message}")]
    NetworkFailure { message: String },

    /// Another transition for the same entity has not resolved yet.
    #[error("a transition for `{id}` is already in flight")]
    TransitionInFlight { id: EntityId },

    /// The id is not present in the local collection.
    #[error("no entity with id `{id}` in the local collection")]
    UnknownEntity { id: EntityId },
}

impl From<BackendError> for WorkflowError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Api { message, .. } => WorkflowError::TransitionRejected { message },
            other => WorkflowError::NetworkFailure {
                message: other.to_string(),
            },
        }
    }
}
