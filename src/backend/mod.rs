//! Backend seam: the three external operations every console page uses.
//!
//! Two implementations ship: [`GraphqlBackend`] for the real endpoint and
//! [`SeedBackend`] holding in-memory development seed data. Tests bring their
//! own.

pub mod errors;
pub mod graphql;
pub mod seed;

pub use errors::BackendError;
pub use graphql::GraphqlBackend;
pub use seed::SeedBackend;

use async_trait::async_trait;
use serde::Serialize;
use std::fmt;

use crate::entity::{Entity, EntityId};
use crate::workflow::graph::{SideEffectData, StatusGraph};

/// Opaque bearer credential supplied by the session layer. Passed through
/// unmodified; never inspected, never logged.
#[derive(Clone)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(<redacted>)")
    }
}

/// Partial update sent on a transition: the new status plus whatever
/// side-effect fields the target status requires. Flattened so the wire
/// payload is `{"status": ..., "approvedBy": ..., ...}`.
#[derive(Debug, Clone, Serialize)]
pub struct UpdatePatch<S: StatusGraph> {
    pub status: S,
    #[serde(flatten)]
    pub fields: SideEffectData,
}

/// The external interface of one entity kind's backend.
#[async_trait]
pub trait EntityBackend<E: Entity>: Send + Sync {
    /// Returns the complete current collection. No pagination contract.
    async fn fetch_all(&self, token: &AuthToken) -> Result<Vec<E>, BackendError>;

    /// Sends a partial update and returns the full authoritative entity.
    async fn update(
        &self,
        id: &EntityId,
        patch: UpdatePatch<E::Status>,
        token: &AuthToken,
    ) -> Result<E, BackendError>;

    /// Creates a record; the backend assigns the id.
    async fn create(&self, fields: serde_json::Value, token: &AuthToken)
        -> Result<E, BackendError>;
}
