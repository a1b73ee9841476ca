//! Shared test fixtures: backends with scripted failure behavior, in the
//! mock-coordinator style used across the suite.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use deskhand::backend::{AuthToken, BackendError, EntityBackend, SeedBackend, UpdatePatch};
use deskhand::entity::{Entity, EntityId};

pub fn token() -> AuthToken {
    AuthToken::new("test-token")
}

/// How a scripted id should fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureMode {
    /// Backend received the request and said no (maps to TransitionRejected).
    Reject,
    /// Transport-level failure (maps to NetworkFailure).
    Timeout,
}

/// Seed-backed test double that fails updates for chosen ids and counts
/// every update attempt, so tests can assert "no network call was made".
pub struct FlakyBackend<E: Entity> {
    inner: SeedBackend<E>,
    reject_ids: HashSet<EntityId>,
    timeout_ids: HashSet<EntityId>,
    fail_fetch: Option<FailureMode>,
    update_calls: AtomicUsize,
    fetch_calls: AtomicUsize,
}

impl<E: Entity> FlakyBackend<E> {
    pub fn new(records: Vec<E>) -> Self {
        Self {
            inner: SeedBackend::new(records),
            reject_ids: HashSet::new(),
            timeout_ids: HashSet::new(),
            fail_fetch: None,
            update_calls: AtomicUsize::new(0),
            fetch_calls: AtomicUsize::new(0),
        }
    }

    pub fn rejecting(mut self, id: &str) -> Self {
        self.reject_ids.insert(id.into());
        self
    }

    pub fn timing_out(mut self, id: &str) -> Self {
        self.timeout_ids.insert(id.into());
        self
    }

    pub fn with_fetch_failure(mut self, mode: FailureMode) -> Self {
        self.fail_fetch = Some(mode);
        self
    }

    pub fn update_call_count(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }

    pub fn fetch_call_count(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    fn failure(mode: FailureMode, what: String) -> BackendError {
        match mode {
            FailureMode::Reject => BackendError::Api {
                status: None,
                message: format!("{what} refused by backend policy"),
            },
            FailureMode::Timeout => BackendError::Timeout {
                operation: what,
                duration_ms: 30_000,
            },
        }
    }
}

#[async_trait]
impl<E: Entity> EntityBackend<E> for FlakyBackend<E> {
    async fn fetch_all(&self, auth: &AuthToken) -> Result<Vec<E>, BackendError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(mode) = self.fail_fetch {
            return Err(Self::failure(mode, "fetch_all".to_string()));
        }
        self.inner.fetch_all(auth).await
    }

    async fn update(
        &self,
        id: &EntityId,
        patch: UpdatePatch<E::Status>,
        auth: &AuthToken,
    ) -> Result<E, BackendError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        if self.reject_ids.contains(id) {
            return Err(Self::failure(FailureMode::Reject, format!("update of `{id}`")));
        }
        if self.timeout_ids.contains(id) {
            return Err(Self::failure(FailureMode::Timeout, format!("update of `{id}`")));
        }
        self.inner.update(id, patch, auth).await
    }

    async fn create(
        &self,
        fields: serde_json::Value,
        auth: &AuthToken,
    ) -> Result<E, BackendError> {
        self.inner.create(fields, auth).await
    }
}
