//! In-memory seed-data backend, the development fallback when no real
//! endpoint is configured.
//!
//! Behaves like the server it stands in for: updates merge the patch into the
//! stored record, stamp `updatedAt`, and return the stored result (never an
//! echo of the caller's input), so code exercising the wholesale-replace
//! contract behaves identically against seed data and the real backend.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::backend::{AuthToken, BackendError, EntityBackend, UpdatePatch};
use crate::entity::{Entity, EntityId};

pub struct SeedBackend<E> {
    records: Mutex<Vec<E>>,
}

impl<E: Entity> SeedBackend<E> {
    pub fn new(records: Vec<E>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }

    fn not_found(id: &EntityId) -> BackendError {
        BackendError::Api {
            status: None,
            message: format!("{} `{}` not found", E::kind(), id),
        }
    }

    fn merge(base: &E, patch_fields: Vec<(String, Value)>) -> Result<E, BackendError> {
        let mut value = serde_json::to_value(base)?;
        let Some(obj) = value.as_object_mut() else {
            return Err(BackendError::Api {
                status: None,
                message: "seed record did not serialize to an object".to_string(),
            });
        };
        for (key, field) in patch_fields {
            obj.insert(key, field);
        }
        obj.insert("updatedAt".to_string(), serde_json::to_value(Utc::now())?);
        Ok(serde_json::from_value(value)?)
    }
}

#[async_trait]
impl<E: Entity> EntityBackend<E> for SeedBackend<E> {
    async fn fetch_all(&self, _token: &AuthToken) -> Result<Vec<E>, BackendError> {
        Ok(self.records.lock().await.clone())
    }

    async fn update(
        &self,
        id: &EntityId,
        patch: UpdatePatch<E::Status>,
        _token: &AuthToken,
    ) -> Result<E, BackendError> {
        let mut records = self.records.lock().await;
        let slot = records
            .iter_mut()
            .find(|record| record.id() == id)
            .ok_or_else(|| Self::not_found(id))?;

        let mut fields: Vec<(String, Value)> = vec![(
            "status".to_string(),
            serde_json::to_value(patch.status)?,
        )];
        fields.extend(patch.fields);

        let updated = Self::merge(slot, fields)?;
        *slot = updated.clone();
        Ok(updated)
    }

    async fn create(&self, fields: Value, _token: &AuthToken) -> Result<E, BackendError> {
        let mut value = fields;
        let Some(obj) = value.as_object_mut() else {
            return Err(BackendError::Api {
                status: None,
                message: "create fields must be an object".to_string(),
            });
        };
        obj.insert(
            "id".to_string(),
            Value::String(Uuid::new_v4().to_string()),
        );
        obj.insert("updatedAt".to_string(), serde_json::to_value(Utc::now())?);

        let created: E = serde_json::from_value(value)?;
        self.records.lock().await.push(created.clone());
        Ok(created)
    }
}
