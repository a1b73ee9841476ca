//! GraphQL-over-HTTP backend client.
//!
//! Posts `{query, variables}` envelopes to the configured endpoint and reads
//! `{data, errors}` responses. GraphQL errors and non-success HTTP statuses
//! surface as [`BackendError::Api`] (the backend said no); transport and
//! timeout failures surface separately so callers can tell rejection from
//! unreachability.
//!
//! Requests are rate limited with a configurable per-second quota, and
//! fetch-all responses are cached with a short TTL. Any update or create for
//! a kind invalidates that kind's cached list, so a transition followed by a
//! refresh never serves the pre-transition collection.

use governor::{DefaultDirectRateLimiter, Jitter, Quota, RateLimiter};
use moka::future::Cache;
use serde::Deserialize;
use serde_json::{json, Value};
use std::marker::PhantomData;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use async_trait::async_trait;

use crate::backend::{AuthToken, BackendError, EntityBackend, UpdatePatch};
use crate::config::BackendConfig;
use crate::entity::{Entity, EntityId};
use crate::observability::api_metrics;

#[derive(Debug, Deserialize)]
struct GraphqlResponse {
    data: Option<Value>,
    errors: Option<Vec<GraphqlError>>,
}

#[derive(Debug, Deserialize)]
struct GraphqlError {
    message: String,
}

pub struct GraphqlBackend<E> {
    http: reqwest::Client,
    endpoint: String,
    rate_limiter: Arc<DefaultDirectRateLimiter>,
    // Fetch-all responses keyed by kind wire name.
    list_cache: Cache<String, Value>,
    timeout_ms: u64,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> GraphqlBackend<E> {
    pub fn new(cfg: &BackendConfig) -> Result<Self, BackendError> {
        let per_second = NonZeroU32::new(cfg.rate_limit.requests_per_second.max(1))
            .unwrap_or(NonZeroU32::MIN);
        let burst = NonZeroU32::new(cfg.rate_limit.burst_capacity.max(1)).unwrap_or(NonZeroU32::MIN);
        let quota = Quota::per_second(per_second).allow_burst(burst);

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.request_timeout_seconds))
            .build()?;

        let list_cache = Cache::builder()
            .max_capacity(64)
            .time_to_live(Duration::from_secs(cfg.cache_ttl_seconds))
            .build();

        Ok(Self {
            http,
            endpoint: cfg.endpoint.clone(),
            rate_limiter: Arc::new(RateLimiter::direct(quota)),
            list_cache,
            timeout_ms: cfg.request_timeout_seconds * 1000,
            _entity: PhantomData,
        })
    }

    /// Posts one GraphQL operation and extracts `data.<data_field>`.
    async fn post(
        &self,
        operation: &str,
        query: &str,
        variables: Value,
        data_field: &str,
        token: &AuthToken,
    ) -> Result<Value, BackendError> {
        self.rate_limiter
            .until_ready_with_jitter(Jitter::up_to(Duration::from_millis(100)))
            .await;
        api_metrics().record_request();

        debug!(kind = %E::kind(), operation, "posting graphql request");

        let body = json!({ "query": query, "variables": variables });
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(token.expose())
            .json(&body)
            .send()
            .await
            .map_err(|err| {
                api_metrics().record_error();
                if err.is_timeout() {
                    BackendError::Timeout {
                        operation: operation.to_string(),
                        duration_ms: self.timeout_ms,
                    }
                } else {
                    BackendError::Http(err)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            api_metrics().record_error();
            let message = response.text().await.unwrap_or_default();
            return Err(BackendError::Api {
                status: Some(status.as_u16()),
                message,
            });
        }

        let envelope: GraphqlResponse = response.json().await?;
        if let Some(errors) = envelope.errors {
            if !errors.is_empty() {
                api_metrics().record_error();
                let message = errors
                    .into_iter()
                    .map(|e| e.message)
                    .collect::<Vec<_>>()
                    .join("; ");
                return Err(BackendError::Api {
                    status: None,
                    message,
                });
            }
        }

        let data = envelope.data.ok_or_else(|| BackendError::Api {
            status: None,
            message: "response carried neither data nor errors".to_string(),
        })?;
        data.get(data_field).cloned().ok_or_else(|| BackendError::Api {
            status: None,
            message: format!("response data missing field `{data_field}`"),
        })
    }

    fn cache_key() -> String {
        E::kind().as_str().to_string()
    }
}

#[async_trait]
impl<E: Entity> EntityBackend<E> for GraphqlBackend<E> {
    async fn fetch_all(&self, token: &AuthToken) -> Result<Vec<E>, BackendError> {
        let descriptor = E::descriptor();
        let key = Self::cache_key();

        if let Some(cached) = self.list_cache.get(&key).await {
            if let Ok(entities) = serde_json::from_value::<Vec<E>>(cached) {
                api_metrics().record_cache_hit();
                debug!(kind = %E::kind(), "serving fetch-all from cache");
                return Ok(entities);
            }
        }
        api_metrics().record_cache_miss();

        let raw = self
            .post(
                "fetch_all",
                descriptor.list_query,
                json!({}),
                descriptor.list_field,
                token,
            )
            .await?;
        let entities: Vec<E> = serde_json::from_value(raw.clone())?;
        self.list_cache.insert(key, raw).await;
        Ok(entities)
    }

    async fn update(
        &self,
        id: &EntityId,
        patch: UpdatePatch<E::Status>,
        token: &AuthToken,
    ) -> Result<E, BackendError> {
        let descriptor = E::descriptor();
        let variables = json!({ "id": id.as_str(), "input": patch });
        let raw = self
            .post(
                "update",
                descriptor.update_mutation,
                variables,
                descriptor.update_field,
                token,
            )
            .await?;
        self.list_cache.invalidate(&Self::cache_key()).await;
        Ok(serde_json::from_value(raw)?)
    }

    async fn create(
        &self,
        fields: Value,
        token: &AuthToken,
    ) -> Result<E, BackendError> {
        let descriptor = E::descriptor();
        let variables = json!({ "input": fields });
        let raw = self
            .post(
                "create",
                descriptor.create_mutation,
                variables,
                descriptor.create_field,
                token,
            )
            .await?;
        self.list_cache.invalidate(&Self::cache_key()).await;
        Ok(serde_json::from_value(raw)?)
    }
}
