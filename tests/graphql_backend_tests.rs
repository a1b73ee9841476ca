//! GraphQL backend client: envelope handling, error mapping, auth
//! pass-through, and fetch-all cache invalidation.

mod common;

use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::token;
use deskhand::backend::{BackendError, EntityBackend, GraphqlBackend, UpdatePatch};
use deskhand::config::{BackendConfig, RateLimitConfig};
use deskhand::kinds::order::{Order, OrderStatus};
use deskhand::store::Collection;
use deskhand::workflow::graph::SideEffectData;
use deskhand::workflow::{WorkflowEngine, WorkflowError};

fn backend_config(endpoint: String) -> BackendConfig {
    BackendConfig {
        endpoint,
        token: Some("test-token".to_string()),
        request_timeout_seconds: 5,
        cache_ttl_seconds: 60,
        rate_limit: RateLimitConfig {
            requests_per_second: 1000,
            burst_capacity: 1000,
        },
    }
}

fn order_json(id: &str, status: &str, updated_at: &str) -> serde_json::Value {
    json!({
        "id": id,
        "customerName": "Maya Okafor",
        "platform": "shopify",
        "totalCents": 12900,
        "currency": "USD",
        "status": status,
        "updatedAt": updated_at,
    })
}

#[tokio::test]
async fn fetch_all_parses_list_and_sends_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/"))
        .and(header("authorization", "Bearer test-token"))
        .and(body_string_contains("query Orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "orders": [
                order_json("o-1", "pending", "2026-08-20T09:15:00Z"),
                order_json("o-2", "shipped", "2026-08-21T10:00:00Z"),
            ]}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let backend = GraphqlBackend::<Order>::new(&backend_config(server.uri())).unwrap();
    let orders = backend.fetch_all(&token()).await.unwrap();

    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0].id.as_str(), "o-1");
    assert_eq!(orders[1].status, OrderStatus::Shipped);
}

#[tokio::test]
async fn fetch_all_is_cached_until_a_mutation_invalidates() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains("query Orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "orders": [order_json("o-1", "pending", "2026-08-20T09:15:00Z")] }
        })))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_string_contains("mutation UpdateOrder"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "updateOrder": order_json("o-1", "processing", "2026-08-22T08:00:00Z") }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let backend = GraphqlBackend::<Order>::new(&backend_config(server.uri())).unwrap();
    let auth = token();

    // Second fetch is served from cache: one list request so far.
    backend.fetch_all(&auth).await.unwrap();
    backend.fetch_all(&auth).await.unwrap();

    // A mutation invalidates the cached list, forcing the second request.
    let patch = UpdatePatch {
        status: OrderStatus::Processing,
        fields: SideEffectData::new(),
    };
    backend.update(&"o-1".into(), patch, &auth).await.unwrap();
    backend.fetch_all(&auth).await.unwrap();
}

#[tokio::test]
async fn update_sends_status_and_side_effect_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains("mutation UpdateOrder"))
        .and(body_string_contains("\"status\":\"processing\""))
        .and(body_string_contains("\"note\":\"rush\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "updateOrder": order_json("o-1", "processing", "2026-08-22T08:00:00Z") }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let backend = GraphqlBackend::<Order>::new(&backend_config(server.uri())).unwrap();
    let mut fields = SideEffectData::new();
    fields.insert("note".into(), json!("rush"));
    let patch = UpdatePatch {
        status: OrderStatus::Processing,
        fields,
    };

    let updated = backend.update(&"o-1".into(), patch, &token()).await.unwrap();
    assert_eq!(updated.status, OrderStatus::Processing);
}

#[tokio::test]
async fn graphql_errors_surface_as_rejection() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": null,
            "errors": [{ "message": "not authorized to update orders" }]
        })))
        .mount(&server)
        .await;

    let backend = GraphqlBackend::<Order>::new(&backend_config(server.uri())).unwrap();
    let patch = UpdatePatch {
        status: OrderStatus::Processing,
        fields: SideEffectData::new(),
    };
    let err = backend.update(&"o-1".into(), patch, &token()).await.unwrap_err();

    match err {
        BackendError::Api { status, message } => {
            assert_eq!(status, None);
            assert!(message.contains("not authorized"));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn http_error_status_carries_code_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .mount(&server)
        .await;

    let backend = GraphqlBackend::<Order>::new(&backend_config(server.uri())).unwrap();
    let err = backend.fetch_all(&token()).await.unwrap_err();

    match err {
        BackendError::Api { status, message } => {
            assert_eq!(status, Some(503));
            assert!(message.contains("upstream unavailable"));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn rejection_and_unreachability_map_to_distinct_workflow_errors() {
    // Backend-level refusal becomes TransitionRejected with the message.
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains("query Orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "orders": [order_json("o-1", "pending", "2026-08-20T09:15:00Z")] }
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_string_contains("mutation UpdateOrder"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errors": [{ "message": "state is stale" }]
        })))
        .mount(&server)
        .await;

    let engine =
        WorkflowEngine::new(GraphqlBackend::<Order>::new(&backend_config(server.uri())).unwrap());
    let mut orders = Collection::new();
    engine.refresh(&mut orders, &token()).await.unwrap();

    let err = engine
        .apply_transition(
            &mut orders,
            &"o-1".into(),
            OrderStatus::Processing,
            SideEffectData::new(),
            &token(),
        )
        .await
        .unwrap_err();
    match err {
        WorkflowError::TransitionRejected { message } => assert!(message.contains("stale")),
        other => panic!("expected TransitionRejected, got {other:?}"),
    }
    // The rejected transition left the collection as fetched.
    assert_eq!(orders.get(&"o-1".into()).unwrap().status, OrderStatus::Pending);

    // An unreachable endpoint becomes NetworkFailure.
    let unreachable =
        WorkflowEngine::new(GraphqlBackend::<Order>::new(&backend_config(
            "http://127.0.0.1:9/graphql".to_string(),
        ))
        .unwrap());
    let err = unreachable
        .apply_transition(
            &mut orders,
            &"o-1".into(),
            OrderStatus::Processing,
            SideEffectData::new(),
            &token(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::NetworkFailure { .. }));
}
