//! Local collection contract: wholesale replacement on success, untouched
//! state on failure, and the loaded/failed distinction.

mod common;

use common::{token, FailureMode, FlakyBackend};
use deskhand::kinds::approval::{seed_approval_posts, ApprovalStatus};
use deskhand::kinds::order::{seed_orders, Order, OrderStatus};
use deskhand::store::{Collection, LoadState};
use deskhand::workflow::graph::SideEffectData;
use deskhand::workflow::{WorkflowEngine, WorkflowError};

#[tokio::test]
async fn successful_transition_replaces_entry_wholesale() {
    let engine = WorkflowEngine::new(FlakyBackend::new(seed_approval_posts()));
    let mut posts = Collection::from_entries(seed_approval_posts());
    let before = posts.get(&"p-4001".into()).cloned().unwrap();

    let mut data = SideEffectData::new();
    data.insert("feedback".into(), serde_json::json!("tighten the headline"));
    let returned = engine
        .apply_transition(
            &mut posts,
            &"p-4001".into(),
            ApprovalStatus::ChangesRequested,
            data,
            &token(),
        )
        .await
        .unwrap();

    // The entry is exactly the backend's record: new status, new feedback,
    // new timestamp, no stale fields.
    let entry = posts.get(&"p-4001".into()).unwrap();
    assert_eq!(entry, &returned);
    assert_eq!(entry.status, ApprovalStatus::ChangesRequested);
    assert_eq!(entry.feedback.as_deref(), Some("tighten the headline"));
    assert_ne!(entry.updated_at, before.updated_at);
    assert_eq!(entry.title, before.title);
}

#[tokio::test]
async fn rejected_transition_leaves_collection_unchanged() {
    let engine = WorkflowEngine::new(FlakyBackend::new(seed_orders()).rejecting("o-1001"));
    let mut orders = Collection::from_entries(seed_orders());
    let before: Vec<Order> = orders.entries().to_vec();

    let err = engine
        .apply_transition(
            &mut orders,
            &"o-1001".into(),
            OrderStatus::Processing,
            SideEffectData::new(),
            &token(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, WorkflowError::TransitionRejected { .. }));
    assert_eq!(orders.entries(), before.as_slice());
    assert_eq!(engine.backend().update_call_count(), 1);
}

#[tokio::test]
async fn network_failure_leaves_collection_unchanged() {
    let engine = WorkflowEngine::new(FlakyBackend::new(seed_orders()).timing_out("o-1001"));
    let mut orders = Collection::from_entries(seed_orders());
    let before: Vec<Order> = orders.entries().to_vec();

    let err = engine
        .apply_transition(
            &mut orders,
            &"o-1001".into(),
            OrderStatus::Processing,
            SideEffectData::new(),
            &token(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, WorkflowError::NetworkFailure { .. }));
    assert_eq!(orders.entries(), before.as_slice());
}

#[tokio::test]
async fn refresh_failure_is_distinct_from_empty() {
    // An empty but successful fetch is a loaded collection.
    let engine = WorkflowEngine::new(FlakyBackend::<Order>::new(Vec::new()));
    let mut empty = Collection::new();
    engine.refresh(&mut empty, &token()).await.unwrap();
    assert_eq!(empty.load_state(), &LoadState::Loaded);
    assert!(empty.is_empty());

    // A failed fetch degrades to empty entries plus an explicit error state.
    let failing = WorkflowEngine::new(
        FlakyBackend::new(seed_orders()).with_fetch_failure(FailureMode::Timeout),
    );
    let mut failed = Collection::from_entries(seed_orders());
    let err = failing.refresh(&mut failed, &token()).await.unwrap_err();
    assert!(matches!(err, WorkflowError::NetworkFailure { .. }));
    assert!(failed.is_empty());
    assert!(matches!(failed.load_state(), LoadState::Failed(_)));
}

#[tokio::test]
async fn refresh_mirrors_backend_state() {
    let engine = WorkflowEngine::new(FlakyBackend::new(seed_orders()));
    let mut orders: Collection<Order> = Collection::new();
    assert_eq!(orders.load_state(), &LoadState::NotLoaded);

    engine.refresh(&mut orders, &token()).await.unwrap();
    assert_eq!(orders.len(), seed_orders().len());
    assert!(orders.get(&"o-1002".into()).is_some());
}

#[tokio::test]
async fn create_inserts_backend_assigned_record() {
    let engine = WorkflowEngine::new(FlakyBackend::<Order>::new(Vec::new()));
    let mut orders = Collection::from_entries(Vec::new());

    let created = engine
        .create(
            &mut orders,
            serde_json::json!({
                "customerName": "Lena Krause",
                "platform": "shopify",
                "totalCents": 5400,
                "currency": "EUR",
                "status": "pending",
            }),
            &token(),
        )
        .await
        .unwrap();

    assert_eq!(created.status, OrderStatus::Pending);
    assert!(!created.id.as_str().is_empty());
    assert_eq!(orders.get(&created.id), Some(&created));
}
