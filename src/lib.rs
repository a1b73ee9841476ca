// deskhand - workflow core for the internal operations admin console
// This exposes the core components for the CLI and for integration tests

pub mod backend;
pub mod config;
pub mod entity;
pub mod kinds;
pub mod observability;
pub mod store;
pub mod telemetry;
pub mod workflow;

// Re-export key types for easy access
pub use backend::{AuthToken, BackendError, EntityBackend, GraphqlBackend, SeedBackend, UpdatePatch};
pub use config::{config, init_config, DeskhandConfig};
pub use entity::{Entity, EntityId, EntityKind, KindDescriptor};
pub use observability::{api_metrics, ApiMetrics, OperationTimer};
pub use store::{filter_collection, Collection, CollectionQuery, LoadState};
pub use telemetry::{create_transition_span, generate_correlation_id, init_telemetry};
pub use workflow::{
    transition_with_dependents, BulkOutcome, SideEffectData, SideEffectRule, StatusGraph,
    WorkflowEngine, WorkflowError,
};
