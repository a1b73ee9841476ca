use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

/// Initialize structured logging: JSON output with span context, filtered by
/// RUST_LOG with an info default.
pub fn init_telemetry() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(true),
        )
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("deskhand telemetry initialized with structured logging");
    Ok(())
}

/// Generate a correlation ID for linking a user action to the network calls
/// it fans out into.
pub fn generate_correlation_id() -> String {
    Uuid::new_v4().to_string()
}

/// Create a span carrying the common transition attributes.
pub fn create_transition_span(
    kind: &str,
    entity_id: &str,
    target_status: &str,
    correlation_id: Option<&str>,
) -> tracing::Span {
    tracing::info_span!(
        "workflow_transition",
        entity.kind = kind,
        entity.id = entity_id,
        transition.target = target_status,
        correlation.id = correlation_id,
    )
}
