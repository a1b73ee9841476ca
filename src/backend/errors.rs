//! Backend error taxonomy: what the transport and the endpoint can do wrong.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    /// The endpoint received the request and said no: a GraphQL error payload
    /// or a non-success HTTP status. Carries the backend's own message.
    #[error("backend rejected the request{}: {message}", fmt_status(.status))]
    Api { status: Option<u16>, message: String },

    /// The request could not complete at the transport level.
    #[error("http transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// The request exceeded the configured deadline.
    #[error("`{operation}` timed out after {duration_ms}ms")]
    Timeout { operation: String, duration_ms: u64 },

    /// The response arrived but did not decode into the expected shape.
    #[error("failed to decode backend response: {0}")]
    Decode(#[from] serde_json::Error),

    /// No bearer token is configured for the real backend.
    #[error("no backend token configured: {0}")]
    TokenMissing(String),
}

fn fmt_status(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!(" (http {code})"),
        None => String::new(),
    }
}
