//! The workflow engine: static transition tables over per-kind status enums,
//! legality/validation checks, and transition execution against a backend.

pub mod bulk;
pub mod engine;
pub mod errors;
pub mod graph;

pub use bulk::{transition_with_dependents, BulkOutcome};
pub use engine::WorkflowEngine;
pub use errors::WorkflowError;
pub use graph::{SideEffectData, SideEffectRule, StatusGraph};
