//! Transition tables and per-target side-effect requirements.
//!
//! Each status enum declares its own table by implementing [`StatusGraph`].
//! The table is a directed graph over the enumeration: terminal statuses
//! return the empty slice, and cycles are allowed (subscriptions pause and
//! resume). Because the enums are closed, an out-of-enumeration status is
//! unrepresentable; a status with no declared outgoing edges simply has no
//! legal transitions (fail-safe closed).

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::Hash;

/// Auxiliary fields a transition carries beyond the new status itself,
/// keyed by wire field name. Sent verbatim in the update request.
pub type SideEffectData = BTreeMap<String, Value>;

/// Declares which auxiliary fields entering a given target status requires.
///
/// Declared alongside the transition table, never in UI callbacks: the rule
/// belongs to the target status, not to the page that renders the button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SideEffectRule {
    /// Fields that must be present and non-empty.
    pub required: &'static [&'static str],
    /// Fields the transition may carry but does not have to.
    pub optional: &'static [&'static str],
}

impl SideEffectRule {
    /// Checks `data` against the rule. Runs locally, before any network call.
    pub fn validate(&self, data: &SideEffectData) -> Result<(), String> {
        for field in self.required {
            match data.get(*field) {
                None => return Err(format!("missing required field `{field}`")),
                Some(value) if is_empty_value(value) => {
                    return Err(format!("required field `{field}` must not be empty"))
                }
                Some(_) => {}
            }
        }
        Ok(())
    }
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// A closed status enumeration together with its static transition table.
pub trait StatusGraph:
    Copy + Eq + Hash + fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// The statuses reachable from `self` in one step, in display order.
    /// Terminal statuses return the empty slice.
    fn transitions(self) -> &'static [Self];

    /// The side-effect requirement for entering `target`, if any.
    fn side_effect_rule(target: Self) -> Option<&'static SideEffectRule> {
        let _ = target;
        None
    }

    /// Stable wire/display name.
    fn as_str(self) -> &'static str;

    fn parse(s: &str) -> Option<Self>;

    fn is_terminal(self) -> bool {
        self.transitions().is_empty()
    }
}
