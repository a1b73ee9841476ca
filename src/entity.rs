//! Generic entity model shared by every console page.
//!
//! An entity is any backend-owned record carrying an opaque id, a status drawn
//! from a closed per-kind enumeration, and an `updatedAt` stamp the backend
//! overwrites on every mutation. Payload fields are kind-specific and opaque
//! to the workflow engine.

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fmt;

use crate::workflow::graph::StatusGraph;

/// Opaque backend-assigned identifier. Immutable after creation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for EntityId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Every record type managed by a console page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Order,
    Return,
    Subscription,
    ApprovalPost,
    ForumThread,
    ForumReport,
    Objective,
}

impl EntityKind {
    pub const ALL: &'static [EntityKind] = &[
        EntityKind::Order,
        EntityKind::Return,
        EntityKind::Subscription,
        EntityKind::ApprovalPost,
        EntityKind::ForumThread,
        EntityKind::ForumReport,
        EntityKind::Objective,
    ];

    /// Stable wire name, used in GraphQL operation construction and logging.
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Order => "order",
            EntityKind::Return => "return",
            EntityKind::Subscription => "subscription",
            EntityKind::ApprovalPost => "approval_post",
            EntityKind::ForumThread => "forum_thread",
            EntityKind::ForumReport => "forum_report",
            EntityKind::Objective => "objective",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "order" => Some(EntityKind::Order),
            "return" => Some(EntityKind::Return),
            "subscription" => Some(EntityKind::Subscription),
            "approval_post" | "approval" => Some(EntityKind::ApprovalPost),
            "forum_thread" | "thread" => Some(EntityKind::ForumThread),
            "forum_report" | "report" => Some(EntityKind::ForumReport),
            "objective" | "okr" => Some(EntityKind::Objective),
            _ => None,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static per-kind wiring: the GraphQL documents for the three backend
/// operations, the response fields they come back under, and which payload
/// fields free-text search runs over.
#[derive(Debug)]
pub struct KindDescriptor {
    pub kind: EntityKind,
    pub list_query: &'static str,
    pub list_field: &'static str,
    pub update_mutation: &'static str,
    pub update_field: &'static str,
    pub create_mutation: &'static str,
    pub create_field: &'static str,
    pub searchable_fields: &'static [&'static str],
}

/// A status-bearing record the workflow engine can operate on.
///
/// `search_haystacks` and `facet` back the pure collection filter; they expose
/// the fields named in the kind's `KindDescriptor::searchable_fields` and the
/// exact-match facets the page offers.
pub trait Entity:
    Clone + fmt::Debug + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    type Status: StatusGraph;

    fn descriptor() -> &'static KindDescriptor;

    fn kind() -> EntityKind {
        Self::descriptor().kind
    }

    fn id(&self) -> &EntityId;
    fn status(&self) -> Self::Status;
    fn updated_at(&self) -> DateTime<Utc>;

    /// Text fields matched (case-insensitively) by free-text search.
    fn search_haystacks(&self) -> Vec<&str>;

    /// Exact-match facet lookup; unknown keys return `None` and match nothing.
    fn facet(&self, key: &str) -> Option<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_wire_names_round_trip() {
        for kind in EntityKind::ALL {
            assert_eq!(EntityKind::parse(kind.as_str()), Some(*kind));
        }
    }

    #[test]
    fn kind_aliases_parse() {
        assert_eq!(EntityKind::parse("okr"), Some(EntityKind::Objective));
        assert_eq!(EntityKind::parse("thread"), Some(EntityKind::ForumThread));
        assert_eq!(EntityKind::parse("widget"), None);
    }

    #[test]
    fn entity_id_is_transparent_in_json() {
        let id = EntityId::new("o-1001");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"o-1001\"");
    }
}
