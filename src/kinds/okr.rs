//! OKR objectives.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::{Entity, EntityId, EntityKind, KindDescriptor};
use crate::workflow::graph::StatusGraph;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectiveStatus {
    Draft,
    Active,
    Completed,
    Archived,
}

impl StatusGraph for ObjectiveStatus {
    fn transitions(self) -> &'static [Self] {
        use ObjectiveStatus::*;
        match self {
            Draft => &[Active],
            Active => &[Completed, Archived],
            Completed => &[Archived],
            Archived => &[],
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            ObjectiveStatus::Draft => "draft",
            ObjectiveStatus::Active => "active",
            ObjectiveStatus::Completed => "completed",
            ObjectiveStatus::Archived => "archived",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(ObjectiveStatus::Draft),
            "active" => Some(ObjectiveStatus::Active),
            "completed" => Some(ObjectiveStatus::Completed),
            "archived" => Some(ObjectiveStatus::Archived),
            _ => None,
        }
    }
}

static OBJECTIVE_DESCRIPTOR: KindDescriptor = KindDescriptor {
    kind: EntityKind::Objective,
    list_query: "query Objectives { objectives { id title owner quarter progressPercent status updatedAt } }",
    list_field: "objectives",
    update_mutation: "mutation UpdateObjective($id: ID!, $input: ObjectiveUpdateInput!) { updateObjective(id: $id, input: $input) { id title owner quarter progressPercent status updatedAt } }",
    update_field: "updateObjective",
    create_mutation: "mutation CreateObjective($input: ObjectiveCreateInput!) { createObjective(input: $input) { id title owner quarter progressPercent status updatedAt } }",
    create_field: "createObjective",
    searchable_fields: &["id", "title", "owner"],
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Objective {
    pub id: EntityId,
    pub title: String,
    pub owner: String,
    pub quarter: String,
    pub progress_percent: u8,
    pub status: ObjectiveStatus,
    pub updated_at: DateTime<Utc>,
}

impl Entity for Objective {
    type Status = ObjectiveStatus;

    fn descriptor() -> &'static KindDescriptor {
        &OBJECTIVE_DESCRIPTOR
    }

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn status(&self) -> ObjectiveStatus {
        self.status
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn search_haystacks(&self) -> Vec<&str> {
        vec![self.id.as_str(), &self.title, &self.owner]
    }

    fn facet(&self, key: &str) -> Option<String> {
        match key {
            "status" => Some(self.status.as_str().to_string()),
            "quarter" => Some(self.quarter.clone()),
            "owner" => Some(self.owner.clone()),
            _ => None,
        }
    }
}

pub fn seed_objectives() -> Vec<Objective> {
    use super::seed_ts;
    vec![
        Objective {
            id: EntityId::new("okr-7001"),
            title: "Grow newsletter to 50k subscribers".to_string(),
            owner: "dana".to_string(),
            quarter: "2026-Q3".to_string(),
            progress_percent: 62,
            status: ObjectiveStatus::Active,
            updated_at: seed_ts("2026-08-21T10:00:00Z"),
        },
        Objective {
            id: EntityId::new("okr-7002"),
            title: "Launch partner co-marketing program".to_string(),
            owner: "sam".to_string(),
            quarter: "2026-Q4".to_string(),
            progress_percent: 0,
            status: ObjectiveStatus::Draft,
            updated_at: seed_ts("2026-08-15T09:30:00Z"),
        },
    ]
}
