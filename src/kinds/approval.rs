//! Social post approval queue.
//!
//! The two reviewed outcomes carry side-effect requirements: approving stamps
//! the approver's identity (feedback optional), requesting changes requires
//! non-empty feedback. Both are declared here with the table, not in UI
//! callbacks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::{Entity, EntityId, EntityKind, KindDescriptor};
use crate::workflow::graph::{SideEffectRule, StatusGraph};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    Draft,
    InReview,
    Approved,
    ChangesRequested,
    Published,
}

static APPROVED_RULE: SideEffectRule = SideEffectRule {
    required: &["approvedBy"],
    optional: &["feedback"],
};

static CHANGES_REQUESTED_RULE: SideEffectRule = SideEffectRule {
    required: &["feedback"],
    optional: &[],
};

impl StatusGraph for ApprovalStatus {
    fn transitions(self) -> &'static [Self] {
        use ApprovalStatus::*;
        match self {
            Draft => &[InReview],
            InReview => &[Approved, ChangesRequested],
            ChangesRequested => &[InReview],
            Approved => &[Published],
            Published => &[],
        }
    }

    fn side_effect_rule(target: Self) -> Option<&'static SideEffectRule> {
        match target {
            ApprovalStatus::Approved => Some(&APPROVED_RULE),
            ApprovalStatus::ChangesRequested => Some(&CHANGES_REQUESTED_RULE),
            _ => None,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            ApprovalStatus::Draft => "draft",
            ApprovalStatus::InReview => "in_review",
            ApprovalStatus::Approved => "approved",
            ApprovalStatus::ChangesRequested => "changes_requested",
            ApprovalStatus::Published => "published",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(ApprovalStatus::Draft),
            "in_review" => Some(ApprovalStatus::InReview),
            "approved" => Some(ApprovalStatus::Approved),
            "changes_requested" => Some(ApprovalStatus::ChangesRequested),
            "published" => Some(ApprovalStatus::Published),
            _ => None,
        }
    }
}

static APPROVAL_DESCRIPTOR: KindDescriptor = KindDescriptor {
    kind: EntityKind::ApprovalPost,
    list_query: "query ApprovalPosts { approvalPosts { id title platform author approvedBy feedback status updatedAt } }",
    list_field: "approvalPosts",
    update_mutation: "mutation UpdateApprovalPost($id: ID!, $input: ApprovalPostUpdateInput!) { updateApprovalPost(id: $id, input: $input) { id title platform author approvedBy feedback status updatedAt } }",
    update_field: "updateApprovalPost",
    create_mutation: "mutation CreateApprovalPost($input: ApprovalPostCreateInput!) { createApprovalPost(input: $input) { id title platform author approvedBy feedback status updatedAt } }",
    create_field: "createApprovalPost",
    searchable_fields: &["id", "title", "author"],
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalPost {
    pub id: EntityId,
    pub title: String,
    pub platform: String,
    pub author: String,
    #[serde(default)]
    pub approved_by: Option<String>,
    #[serde(default)]
    pub feedback: Option<String>,
    pub status: ApprovalStatus,
    pub updated_at: DateTime<Utc>,
}

impl Entity for ApprovalPost {
    type Status = ApprovalStatus;

    fn descriptor() -> &'static KindDescriptor {
        &APPROVAL_DESCRIPTOR
    }

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn status(&self) -> ApprovalStatus {
        self.status
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn search_haystacks(&self) -> Vec<&str> {
        vec![self.id.as_str(), &self.title, &self.author]
    }

    fn facet(&self, key: &str) -> Option<String> {
        match key {
            "status" => Some(self.status.as_str().to_string()),
            "platform" => Some(self.platform.clone()),
            _ => None,
        }
    }
}

pub fn seed_approval_posts() -> Vec<ApprovalPost> {
    use super::seed_ts;
    vec![
        ApprovalPost {
            id: EntityId::new("p-4001"),
            title: "Fall launch teaser".to_string(),
            platform: "instagram".to_string(),
            author: "noor".to_string(),
            approved_by: None,
            feedback: None,
            status: ApprovalStatus::InReview,
            updated_at: seed_ts("2026-08-24T15:20:00Z"),
        },
        ApprovalPost {
            id: EntityId::new("p-4002"),
            title: "Customer story: Atlas Coffee".to_string(),
            platform: "linkedin".to_string(),
            author: "sam".to_string(),
            approved_by: None,
            feedback: None,
            status: ApprovalStatus::Draft,
            updated_at: seed_ts("2026-08-23T09:00:00Z"),
        },
        ApprovalPost {
            id: EntityId::new("p-4003"),
            title: "Back-to-school promo".to_string(),
            platform: "instagram".to_string(),
            author: "noor".to_string(),
            approved_by: Some("dana".to_string()),
            feedback: None,
            status: ApprovalStatus::Approved,
            updated_at: seed_ts("2026-08-22T16:40:00Z"),
        },
    ]
}
