//! Community inbox: forum threads and the reports filed against them.
//!
//! Removing a thread bulk-resolves its open reports via
//! [`crate::workflow::transition_with_dependents`]; `open_report_ids` computes
//! the dependent set.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::{Entity, EntityId, EntityKind, KindDescriptor};
use crate::store::Collection;
use crate::workflow::graph::StatusGraph;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreadStatus {
    Open,
    Resolved,
    Removed,
}

impl StatusGraph for ThreadStatus {
    fn transitions(self) -> &'static [Self] {
        use ThreadStatus::*;
        match self {
            Open => &[Resolved, Removed],
            // Resolved threads can be reopened by a follow-up post.
            Resolved => &[Open],
            Removed => &[],
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            ThreadStatus::Open => "open",
            ThreadStatus::Resolved => "resolved",
            ThreadStatus::Removed => "removed",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "open" => Some(ThreadStatus::Open),
            "resolved" => Some(ThreadStatus::Resolved),
            "removed" => Some(ThreadStatus::Removed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Open,
    Resolved,
    Dismissed,
}

impl StatusGraph for ReportStatus {
    fn transitions(self) -> &'static [Self] {
        use ReportStatus::*;
        match self {
            Open => &[Resolved, Dismissed],
            Resolved | Dismissed => &[],
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            ReportStatus::Open => "open",
            ReportStatus::Resolved => "resolved",
            ReportStatus::Dismissed => "dismissed",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "open" => Some(ReportStatus::Open),
            "resolved" => Some(ReportStatus::Resolved),
            "dismissed" => Some(ReportStatus::Dismissed),
            _ => None,
        }
    }
}

static THREAD_DESCRIPTOR: KindDescriptor = KindDescriptor {
    kind: EntityKind::ForumThread,
    list_query: "query ForumThreads { forumThreads { id title author category status updatedAt } }",
    list_field: "forumThreads",
    update_mutation: "mutation UpdateForumThread($id: ID!, $input: ForumThreadUpdateInput!) { updateForumThread(id: $id, input: $input) { id title author category status updatedAt } }",
    update_field: "updateForumThread",
    create_mutation: "mutation CreateForumThread($input: ForumThreadCreateInput!) { createForumThread(input: $input) { id title author category status updatedAt } }",
    create_field: "createForumThread",
    searchable_fields: &["id", "title", "author"],
};

static REPORT_DESCRIPTOR: KindDescriptor = KindDescriptor {
    kind: EntityKind::ForumReport,
    list_query: "query ForumReports { forumReports { id threadId reporter reason status updatedAt } }",
    list_field: "forumReports",
    update_mutation: "mutation UpdateForumReport($id: ID!, $input: ForumReportUpdateInput!) { updateForumReport(id: $id, input: $input) { id threadId reporter reason status updatedAt } }",
    update_field: "updateForumReport",
    create_mutation: "mutation CreateForumReport($input: ForumReportCreateInput!) { createForumReport(input: $input) { id threadId reporter reason status updatedAt } }",
    create_field: "createForumReport",
    searchable_fields: &["id", "reporter", "reason"],
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForumThread {
    pub id: EntityId,
    pub title: String,
    pub author: String,
    pub category: String,
    pub status: ThreadStatus,
    pub updated_at: DateTime<Utc>,
}

impl Entity for ForumThread {
    type Status = ThreadStatus;

    fn descriptor() -> &'static KindDescriptor {
        &THREAD_DESCRIPTOR
    }

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn status(&self) -> ThreadStatus {
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
            "category" => Some(self.category.clone()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForumReport {
    pub id: EntityId,
    pub thread_id: EntityId,
    pub reporter: String,
    pub reason: String,
    pub status: ReportStatus,
    pub updated_at: DateTime<Utc>,
}

impl Entity for ForumReport {
    type Status = ReportStatus;

    fn descriptor() -> &'static KindDescriptor {
        &REPORT_DESCRIPTOR
    }

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn status(&self) -> ReportStatus {
        self.status
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn search_haystacks(&self) -> Vec<&str> {
        vec![self.id.as_str(), &self.reporter, &self.reason]
    }

    fn facet(&self, key: &str) -> Option<String> {
        match key {
            "status" => Some(self.status.as_str().to_string()),
            "thread" => Some(self.thread_id.as_str().to_string()),
            _ => None,
        }
    }
}

/// Ids of the still-open reports referencing `thread_id`: the dependent set
/// for a bulk thread removal.
pub fn open_report_ids(reports: &Collection<ForumReport>, thread_id: &EntityId) -> Vec<EntityId> {
    reports
        .entries()
        .iter()
        .filter(|report| &report.thread_id == thread_id && report.status == ReportStatus::Open)
        .map(|report| report.id.clone())
        .collect()
}

pub fn seed_forum_threads() -> Vec<ForumThread> {
    use super::seed_ts;
    vec![
        ForumThread {
            id: EntityId::new("t-5001"),
            title: "Shipping delays to APAC?".to_string(),
            author: "kenji_f".to_string(),
            category: "orders".to_string(),
            status: ThreadStatus::Open,
            updated_at: seed_ts("2026-08-25T07:55:00Z"),
        },
        ForumThread {
            id: EntityId::new("t-5002"),
            title: "Referral spam ring".to_string(),
            author: "blocked_user_443".to_string(),
            category: "off-topic".to_string(),
            status: ThreadStatus::Open,
            updated_at: seed_ts("2026-08-25T12:30:00Z"),
        },
    ]
}

pub fn seed_forum_reports() -> Vec<ForumReport> {
    use super::seed_ts;
    vec![
        ForumReport {
            id: EntityId::new("rep-6001"),
            thread_id: EntityId::new("t-5002"),
            reporter: "maria_g".to_string(),
            reason: "spam links".to_string(),
            status: ReportStatus::Open,
            updated_at: seed_ts("2026-08-25T12:45:00Z"),
        },
        ForumReport {
            id: EntityId::new("rep-6002"),
            thread_id: EntityId::new("t-5002"),
            reporter: "kenji_f".to_string(),
            reason: "repeated self-promotion".to_string(),
            status: ReportStatus::Open,
            updated_at: seed_ts("2026-08-25T13:02:00Z"),
        },
    ]
}
