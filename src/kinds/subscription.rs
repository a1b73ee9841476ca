//! Customer subscriptions. The active/paused pair is intentionally cyclic.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::{Entity, EntityId, EntityKind, KindDescriptor};
use crate::workflow::graph::StatusGraph;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Active,
    Paused,
    Cancelled,
}

impl StatusGraph for SubscriptionStatus {
    fn transitions(self) -> &'static [Self] {
        use SubscriptionStatus::*;
        match self {
            Active => &[Paused, Cancelled],
            Paused => &[Active, Cancelled],
            Cancelled => &[],
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::Paused => "paused",
            SubscriptionStatus::Cancelled => "cancelled",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(SubscriptionStatus::Active),
            "paused" => Some(SubscriptionStatus::Paused),
            "cancelled" => Some(SubscriptionStatus::Cancelled),
            _ => None,
        }
    }
}

static SUBSCRIPTION_DESCRIPTOR: KindDescriptor = KindDescriptor {
    kind: EntityKind::Subscription,
    list_query: "query Subscriptions { subscriptions { id customerName plan monthlyCents status updatedAt } }",
    list_field: "subscriptions",
    update_mutation: "mutation UpdateSubscription($id: ID!, $input: SubscriptionUpdateInput!) { updateSubscription(id: $id, input: $input) { id customerName plan monthlyCents status updatedAt } }",
    update_field: "updateSubscription",
    create_mutation: "mutation CreateSubscription($input: SubscriptionCreateInput!) { createSubscription(input: $input) { id customerName plan monthlyCents status updatedAt } }",
    create_field: "createSubscription",
    searchable_fields: &["id", "customerName", "plan"],
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: EntityId,
    pub customer_name: String,
    pub plan: String,
    pub monthly_cents: i64,
    pub status: SubscriptionStatus,
    pub updated_at: DateTime<Utc>,
}

impl Entity for Subscription {
    type Status = SubscriptionStatus;

    fn descriptor() -> &'static KindDescriptor {
        &SUBSCRIPTION_DESCRIPTOR
    }

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn status(&self) -> SubscriptionStatus {
        self.status
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn search_haystacks(&self) -> Vec<&str> {
        vec![self.id.as_str(), &self.customer_name, &self.plan]
    }

    fn facet(&self, key: &str) -> Option<String> {
        match key {
            "status" => Some(self.status.as_str().to_string()),
            "plan" => Some(self.plan.clone()),
            _ => None,
        }
    }
}

pub fn seed_subscriptions() -> Vec<Subscription> {
    use super::seed_ts;
    vec![
        Subscription {
            id: EntityId::new("s-3001"),
            customer_name: "Maya Okafor".to_string(),
            plan: "starter".to_string(),
            monthly_cents: 1_900,
            status: SubscriptionStatus::Active,
            updated_at: seed_ts("2026-08-19T06:45:00Z"),
        },
        Subscription {
            id: EntityId::new("s-3002"),
            customer_name: "Jonas Lindqvist".to_string(),
            plan: "growth".to_string(),
            monthly_cents: 4_900,
            status: SubscriptionStatus::Paused,
            updated_at: seed_ts("2026-08-22T13:10:00Z"),
        },
    ]
}
