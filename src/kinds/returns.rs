//! Return requests for commerce orders.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::{Entity, EntityId, EntityKind, KindDescriptor};
use crate::workflow::graph::StatusGraph;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnStatus {
    Requested,
    Approved,
    Received,
    Refunded,
    Rejected,
}

impl StatusGraph for ReturnStatus {
    fn transitions(self) -> &'static [Self] {
        use ReturnStatus::*;
        match self {
            Requested => &[Approved, Rejected],
            Approved => &[Received],
            Received => &[Refunded],
            Refunded | Rejected => &[],
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            ReturnStatus::Requested => "requested",
            ReturnStatus::Approved => "approved",
            ReturnStatus::Received => "received",
            ReturnStatus::Refunded => "refunded",
            ReturnStatus::Rejected => "rejected",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "requested" => Some(ReturnStatus::Requested),
            "approved" => Some(ReturnStatus::Approved),
            "received" => Some(ReturnStatus::Received),
            "refunded" => Some(ReturnStatus::Refunded),
            "rejected" => Some(ReturnStatus::Rejected),
            _ => None,
        }
    }
}

static RETURN_DESCRIPTOR: KindDescriptor = KindDescriptor {
    kind: EntityKind::Return,
    list_query: "query Returns { returns { id orderId customerName reason refundCents status updatedAt } }",
    list_field: "returns",
    update_mutation: "mutation UpdateReturn($id: ID!, $input: ReturnUpdateInput!) { updateReturn(id: $id, input: $input) { id orderId customerName reason refundCents status updatedAt } }",
    update_field: "updateReturn",
    create_mutation: "mutation CreateReturn($input: ReturnCreateInput!) { createReturn(input: $input) { id orderId customerName reason refundCents status updatedAt } }",
    create_field: "createReturn",
    searchable_fields: &["id", "orderId", "customerName", "reason"],
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnRequest {
    pub id: EntityId,
    pub order_id: EntityId,
    pub customer_name: String,
    pub reason: String,
    pub refund_cents: i64,
    pub status: ReturnStatus,
    pub updated_at: DateTime<Utc>,
}

impl Entity for ReturnRequest {
    type Status = ReturnStatus;

    fn descriptor() -> &'static KindDescriptor {
        &RETURN_DESCRIPTOR
    }

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn status(&self) -> ReturnStatus {
        self.status
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn search_haystacks(&self) -> Vec<&str> {
        vec![
            self.id.as_str(),
            self.order_id.as_str(),
            &self.customer_name,
            &self.reason,
        ]
    }

    fn facet(&self, key: &str) -> Option<String> {
        match key {
            "status" => Some(self.status.as_str().to_string()),
            _ => None,
        }
    }
}

pub fn seed_returns() -> Vec<ReturnRequest> {
    use super::seed_ts;
    vec![
        ReturnRequest {
            id: EntityId::new("r-2001"),
            order_id: EntityId::new("o-1004"),
            customer_name: "Theo Marchetti".to_string(),
            reason: "arrived damaged".to_string(),
            refund_cents: 19_990,
            status: ReturnStatus::Requested,
            updated_at: seed_ts("2026-08-23T10:05:00Z"),
        },
        ReturnRequest {
            id: EntityId::new("r-2002"),
            order_id: EntityId::new("o-1003"),
            customer_name: "Priya Raman".to_string(),
            reason: "wrong size".to_string(),
            refund_cents: 8_250,
            status: ReturnStatus::Approved,
            updated_at: seed_ts("2026-08-24T11:30:00Z"),
        },
    ]
}
