//! Commerce orders.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::{Entity, EntityId, EntityKind, KindDescriptor};
use crate::workflow::graph::StatusGraph;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl StatusGraph for OrderStatus {
    fn transitions(self) -> &'static [Self] {
        use OrderStatus::*;
        match self {
            Pending => &[Processing, Cancelled],
            Processing => &[Shipped, Cancelled],
            Shipped => &[Delivered],
            Delivered | Cancelled => &[],
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(OrderStatus::Pending),
            "processing" => Some(OrderStatus::Processing),
            "shipped" => Some(OrderStatus::Shipped),
            "delivered" => Some(OrderStatus::Delivered),
            "cancelled" => Some(OrderStatus::Cancelled),
            _ => None,
        }
    }
}

static ORDER_DESCRIPTOR: KindDescriptor = KindDescriptor {
    kind: EntityKind::Order,
    list_query: "query Orders { orders { id customerName platform totalCents currency status updatedAt } }",
    list_field: "orders",
    update_mutation: "mutation UpdateOrder($id: ID!, $input: OrderUpdateInput!) { updateOrder(id: $id, input: $input) { id customerName platform totalCents currency status updatedAt } }",
    update_field: "updateOrder",
    create_mutation: "mutation CreateOrder($input: OrderCreateInput!) { createOrder(input: $input) { id customerName platform totalCents currency status updatedAt } }",
    create_field: "createOrder",
    searchable_fields: &["id", "customerName"],
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: EntityId,
    pub customer_name: String,
    pub platform: String,
    pub total_cents: i64,
    pub currency: String,
    pub status: OrderStatus,
    pub updated_at: DateTime<Utc>,
}

impl Entity for Order {
    type Status = OrderStatus;

    fn descriptor() -> &'static KindDescriptor {
        &ORDER_DESCRIPTOR
    }

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn status(&self) -> OrderStatus {
        self.status
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn search_haystacks(&self) -> Vec<&str> {
        vec![self.id.as_str(), &self.customer_name]
    }

    fn facet(&self, key: &str) -> Option<String> {
        match key {
            "status" => Some(self.status.as_str().to_string()),
            "platform" => Some(self.platform.clone()),
            "currency" => Some(self.currency.clone()),
            _ => None,
        }
    }
}

pub fn seed_orders() -> Vec<Order> {
    use super::seed_ts;
    vec![
        Order {
            id: EntityId::new("o-1001"),
            customer_name: "Maya Okafor".to_string(),
            platform: "shopify".to_string(),
            total_cents: 12_900,
            currency: "USD".to_string(),
            status: OrderStatus::Pending,
            updated_at: seed_ts("2026-08-20T09:15:00Z"),
        },
        Order {
            id: EntityId::new("o-1002"),
            customer_name: "Jonas Lindqvist".to_string(),
            platform: "shopify".to_string(),
            total_cents: 45_500,
            currency: "EUR".to_string(),
            status: OrderStatus::Processing,
            updated_at: seed_ts("2026-08-21T14:02:00Z"),
        },
        Order {
            id: EntityId::new("o-1003"),
            customer_name: "Priya Raman".to_string(),
            platform: "amazon".to_string(),
            total_cents: 8_250,
            currency: "USD".to_string(),
            status: OrderStatus::Shipped,
            updated_at: seed_ts("2026-08-22T08:40:00Z"),
        },
        Order {
            id: EntityId::new("o-1004"),
            customer_name: "Theo Marchetti".to_string(),
            platform: "amazon".to_string(),
            total_cents: 19_990,
            currency: "USD".to_string(),
            status: OrderStatus::Delivered,
            updated_at: seed_ts("2026-08-18T17:25:00Z"),
        },
    ]
}
