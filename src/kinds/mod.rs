//! Concrete entity kinds: one module per console page, each declaring its
//! status enumeration, transition table, side-effect rules, payload fields,
//! and development seed data.

pub mod approval;
pub mod forum;
pub mod okr;
pub mod order;
pub mod returns;
pub mod subscription;

pub use approval::{ApprovalPost, ApprovalStatus};
pub use forum::{ForumReport, ForumThread, ReportStatus, ThreadStatus};
pub use okr::{Objective, ObjectiveStatus};
pub use order::{Order, OrderStatus};
pub use returns::{ReturnRequest, ReturnStatus};
pub use subscription::{Subscription, SubscriptionStatus};

use chrono::{DateTime, Utc};

/// Fixed timestamps for seed records, parsed leniently so malformed literals
/// degrade to the epoch instead of panicking.
pub(crate) fn seed_ts(rfc3339: &str) -> DateTime<Utc> {
    rfc3339.parse::<DateTime<Utc>>().unwrap_or_default()
}
