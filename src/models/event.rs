use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::delivery::DeliveryStatus;
use crate::models::directory::RequesterRole;

/// Broadcast on every successful status transition. Notification delivery
/// (email etc.) is a downstream consumer's concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusChange {
    pub delivery_id: Uuid,
    pub order_id: Uuid,
    pub requester_id: Uuid,
    pub role: RequesterRole,
    pub previous: DeliveryStatus,
    pub status: DeliveryStatus,
    pub changed_at: DateTime<Utc>,
}
