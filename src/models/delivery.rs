use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Last reported courier position for a delivery in progress.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackedLocation {
    pub lat: f64,
    pub lng: f64,
    pub recorded_at: DateTime<Utc>,
}

/// The seven-state delivery lifecycle. Any state may be requested from any
/// other; which requests go through is decided by the role gate and the
/// per-role validator chains, not by an adjacency graph.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum DeliveryStatus {
    Pending,
    Accepted,
    Rejected,
    Preparing,
    GivenToCourier,
    InTransit,
    Delivered,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Delivery {
    pub id: Uuid,
    pub order_id: Uuid,
    /// Set at creation, never changes afterwards.
    pub vendor_id: Uuid,
    /// Empty until a courier is assigned.
    pub courier_id: Option<Uuid>,
    pub status: DeliveryStatus,
    /// May only be set while the delivery is Accepted.
    pub estimated_prep_finish_time: Option<DateTime<Utc>>,
    pub estimated_delivery_time: Option<DateTime<Utc>>,
    pub current_location: Option<TrackedLocation>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Delivery {
    pub fn new(order_id: Uuid, vendor_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            order_id,
            vendor_id,
            courier_id: None,
            status: DeliveryStatus::Pending,
            estimated_prep_finish_time: None,
            estimated_delivery_time: None,
            current_location: None,
            created_at: now,
            updated_at: now,
        }
    }
}
