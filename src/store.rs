use dashmap::DashMap;
use uuid::Uuid;

use crate::models::delivery::Delivery;

/// Persistence seam for delivery records. The store guarantees serializable
/// read-modify-write per id; the core only reads and writes whole records.
pub trait DeliveryStore: Send + Sync {
    fn find(&self, id: Uuid) -> Option<Delivery>;
    fn save(&self, delivery: Delivery) -> Delivery;
}

pub struct InMemoryDeliveryStore {
    deliveries: DashMap<Uuid, Delivery>,
}

impl InMemoryDeliveryStore {
    pub fn new() -> Self {
        Self {
            deliveries: DashMap::new(),
        }
    }

    pub fn all(&self) -> Vec<Delivery> {
        self.deliveries
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.deliveries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deliveries.is_empty()
    }
}

impl Default for InMemoryDeliveryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DeliveryStore for InMemoryDeliveryStore {
    fn find(&self, id: Uuid) -> Option<Delivery> {
        self.deliveries.get(&id).map(|entry| entry.value().clone())
    }

    fn save(&self, delivery: Delivery) -> Delivery {
        self.deliveries.insert(delivery.id, delivery.clone());
        delivery
    }
}
