use tokio::sync::broadcast;

use crate::directory::InMemoryDirectory;
use crate::models::event::StatusChange;
use crate::observability::metrics::Metrics;
use crate::store::InMemoryDeliveryStore;

pub struct AppState {
    pub deliveries: InMemoryDeliveryStore,
    pub directory: InMemoryDirectory,
    pub status_events_tx: broadcast::Sender<StatusChange>,
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(event_buffer_size: usize) -> Self {
        let (status_events_tx, _unused_rx) = broadcast::channel(event_buffer_size);

        Self {
            deliveries: InMemoryDeliveryStore::new(),
            directory: InMemoryDirectory::new(),
            status_events_tx,
            metrics: Metrics::new(),
        }
    }
}
