use dashmap::DashMap;
use thiserror::Error;
use uuid::Uuid;

use crate::models::directory::{AdminInfo, Courier, Vendor};

/// A directory lookup that failed outright, as opposed to one that resolved
/// to "no such record". The two must never be conflated: an outage surfaces
/// as ServiceUnavailable to the caller, not as a denial.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("directory lookup failed: {0}")]
    Unavailable(String),
}

/// Identity lookups for couriers, vendors, and admins. Records are resolved
/// fresh per request; the core holds no cache.
pub trait DirectoryService: Send + Sync {
    fn courier(&self, id: Uuid) -> Result<Option<Courier>, DirectoryError>;
    fn vendor(&self, id: Uuid) -> Result<Option<Vendor>, DirectoryError>;
    fn admin_info(&self, id: Uuid) -> Result<Option<AdminInfo>, DirectoryError>;
}

pub struct InMemoryDirectory {
    pub couriers: DashMap<Uuid, Courier>,
    pub vendors: DashMap<Uuid, Vendor>,
    pub admins: DashMap<Uuid, AdminInfo>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self {
            couriers: DashMap::new(),
            vendors: DashMap::new(),
            admins: DashMap::new(),
        }
    }
}

impl Default for InMemoryDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectoryService for InMemoryDirectory {
    fn courier(&self, id: Uuid) -> Result<Option<Courier>, DirectoryError> {
        Ok(self.couriers.get(&id).map(|entry| entry.value().clone()))
    }

    fn vendor(&self, id: Uuid) -> Result<Option<Vendor>, DirectoryError> {
        Ok(self.vendors.get(&id).map(|entry| entry.value().clone()))
    }

    fn admin_info(&self, id: Uuid) -> Result<Option<AdminInfo>, DirectoryError> {
        Ok(self.admins.get(&id).map(|entry| entry.value().clone()))
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use uuid::Uuid;

    use super::{DirectoryError, DirectoryService};
    use crate::models::directory::{AdminInfo, Courier, Vendor, ADMIN_ROLE};

    /// Scriptable directory that counts lookups, so tests can assert that a
    /// failed chain link stops later lookups from happening at all.
    #[derive(Default)]
    pub struct MockDirectory {
        couriers: HashMap<Uuid, Courier>,
        vendors: HashMap<Uuid, Vendor>,
        admins: HashMap<Uuid, AdminInfo>,
        unavailable: bool,
        pub courier_calls: AtomicUsize,
        pub vendor_calls: AtomicUsize,
        pub admin_calls: AtomicUsize,
    }

    impl MockDirectory {
        pub fn new() -> Self {
            Self::default()
        }

        /// Every lookup fails, simulating a directory outage.
        pub fn down() -> Self {
            Self {
                unavailable: true,
                ..Self::default()
            }
        }

        pub fn with_courier(mut self, id: Uuid, home_vendor: Option<Uuid>) -> Self {
            self.couriers.insert(
                id,
                Courier {
                    id,
                    name: format!("courier-{id}"),
                    home_vendor,
                },
            );
            self
        }

        pub fn with_vendor(mut self, id: Uuid, allows_only_own_couriers: bool) -> Self {
            self.vendors.insert(
                id,
                Vendor {
                    id,
                    name: format!("vendor-{id}"),
                    allows_only_own_couriers,
                },
            );
            self
        }

        pub fn with_admin(mut self, id: Uuid) -> Self {
            self.admins.insert(
                id,
                AdminInfo {
                    id,
                    role: ADMIN_ROLE.to_string(),
                },
            );
            self
        }

        pub fn with_directory_record(mut self, id: Uuid, role: &str) -> Self {
            self.admins.insert(
                id,
                AdminInfo {
                    id,
                    role: role.to_string(),
                },
            );
            self
        }
    }

    impl DirectoryService for MockDirectory {
        fn courier(&self, id: Uuid) -> Result<Option<Courier>, DirectoryError> {
            self.courier_calls.fetch_add(1, Ordering::SeqCst);
            if self.unavailable {
                return Err(DirectoryError::Unavailable("directory offline".to_string()));
            }
            Ok(self.couriers.get(&id).cloned())
        }

        fn vendor(&self, id: Uuid) -> Result<Option<Vendor>, DirectoryError> {
            self.vendor_calls.fetch_add(1, Ordering::SeqCst);
            if self.unavailable {
                return Err(DirectoryError::Unavailable("directory offline".to_string()));
            }
            Ok(self.vendors.get(&id).cloned())
        }

        fn admin_info(&self, id: Uuid) -> Result<Option<AdminInfo>, DirectoryError> {
            self.admin_calls.fetch_add(1, Ordering::SeqCst);
            if self.unavailable {
                return Err(DirectoryError::Unavailable("directory offline".to_string()));
            }
            Ok(self.admins.get(&id).cloned())
        }
    }
}
