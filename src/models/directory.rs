use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role string the admin directory uses to mark administrators.
pub const ADMIN_ROLE: &str = "Admin";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Courier {
    pub id: Uuid,
    pub name: String,
    /// The vendor this courier rides for, if any. Relevant when a delivery's
    /// vendor only allows its own couriers.
    pub home_vendor: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vendor {
    pub id: Uuid,
    pub name: String,
    /// When set, only couriers homed at this vendor may handle its deliveries.
    pub allows_only_own_couriers: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminInfo {
    pub id: Uuid,
    pub role: String,
}

/// Requester identity class, resolved once per request from the directory
/// and matched exhaustively from then on.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RequesterRole {
    Vendor,
    Courier,
    Admin,
    Unknown,
}
