use uuid::Uuid;

use crate::directory::{DirectoryError, DirectoryService};
use crate::models::directory::{RequesterRole, ADMIN_ROLE};

/// Resolve a requester id to a role, checking the vendor directory first,
/// then couriers, then the admin directory. An id found nowhere is Unknown.
pub fn resolve_role(
    directory: &dyn DirectoryService,
    id: Uuid,
) -> Result<RequesterRole, DirectoryError> {
    if directory.vendor(id)?.is_some() {
        return Ok(RequesterRole::Vendor);
    }
    if directory.courier(id)?.is_some() {
        return Ok(RequesterRole::Courier);
    }
    match directory.admin_info(id)? {
        Some(info) if info.role == ADMIN_ROLE => Ok(RequesterRole::Admin),
        _ => Ok(RequesterRole::Unknown),
    }
}
