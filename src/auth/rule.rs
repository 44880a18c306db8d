use uuid::Uuid;

use crate::directory::{DirectoryError, DirectoryService};
use crate::models::delivery::Delivery;
use crate::models::directory::ADMIN_ROLE;

/// One authorization predicate over (subject, delivery). Rules are pure:
/// the only state they touch is the directory they are handed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    CourierExists,
    CourierBelongsToDelivery,
    CourierBelongsToVendor,
    VendorExists,
    VendorBelongsToDelivery,
    UserIsAdmin,
}

impl Rule {
    pub fn check(
        &self,
        directory: &dyn DirectoryService,
        subject: Uuid,
        delivery: &Delivery,
    ) -> Result<bool, DirectoryError> {
        match self {
            Rule::CourierExists => Ok(directory.courier(subject)?.is_some()),

            Rule::CourierBelongsToDelivery => Ok(delivery.courier_id == Some(subject)),

            Rule::CourierBelongsToVendor => {
                // A vendor record that resolves to None is permissive; only a
                // vendor that explicitly restricts to its own couriers can
                // reject here. A lookup error still aborts the request.
                let Some(vendor) = directory.vendor(delivery.vendor_id)? else {
                    return Ok(true);
                };
                if !vendor.allows_only_own_couriers {
                    return Ok(true);
                }
                let home = directory.courier(subject)?.and_then(|c| c.home_vendor);
                Ok(home == Some(delivery.vendor_id))
            }

            Rule::VendorExists => Ok(directory.vendor(subject)?.is_some()),

            Rule::VendorBelongsToDelivery => Ok(delivery.vendor_id == subject),

            Rule::UserIsAdmin => Ok(directory
                .admin_info(subject)?
                .is_some_and(|info| info.role == ADMIN_ROLE)),
        }
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::Rule;
    use crate::directory::testing::MockDirectory;
    use crate::models::delivery::Delivery;

    fn delivery_for(vendor: Uuid) -> Delivery {
        Delivery::new(Uuid::new_v4(), vendor)
    }

    #[test]
    fn courier_belongs_to_vendor_permissive_when_vendor_unresolvable() {
        let vendor = Uuid::new_v4();
        let courier = Uuid::new_v4();
        // Vendor is not registered in the directory at all.
        let directory = MockDirectory::new().with_courier(courier, None);

        let delivery = delivery_for(vendor);
        let result = Rule::CourierBelongsToVendor
            .check(&directory, courier, &delivery)
            .unwrap();

        assert!(result);
    }

    #[test]
    fn courier_belongs_to_vendor_permissive_when_vendor_allows_any_courier() {
        let vendor = Uuid::new_v4();
        let other_vendor = Uuid::new_v4();
        let courier = Uuid::new_v4();
        let directory = MockDirectory::new()
            .with_vendor(vendor, false)
            .with_courier(courier, Some(other_vendor));

        let delivery = delivery_for(vendor);
        assert!(Rule::CourierBelongsToVendor
            .check(&directory, courier, &delivery)
            .unwrap());
    }

    #[test]
    fn foreign_courier_rejected_by_own_couriers_only_vendor() {
        let vendor_x = Uuid::new_v4();
        let vendor_y = Uuid::new_v4();
        let courier = Uuid::new_v4();
        let directory = MockDirectory::new()
            .with_vendor(vendor_x, true)
            .with_courier(courier, Some(vendor_y));

        let delivery = delivery_for(vendor_x);
        assert!(!Rule::CourierBelongsToVendor
            .check(&directory, courier, &delivery)
            .unwrap());
    }

    #[test]
    fn home_courier_accepted_by_own_couriers_only_vendor() {
        let vendor = Uuid::new_v4();
        let courier = Uuid::new_v4();
        let directory = MockDirectory::new()
            .with_vendor(vendor, true)
            .with_courier(courier, Some(vendor));

        let delivery = delivery_for(vendor);
        assert!(Rule::CourierBelongsToVendor
            .check(&directory, courier, &delivery)
            .unwrap());
    }

    #[test]
    fn courier_belongs_to_delivery_matches_assigned_courier_only() {
        let courier = Uuid::new_v4();
        let directory = MockDirectory::new();

        let mut delivery = delivery_for(Uuid::new_v4());
        assert!(!Rule::CourierBelongsToDelivery
            .check(&directory, courier, &delivery)
            .unwrap());

        delivery.courier_id = Some(courier);
        assert!(Rule::CourierBelongsToDelivery
            .check(&directory, courier, &delivery)
            .unwrap());
    }

    #[test]
    fn user_is_admin_requires_admin_role_string() {
        let admin = Uuid::new_v4();
        let support = Uuid::new_v4();
        let directory = MockDirectory::new()
            .with_admin(admin)
            .with_directory_record(support, "Support");

        let delivery = delivery_for(Uuid::new_v4());
        assert!(Rule::UserIsAdmin.check(&directory, admin, &delivery).unwrap());
        assert!(!Rule::UserIsAdmin
            .check(&directory, support, &delivery)
            .unwrap());
    }

    #[test]
    fn lookup_outage_is_an_error_not_a_denial() {
        let directory = MockDirectory::down();
        let delivery = delivery_for(Uuid::new_v4());

        let result = Rule::CourierExists.check(&directory, Uuid::new_v4(), &delivery);
        assert!(result.is_err());
    }
}
