use crate::models::delivery::DeliveryStatus;
use crate::models::directory::RequesterRole;

/// Statuses a role may never set, regardless of ownership. Admins are
/// unrestricted; Unknown requesters are gated only by the validator chain.
pub fn forbidden_statuses(role: RequesterRole) -> &'static [DeliveryStatus] {
    match role {
        RequesterRole::Vendor => &[DeliveryStatus::InTransit, DeliveryStatus::Delivered],
        RequesterRole::Courier => &[
            DeliveryStatus::Pending,
            DeliveryStatus::Accepted,
            DeliveryStatus::Rejected,
            DeliveryStatus::Preparing,
            DeliveryStatus::GivenToCourier,
        ],
        RequesterRole::Admin | RequesterRole::Unknown => &[],
    }
}

pub fn permits(role: RequesterRole, requested: DeliveryStatus) -> bool {
    !forbidden_statuses(role).contains(&requested)
}

#[cfg(test)]
mod tests {
    use super::permits;
    use crate::models::delivery::DeliveryStatus;
    use crate::models::directory::RequesterRole;

    const ALL: [DeliveryStatus; 7] = [
        DeliveryStatus::Pending,
        DeliveryStatus::Accepted,
        DeliveryStatus::Rejected,
        DeliveryStatus::Preparing,
        DeliveryStatus::GivenToCourier,
        DeliveryStatus::InTransit,
        DeliveryStatus::Delivered,
    ];

    #[test]
    fn vendor_may_not_mark_transit_or_delivered() {
        assert!(!permits(RequesterRole::Vendor, DeliveryStatus::InTransit));
        assert!(!permits(RequesterRole::Vendor, DeliveryStatus::Delivered));

        for status in [
            DeliveryStatus::Pending,
            DeliveryStatus::Accepted,
            DeliveryStatus::Rejected,
            DeliveryStatus::Preparing,
            DeliveryStatus::GivenToCourier,
        ] {
            assert!(permits(RequesterRole::Vendor, status), "{status:?}");
        }
    }

    #[test]
    fn courier_may_only_mark_transit_or_delivered() {
        for status in ALL {
            let allowed = matches!(
                status,
                DeliveryStatus::InTransit | DeliveryStatus::Delivered
            );
            assert_eq!(permits(RequesterRole::Courier, status), allowed, "{status:?}");
        }
    }

    #[test]
    fn admin_and_unknown_are_unrestricted_by_the_gate() {
        for status in ALL {
            assert!(permits(RequesterRole::Admin, status));
            assert!(permits(RequesterRole::Unknown, status));
        }
    }
}
