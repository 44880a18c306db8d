use uuid::Uuid;

use crate::auth::rule::Rule;
use crate::directory::{DirectoryError, DirectoryService};
use crate::models::delivery::Delivery;
use crate::models::directory::RequesterRole;

/// Ordered sequence of rules evaluated front to back. The first rule that
/// returns false stops evaluation; an exhausted (or empty) chain passes.
#[derive(Debug, Clone)]
pub struct ValidatorChain {
    rules: Vec<Rule>,
}

impl ValidatorChain {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// The existence/ownership checks each role must clear before a status
    /// change. Unknown requesters carry no checks; the role gate is the only
    /// thing standing between them and the transition.
    pub fn for_role(role: RequesterRole) -> Self {
        match role {
            RequesterRole::Vendor => Self::new(vec![
                Rule::VendorExists,
                Rule::VendorBelongsToDelivery,
            ]),
            RequesterRole::Courier => Self::new(vec![
                Rule::CourierExists,
                Rule::CourierBelongsToDelivery,
                Rule::CourierBelongsToVendor,
            ]),
            RequesterRole::Admin => Self::new(vec![Rule::UserIsAdmin]),
            RequesterRole::Unknown => Self::empty(),
        }
    }

    pub fn evaluate(
        &self,
        directory: &dyn DirectoryService,
        subject: Uuid,
        delivery: &Delivery,
    ) -> Result<bool, DirectoryError> {
        for rule in &self.rules {
            if !rule.check(directory, subject, delivery)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}
