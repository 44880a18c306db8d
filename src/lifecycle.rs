use chrono::{DateTime, Utc};
use tokio::sync::broadcast;
use tracing::info;
use uuid::Uuid;

use crate::auth::chain::ValidatorChain;
use crate::auth::rule::Rule;
use crate::auth::{gate, role};
use crate::directory::DirectoryService;
use crate::error::AppError;
use crate::models::delivery::{Delivery, DeliveryStatus, TrackedLocation};
use crate::models::event::StatusChange;
use crate::store::DeliveryStore;

fn fetch(store: &dyn DeliveryStore, id: Uuid) -> Result<Delivery, AppError> {
    store
        .find(id)
        .ok_or_else(|| AppError::NotFound(format!("delivery {id} not found")))
}

/// Apply a requested status to a delivery on behalf of a requester.
///
/// The requester's role is resolved from the directory, the requested status
/// is checked against that role's forbidden set, and the role's
/// existence/ownership chain must pass. Both checks failing the same way:
/// Unauthorized, with the delivery untouched.
pub fn apply_status(
    store: &dyn DeliveryStore,
    directory: &dyn DirectoryService,
    events: &broadcast::Sender<StatusChange>,
    delivery_id: Uuid,
    requester_id: Uuid,
    requested: DeliveryStatus,
) -> Result<Delivery, AppError> {
    let mut delivery = fetch(store, delivery_id)?;

    let role = role::resolve_role(directory, requester_id)?;

    if !gate::permits(role, requested) {
        return Err(AppError::Unauthorized(format!(
            "role {role:?} may not set status {requested:?}"
        )));
    }

    if !ValidatorChain::for_role(role).evaluate(directory, requester_id, &delivery)? {
        return Err(AppError::Unauthorized(format!(
            "requester {requester_id} failed the {role:?} checks for delivery {delivery_id}"
        )));
    }

    let previous = delivery.status;
    delivery.status = requested;
    delivery.updated_at = Utc::now();
    let saved = store.save(delivery);

    // Receiver lag or absence is not this operation's problem.
    let _ = events.send(StatusChange {
        delivery_id,
        order_id: saved.order_id,
        requester_id,
        role,
        previous,
        status: requested,
        changed_at: saved.updated_at,
    });

    info!(
        delivery_id = %delivery_id,
        requester_id = %requester_id,
        role = ?role,
        from = ?previous,
        to = ?requested,
        "delivery status changed"
    );

    Ok(saved)
}

/// Record the vendor's estimate for when preparation finishes. Only a
/// recognized vendor may do this, and only while the delivery is Accepted.
pub fn add_preparation_time(
    store: &dyn DeliveryStore,
    directory: &dyn DirectoryService,
    delivery_id: Uuid,
    vendor_id: Uuid,
    estimated_prep_finish_time: DateTime<Utc>,
) -> Result<Delivery, AppError> {
    let mut delivery = fetch(store, delivery_id)?;

    if directory.vendor(vendor_id)?.is_none() {
        return Err(AppError::Unauthorized(format!(
            "{vendor_id} is not a known vendor"
        )));
    }

    if delivery.status != DeliveryStatus::Accepted {
        return Err(AppError::Conflict(format!(
            "preparation time can only be set while the delivery is Accepted, not {:?}",
            delivery.status
        )));
    }

    delivery.estimated_prep_finish_time = Some(estimated_prep_finish_time);
    delivery.updated_at = Utc::now();
    Ok(store.save(delivery))
}

/// Record the assigned courier's delivery-time estimate, once the delivery
/// has actually left the vendor.
pub fn add_delivery_time(
    store: &dyn DeliveryStore,
    directory: &dyn DirectoryService,
    delivery_id: Uuid,
    courier_id: Uuid,
    estimated_delivery_time: DateTime<Utc>,
) -> Result<Delivery, AppError> {
    let mut delivery = fetch(store, delivery_id)?;

    let chain = ValidatorChain::new(vec![Rule::CourierExists, Rule::CourierBelongsToDelivery]);
    if !chain.evaluate(directory, courier_id, &delivery)? {
        return Err(AppError::Unauthorized(format!(
            "courier {courier_id} is not assigned to delivery {delivery_id}"
        )));
    }

    if !matches!(
        delivery.status,
        DeliveryStatus::GivenToCourier | DeliveryStatus::InTransit
    ) {
        return Err(AppError::Conflict(format!(
            "delivery time estimate requires GivenToCourier or InTransit, not {:?}",
            delivery.status
        )));
    }

    delivery.estimated_delivery_time = Some(estimated_delivery_time);
    delivery.updated_at = Utc::now();
    Ok(store.save(delivery))
}

/// Assign a courier to a delivery that does not have one yet. The courier
/// must exist and must be acceptable to the delivery's vendor.
pub fn assign_courier(
    store: &dyn DeliveryStore,
    directory: &dyn DirectoryService,
    delivery_id: Uuid,
    courier_id: Uuid,
) -> Result<Delivery, AppError> {
    let mut delivery = fetch(store, delivery_id)?;

    if delivery.courier_id.is_some() {
        return Err(AppError::Conflict(format!(
            "delivery {delivery_id} already has a courier"
        )));
    }

    let chain = ValidatorChain::new(vec![Rule::CourierExists, Rule::CourierBelongsToVendor]);
    if !chain.evaluate(directory, courier_id, &delivery)? {
        return Err(AppError::Unauthorized(format!(
            "courier {courier_id} may not take delivery {delivery_id}"
        )));
    }

    delivery.courier_id = Some(courier_id);
    delivery.updated_at = Utc::now();

    info!(delivery_id = %delivery_id, courier_id = %courier_id, "courier assigned");
    Ok(store.save(delivery))
}

/// Update the tracked position of a delivery; only its assigned courier may.
pub fn update_location(
    store: &dyn DeliveryStore,
    directory: &dyn DirectoryService,
    delivery_id: Uuid,
    courier_id: Uuid,
    lat: f64,
    lng: f64,
) -> Result<Delivery, AppError> {
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
        return Err(AppError::BadRequest(format!(
            "coordinates ({lat}, {lng}) are out of range"
        )));
    }

    let mut delivery = fetch(store, delivery_id)?;

    let chain = ValidatorChain::new(vec![Rule::CourierExists, Rule::CourierBelongsToDelivery]);
    if !chain.evaluate(directory, courier_id, &delivery)? {
        return Err(AppError::Unauthorized(format!(
            "courier {courier_id} is not assigned to delivery {delivery_id}"
        )));
    }

    delivery.current_location = Some(TrackedLocation {
        lat,
        lng,
        recorded_at: Utc::now(),
    });
    delivery.updated_at = Utc::now();
    Ok(store.save(delivery))
}
