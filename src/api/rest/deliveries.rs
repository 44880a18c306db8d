use std::sync::Arc;
use std::time::Instant;

use axum::extract::{Path, State};
use axum::routing::{get, post, put};
use axum::Json;
use axum::Router;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::lifecycle;
use crate::models::delivery::{Delivery, DeliveryStatus};
use crate::state::AppState;
use crate::store::DeliveryStore;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/deliveries", post(create_delivery).get(list_deliveries))
        .route("/deliveries/:id", get(get_delivery))
        .route("/deliveries/:id/status", put(change_status))
        .route("/deliveries/:id/prep-time", put(set_prep_time))
        .route("/deliveries/:id/delivery-time", put(set_delivery_time))
        .route("/deliveries/:id/courier", put(assign_courier))
        .route("/deliveries/:id/location", put(update_location))
}

#[derive(Deserialize)]
pub struct CreateDeliveryRequest {
    pub order_id: Uuid,
    pub vendor_id: Uuid,
}

#[derive(Deserialize)]
pub struct ChangeStatusRequest {
    pub requester_id: Uuid,
    pub status: DeliveryStatus,
}

#[derive(Deserialize)]
pub struct PrepTimeRequest {
    pub vendor_id: Uuid,
    pub estimated_prep_finish_time: DateTime<Utc>,
}

#[derive(Deserialize)]
pub struct DeliveryTimeRequest {
    pub courier_id: Uuid,
    pub estimated_delivery_time: DateTime<Utc>,
}

#[derive(Deserialize)]
pub struct AssignCourierRequest {
    pub courier_id: Uuid,
}

#[derive(Deserialize)]
pub struct LocationRequest {
    pub courier_id: Uuid,
    pub lat: f64,
    pub lng: f64,
}

async fn create_delivery(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateDeliveryRequest>,
) -> Result<Json<Delivery>, AppError> {
    if !state.directory.vendors.contains_key(&payload.vendor_id) {
        return Err(AppError::BadRequest(format!(
            "vendor {} is not registered",
            payload.vendor_id
        )));
    }

    let delivery = state
        .deliveries
        .save(Delivery::new(payload.order_id, payload.vendor_id));
    state
        .metrics
        .active_deliveries
        .set(state.deliveries.len() as i64);

    Ok(Json(delivery))
}

async fn list_deliveries(State(state): State<Arc<AppState>>) -> Json<Vec<Delivery>> {
    Json(state.deliveries.all())
}

async fn get_delivery(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Delivery>, AppError> {
    let delivery = state
        .deliveries
        .find(id)
        .ok_or_else(|| AppError::NotFound(format!("delivery {id} not found")))?;

    Ok(Json(delivery))
}

async fn change_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ChangeStatusRequest>,
) -> Result<Json<Delivery>, AppError> {
    let start = Instant::now();
    let result = lifecycle::apply_status(
        &state.deliveries,
        &state.directory,
        &state.status_events_tx,
        id,
        payload.requester_id,
        payload.status,
    );

    let outcome = match &result {
        Ok(_) => "success",
        Err(err) => err.kind(),
    };
    state
        .metrics
        .status_change_latency_seconds
        .with_label_values(&[outcome])
        .observe(start.elapsed().as_secs_f64());
    state
        .metrics
        .status_changes_total
        .with_label_values(&[outcome])
        .inc();

    result.map(Json)
}

async fn set_prep_time(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<PrepTimeRequest>,
) -> Result<Json<Delivery>, AppError> {
    lifecycle::add_preparation_time(
        &state.deliveries,
        &state.directory,
        id,
        payload.vendor_id,
        payload.estimated_prep_finish_time,
    )
    .map(Json)
}

async fn set_delivery_time(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<DeliveryTimeRequest>,
) -> Result<Json<Delivery>, AppError> {
    lifecycle::add_delivery_time(
        &state.deliveries,
        &state.directory,
        id,
        payload.courier_id,
        payload.estimated_delivery_time,
    )
    .map(Json)
}

async fn assign_courier(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AssignCourierRequest>,
) -> Result<Json<Delivery>, AppError> {
    lifecycle::assign_courier(&state.deliveries, &state.directory, id, payload.courier_id)
        .map(Json)
}

async fn update_location(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<LocationRequest>,
) -> Result<Json<Delivery>, AppError> {
    lifecycle::update_location(
        &state.deliveries,
        &state.directory,
        id,
        payload.courier_id,
        payload.lat,
        payload.lng,
    )
    .map(Json)
}
