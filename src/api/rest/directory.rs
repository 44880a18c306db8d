use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::Json;
use axum::Router;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::directory::{AdminInfo, Courier, Vendor, ADMIN_ROLE};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/vendors", post(create_vendor).get(list_vendors))
        .route("/couriers", post(create_courier).get(list_couriers))
        .route("/admins", post(create_admin))
}

#[derive(Deserialize)]
pub struct CreateVendorRequest {
    pub name: String,
    #[serde(default)]
    pub allows_only_own_couriers: bool,
}

#[derive(Deserialize)]
pub struct CreateCourierRequest {
    pub name: String,
    #[serde(default)]
    pub home_vendor: Option<Uuid>,
}

#[derive(Deserialize)]
pub struct CreateAdminRequest {
    pub role: Option<String>,
}

async fn create_vendor(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateVendorRequest>,
) -> Result<Json<Vendor>, AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError::BadRequest("name cannot be empty".to_string()));
    }

    let vendor = Vendor {
        id: Uuid::new_v4(),
        name: payload.name,
        allows_only_own_couriers: payload.allows_only_own_couriers,
    };

    state.directory.vendors.insert(vendor.id, vendor.clone());
    Ok(Json(vendor))
}

async fn list_vendors(State(state): State<Arc<AppState>>) -> Json<Vec<Vendor>> {
    let vendors = state
        .directory
        .vendors
        .iter()
        .map(|entry| entry.value().clone())
        .collect();
    Json(vendors)
}

async fn create_courier(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateCourierRequest>,
) -> Result<Json<Courier>, AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError::BadRequest("name cannot be empty".to_string()));
    }

    if let Some(home_vendor) = payload.home_vendor {
        if !state.directory.vendors.contains_key(&home_vendor) {
            return Err(AppError::BadRequest(format!(
                "home vendor {home_vendor} is not registered"
            )));
        }
    }

    let courier = Courier {
        id: Uuid::new_v4(),
        name: payload.name,
        home_vendor: payload.home_vendor,
    };

    state.directory.couriers.insert(courier.id, courier.clone());
    Ok(Json(courier))
}

async fn list_couriers(State(state): State<Arc<AppState>>) -> Json<Vec<Courier>> {
    let couriers = state
        .directory
        .couriers
        .iter()
        .map(|entry| entry.value().clone())
        .collect();
    Json(couriers)
}

async fn create_admin(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateAdminRequest>,
) -> Json<AdminInfo> {
    let admin = AdminInfo {
        id: Uuid::new_v4(),
        role: payload.role.unwrap_or_else(|| ADMIN_ROLE.to_string()),
    };

    state.directory.admins.insert(admin.id, admin.clone());
    Json(admin)
}
