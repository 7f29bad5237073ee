// src/handlers/driver_handler.rs
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::{
    errors::DispatchError,
    models::driver::{
        AvailabilityUpdateRequest, DriverRegistration, DriverResponse, LocationUpdateRequest,
        NearbyDriversQuery,
    },
    state::AppState,
};

pub async fn register_driver(
    State(state): State<Arc<AppState>>,
    Json(registration): Json<DriverRegistration>,
) -> Result<Json<DriverResponse>, DispatchError> {
    let driver = state.driver_service.register(registration).await?;
    Ok(Json(driver))
}

pub async fn get_driver(
    State(state): State<Arc<AppState>>,
    Path(driver_id): Path<String>,
) -> Result<Json<DriverResponse>, DispatchError> {
    let driver = state.driver_service.get(&driver_id).await?;
    Ok(Json(driver))
}

pub async fn update_location(
    State(state): State<Arc<AppState>>,
    Path(driver_id): Path<String>,
    Json(update): Json<LocationUpdateRequest>,
) -> Result<Json<DriverResponse>, DispatchError> {
    let driver = state
        .driver_service
        .update_location(&driver_id, update.latitude, update.longitude)
        .await?;
    Ok(Json(driver))
}

pub async fn update_availability(
    State(state): State<Arc<AppState>>,
    Path(driver_id): Path<String>,
    Json(update): Json<AvailabilityUpdateRequest>,
) -> Result<Json<DriverResponse>, DispatchError> {
    let driver = state
        .driver_service
        .set_availability(&driver_id, update.available)
        .await?;
    Ok(Json(driver))
}

pub async fn find_nearby_drivers(
    State(state): State<Arc<AppState>>,
    Query(query): Query<NearbyDriversQuery>,
) -> Result<Json<Vec<DriverResponse>>, DispatchError> {
    let drivers = state.driver_service.find_nearby(query).await?;
    Ok(Json(drivers))
}
