// src/handlers/ride_handler.rs
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::{
    errors::DispatchError,
    models::ride::{
        CancelRideRequest, RateRideRequest, RideActionRequest, RideRequest, RideResponse,
    },
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct RequesterQuery {
    pub requester_id: String,
}

pub async fn request_ride(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RideRequest>,
) -> Result<Json<RideResponse>, DispatchError> {
    let ride = state.ride_service.request_ride(request).await?;
    Ok(Json(ride))
}

pub async fn get_ride(
    State(state): State<Arc<AppState>>,
    Path(ride_id): Path<String>,
    Query(query): Query<RequesterQuery>,
) -> Result<Json<RideResponse>, DispatchError> {
    let ride = state.ride_service.get_ride(&ride_id, &query.requester_id).await?;
    Ok(Json(ride))
}

pub async fn accept_ride(
    State(state): State<Arc<AppState>>,
    Path(ride_id): Path<String>,
    Json(action): Json<RideActionRequest>,
) -> Result<Json<RideResponse>, DispatchError> {
    let ride = state.ride_service.accept_ride(&action.driver_id, &ride_id).await?;
    Ok(Json(ride))
}

pub async fn driver_arrived(
    State(state): State<Arc<AppState>>,
    Path(ride_id): Path<String>,
    Json(action): Json<RideActionRequest>,
) -> Result<Json<RideResponse>, DispatchError> {
    let ride = state.ride_service.arrive(&action.driver_id, &ride_id).await?;
    Ok(Json(ride))
}

pub async fn start_ride(
    State(state): State<Arc<AppState>>,
    Path(ride_id): Path<String>,
    Json(action): Json<RideActionRequest>,
) -> Result<Json<RideResponse>, DispatchError> {
    let ride = state.ride_service.start(&action.driver_id, &ride_id).await?;
    Ok(Json(ride))
}

pub async fn complete_ride(
    State(state): State<Arc<AppState>>,
    Path(ride_id): Path<String>,
    Json(action): Json<RideActionRequest>,
) -> Result<Json<RideResponse>, DispatchError> {
    let ride = state.ride_service.complete(&action.driver_id, &ride_id).await?;
    Ok(Json(ride))
}

pub async fn cancel_ride(
    State(state): State<Arc<AppState>>,
    Path(ride_id): Path<String>,
    Json(request): Json<CancelRideRequest>,
) -> Result<Json<RideResponse>, DispatchError> {
    let ride = state.ride_service.cancel(&ride_id, request).await?;
    Ok(Json(ride))
}

pub async fn rate_ride(
    State(state): State<Arc<AppState>>,
    Path(ride_id): Path<String>,
    Json(request): Json<RateRideRequest>,
) -> Result<Json<RideResponse>, DispatchError> {
    let ride = state.ride_service.rate(&ride_id, request).await?;
    Ok(Json(ride))
}

pub async fn active_ride_for_rider(
    State(state): State<Arc<AppState>>,
    Path(rider_id): Path<String>,
) -> Result<Json<Option<RideResponse>>, DispatchError> {
    Ok(Json(state.ride_service.active_ride_for_rider(&rider_id).await))
}

pub async fn active_ride_for_driver(
    State(state): State<Arc<AppState>>,
    Path(driver_id): Path<String>,
) -> Result<Json<Option<RideResponse>>, DispatchError> {
    Ok(Json(state.ride_service.active_ride_for_driver(&driver_id).await))
}

pub async fn rider_history(
    State(state): State<Arc<AppState>>,
    Path(rider_id): Path<String>,
) -> Result<Json<Vec<RideResponse>>, DispatchError> {
    Ok(Json(state.ride_service.rider_history(&rider_id).await))
}

pub async fn driver_history(
    State(state): State<Arc<AppState>>,
    Path(driver_id): Path<String>,
) -> Result<Json<Vec<RideResponse>>, DispatchError> {
    Ok(Json(state.ride_service.driver_history(&driver_id).await))
}
