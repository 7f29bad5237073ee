// src/handlers/admin_handler.rs
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    errors::DispatchError,
    models::driver::{DriverActionRequest, DriverResponse},
    state::AppState,
};

pub async fn pending_drivers(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<DriverResponse>>, DispatchError> {
    Ok(Json(state.driver_service.pending().await))
}

pub async fn approve_driver(
    State(state): State<Arc<AppState>>,
    Path(driver_id): Path<String>,
) -> Result<Json<DriverResponse>, DispatchError> {
    let driver = state.driver_service.approve(&driver_id).await?;
    Ok(Json(driver))
}

pub async fn reject_driver(
    State(state): State<Arc<AppState>>,
    Path(driver_id): Path<String>,
    Json(action): Json<DriverActionRequest>,
) -> Result<Json<DriverResponse>, DispatchError> {
    let driver = state.driver_service.reject(&driver_id, action.reason).await?;
    Ok(Json(driver))
}
