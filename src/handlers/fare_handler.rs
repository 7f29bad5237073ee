// src/handlers/fare_handler.rs
use std::sync::Arc;

use axum::{extract::State, Json};

use crate::{
    errors::DispatchError,
    models::fare::{FareEstimateRequest, FareEstimateResponse},
    state::AppState,
};

pub async fn estimate_fare(
    State(state): State<Arc<AppState>>,
    Json(request): Json<FareEstimateRequest>,
) -> Result<Json<FareEstimateResponse>, DispatchError> {
    let estimate = state.fare_service.estimate(request).await?;
    Ok(Json(estimate))
}
