// src/handlers/payment_handler.rs
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;

use crate::{
    errors::DispatchError,
    services::payment_service::PaymentReceipt,
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct ChargeRequest {
    pub rider_id: String,
}

/// Charge the rider for a completed ride. Only the rider on the ride may
/// trigger the charge.
pub async fn charge_ride(
    State(state): State<Arc<AppState>>,
    Path(ride_id): Path<String>,
    Json(request): Json<ChargeRequest>,
) -> Result<Json<PaymentReceipt>, DispatchError> {
    let ride = {
        let store = state.store.read().await;
        store
            .rides
            .get(&ride_id)
            .ok_or_else(|| DispatchError::ride_not_found(&ride_id))?
            .clone()
    };

    if ride.rider_id != request.rider_id {
        return Err(DispatchError::forbidden("You can only pay for your own rides"));
    }

    let receipt = state.payment_gateway.charge(&ride).await?;
    Ok(Json(receipt))
}
