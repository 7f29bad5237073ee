// src/services/payment_service.rs
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing;

use crate::{
    errors::{DispatchError, DispatchResult},
    models::ride::{Ride, RideStatus},
    utils::id_generator::{IdGenerator, IdType},
};

#[derive(Debug, Serialize, Deserialize)]
pub struct PaymentReceipt {
    pub receipt_id: String,
    pub ride_id: String,
    pub rider_id: String,
    pub amount: f64,
    pub charged_at: DateTime<Utc>,
}

/// Charges the rider for a completed ride. Invoked by the caller after
/// completion, never by the lifecycle itself; gateway protocol details
/// are out of scope here.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn charge(&self, ride: &Ride) -> DispatchResult<PaymentReceipt>;
}

/// Default implementation: validates the ride and logs the charge.
#[derive(Debug, Default)]
pub struct LogPaymentGateway;

#[async_trait]
impl PaymentGateway for LogPaymentGateway {
    async fn charge(&self, ride: &Ride) -> DispatchResult<PaymentReceipt> {
        if ride.status != RideStatus::Completed {
            return Err(DispatchError::invalid_transition(ride.status.as_str(), "charge"));
        }

        let amount = ride
            .final_fare
            .ok_or_else(|| DispatchError::internal_error("completed ride has no final fare"))?;

        let receipt = PaymentReceipt {
            receipt_id: IdGenerator::generate(IdType::Payment),
            ride_id: ride.id.clone(),
            rider_id: ride.rider_id.clone(),
            amount,
            charged_at: Utc::now(),
        };

        tracing::info!(
            "[payment] charged rider {} amount {} for ride {}",
            receipt.rider_id,
            receipt.amount,
            receipt.ride_id
        );

        Ok(receipt)
    }
}
