// src/services/notification_service.rs
use async_trait::async_trait;
use thiserror::Error;
use tracing;

use crate::models::{driver::Driver, ride::Ride};

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("delivery failed: {0}")]
    Delivery(String),

    #[error("no contact channel for recipient {0}")]
    NoChannel(String),
}

/// Outbound lifecycle events. Implementations deliver however they like
/// (push, email, websocket); the dispatch core fires these after a
/// transition commits and never waits on the outcome. A failure here is
/// logged by the caller and must not surface to the transition.
#[async_trait]
pub trait NotificationService: Send + Sync {
    async fn ride_matched(&self, ride: &Ride) -> Result<(), NotificationError>;
    async fn driver_arrived(&self, ride: &Ride) -> Result<(), NotificationError>;
    async fn ride_started(&self, ride: &Ride) -> Result<(), NotificationError>;
    async fn ride_completed(&self, ride: &Ride) -> Result<(), NotificationError>;
    async fn ride_cancelled(&self, ride: &Ride, cancelled_by: &str) -> Result<(), NotificationError>;
    async fn driver_approved(&self, driver: &Driver) -> Result<(), NotificationError>;
    async fn driver_rejected(&self, driver: &Driver) -> Result<(), NotificationError>;
}

/// Default implementation: writes every event to the log. Stands in for
/// a real delivery channel in development and in tests.
#[derive(Debug, Default)]
pub struct LogNotificationService;

#[async_trait]
impl NotificationService for LogNotificationService {
    async fn ride_matched(&self, ride: &Ride) -> Result<(), NotificationError> {
        tracing::info!(
            "[notify] ride {} matched with driver {:?} for rider {}",
            ride.id,
            ride.driver_id,
            ride.rider_id
        );
        Ok(())
    }

    async fn driver_arrived(&self, ride: &Ride) -> Result<(), NotificationError> {
        tracing::info!("[notify] driver arrived at pickup for ride {}", ride.id);
        Ok(())
    }

    async fn ride_started(&self, ride: &Ride) -> Result<(), NotificationError> {
        tracing::info!("[notify] ride {} started", ride.id);
        Ok(())
    }

    async fn ride_completed(&self, ride: &Ride) -> Result<(), NotificationError> {
        tracing::info!(
            "[notify] ride {} completed, fare {:?}",
            ride.id,
            ride.final_fare
        );
        Ok(())
    }

    async fn ride_cancelled(&self, ride: &Ride, cancelled_by: &str) -> Result<(), NotificationError> {
        tracing::info!("[notify] ride {} cancelled by {}", ride.id, cancelled_by);
        Ok(())
    }

    async fn driver_approved(&self, driver: &Driver) -> Result<(), NotificationError> {
        tracing::info!("[notify] driver {} approved", driver.id);
        Ok(())
    }

    async fn driver_rejected(&self, driver: &Driver) -> Result<(), NotificationError> {
        tracing::info!(
            "[notify] driver {} rejected: {:?}",
            driver.id,
            driver.rejection_reason
        );
        Ok(())
    }
}
