// src/models/ride.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::driver::VehicleType;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RideStatus {
    Requested, // Waiting for a driver to accept
    Matched,   // Driver assigned, heading to pickup
    Arrived,   // Driver at the pickup point
    Started,   // Ride in progress
    Completed,
    Cancelled,
}

impl RideStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RideStatus::Completed | RideStatus::Cancelled)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RideStatus::Requested => "REQUESTED",
            RideStatus::Matched => "MATCHED",
            RideStatus::Arrived => "ARRIVED",
            RideStatus::Started => "STARTED",
            RideStatus::Completed => "COMPLETED",
            RideStatus::Cancelled => "CANCELLED",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CancelledBy {
    Rider,
    Driver,
}

/// A pickup or drop point as supplied by the rider.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RidePoint {
    pub latitude: f64,
    pub longitude: f64,
    pub address: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Ride {
    pub id: String,
    pub rider_id: String,
    pub driver_id: Option<String>, // Set when the ride is matched
    pub pickup: RidePoint,
    pub drop_off: RidePoint,
    pub vehicle_type: VehicleType,
    pub status: RideStatus,
    pub distance_km: f64, // Computed once at request time
    pub estimated_duration_mins: u32,
    pub estimated_fare: f64,
    pub final_fare: Option<f64>, // Set on completion only
    pub requested_at: DateTime<Utc>,
    pub matched_at: Option<DateTime<Utc>>,
    pub arrived_at: Option<DateTime<Utc>>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub cancelled_by: Option<CancelledBy>,
    pub cancel_reason: Option<String>,
    pub rating: Option<f64>, // 1.0-5.0, rider rates driver once
    pub rating_comment: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl Ride {
    // State machine guards. Every transition goes through one of these.
    pub fn can_be_accepted(&self) -> bool {
        self.status == RideStatus::Requested
    }

    pub fn can_arrive(&self) -> bool {
        self.status == RideStatus::Matched
    }

    pub fn can_start(&self) -> bool {
        self.status == RideStatus::Arrived
    }

    pub fn can_complete(&self) -> bool {
        self.status == RideStatus::Started
    }

    pub fn can_be_cancelled(&self) -> bool {
        matches!(
            self.status,
            RideStatus::Requested | RideStatus::Matched | RideStatus::Arrived
        )
    }

    pub fn can_be_rated(&self) -> bool {
        self.status == RideStatus::Completed && self.rating.is_none()
    }

    pub fn is_active(&self) -> bool {
        !self.status.is_terminal()
    }

    pub fn is_assigned_to(&self, driver_id: &str) -> bool {
        self.driver_id.as_deref() == Some(driver_id)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RideRequest {
    pub rider_id: String,
    pub pickup: RidePoint,
    pub drop_off: RidePoint,
    pub vehicle_type: VehicleType,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RideActionRequest {
    pub driver_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CancelRideRequest {
    pub actor_role: CancelledBy,
    pub actor_id: String,
    pub reason: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RateRideRequest {
    pub rider_id: String,
    pub rating: f64,
    pub comment: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RideResponse {
    pub id: String,
    pub rider_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rider_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver_name: Option<String>,
    pub pickup: RidePoint,
    pub drop_off: RidePoint,
    pub vehicle_type: VehicleType,
    pub status: RideStatus,
    pub distance_km: f64,
    pub estimated_duration_mins: u32,
    pub estimated_fare: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_fare: Option<f64>,
    pub requested_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrived_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancelled_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancelled_by: Option<CancelledBy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancel_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating_comment: Option<String>,
}

impl RideResponse {
    pub fn from_ride(ride: &Ride) -> Self {
        Self {
            id: ride.id.clone(),
            rider_id: ride.rider_id.clone(),
            rider_name: None,
            driver_id: ride.driver_id.clone(),
            driver_name: None,
            pickup: ride.pickup.clone(),
            drop_off: ride.drop_off.clone(),
            vehicle_type: ride.vehicle_type,
            status: ride.status,
            distance_km: ride.distance_km,
            estimated_duration_mins: ride.estimated_duration_mins,
            estimated_fare: ride.estimated_fare,
            final_fare: ride.final_fare,
            requested_at: ride.requested_at,
            matched_at: ride.matched_at,
            arrived_at: ride.arrived_at,
            started_at: ride.started_at,
            completed_at: ride.completed_at,
            cancelled_at: ride.cancelled_at,
            cancelled_by: ride.cancelled_by,
            cancel_reason: ride.cancel_reason.clone(),
            rating: ride.rating,
            rating_comment: ride.rating_comment.clone(),
        }
    }
}
