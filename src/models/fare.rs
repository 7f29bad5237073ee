// src/models/fare.rs
use serde::{Deserialize, Serialize};

use crate::models::driver::VehicleType;

/// Active pricing row for one vehicle type. Seeded at startup and
/// immutable afterwards; tariff editing is not part of this service.
#[derive(Debug, Serialize, Deserialize, Clone, Copy)]
pub struct FareTariff {
    pub vehicle_type: VehicleType,
    pub base_fare: f64,
    pub per_km_rate: f64,
    pub per_minute_rate: f64,
    pub min_fare: f64,
}

impl FareTariff {
    /// Hardcoded fallback so a quote can always be produced, even if a
    /// tariff row went missing.
    pub fn default_for(vehicle_type: VehicleType) -> Self {
        let (base_fare, per_km_rate, per_minute_rate, min_fare) = match vehicle_type {
            VehicleType::Auto => (25.0, 12.0, 1.0, 30.0),
            VehicleType::Bike => (15.0, 8.0, 0.5, 20.0),
            VehicleType::Sedan => (50.0, 15.0, 2.0, 80.0),
            VehicleType::Suv => (80.0, 20.0, 3.0, 120.0),
        };
        Self {
            vehicle_type,
            base_fare,
            per_km_rate,
            per_minute_rate,
            min_fare,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy)]
pub struct FareQuote {
    pub vehicle_type: VehicleType,
    pub total: f64,
    pub base_fare: f64,
    pub distance_charge: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FareEstimateRequest {
    pub pickup_latitude: f64,
    pub pickup_longitude: f64,
    pub drop_latitude: f64,
    pub drop_longitude: f64,
    pub vehicle_type: Option<VehicleType>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FareEstimateResponse {
    pub distance_km: f64,
    pub estimated_duration_mins: u32,
    pub fares: Vec<FareQuote>,
}
