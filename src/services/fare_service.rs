// src/services/fare_service.rs
use std::sync::Arc;
use tracing;

use crate::{
    errors::DispatchResult,
    models::fare::{FareEstimateRequest, FareEstimateResponse, FareQuote, FareTariff},
    models::driver::VehicleType,
    services::{geo, validate_coordinates},
    store::MemoryStore,
};

pub struct FareService {
    store: Arc<MemoryStore>,
}

impl FareService {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }

    /// Insert the default tariff rows for any vehicle type that has none.
    /// Called once at startup.
    pub async fn seed_default_tariffs(&self) {
        let mut store = self.store.write().await;
        for vehicle_type in VehicleType::ALL {
            store
                .tariffs
                .entry(vehicle_type)
                .or_insert_with(|| FareTariff::default_for(vehicle_type));
        }
        tracing::info!("Fare tariffs initialized");
    }

    /// Quote a fare for one vehicle type. Never fails: a missing tariff
    /// row falls back to the hardcoded defaults.
    pub async fn quote(&self, vehicle_type: VehicleType, distance_km: f64) -> FareQuote {
        let tariff = self.tariff_for(vehicle_type).await;
        quote_with_tariff(&tariff, distance_km)
    }

    /// Quotes for every vehicle type, for estimates without a chosen type.
    pub async fn quote_all(&self, distance_km: f64) -> Vec<FareQuote> {
        let mut quotes = Vec::with_capacity(VehicleType::ALL.len());
        for vehicle_type in VehicleType::ALL {
            quotes.push(self.quote(vehicle_type, distance_km).await);
        }
        quotes
    }

    /// Full fare estimate between two points: distance, ETA and quotes
    /// for either the requested vehicle type or all of them.
    pub async fn estimate(&self, request: FareEstimateRequest) -> DispatchResult<FareEstimateResponse> {
        validate_coordinates("pickup", request.pickup_latitude, request.pickup_longitude)?;
        validate_coordinates("drop", request.drop_latitude, request.drop_longitude)?;

        let distance_km = geo::distance_km(
            request.pickup_latitude,
            request.pickup_longitude,
            request.drop_latitude,
            request.drop_longitude,
        );
        let estimated_duration_mins = geo::eta_minutes(distance_km);

        let fares = match request.vehicle_type {
            Some(vehicle_type) => vec![self.quote(vehicle_type, distance_km).await],
            None => self.quote_all(distance_km).await,
        };

        Ok(FareEstimateResponse {
            distance_km,
            estimated_duration_mins,
            fares,
        })
    }

    async fn tariff_for(&self, vehicle_type: VehicleType) -> FareTariff {
        let store = self.store.read().await;
        store
            .tariffs
            .get(&vehicle_type)
            .copied()
            .unwrap_or_else(|| FareTariff::default_for(vehicle_type))
    }
}

fn quote_with_tariff(tariff: &FareTariff, distance_km: f64) -> FareQuote {
    let distance_charge = tariff.per_km_rate * distance_km;
    let mut total = tariff.base_fare + distance_charge;

    // Minimum fare floor
    if total < tariff.min_fare {
        total = tariff.min_fare;
    }

    FareQuote {
        vehicle_type: tariff.vehicle_type,
        total: geo::round2(total),
        base_fare: tariff.base_fare,
        distance_charge: geo::round2(distance_charge),
    }
}
