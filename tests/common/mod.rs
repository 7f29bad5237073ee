// tests/common/mod.rs
use std::sync::Arc;

use swift_dispatch::{
    models::driver::{DriverRegistration, VehicleType},
    models::ride::{RidePoint, RideRequest, RideResponse},
    state::{AppConfig, AppState},
};

pub async fn app() -> Arc<AppState> {
    let config = AppConfig {
        bind_addr: "127.0.0.1:0".to_string(),
    };
    Arc::new(AppState::new(config).await)
}

/// Register a driver, approve them, place them at the given position and
/// bring them online. Returns the driver id.
pub async fn online_driver(
    state: &AppState,
    person_id: &str,
    vehicle_type: VehicleType,
    latitude: f64,
    longitude: f64,
) -> String {
    let driver = state
        .driver_service
        .register(DriverRegistration {
            person_id: person_id.to_string(),
            full_name: format!("Driver {}", person_id),
            phone_number: "+919800000000".to_string(),
            license_number: format!("KA-{}-LIC", person_id),
            vehicle_number: format!("KA01-{}", person_id),
            vehicle_type,
        })
        .await
        .unwrap();

    state.driver_service.approve(&driver.id).await.unwrap();
    state
        .driver_service
        .update_location(&driver.id, latitude, longitude)
        .await
        .unwrap();
    state
        .driver_service
        .set_availability(&driver.id, true)
        .await
        .unwrap();

    driver.id
}

pub fn point(latitude: f64, longitude: f64) -> RidePoint {
    RidePoint {
        latitude,
        longitude,
        address: None,
    }
}

/// A short city trip used by most scenarios.
pub async fn request_city_ride(
    state: &AppState,
    rider_id: &str,
    vehicle_type: VehicleType,
) -> RideResponse {
    state
        .ride_service
        .request_ride(RideRequest {
            rider_id: rider_id.to_string(),
            pickup: point(12.90, 77.59),
            drop_off: point(12.95, 77.65),
            vehicle_type,
        })
        .await
        .unwrap()
}
