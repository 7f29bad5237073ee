// src/services/geo.rs
//! Pure geographic math. No state, no failure modes; callers validate
//! coordinates before reaching these functions.

const EARTH_RADIUS_KM: f64 = 6371.0;
const AVERAGE_SPEED_KMH: f64 = 25.0; // Average city speed
const ROAD_FACTOR: f64 = 1.2; // Straight line vs actual road distance
const MIN_ETA_MINS: u32 = 5;

/// Round half-up to two decimal places. Shared by distances and money.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Great-circle distance between two points (Haversine), in kilometers.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Travel distance estimate in kilometers: great-circle distance with a
/// 20% buffer for road indirection, rounded to two decimals.
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    round2(haversine_km(lat1, lon1, lat2, lon2) * ROAD_FACTOR)
}

/// Trip duration estimate in minutes at city speed, never below 5.
pub fn eta_minutes(distance_km: f64) -> u32 {
    let minutes = (distance_km / AVERAGE_SPEED_KMH * 60.0).ceil() as u32;
    minutes.max(MIN_ETA_MINS)
}
