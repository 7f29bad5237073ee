// src/services/mod.rs
pub mod driver_service;
pub mod fare_service;
pub mod geo;
pub mod notification_service;
pub mod payment_service;
pub mod person_service;
pub mod rating;
pub mod ride_service;

use crate::errors::{DispatchError, DispatchResult};

/// Coordinate range check shared by every entry point that accepts
/// lat/lon input. `prefix` names the field pair in validation output
/// ("pickup" gives pickup_latitude / pickup_longitude).
pub fn validate_coordinates(prefix: &str, latitude: f64, longitude: f64) -> DispatchResult<()> {
    let field = |name: &str| {
        if prefix.is_empty() {
            name.to_string()
        } else {
            format!("{}_{}", prefix, name)
        }
    };

    if !(-90.0..=90.0).contains(&latitude) {
        return Err(DispatchError::validation_error(
            field("latitude"),
            "Latitude must be between -90 and 90",
        ));
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(DispatchError::validation_error(
            field("longitude"),
            "Longitude must be between -180 and 180",
        ));
    }
    Ok(())
}
