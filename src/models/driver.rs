// src/models/driver.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VehicleType {
    Auto,
    Bike,
    Sedan,
    Suv,
}

impl VehicleType {
    pub const ALL: [VehicleType; 4] = [
        VehicleType::Auto,
        VehicleType::Bike,
        VehicleType::Sedan,
        VehicleType::Suv,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleType::Auto => "AUTO",
            VehicleType::Bike => "BIKE",
            VehicleType::Sedan => "SEDAN",
            VehicleType::Suv => "SUV",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
}

/// Last reported driver position. Written as a unit so a reader can
/// never observe a latitude without its longitude.
#[derive(Debug, Serialize, Deserialize, Clone, Copy)]
pub struct DriverLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Driver {
    pub id: String,
    pub person_id: String, // Reference to the person account, 1:1
    pub license_number: String,
    pub vehicle_number: String,
    pub vehicle_type: VehicleType,
    pub current_location: Option<DriverLocation>,
    pub available: bool,
    pub approval_status: ApprovalStatus,
    pub rejection_reason: Option<String>,
    pub rating: f64,      // Running average, 0 until first rating
    pub total_rides: u32, // Completed rides
    pub total_earnings: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Driver {
    pub fn is_approved(&self) -> bool {
        self.approval_status == ApprovalStatus::Approved
    }

    /// Eligible to be reserved for a ride right now.
    pub fn is_reservable(&self) -> bool {
        self.is_approved() && self.available && self.current_location.is_some()
    }

    pub fn add_earnings(&mut self, amount: f64) {
        self.total_earnings += amount;
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DriverRegistration {
    pub person_id: String,
    pub full_name: String,
    pub phone_number: String,
    pub license_number: String,
    pub vehicle_number: String,
    pub vehicle_type: VehicleType,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LocationUpdateRequest {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AvailabilityUpdateRequest {
    pub available: bool,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct DriverActionRequest {
    pub reason: Option<String>,
}

fn default_radius_km() -> f64 {
    5.0
}

fn default_limit() -> usize {
    10
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NearbyDriversQuery {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default = "default_radius_km")]
    pub radius_km: f64,
    #[serde(default = "default_limit")]
    pub limit: usize,
    pub vehicle_type: Option<VehicleType>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DriverResponse {
    pub id: String,
    pub person_id: String,
    pub vehicle_type: VehicleType,
    pub license_number: String,
    pub vehicle_number: String,
    pub available: bool,
    pub approval_status: ApprovalStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    pub rating: f64,
    pub total_rides: u32,
    pub total_earnings: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_location: Option<DriverLocation>,
    /// Distance from the query point, only set on nearby-search results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
}

impl DriverResponse {
    pub fn from_driver(driver: &Driver) -> Self {
        Self {
            id: driver.id.clone(),
            person_id: driver.person_id.clone(),
            vehicle_type: driver.vehicle_type,
            license_number: driver.license_number.clone(),
            vehicle_number: driver.vehicle_number.clone(),
            available: driver.available,
            approval_status: driver.approval_status,
            rejection_reason: driver.rejection_reason.clone(),
            rating: driver.rating,
            total_rides: driver.total_rides,
            total_earnings: driver.total_earnings,
            current_location: driver.current_location,
            distance_km: None,
        }
    }

    pub fn with_distance(mut self, distance_km: f64) -> Self {
        self.distance_km = Some(distance_km);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn driver() -> Driver {
        let now = Utc::now();
        Driver {
            id: "drv-250101-a1b2c".to_string(),
            person_id: "usr-250101-d3e4f".to_string(),
            license_number: "KA05-AB-1234".to_string(),
            vehicle_number: "KA01AB9999".to_string(),
            vehicle_type: VehicleType::Sedan,
            current_location: None,
            available: false,
            approval_status: ApprovalStatus::Pending,
            rejection_reason: None,
            rating: 0.0,
            total_rides: 0,
            total_earnings: 0.0,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_reservable_needs_approval_availability_and_location() {
        let mut driver = driver();
        assert!(!driver.is_reservable());

        driver.approval_status = ApprovalStatus::Approved;
        assert!(!driver.is_reservable());

        driver.available = true;
        assert!(!driver.is_reservable());

        driver.current_location = Some(DriverLocation {
            latitude: 12.90,
            longitude: 77.59,
            updated_at: Utc::now(),
        });
        assert!(driver.is_reservable());
    }
}
