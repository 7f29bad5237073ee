// src/store.rs
use std::collections::HashMap;

use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::models::{Driver, FareTariff, Ride, VehicleType};

/// Everything the dispatch core owns: rides, drivers, tariffs.
///
/// All of it sits behind a single `RwLock`. A mutating operation takes the
/// write guard for its whole critical section, so a multi-entity mutation
/// (ride transition plus driver reservation) commits or fails as a unit and
/// two writers can never interleave.
#[derive(Default)]
pub struct StoreInner {
    pub rides: HashMap<String, Ride>,
    pub drivers: HashMap<String, Driver>,
    pub tariffs: HashMap<VehicleType, FareTariff>,
}

impl StoreInner {
    pub fn active_ride_for_rider(&self, rider_id: &str) -> Option<&Ride> {
        self.rides
            .values()
            .find(|ride| ride.rider_id == rider_id && ride.is_active())
    }

    pub fn active_ride_for_driver(&self, driver_id: &str) -> Option<&Ride> {
        self.rides
            .values()
            .find(|ride| ride.is_active() && ride.is_assigned_to(driver_id))
    }

    pub fn rider_has_active_ride(&self, rider_id: &str) -> bool {
        self.active_ride_for_rider(rider_id).is_some()
    }

    pub fn driver_has_active_ride(&self, driver_id: &str) -> bool {
        self.active_ride_for_driver(driver_id).is_some()
    }

    pub fn driver_by_person_id(&self, person_id: &str) -> Option<&Driver> {
        self.drivers
            .values()
            .find(|driver| driver.person_id == person_id)
    }

    pub fn license_number_exists(&self, license_number: &str) -> bool {
        self.drivers
            .values()
            .any(|driver| driver.license_number == license_number)
    }

    pub fn vehicle_number_exists(&self, vehicle_number: &str) -> bool {
        self.drivers
            .values()
            .any(|driver| driver.vehicle_number == vehicle_number)
    }
}

pub struct MemoryStore {
    inner: RwLock<StoreInner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(StoreInner::default()),
        }
    }

    pub async fn read(&self) -> RwLockReadGuard<'_, StoreInner> {
        self.inner.read().await
    }

    pub async fn write(&self) -> RwLockWriteGuard<'_, StoreInner> {
        self.inner.write().await
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}
