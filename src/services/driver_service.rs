// src/services/driver_service.rs
use std::cmp::Ordering;
use std::sync::Arc;

use chrono::Utc;
use tracing;

use crate::{
    errors::{DispatchError, DispatchResult},
    models::driver::{
        ApprovalStatus, Driver, DriverLocation, DriverRegistration, DriverResponse,
        NearbyDriversQuery,
    },
    models::person::PersonProfile,
    services::notification_service::NotificationService,
    services::person_service::PersonDirectory,
    services::{geo, validate_coordinates},
    store::MemoryStore,
    utils::id_generator::{IdGenerator, IdType},
};

const MIN_SEARCH_RADIUS_KM: f64 = 1.0;
const MAX_SEARCH_RADIUS_KM: f64 = 50.0;
const MAX_SEARCH_LIMIT: usize = 20;

pub struct DriverService {
    store: Arc<MemoryStore>,
    persons: Arc<dyn PersonDirectory>,
    notifications: Arc<dyn NotificationService>,
}

impl DriverService {
    pub fn new(
        store: Arc<MemoryStore>,
        persons: Arc<dyn PersonDirectory>,
        notifications: Arc<dyn NotificationService>,
    ) -> Self {
        Self {
            store,
            persons,
            notifications,
        }
    }

    pub async fn register(&self, registration: DriverRegistration) -> DispatchResult<DriverResponse> {
        tracing::info!("Registering driver for person: {}", registration.person_id);

        let license_number = registration.license_number.trim().to_uppercase();
        let vehicle_number = registration.vehicle_number.trim().to_uppercase();
        if license_number.is_empty() {
            return Err(DispatchError::MissingRequiredField("license_number".to_string()));
        }
        if vehicle_number.is_empty() {
            return Err(DispatchError::MissingRequiredField("vehicle_number".to_string()));
        }

        let driver = {
            let mut store = self.store.write().await;

            if store.driver_by_person_id(&registration.person_id).is_some() {
                return Err(DispatchError::duplicate(
                    "Driver",
                    "person_id",
                    &registration.person_id,
                ));
            }
            if store.license_number_exists(&license_number) {
                return Err(DispatchError::duplicate("Driver", "license_number", &license_number));
            }
            if store.vehicle_number_exists(&vehicle_number) {
                return Err(DispatchError::duplicate("Driver", "vehicle_number", &vehicle_number));
            }

            let now = Utc::now();
            let driver = Driver {
                id: IdGenerator::generate(IdType::Driver),
                person_id: registration.person_id.clone(),
                license_number,
                vehicle_number,
                vehicle_type: registration.vehicle_type,
                current_location: None,
                available: false,
                approval_status: ApprovalStatus::Pending,
                rejection_reason: None,
                rating: 0.0,
                total_rides: 0,
                total_earnings: 0.0,
                created_at: now,
                updated_at: now,
            };
            store.drivers.insert(driver.id.clone(), driver.clone());
            driver
        };

        // Contact details live with the person directory, not the driver row
        self.persons
            .upsert(PersonProfile {
                id: registration.person_id,
                full_name: registration.full_name,
                phone_number: registration.phone_number,
            })
            .await;

        tracing::info!("Driver registered successfully: {}", driver.id);
        Ok(DriverResponse::from_driver(&driver))
    }

    pub async fn get(&self, driver_id: &str) -> DispatchResult<DriverResponse> {
        let store = self.store.read().await;
        let driver = store
            .drivers
            .get(driver_id)
            .ok_or_else(|| DispatchError::driver_not_found(driver_id))?;
        Ok(DriverResponse::from_driver(driver))
    }

    pub async fn get_by_person(&self, person_id: &str) -> DispatchResult<DriverResponse> {
        let store = self.store.read().await;
        let driver = store
            .driver_by_person_id(person_id)
            .ok_or_else(|| DispatchError::driver_not_found(person_id))?;
        Ok(DriverResponse::from_driver(driver))
    }

    /// Drivers still waiting for review, oldest first.
    pub async fn pending(&self) -> Vec<DriverResponse> {
        let store = self.store.read().await;
        let mut pending: Vec<&Driver> = store
            .drivers
            .values()
            .filter(|driver| driver.approval_status == ApprovalStatus::Pending)
            .collect();
        pending.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        pending.iter().map(|d| DriverResponse::from_driver(d)).collect()
    }

    pub async fn approve(&self, driver_id: &str) -> DispatchResult<DriverResponse> {
        let driver = {
            let mut store = self.store.write().await;
            let driver = store
                .drivers
                .get_mut(driver_id)
                .ok_or_else(|| DispatchError::driver_not_found(driver_id))?;

            if driver.approval_status != ApprovalStatus::Pending {
                return Err(DispatchError::conflict(format!(
                    "Driver is already {:?}",
                    driver.approval_status
                )));
            }

            driver.approval_status = ApprovalStatus::Approved;
            driver.rejection_reason = None;
            driver.updated_at = Utc::now();
            driver.clone()
        };

        tracing::info!("Driver approved: {}", driver_id);
        self.notify_review_outcome(driver.clone(), true);
        Ok(DriverResponse::from_driver(&driver))
    }

    pub async fn reject(&self, driver_id: &str, reason: Option<String>) -> DispatchResult<DriverResponse> {
        let reason = match reason {
            Some(reason) if !reason.trim().is_empty() => reason,
            _ => return Err(DispatchError::MissingRequiredField("reason".to_string())),
        };

        let driver = {
            let mut store = self.store.write().await;
            let driver = store
                .drivers
                .get_mut(driver_id)
                .ok_or_else(|| DispatchError::driver_not_found(driver_id))?;

            if driver.approval_status != ApprovalStatus::Pending {
                return Err(DispatchError::conflict(format!(
                    "Driver is already {:?}",
                    driver.approval_status
                )));
            }

            driver.approval_status = ApprovalStatus::Rejected;
            driver.rejection_reason = Some(reason.clone());
            driver.available = false;
            driver.updated_at = Utc::now();
            driver.clone()
        };

        tracing::info!("Driver rejected: {} - Reason: {}", driver_id, reason);
        self.notify_review_outcome(driver.clone(), false);
        Ok(DriverResponse::from_driver(&driver))
    }

    pub async fn update_location(
        &self,
        driver_id: &str,
        latitude: f64,
        longitude: f64,
    ) -> DispatchResult<DriverResponse> {
        validate_coordinates("", latitude, longitude)?;

        let mut store = self.store.write().await;
        let driver = store
            .drivers
            .get_mut(driver_id)
            .ok_or_else(|| DispatchError::driver_not_found(driver_id))?;

        if !driver.is_approved() {
            return Err(DispatchError::forbidden("Driver account is not approved"));
        }

        // Single assignment keeps lat/lon consistent under concurrency
        driver.current_location = Some(DriverLocation {
            latitude,
            longitude,
            updated_at: Utc::now(),
        });
        driver.updated_at = Utc::now();

        tracing::debug!("Updated location for driver: {}", driver_id);
        Ok(DriverResponse::from_driver(driver))
    }

    pub async fn set_availability(&self, driver_id: &str, available: bool) -> DispatchResult<DriverResponse> {
        let mut store = self.store.write().await;
        let driver = store
            .drivers
            .get_mut(driver_id)
            .ok_or_else(|| DispatchError::driver_not_found(driver_id))?;

        if !driver.is_approved() {
            return Err(DispatchError::forbidden("Driver account is not approved"));
        }

        if available && driver.current_location.is_none() {
            return Err(DispatchError::validation_error(
                "available",
                "Update your location before going online",
            ));
        }

        driver.available = available;
        driver.updated_at = Utc::now();

        tracing::info!(
            "Driver {} is now {}",
            driver_id,
            if available { "online" } else { "offline" }
        );
        Ok(DriverResponse::from_driver(driver))
    }

    /// Available approved drivers within the radius, closest first,
    /// optionally restricted to one vehicle type.
    pub async fn find_nearby(&self, query: NearbyDriversQuery) -> DispatchResult<Vec<DriverResponse>> {
        validate_coordinates("", query.latitude, query.longitude)?;
        if !(MIN_SEARCH_RADIUS_KM..=MAX_SEARCH_RADIUS_KM).contains(&query.radius_km) {
            return Err(DispatchError::validation_error(
                "radius_km",
                "Radius must be between 1 and 50 km",
            ));
        }
        if query.limit == 0 || query.limit > MAX_SEARCH_LIMIT {
            return Err(DispatchError::validation_error(
                "limit",
                "Limit must be between 1 and 20",
            ));
        }

        let store = self.store.read().await;
        let mut candidates: Vec<(f64, &Driver)> = store
            .drivers
            .values()
            .filter(|driver| driver.is_reservable())
            .filter(|driver| {
                query
                    .vehicle_type
                    .map_or(true, |vehicle_type| driver.vehicle_type == vehicle_type)
            })
            .filter_map(|driver| {
                let location = driver.current_location?;
                let distance = geo::distance_km(
                    query.latitude,
                    query.longitude,
                    location.latitude,
                    location.longitude,
                );
                (distance <= query.radius_km).then_some((distance, driver))
            })
            .collect();

        // Closest first; equal distances fall back to id order for a
        // stable result
        candidates.sort_by(|a, b| {
            a.0.partial_cmp(&b.0)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.1.id.cmp(&b.1.id))
        });
        candidates.truncate(query.limit);

        Ok(candidates
            .into_iter()
            .map(|(distance, driver)| DriverResponse::from_driver(driver).with_distance(distance))
            .collect())
    }

    fn notify_review_outcome(&self, driver: Driver, approved: bool) {
        let notifications = Arc::clone(&self.notifications);
        tokio::spawn(async move {
            let result = if approved {
                notifications.driver_approved(&driver).await
            } else {
                notifications.driver_rejected(&driver).await
            };
            if let Err(err) = result {
                tracing::warn!("Driver review notification failed: {}", err);
            }
        });
    }
}
