// src/services/ride_service.rs
use std::sync::Arc;

use chrono::Utc;
use tracing;

use crate::{
    errors::{DispatchError, DispatchResult},
    models::ride::{
        CancelRideRequest, CancelledBy, RateRideRequest, Ride, RideRequest, RideResponse,
        RideStatus,
    },
    services::fare_service::FareService,
    services::notification_service::NotificationService,
    services::person_service::PersonDirectory,
    services::{geo, validate_coordinates},
    store::MemoryStore,
    utils::id_generator::{IdGenerator, IdType},
};

const MIN_RATING: f64 = 1.0;
const MAX_RATING: f64 = 5.0;

enum RideEvent {
    Matched,
    Arrived,
    Started,
    Completed,
    Cancelled(&'static str),
}

/// The ride lifecycle state machine. Owns every Ride record and performs
/// each transition, together with the driver reservation it implies,
/// inside one store-wide critical section.
pub struct RideService {
    store: Arc<MemoryStore>,
    fares: Arc<FareService>,
    persons: Arc<dyn PersonDirectory>,
    notifications: Arc<dyn NotificationService>,
}

impl RideService {
    pub fn new(
        store: Arc<MemoryStore>,
        fares: Arc<FareService>,
        persons: Arc<dyn PersonDirectory>,
        notifications: Arc<dyn NotificationService>,
    ) -> Self {
        Self {
            store,
            fares,
            persons,
            notifications,
        }
    }

    /// Create a ride in `Requested` state with distance, ETA and fare
    /// estimate computed up front.
    pub async fn request_ride(&self, request: RideRequest) -> DispatchResult<RideResponse> {
        validate_coordinates("pickup", request.pickup.latitude, request.pickup.longitude)?;
        validate_coordinates("drop", request.drop_off.latitude, request.drop_off.longitude)?;

        // Tariffs are immutable, so the quote can be computed before the
        // critical section
        let distance_km = geo::distance_km(
            request.pickup.latitude,
            request.pickup.longitude,
            request.drop_off.latitude,
            request.drop_off.longitude,
        );
        let estimated_duration_mins = geo::eta_minutes(distance_km);
        let quote = self.fares.quote(request.vehicle_type, distance_km).await;

        let ride = {
            let mut store = self.store.write().await;

            if store.rider_has_active_ride(&request.rider_id) {
                return Err(DispatchError::conflict("You already have an active ride"));
            }

            let now = Utc::now();
            let ride = Ride {
                id: IdGenerator::generate(IdType::Ride),
                rider_id: request.rider_id,
                driver_id: None,
                pickup: request.pickup,
                drop_off: request.drop_off,
                vehicle_type: request.vehicle_type,
                status: RideStatus::Requested,
                distance_km,
                estimated_duration_mins,
                estimated_fare: quote.total,
                final_fare: None,
                requested_at: now,
                matched_at: None,
                arrived_at: None,
                started_at: None,
                completed_at: None,
                cancelled_at: None,
                cancelled_by: None,
                cancel_reason: None,
                rating: None,
                rating_comment: None,
                updated_at: now,
            };
            store.rides.insert(ride.id.clone(), ride.clone());
            ride
        };

        tracing::info!("Ride requested: {} by rider: {}", ride.id, ride.rider_id);
        Ok(self.to_response(&ride).await)
    }

    /// Driver accepts a `Requested` ride. The eligibility checks, the
    /// ride transition and the driver reservation all happen under one
    /// write guard, so two drivers can never win the same ride and one
    /// driver can never hold two.
    pub async fn accept_ride(&self, driver_id: &str, ride_id: &str) -> DispatchResult<RideResponse> {
        let ride = {
            let mut store = self.store.write().await;

            let driver = store
                .drivers
                .get(driver_id)
                .ok_or_else(|| DispatchError::driver_not_found(driver_id))?;
            if !driver.is_approved() {
                return Err(DispatchError::forbidden("Driver account is not approved"));
            }
            if !driver.available {
                return Err(DispatchError::DriverNotAvailable(driver_id.to_string()));
            }
            let driver_vehicle = driver.vehicle_type;

            if store.driver_has_active_ride(driver_id) {
                return Err(DispatchError::conflict("You already have an active ride"));
            }

            let ride = store
                .rides
                .get(ride_id)
                .ok_or_else(|| DispatchError::ride_not_found(ride_id))?;
            if !ride.can_be_accepted() {
                return Err(DispatchError::invalid_transition(ride.status.as_str(), "accept"));
            }
            if ride.vehicle_type != driver_vehicle {
                return Err(DispatchError::validation_error(
                    "vehicle_type",
                    "Your vehicle type doesn't match the ride request",
                ));
            }

            // All checks passed; commit ride and reservation together
            let now = Utc::now();
            let ride = store
                .rides
                .get_mut(ride_id)
                .ok_or_else(|| DispatchError::ride_not_found(ride_id))?;
            ride.driver_id = Some(driver_id.to_string());
            ride.status = RideStatus::Matched;
            ride.matched_at = Some(now);
            ride.updated_at = now;
            let ride = ride.clone();

            let driver = store
                .drivers
                .get_mut(driver_id)
                .ok_or_else(|| DispatchError::driver_not_found(driver_id))?;
            driver.available = false;
            driver.updated_at = now;

            ride
        };

        tracing::info!("Ride {} accepted by driver {}", ride_id, driver_id);
        self.notify_ride_event(ride.clone(), RideEvent::Matched);
        Ok(self.to_response(&ride).await)
    }

    /// Assigned driver reports arrival at the pickup point.
    pub async fn arrive(&self, driver_id: &str, ride_id: &str) -> DispatchResult<RideResponse> {
        let ride = {
            let mut store = self.store.write().await;
            let ride = Self::ride_for_driver_mut(&mut store, driver_id, ride_id)?;
            if !ride.can_arrive() {
                return Err(DispatchError::invalid_transition(ride.status.as_str(), "arrive"));
            }

            let now = Utc::now();
            ride.status = RideStatus::Arrived;
            ride.arrived_at = Some(now);
            ride.updated_at = now;
            ride.clone()
        };

        tracing::info!("Driver arrived for ride {}", ride_id);
        self.notify_ride_event(ride.clone(), RideEvent::Arrived);
        Ok(self.to_response(&ride).await)
    }

    /// Assigned driver starts the ride.
    pub async fn start(&self, driver_id: &str, ride_id: &str) -> DispatchResult<RideResponse> {
        let ride = {
            let mut store = self.store.write().await;
            let ride = Self::ride_for_driver_mut(&mut store, driver_id, ride_id)?;
            if !ride.can_start() {
                return Err(DispatchError::invalid_transition(ride.status.as_str(), "start"));
            }

            let now = Utc::now();
            ride.status = RideStatus::Started;
            ride.started_at = Some(now);
            ride.updated_at = now;
            ride.clone()
        };

        tracing::info!("Ride {} started", ride_id);
        self.notify_ride_event(ride.clone(), RideEvent::Started);
        Ok(self.to_response(&ride).await)
    }

    /// Assigned driver completes the ride. The final fare equals the
    /// estimate; the driver's stats are updated and the driver released
    /// in the same critical section.
    pub async fn complete(&self, driver_id: &str, ride_id: &str) -> DispatchResult<RideResponse> {
        let ride = {
            let mut store = self.store.write().await;
            let ride = Self::ride_for_driver_mut(&mut store, driver_id, ride_id)?;
            if !ride.can_complete() {
                return Err(DispatchError::invalid_transition(ride.status.as_str(), "complete"));
            }

            let now = Utc::now();
            let final_fare = ride.estimated_fare;
            ride.final_fare = Some(final_fare);
            ride.status = RideStatus::Completed;
            ride.completed_at = Some(now);
            ride.updated_at = now;
            let ride = ride.clone();

            let driver = store
                .drivers
                .get_mut(driver_id)
                .ok_or_else(|| DispatchError::driver_not_found(driver_id))?;
            driver.total_rides += 1;
            driver.add_earnings(final_fare);
            driver.available = true;
            driver.updated_at = now;

            ride
        };

        tracing::info!("Ride {} completed. Fare: {:?}", ride_id, ride.final_fare);
        self.notify_ride_event(ride.clone(), RideEvent::Completed);
        Ok(self.to_response(&ride).await)
    }

    /// Cancel a non-started ride. Allowed to the rider on the ride or
    /// the assigned driver; an assigned driver is released either way.
    pub async fn cancel(&self, ride_id: &str, request: CancelRideRequest) -> DispatchResult<RideResponse> {
        let ride = {
            let mut store = self.store.write().await;

            let ride = store
                .rides
                .get(ride_id)
                .ok_or_else(|| DispatchError::ride_not_found(ride_id))?;
            if !ride.can_be_cancelled() {
                return Err(DispatchError::invalid_transition(ride.status.as_str(), "cancel"));
            }

            match request.actor_role {
                CancelledBy::Rider => {
                    if ride.rider_id != request.actor_id {
                        return Err(DispatchError::forbidden("You can only cancel your own rides"));
                    }
                }
                CancelledBy::Driver => {
                    if !ride.is_assigned_to(&request.actor_id) {
                        return Err(DispatchError::forbidden(
                            "You can only cancel rides assigned to you",
                        ));
                    }
                }
            }

            let now = Utc::now();
            let assigned_driver = ride.driver_id.clone();

            let ride = store
                .rides
                .get_mut(ride_id)
                .ok_or_else(|| DispatchError::ride_not_found(ride_id))?;
            ride.status = RideStatus::Cancelled;
            ride.cancelled_at = Some(now);
            ride.cancelled_by = Some(request.actor_role);
            ride.cancel_reason = request.reason;
            ride.updated_at = now;
            let ride = ride.clone();

            // Whoever cancelled, a reserved driver goes back online
            if let Some(driver_id) = assigned_driver {
                if let Some(driver) = store.drivers.get_mut(&driver_id) {
                    driver.available = true;
                    driver.updated_at = now;
                }
            }

            ride
        };

        let actor = match request.actor_role {
            CancelledBy::Rider => "RIDER",
            CancelledBy::Driver => "DRIVER",
        };
        tracing::info!("Ride {} cancelled by {}", ride_id, actor);
        self.notify_ride_event(ride.clone(), RideEvent::Cancelled(actor));
        Ok(self.to_response(&ride).await)
    }

    /// Rider rates a completed ride, once. Feeds the driver's running
    /// average.
    pub async fn rate(&self, ride_id: &str, request: RateRideRequest) -> DispatchResult<RideResponse> {
        if !(MIN_RATING..=MAX_RATING).contains(&request.rating) {
            return Err(DispatchError::validation_error(
                "rating",
                "Rating must be between 1.0 and 5.0",
            ));
        }
        // Ratings carry one decimal place
        let rating = (request.rating * 10.0).round() / 10.0;

        let ride = {
            let mut store = self.store.write().await;

            let ride = store
                .rides
                .get(ride_id)
                .ok_or_else(|| DispatchError::ride_not_found(ride_id))?;
            if ride.rider_id != request.rider_id {
                return Err(DispatchError::forbidden("You can only rate your own rides"));
            }
            if !ride.can_be_rated() {
                return Err(DispatchError::invalid_transition(ride.status.as_str(), "rate"));
            }

            let driver_id = ride.driver_id.clone();

            let ride = store
                .rides
                .get_mut(ride_id)
                .ok_or_else(|| DispatchError::ride_not_found(ride_id))?;
            ride.rating = Some(rating);
            ride.rating_comment = request.comment;
            ride.updated_at = Utc::now();
            let ride = ride.clone();

            if let Some(driver_id) = driver_id {
                if let Some(driver) = store.drivers.get_mut(&driver_id) {
                    driver.rating =
                        crate::services::rating::updated_average(driver.rating, driver.total_rides, rating);
                    driver.updated_at = Utc::now();
                }
            }

            ride
        };

        tracing::info!("Ride {} rated: {}", ride_id, rating);
        Ok(self.to_response(&ride).await)
    }

    /// Ride detail, visible to its rider and its assigned driver only.
    pub async fn get_ride(&self, ride_id: &str, requester_id: &str) -> DispatchResult<RideResponse> {
        let ride = {
            let store = self.store.read().await;
            let ride = store
                .rides
                .get(ride_id)
                .ok_or_else(|| DispatchError::ride_not_found(ride_id))?;

            if ride.rider_id != requester_id && !ride.is_assigned_to(requester_id) {
                return Err(DispatchError::forbidden("You don't have access to this ride"));
            }
            ride.clone()
        };

        Ok(self.to_response(&ride).await)
    }

    pub async fn active_ride_for_rider(&self, rider_id: &str) -> Option<RideResponse> {
        let ride = {
            let store = self.store.read().await;
            store.active_ride_for_rider(rider_id).cloned()
        }?;
        Some(self.to_response(&ride).await)
    }

    pub async fn active_ride_for_driver(&self, driver_id: &str) -> Option<RideResponse> {
        let ride = {
            let store = self.store.read().await;
            store.active_ride_for_driver(driver_id).cloned()
        }?;
        Some(self.to_response(&ride).await)
    }

    /// Rider's rides, newest first.
    pub async fn rider_history(&self, rider_id: &str) -> Vec<RideResponse> {
        let mut rides: Vec<Ride> = {
            let store = self.store.read().await;
            store
                .rides
                .values()
                .filter(|ride| ride.rider_id == rider_id)
                .cloned()
                .collect()
        };
        rides.sort_by(|a, b| b.requested_at.cmp(&a.requested_at));

        let mut responses = Vec::with_capacity(rides.len());
        for ride in &rides {
            responses.push(self.to_response(ride).await);
        }
        responses
    }

    /// Driver's rides, newest first.
    pub async fn driver_history(&self, driver_id: &str) -> Vec<RideResponse> {
        let mut rides: Vec<Ride> = {
            let store = self.store.read().await;
            store
                .rides
                .values()
                .filter(|ride| ride.is_assigned_to(driver_id))
                .cloned()
                .collect()
        };
        rides.sort_by(|a, b| b.requested_at.cmp(&a.requested_at));

        let mut responses = Vec::with_capacity(rides.len());
        for ride in &rides {
            responses.push(self.to_response(ride).await);
        }
        responses
    }

    /// Mutable ride lookup that also enforces "this is your ride".
    fn ride_for_driver_mut<'a>(
        store: &'a mut crate::store::StoreInner,
        driver_id: &str,
        ride_id: &str,
    ) -> DispatchResult<&'a mut Ride> {
        if !store.drivers.contains_key(driver_id) {
            return Err(DispatchError::driver_not_found(driver_id));
        }
        let ride = store
            .rides
            .get_mut(ride_id)
            .ok_or_else(|| DispatchError::ride_not_found(ride_id))?;
        if !ride.is_assigned_to(driver_id) {
            return Err(DispatchError::forbidden("This ride is not assigned to you"));
        }
        Ok(ride)
    }

    /// Send the lifecycle event after the transition has committed.
    /// Fire-and-forget: a delivery failure is logged and never rolls the
    /// transition back.
    fn notify_ride_event(&self, ride: Ride, event: RideEvent) {
        let notifications = Arc::clone(&self.notifications);
        tokio::spawn(async move {
            let result = match &event {
                RideEvent::Matched => notifications.ride_matched(&ride).await,
                RideEvent::Arrived => notifications.driver_arrived(&ride).await,
                RideEvent::Started => notifications.ride_started(&ride).await,
                RideEvent::Completed => notifications.ride_completed(&ride).await,
                RideEvent::Cancelled(actor) => notifications.ride_cancelled(&ride, actor).await,
            };
            if let Err(err) = result {
                tracing::warn!("Ride notification failed for {}: {}", ride.id, err);
            }
        });
    }

    async fn to_response(&self, ride: &Ride) -> RideResponse {
        let mut response = RideResponse::from_ride(ride);

        if let Some(profile) = self.persons.profile(&ride.rider_id).await {
            response.rider_name = Some(profile.full_name);
        }

        if let Some(driver_id) = &ride.driver_id {
            let person_id = {
                let store = self.store.read().await;
                store.drivers.get(driver_id).map(|d| d.person_id.clone())
            };
            if let Some(person_id) = person_id {
                if let Some(profile) = self.persons.profile(&person_id).await {
                    response.driver_name = Some(profile.full_name);
                }
            }
        }

        response
    }
}
