// tests/ride_lifecycle.rs
mod common;

use swift_dispatch::{
    errors::DispatchError,
    models::driver::VehicleType,
    models::ride::{CancelRideRequest, CancelledBy, RateRideRequest, RideStatus},
};

use common::{app, online_driver, request_city_ride};

#[tokio::test]
async fn test_full_ride_lifecycle() {
    let state = app().await;
    let driver_id = online_driver(&state, "p-driver-1", VehicleType::Sedan, 12.91, 77.60).await;

    let ride = request_city_ride(&state, "rider-1", VehicleType::Sedan).await;
    assert_eq!(ride.status, RideStatus::Requested);
    assert!(ride.driver_id.is_none());
    assert!(ride.estimated_fare > 0.0);
    assert!(ride.distance_km > 0.0);
    assert!(ride.estimated_duration_mins >= 5);

    let ride = state
        .ride_service
        .accept_ride(&driver_id, &ride.id)
        .await
        .unwrap();
    assert_eq!(ride.status, RideStatus::Matched);
    assert_eq!(ride.driver_id.as_deref(), Some(driver_id.as_str()));
    assert!(ride.matched_at.is_some());

    // Accepting reserves the driver
    let driver = state.driver_service.get(&driver_id).await.unwrap();
    assert!(!driver.available);

    let ride = state.ride_service.arrive(&driver_id, &ride.id).await.unwrap();
    assert_eq!(ride.status, RideStatus::Arrived);

    let ride = state.ride_service.start(&driver_id, &ride.id).await.unwrap();
    assert_eq!(ride.status, RideStatus::Started);

    let ride = state
        .ride_service
        .complete(&driver_id, &ride.id)
        .await
        .unwrap();
    assert_eq!(ride.status, RideStatus::Completed);
    assert_eq!(ride.final_fare, Some(ride.estimated_fare));
    assert!(ride.completed_at.is_some());

    // Completion releases the driver and credits the fare
    let driver = state.driver_service.get(&driver_id).await.unwrap();
    assert!(driver.available);
    assert_eq!(driver.total_rides, 1);
    assert_eq!(driver.total_earnings, ride.final_fare.unwrap());

    let ride = state
        .ride_service
        .rate(
            &ride.id,
            RateRideRequest {
                rider_id: "rider-1".to_string(),
                rating: 4.5,
                comment: Some("Smooth trip".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(ride.rating, Some(4.5));

    // First rating becomes the driver's average
    let driver = state.driver_service.get(&driver_id).await.unwrap();
    assert_eq!(driver.rating, 4.5);
}

#[tokio::test]
async fn test_ride_response_includes_names() {
    let state = app().await;
    let driver_id = online_driver(&state, "p-named", VehicleType::Auto, 12.91, 77.60).await;

    let ride = request_city_ride(&state, "rider-n", VehicleType::Auto).await;
    let ride = state
        .ride_service
        .accept_ride(&driver_id, &ride.id)
        .await
        .unwrap();

    assert_eq!(ride.driver_name.as_deref(), Some("Driver p-named"));
}

#[tokio::test]
async fn test_double_accept_only_one_driver_wins() {
    let state = app().await;
    let driver_a = online_driver(&state, "p-race-a", VehicleType::Sedan, 12.91, 77.60).await;
    let driver_b = online_driver(&state, "p-race-b", VehicleType::Sedan, 12.92, 77.61).await;

    let ride = request_city_ride(&state, "rider-race", VehicleType::Sedan).await;

    let (first, second) = tokio::join!(
        state.ride_service.accept_ride(&driver_a, &ride.id),
        state.ride_service.accept_ride(&driver_b, &ride.id),
    );

    let results = [first, second];
    let wins = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(wins, 1, "exactly one driver must win the ride");

    let loss = results.iter().find(|r| r.is_err()).unwrap();
    assert!(matches!(
        loss.as_ref().unwrap_err(),
        DispatchError::InvalidStateTransition { .. }
    ));

    // The loser stays available for other rides
    let winner_id = results
        .iter()
        .find_map(|r| r.as_ref().ok())
        .and_then(|ride| ride.driver_id.clone())
        .unwrap();
    let loser_id = if winner_id == driver_a { &driver_b } else { &driver_a };
    let loser = state.driver_service.get(loser_id).await.unwrap();
    assert!(loser.available);
}

#[tokio::test]
async fn test_rider_cannot_hold_two_active_rides() {
    let state = app().await;

    request_city_ride(&state, "rider-busy", VehicleType::Auto).await;
    let second = state
        .ride_service
        .request_ride(swift_dispatch::models::ride::RideRequest {
            rider_id: "rider-busy".to_string(),
            pickup: common::point(12.91, 77.60),
            drop_off: common::point(12.96, 77.66),
            vehicle_type: VehicleType::Auto,
        })
        .await;

    assert!(matches!(second, Err(DispatchError::Conflict(_))));
}

#[tokio::test]
async fn test_driver_cannot_hold_two_active_rides() {
    let state = app().await;
    let driver_id = online_driver(&state, "p-busy", VehicleType::Bike, 12.91, 77.60).await;

    let first = request_city_ride(&state, "rider-one", VehicleType::Bike).await;
    state
        .ride_service
        .accept_ride(&driver_id, &first.id)
        .await
        .unwrap();

    let second = request_city_ride(&state, "rider-two", VehicleType::Bike).await;
    let result = state.ride_service.accept_ride(&driver_id, &second.id).await;

    // A reserved driver is offline, so the availability check trips first
    assert!(matches!(result, Err(DispatchError::DriverNotAvailable(_))));
}

#[tokio::test]
async fn test_vehicle_type_must_match_on_accept() {
    let state = app().await;
    let driver_id = online_driver(&state, "p-bike", VehicleType::Bike, 12.91, 77.60).await;

    let ride = request_city_ride(&state, "rider-suv", VehicleType::Suv).await;
    let result = state.ride_service.accept_ride(&driver_id, &ride.id).await;

    assert!(matches!(result, Err(DispatchError::ValidationFailed(_))));
}

#[tokio::test]
async fn test_unapproved_driver_cannot_accept() {
    let state = app().await;
    let driver = state
        .driver_service
        .register(swift_dispatch::models::driver::DriverRegistration {
            person_id: "p-pending".to_string(),
            full_name: "Pending Driver".to_string(),
            phone_number: "+919800000001".to_string(),
            license_number: "KA-PEND-LIC".to_string(),
            vehicle_number: "KA01-PEND".to_string(),
            vehicle_type: VehicleType::Sedan,
        })
        .await
        .unwrap();

    let ride = request_city_ride(&state, "rider-p", VehicleType::Sedan).await;
    let result = state.ride_service.accept_ride(&driver.id, &ride.id).await;

    assert!(matches!(result, Err(DispatchError::Forbidden(_))));
}

#[tokio::test]
async fn test_lifecycle_actions_rejected_out_of_order() {
    let state = app().await;
    let driver_id = online_driver(&state, "p-order", VehicleType::Sedan, 12.91, 77.60).await;

    let ride = request_city_ride(&state, "rider-o", VehicleType::Sedan).await;

    // Cannot start or complete a ride that was never accepted
    assert!(matches!(
        state.ride_service.start(&driver_id, &ride.id).await,
        Err(DispatchError::Forbidden(_))
    ));

    let ride = state
        .ride_service
        .accept_ride(&driver_id, &ride.id)
        .await
        .unwrap();

    // Matched ride cannot be started before arrival
    assert!(matches!(
        state.ride_service.start(&driver_id, &ride.id).await,
        Err(DispatchError::InvalidStateTransition { .. })
    ));
    // Nor completed
    assert!(matches!(
        state.ride_service.complete(&driver_id, &ride.id).await,
        Err(DispatchError::InvalidStateTransition { .. })
    ));
}

#[tokio::test]
async fn test_only_assigned_driver_can_progress_ride() {
    let state = app().await;
    let driver_a = online_driver(&state, "p-own-a", VehicleType::Sedan, 12.91, 77.60).await;
    let driver_b = online_driver(&state, "p-own-b", VehicleType::Sedan, 12.92, 77.61).await;

    let ride = request_city_ride(&state, "rider-own", VehicleType::Sedan).await;
    state
        .ride_service
        .accept_ride(&driver_a, &ride.id)
        .await
        .unwrap();

    let result = state.ride_service.arrive(&driver_b, &ride.id).await;
    assert!(matches!(result, Err(DispatchError::Forbidden(_))));
}

#[tokio::test]
async fn test_driver_cancels_matched_ride() {
    let state = app().await;
    let driver_id = online_driver(&state, "p-cancel", VehicleType::Auto, 12.91, 77.60).await;

    let ride = request_city_ride(&state, "rider-c", VehicleType::Auto).await;
    let ride = state
        .ride_service
        .accept_ride(&driver_id, &ride.id)
        .await
        .unwrap();

    let ride = state
        .ride_service
        .cancel(
            &ride.id,
            CancelRideRequest {
                actor_role: CancelledBy::Driver,
                actor_id: driver_id.clone(),
                reason: Some("Vehicle breakdown".to_string()),
            },
        )
        .await
        .unwrap();

    assert_eq!(ride.status, RideStatus::Cancelled);
    assert_eq!(ride.cancelled_by, Some(CancelledBy::Driver));
    assert!(ride.final_fare.is_none());
    assert!(ride.cancelled_at.is_some());

    // Cancellation releases the reserved driver
    let driver = state.driver_service.get(&driver_id).await.unwrap();
    assert!(driver.available);
}

#[tokio::test]
async fn test_rider_cancels_only_own_ride() {
    let state = app().await;
    let ride = request_city_ride(&state, "rider-mine", VehicleType::Auto).await;

    let result = state
        .ride_service
        .cancel(
            &ride.id,
            CancelRideRequest {
                actor_role: CancelledBy::Rider,
                actor_id: "rider-other".to_string(),
                reason: None,
            },
        )
        .await;
    assert!(matches!(result, Err(DispatchError::Forbidden(_))));

    let ride = state
        .ride_service
        .cancel(
            &ride.id,
            CancelRideRequest {
                actor_role: CancelledBy::Rider,
                actor_id: "rider-mine".to_string(),
                reason: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(ride.status, RideStatus::Cancelled);
    assert_eq!(ride.cancelled_by, Some(CancelledBy::Rider));
}

#[tokio::test]
async fn test_started_ride_cannot_be_cancelled() {
    let state = app().await;
    let driver_id = online_driver(&state, "p-late", VehicleType::Sedan, 12.91, 77.60).await;

    let ride = request_city_ride(&state, "rider-l", VehicleType::Sedan).await;
    state.ride_service.accept_ride(&driver_id, &ride.id).await.unwrap();
    state.ride_service.arrive(&driver_id, &ride.id).await.unwrap();
    state.ride_service.start(&driver_id, &ride.id).await.unwrap();

    let result = state
        .ride_service
        .cancel(
            &ride.id,
            CancelRideRequest {
                actor_role: CancelledBy::Rider,
                actor_id: "rider-l".to_string(),
                reason: None,
            },
        )
        .await;

    assert!(matches!(
        result,
        Err(DispatchError::InvalidStateTransition { .. })
    ));
}

#[tokio::test]
async fn test_rating_rules() {
    let state = app().await;
    let driver_id = online_driver(&state, "p-rate", VehicleType::Sedan, 12.91, 77.60).await;

    let ride = request_city_ride(&state, "rider-r", VehicleType::Sedan).await;

    // Cannot rate before completion
    let early = state
        .ride_service
        .rate(
            &ride.id,
            RateRideRequest {
                rider_id: "rider-r".to_string(),
                rating: 5.0,
                comment: None,
            },
        )
        .await;
    assert!(matches!(
        early,
        Err(DispatchError::InvalidStateTransition { .. })
    ));

    state.ride_service.accept_ride(&driver_id, &ride.id).await.unwrap();
    state.ride_service.arrive(&driver_id, &ride.id).await.unwrap();
    state.ride_service.start(&driver_id, &ride.id).await.unwrap();
    state.ride_service.complete(&driver_id, &ride.id).await.unwrap();

    // Out-of-range ratings are rejected
    let out_of_range = state
        .ride_service
        .rate(
            &ride.id,
            RateRideRequest {
                rider_id: "rider-r".to_string(),
                rating: 5.5,
                comment: None,
            },
        )
        .await;
    assert!(matches!(out_of_range, Err(DispatchError::ValidationFailed(_))));

    // Only the rider on the ride may rate it
    let wrong_rider = state
        .ride_service
        .rate(
            &ride.id,
            RateRideRequest {
                rider_id: "rider-x".to_string(),
                rating: 4.0,
                comment: None,
            },
        )
        .await;
    assert!(matches!(wrong_rider, Err(DispatchError::Forbidden(_))));

    state
        .ride_service
        .rate(
            &ride.id,
            RateRideRequest {
                rider_id: "rider-r".to_string(),
                rating: 4.0,
                comment: None,
            },
        )
        .await
        .unwrap();

    // A ride takes exactly one rating
    let second = state
        .ride_service
        .rate(
            &ride.id,
            RateRideRequest {
                rider_id: "rider-r".to_string(),
                rating: 3.0,
                comment: None,
            },
        )
        .await;
    assert!(matches!(
        second,
        Err(DispatchError::InvalidStateTransition { .. })
    ));
}

#[tokio::test]
async fn test_rating_input_rounds_to_one_decimal() {
    let state = app().await;
    let driver_id = online_driver(&state, "p-round", VehicleType::Auto, 12.91, 77.60).await;

    let ride = request_city_ride(&state, "rider-round", VehicleType::Auto).await;
    state.ride_service.accept_ride(&driver_id, &ride.id).await.unwrap();
    state.ride_service.arrive(&driver_id, &ride.id).await.unwrap();
    state.ride_service.start(&driver_id, &ride.id).await.unwrap();
    state.ride_service.complete(&driver_id, &ride.id).await.unwrap();

    let ride = state
        .ride_service
        .rate(
            &ride.id,
            RateRideRequest {
                rider_id: "rider-round".to_string(),
                rating: 3.97,
                comment: None,
            },
        )
        .await
        .unwrap();

    // 3.97 carries too much precision; it lands on one decimal place
    assert_eq!(ride.rating, Some(4.0));

    let driver = state.driver_service.get(&driver_id).await.unwrap();
    assert_eq!(driver.rating, 4.0);
}

#[tokio::test]
async fn test_driver_rating_averages_across_rides() {
    let state = app().await;
    let driver_id = online_driver(&state, "p-avg", VehicleType::Auto, 12.91, 77.60).await;

    for (rider, rating) in [("rider-a1", 4.0), ("rider-a2", 5.0)] {
        let ride = request_city_ride(&state, rider, VehicleType::Auto).await;
        state.ride_service.accept_ride(&driver_id, &ride.id).await.unwrap();
        state.ride_service.arrive(&driver_id, &ride.id).await.unwrap();
        state.ride_service.start(&driver_id, &ride.id).await.unwrap();
        state.ride_service.complete(&driver_id, &ride.id).await.unwrap();
        state
            .ride_service
            .rate(
                &ride.id,
                RateRideRequest {
                    rider_id: rider.to_string(),
                    rating,
                    comment: None,
                },
            )
            .await
            .unwrap();
    }

    let driver = state.driver_service.get(&driver_id).await.unwrap();
    assert_eq!(driver.rating, 4.5);
    assert_eq!(driver.total_rides, 2);
}

#[tokio::test]
async fn test_ride_visibility_and_history() {
    let state = app().await;
    let driver_id = online_driver(&state, "p-hist", VehicleType::Sedan, 12.91, 77.60).await;

    let ride = request_city_ride(&state, "rider-h", VehicleType::Sedan).await;
    state.ride_service.accept_ride(&driver_id, &ride.id).await.unwrap();

    // Rider and assigned driver can see the ride, nobody else
    assert!(state.ride_service.get_ride(&ride.id, "rider-h").await.is_ok());
    assert!(state.ride_service.get_ride(&ride.id, &driver_id).await.is_ok());
    assert!(matches!(
        state.ride_service.get_ride(&ride.id, "stranger").await,
        Err(DispatchError::Forbidden(_))
    ));

    let active = state.ride_service.active_ride_for_rider("rider-h").await;
    assert_eq!(active.map(|r| r.id), Some(ride.id.clone()));

    let active = state.ride_service.active_ride_for_driver(&driver_id).await;
    assert_eq!(active.map(|r| r.id), Some(ride.id.clone()));

    let history = state.ride_service.rider_history("rider-h").await;
    assert_eq!(history.len(), 1);
    let history = state.ride_service.driver_history(&driver_id).await;
    assert_eq!(history.len(), 1);
}

#[tokio::test]
async fn test_completed_ride_can_be_charged() {
    let state = app().await;
    let driver_id = online_driver(&state, "p-pay", VehicleType::Sedan, 12.91, 77.60).await;

    let ride = request_city_ride(&state, "rider-pay", VehicleType::Sedan).await;
    state.ride_service.accept_ride(&driver_id, &ride.id).await.unwrap();
    state.ride_service.arrive(&driver_id, &ride.id).await.unwrap();
    state.ride_service.start(&driver_id, &ride.id).await.unwrap();
    let ride = state
        .ride_service
        .complete(&driver_id, &ride.id)
        .await
        .unwrap();

    let stored = {
        let store = state.store.read().await;
        store.rides.get(&ride.id).unwrap().clone()
    };

    let receipt = state.payment_gateway.charge(&stored).await.unwrap();
    assert_eq!(receipt.amount, ride.final_fare.unwrap());
    assert_eq!(receipt.ride_id, ride.id);
    assert!(receipt.receipt_id.starts_with("pay-"));
}

#[tokio::test]
async fn test_cannot_charge_before_completion() {
    let state = app().await;
    let ride = request_city_ride(&state, "rider-early-pay", VehicleType::Auto).await;

    let stored = {
        let store = state.store.read().await;
        store.rides.get(&ride.id).unwrap().clone()
    };

    let result = state.payment_gateway.charge(&stored).await;
    assert!(matches!(
        result,
        Err(DispatchError::InvalidStateTransition { .. })
    ));
}
