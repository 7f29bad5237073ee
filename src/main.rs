use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::cors::CorsLayer;

use swift_dispatch::{
    handlers::{admin_handler, driver_handler, fare_handler, payment_handler, ride_handler},
    state::{AppConfig, AppState},
};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env();
    let bind_addr = config.bind_addr.clone();
    let app_state = AppState::new(config).await;

    let app = Router::new()
        // drivers
        .route("/drivers", post(driver_handler::register_driver))
        .route("/drivers/nearby", get(driver_handler::find_nearby_drivers))
        .route("/drivers/:driver_id", get(driver_handler::get_driver))
        .route("/drivers/:driver_id/location", put(driver_handler::update_location))
        .route(
            "/drivers/:driver_id/availability",
            put(driver_handler::update_availability),
        )
        .route(
            "/drivers/:driver_id/active-ride",
            get(ride_handler::active_ride_for_driver),
        )
        .route("/drivers/:driver_id/rides", get(ride_handler::driver_history))
        // admin review queue
        .route("/admin/drivers/pending", get(admin_handler::pending_drivers))
        .route("/admin/drivers/:driver_id/approve", post(admin_handler::approve_driver))
        .route("/admin/drivers/:driver_id/reject", post(admin_handler::reject_driver))
        // rides
        .route("/rides", post(ride_handler::request_ride))
        .route("/rides/:ride_id", get(ride_handler::get_ride))
        .route("/rides/:ride_id/accept", post(ride_handler::accept_ride))
        .route("/rides/:ride_id/arrive", post(ride_handler::driver_arrived))
        .route("/rides/:ride_id/start", post(ride_handler::start_ride))
        .route("/rides/:ride_id/complete", post(ride_handler::complete_ride))
        .route("/rides/:ride_id/cancel", post(ride_handler::cancel_ride))
        .route("/rides/:ride_id/rate", post(ride_handler::rate_ride))
        .route("/rides/:ride_id/charge", post(payment_handler::charge_ride))
        // riders
        .route("/riders/:rider_id/active-ride", get(ride_handler::active_ride_for_rider))
        .route("/riders/:rider_id/rides", get(ride_handler::rider_history))
        // fares
        .route("/fares/estimate", post(fare_handler::estimate_fare))
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(app_state));

    tracing::info!("Listening on {}", bind_addr);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
