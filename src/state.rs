// src/state.rs
use std::sync::Arc;

use crate::services::driver_service::DriverService;
use crate::services::fare_service::FareService;
use crate::services::notification_service::{LogNotificationService, NotificationService};
use crate::services::payment_service::{LogPaymentGateway, PaymentGateway};
use crate::services::person_service::{InMemoryPersonDirectory, PersonDirectory};
use crate::services::ride_service::RideService;
use crate::store::MemoryStore;

pub struct AppState {
    pub store: Arc<MemoryStore>,
    pub fare_service: Arc<FareService>,
    pub driver_service: Arc<DriverService>,
    pub ride_service: Arc<RideService>,
    pub person_directory: Arc<dyn PersonDirectory>,
    pub notification_service: Arc<dyn NotificationService>,
    pub payment_gateway: Arc<dyn PaymentGateway>,
    pub config: AppConfig,
}

#[derive(Clone)]
pub struct AppConfig {
    pub bind_addr: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
        }
    }
}

impl AppState {
    pub async fn new(config: AppConfig) -> Self {
        let store = Arc::new(MemoryStore::default());
        let person_directory: Arc<dyn PersonDirectory> =
            Arc::new(InMemoryPersonDirectory::default());
        let notification_service: Arc<dyn NotificationService> = Arc::new(LogNotificationService);
        let payment_gateway: Arc<dyn PaymentGateway> = Arc::new(LogPaymentGateway);

        let fare_service = Arc::new(FareService::new(store.clone()));
        fare_service.seed_default_tariffs().await;

        let driver_service = Arc::new(DriverService::new(
            store.clone(),
            person_directory.clone(),
            notification_service.clone(),
        ));
        let ride_service = Arc::new(RideService::new(
            store.clone(),
            fare_service.clone(),
            person_directory.clone(),
            notification_service.clone(),
        ));

        Self {
            store,
            fare_service,
            driver_service,
            ride_service,
            person_directory,
            notification_service,
            payment_gateway,
            config,
        }
    }
}
