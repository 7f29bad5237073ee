// src/handlers/mod.rs
pub mod admin_handler;
pub mod driver_handler;
pub mod fare_handler;
pub mod payment_handler;
pub mod ride_handler;
