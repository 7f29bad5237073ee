// src/models/person.rs
use serde::{Deserialize, Serialize};

/// Display fields for a rider or driver. The core keeps identity
/// references only; contact data lives with the person directory.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PersonProfile {
    pub id: String,
    pub full_name: String,
    pub phone_number: String,
}
