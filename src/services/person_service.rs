// src/services/person_service.rs
use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::person::PersonProfile;

/// Lookup of display name and phone for riders and drivers. Account
/// management lives elsewhere; the core only reads display fields and
/// stores the contact details it is handed at driver registration.
#[async_trait]
pub trait PersonDirectory: Send + Sync {
    async fn profile(&self, person_id: &str) -> Option<PersonProfile>;
    async fn upsert(&self, profile: PersonProfile);
}

#[derive(Default)]
pub struct InMemoryPersonDirectory {
    profiles: RwLock<HashMap<String, PersonProfile>>,
}

impl InMemoryPersonDirectory {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PersonDirectory for InMemoryPersonDirectory {
    async fn profile(&self, person_id: &str) -> Option<PersonProfile> {
        self.profiles.read().await.get(person_id).cloned()
    }

    async fn upsert(&self, profile: PersonProfile) {
        self.profiles
            .write()
            .await
            .insert(profile.id.clone(), profile);
    }
}
