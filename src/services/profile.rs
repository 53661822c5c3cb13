//! Profile service implementation
//!
//! This service handles profile retrieval and upsert, and answers which of
//! an event's required profile fields a user still needs to fill in before
//! they can sign up.

use uuid::Uuid;

use crate::database::service::DatabaseService;
use crate::models::profile::{Profile, UpsertProfileRequest};
use crate::utils::errors::{Result, UniEventsError};
use crate::utils::logging::log_user_action;

/// Profile service for attendee profile management
#[derive(Clone)]
pub struct ProfileService {
    db: DatabaseService,
}

impl ProfileService {
    /// Create a new ProfileService instance
    pub fn new(db: DatabaseService) -> Self {
        Self { db }
    }

    /// The user's profile; an empty default if never saved
    pub async fn get(&self, user_id: Uuid) -> Result<Profile> {
        Ok(self
            .db
            .profiles
            .find_by_user_id(user_id)
            .await?
            .unwrap_or_else(|| Profile::empty(user_id)))
    }

    /// Insert or update the user's profile
    pub async fn upsert(&self, user_id: Uuid, request: UpsertProfileRequest) -> Result<Profile> {
        if let Some(age) = request.age {
            if !(0..=150).contains(&age) {
                return Err(UniEventsError::InvalidInput(
                    "Age must be between 0 and 150".to_string(),
                ));
            }
        }

        let profile = self.db.profiles.upsert(user_id, request).await?;
        log_user_action(user_id, "update_profile", None);
        Ok(profile)
    }

    /// Which of an event's required fields the user's profile still lacks
    pub async fn missing_fields(&self, user_id: Uuid, event_id: Uuid) -> Result<Vec<String>> {
        let event = self
            .db
            .events
            .find_by_id(event_id)
            .await?
            .ok_or(UniEventsError::EventNotFound { event_id })?;

        let profile = self.get(user_id).await?;
        Ok(profile.missing_fields(&event.required_profile_fields))
    }
}
