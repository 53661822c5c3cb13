//! Event service implementation
//!
//! This service handles event discovery for attendees and event management
//! for organizers: creation, updates, lock/archive toggles, deletion, and
//! share-link building.

use tracing::info;
use uuid::Uuid;

use crate::config::settings::Settings;
use crate::database::service::DatabaseService;
use crate::models::event::{
    CreateEventRequest, Event, EventFilter, EventWithCounts, UpdateEventRequest,
};
use crate::utils::errors::{Result, UniEventsError};
use crate::utils::helpers::build_share_url;
use crate::utils::logging::log_organizer_action;

/// Event service for discovery and organizer management
#[derive(Clone)]
pub struct EventService {
    db: DatabaseService,
    settings: Settings,
}

impl EventService {
    /// Create a new EventService instance
    pub fn new(db: DatabaseService, settings: Settings) -> Self {
        Self { db, settings }
    }

    /// Public listing with search/category/school filters
    pub async fn list_public(&self, filter: EventFilter) -> Result<Vec<EventWithCounts>> {
        self.db.events.list_public(&filter).await
    }

    /// Event detail with counts; deep-link target
    pub async fn get_with_counts(&self, event_id: Uuid) -> Result<EventWithCounts> {
        self.db
            .events
            .find_with_counts(event_id)
            .await?
            .ok_or(UniEventsError::EventNotFound { event_id })
    }

    /// Distinct categories for the filter sidebar
    pub async fn categories(&self) -> Result<Vec<String>> {
        self.db.events.distinct_categories().await
    }

    /// Public deep-link URL for the client's QR/clipboard share feature
    pub async fn share_url(&self, event_id: Uuid) -> Result<String> {
        // 404 for unknown events rather than handing out dead links
        self.db
            .events
            .find_by_id(event_id)
            .await?
            .ok_or(UniEventsError::EventNotFound { event_id })?;

        build_share_url(&self.settings.app.public_base_url, event_id)
    }

    /// Create an event owned by the caller
    pub async fn create(&self, organizer_id: Uuid, request: CreateEventRequest) -> Result<Event> {
        validate_event_request(&request)?;

        let event = self.db.events.create(organizer_id, request).await?;
        log_organizer_action(organizer_id, "create_event", Some(event.id), None);
        Ok(event)
    }

    /// Events owned by the caller, newest created first
    pub async fn list_for_organizer(
        &self,
        organizer_id: Uuid,
        include_archived: bool,
    ) -> Result<Vec<EventWithCounts>> {
        self.db
            .events
            .list_by_organizer(organizer_id, include_archived)
            .await
    }

    /// Partial update of an event the caller owns
    pub async fn update(
        &self,
        event_id: Uuid,
        organizer_id: Uuid,
        request: UpdateEventRequest,
    ) -> Result<Event> {
        self.event_owned_by(event_id, organizer_id).await?;

        if let Some(capacity) = request.capacity {
            if capacity <= 0 {
                return Err(UniEventsError::InvalidInput(
                    "Capacity must be greater than 0".to_string(),
                ));
            }
        }

        let event = self.db.events.update(event_id, request).await?;
        log_organizer_action(organizer_id, "update_event", Some(event_id), None);
        Ok(event)
    }

    /// Toggle whether an event accepts new signups
    pub async fn set_locked(
        &self,
        event_id: Uuid,
        organizer_id: Uuid,
        locked: bool,
    ) -> Result<Event> {
        self.event_owned_by(event_id, organizer_id).await?;

        let event = self
            .db
            .events
            .update(
                event_id,
                UpdateEventRequest {
                    is_locked: Some(locked),
                    ..Default::default()
                },
            )
            .await?;

        let action = if locked { "lock_event" } else { "unlock_event" };
        log_organizer_action(organizer_id, action, Some(event_id), None);
        Ok(event)
    }

    /// Toggle whether an event is archived (hidden from public listings)
    pub async fn set_archived(
        &self,
        event_id: Uuid,
        organizer_id: Uuid,
        archived: bool,
    ) -> Result<Event> {
        self.event_owned_by(event_id, organizer_id).await?;

        let event = self
            .db
            .events
            .update(
                event_id,
                UpdateEventRequest {
                    is_archived: Some(archived),
                    ..Default::default()
                },
            )
            .await?;

        let action = if archived { "archive_event" } else { "unarchive_event" };
        log_organizer_action(organizer_id, action, Some(event_id), None);
        Ok(event)
    }

    /// Delete an event the caller owns, along with all its signup data
    pub async fn delete(&self, event_id: Uuid, organizer_id: Uuid) -> Result<()> {
        self.event_owned_by(event_id, organizer_id).await?;

        self.db.events.delete(event_id).await?;
        log_organizer_action(organizer_id, "delete_event", Some(event_id), None);
        info!(event_id = %event_id, "Event deleted with its signups");
        Ok(())
    }

    /// Load an event and verify the caller owns it
    async fn event_owned_by(&self, event_id: Uuid, organizer_id: Uuid) -> Result<Event> {
        let event = self
            .db
            .events
            .find_by_id(event_id)
            .await?
            .ok_or(UniEventsError::EventNotFound { event_id })?;

        if event.organizer_id != organizer_id {
            return Err(UniEventsError::PermissionDenied(
                "You do not organize this event".to_string(),
            ));
        }

        Ok(event)
    }
}

/// Validate a creation request before it reaches the database
fn validate_event_request(request: &CreateEventRequest) -> Result<()> {
    if request.name.trim().is_empty() {
        return Err(UniEventsError::InvalidInput(
            "Event name is required".to_string(),
        ));
    }
    if request.category.trim().is_empty() {
        return Err(UniEventsError::InvalidInput(
            "Event category is required".to_string(),
        ));
    }
    if request.capacity <= 0 {
        return Err(UniEventsError::InvalidInput(
            "Capacity must be greater than 0".to_string(),
        ));
    }
    if request.end_datetime <= request.start_datetime {
        return Err(UniEventsError::InvalidInput(
            "Event end must be after its start".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn valid_request() -> CreateEventRequest {
        CreateEventRequest {
            name: "Tech Conference".to_string(),
            category: "Tech".to_string(),
            tags: vec!["ai".to_string()],
            location: "Main Hall".to_string(),
            start_datetime: Utc::now() + Duration::days(7),
            end_datetime: Utc::now() + Duration::days(8),
            capacity: 50,
            description: None,
            image_url: None,
            school: None,
            required_profile_fields: vec![],
        }
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(validate_event_request(&valid_request()).is_ok());
    }

    #[test]
    fn test_zero_capacity_is_rejected() {
        let mut request = valid_request();
        request.capacity = 0;
        assert!(validate_event_request(&request).is_err());
    }

    #[test]
    fn test_end_before_start_is_rejected() {
        let mut request = valid_request();
        request.end_datetime = request.start_datetime - Duration::hours(1);
        assert!(validate_event_request(&request).is_err());
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let mut request = valid_request();
        request.name = "   ".to_string();
        assert!(validate_event_request(&request).is_err());
    }
}
