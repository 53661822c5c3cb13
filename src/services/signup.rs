//! Signup service implementation
//!
//! This service owns the capacity/waitlist admission rule and every status
//! transition a signup can go through: admission at signup time, manual
//! promotion and demotion by the organizer, cancellation, and removal.

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::database::service::DatabaseService;
use crate::models::signup::{AttendeeRow, Signup, SignupStatus, SignupWithEvent};
use crate::utils::errors::{Result, UniEventsError};
use crate::utils::logging::log_signup_action;

/// Decide the status of a new signup given the current confirmed count.
///
/// Confirmed iff the event has open capacity at the instant of the check.
/// The check and the following insert are not atomic; two concurrent
/// signups can both observe open capacity and race past the cap. That gap
/// is inherited from the source system and left unaddressed.
pub fn admission_status(confirmed_count: i64, capacity: i32) -> SignupStatus {
    if confirmed_count < capacity as i64 {
        SignupStatus::Confirmed
    } else {
        SignupStatus::Waitlisted
    }
}

/// Signup service for admissions and roster management
#[derive(Clone)]
pub struct SignupService {
    db: DatabaseService,
}

impl SignupService {
    /// Create a new SignupService instance
    pub fn new(db: DatabaseService) -> Self {
        Self { db }
    }

    /// Sign a user up for an event, confirming or waitlisting them.
    ///
    /// Rejects archived, locked, and already-ended events, and signup
    /// attempts from users whose profile lacks a required field. A second
    /// attempt by the same user surfaces as "already registered".
    pub async fn sign_up(&self, event_id: Uuid, user_id: Uuid) -> Result<Signup> {
        let event = self
            .db
            .events
            .find_by_id(event_id)
            .await?
            .ok_or(UniEventsError::EventNotFound { event_id })?;

        if event.is_archived {
            return Err(UniEventsError::EventArchived);
        }
        if event.is_locked {
            return Err(UniEventsError::EventLocked);
        }
        if event.has_ended(Utc::now()) {
            return Err(UniEventsError::EventLocked);
        }

        if !event.required_profile_fields.is_empty() {
            let profile = self
                .db
                .profiles
                .find_by_user_id(user_id)
                .await?
                .unwrap_or_else(|| crate::models::profile::Profile::empty(user_id));

            let missing = profile.missing_fields(&event.required_profile_fields);
            if !missing.is_empty() {
                debug!(user_id = %user_id, event_id = %event_id, missing = ?missing, "Signup blocked on incomplete profile");
                return Err(UniEventsError::IncompleteProfile(missing.join(", ")));
            }
        }

        if self
            .db
            .signups
            .find_by_event_and_user(event_id, user_id)
            .await?
            .is_some()
        {
            return Err(UniEventsError::AlreadyRegistered);
        }

        let confirmed = self
            .db
            .signups
            .count_by_status(event_id, SignupStatus::Confirmed)
            .await?;
        let status = admission_status(confirmed, event.capacity);

        // The unique constraint backstops the existence check above
        let signup = self.db.signups.create(event_id, user_id, status).await?;

        log_signup_action(event_id, user_id, "sign_up", status.as_str());
        Ok(signup)
    }

    /// Cancel the caller's own signup for an event.
    ///
    /// Deleting a confirmed signup never auto-promotes a waitlisted one;
    /// promotion is always an explicit organizer action.
    pub async fn cancel(&self, event_id: Uuid, user_id: Uuid) -> Result<()> {
        let signup = self
            .db
            .signups
            .find_by_event_and_user(event_id, user_id)
            .await?
            .ok_or(UniEventsError::NotRegistered { event_id })?;

        self.db.signups.delete(signup.id).await?;
        log_signup_action(event_id, user_id, "cancel", &signup.status);
        Ok(())
    }

    /// Promote a waitlisted signup into a freed confirmed slot.
    ///
    /// Rejected when the confirmed count already equals capacity, or when
    /// the target signup is not waitlisted.
    pub async fn promote(&self, signup_id: Uuid, organizer_id: Uuid) -> Result<Signup> {
        let signup = self.signup_owned_by(signup_id, organizer_id).await?;

        if !signup.is_waitlisted() {
            return Err(UniEventsError::InvalidInput(
                "Only waitlisted signups can be promoted".to_string(),
            ));
        }

        let event = self
            .db
            .events
            .find_by_id(signup.event_id)
            .await?
            .ok_or(UniEventsError::EventNotFound {
                event_id: signup.event_id,
            })?;

        let confirmed = self
            .db
            .signups
            .count_by_status(signup.event_id, SignupStatus::Confirmed)
            .await?;
        if confirmed >= event.capacity as i64 {
            return Err(UniEventsError::EventFull);
        }

        let updated = self
            .db
            .signups
            .update_status(signup_id, SignupStatus::Confirmed)
            .await?;

        info!(signup_id = %signup_id, event_id = %signup.event_id, "Waitlisted signup promoted");
        Ok(updated)
    }

    /// Move a confirmed signup back onto the waitlist
    pub async fn demote(&self, signup_id: Uuid, organizer_id: Uuid) -> Result<Signup> {
        let signup = self.signup_owned_by(signup_id, organizer_id).await?;

        if !signup.is_confirmed() {
            return Err(UniEventsError::InvalidInput(
                "Only confirmed signups can be demoted".to_string(),
            ));
        }

        let updated = self
            .db
            .signups
            .update_status(signup_id, SignupStatus::Waitlisted)
            .await?;

        info!(signup_id = %signup_id, event_id = %signup.event_id, "Confirmed signup demoted to waitlist");
        Ok(updated)
    }

    /// Remove a signup from the roster. Never auto-promotes.
    pub async fn remove(&self, signup_id: Uuid, organizer_id: Uuid) -> Result<()> {
        let signup = self.signup_owned_by(signup_id, organizer_id).await?;

        self.db.signups.delete(signup_id).await?;
        log_signup_action(signup.event_id, signup.user_id, "remove", &signup.status);
        Ok(())
    }

    /// Roster for an event the organizer owns, insertion order
    pub async fn attendees(&self, event_id: Uuid, organizer_id: Uuid) -> Result<Vec<AttendeeRow>> {
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

        self.db.signups.list_attendees(event_id).await
    }

    /// The caller's signups joined with their events
    pub async fn list_for_user(&self, user_id: Uuid, expired: bool) -> Result<Vec<SignupWithEvent>> {
        self.db.signups.list_for_user(user_id, expired).await
    }

    /// Load a signup and verify the caller organizes its event
    async fn signup_owned_by(&self, signup_id: Uuid, organizer_id: Uuid) -> Result<Signup> {
        let signup = self
            .db
            .signups
            .find_by_id(signup_id)
            .await?
            .ok_or(UniEventsError::SignupNotFound { signup_id })?;

        let event = self
            .db
            .events
            .find_by_id(signup.event_id)
            .await?
            .ok_or(UniEventsError::EventNotFound {
                event_id: signup.event_id,
            })?;

        if event.organizer_id != organizer_id {
            return Err(UniEventsError::PermissionDenied(
                "You do not organize this event".to_string(),
            ));
        }

        Ok(signup)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_admission_confirms_below_capacity() {
        assert_eq!(admission_status(0, 50), SignupStatus::Confirmed);
        assert_eq!(admission_status(49, 50), SignupStatus::Confirmed);
    }

    #[test]
    fn test_admission_waitlists_at_capacity() {
        assert_eq!(admission_status(50, 50), SignupStatus::Waitlisted);
        assert_eq!(admission_status(51, 50), SignupStatus::Waitlisted);
    }

    #[test]
    fn test_admission_with_zero_capacity_always_waitlists() {
        assert_eq!(admission_status(0, 0), SignupStatus::Waitlisted);
    }

    proptest! {
        #[test]
        fn prop_admission_matches_capacity_comparison(confirmed in 0i64..10_000, capacity in 0i32..10_000) {
            let status = admission_status(confirmed, capacity);
            if confirmed < capacity as i64 {
                prop_assert_eq!(status, SignupStatus::Confirmed);
            } else {
                prop_assert_eq!(status, SignupStatus::Waitlisted);
            }
        }
    }
}
