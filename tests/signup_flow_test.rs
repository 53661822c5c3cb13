//! Signup flow integration tests
//!
//! Exercises the capacity/waitlist admission rule, cancellation,
//! organizer promotion and demotion, and the profile-completeness gate
//! against a real PostgreSQL database.

mod helpers;

use assert_matches::assert_matches;
use serial_test::serial;

use unievents::database::service::DatabaseService;
use unievents::models::signup::SignupStatus;
use unievents::services::profile::ProfileService;
use unievents::services::signup::SignupService;
use unievents::utils::errors::UniEventsError;

use helpers::{test_data, upcoming_event_request, TestDatabase};

#[tokio::test]
#[serial]
async fn test_signups_confirm_until_capacity_then_waitlist() {
    let db = TestDatabase::new().await.expect("Failed to create test database");
    db.cleanup().await.expect("Failed to cleanup");

    let service = DatabaseService::new(db.pool.clone());
    let signups = SignupService::new(service.clone());

    let organizer = db.create_test_user(&test_data::random_email()).await.unwrap();
    let event = service
        .events
        .create(organizer.id, upcoming_event_request("Capacity Two", 2))
        .await
        .unwrap();

    let alice = db.create_test_user(&test_data::random_email()).await.unwrap();
    let bob = db.create_test_user(&test_data::random_email()).await.unwrap();
    let carol = db.create_test_user(&test_data::random_email()).await.unwrap();

    let first = signups.sign_up(event.id, alice.id).await.unwrap();
    let second = signups.sign_up(event.id, bob.id).await.unwrap();
    let third = signups.sign_up(event.id, carol.id).await.unwrap();

    assert_eq!(first.status, SignupStatus::Confirmed.as_str());
    assert_eq!(second.status, SignupStatus::Confirmed.as_str());
    assert_eq!(third.status, SignupStatus::Waitlisted.as_str());

    let with_counts = service.events.find_with_counts(event.id).await.unwrap().unwrap();
    assert_eq!(with_counts.confirmed_count, 2);
    assert_eq!(with_counts.waitlist_count, 1);
}

#[tokio::test]
#[serial]
async fn test_capacity_two_roster_lifecycle() {
    let db = TestDatabase::new().await.expect("Failed to create test database");
    db.cleanup().await.expect("Failed to cleanup");

    let service = DatabaseService::new(db.pool.clone());
    let signups = SignupService::new(service.clone());

    let organizer = db.create_test_user(&test_data::random_email()).await.unwrap();
    let event = service
        .events
        .create(organizer.id, upcoming_event_request("Two Seats", 2))
        .await
        .unwrap();

    let alice = db.create_test_user(&test_data::random_email()).await.unwrap();
    let bob = db.create_test_user(&test_data::random_email()).await.unwrap();
    let carol = db.create_test_user(&test_data::random_email()).await.unwrap();
    let dave = db.create_test_user(&test_data::random_email()).await.unwrap();

    // Two seats: first two confirmed, third waitlisted
    let a = signups.sign_up(event.id, alice.id).await.unwrap();
    let b = signups.sign_up(event.id, bob.id).await.unwrap();
    let c = signups.sign_up(event.id, carol.id).await.unwrap();
    assert!(a.is_confirmed());
    assert!(b.is_confirmed());
    assert!(c.is_waitlisted());

    // The organizer removes a confirmed attendee; the freed slot stays
    // empty until an explicit promotion
    signups.remove(a.id, organizer.id).await.unwrap();
    let carol_still = service.signups.find_by_id(c.id).await.unwrap().unwrap();
    assert!(carol_still.is_waitlisted());

    let promoted = signups.promote(c.id, organizer.id).await.unwrap();
    assert!(promoted.is_confirmed());

    // Back at capacity: a late signup waitlists and cannot be promoted
    let d = signups.sign_up(event.id, dave.id).await.unwrap();
    assert!(d.is_waitlisted());
    let err = signups.promote(d.id, organizer.id).await.unwrap_err();
    assert_matches!(err, UniEventsError::EventFull);

    let with_counts = service.events.find_with_counts(event.id).await.unwrap().unwrap();
    assert_eq!(with_counts.confirmed_count, 2);
    assert_eq!(with_counts.waitlist_count, 1);
}

#[tokio::test]
#[serial]
async fn test_duplicate_signup_is_rejected() {
    let db = TestDatabase::new().await.expect("Failed to create test database");
    db.cleanup().await.expect("Failed to cleanup");

    let service = DatabaseService::new(db.pool.clone());
    let signups = SignupService::new(service.clone());

    let organizer = db.create_test_user(&test_data::random_email()).await.unwrap();
    let event = service
        .events
        .create(organizer.id, upcoming_event_request("Dup Check", 10))
        .await
        .unwrap();
    let user = db.create_test_user(&test_data::random_email()).await.unwrap();

    signups.sign_up(event.id, user.id).await.unwrap();
    let err = signups.sign_up(event.id, user.id).await.unwrap_err();

    assert_matches!(err, UniEventsError::AlreadyRegistered);
    assert_eq!(service.signups.count().await.unwrap(), 1);
}

#[tokio::test]
#[serial]
async fn test_cancellation_frees_slot_without_auto_promotion() {
    let db = TestDatabase::new().await.expect("Failed to create test database");
    db.cleanup().await.expect("Failed to cleanup");

    let service = DatabaseService::new(db.pool.clone());
    let signups = SignupService::new(service.clone());

    let organizer = db.create_test_user(&test_data::random_email()).await.unwrap();
    let event = service
        .events
        .create(organizer.id, upcoming_event_request("One Seat", 1))
        .await
        .unwrap();

    let alice = db.create_test_user(&test_data::random_email()).await.unwrap();
    let bob = db.create_test_user(&test_data::random_email()).await.unwrap();

    signups.sign_up(event.id, alice.id).await.unwrap();
    let waitlisted = signups.sign_up(event.id, bob.id).await.unwrap();
    assert!(waitlisted.is_waitlisted());

    // Freeing the confirmed slot must not touch the waitlisted row
    signups.cancel(event.id, alice.id).await.unwrap();

    let still_waitlisted = service
        .signups
        .find_by_id(waitlisted.id)
        .await
        .unwrap()
        .unwrap();
    assert!(still_waitlisted.is_waitlisted());

    let with_counts = service.events.find_with_counts(event.id).await.unwrap().unwrap();
    assert_eq!(with_counts.confirmed_count, 0);
    assert_eq!(with_counts.waitlist_count, 1);
}

#[tokio::test]
#[serial]
async fn test_cancelling_without_a_signup_reports_the_event() {
    let db = TestDatabase::new().await.expect("Failed to create test database");
    db.cleanup().await.expect("Failed to cleanup");

    let service = DatabaseService::new(db.pool.clone());
    let signups = SignupService::new(service.clone());

    let organizer = db.create_test_user(&test_data::random_email()).await.unwrap();
    let event = service
        .events
        .create(organizer.id, upcoming_event_request("Never Joined", 5))
        .await
        .unwrap();
    let user = db.create_test_user(&test_data::random_email()).await.unwrap();

    let err = signups.cancel(event.id, user.id).await.unwrap_err();
    assert_matches!(err, UniEventsError::NotRegistered { event_id } if event_id == event.id);
}

#[tokio::test]
#[serial]
async fn test_promotion_requires_a_free_slot() {
    let db = TestDatabase::new().await.expect("Failed to create test database");
    db.cleanup().await.expect("Failed to cleanup");

    let service = DatabaseService::new(db.pool.clone());
    let signups = SignupService::new(service.clone());

    let organizer = db.create_test_user(&test_data::random_email()).await.unwrap();
    let event = service
        .events
        .create(organizer.id, upcoming_event_request("Promotion", 1))
        .await
        .unwrap();

    let alice = db.create_test_user(&test_data::random_email()).await.unwrap();
    let bob = db.create_test_user(&test_data::random_email()).await.unwrap();

    signups.sign_up(event.id, alice.id).await.unwrap();
    let waitlisted = signups.sign_up(event.id, bob.id).await.unwrap();

    // Event still full, promotion must fail
    let err = signups.promote(waitlisted.id, organizer.id).await.unwrap_err();
    assert_matches!(err, UniEventsError::EventFull);

    // After the confirmed attendee cancels, promotion succeeds
    signups.cancel(event.id, alice.id).await.unwrap();
    let promoted = signups.promote(waitlisted.id, organizer.id).await.unwrap();
    assert!(promoted.is_confirmed());

    // A confirmed signup cannot be promoted again
    let err = signups.promote(waitlisted.id, organizer.id).await.unwrap_err();
    assert_matches!(err, UniEventsError::InvalidInput(_));
}

#[tokio::test]
#[serial]
async fn test_demote_and_remove_are_organizer_only() {
    let db = TestDatabase::new().await.expect("Failed to create test database");
    db.cleanup().await.expect("Failed to cleanup");

    let service = DatabaseService::new(db.pool.clone());
    let signups = SignupService::new(service.clone());

    let organizer = db.create_test_user(&test_data::random_email()).await.unwrap();
    let stranger = db.create_test_user(&test_data::random_email()).await.unwrap();
    let event = service
        .events
        .create(organizer.id, upcoming_event_request("Roster", 5))
        .await
        .unwrap();

    let user = db.create_test_user(&test_data::random_email()).await.unwrap();
    let signup = signups.sign_up(event.id, user.id).await.unwrap();
    assert!(signup.is_confirmed());

    let err = signups.demote(signup.id, stranger.id).await.unwrap_err();
    assert_matches!(err, UniEventsError::PermissionDenied(_));

    let demoted = signups.demote(signup.id, organizer.id).await.unwrap();
    assert!(demoted.is_waitlisted());

    signups.remove(signup.id, organizer.id).await.unwrap();
    assert!(service.signups.find_by_id(signup.id).await.unwrap().is_none());
}

#[tokio::test]
#[serial]
async fn test_locked_and_archived_events_refuse_signups() {
    let db = TestDatabase::new().await.expect("Failed to create test database");
    db.cleanup().await.expect("Failed to cleanup");

    let service = DatabaseService::new(db.pool.clone());
    let signups = SignupService::new(service.clone());

    let organizer = db.create_test_user(&test_data::random_email()).await.unwrap();
    let user = db.create_test_user(&test_data::random_email()).await.unwrap();

    let locked = service
        .events
        .create(organizer.id, upcoming_event_request("Locked", 5))
        .await
        .unwrap();
    db.execute_sql(&format!("UPDATE events SET is_locked = true WHERE id = '{}'", locked.id))
        .await
        .unwrap();

    let err = signups.sign_up(locked.id, user.id).await.unwrap_err();
    assert_matches!(err, UniEventsError::EventLocked);

    let archived = service
        .events
        .create(organizer.id, upcoming_event_request("Archived", 5))
        .await
        .unwrap();
    db.execute_sql(&format!("UPDATE events SET is_archived = true WHERE id = '{}'", archived.id))
        .await
        .unwrap();

    let err = signups.sign_up(archived.id, user.id).await.unwrap_err();
    assert_matches!(err, UniEventsError::EventArchived);
}

#[tokio::test]
#[serial]
async fn test_required_profile_fields_gate_signup() {
    let db = TestDatabase::new().await.expect("Failed to create test database");
    db.cleanup().await.expect("Failed to cleanup");

    let service = DatabaseService::new(db.pool.clone());
    let signups = SignupService::new(service.clone());
    let profiles = ProfileService::new(service.clone());

    let organizer = db.create_test_user(&test_data::random_email()).await.unwrap();
    let mut request = upcoming_event_request("Catered Dinner", 10);
    request.required_profile_fields =
        vec!["first_name".to_string(), "dietary_restrictions".to_string()];
    let event = service.events.create(organizer.id, request).await.unwrap();

    let user = db.create_test_user(&test_data::random_email()).await.unwrap();

    let err = signups.sign_up(event.id, user.id).await.unwrap_err();
    assert_matches!(err, UniEventsError::IncompleteProfile(_));

    // A partial profile still misses dietary_restrictions
    profiles
        .upsert(user.id, test_data::partial_profile_request())
        .await
        .unwrap();
    let err = signups.sign_up(event.id, user.id).await.unwrap_err();
    assert_matches!(err, UniEventsError::IncompleteProfile(missing) if missing.contains("dietary_restrictions"));

    profiles
        .upsert(user.id, test_data::complete_profile_request())
        .await
        .unwrap();
    let signup = signups.sign_up(event.id, user.id).await.unwrap();
    assert!(signup.is_confirmed());
}

#[tokio::test]
#[serial]
async fn test_attendee_roster_in_signup_order_for_the_organizer_only() {
    let db = TestDatabase::new().await.expect("Failed to create test database");
    db.cleanup().await.expect("Failed to cleanup");

    let service = DatabaseService::new(db.pool.clone());
    let signups = SignupService::new(service.clone());

    let organizer = db.create_test_user(&test_data::random_email()).await.unwrap();
    let stranger = db.create_test_user(&test_data::random_email()).await.unwrap();
    let event = service
        .events
        .create(organizer.id, upcoming_event_request("Roster Order", 1))
        .await
        .unwrap();

    let alice = db.create_test_user(&test_data::random_email()).await.unwrap();
    let bob = db.create_test_user(&test_data::random_email()).await.unwrap();
    signups.sign_up(event.id, alice.id).await.unwrap();
    signups.sign_up(event.id, bob.id).await.unwrap();

    let err = signups.attendees(event.id, stranger.id).await.unwrap_err();
    assert_matches!(err, UniEventsError::PermissionDenied(_));

    let roster = signups.attendees(event.id, organizer.id).await.unwrap();
    assert_eq!(roster.len(), 2);
    assert_eq!(roster[0].user_id, alice.id);
    assert_eq!(roster[0].status, SignupStatus::Confirmed.as_str());
    assert_eq!(roster[1].user_id, bob.id);
    assert_eq!(roster[1].status, SignupStatus::Waitlisted.as_str());
}

#[tokio::test]
#[serial]
async fn test_my_signups_lists_event_details_and_counts() {
    let db = TestDatabase::new().await.expect("Failed to create test database");
    db.cleanup().await.expect("Failed to cleanup");

    let service = DatabaseService::new(db.pool.clone());
    let signups = SignupService::new(service.clone());

    let organizer = db.create_test_user(&test_data::random_email()).await.unwrap();
    let event = service
        .events
        .create(organizer.id, upcoming_event_request("Mine", 3))
        .await
        .unwrap();
    let user = db.create_test_user(&test_data::random_email()).await.unwrap();

    signups.sign_up(event.id, user.id).await.unwrap();

    let mine = signups.list_for_user(user.id, false).await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].name, "Mine");
    assert_eq!(mine[0].confirmed_count, 1);
    assert_eq!(mine[0].status, SignupStatus::Confirmed.as_str());

    // Upcoming events do not appear in the expired listing
    let expired = signups.list_for_user(user.id, true).await.unwrap();
    assert!(expired.is_empty());
}
