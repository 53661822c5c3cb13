//! Event discovery and organizer management integration tests

mod helpers;

use assert_matches::assert_matches;
use serial_test::serial;

use unievents::database::service::DatabaseService;
use unievents::models::event::{EventFilter, UpdateEventRequest};
use unievents::services::event::EventService;
use unievents::utils::errors::UniEventsError;

use helpers::{test_data, upcoming_event_request, TestDatabase};

async fn setup() -> (TestDatabase, DatabaseService, EventService) {
    let db = TestDatabase::new().await.expect("Failed to create test database");
    db.cleanup().await.expect("Failed to cleanup");

    let service = DatabaseService::new(db.pool.clone());
    let events = EventService::new(service.clone(), test_data::test_settings());
    (db, service, events)
}

#[tokio::test]
#[serial]
async fn test_public_listing_filters_by_search_category_and_school() {
    let (db, _service, events) = setup().await;

    let organizer = db.create_test_user(&test_data::random_email()).await.unwrap();

    let mut salsa = upcoming_event_request("Salsa Night", 30);
    salsa.category = "Dance".to_string();
    salsa.school = Some("Uppsala".to_string());
    events.create(organizer.id, salsa).await.unwrap();

    let mut quiz = upcoming_event_request("Pub Quiz", 40);
    quiz.category = "Social".to_string();
    quiz.school = Some("Lund".to_string());
    events.create(organizer.id, quiz).await.unwrap();

    let all = events.list_public(EventFilter::default()).await.unwrap();
    assert_eq!(all.len(), 2);

    let by_search = events
        .list_public(EventFilter {
            search: Some("salsa".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(by_search.len(), 1);
    assert_eq!(by_search[0].event.name, "Salsa Night");

    let by_category = events
        .list_public(EventFilter {
            categories: vec!["Social".to_string()],
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(by_category.len(), 1);
    assert_eq!(by_category[0].event.name, "Pub Quiz");

    let by_school = events
        .list_public(EventFilter {
            school: Some("Uppsala".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(by_school.len(), 1);
    assert_eq!(by_school[0].event.name, "Salsa Night");
}

#[tokio::test]
#[serial]
async fn test_expired_events_hidden_unless_requested() {
    let (db, _service, events) = setup().await;

    let organizer = db.create_test_user(&test_data::random_email()).await.unwrap();
    let past = events
        .create(organizer.id, upcoming_event_request("Last Week", 10))
        .await
        .unwrap();
    db.execute_sql(&format!(
        "UPDATE events SET start_datetime = NOW() - INTERVAL '8 days', end_datetime = NOW() - INTERVAL '7 days' WHERE id = '{}'",
        past.id
    ))
    .await
    .unwrap();

    let upcoming_only = events.list_public(EventFilter::default()).await.unwrap();
    assert!(upcoming_only.is_empty());

    let with_expired = events
        .list_public(EventFilter {
            include_expired: true,
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(with_expired.len(), 1);
}

#[tokio::test]
#[serial]
async fn test_archived_events_do_not_surface_in_public_listing() {
    let (db, _service, events) = setup().await;

    let organizer = db.create_test_user(&test_data::random_email()).await.unwrap();
    let event = events
        .create(organizer.id, upcoming_event_request("Hidden Soon", 10))
        .await
        .unwrap();

    events.set_archived(event.id, organizer.id, true).await.unwrap();
    assert!(events.list_public(EventFilter::default()).await.unwrap().is_empty());

    // The organizer dashboard still sees it when asked
    let dashboard = events.list_for_organizer(organizer.id, true).await.unwrap();
    assert_eq!(dashboard.len(), 1);
    assert!(dashboard[0].event.is_archived);

    events.set_archived(event.id, organizer.id, false).await.unwrap();
    assert_eq!(events.list_public(EventFilter::default()).await.unwrap().len(), 1);
}

#[tokio::test]
#[serial]
async fn test_update_and_delete_require_ownership() {
    let (db, service, events) = setup().await;

    let organizer = db.create_test_user(&test_data::random_email()).await.unwrap();
    let stranger = db.create_test_user(&test_data::random_email()).await.unwrap();
    let event = events
        .create(organizer.id, upcoming_event_request("Owned", 10))
        .await
        .unwrap();

    let rename = UpdateEventRequest {
        name: Some("Renamed".to_string()),
        ..Default::default()
    };

    let err = events
        .update(event.id, stranger.id, rename.clone())
        .await
        .unwrap_err();
    assert_matches!(err, UniEventsError::PermissionDenied(_));

    let updated = events.update(event.id, organizer.id, rename).await.unwrap();
    assert_eq!(updated.name, "Renamed");

    let err = events.delete(event.id, stranger.id).await.unwrap_err();
    assert_matches!(err, UniEventsError::PermissionDenied(_));

    events.delete(event.id, organizer.id).await.unwrap();
    assert!(service.events.find_by_id(event.id).await.unwrap().is_none());
}

#[tokio::test]
#[serial]
async fn test_deleting_an_event_cascades_to_signups() {
    let (db, service, events) = setup().await;

    let organizer = db.create_test_user(&test_data::random_email()).await.unwrap();
    let user = db.create_test_user(&test_data::random_email()).await.unwrap();
    let event = events
        .create(organizer.id, upcoming_event_request("Doomed", 10))
        .await
        .unwrap();

    let signups = unievents::services::signup::SignupService::new(service.clone());
    signups.sign_up(event.id, user.id).await.unwrap();
    assert_eq!(db.count_records("signups").await.unwrap(), 1);

    events.delete(event.id, organizer.id).await.unwrap();
    assert_eq!(db.count_records("signups").await.unwrap(), 0);
}

#[tokio::test]
#[serial]
async fn test_share_url_embeds_event_id_and_welcome_flag() {
    let (db, _service, events) = setup().await;

    let organizer = db.create_test_user(&test_data::random_email()).await.unwrap();
    let event = events
        .create(organizer.id, upcoming_event_request("Linked", 10))
        .await
        .unwrap();

    let url = events.share_url(event.id).await.unwrap();
    assert!(url.starts_with("https://events.test"));
    assert!(url.contains(&format!("event={}", event.id)));
    assert!(url.contains("welcome=1"));

    let err = events.share_url(uuid::Uuid::new_v4()).await.unwrap_err();
    assert_matches!(err, UniEventsError::EventNotFound { .. });
}

#[tokio::test]
#[serial]
async fn test_categories_are_distinct_and_sorted() {
    let (db, _service, events) = setup().await;

    let organizer = db.create_test_user(&test_data::random_email()).await.unwrap();
    for (name, category) in [("A", "Social"), ("B", "Dance"), ("C", "Social")] {
        let mut request = upcoming_event_request(name, 10);
        request.category = category.to_string();
        events.create(organizer.id, request).await.unwrap();
    }

    let categories = events.categories().await.unwrap();
    assert_eq!(categories, vec!["Dance".to_string(), "Social".to_string()]);
}
