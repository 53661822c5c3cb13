//! Organizer dashboard handlers
//!
//! Every route here is scoped to events the caller organizes; services
//! enforce ownership and reject other callers with 403.

use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::middleware::CurrentUser;
use crate::models::event::{CreateEventRequest, UpdateEventRequest};
use crate::state::AppState;
use crate::utils::errors::Result;
use crate::utils::response::{created, empty_success, success};

#[derive(Debug, Default, Deserialize)]
pub struct OrganizerEventsQuery {
    #[serde(default)]
    pub include_archived: bool,
}

/// POST /api/v1/admin/events
pub async fn create_event(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(body): Json<CreateEventRequest>,
) -> Result<Response> {
    let event = state
        .services
        .event_service
        .create(current_user.user_id, body)
        .await?;

    Ok(created(event, "Event created").into_response())
}

/// GET /api/v1/admin/events
pub async fn list_events(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(query): Query<OrganizerEventsQuery>,
) -> Result<Response> {
    let events = state
        .services
        .event_service
        .list_for_organizer(current_user.user_id, query.include_archived)
        .await?;

    Ok(success(events, "Events listed").into_response())
}

/// PATCH /api/v1/admin/events/:id
pub async fn update_event(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(event_id): Path<Uuid>,
    Json(body): Json<UpdateEventRequest>,
) -> Result<Response> {
    let event = state
        .services
        .event_service
        .update(event_id, current_user.user_id, body)
        .await?;

    Ok(success(event, "Event updated").into_response())
}

/// POST /api/v1/admin/events/:id/lock
pub async fn lock_event(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(event_id): Path<Uuid>,
) -> Result<Response> {
    let event = state
        .services
        .event_service
        .set_locked(event_id, current_user.user_id, true)
        .await?;
    Ok(success(event, "Event locked").into_response())
}

/// POST /api/v1/admin/events/:id/unlock
pub async fn unlock_event(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(event_id): Path<Uuid>,
) -> Result<Response> {
    let event = state
        .services
        .event_service
        .set_locked(event_id, current_user.user_id, false)
        .await?;
    Ok(success(event, "Event unlocked").into_response())
}

/// POST /api/v1/admin/events/:id/archive
pub async fn archive_event(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(event_id): Path<Uuid>,
) -> Result<Response> {
    let event = state
        .services
        .event_service
        .set_archived(event_id, current_user.user_id, true)
        .await?;
    Ok(success(event, "Event archived").into_response())
}

/// POST /api/v1/admin/events/:id/unarchive
pub async fn unarchive_event(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(event_id): Path<Uuid>,
) -> Result<Response> {
    let event = state
        .services
        .event_service
        .set_archived(event_id, current_user.user_id, false)
        .await?;
    Ok(success(event, "Event unarchived").into_response())
}

/// DELETE /api/v1/admin/events/:id
pub async fn delete_event(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(event_id): Path<Uuid>,
) -> Result<Response> {
    state
        .services
        .event_service
        .delete(event_id, current_user.user_id)
        .await?;

    Ok(empty_success("Event deleted").into_response())
}

/// GET /api/v1/admin/events/:id/attendees
pub async fn list_attendees(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(event_id): Path<Uuid>,
) -> Result<Response> {
    let attendees = state
        .services
        .signup_service
        .attendees(event_id, current_user.user_id)
        .await?;

    Ok(success(attendees, "Attendees listed").into_response())
}

/// POST /api/v1/admin/signups/:id/promote
pub async fn promote_signup(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(signup_id): Path<Uuid>,
) -> Result<Response> {
    let signup = state
        .services
        .signup_service
        .promote(signup_id, current_user.user_id)
        .await?;

    Ok(success(signup, "Signup promoted to confirmed").into_response())
}

/// POST /api/v1/admin/signups/:id/demote
pub async fn demote_signup(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(signup_id): Path<Uuid>,
) -> Result<Response> {
    let signup = state
        .services
        .signup_service
        .demote(signup_id, current_user.user_id)
        .await?;

    Ok(success(signup, "Signup moved to waitlist").into_response())
}

/// DELETE /api/v1/admin/signups/:id
pub async fn remove_signup(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(signup_id): Path<Uuid>,
) -> Result<Response> {
    state
        .services
        .signup_service
        .remove(signup_id, current_user.user_id)
        .await?;

    Ok(empty_success("Signup removed").into_response())
}
