//! Signup handlers: event registration, cancellation, and "My Sign-ups"

use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use uuid::Uuid;

use crate::middleware::CurrentUser;
use crate::state::AppState;
use crate::utils::errors::Result;
use crate::utils::response::{created, empty_success, success};

#[derive(Debug, Default, Deserialize)]
pub struct MySignupsQuery {
    /// When true, show past events instead of upcoming ones
    #[serde(default)]
    pub expired: bool,
}

/// POST /api/v1/events/:id/signups
///
/// The admission rule: confirmed when the event has open capacity at the
/// instant of the check, waitlisted otherwise.
pub async fn sign_up(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(event_id): Path<Uuid>,
) -> Result<Response> {
    let signup = state
        .services
        .signup_service
        .sign_up(event_id, current_user.user_id)
        .await?;

    let message = match signup.status.as_str() {
        "confirmed" => "You are registered for this event",
        _ => "The event is full; you have been added to the waitlist",
    };
    Ok(created(signup, message).into_response())
}

/// DELETE /api/v1/events/:id/signups/me
pub async fn cancel_signup(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(event_id): Path<Uuid>,
) -> Result<Response> {
    state
        .services
        .signup_service
        .cancel(event_id, current_user.user_id)
        .await?;

    Ok(empty_success("Signup cancelled").into_response())
}

/// GET /api/v1/me/signups
pub async fn my_signups(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(query): Query<MySignupsQuery>,
) -> Result<Response> {
    let signups = state
        .services
        .signup_service
        .list_for_user(current_user.user_id, query.expired)
        .await?;

    Ok(success(signups, "Signups listed").into_response())
}
