//! Authentication handlers
//!
//! Password sign-up/sign-in, session retrieval, sign-out, and the
//! password-reset flow. Login and signup are rate-limited per client IP.

use std::net::SocketAddr;

use axum::extract::{ConnectInfo, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::middleware::CurrentUser;
use crate::models::user::UserView;
use crate::state::AppState;
use crate::utils::errors::{Result, UniEventsError};
use crate::utils::response::{created, empty_success, success};

#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct ResetRequest {
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub token: String,
    pub new_password: String,
}

#[derive(Debug, Serialize)]
struct AuthPayload {
    user: UserView,
    token: String,
}

#[derive(Debug, Serialize)]
struct ResetPayload {
    /// Present when the email matched an account. There is no mail
    /// transport in this service; the client is responsible for delivery.
    reset_token: Option<String>,
}

/// POST /api/v1/auth/signup
pub async fn sign_up(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Json(body): Json<CredentialsRequest>,
) -> Result<Response> {
    state.rate_limiter.check(&addr.ip().to_string())?;

    let outcome = state
        .services
        .auth_service
        .sign_up(&body.email, &body.password)
        .await?;

    let payload = AuthPayload {
        user: outcome.user.into(),
        token: outcome.token,
    };
    Ok(created(payload, "Account created").into_response())
}

/// POST /api/v1/auth/login
pub async fn sign_in(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Json(body): Json<CredentialsRequest>,
) -> Result<Response> {
    state.rate_limiter.check(&addr.ip().to_string())?;

    let outcome = state
        .services
        .auth_service
        .sign_in(&body.email, &body.password)
        .await?;

    let payload = AuthPayload {
        user: outcome.user.into(),
        token: outcome.token,
    };
    Ok(success(payload, "Signed in").into_response())
}

/// POST /api/v1/auth/logout
pub async fn sign_out(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> Result<Response> {
    state
        .services
        .auth_service
        .sign_out(&current_user.token)
        .await?;

    Ok(empty_success("Signed out").into_response())
}

/// GET /api/v1/auth/session
pub async fn session(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> Result<Response> {
    let user = state
        .db
        .users
        .find_by_id(current_user.user_id)
        .await?
        .ok_or(UniEventsError::UserNotFound {
            user_id: current_user.user_id,
        })?;

    Ok(success(UserView::from(user), "Session is valid").into_response())
}

/// POST /api/v1/auth/reset-request
pub async fn reset_request(
    State(state): State<AppState>,
    Json(body): Json<ResetRequest>,
) -> Result<Response> {
    let reset_token = state
        .services
        .auth_service
        .request_password_reset(&body.email)
        .await?;

    // Same response shape whether or not the account exists
    let payload = ResetPayload { reset_token };
    Ok(success(payload, "If the account exists, a reset token was issued").into_response())
}

/// POST /api/v1/auth/reset-password
pub async fn reset_password(
    State(state): State<AppState>,
    Json(body): Json<ResetPasswordRequest>,
) -> Result<Response> {
    state
        .services
        .auth_service
        .reset_password(&body.token, &body.new_password)
        .await?;

    Ok(empty_success("Password updated").into_response())
}
