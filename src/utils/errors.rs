//! Error handling for UniEvents
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy, including the mapping of
//! every error onto an HTTP status and a stable machine-readable code.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;
use uuid::Uuid;

use crate::utils::response::error as error_response;

/// Main error type for the UniEvents application
#[derive(Error, Debug)]
pub enum UniEventsError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("User not found: {user_id}")]
    UserNotFound { user_id: Uuid },

    #[error("Event not found: {event_id}")]
    EventNotFound { event_id: Uuid },

    #[error("Signup not found: {signup_id}")]
    SignupNotFound { signup_id: Uuid },

    #[error("You have no signup for event {event_id}")]
    NotRegistered { event_id: Uuid },

    #[error("You are already registered for this event")]
    AlreadyRegistered,

    #[error("Event is at full capacity")]
    EventFull,

    #[error("Event is locked and not accepting signups")]
    EventLocked,

    #[error("Event is archived")]
    EventArchived,

    #[error("Profile is missing required fields: {0}")]
    IncompleteProfile(String),

    #[error("An account with this email already exists")]
    EmailTaken,

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

/// Result type alias for UniEvents operations
pub type Result<T> = std::result::Result<T, UniEventsError>;

impl UniEventsError {
    /// HTTP status the error maps to
    pub fn status_code(&self) -> StatusCode {
        match self {
            UniEventsError::Database(_)
            | UniEventsError::Migration(_)
            | UniEventsError::Redis(_)
            | UniEventsError::Serialization(_)
            | UniEventsError::Io(_)
            | UniEventsError::UrlParse(_)
            | UniEventsError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            UniEventsError::Token(_) | UniEventsError::Authentication(_) => {
                StatusCode::UNAUTHORIZED
            }
            UniEventsError::PermissionDenied(_) => StatusCode::FORBIDDEN,
            UniEventsError::UserNotFound { .. }
            | UniEventsError::EventNotFound { .. }
            | UniEventsError::SignupNotFound { .. }
            | UniEventsError::NotRegistered { .. } => StatusCode::NOT_FOUND,
            UniEventsError::AlreadyRegistered
            | UniEventsError::EventFull
            | UniEventsError::EmailTaken => StatusCode::CONFLICT,
            UniEventsError::EventLocked
            | UniEventsError::EventArchived
            | UniEventsError::IncompleteProfile(_) => StatusCode::UNPROCESSABLE_ENTITY,
            UniEventsError::RateLimitExceeded => StatusCode::TOO_MANY_REQUESTS,
            UniEventsError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            UniEventsError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Stable machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            UniEventsError::Database(_) => "DATABASE_ERROR",
            UniEventsError::Migration(_) => "MIGRATION_ERROR",
            UniEventsError::Redis(_) => "SESSION_STORE_ERROR",
            UniEventsError::Serialization(_) => "SERIALIZATION_ERROR",
            UniEventsError::Io(_) => "IO_ERROR",
            UniEventsError::UrlParse(_) => "URL_ERROR",
            UniEventsError::Config(_) => "CONFIG_ERROR",
            UniEventsError::Token(_) => "INVALID_TOKEN",
            UniEventsError::Authentication(_) => "AUTH_ERROR",
            UniEventsError::PermissionDenied(_) => "FORBIDDEN",
            UniEventsError::UserNotFound { .. } => "USER_NOT_FOUND",
            UniEventsError::EventNotFound { .. } => "EVENT_NOT_FOUND",
            UniEventsError::SignupNotFound { .. } => "SIGNUP_NOT_FOUND",
            UniEventsError::NotRegistered { .. } => "NOT_REGISTERED",
            UniEventsError::AlreadyRegistered => "ALREADY_REGISTERED",
            UniEventsError::EventFull => "EVENT_FULL",
            UniEventsError::EventLocked => "EVENT_LOCKED",
            UniEventsError::EventArchived => "EVENT_ARCHIVED",
            UniEventsError::IncompleteProfile(_) => "INCOMPLETE_PROFILE",
            UniEventsError::EmailTaken => "EMAIL_TAKEN",
            UniEventsError::RateLimitExceeded => "RATE_LIMITED",
            UniEventsError::InvalidInput(_) => "VALIDATION_ERROR",
            UniEventsError::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
        }
    }

    /// Message safe to show to API clients
    fn public_message(&self) -> String {
        match self {
            // Infrastructure detail stays in the logs
            UniEventsError::Database(_) | UniEventsError::Migration(_) => {
                "A database error occurred".to_string()
            }
            UniEventsError::Redis(_) => "A session store error occurred".to_string(),
            UniEventsError::Serialization(_)
            | UniEventsError::Io(_)
            | UniEventsError::UrlParse(_)
            | UniEventsError::Config(_) => "An internal error occurred".to_string(),
            UniEventsError::Token(_) => "Invalid or expired token".to_string(),
            other => other.to_string(),
        }
    }
}

/// Map a sqlx error to the domain conflict it represents, if any.
///
/// The signups table carries a UNIQUE (event_id, user_id) constraint; a
/// 23505 from an insert there means the user already holds a signup.
pub fn map_unique_violation(err: sqlx::Error, conflict: UniEventsError) -> UniEventsError {
    if let sqlx::Error::Database(ref db_err) = err {
        if db_err.code().as_deref() == Some("23505") {
            return conflict;
        }
    }
    UniEventsError::Database(err)
}

impl IntoResponse for UniEventsError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code();

        if status.is_server_error() {
            error!(error = ?self, code = code, "Request failed with server error");
        }

        error_response(code, self.public_message(), status)
    }
}
