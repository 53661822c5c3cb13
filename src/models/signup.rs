//! Signup model
//!
//! A signup holds a two-valued status: `confirmed` counts against event
//! capacity, `waitlisted` is held pending a freed slot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Signup {
    pub id: Uuid,
    pub event_id: Uuid,
    pub user_id: Uuid,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl Signup {
    pub fn is_confirmed(&self) -> bool {
        self.status == SignupStatus::Confirmed.as_str()
    }

    pub fn is_waitlisted(&self) -> bool {
        self.status == SignupStatus::Waitlisted.as_str()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignupStatus {
    Confirmed,
    Waitlisted,
}

impl SignupStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignupStatus::Confirmed => "confirmed",
            SignupStatus::Waitlisted => "waitlisted",
        }
    }
}

impl std::fmt::Display for SignupStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Roster row: a signup joined with the holder's profile fields
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AttendeeRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub student_number: Option<String>,
    pub age: Option<i32>,
    pub dietary_restrictions: Option<String>,
}

/// A signup joined with its event, as shown on the "My Sign-ups" page
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SignupWithEvent {
    pub signup_id: Uuid,
    pub status: String,
    pub signed_up_at: DateTime<Utc>,
    pub event_id: Uuid,
    pub name: String,
    pub category: String,
    pub location: String,
    pub start_datetime: DateTime<Utc>,
    pub end_datetime: DateTime<Utc>,
    pub capacity: i32,
    pub image_url: Option<String>,
    pub confirmed_count: i64,
    pub waitlist_count: i64,
}
