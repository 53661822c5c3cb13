//! Event model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub tags: Vec<String>,
    pub location: String,
    pub start_datetime: DateTime<Utc>,
    pub end_datetime: DateTime<Utc>,
    pub capacity: i32,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub school: Option<String>,
    pub organizer_id: Uuid,
    pub is_locked: bool,
    pub is_archived: bool,
    pub required_profile_fields: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// Whether the event has already finished
    pub fn has_ended(&self, now: DateTime<Utc>) -> bool {
        self.end_datetime < now
    }
}

/// Event together with its signup counts, as shown in listings
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EventWithCounts {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub event: Event,
    pub confirmed_count: i64,
    pub waitlist_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEventRequest {
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub location: String,
    pub start_datetime: DateTime<Utc>,
    pub end_datetime: DateTime<Utc>,
    pub capacity: i32,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub school: Option<String>,
    #[serde(default)]
    pub required_profile_fields: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateEventRequest {
    pub name: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub location: Option<String>,
    pub start_datetime: Option<DateTime<Utc>>,
    pub end_datetime: Option<DateTime<Utc>>,
    pub capacity: Option<i32>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub school: Option<String>,
    pub is_locked: Option<bool>,
    pub is_archived: Option<bool>,
    pub required_profile_fields: Option<Vec<String>>,
}

/// Filters accepted by the public event listing
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    pub search: Option<String>,
    pub categories: Vec<String>,
    pub school: Option<String>,
    pub include_expired: bool,
}
