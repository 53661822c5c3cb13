//! School model
//!
//! Schools exist purely for theming and filtering the event list.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct School {
    pub id: Uuid,
    pub name: String,
    pub background_image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}
