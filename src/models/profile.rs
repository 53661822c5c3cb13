//! Profile model
//!
//! A profile row shares its primary key with the owning user account.
//! All fields are optional; events gate signup on the subset they require.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Profile {
    pub id: Uuid,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub student_number: Option<String>,
    pub age: Option<i32>,
    pub dietary_restrictions: Option<String>,
    pub interests: Vec<String>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Empty profile for an account that never saved one
    pub fn empty(user_id: Uuid) -> Self {
        Self {
            id: user_id,
            first_name: None,
            last_name: None,
            student_number: None,
            age: None,
            dietary_restrictions: None,
            interests: Vec::new(),
            updated_at: Utc::now(),
        }
    }

    /// Whether a named profile field carries a value
    pub fn has_field(&self, field: &str) -> bool {
        match field {
            "first_name" => self.first_name.as_deref().is_some_and(|s| !s.is_empty()),
            "last_name" => self.last_name.as_deref().is_some_and(|s| !s.is_empty()),
            "student_number" => self
                .student_number
                .as_deref()
                .is_some_and(|s| !s.is_empty()),
            "age" => self.age.is_some(),
            "dietary_restrictions" => self
                .dietary_restrictions
                .as_deref()
                .is_some_and(|s| !s.is_empty()),
            "interests" => !self.interests.is_empty(),
            // Unknown requirements can never be satisfied
            _ => false,
        }
    }

    /// Which of the given required fields this profile still lacks
    pub fn missing_fields(&self, required: &[String]) -> Vec<String> {
        required
            .iter()
            .filter(|field| !self.has_field(field))
            .cloned()
            .collect()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpsertProfileRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub student_number: Option<String>,
    pub age: Option<i32>,
    pub dietary_restrictions: Option<String>,
    pub interests: Option<Vec<String>>,
}
