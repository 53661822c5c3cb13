//! Profile repository implementation

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::profile::{Profile, UpsertProfileRequest};
use crate::utils::errors::UniEventsError;

#[derive(Debug, Clone)]
pub struct ProfileRepository {
    pool: PgPool,
}

impl ProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find profile by user ID
    pub async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<Profile>, UniEventsError> {
        let profile = sqlx::query_as::<_, Profile>(
            "SELECT id, first_name, last_name, student_number, age, dietary_restrictions, interests, updated_at FROM profiles WHERE id = $1"
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(profile)
    }

    /// Insert or update a profile, merging provided fields over existing ones
    pub async fn upsert(
        &self,
        user_id: Uuid,
        request: UpsertProfileRequest,
    ) -> Result<Profile, UniEventsError> {
        let profile = sqlx::query_as::<_, Profile>(
            r#"
            INSERT INTO profiles (id, first_name, last_name, student_number, age, dietary_restrictions, interests, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, '{}'), $8)
            ON CONFLICT (id) DO UPDATE
            SET first_name = COALESCE($2, profiles.first_name),
                last_name = COALESCE($3, profiles.last_name),
                student_number = COALESCE($4, profiles.student_number),
                age = COALESCE($5, profiles.age),
                dietary_restrictions = COALESCE($6, profiles.dietary_restrictions),
                interests = COALESCE($7, profiles.interests),
                updated_at = $8
            RETURNING id, first_name, last_name, student_number, age, dietary_restrictions, interests, updated_at
            "#,
        )
        .bind(user_id)
        .bind(request.first_name)
        .bind(request.last_name)
        .bind(request.student_number)
        .bind(request.age)
        .bind(request.dietary_restrictions)
        .bind(request.interests)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(profile)
    }

    /// Create an empty profile row for a new account
    pub async fn create_empty(&self, user_id: Uuid) -> Result<Profile, UniEventsError> {
        let profile = sqlx::query_as::<_, Profile>(
            r#"
            INSERT INTO profiles (id, interests, updated_at)
            VALUES ($1, '{}', $2)
            ON CONFLICT (id) DO NOTHING
            RETURNING id, first_name, last_name, student_number, age, dietary_restrictions, interests, updated_at
            "#,
        )
        .bind(user_id)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        match profile {
            Some(profile) => Ok(profile),
            // Row already existed; the conflict clause returned nothing
            None => self
                .find_by_user_id(user_id)
                .await?
                .ok_or(UniEventsError::UserNotFound { user_id }),
        }
    }
}
