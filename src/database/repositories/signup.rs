//! Signup repository implementation

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::signup::{AttendeeRow, Signup, SignupStatus, SignupWithEvent};
use crate::utils::errors::{map_unique_violation, UniEventsError};

#[derive(Debug, Clone)]
pub struct SignupRepository {
    pool: PgPool,
}

impl SignupRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a signup with the given status.
    ///
    /// A unique-constraint violation on (event_id, user_id) surfaces as the
    /// domain "already registered" outcome rather than a database error.
    pub async fn create(
        &self,
        event_id: Uuid,
        user_id: Uuid,
        status: SignupStatus,
    ) -> Result<Signup, UniEventsError> {
        let signup = sqlx::query_as::<_, Signup>(
            r#"
            INSERT INTO signups (id, event_id, user_id, status, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, event_id, user_id, status, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(event_id)
        .bind(user_id)
        .bind(status.as_str())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, UniEventsError::AlreadyRegistered))?;

        Ok(signup)
    }

    /// Find signup by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Signup>, UniEventsError> {
        let signup = sqlx::query_as::<_, Signup>(
            "SELECT id, event_id, user_id, status, created_at FROM signups WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(signup)
    }

    /// Find a user's signup for an event
    pub async fn find_by_event_and_user(
        &self,
        event_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Signup>, UniEventsError> {
        let signup = sqlx::query_as::<_, Signup>(
            "SELECT id, event_id, user_id, status, created_at FROM signups WHERE event_id = $1 AND user_id = $2"
        )
        .bind(event_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(signup)
    }

    /// Count signups with a given status for an event
    pub async fn count_by_status(
        &self,
        event_id: Uuid,
        status: SignupStatus,
    ) -> Result<i64, UniEventsError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM signups WHERE event_id = $1 AND status = $2",
        )
        .bind(event_id)
        .bind(status.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0)
    }

    /// Update a signup's status
    pub async fn update_status(
        &self,
        id: Uuid,
        status: SignupStatus,
    ) -> Result<Signup, UniEventsError> {
        let signup = sqlx::query_as::<_, Signup>(
            r#"
            UPDATE signups
            SET status = $2
            WHERE id = $1
            RETURNING id, event_id, user_id, status, created_at
            "#,
        )
        .bind(id)
        .bind(status.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(signup)
    }

    /// Delete a signup by ID
    pub async fn delete(&self, id: Uuid) -> Result<(), UniEventsError> {
        sqlx::query("DELETE FROM signups WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Roster for an event: signups joined with profile fields, insertion order
    pub async fn list_attendees(&self, event_id: Uuid) -> Result<Vec<AttendeeRow>, UniEventsError> {
        let attendees = sqlx::query_as::<_, AttendeeRow>(
            r#"
            SELECT s.id, s.user_id, s.status, s.created_at,
                   p.first_name, p.last_name, p.student_number, p.age, p.dietary_restrictions
            FROM signups s
            LEFT JOIN profiles p ON p.id = s.user_id
            WHERE s.event_id = $1
            ORDER BY s.created_at ASC
            "#,
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(attendees)
    }

    /// A user's signups joined with their events, newest signup first
    pub async fn list_for_user(
        &self,
        user_id: Uuid,
        expired: bool,
    ) -> Result<Vec<SignupWithEvent>, UniEventsError> {
        let signups = sqlx::query_as::<_, SignupWithEvent>(
            r#"
            SELECT s.id AS signup_id, s.status, s.created_at AS signed_up_at,
                   e.id AS event_id, e.name, e.category, e.location,
                   e.start_datetime, e.end_datetime, e.capacity, e.image_url,
                   (SELECT COUNT(*) FROM signups c WHERE c.event_id = e.id AND c.status = 'confirmed') AS confirmed_count,
                   (SELECT COUNT(*) FROM signups w WHERE w.event_id = e.id AND w.status = 'waitlisted') AS waitlist_count
            FROM signups s
            INNER JOIN events e ON e.id = s.event_id
            WHERE s.user_id = $1
              AND (($2::boolean AND e.end_datetime < NOW()) OR (NOT $2::boolean AND e.end_datetime >= NOW()))
            ORDER BY s.created_at DESC
            "#,
        )
        .bind(user_id)
        .bind(expired)
        .fetch_all(&self.pool)
        .await?;

        Ok(signups)
    }

    /// Count total signups
    pub async fn count(&self) -> Result<i64, UniEventsError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM signups")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
