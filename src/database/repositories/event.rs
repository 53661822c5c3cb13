//! Event repository implementation

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::event::{
    CreateEventRequest, Event, EventFilter, EventWithCounts, UpdateEventRequest,
};
use crate::utils::errors::UniEventsError;

#[derive(Debug, Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new event
    pub async fn create(
        &self,
        organizer_id: Uuid,
        request: CreateEventRequest,
    ) -> Result<Event, UniEventsError> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events (id, name, category, tags, location, start_datetime, end_datetime, capacity, description, image_url, school, organizer_id, required_profile_fields, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING id, name, category, tags, location, start_datetime, end_datetime, capacity, description, image_url, school, organizer_id, is_locked, is_archived, required_profile_fields, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.name)
        .bind(request.category)
        .bind(request.tags)
        .bind(request.location)
        .bind(request.start_datetime)
        .bind(request.end_datetime)
        .bind(request.capacity)
        .bind(request.description)
        .bind(request.image_url)
        .bind(request.school)
        .bind(organizer_id)
        .bind(request.required_profile_fields)
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(event)
    }

    /// Find event by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Event>, UniEventsError> {
        let event = sqlx::query_as::<_, Event>(
            "SELECT id, name, category, tags, location, start_datetime, end_datetime, capacity, description, image_url, school, organizer_id, is_locked, is_archived, required_profile_fields, created_at, updated_at FROM events WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    /// Find event by ID together with its signup counts
    pub async fn find_with_counts(
        &self,
        id: Uuid,
    ) -> Result<Option<EventWithCounts>, UniEventsError> {
        let event = sqlx::query_as::<_, EventWithCounts>(
            r#"
            SELECT e.id, e.name, e.category, e.tags, e.location, e.start_datetime, e.end_datetime, e.capacity, e.description, e.image_url, e.school, e.organizer_id, e.is_locked, e.is_archived, e.required_profile_fields, e.created_at, e.updated_at,
                   (SELECT COUNT(*) FROM signups s WHERE s.event_id = e.id AND s.status = 'confirmed') AS confirmed_count,
                   (SELECT COUNT(*) FROM signups s WHERE s.event_id = e.id AND s.status = 'waitlisted') AS waitlist_count
            FROM events e
            WHERE e.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    /// Update event fields, keeping existing values where none is provided
    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateEventRequest,
    ) -> Result<Event, UniEventsError> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            UPDATE events
            SET name = COALESCE($2, name),
                category = COALESCE($3, category),
                tags = COALESCE($4, tags),
                location = COALESCE($5, location),
                start_datetime = COALESCE($6, start_datetime),
                end_datetime = COALESCE($7, end_datetime),
                capacity = COALESCE($8, capacity),
                description = COALESCE($9, description),
                image_url = COALESCE($10, image_url),
                school = COALESCE($11, school),
                is_locked = COALESCE($12, is_locked),
                is_archived = COALESCE($13, is_archived),
                required_profile_fields = COALESCE($14, required_profile_fields),
                updated_at = $15
            WHERE id = $1
            RETURNING id, name, category, tags, location, start_datetime, end_datetime, capacity, description, image_url, school, organizer_id, is_locked, is_archived, required_profile_fields, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(request.name)
        .bind(request.category)
        .bind(request.tags)
        .bind(request.location)
        .bind(request.start_datetime)
        .bind(request.end_datetime)
        .bind(request.capacity)
        .bind(request.description)
        .bind(request.image_url)
        .bind(request.school)
        .bind(request.is_locked)
        .bind(request.is_archived)
        .bind(request.required_profile_fields)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(event)
    }

    /// Delete event; signups go with it via ON DELETE CASCADE
    pub async fn delete(&self, id: Uuid) -> Result<(), UniEventsError> {
        sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Public listing: non-archived events matching the filter, earliest first
    pub async fn list_public(
        &self,
        filter: &EventFilter,
    ) -> Result<Vec<EventWithCounts>, UniEventsError> {
        let events = sqlx::query_as::<_, EventWithCounts>(
            r#"
            SELECT e.id, e.name, e.category, e.tags, e.location, e.start_datetime, e.end_datetime, e.capacity, e.description, e.image_url, e.school, e.organizer_id, e.is_locked, e.is_archived, e.required_profile_fields, e.created_at, e.updated_at,
                   (SELECT COUNT(*) FROM signups s WHERE s.event_id = e.id AND s.status = 'confirmed') AS confirmed_count,
                   (SELECT COUNT(*) FROM signups s WHERE s.event_id = e.id AND s.status = 'waitlisted') AS waitlist_count
            FROM events e
            WHERE e.is_archived = false
              AND ($1::text IS NULL OR e.name ILIKE '%' || $1 || '%')
              AND (cardinality($2::text[]) = 0 OR e.category = ANY($2))
              AND ($3::text IS NULL OR e.school = $3)
              AND ($4::boolean OR e.end_datetime >= NOW())
            ORDER BY e.start_datetime ASC
            "#,
        )
        .bind(filter.search.as_deref())
        .bind(&filter.categories)
        .bind(filter.school.as_deref())
        .bind(filter.include_expired)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    /// Events owned by an organizer, newest created first
    pub async fn list_by_organizer(
        &self,
        organizer_id: Uuid,
        include_archived: bool,
    ) -> Result<Vec<EventWithCounts>, UniEventsError> {
        let events = sqlx::query_as::<_, EventWithCounts>(
            r#"
            SELECT e.id, e.name, e.category, e.tags, e.location, e.start_datetime, e.end_datetime, e.capacity, e.description, e.image_url, e.school, e.organizer_id, e.is_locked, e.is_archived, e.required_profile_fields, e.created_at, e.updated_at,
                   (SELECT COUNT(*) FROM signups s WHERE s.event_id = e.id AND s.status = 'confirmed') AS confirmed_count,
                   (SELECT COUNT(*) FROM signups s WHERE s.event_id = e.id AND s.status = 'waitlisted') AS waitlist_count
            FROM events e
            WHERE e.organizer_id = $1
              AND ($2::boolean OR e.is_archived = false)
            ORDER BY e.created_at DESC
            "#,
        )
        .bind(organizer_id)
        .bind(include_archived)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    /// Distinct categories across non-archived events
    pub async fn distinct_categories(&self) -> Result<Vec<String>, UniEventsError> {
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT DISTINCT category FROM events WHERE is_archived = false ORDER BY category ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|(category,)| category).collect())
    }

    /// Count total events
    pub async fn count(&self) -> Result<i64, UniEventsError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM events")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
