//! School repository implementation

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::school::School;
use crate::utils::errors::UniEventsError;

#[derive(Debug, Clone)]
pub struct SchoolRepository {
    pool: PgPool,
}

impl SchoolRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List all schools, alphabetical
    pub async fn list(&self) -> Result<Vec<School>, UniEventsError> {
        let schools = sqlx::query_as::<_, School>(
            "SELECT id, name, background_image_url, created_at FROM schools ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(schools)
    }

    /// Find school by name
    pub async fn find_by_name(&self, name: &str) -> Result<Option<School>, UniEventsError> {
        let school = sqlx::query_as::<_, School>(
            "SELECT id, name, background_image_url, created_at FROM schools WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(school)
    }

    /// Insert a school if it does not already exist
    pub async fn upsert(
        &self,
        name: &str,
        background_image_url: Option<&str>,
    ) -> Result<School, UniEventsError> {
        let school = sqlx::query_as::<_, School>(
            r#"
            INSERT INTO schools (id, name, background_image_url, created_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (name) DO UPDATE
            SET background_image_url = COALESCE($3, schools.background_image_url)
            RETURNING id, name, background_image_url, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(background_image_url)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(school)
    }
}
