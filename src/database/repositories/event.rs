//! Event repository implementation

use sqlx::PgPool;
use chrono::{DateTime, Utc};
use crate::models::event::{Event, CatalogEntry, CreateEventRequest, UpdateEventRequest};
use crate::utils::errors::CampusHubError;

const CATALOG_COLUMNS: &str = r#"
    e.id, e.title, e.description, e.start_time, e.end_time, e.location,
    e.image_url, e.capacity, e.tags, e.category_id, e.organizer_id, e.video_urls,
    COUNT(a.id) AS attendee_count,
    c.label AS category_label, c.color AS category_color
"#;

#[derive(Debug, Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new event
    pub async fn create(&self, organizer_id: i64, request: CreateEventRequest) -> Result<Event, CampusHubError> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events (title, description, start_time, end_time, location, image_url, capacity, tags, category_id, organizer_id, video_urls, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING id, title, description, start_time, end_time, location, image_url, capacity, tags, category_id, organizer_id, video_urls, created_at, updated_at
            "#
        )
        .bind(request.title)
        .bind(request.description)
        .bind(request.start_time)
        .bind(request.end_time)
        .bind(request.location)
        .bind(request.image_url)
        .bind(request.capacity)
        .bind(request.tags)
        .bind(request.category_id)
        .bind(organizer_id)
        .bind(request.video_urls)
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(event)
    }

    /// Find event by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Event>, CampusHubError> {
        let event = sqlx::query_as::<_, Event>(
            "SELECT id, title, description, start_time, end_time, location, image_url, capacity, tags, category_id, organizer_id, video_urls, created_at, updated_at FROM events WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    /// Update event with the submitted values directly
    pub async fn update(&self, id: i64, request: UpdateEventRequest) -> Result<Event, CampusHubError> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            UPDATE events
            SET title = $2,
                description = $3,
                start_time = $4,
                end_time = $5,
                location = $6,
                image_url = $7,
                capacity = $8,
                tags = $9,
                category_id = $10,
                video_urls = $11,
                updated_at = $12
            WHERE id = $1
            RETURNING id, title, description, start_time, end_time, location, image_url, capacity, tags, category_id, organizer_id, video_urls, created_at, updated_at
            "#
        )
        .bind(id)
        .bind(request.title)
        .bind(request.description)
        .bind(request.start_time)
        .bind(request.end_time)
        .bind(request.location)
        .bind(request.image_url)
        .bind(request.capacity)
        .bind(request.tags)
        .bind(request.category_id)
        .bind(request.video_urls)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(event)
    }

    /// Delete event
    pub async fn delete(&self, id: i64) -> Result<(), CampusHubError> {
        sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Fetch the catalog: events whose end timestamp is at or after `now`,
    /// ascending by start time, annotated with attendee count and category.
    pub async fn upcoming_catalog(&self, now: DateTime<Utc>) -> Result<Vec<CatalogEntry>, CampusHubError> {
        let entries = sqlx::query_as::<_, CatalogEntry>(&format!(
            r#"
            SELECT {CATALOG_COLUMNS}
            FROM events e
            LEFT JOIN event_attendees a ON a.event_id = e.id
            LEFT JOIN event_categories c ON c.id = e.category_id
            WHERE e.end_time >= $1
            GROUP BY e.id, c.label, c.color
            ORDER BY e.start_time ASC
            "#
        ))
        .bind(now)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    /// Fetch a single event annotated like a catalog entry
    pub async fn catalog_entry(&self, id: i64) -> Result<Option<CatalogEntry>, CampusHubError> {
        let entry = sqlx::query_as::<_, CatalogEntry>(&format!(
            r#"
            SELECT {CATALOG_COLUMNS}
            FROM events e
            LEFT JOIN event_attendees a ON a.event_id = e.id
            LEFT JOIN event_categories c ON c.id = e.category_id
            WHERE e.id = $1
            GROUP BY e.id, c.label, c.color
            "#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entry)
    }
}
