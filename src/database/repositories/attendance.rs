//! Attendance repository implementation

use sqlx::PgPool;
use crate::models::attendance::{Attendance, AttendeeProfile};
use crate::utils::errors::CampusHubError;

#[derive(Debug, Clone)]
pub struct AttendanceRepository {
    pool: PgPool,
}

impl AttendanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Register a user for an event. The unique index on (event_id, user_id)
    /// turns a racing duplicate into a database error instead of a second row.
    pub async fn register(&self, event_id: i64, user_id: i64) -> Result<Attendance, CampusHubError> {
        let attendance = sqlx::query_as::<_, Attendance>(
            r#"
            INSERT INTO event_attendees (event_id, user_id)
            VALUES ($1, $2)
            RETURNING id, event_id, user_id, registered_at
            "#
        )
        .bind(event_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(attendance)
    }

    /// Unregister a user from an event
    pub async fn unregister(&self, event_id: i64, user_id: i64) -> Result<(), CampusHubError> {
        sqlx::query("DELETE FROM event_attendees WHERE event_id = $1 AND user_id = $2")
            .bind(event_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Get the attendee roster joined with profiles, in registration order
    pub async fn roster(&self, event_id: i64) -> Result<Vec<AttendeeProfile>, CampusHubError> {
        let roster = sqlx::query_as::<_, AttendeeProfile>(
            r#"
            SELECT p.user_id, p.display_name, p.avatar_url, p.department, a.registered_at
            FROM event_attendees a
            INNER JOIN profiles p ON p.user_id = a.user_id
            WHERE a.event_id = $1
            ORDER BY a.registered_at ASC
            "#
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(roster)
    }

    /// Get the ids of all events a user is registered for
    pub async fn event_ids_for_user(&self, user_id: i64) -> Result<Vec<i64>, CampusHubError> {
        let rows: Vec<(i64,)> = sqlx::query_as(
            "SELECT event_id FROM event_attendees WHERE user_id = $1"
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|(id,)| id).collect())
    }
}
