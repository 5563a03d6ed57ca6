//! Favorite repository implementation

use sqlx::PgPool;
use crate::models::attendance::Favorite;
use crate::utils::errors::CampusHubError;

#[derive(Debug, Clone)]
pub struct FavoriteRepository {
    pool: PgPool,
}

impl FavoriteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Favorite an event for a user
    pub async fn add(&self, event_id: i64, user_id: i64) -> Result<Favorite, CampusHubError> {
        let favorite = sqlx::query_as::<_, Favorite>(
            r#"
            INSERT INTO event_favorites (event_id, user_id)
            VALUES ($1, $2)
            RETURNING id, event_id, user_id, created_at
            "#
        )
        .bind(event_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(favorite)
    }

    /// Remove a favorite
    pub async fn remove(&self, event_id: i64, user_id: i64) -> Result<(), CampusHubError> {
        sqlx::query("DELETE FROM event_favorites WHERE event_id = $1 AND user_id = $2")
            .bind(event_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Get the ids of all events a user has favorited
    pub async fn event_ids_for_user(&self, user_id: i64) -> Result<Vec<i64>, CampusHubError> {
        let rows: Vec<(i64,)> = sqlx::query_as(
            "SELECT event_id FROM event_favorites WHERE user_id = $1"
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|(id,)| id).collect())
    }
}
