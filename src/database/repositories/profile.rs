//! Profile repository implementation

use sqlx::PgPool;
use chrono::Utc;
use crate::models::profile::{Profile, UpsertProfileRequest};
use crate::utils::errors::CampusHubError;

#[derive(Debug, Clone)]
pub struct ProfileRepository {
    pool: PgPool,
}

impl ProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find profile by user ID
    pub async fn find_by_id(&self, user_id: i64) -> Result<Option<Profile>, CampusHubError> {
        let profile = sqlx::query_as::<_, Profile>(
            "SELECT user_id, display_name, role, avatar_url, department, bio, created_at, updated_at FROM profiles WHERE user_id = $1"
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(profile)
    }

    /// Create or update a profile. The role is never overwritten here;
    /// new profiles start as regular users.
    pub async fn upsert(&self, request: UpsertProfileRequest) -> Result<Profile, CampusHubError> {
        let profile = sqlx::query_as::<_, Profile>(
            r#"
            INSERT INTO profiles (user_id, display_name, role, avatar_url, department, bio, created_at, updated_at)
            VALUES ($1, $2, 'user', $3, $4, $5, $6, $6)
            ON CONFLICT (user_id) DO UPDATE
            SET display_name = EXCLUDED.display_name,
                avatar_url = EXCLUDED.avatar_url,
                department = EXCLUDED.department,
                bio = EXCLUDED.bio,
                updated_at = EXCLUDED.updated_at
            RETURNING user_id, display_name, role, avatar_url, department, bio, created_at, updated_at
            "#
        )
        .bind(request.user_id)
        .bind(request.display_name)
        .bind(request.avatar_url)
        .bind(request.department)
        .bind(request.bio)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(profile)
    }
}
