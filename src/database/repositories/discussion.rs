//! Discussion repository implementation

use sqlx::PgPool;
use crate::models::discussion::{DiscussionComment, CommentWithAuthor, CreateCommentRequest};
use crate::utils::errors::CampusHubError;

#[derive(Debug, Clone)]
pub struct DiscussionRepository {
    pool: PgPool,
}

impl DiscussionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append a comment to an event's discussion thread
    pub async fn create(&self, request: CreateCommentRequest) -> Result<DiscussionComment, CampusHubError> {
        let comment = sqlx::query_as::<_, DiscussionComment>(
            r#"
            INSERT INTO event_discussions (event_id, author_id, body)
            VALUES ($1, $2, $3)
            RETURNING id, event_id, author_id, body, created_at
            "#
        )
        .bind(request.event_id)
        .bind(request.author_id)
        .bind(request.body)
        .fetch_one(&self.pool)
        .await?;

        Ok(comment)
    }

    /// Fetch the full thread for an event joined with author profiles,
    /// ordered by creation time ascending
    pub async fn thread_for_event(&self, event_id: i64) -> Result<Vec<CommentWithAuthor>, CampusHubError> {
        let thread = sqlx::query_as::<_, CommentWithAuthor>(
            r#"
            SELECT d.id, d.event_id, d.author_id, d.body, d.created_at,
                   p.display_name AS author_name, p.role AS author_role,
                   p.avatar_url AS author_avatar_url
            FROM event_discussions d
            INNER JOIN profiles p ON p.user_id = d.author_id
            WHERE d.event_id = $1
            ORDER BY d.created_at ASC
            "#
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(thread)
    }
}
