//! Discussion thread models

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A single discussion comment. Immutable once posted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DiscussionComment {
    pub id: i64,
    pub event_id: i64,
    pub author_id: i64,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// Thread row joined with the author's display name and role
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CommentWithAuthor {
    pub id: i64,
    pub event_id: i64,
    pub author_id: i64,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub author_name: String,
    pub author_role: String,
    pub author_avatar_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCommentRequest {
    pub event_id: i64,
    pub author_id: i64,
    pub body: String,
}
