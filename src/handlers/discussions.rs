//! Discussion thread handlers

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;

use crate::models::discussion::{CommentWithAuthor, CreateCommentRequest};
use crate::state::Capability;
use crate::utils::errors::{CampusHubError, Result};

use super::{load_session, require, AppState};

/// Fetch the discussion thread for an event, oldest first
pub async fn get_thread(
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
) -> Result<Json<Vec<CommentWithAuthor>>> {
    if state.db.events.find_by_id(event_id).await?.is_none() {
        return Err(CampusHubError::EventNotFound { event_id });
    }

    let thread = state.db.discussions.thread_for_event(event_id).await?;
    Ok(Json(thread))
}

#[derive(Debug, Deserialize)]
pub struct PostCommentBody {
    pub body: String,
}

/// Append a comment and return the refetched full thread
pub async fn post_comment(
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
    headers: HeaderMap,
    Json(payload): Json<PostCommentBody>,
) -> Result<Json<Vec<CommentWithAuthor>>> {
    let (_, session) = load_session(&state, &headers).await?;
    require(&session, Capability::Comment)?;

    if payload.body.trim().is_empty() {
        return Err(CampusHubError::InvalidInput("Comment body is required".to_string()));
    }

    let thread = state
        .db
        .post_comment(CreateCommentRequest {
            event_id,
            author_id: session.user_id,
            body: payload.body,
        })
        .await?;

    Ok(Json(thread))
}
