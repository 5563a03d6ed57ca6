//! Media upload handlers

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap};
use axum::Json;
use serde::Serialize;

use crate::services::storage::MediaKind;
use crate::state::Capability;
use crate::utils::errors::{CampusHubError, Result};

use super::{load_session, require, AppState};

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub url: String,
}

/// Upload an image or video and return its public URL. Video upload is
/// gated behind the admin-only capability.
pub async fn upload_media(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<UploadResponse>> {
    let (_, session) = load_session(&state, &headers).await?;

    let kind = match kind.as_str() {
        "image" => MediaKind::Image,
        "video" => MediaKind::Video,
        other => {
            return Err(CampusHubError::InvalidInput(format!(
                "Unknown media kind: {}",
                other
            )))
        }
    };

    match kind {
        MediaKind::Image => require(&session, Capability::UploadImage)?,
        MediaKind::Video => require(&session, Capability::UploadVideo)?,
    }

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| CampusHubError::InvalidInput("Content type is required".to_string()))?
        .to_string();

    let url = state
        .services
        .storage
        .upload_media(session.user_id, kind, &content_type, body.to_vec())
        .await?;

    Ok(Json(UploadResponse { url }))
}
