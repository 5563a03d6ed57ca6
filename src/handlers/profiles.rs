//! Profile and session handlers

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::Serialize;

use crate::models::profile::Role;
use crate::state::Capability;
use crate::utils::errors::Result;

use super::{bearer_token, load_session, AppState};

#[derive(Debug, Serialize)]
pub struct ProfileView {
    pub user_id: i64,
    pub display_name: String,
    pub role: Role,
    pub capabilities: Vec<Capability>,
    pub registered_event_ids: Vec<i64>,
    pub favorited_event_ids: Vec<i64>,
}

/// Current session's profile, capabilities and membership sets
pub async fn me(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ProfileView>> {
    let (_, session) = load_session(&state, &headers).await?;

    let mut capabilities: Vec<Capability> = session.capabilities.iter().copied().collect();
    capabilities.sort_by_key(|c| format!("{:?}", c));

    let mut registered: Vec<i64> = session.ledger.registered_ids().iter().copied().collect();
    registered.sort_unstable();
    let mut favorited: Vec<i64> = session.ledger.favorited_ids().iter().copied().collect();
    favorited.sort_unstable();

    Ok(Json(ProfileView {
        user_id: session.user_id,
        display_name: session.display_name,
        role: session.role,
        capabilities,
        registered_event_ids: registered,
        favorited_event_ids: favorited,
    }))
}

/// Invalidate the session and sign out upstream
pub async fn sign_out(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>> {
    let token = bearer_token(&headers)?;
    state.services.session.invalidate(&token).await?;
    Ok(Json(serde_json::json!({ "signed_out": true })))
}
