//! Registration and favorite toggle handlers

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;

use crate::models::attendance::AttendeeProfile;
use crate::services::reconciler::{FavoriteOutcome, ToggleOutcome};
use crate::state::Capability;
use crate::utils::errors::{CampusHubError, Result};

use super::{load_session, require, AppState};

/// Toggle the caller's registration for an event. The session ledger is
/// patched only after the store confirms the mutation, then persisted.
pub async fn toggle_registration(
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<ToggleOutcome>> {
    let (token, mut session) = load_session(&state, &headers).await?;
    require(&session, Capability::RegisterForEvents)?;

    let outcome = state
        .services
        .reconciler
        .toggle_registration(&mut session.ledger, session.user_id, event_id)
        .await?;

    state.services.session.persist(&token, &mut session).await?;

    Ok(Json(outcome))
}

/// Toggle the caller's favorite for an event
pub async fn toggle_favorite(
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<FavoriteOutcome>> {
    let (token, mut session) = load_session(&state, &headers).await?;
    require(&session, Capability::FavoriteEvents)?;

    let outcome = state
        .services
        .reconciler
        .toggle_favorite(&mut session.ledger, session.user_id, event_id)
        .await?;

    state.services.session.persist(&token, &mut session).await?;

    Ok(Json(outcome))
}

/// Attendee roster joined with profiles
pub async fn attendee_roster(
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
) -> Result<Json<Vec<AttendeeProfile>>> {
    if state.db.events.find_by_id(event_id).await?.is_none() {
        return Err(CampusHubError::EventNotFound { event_id });
    }

    let roster = state.db.attendance.roster(event_id).await?;
    Ok(Json(roster))
}
