use axum::{
    extract::{Query, State},
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use moneybird_api::endpoints::time_entries::TimeEntry;

use crate::error::ServerError;
use crate::models::{ActiveEntryParams, ClockInRequest, ClockOutRequest};
use crate::services::session;
use crate::AppState;

/// The user's currently running entry, or `null`. Upstream trouble reads
/// as "not clocked in" rather than an error.
pub async fn active_entry(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(params): Query<ActiveEntryParams>,
) -> Result<Json<Option<TimeEntry>>, ServerError> {
    let token = session::access_token(&jar).ok_or(ServerError::Unauthorized)?;

    let entry = state.gateway.active_entry(&token, &params.user_id).await;

    Ok(Json(entry))
}

pub async fn clock_in(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<ClockInRequest>,
) -> Result<Json<TimeEntry>, ServerError> {
    let session_token = session::access_token(&jar);
    let token = state
        .gateway
        .write_identity(session_token.as_deref())
        .ok_or(ServerError::Unauthorized)?;

    let entry = state
        .gateway
        .clock_in(
            token,
            &req.user_id,
            &req.description,
            req.project_id,
            req.contact_id,
        )
        .await?;

    Ok(Json(entry))
}

pub async fn clock_out(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<ClockOutRequest>,
) -> Result<Json<TimeEntry>, ServerError> {
    let session_token = session::access_token(&jar);
    let token = state
        .gateway
        .write_identity(session_token.as_deref())
        .ok_or(ServerError::Unauthorized)?;

    let entry = state.gateway.clock_out(token, &req.entry_id).await?;

    Ok(Json(entry))
}
