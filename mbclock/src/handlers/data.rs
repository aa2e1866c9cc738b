use axum::{extract::State, Json};
use axum_extra::extract::cookie::CookieJar;

use crate::error::ServerError;
use crate::models::ReferenceDataResponse;
use crate::services::session;
use crate::AppState;

/// Reference data for the clock-in form. An upstream failure does not
/// fault the page: the caller gets empty lists plus an error description.
pub async fn reference_data(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Json<ReferenceDataResponse>, ServerError> {
    let token = session::access_token(&jar).ok_or(ServerError::Unauthorized)?;

    let response = match state.gateway.reference_data(&token).await {
        Ok(data) => ReferenceDataResponse {
            users: data.users,
            projects: data.projects,
            contacts: data.contacts,
            error: None,
        },
        Err(err) => {
            tracing::error!(error = %err, "Reference data fetch failed");
            ReferenceDataResponse {
                users: Vec::new(),
                projects: Vec::new(),
                contacts: Vec::new(),
                error: Some(err.to_string()),
            }
        }
    };

    Ok(Json(response))
}
