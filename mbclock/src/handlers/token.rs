use axum::{extract::State, response::Redirect, Form};
use axum_extra::extract::cookie::CookieJar;

use crate::error::ServerError;
use crate::models::ManualTokenForm;
use crate::services::session;
use crate::AppState;

/// Manual token entry: a pre-issued token is stored as-is in the same
/// cookie slot the OAuth flow uses. No validation happens here; a bad
/// token surfaces on the first API call.
pub async fn set_manual_token(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<ManualTokenForm>,
) -> Result<(CookieJar, Redirect), ServerError> {
    let token = form.token.trim();
    if token.is_empty() {
        return Err(ServerError::BadRequest(
            "Token must not be empty".to_string(),
        ));
    }

    let jar = session::store_token(jar, &state.config.server, token);

    tracing::info!("Stored manually entered access token");

    Ok((jar, Redirect::to(&state.config.server.root_path())))
}

pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Redirect) {
    let jar = session::clear_token(jar, &state.config.server);

    tracing::info!("Session cookie cleared");

    (jar, Redirect::to(&state.config.server.root_path()))
}
