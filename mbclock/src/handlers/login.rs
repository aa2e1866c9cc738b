use axum::{extract::State, response::Redirect, Form};
use axum_extra::extract::cookie::CookieJar;

use crate::error::ServerError;
use crate::models::{CredentialsForm, PendingOAuthConfig};
use crate::services::{session, OAuthClient};
use crate::AppState;

/// Entry point of the static-credentials flow: send the browser to the
/// Moneybird authorize screen.
pub async fn initiate_login(State(state): State<AppState>) -> Result<Redirect, ServerError> {
    let oauth = state.config.oauth.as_ref().ok_or_else(|| {
        ServerError::Configuration("OAuth client credentials are not configured".to_string())
    })?;

    let client = OAuthClient::new(oauth)?;
    let url = client.authorization_url(&state.config.moneybird.scopes);

    tracing::info!("Redirecting to authorization endpoint");

    Ok(Redirect::to(&url))
}

/// Dynamic-credentials flow: the operator posts an OAuth application's
/// client id/secret and the redirect URI registered for it. The values ride
/// along in a short-lived cookie until the callback consumes them.
pub async fn submit_credentials(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<CredentialsForm>,
) -> Result<(CookieJar, Redirect), ServerError> {
    let pending = PendingOAuthConfig {
        client_id: form.client_id.trim().to_string(),
        client_secret: form.client_secret.trim().to_string(),
        redirect_uri: form.redirect_uri.trim().to_string(),
    };

    if pending.client_id.is_empty()
        || pending.client_secret.is_empty()
        || pending.redirect_uri.is_empty()
    {
        return Err(ServerError::BadRequest(
            "client_id, client_secret and redirect_uri are required".to_string(),
        ));
    }

    let client = OAuthClient::from_credentials(&pending)?;
    let url = client.authorization_url(&state.config.moneybird.scopes);
    let jar = session::store_pending_oauth(jar, &state.config.server, &pending)?;

    tracing::info!("Stored pending OAuth credentials, redirecting to authorization endpoint");

    Ok((jar, Redirect::to(&url)))
}
