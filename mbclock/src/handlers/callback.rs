use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::Redirect;
use axum_extra::extract::cookie::CookieJar;
use url::Url;

use crate::error::ServerError;
use crate::models::CallbackParams;
use crate::services::{session, OAuthClient};
use crate::AppState;

const CALLBACK_SUFFIX: &str = "/auth/callback";
const FORWARDED_HOST_HEADER: &str = "x-forwarded-host";

pub async fn oauth_callback(
    State(state): State<AppState>,
    Query(params): Query<CallbackParams>,
    headers: HeaderMap,
    jar: CookieJar,
) -> Result<(CookieJar, Redirect), ServerError> {
    if let Some(error) = params.error {
        tracing::warn!(error = %error, "Authorization server returned an error");
        return Err(ServerError::OAuth(error));
    }

    let code = params
        .code
        .ok_or_else(|| ServerError::BadRequest("No code provided".to_string()))?;

    // Credentials come from deployment config when present, otherwise from
    // the pending cookie left by the credentials form. The cookie is
    // single-use and removed whatever the outcome.
    let (jar, pending) = session::take_pending_oauth(jar, &state.config.server);
    let (client, redirect_uri) = match (&state.config.oauth, pending) {
        (Some(oauth), _) => (OAuthClient::new(oauth)?, oauth.redirect_uri.clone()),
        (None, Some(pending)) => {
            let client = OAuthClient::from_credentials(&pending)?;
            (client, pending.redirect_uri)
        }
        (None, None) => {
            return Err(ServerError::Configuration(
                "Missing OAuth client credentials".to_string(),
            ))
        }
    };

    let access_token = client.exchange_code(&code).await?;

    let forwarded_host = headers
        .get(FORWARDED_HOST_HEADER)
        .and_then(|value| value.to_str().ok());
    let target = app_root(&redirect_uri, forwarded_host)?;

    let jar = session::store_token(jar, &state.config.server, &access_token);

    tracing::info!("Authorization code exchanged, session established");

    Ok((jar, Redirect::to(&target)))
}

/// Post-login landing target: the registered redirect URI with the callback
/// suffix stripped off its path. A reverse proxy in front may rewrite the
/// public host, which then arrives in `x-forwarded-host`.
fn app_root(redirect_uri: &str, forwarded_host: Option<&str>) -> Result<String, ServerError> {
    let mut url = Url::parse(redirect_uri)
        .map_err(|e| ServerError::Configuration(format!("Invalid redirect URI: {}", e)))?;

    let root = url
        .path()
        .strip_suffix(CALLBACK_SUFFIX)
        .unwrap_or("")
        .to_string();
    if root.is_empty() {
        url.set_path("/");
    } else {
        url.set_path(&root);
    }
    url.set_query(None);

    if let Some(forwarded) = forwarded_host {
        // Forwarded hosts may carry a port
        let (host, port) = match forwarded.rsplit_once(':') {
            Some((host, port)) if port.chars().all(|c| c.is_ascii_digit()) => {
                (host, port.parse::<u16>().ok())
            }
            _ => (forwarded, None),
        };
        url.set_host(Some(host))
            .map_err(|e| ServerError::BadRequest(format!("Invalid forwarded host: {}", e)))?;
        let _ = url.set_port(port);
    }

    Ok(url.to_string())
}
