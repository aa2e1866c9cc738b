use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

use crate::config::ServerConfiguration;
use crate::error::ServerError;
use crate::models::PendingOAuthConfig;

// Cookie names are part of the deployment contract.
pub const TOKEN_COOKIE: &str = "moneybird_token";
pub const PENDING_OAUTH_COOKIE: &str = "moneybird_oauth_config";

const PENDING_OAUTH_TTL: Duration = Duration::minutes(10);

pub fn access_token(jar: &CookieJar) -> Option<String> {
    jar.get(TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
}

pub fn store_token(jar: CookieJar, config: &ServerConfiguration, token: &str) -> CookieJar {
    let cookie = Cookie::build((TOKEN_COOKIE, token.to_string()))
        .http_only(true)
        .secure(config.secure_cookies)
        .same_site(SameSite::Lax)
        .path(config.root_path())
        .max_age(Duration::days(config.token_ttl_days))
        .build();
    jar.add(cookie)
}

pub fn clear_token(jar: CookieJar, config: &ServerConfiguration) -> CookieJar {
    jar.remove(
        Cookie::build((TOKEN_COOKIE, ""))
            .path(config.root_path())
            .build(),
    )
}

pub fn store_pending_oauth(
    jar: CookieJar,
    config: &ServerConfiguration,
    pending: &PendingOAuthConfig,
) -> Result<CookieJar, ServerError> {
    let value = pending
        .encode()
        .map_err(|e| ServerError::Internal(format!("Failed to encode OAuth config: {}", e)))?;
    let cookie = Cookie::build((PENDING_OAUTH_COOKIE, value))
        .http_only(true)
        .secure(config.secure_cookies)
        .same_site(SameSite::Lax)
        .path(config.root_path())
        .max_age(PENDING_OAUTH_TTL)
        .build();
    Ok(jar.add(cookie))
}

/// Reads and deletes the pending credentials cookie. The credentials are
/// single-use: whatever the callback outcome, they do not outlive it.
pub fn take_pending_oauth(
    jar: CookieJar,
    config: &ServerConfiguration,
) -> (CookieJar, Option<PendingOAuthConfig>) {
    let pending = jar
        .get(PENDING_OAUTH_COOKIE)
        .and_then(|cookie| PendingOAuthConfig::decode(cookie.value()));
    let jar = jar.remove(
        Cookie::build((PENDING_OAUTH_COOKIE, ""))
            .path(config.root_path())
            .build(),
    );
    (jar, pending)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server_config() -> ServerConfiguration {
        ServerConfiguration {
            secure_cookies: false,
            ..ServerConfiguration::default()
        }
    }

    #[test]
    fn stored_token_is_readable_and_http_only() {
        let jar = store_token(CookieJar::new(), &server_config(), "tok-1");
        let cookie = jar.get(TOKEN_COOKIE).unwrap();

        assert_eq!(cookie.value(), "tok-1");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.max_age(), Some(Duration::days(30)));
        assert_eq!(access_token(&jar), Some("tok-1".to_string()));
    }

    #[test]
    fn empty_token_cookie_is_no_session() {
        let jar = CookieJar::new().add(Cookie::new(TOKEN_COOKIE, ""));
        assert_eq!(access_token(&jar), None);
    }

    #[test]
    fn pending_oauth_is_consumed_on_take() {
        let pending = PendingOAuthConfig {
            client_id: "id".to_string(),
            client_secret: "secret".to_string(),
            redirect_uri: "https://clock.example.com/auth/callback".to_string(),
        };
        let config = server_config();

        let jar = store_pending_oauth(CookieJar::new(), &config, &pending).unwrap();
        let stored = jar.get(PENDING_OAUTH_COOKIE).unwrap();
        assert_eq!(stored.max_age(), Some(Duration::minutes(10)));

        let (jar, taken) = take_pending_oauth(jar, &config);
        assert_eq!(taken, Some(pending));
        // The jar now carries a removal cookie, not a readable value
        let removed = jar.get(PENDING_OAUTH_COOKIE);
        assert!(removed.is_none() || removed.unwrap().value().is_empty());
    }
}
