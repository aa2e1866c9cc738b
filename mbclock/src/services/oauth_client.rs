use oauth2::{
    basic::BasicClient, AuthType, AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken,
    HttpRequest, HttpResponse, RedirectUrl, Scope, TokenResponse, TokenUrl,
};

use crate::config::OAuthConfiguration;
use crate::error::ServerError;
use crate::models::PendingOAuthConfig;

// Simple async HTTP client for OAuth2
async fn http_client(request: HttpRequest) -> Result<HttpResponse, reqwest::Error> {
    let client = reqwest::Client::new();
    let mut builder = client
        .request(request.method().clone(), request.uri().to_string())
        .body(request.body().clone());

    for (name, value) in request.headers() {
        builder = builder.header(name.as_str(), value.as_bytes());
    }

    let response = builder.send().await?;
    let status = response.status();
    let body = response.bytes().await?.to_vec();

    let mut http_response = HttpResponse::new(body);
    *http_response.status_mut() = status;

    Ok(http_response)
}

pub const MONEYBIRD_AUTH_URL: &str = "https://moneybird.com/oauth/authorize";
pub const MONEYBIRD_TOKEN_URL: &str = "https://moneybird.com/oauth/token";

pub struct OAuthClient {
    client_id: String,
    client_secret: String,
    auth_url: AuthUrl,
    token_url: TokenUrl,
    redirect_url: RedirectUrl,
}

impl OAuthClient {
    /// Static strategy: credentials and endpoints from deployment config.
    pub fn new(config: &OAuthConfiguration) -> Result<Self, ServerError> {
        Self::from_parts(
            &config.client_id,
            &config.client_secret,
            &config.redirect_uri,
            &config.auth_url,
            &config.token_url,
        )
    }

    /// Dynamic strategy: operator-supplied credentials, stock endpoints.
    pub fn from_credentials(pending: &PendingOAuthConfig) -> Result<Self, ServerError> {
        Self::from_parts(
            &pending.client_id,
            &pending.client_secret,
            &pending.redirect_uri,
            MONEYBIRD_AUTH_URL,
            MONEYBIRD_TOKEN_URL,
        )
    }

    pub(crate) fn from_parts(
        client_id: &str,
        client_secret: &str,
        redirect_uri: &str,
        auth_url: &str,
        token_url: &str,
    ) -> Result<Self, ServerError> {
        let auth_url = AuthUrl::new(auth_url.to_string())
            .map_err(|e| ServerError::Configuration(format!("Invalid auth URL: {}", e)))?;

        let token_url = TokenUrl::new(token_url.to_string())
            .map_err(|e| ServerError::Configuration(format!("Invalid token URL: {}", e)))?;

        let redirect_url = RedirectUrl::new(redirect_uri.to_string())
            .map_err(|e| ServerError::Configuration(format!("Invalid redirect URI: {}", e)))?;

        Ok(Self {
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
            auth_url,
            token_url,
            redirect_url,
        })
    }

    /// Build the authorize-endpoint URL the browser is sent to. The scope
    /// set is a deployment decision, not a fixed contract.
    pub fn authorization_url(&self, scopes: &[String]) -> String {
        let mut request = BasicClient::new(ClientId::new(self.client_id.clone()))
            .set_client_secret(ClientSecret::new(self.client_secret.clone()))
            .set_auth_uri(self.auth_url.clone())
            .set_token_uri(self.token_url.clone())
            .set_redirect_uri(self.redirect_url.clone())
            .authorize_url(CsrfToken::new_random);

        for scope in scopes {
            request = request.add_scope(Scope::new(scope.clone()));
        }

        let (auth_url, _) = request.url();
        auth_url.to_string()
    }

    /// Exchange an authorization code for an access token. Moneybird issues
    /// long-lived tokens; no refresh token is kept and an expired token
    /// requires a full re-authorization.
    pub async fn exchange_code(&self, code: &str) -> Result<String, ServerError> {
        // Moneybird wants the client credentials in the form body, not in a
        // basic-auth header.
        let token_result = BasicClient::new(ClientId::new(self.client_id.clone()))
            .set_client_secret(ClientSecret::new(self.client_secret.clone()))
            .set_auth_type(AuthType::RequestBody)
            .set_auth_uri(self.auth_url.clone())
            .set_token_uri(self.token_url.clone())
            .set_redirect_uri(self.redirect_url.clone())
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .request_async(&http_client)
            .await?;

        let access_token = token_result.access_token().secret().to_string();

        tracing::debug!("Successfully exchanged authorization code for access token");

        Ok(access_token)
    }
}
