use serde::Deserialize;

use crate::services::oauth_client::{MONEYBIRD_AUTH_URL, MONEYBIRD_TOKEN_URL};

#[derive(Debug, Deserialize, Clone)]
pub struct Configuration {
    #[serde(default)]
    pub server: ServerConfiguration,

    pub moneybird: MoneybirdConfiguration,

    /// OAuth application credentials. When present, the deployment uses the
    /// static-credentials strategy; when absent, operators supply their own
    /// credentials through the login form (dynamic strategy).
    #[serde(default)]
    pub oauth: Option<OAuthConfiguration>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfiguration {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Deployment sub-path when served behind a path-rewriting gateway.
    #[serde(default)]
    pub base_path: Option<String>,

    #[serde(default = "default_secure_cookies")]
    pub secure_cookies: bool,

    #[serde(default = "default_token_ttl_days")]
    pub token_ttl_days: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MoneybirdConfiguration {
    pub administration_id: String,

    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Shared write identity. When set, clock in/out calls run under this
    /// token instead of the per-user session token.
    #[serde(default)]
    pub service_token: Option<String>,

    #[serde(default = "default_scopes")]
    pub scopes: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OAuthConfiguration {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,

    #[serde(default = "default_auth_url")]
    pub auth_url: String,

    #[serde(default = "default_token_url")]
    pub token_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialsStrategy {
    /// OAuth application credentials come from deployment configuration.
    Static,
    /// The operator enters client credentials through the login form.
    Dynamic,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_secure_cookies() -> bool {
    true
}

fn default_token_ttl_days() -> i64 {
    30
}

fn default_api_base_url() -> String {
    "https://moneybird.com/api/v2".to_string()
}

fn default_scopes() -> Vec<String> {
    vec!["time_entries".to_string()]
}

fn default_auth_url() -> String {
    MONEYBIRD_AUTH_URL.to_string()
}

fn default_token_url() -> String {
    MONEYBIRD_TOKEN_URL.to_string()
}

impl Default for ServerConfiguration {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            base_path: None,
            secure_cookies: default_secure_cookies(),
            token_ttl_days: default_token_ttl_days(),
        }
    }
}

impl ServerConfiguration {
    /// Normalized deployment sub-path; "/" when deployed at the root.
    pub fn root_path(&self) -> String {
        match self
            .base_path
            .as_deref()
            .map(|p| p.trim_matches('/'))
            .filter(|p| !p.is_empty())
        {
            Some(path) => format!("/{}", path),
            None => "/".to_string(),
        }
    }
}

impl Configuration {
    pub fn new() -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();

        if std::path::Path::new("config.toml").exists() {
            builder = builder.add_source(config::File::with_name("config"));
        }

        builder = builder.add_source(config::Environment::with_prefix("MBCLOCK").separator("__"));

        let configuration: Self = builder.build()?.try_deserialize()?;
        configuration.validate()?;
        Ok(configuration)
    }

    fn validate(&self) -> Result<(), config::ConfigError> {
        if self.moneybird.administration_id.trim().is_empty() {
            return Err(config::ConfigError::Message(
                "moneybird.administration_id must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn credentials_strategy(&self) -> CredentialsStrategy {
        if self.oauth.is_some() {
            CredentialsStrategy::Static
        } else {
            CredentialsStrategy::Dynamic
        }
    }
}
