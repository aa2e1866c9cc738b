use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};

/// Client credentials smuggled across the authorization redirect when the
/// operator supplies them through the login form instead of deployment
/// configuration. The authorization server round-trip is stateless from our
/// side, so they ride along in a short-lived cookie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingOAuthConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

impl PendingOAuthConfig {
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        Ok(URL_SAFE_NO_PAD.encode(serde_json::to_vec(self)?))
    }

    pub fn decode(value: &str) -> Option<Self> {
        let bytes = URL_SAFE_NO_PAD.decode(value).ok()?;
        serde_json::from_slice(&bytes).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_decode_round_trip() {
        let pending = PendingOAuthConfig {
            client_id: "client-1".to_string(),
            client_secret: "s3cret".to_string(),
            redirect_uri: "https://clock.example.com/auth/callback".to_string(),
        };

        let encoded = pending.encode().unwrap();
        assert_eq!(PendingOAuthConfig::decode(&encoded), Some(pending));
    }

    #[test]
    fn decode_rejects_garbage() {
        assert_eq!(PendingOAuthConfig::decode("not base64!"), None);
        assert_eq!(PendingOAuthConfig::decode(""), None);
    }
}
