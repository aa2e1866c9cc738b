use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use moneybird_api::MoneybirdApiError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not authenticated")]
    Unauthorized,

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("OAuth error: {0}")]
    OAuth(String),

    #[error("Upstream error: {0}")]
    Gateway(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ServerError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ServerError::Unauthorized => {
                (StatusCode::UNAUTHORIZED, "Not authenticated".to_string())
            }
            ServerError::Configuration(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ServerError::OAuth(msg) => (StatusCode::BAD_GATEWAY, msg),
            ServerError::Gateway(msg) => (StatusCode::BAD_GATEWAY, msg),
            ServerError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

// Upstream failures reach the caller as one opaque fault tier. The 401
// classification exists in MoneybirdApiError but does not trigger logout
// or re-authorization here.
impl From<MoneybirdApiError> for ServerError {
    fn from(err: MoneybirdApiError) -> Self {
        ServerError::Gateway(err.to_string())
    }
}

impl
    From<
        oauth2::RequestTokenError<
            reqwest::Error,
            oauth2::StandardErrorResponse<oauth2::basic::BasicErrorResponseType>,
        >,
    > for ServerError
{
    fn from(
        err: oauth2::RequestTokenError<
            reqwest::Error,
            oauth2::StandardErrorResponse<oauth2::basic::BasicErrorResponseType>,
        >,
    ) -> Self {
        ServerError::OAuth(format!("Token request failed: {}", err))
    }
}

impl From<config::ConfigError> for ServerError {
    fn from(err: config::ConfigError) -> Self {
        ServerError::Configuration(format!("Configuration error: {}", err))
    }
}
