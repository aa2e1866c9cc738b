use thiserror::Error;
use tower_api_client::{Error as ApiError, StatusCode};

#[derive(Debug, Error)]
pub enum MoneybirdApiError {
    /// The access token was rejected upstream. Expired tokens land here;
    /// there is no refresh flow, so recovery means re-authorizing.
    #[error("Moneybird rejected the access token (401)")]
    Unauthorized,

    /// Any other non-success response. The body is surfaced as opaque text,
    /// Moneybird error payloads are not a stable contract.
    #[error("Moneybird API error ({0}): {1}")]
    Api(StatusCode, String),

    #[error("Internal error: {0}")]
    Internal(ApiError),
}

impl From<ApiError> for MoneybirdApiError {
    fn from(value: ApiError) -> Self {
        match value {
            ApiError::ClientError(status, _) if status == StatusCode::UNAUTHORIZED => {
                MoneybirdApiError::Unauthorized
            }
            ApiError::ClientError(status, detail) | ApiError::ServerError(status, detail) => {
                MoneybirdApiError::Api(status, detail)
            }
            e => MoneybirdApiError::Internal(e),
        }
    }
}
