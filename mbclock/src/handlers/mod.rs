mod callback;
mod clock;
mod data;
mod login;
mod token;

pub use callback::oauth_callback;
pub use clock::{active_entry, clock_in, clock_out};
pub use data::reference_data;
pub use login::{initiate_login, submit_credentials};
pub use token::{logout, set_manual_token};

use crate::models::HealthResponse;
use axum::Json;

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
