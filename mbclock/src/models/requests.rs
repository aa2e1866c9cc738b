use moneybird_api::endpoints::{contacts::Contact, projects::Project, users::User};
use serde::{Deserialize, Serialize};

// GET /auth/callback
#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub error: Option<String>,
}

// POST /auth/credentials
#[derive(Debug, Deserialize)]
pub struct CredentialsForm {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

// POST /auth/token
#[derive(Debug, Deserialize)]
pub struct ManualTokenForm {
    pub token: String,
}

// GET /api/time_entries/active
#[derive(Debug, Deserialize)]
pub struct ActiveEntryParams {
    pub user_id: String,
}

// POST /api/clock_in
#[derive(Debug, Deserialize)]
pub struct ClockInRequest {
    pub user_id: String,
    pub description: String,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub contact_id: Option<String>,
}

// POST /api/clock_out
#[derive(Debug, Deserialize)]
pub struct ClockOutRequest {
    pub entry_id: String,
}

// GET /api/data
//
// An upstream failure yields empty lists plus an error description, so the
// page keeps rendering instead of propagating a fault.
#[derive(Debug, Serialize)]
pub struct ReferenceDataResponse {
    pub users: Vec<User>,
    pub projects: Vec<Project>,
    pub contacts: Vec<Contact>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// Health check
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
