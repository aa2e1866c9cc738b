mod pending;
mod requests;

pub use pending::PendingOAuthConfig;
pub use requests::{
    ActiveEntryParams, CallbackParams, ClockInRequest, ClockOutRequest, CredentialsForm,
    HealthResponse, ManualTokenForm, ReferenceDataResponse,
};
