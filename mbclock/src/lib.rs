pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;

pub use config::Configuration;
pub use error::ServerError;

use axum::{
    routing::{get, post},
    Router,
};
use services::Gateway;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Configuration>,
    pub gateway: Arc<Gateway>,
}

impl AppState {
    pub fn new(configuration: Configuration) -> Self {
        let gateway = Arc::new(Gateway::new(&configuration.moneybird));
        Self {
            config: Arc::new(configuration),
            gateway,
        }
    }
}

/// The full application router, nested under the deployment sub-path when
/// one is configured.
pub fn app(state: AppState) -> Router {
    let root_path = state.config.server.root_path();

    let router = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/auth/login", get(handlers::initiate_login))
        .route("/auth/credentials", post(handlers::submit_credentials))
        .route("/auth/callback", get(handlers::oauth_callback))
        .route("/auth/token", post(handlers::set_manual_token))
        .route("/auth/logout", post(handlers::logout))
        .route("/api/data", get(handlers::reference_data))
        .route("/api/time_entries/active", get(handlers::active_entry))
        .route("/api/clock_in", post(handlers::clock_in))
        .route("/api/clock_out", post(handlers::clock_out))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if root_path == "/" {
        router
    } else {
        Router::new().nest(&root_path, router)
    }
}
