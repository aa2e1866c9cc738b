pub mod gateway;
pub mod oauth_client;
pub mod session;

pub use gateway::{Gateway, ReferenceData};
pub use oauth_client::OAuthClient;
