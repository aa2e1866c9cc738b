pub mod endpoints;
mod error;
mod macros;
pub mod repositories;

pub use crate::error::MoneybirdApiError;
use repositories::*;
use tower_api_client::{Client as ApiClient, Request as ApiRequest};

const BASE_URL: &str = "https://moneybird.com/api/v2";

pub struct Client {
    inner: ApiClient,
}

impl Client {
    pub fn new(access_token: &str) -> Self {
        Self::with_base_url(BASE_URL, access_token)
    }

    /// Client against an explicit base URL, used when the API host is not
    /// the public Moneybird endpoint (tests, staging proxies).
    pub fn with_base_url(base_url: &str, access_token: &str) -> Self {
        Self {
            inner: ApiClient::new(base_url).bearer_auth(access_token),
        }
    }

    pub async fn send<R>(&self, request: R) -> Result<R::Response, MoneybirdApiError>
    where
        R: ApiRequest,
    {
        self.inner.send(request).await.map_err(From::from)
    }
}

pub struct Request;

impl Request {
    pub fn new() -> Self {
        Self {}
    }

    pub fn contacts() -> ContactRepository {
        ContactRepository::new()
    }

    pub fn projects() -> ProjectRepository {
        ProjectRepository::new()
    }

    pub fn time_entries() -> TimeEntryRepository {
        TimeEntryRepository::new()
    }

    pub fn users() -> UserRepository {
        UserRepository::new()
    }
}
