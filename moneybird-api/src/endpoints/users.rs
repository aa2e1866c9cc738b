use super::AdministrationId;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tower_api_client::{Request, RequestData};

// Common

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
}

// Requests

#[derive(Default, Debug, Clone)]
pub struct ListUsers {
    administration_id: AdministrationId,
}

impl ListUsers {
    pub fn new(administration_id: AdministrationId) -> Self {
        Self { administration_id }
    }
}

impl Request for ListUsers {
    type Data = ();
    type Response = Vec<User>;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/{}/users.json", self.administration_id).into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Empty
    }
}
