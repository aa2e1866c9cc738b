use super::AdministrationId;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tower_api_client::{Request, RequestData};

// Common

/// Contact as listed by Moneybird. Company and person names are all
/// nullable upstream, a contact has at least one of them filled in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    pub id: String,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub firstname: Option<String>,
    #[serde(default)]
    pub lastname: Option<String>,
}

// Requests

#[derive(Default, Debug, Clone)]
pub struct ListContacts {
    administration_id: AdministrationId,
}

impl ListContacts {
    pub fn new(administration_id: AdministrationId) -> Self {
        Self { administration_id }
    }
}

impl Request for ListContacts {
    type Data = ();
    type Response = Vec<Contact>;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/{}/contacts.json", self.administration_id).into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Empty
    }
}
