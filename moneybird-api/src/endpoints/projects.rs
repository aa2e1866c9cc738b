use super::AdministrationId;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tower_api_client::{Request, RequestData};

// Common

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
}

// Requests

#[derive(Default, Debug, Clone)]
pub struct ListProjects {
    administration_id: AdministrationId,
}

impl ListProjects {
    pub fn new(administration_id: AdministrationId) -> Self {
        Self { administration_id }
    }
}

impl Request for ListProjects {
    type Data = ();
    type Response = Vec<Project>;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/{}/projects.json", self.administration_id).into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Empty
    }
}
