use super::AdministrationId;
use crate::macros::setter;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tower_api_client::{Method, Request, RequestData};

// Common

/// A work session. An entry with no `ended_at` is currently running.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeEntry {
    pub id: String,
    pub user_id: String,
    pub description: String,
    pub started_at: DateTime<Utc>,
    #[serde(default)]
    pub ended_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub contact_id: Option<String>,
}

impl TimeEntry {
    pub fn is_running(&self) -> bool {
        self.ended_at.is_none()
    }
}

// Requests

#[derive(Default, Debug, Clone)]
pub struct ListTimeEntries {
    administration_id: AdministrationId,
    filter: Option<FilterQuery>,
}

impl ListTimeEntries {
    pub fn new(administration_id: AdministrationId) -> Self {
        Self {
            administration_id,
            filter: None,
        }
    }

    /// Raw Moneybird filter expression, e.g. `user_id:42,state:all`.
    pub fn filter<T>(mut self, filter: T) -> Self
    where
        T: Into<String>,
    {
        self.filter = Some(FilterQuery {
            filter: filter.into(),
        });
        self
    }
}

impl Request for ListTimeEntries {
    type Data = FilterQuery;
    type Response = Vec<TimeEntry>;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/{}/time_entries.json", self.administration_id).into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        if let Some(ref query) = self.filter {
            RequestData::Query(query)
        } else {
            RequestData::Empty
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FilterQuery {
    pub filter: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateTimeEntry {
    #[serde(skip)]
    administration_id: AdministrationId,
    time_entry: NewTimeEntry,
}

impl CreateTimeEntry {
    pub fn new<U, D>(
        administration_id: AdministrationId,
        user_id: U,
        description: D,
        started_at: DateTime<Utc>,
    ) -> Self
    where
        U: Into<String>,
        D: Into<String>,
    {
        Self {
            administration_id,
            time_entry: NewTimeEntry {
                user_id: user_id.into(),
                description: description.into(),
                started_at,
                project_id: None,
                contact_id: None,
            },
        }
    }

    setter!(opt time_entry.project_id: String);
    setter!(opt time_entry.contact_id: String);
}

impl Request for CreateTimeEntry {
    type Data = Self;
    type Response = TimeEntry;
    const METHOD: Method = Method::POST;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/{}/time_entries.json", self.administration_id).into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NewTimeEntry {
    pub user_id: String,
    pub description: String,
    pub started_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateTimeEntry {
    #[serde(skip)]
    administration_id: AdministrationId,
    #[serde(skip)]
    time_entry_id: String,
    time_entry: TimeEntryUpdate,
}

impl UpdateTimeEntry {
    pub fn new<T>(administration_id: AdministrationId, time_entry_id: T) -> Self
    where
        T: Into<String>,
    {
        Self {
            administration_id,
            time_entry_id: time_entry_id.into(),
            time_entry: TimeEntryUpdate::default(),
        }
    }

    setter!(opt time_entry.description: String);
    setter!(opt time_entry.ended_at: DateTime<Utc>);
}

impl Request for UpdateTimeEntry {
    type Data = Self;
    type Response = TimeEntry;
    const METHOD: Method = Method::PATCH;

    fn endpoint(&self) -> Cow<'_, str> {
        format!(
            "/{}/time_entries/{}.json",
            self.administration_id, self.time_entry_id
        )
        .into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self)
    }
}

#[derive(Default, Debug, Clone, Serialize)]
pub struct TimeEntryUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<DateTime<Utc>>,
}
