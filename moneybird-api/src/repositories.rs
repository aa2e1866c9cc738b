use crate::endpoints::{
    AdministrationId,
    contacts::ListContacts,
    projects::ListProjects,
    time_entries::{CreateTimeEntry, ListTimeEntries, UpdateTimeEntry},
    users::ListUsers,
};
use chrono::{DateTime, Utc};

#[derive(Default)]
pub struct UserRepository {
    administration_id: AdministrationId,
}

impl UserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_administration(mut self, administration_id: AdministrationId) -> Self {
        self.administration_id = administration_id;
        self
    }

    pub fn list(&self) -> ListUsers {
        ListUsers::new(self.administration_id.clone())
    }
}

#[derive(Default)]
pub struct ProjectRepository {
    administration_id: AdministrationId,
}

impl ProjectRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_administration(mut self, administration_id: AdministrationId) -> Self {
        self.administration_id = administration_id;
        self
    }

    pub fn list(&self) -> ListProjects {
        ListProjects::new(self.administration_id.clone())
    }
}

#[derive(Default)]
pub struct ContactRepository {
    administration_id: AdministrationId,
}

impl ContactRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_administration(mut self, administration_id: AdministrationId) -> Self {
        self.administration_id = administration_id;
        self
    }

    pub fn list(&self) -> ListContacts {
        ListContacts::new(self.administration_id.clone())
    }
}

#[derive(Default)]
pub struct TimeEntryRepository {
    administration_id: AdministrationId,
}

impl TimeEntryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_administration(mut self, administration_id: AdministrationId) -> Self {
        self.administration_id = administration_id;
        self
    }

    pub fn list(&self) -> ListTimeEntries {
        ListTimeEntries::new(self.administration_id.clone())
    }

    pub fn create(
        &self,
        user_id: impl Into<String>,
        description: impl Into<String>,
        started_at: DateTime<Utc>,
    ) -> CreateTimeEntry {
        CreateTimeEntry::new(
            self.administration_id.clone(),
            user_id,
            description,
            started_at,
        )
    }

    pub fn update(&self, time_entry_id: impl Into<String>) -> UpdateTimeEntry {
        UpdateTimeEntry::new(self.administration_id.clone(), time_entry_id)
    }
}
