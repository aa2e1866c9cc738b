use chrono::{Duration, Utc};
use moneybird_api::endpoints::contacts::Contact;
use moneybird_api::endpoints::projects::Project;
use moneybird_api::endpoints::time_entries::TimeEntry;
use moneybird_api::endpoints::users::User;
use moneybird_api::endpoints::AdministrationId;
use moneybird_api::{Client, MoneybirdApiError, Request};

use crate::config::MoneybirdConfiguration;

/// Seconds subtracted from a clock-in timestamp. A created timestamp must
/// not land ahead of the upstream server's clock; Moneybird rejects
/// start times in the future.
const CLOCK_SKEW_SECONDS: i64 = 15;

#[derive(Debug)]
pub struct ReferenceData {
    pub users: Vec<User>,
    pub projects: Vec<Project>,
    pub contacts: Vec<Contact>,
}

/// Thin forwarding layer over the Moneybird API. Each call builds its own
/// client around the caller's token; no state is shared across requests.
pub struct Gateway {
    administration_id: AdministrationId,
    base_url: String,
    service_token: Option<String>,
}

impl Gateway {
    pub fn new(config: &MoneybirdConfiguration) -> Self {
        Self {
            administration_id: AdministrationId::from(config.administration_id.as_str()),
            base_url: config.api_base_url.clone(),
            service_token: config.service_token.clone(),
        }
    }

    fn client(&self, token: &str) -> Client {
        Client::with_base_url(&self.base_url, token)
    }

    /// Writes run under the shared service identity when one is configured;
    /// otherwise they use the caller's session token. Reads always use the
    /// session token.
    pub fn write_identity<'a>(&'a self, session_token: Option<&'a str>) -> Option<&'a str> {
        self.service_token.as_deref().or(session_token)
    }

    /// Users, projects and contacts, fetched concurrently. A failure in any
    /// one collapses the whole call.
    pub async fn reference_data(&self, token: &str) -> Result<ReferenceData, MoneybirdApiError> {
        let client = self.client(token);
        let (users, projects, contacts) = tokio::try_join!(
            client.send(
                Request::users()
                    .with_administration(self.administration_id.clone())
                    .list()
            ),
            client.send(
                Request::projects()
                    .with_administration(self.administration_id.clone())
                    .list()
            ),
            client.send(
                Request::contacts()
                    .with_administration(self.administration_id.clone())
                    .list()
            ),
        )?;

        Ok(ReferenceData {
            users,
            projects,
            contacts,
        })
    }

    /// The one entry for this user with no end timestamp, if any. Fails
    /// open: an upstream error reads as "not clocked in" so the page stays
    /// usable while Moneybird is degraded.
    pub async fn active_entry(&self, token: &str, user_id: &str) -> Option<TimeEntry> {
        let request = Request::time_entries()
            .with_administration(self.administration_id.clone())
            .list()
            .filter(format!(
                "user_id:{},state:all,include_active:true",
                user_id
            ));

        match self.client(token).send(request).await {
            Ok(entries) => entries
                .into_iter()
                .find(|entry| entry.user_id == user_id && entry.is_running()),
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    user_id = %user_id,
                    "Active entry lookup failed, treating as none"
                );
                None
            }
        }
    }

    pub async fn clock_in(
        &self,
        token: &str,
        user_id: &str,
        description: &str,
        project_id: Option<String>,
        contact_id: Option<String>,
    ) -> Result<TimeEntry, MoneybirdApiError> {
        let started_at = Utc::now() - Duration::seconds(CLOCK_SKEW_SECONDS);

        let mut request = Request::time_entries()
            .with_administration(self.administration_id.clone())
            .create(user_id, description, started_at);
        if let Some(project_id) = project_id {
            request = request.project_id(project_id);
        }
        if let Some(contact_id) = contact_id {
            request = request.contact_id(contact_id);
        }

        let entry = self.client(token).send(request).await?;
        tracing::info!(user_id = %user_id, entry_id = %entry.id, "Clocked in");
        Ok(entry)
    }

    /// Patches the entry with the current timestamp as its end time. An
    /// already-stopped entry is patched all the same; rejecting a double
    /// stop is upstream's call.
    pub async fn clock_out(
        &self,
        token: &str,
        entry_id: &str,
    ) -> Result<TimeEntry, MoneybirdApiError> {
        let request = Request::time_entries()
            .with_administration(self.administration_id.clone())
            .update(entry_id)
            .ended_at(Utc::now());

        let entry = self.client(token).send(request).await?;
        tracing::info!(entry_id = %entry_id, "Clocked out");
        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway(service_token: Option<&str>) -> Gateway {
        Gateway::new(&MoneybirdConfiguration {
            administration_id: "123".to_string(),
            api_base_url: "https://moneybird.example/api/v2".to_string(),
            service_token: service_token.map(String::from),
            scopes: vec!["time_entries".to_string()],
        })
    }

    #[test]
    fn writes_prefer_the_service_identity() {
        let gateway = gateway(Some("service-tok"));
        assert_eq!(gateway.write_identity(Some("session-tok")), Some("service-tok"));
        assert_eq!(gateway.write_identity(None), Some("service-tok"));
    }

    #[test]
    fn writes_fall_back_to_the_session_token() {
        let gateway = gateway(None);
        assert_eq!(gateway.write_identity(Some("session-tok")), Some("session-tok"));
        assert_eq!(gateway.write_identity(None), None);
    }
}
