pub mod contacts;
pub mod projects;
pub mod time_entries;
pub mod users;

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Moneybird administration (tenant) identifier. Scopes every API path.
///
/// Moneybird identifiers are opaque decimal strings, serialized as JSON
/// strings, and are kept as such rather than parsed into numbers.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdministrationId(String);

impl AdministrationId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for AdministrationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AdministrationId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for AdministrationId {
    fn from(s: String) -> Self {
        Self(s)
    }
}
