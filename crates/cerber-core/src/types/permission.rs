//! Canonical permission grant records.

use serde::{Deserialize, Serialize};

/// Resource type carried by every grant Cerber issues.
pub const REPOSITORY: &str = "repository";

/// Actions granted on one resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    /// Resource type, always [`REPOSITORY`] for grants Cerber produces.
    #[serde(rename = "type")]
    pub kind: String,
    /// Resource name.
    pub name: String,
    /// Granted verbs, in canonical order.
    pub actions: Vec<String>,
}

impl Permission {
    /// Creates a repository grant.
    pub fn repository(name: impl Into<String>, actions: Vec<String>) -> Self {
        Self {
            kind: REPOSITORY.to_string(),
            name: name.into(),
            actions,
        }
    }
}
