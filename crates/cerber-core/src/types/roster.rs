//! Users and groups held by a zone.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A named set of permitted actions, each in `resource:action` form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Group name, unique within its zone.
    pub name: String,
    /// Granted actions.
    #[serde(default)]
    pub actions: Vec<String>,
}

impl Group {
    /// Creates a group.
    pub fn new<I, S>(name: impl Into<String>, actions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            actions: actions.into_iter().map(Into::into).collect(),
        }
    }
}

/// A single user of a zone.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// User name, unique within its zone.
    pub name: String,
    /// Password digest produced by the zone's hashing scheme.
    #[serde(alias = "password")]
    pub passwd: String,
    /// Names of the groups the user belongs to, resolved on demand.
    #[serde(default)]
    pub groups: Vec<String>,
}

impl User {
    /// Creates a user.
    pub fn new<I, S>(name: impl Into<String>, passwd: impl Into<String>, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            passwd: passwd.into(),
            groups: groups.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("name", &self.name)
            .field("passwd", &"<redacted>")
            .field("groups", &self.groups)
            .finish()
    }
}
