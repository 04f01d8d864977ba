//! User domain model.

use serde::{Deserialize, Serialize};

/// The authenticated account driving the dashboard.
///
/// Created on login/signup and dropped on logout; it lives exactly as long as
/// the session that wraps it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl User {
    pub fn new(id: impl Into<String>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
        }
    }

    /// Upper-cased first character of the display name, as shown in the header avatar.
    pub fn initial(&self) -> Option<char> {
        self.name.chars().next().map(|c| c.to_ascii_uppercase())
    }
}
