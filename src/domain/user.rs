use serde::{Deserialize, Serialize};

/// Represents a registered user in the store.
///
/// Users are created by the store and never change afterwards; `id` is
/// assigned on creation and is the only identity that matters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub full_name: String,
    pub email: String,
}

/// Payload for creating a new user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCreate {
    pub full_name: String,
    pub email: String,
}

impl User {
    /// Creates a User with a known id.
    ///
    /// # Arguments
    /// * `id` - Identifier assigned by the store
    /// * `full_name` - Display name
    /// * `email` - Contact address
    pub fn new(id: impl Into<String>, full_name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            full_name: full_name.into(),
            email: email.into(),
        }
    }

    /// First character of the name, upper-cased, used as the avatar letter.
    pub fn initial(&self) -> char {
        self.full_name
            .chars()
            .next()
            .and_then(|c| c.to_uppercase().next())
            .unwrap_or('?')
    }
}

impl UserCreate {
    pub fn new(full_name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            email: email.into(),
        }
    }
}
