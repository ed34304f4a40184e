//! Where the carousel gets its users from.
//!
//! [`UserSource`] is the request/response boundary of the User Store. The
//! in-process [`UserClient`] and the HTTP [`HttpUserSource`] both implement it.

mod http;
#[cfg(test)]
pub mod fake;

use async_trait::async_trait;
use thiserror::Error;

use crate::clients::UserClient;
use crate::domain::{User, UserCreate};
use crate::user_actor::UserError;

pub use http::HttpUserSource;

/// Failure of a single list or create request.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SourceError {
    /// Message supplied by the store, shown to the user as-is.
    #[error("{0}")]
    Server(String),
    #[error("request failed: {0}")]
    Transport(String),
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl From<UserError> for SourceError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::ActorCommunicationError(msg) => SourceError::Transport(msg),
            other => SourceError::Server(other.to_string()),
        }
    }
}

#[async_trait]
pub trait UserSource: Send + Sync {
    /// Current list, newest user first.
    async fn fetch_users(&self) -> Result<Vec<User>, SourceError>;

    /// Create a user and return it as stored.
    async fn submit_user(&self, payload: UserCreate) -> Result<User, SourceError>;
}

#[async_trait]
impl UserSource for UserClient {
    async fn fetch_users(&self) -> Result<Vec<User>, SourceError> {
        Ok(self.list_users().await?)
    }

    async fn submit_user(&self, payload: UserCreate) -> Result<User, SourceError> {
        Ok(self.create_user(payload).await?)
    }
}
