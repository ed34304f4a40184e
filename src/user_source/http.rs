use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use super::{SourceError, UserSource};
use crate::api::ErrorBody;
use crate::domain::{User, UserCreate};

/// [`UserSource`] backed by the `/api/users` endpoints of a running server.
#[derive(Debug, Clone)]
pub struct HttpUserSource {
    client: Client,
    users_url: String,
}

impl HttpUserSource {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            users_url: format!("{}/api/users", base_url.trim_end_matches('/')),
        }
    }

    pub fn users_url(&self) -> &str {
        &self.users_url
    }
}

#[async_trait]
impl UserSource for HttpUserSource {
    #[instrument(skip(self), fields(url = %self.users_url))]
    async fn fetch_users(&self) -> Result<Vec<User>, SourceError> {
        debug!("Sending request");
        let response = self.client.get(&self.users_url).send().await.map_err(transport)?;
        decode(response).await
    }

    #[instrument(skip(self, payload), fields(url = %self.users_url))]
    async fn submit_user(&self, payload: UserCreate) -> Result<User, SourceError> {
        debug!("Sending request");
        let response = self
            .client
            .post(&self.users_url)
            .json(&payload)
            .send()
            .await
            .map_err(transport)?;
        decode(response).await
    }
}

fn transport(err: reqwest::Error) -> SourceError {
    SourceError::Transport(err.to_string())
}

/// Decodes a success body as `T`. An `{ "error": ... }` body is a server
/// error whatever the status code says.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, SourceError> {
    let status = response.status();
    let body = response.bytes().await.map_err(transport)?;

    if let Ok(ErrorBody { error }) = serde_json::from_slice::<ErrorBody>(&body) {
        return Err(SourceError::Server(error));
    }
    if !status.is_success() {
        return Err(SourceError::Server(format!("HTTP {status}")));
    }
    serde_json::from_slice(&body).map_err(|e| SourceError::Decode(e.to_string()))
}
