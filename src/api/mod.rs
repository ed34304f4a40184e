//! HTTP surface of the User Store.

pub mod users;

use axum::{http::StatusCode, routing::get, Router};
use serde::{Deserialize, Serialize};

use crate::clients::UserClient;

/// Shared state for the HTTP handlers.
#[derive(Clone)]
pub struct ApiState {
    pub users: UserClient,
}

/// Error body returned by every failing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

pub fn router(users: UserClient) -> Router {
    Router::new()
        .route("/api/users", get(users::list_users).post(users::create_user))
        .fallback(|| async { (StatusCode::NOT_FOUND, "Not found") })
        .with_state(ApiState { users })
}
