//! `/api/users` endpoints.

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use tracing::{error, info, warn};

use super::{ApiState, ErrorBody};
use crate::domain::UserCreate;
use crate::user_actor::UserError;

fn error_response(status: StatusCode, error: impl Into<String>) -> Response {
    (status, Json(ErrorBody { error: error.into() })).into_response()
}

/// Lists all users, newest first.
///
/// GET /api/users
pub async fn list_users(State(state): State<ApiState>) -> Response {
    match state.users.list_users().await {
        Ok(users) => {
            info!(count = users.len(), "Listed users");
            (StatusCode::OK, Json(users)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Listing users failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

/// Creates a user from `{ fullName, email }`.
///
/// POST /api/users
///
/// The body is read as JSON whatever `Content-Type` the client sent.
pub async fn create_user(State(state): State<ApiState>, body: Bytes) -> Response {
    let payload = match serde_json::from_slice::<UserCreate>(&body) {
        Ok(payload) => payload,
        Err(e) => {
            warn!(error = %e, "Rejected create body");
            return error_response(StatusCode::BAD_REQUEST, format!("invalid request body: {e}"));
        }
    };

    match state.users.create_user(payload).await {
        Ok(user) => {
            info!(user_id = %user.id, "Created user");
            (StatusCode::CREATED, Json(user)).into_response()
        }
        Err(e @ UserError::ValidationError(_)) => error_response(StatusCode::BAD_REQUEST, e.to_string()),
        Err(e @ UserError::AlreadyExists(_)) => error_response(StatusCode::CONFLICT, e.to_string()),
        Err(e) => {
            error!(error = %e, "Creating user failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}
