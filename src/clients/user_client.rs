use tracing::{debug, instrument};
use crate::domain::{User, UserCreate};
use crate::user_actor::UserError;
use crate::actor_framework::ResourceClient;

/// Client for interacting with the User actor.
#[derive(Clone)]
pub struct UserClient {
    inner: ResourceClient<User>,
}

impl_basic_client!(UserClient, User, UserError, user);

impl UserClient {
    #[instrument(skip(self), fields(full_name = %payload.full_name))]
    pub async fn create_user(&self, payload: UserCreate) -> Result<User, UserError> {
        debug!("Sending request");
        self.inner.create(payload).await.map_err(UserError::from)
    }
}
