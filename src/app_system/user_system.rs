use tracing::{error, info, instrument};
use crate::actor_framework::ResourceActor;
use crate::clients::UserClient;
use crate::domain::{faker, User};
use crate::user_actor::UserError;

/// The User Store: one resource actor plus its client.
///
/// Responsible for starting the actor, seeding it and handling shutdown.
pub struct UserSystem {
    pub user_client: UserClient,
    handle: tokio::task::JoinHandle<()>,
}

impl UserSystem {
    /// Starts an empty store with random UUID ids.
    pub fn new() -> Self {
        let next_user_id = || uuid::Uuid::new_v4().to_string();
        let (user_actor, user_resource_client) = ResourceActor::<User>::new(32, next_user_id);
        let user_client = UserClient::new(user_resource_client);
        let handle = tokio::spawn(user_actor.run());

        Self { user_client, handle }
    }

    /// Starts a store holding `count` randomly generated users.
    #[instrument]
    pub async fn seeded(count: usize) -> Result<Self, UserError> {
        let system = Self::new();
        for _ in 0..count {
            system.user_client.create_user(faker::random_user()).await?;
        }
        info!("Store seeded");
        Ok(system)
    }

    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down user store...");
        // The actor stops once every client clone is gone.
        drop(self.user_client);

        if let Err(e) = self.handle.await {
            error!("Actor task failed: {:?}", e);
            return Err(format!("Actor task failed: {:?}", e));
        }

        info!("User store shutdown complete.");
        Ok(())
    }
}
