use crate::actor_framework::Entity;
use crate::domain::{User, UserCreate};

impl Entity for User {
    type Id = String;
    type CreatePayload = UserCreate;

    fn id(&self) -> &String { &self.id }

    /// Checks the create payload.
    ///
    /// # Rules
    /// - `full_name`: must contain a non-whitespace character
    /// - `email`: must contain `@` with text on both sides
    fn validate(params: &UserCreate) -> Result<(), String> {
        if params.full_name.trim().is_empty() {
            return Err("fullName must not be empty".to_string());
        }
        match params.email.trim().split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
            _ => Err(format!("invalid email: {:?}", params.email)),
        }
    }

    /// Creates a new User from creation parameters.
    ///
    /// # Arguments
    /// * `id` - Unique identifier for the user
    /// * `params` - User creation parameters containing full name and email
    fn from_create(id: String, params: UserCreate) -> Result<Self, String> {
        Ok(Self::new(id, params.full_name.trim(), params.email.trim()))
    }
}
