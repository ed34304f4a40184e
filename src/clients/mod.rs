//! Typed clients over the generic resource actor.

#[macro_use]
mod macros;
mod user_client;

pub use user_client::UserClient;
