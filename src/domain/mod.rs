pub mod user;
pub mod faker;

pub use user::*;
