//! User-specific store logic: payload validation and error mapping.

pub mod entity;
pub mod error;

pub use error::*;
