//! Identity core: the actor model, registration validation, credential
//! hashing, and access token issuance.
//!
//! Everything in this module is independent of the HTTP layer; handlers in
//! [`crate::api`] orchestrate these pieces.

pub mod error;
pub mod models;
pub mod password;
pub mod repo;
pub mod token;
pub mod validate;

pub use error::IdentityError;
pub use models::{ActorKeys, ActorKind, Identity, Registration};
pub use token::TokenKeys;
