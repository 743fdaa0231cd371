//! Identity model and the collaborator traits the token core consumes.

pub mod model;
pub mod store;

pub use model::{Claim, Identity};
pub use store::{CredentialVerifier, RoleClaimStore};
