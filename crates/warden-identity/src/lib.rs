//! # warden-identity
//!
//! Reference identity backend for Warden. The token core only sees it
//! through the `CredentialVerifier` and `RoleClaimStore` traits from
//! `warden-core`; any other backend honouring those contracts can replace it.
//!
//! ## Modules
//!
//! - `password`: Argon2id hashing and length policy
//! - `store`: concurrent in-memory user, role, and claim storage
//! - `service`: user management operations
//! - `seed`: administrator bootstrap

pub mod password;
pub mod seed;
pub mod service;
pub mod store;

pub use password::{PasswordHasher, PasswordPolicy};
pub use seed::seed_admin;
pub use service::{NewUser, UserChanges, UserService};
pub use store::{InMemoryIdentityStore, UserRecord};
