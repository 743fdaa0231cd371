//! Concurrent in-memory identity storage.

use std::sync::OnceLock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::{DashMap, DashSet};
use tracing::debug;

use warden_core::error::AppError;
use warden_core::identity::{Claim, CredentialVerifier, Identity, RoleClaimStore};
use warden_core::result::AppResult;

use crate::password::PasswordHasher;

/// A stored user: profile, password hash, roles, and custom claims.
#[derive(Debug, Clone)]
pub struct UserRecord {
    /// Public profile.
    pub identity: Identity,
    /// Argon2 PHC hash.
    pub password_hash: String,
    /// Role names in assignment order.
    pub roles: Vec<String>,
    /// Custom claims in assignment order.
    pub claims: Vec<Claim>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Users keyed by id with a case-insensitive username index.
#[derive(Debug, Default)]
pub struct InMemoryIdentityStore {
    /// Records by id.
    users: DashMap<String, UserRecord>,
    /// Lowercased username to id.
    usernames: DashMap<String, String>,
    /// Known role names.
    roles: DashSet<String>,
    /// Password hasher used by `check_password`.
    hasher: PasswordHasher,
    /// Hash checked against when the login name is unknown.
    decoy_hash: OnceLock<String>,
}

const DECOY_PASSWORD: &str = "warden-decoy-password";

fn username_key(username: &str) -> String {
    username.trim().to_lowercase()
}

impl InMemoryIdentityStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a new record, claiming its username.
    pub fn insert(&self, record: UserRecord) -> AppResult<()> {
        match self.usernames.entry(username_key(&record.identity.username)) {
            Entry::Occupied(_) => {
                return Err(AppError::conflict(format!(
                    "Username '{}' is already taken",
                    record.identity.username
                )));
            }
            Entry::Vacant(slot) => {
                slot.insert(record.identity.id.clone());
            }
        }

        debug!(user_id = %record.identity.id, "Inserted user");
        self.users.insert(record.identity.id.clone(), record);
        Ok(())
    }

    /// Returns a copy of the record with `id`.
    pub fn get(&self, id: &str) -> Option<UserRecord> {
        self.users.get(id).map(|r| r.value().clone())
    }

    /// Returns a copy of the record whose username matches case-insensitively.
    pub fn get_by_username(&self, username: &str) -> Option<UserRecord> {
        let id = self.usernames.get(&username_key(username))?.value().clone();
        self.get(&id)
    }

    /// All records, ordered by creation time.
    pub fn list(&self) -> Vec<UserRecord> {
        let mut records: Vec<UserRecord> = self.users.iter().map(|r| r.value().clone()).collect();
        records.sort_by_key(|r| r.created_at);
        records
    }

    /// Replaces the profile of an existing user.
    ///
    /// The id is fixed; a username change re-claims the index entry and
    /// fails with a conflict if the new name is taken.
    pub fn update_identity(&self, identity: Identity) -> AppResult<UserRecord> {
        let mut entry = self
            .users
            .get_mut(&identity.id)
            .ok_or_else(|| AppError::not_found("User not found."))?;

        let old_key = username_key(&entry.identity.username);
        let new_key = username_key(&identity.username);
        if old_key != new_key {
            match self.usernames.entry(new_key) {
                Entry::Occupied(_) => {
                    return Err(AppError::conflict(format!(
                        "Username '{}' is already taken",
                        identity.username
                    )));
                }
                Entry::Vacant(slot) => {
                    slot.insert(identity.id.clone());
                }
            }
            self.usernames.remove(&old_key);
        }

        entry.identity = identity;
        entry.updated_at = Utc::now();
        Ok(entry.clone())
    }

    /// Replaces the stored password hash.
    pub fn set_password_hash(&self, id: &str, password_hash: String) -> AppResult<()> {
        let mut entry = self
            .users
            .get_mut(id)
            .ok_or_else(|| AppError::not_found("User not found."))?;
        entry.password_hash = password_hash;
        entry.updated_at = Utc::now();
        Ok(())
    }

    /// Removes a user. Returns `true` if one was removed.
    pub fn remove(&self, id: &str) -> bool {
        match self.users.remove(id) {
            Some((_, record)) => {
                self.usernames
                    .remove_if(&username_key(&record.identity.username), |_, owner| owner == id);
                true
            }
            None => false,
        }
    }

    /// Registers a role name. Returns `false` if it already existed.
    pub fn create_role(&self, role: &str) -> bool {
        self.roles.insert(role.to_string())
    }

    /// Adds `role` to the user. Returns `false` if already a member.
    pub fn add_role(&self, id: &str, role: &str) -> AppResult<bool> {
        let mut entry = self
            .users
            .get_mut(id)
            .ok_or_else(|| AppError::not_found("User not found."))?;
        if entry.roles.iter().any(|r| r == role) {
            return Ok(false);
        }
        entry.roles.push(role.to_string());
        entry.updated_at = Utc::now();
        Ok(true)
    }

    /// Removes `role` from the user. Returns `false` if not a member.
    pub fn remove_role(&self, id: &str, role: &str) -> AppResult<bool> {
        let mut entry = self
            .users
            .get_mut(id)
            .ok_or_else(|| AppError::not_found("User not found."))?;
        let before = entry.roles.len();
        entry.roles.retain(|r| r != role);
        let removed = entry.roles.len() != before;
        if removed {
            entry.updated_at = Utc::now();
        }
        Ok(removed)
    }

    /// Appends a custom claim to the user.
    pub fn add_claim(&self, id: &str, claim: Claim) -> AppResult<()> {
        let mut entry = self
            .users
            .get_mut(id)
            .ok_or_else(|| AppError::not_found("User not found."))?;
        entry.claims.push(claim);
        entry.updated_at = Utc::now();
        Ok(())
    }

    /// Number of stored users.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Returns `true` if no users are stored.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait]
impl CredentialVerifier for InMemoryIdentityStore {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<Identity>> {
        if username.trim().is_empty() {
            return Ok(None);
        }
        Ok(self.get_by_username(username).map(|r| r.identity))
    }

    async fn check_password(&self, identity: &Identity, password: &str) -> AppResult<bool> {
        let Some(record) = self.get(&identity.id) else {
            return Ok(false);
        };
        self.hasher.verify_password(password, &record.password_hash)
    }

    async fn check_unknown_password(&self, password: &str) -> AppResult<()> {
        let hash = match self.decoy_hash.get() {
            Some(hash) => hash,
            None => {
                let hash = self.hasher.hash_password(DECOY_PASSWORD)?;
                self.decoy_hash.get_or_init(|| hash)
            }
        };
        self.hasher.verify_password(password, hash)?;
        Ok(())
    }
}

#[async_trait]
impl RoleClaimStore for InMemoryIdentityStore {
    async fn get_roles(&self, identity: &Identity) -> AppResult<Vec<String>> {
        self.get(&identity.id)
            .map(|r| r.roles)
            .ok_or_else(|| AppError::not_found("User not found."))
    }

    async fn get_claims(&self, identity: &Identity) -> AppResult<Vec<Claim>> {
        self.get(&identity.id)
            .map(|r| r.claims)
            .ok_or_else(|| AppError::not_found("User not found."))
    }
}
