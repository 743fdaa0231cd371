//! User management: create, update, lookup, delete, password, roles, claims.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use warden_core::error::AppError;
use warden_core::identity::{Claim, Identity};
use warden_core::result::AppResult;

use crate::password::{PasswordHasher, PasswordPolicy};
use crate::store::{InMemoryIdentityStore, UserRecord};

/// Data for creating a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Login name (unique, case-insensitive).
    pub username: String,
    /// Email address.
    pub email: Option<String>,
    /// Initial password.
    pub password: String,
    /// Display name.
    pub full_name: Option<String>,
}

/// Partial profile update. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    /// New login name.
    pub username: Option<String>,
    /// New email address.
    pub email: Option<String>,
    /// New display name.
    pub full_name: Option<String>,
}

/// Handles user management operations.
#[derive(Debug, Clone)]
pub struct UserService {
    /// Backing store.
    store: Arc<InMemoryIdentityStore>,
    /// Password hasher.
    hasher: PasswordHasher,
    /// Password policy.
    policy: PasswordPolicy,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(store: Arc<InMemoryIdentityStore>, policy: PasswordPolicy) -> Self {
        Self {
            store,
            hasher: PasswordHasher::new(),
            policy,
        }
    }

    /// Creates a user with a fresh UUID.
    pub async fn create(&self, new_user: NewUser) -> AppResult<Identity> {
        let username = new_user.username.trim();
        if username.is_empty() {
            return Err(AppError::validation("Username cannot be empty"));
        }
        self.policy.validate(&new_user.password)?;

        let password_hash = self.hasher.hash_password(&new_user.password)?;
        let mut identity = Identity::new(Uuid::new_v4().to_string(), username);
        identity.email = new_user.email.filter(|e| !e.trim().is_empty());
        identity.full_name = new_user.full_name.filter(|n| !n.trim().is_empty());

        let now = Utc::now();
        self.store.insert(UserRecord {
            identity: identity.clone(),
            password_hash,
            roles: Vec::new(),
            claims: Vec::new(),
            created_at: now,
            updated_at: now,
        })?;

        info!(user_id = %identity.id, username = %identity.username, "User created");
        Ok(identity)
    }

    /// Applies `changes` to the user with `id`.
    pub async fn update(&self, id: &str, changes: UserChanges) -> AppResult<Identity> {
        let mut identity = self.get_by_id(id).await?;

        if let Some(username) = changes.username {
            let username = username.trim();
            if username.is_empty() {
                return Err(AppError::validation("Username cannot be empty"));
            }
            identity.username = username.to_string();
        }
        if let Some(email) = changes.email {
            identity.email = Some(email).filter(|e| !e.trim().is_empty());
        }
        if let Some(full_name) = changes.full_name {
            identity.full_name = Some(full_name).filter(|n| !n.trim().is_empty());
        }

        let record = self.store.update_identity(identity)?;
        info!(user_id = %id, "User updated");
        Ok(record.identity)
    }

    /// Gets a user by id.
    pub async fn get_by_id(&self, id: &str) -> AppResult<Identity> {
        self.store
            .get(id)
            .map(|r| r.identity)
            .ok_or_else(|| AppError::not_found("User not found."))
    }

    /// Gets a user by username, ignoring case.
    pub async fn get_by_username(&self, username: &str) -> AppResult<Option<Identity>> {
        Ok(self.store.get_by_username(username).map(|r| r.identity))
    }

    /// Lists all users in creation order.
    pub async fn list(&self) -> AppResult<Vec<Identity>> {
        Ok(self.store.list().into_iter().map(|r| r.identity).collect())
    }

    /// Deletes a user.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        if !self.store.remove(id) {
            return Err(AppError::not_found("User not found."));
        }
        info!(user_id = %id, "User deleted");
        Ok(())
    }

    /// Changes a user's password after checking the current one.
    pub async fn change_password(
        &self,
        id: &str,
        current_password: &str,
        new_password: &str,
    ) -> AppResult<()> {
        let record = self
            .store
            .get(id)
            .ok_or_else(|| AppError::not_found("User not found."))?;

        if !self
            .hasher
            .verify_password(current_password, &record.password_hash)?
        {
            return Err(AppError::invalid_credentials());
        }

        self.policy.validate(new_password)?;
        let new_hash = self.hasher.hash_password(new_password)?;
        self.store.set_password_hash(id, new_hash)?;

        info!(user_id = %id, "Password changed");
        Ok(())
    }

    /// Role names of a user, in assignment order.
    pub async fn get_roles(&self, id: &str) -> AppResult<Vec<String>> {
        self.store
            .get(id)
            .map(|r| r.roles)
            .ok_or_else(|| AppError::not_found("User not found."))
    }

    /// Adds a user to `role`, registering the role if needed.
    ///
    /// Returns `false` if the user already had it.
    pub async fn add_to_role(&self, id: &str, role: &str) -> AppResult<bool> {
        let role = role.trim();
        if role.is_empty() {
            return Err(AppError::validation("Role name cannot be empty"));
        }
        if self.store.create_role(role) {
            info!(role = %role, "Role created");
        }
        let added = self.store.add_role(id, role)?;
        if added {
            info!(user_id = %id, role = %role, "User added to role");
        }
        Ok(added)
    }

    /// Removes a user from `role`. Returns `false` if not a member.
    pub async fn remove_from_role(&self, id: &str, role: &str) -> AppResult<bool> {
        let removed = self.store.remove_role(id, role)?;
        if removed {
            info!(user_id = %id, role = %role, "User removed from role");
        }
        Ok(removed)
    }

    /// Attaches a custom claim to a user.
    pub async fn add_claim(&self, id: &str, claim: Claim) -> AppResult<()> {
        if claim.name.trim().is_empty() {
            return Err(AppError::validation("Claim name cannot be empty"));
        }
        self.store.add_claim(id, claim)
    }
}
