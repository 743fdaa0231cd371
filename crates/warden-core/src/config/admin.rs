//! Administrator seeding configuration.

use serde::{Deserialize, Serialize};

/// Settings for the administrator account ensured at startup.
///
/// There is no default password: when seeding is enabled
/// and `password` is unset, startup fails.
#[derive(Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    /// Whether to ensure the administrator account exists at startup.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Administrator login name.
    #[serde(default = "default_username")]
    pub username: String,
    /// Administrator email address.
    #[serde(default = "default_email")]
    pub email: String,
    /// Administrator display name.
    #[serde(default = "default_full_name")]
    pub full_name: String,
    /// Initial administrator password.
    #[serde(default, skip_serializing)]
    pub password: Option<String>,
    /// Role granted to the administrator.
    #[serde(default = "default_role")]
    pub role: String,
}

impl std::fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConfig")
            .field("enabled", &self.enabled)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("full_name", &self.full_name)
            .field("password", &self.password.as_ref().map(|_| "****"))
            .field("role", &self.role)
            .finish()
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            username: default_username(),
            email: default_email(),
            full_name: default_full_name(),
            password: None,
            role: default_role(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_username() -> String {
    "admin".to_string()
}

fn default_email() -> String {
    "admin@localhost".to_string()
}

fn default_full_name() -> String {
    "Administrator".to_string()
}

fn default_role() -> String {
    "Admin".to_string()
}
