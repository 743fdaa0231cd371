//! Password policy configuration.

use serde::{Deserialize, Serialize};

/// Password length policy applied when users are created or change passwords.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordConfig {
    /// Minimum password length in characters.
    #[serde(default = "default_min_length")]
    pub min_length: usize,
    /// Maximum password length in characters.
    #[serde(default = "default_max_length")]
    pub max_length: usize,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            min_length: default_min_length(),
            max_length: default_max_length(),
        }
    }
}

fn default_min_length() -> usize {
    6
}

fn default_max_length() -> usize {
    100
}
