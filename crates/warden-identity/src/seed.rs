//! Administrator bootstrap.

use tracing::info;

use warden_core::config::AdminConfig;
use warden_core::error::AppError;
use warden_core::identity::Identity;
use warden_core::result::AppResult;

use crate::service::{NewUser, UserService};

/// Ensures the configured administrator exists and holds the admin role.
///
/// Safe to run on every startup. Returns the administrator identity, or
/// `None` when seeding is disabled. An existing administrator keeps its
/// password; `admin.password` is only required to create one.
pub async fn seed_admin(service: &UserService, config: &AdminConfig) -> AppResult<Option<Identity>> {
    if !config.enabled {
        info!("Administrator seeding disabled");
        return Ok(None);
    }

    let admin = match service.get_by_username(&config.username).await? {
        Some(existing) => existing,
        None => {
            let password = config
                .password
                .as_deref()
                .filter(|p| !p.trim().is_empty())
                .ok_or_else(|| {
                    AppError::configuration(
                        "Administrator password is not configured (admin.password)",
                    )
                })?;

            let created = service
                .create(NewUser {
                    username: config.username.clone(),
                    email: Some(config.email.clone()),
                    password: password.to_string(),
                    full_name: Some(config.full_name.clone()),
                })
                .await?;
            info!(user_id = %created.id, username = %created.username, "Seeded administrator");
            created
        }
    };

    service.add_to_role(&admin.id, &config.role).await?;
    Ok(Some(admin))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use warden_core::config::PasswordConfig;
    use warden_core::error::ErrorKind;

    use super::*;
    use crate::password::PasswordPolicy;
    use crate::store::InMemoryIdentityStore;

    fn service() -> UserService {
        UserService::new(
            Arc::new(InMemoryIdentityStore::new()),
            PasswordPolicy::new(&PasswordConfig::default()),
        )
    }

    fn config(password: Option<&str>) -> AdminConfig {
        AdminConfig {
            password: password.map(str::to_string),
            ..AdminConfig::default()
        }
    }

    #[tokio::test]
    async fn test_seed_creates_admin_with_role() {
        let service = service();
        let admin = seed_admin(&service, &config(Some("admin-pass")))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(admin.username, "admin");
        assert_eq!(admin.email.as_deref(), Some("admin@localhost"));
        assert_eq!(service.get_roles(&admin.id).await.unwrap(), vec!["Admin"]);
    }

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let service = service();
        let first = seed_admin(&service, &config(Some("admin-pass")))
            .await
            .unwrap()
            .unwrap();
        let second = seed_admin(&service, &config(None)).await.unwrap().unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(service.list().await.unwrap().len(), 1);
        assert_eq!(service.get_roles(&first.id).await.unwrap(), vec!["Admin"]);
    }

    #[tokio::test]
    async fn test_missing_password_is_configuration_error() {
        let service = service();
        for password in [None, Some(""), Some("   ")] {
            let err = seed_admin(&service, &config(password)).await.unwrap_err();
            assert_eq!(err.kind, ErrorKind::Configuration);
        }
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_disabled_seeding_does_nothing() {
        let service = service();
        let config = AdminConfig {
            enabled: false,
            ..AdminConfig::default()
        };
        assert!(seed_admin(&service, &config).await.unwrap().is_none());
        assert!(service.list().await.unwrap().is_empty());
    }
}
