//! Users, roles and the permission catalog

use crate::contract::{Action, MarketplaceError, Permission, User, UserRole};
use crate::domain::permission::PermissionResolver;
use crate::domain::repository::AccessRepository;
use crate::domain::validation::{require_text, validate_email};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

pub struct AccessService {
    access_repo: Arc<dyn AccessRepository>,
    permissions: Arc<PermissionResolver>,
}

impl AccessService {
    pub fn new(access_repo: Arc<dyn AccessRepository>, permissions: Arc<PermissionResolver>) -> Self {
        Self {
            access_repo,
            permissions,
        }
    }

    // ===== Users =====

    pub async fn create_user(&self, name: &str, email: &str) -> Result<User, MarketplaceError> {
        require_text("name", name)?;
        validate_email("email", email)?;

        let user = User {
            id: Uuid::new_v4(),
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            created_at: Utc::now(),
        };
        let created = self.access_repo.insert_user(&user).await?;
        tracing::info!(user_id = %created.id, "user created");
        Ok(created)
    }

    pub async fn get_user(&self, user_id: Uuid) -> Result<User, MarketplaceError> {
        self.access_repo
            .find_user(user_id)
            .await?
            .ok_or_else(|| MarketplaceError::not_found("user", user_id))
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<User, MarketplaceError> {
        self.access_repo
            .find_user_by_email(email.trim())
            .await?
            .ok_or_else(|| MarketplaceError::not_found("user", email))
    }

    pub async fn delete_users(&self, ids: &[Uuid]) -> Result<u64, MarketplaceError> {
        Ok(self.access_repo.delete_users(ids).await?)
    }

    // ===== Roles and permissions =====

    pub async fn create_role(
        &self,
        name: &str,
        acting_user: Uuid,
    ) -> Result<UserRole, MarketplaceError> {
        require_text("name", name)?;

        let role = UserRole {
            id: Uuid::new_v4(),
            name: name.trim().to_string(),
            created_by: acting_user,
            created_at: Utc::now(),
        };
        Ok(self.access_repo.insert_role(&role).await?)
    }

    /// Store every permission key of the catalog; safe to call repeatedly
    pub async fn seed_permissions(&self) -> Result<Vec<Permission>, MarketplaceError> {
        let keys: Vec<&str> = Action::ALL.iter().map(|a| a.key()).collect();
        let permissions = self.access_repo.ensure_permissions(&keys).await?;
        tracing::info!(count = permissions.len(), "permission catalog seeded");
        Ok(permissions)
    }

    pub async fn get_permission_by_value(
        &self,
        value: &str,
    ) -> Result<Permission, MarketplaceError> {
        self.access_repo
            .find_permission_by_value(value)
            .await?
            .ok_or_else(|| MarketplaceError::not_found("permission", value))
    }

    /// Replace the permissions granted by a role
    pub async fn set_role_permissions(
        &self,
        role_id: Uuid,
        permission_ids: &[Uuid],
        acting_user: Uuid,
    ) -> Result<(), MarketplaceError> {
        if self.access_repo.find_role(role_id).await?.is_none() {
            return Err(MarketplaceError::not_found("user_role", role_id));
        }
        self.access_repo
            .replace_role_permissions(role_id, permission_ids, acting_user)
            .await?;
        Ok(())
    }

    /// Replace the roles held by a user
    pub async fn set_user_roles(
        &self,
        user_id: Uuid,
        role_ids: &[Uuid],
        acting_user: Uuid,
    ) -> Result<(), MarketplaceError> {
        self.get_user(user_id).await?;
        for role_id in role_ids {
            if self.access_repo.find_role(*role_id).await?.is_none() {
                return Err(MarketplaceError::not_found("user_role", role_id));
            }
        }
        self.access_repo
            .replace_user_roles(user_id, role_ids, acting_user)
            .await?;
        Ok(())
    }

    /// Provisioning shortcut: the user ends up holding one new role that
    /// grants exactly `actions`, replacing any roles held before
    pub async fn grant_role(
        &self,
        user_id: Uuid,
        role_name: &str,
        actions: &[Action],
        acting_user: Uuid,
    ) -> Result<UserRole, MarketplaceError> {
        let catalog = self.seed_permissions().await?;
        let permission_ids: Vec<Uuid> = catalog
            .iter()
            .filter(|p| actions.iter().any(|a| a.key() == p.value))
            .map(|p| p.id)
            .collect();

        let role = self.create_role(role_name, acting_user).await?;
        self.set_role_permissions(role.id, &permission_ids, acting_user)
            .await?;
        self.set_user_roles(user_id, &[role.id], acting_user).await?;
        Ok(role)
    }

    pub async fn has_permission(
        &self,
        user_id: Uuid,
        action: Action,
    ) -> Result<bool, MarketplaceError> {
        self.permissions.has_permission(user_id, action).await
    }
}
