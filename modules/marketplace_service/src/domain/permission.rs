//! Permission resolution
//!
//! A user's capabilities are the union of the permission values granted by
//! every role the user holds. Recomputed on every call.

use super::repository::AccessRepository;
use crate::contract::{Action, MarketplaceError};
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;

/// Set of actions a user may perform
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapabilitySet {
    actions: HashSet<Action>,
}

impl CapabilitySet {
    /// Build from stored permission values; unknown values are ignored
    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let actions = values
            .into_iter()
            .filter_map(|value| Action::from_key(value.as_ref()))
            .collect();
        Self { actions }
    }

    pub fn is_admin(&self) -> bool {
        self.actions.contains(&Action::TicketingAdmin)
    }

    /// Admin grants every action
    pub fn allows(&self, action: Action) -> bool {
        self.is_admin() || self.actions.contains(&action)
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl FromIterator<Action> for CapabilitySet {
    fn from_iter<T: IntoIterator<Item = Action>>(iter: T) -> Self {
        Self {
            actions: iter.into_iter().collect(),
        }
    }
}

/// Resolves and enforces user permissions against storage
pub struct PermissionResolver {
    access_repo: Arc<dyn AccessRepository>,
}

impl PermissionResolver {
    pub fn new(access_repo: Arc<dyn AccessRepository>) -> Self {
        Self { access_repo }
    }

    /// Capabilities of a user; an unknown user has none
    pub async fn capabilities(&self, user_id: Uuid) -> Result<CapabilitySet, MarketplaceError> {
        let values = self.access_repo.permission_values_for_user(user_id).await?;
        Ok(CapabilitySet::from_values(values))
    }

    pub async fn has_permission(
        &self,
        user_id: Uuid,
        action: Action,
    ) -> Result<bool, MarketplaceError> {
        Ok(self.capabilities(user_id).await?.allows(action))
    }

    /// Fail with `Forbidden` unless the user may perform `action`
    pub async fn require(&self, user_id: Uuid, action: Action) -> Result<(), MarketplaceError> {
        if self.has_permission(user_id, action).await? {
            return Ok(());
        }
        tracing::warn!(%user_id, action = action.key(), "permission denied");
        Err(MarketplaceError::Forbidden {
            action: action.key().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capabilities_from_stored_values() {
        let caps = CapabilitySet::from_values(["ticket:create", "ticket:void", "bogus:value"]);

        assert!(caps.allows(Action::TicketCreate));
        assert!(caps.allows(Action::TicketVoid));
        assert!(!caps.allows(Action::TicketComplete));
        assert!(!caps.is_admin());
    }

    #[test]
    fn test_admin_grants_everything() {
        let caps: CapabilitySet = [Action::TicketingAdmin].into_iter().collect();

        for action in Action::ALL {
            assert!(caps.allows(action), "admin should allow {}", action);
        }
    }

    #[test]
    fn test_empty_set_allows_nothing() {
        let caps = CapabilitySet::default();

        assert!(caps.is_empty());
        assert!(Action::ALL.iter().all(|a| !caps.allows(*a)));
    }
}
