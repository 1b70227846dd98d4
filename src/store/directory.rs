use crate::error::Result;
use crate::models::Identity;
use crate::store::IdentityDirectory;
use async_trait::async_trait;
use dashmap::{DashMap, DashSet};
use std::collections::HashSet;
use std::sync::Arc;

/// In-memory identity directory (for standalone mode and testing)
#[derive(Clone, Default)]
pub struct InMemoryDirectory {
    users: Arc<DashMap<String, Identity>>,
    /// (user id, item id) pairs
    grants: Arc<DashSet<(String, String)>>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user(&self, identity: Identity) {
        self.users.insert(identity.user_id.clone(), identity);
    }

    pub fn grant(&self, user_id: impl Into<String>, item_id: impl Into<String>) {
        self.grants.insert((user_id.into(), item_id.into()));
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }
}

#[async_trait]
impl IdentityDirectory for InMemoryDirectory {
    async fn find_user(&self, user_id: &str) -> Result<Option<Identity>> {
        Ok(self.users.get(user_id).map(|entry| entry.clone()))
    }

    async fn explicit_grants(
        &self,
        identity: &Identity,
        item_ids: &[String],
    ) -> Result<HashSet<String>> {
        Ok(item_ids
            .iter()
            .filter(|id| {
                self.grants
                    .contains(&(identity.user_id.clone(), (*id).clone()))
            })
            .cloned()
            .collect())
    }
}
