//! Per-identity visibility of items

use crate::metrics::{observe_upstream, SEARCH_ITEMS_DROPPED_TOTAL};
use crate::models::{AccessMode, Identity, Item};
use crate::search::error::{SearchError, SearchResult};
use crate::store::IdentityDirectory;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

/// Drops every item the identity may not see.
///
/// - `Public`, `Internal`: any authenticated identity
/// - `Explicit`: the owner, or an identity holding an explicit grant
/// - `Private`: the owner only
#[derive(Clone)]
pub struct AccessPolicy {
    directory: Arc<dyn IdentityDirectory>,
}

impl AccessPolicy {
    pub fn new(directory: Arc<dyn IdentityDirectory>) -> Self {
        Self { directory }
    }

    /// Keep visible items in their original order
    pub async fn retain_visible(
        &self,
        identity: &Identity,
        items: Vec<Item>,
    ) -> SearchResult<Vec<Item>> {
        // One batched grant lookup for every explicit item not owned by the caller
        let pending: Vec<String> = items
            .iter()
            .filter(|item| item.access_mode == AccessMode::Explicit && !identity.owns(&item.owner_id))
            .map(|item| item.id.clone())
            .collect();

        let granted = if pending.is_empty() {
            HashSet::new()
        } else {
            let start = Instant::now();
            let result = self.directory.explicit_grants(identity, &pending).await;
            observe_upstream("explicit_grants", start);
            result.map_err(|e| SearchError::upstream("identity-directory", e))?
        };

        let before = items.len();
        let visible: Vec<Item> = items
            .into_iter()
            .filter(|item| is_visible(identity, item, &granted))
            .collect();

        let dropped = before - visible.len();
        if dropped > 0 {
            SEARCH_ITEMS_DROPPED_TOTAL.inc_by(dropped as f64);
            tracing::debug!(user_id = %identity.user_id, dropped, "Items withheld by access check");
        }

        Ok(visible)
    }
}

fn is_visible(identity: &Identity, item: &Item, granted: &HashSet<String>) -> bool {
    match item.access_mode {
        AccessMode::Public | AccessMode::Internal => true,
        AccessMode::Private => identity.owns(&item.owner_id),
        AccessMode::Explicit => identity.owns(&item.owner_id) || granted.contains(&item.id),
    }
}
