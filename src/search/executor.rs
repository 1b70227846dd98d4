//! Access-filtered execution of validated criteria

use crate::metrics::observe_upstream;
use crate::models::{Identity, SearchResultItem};
use crate::search::access::AccessPolicy;
use crate::search::criteria::SearchCriteria;
use crate::search::error::{SearchError, SearchResult};
use crate::store::{IdentityDirectory, ItemStore};
use std::sync::Arc;
use std::time::Instant;

/// Runs criteria against the item store and withholds what the caller may not see
#[derive(Clone)]
pub struct SearchExecutor {
    store: Arc<dyn ItemStore>,
    access: AccessPolicy,
    max_results: usize,
}

impl SearchExecutor {
    pub fn new(
        store: Arc<dyn ItemStore>,
        directory: Arc<dyn IdentityDirectory>,
        max_results: usize,
    ) -> Self {
        Self {
            store,
            access: AccessPolicy::new(directory),
            max_results,
        }
    }

    /// Results in store order, access-filtered, capped at `max_results`
    pub async fn execute(
        &self,
        identity: &Identity,
        criteria: &SearchCriteria,
    ) -> SearchResult<Vec<SearchResultItem>> {
        let start = Instant::now();
        let found = self.store.search(criteria, identity).await;
        observe_upstream("search", start);
        let found = found.map_err(|e| SearchError::upstream("item-store", e))?;

        let from_store = found.len();
        let mut visible = self.access.retain_visible(identity, found).await?;
        visible.truncate(self.max_results);

        tracing::info!(
            user_id = %identity.user_id,
            category = %criteria.item_category,
            filters = criteria.filters.len(),
            from_store,
            returned = visible.len(),
            "Search executed"
        );

        Ok(visible.into_iter().map(SearchResultItem::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccessMode, Item, ItemCategory};
    use crate::store::{InMemoryDirectory, InMemoryItemStore};
    use chrono::{Duration, Utc};
    use std::collections::BTreeMap;

    fn seeded_store(count: usize) -> InMemoryItemStore {
        let store = InMemoryItemStore::new();
        let now = Utc::now();
        for i in 0..count {
            store.insert(Item {
                id: format!("g-{i}"),
                category: ItemCategory::Group,
                title: format!("Group {i}"),
                snippet: String::new(),
                creation_date: now - Duration::minutes(i as i64),
                access_mode: if i % 2 == 0 {
                    AccessMode::Public
                } else {
                    AccessMode::Private
                },
                owner_id: "alice".to_string(),
                attributes: BTreeMap::new(),
            });
        }
        store
    }

    #[tokio::test]
    async fn test_execute_drops_private_items_of_others() {
        let executor = SearchExecutor::new(
            Arc::new(seeded_store(6)),
            Arc::new(InMemoryDirectory::new()),
            100,
        );
        let results = executor
            .execute(&Identity::new("bob"), &SearchCriteria::new(ItemCategory::Group))
            .await
            .unwrap();

        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|r| r.access_mode != AccessMode::Private));
        let ids: Vec<&str> = results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["g-0", "g-2", "g-4"]);
    }

    #[tokio::test]
    async fn test_execute_caps_results() {
        let executor = SearchExecutor::new(
            Arc::new(seeded_store(10)),
            Arc::new(InMemoryDirectory::new()),
            4,
        );
        let results = executor
            .execute(&Identity::new("alice"), &SearchCriteria::new(ItemCategory::All))
            .await
            .unwrap();
        assert_eq!(results.len(), 4);
    }
}
