//! Prefix suggestions

use crate::metrics::observe_upstream;
use crate::models::{Identity, QuickSearchResultItem};
use crate::search::access::AccessPolicy;
use crate::search::error::{SearchError, SearchResult};
use crate::store::{IdentityDirectory, ItemStore};
use std::sync::Arc;
use std::time::Instant;

/// Candidates fetched per suggestion slot, leaving room for items the caller cannot see
const CANDIDATES_PER_SUGGESTION: usize = 4;

#[derive(Clone)]
pub struct AutocompleteService {
    store: Arc<dyn ItemStore>,
    access: AccessPolicy,
    limit: usize,
}

impl AutocompleteService {
    pub fn new(
        store: Arc<dyn ItemStore>,
        directory: Arc<dyn IdentityDirectory>,
        limit: usize,
    ) -> Self {
        Self {
            store,
            access: AccessPolicy::new(directory),
            limit,
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// At most `limit` suggestions in store rank order; a blank prefix yields none.
    ///
    /// The store is asked for several candidates per slot. The list can still
    /// come back short when more than that many top-ranked matches are hidden.
    pub async fn suggest(
        &self,
        prefix: &str,
        identity: &Identity,
    ) -> SearchResult<Vec<QuickSearchResultItem>> {
        let prefix = prefix.trim();
        if prefix.is_empty() {
            return Ok(Vec::new());
        }

        let start = Instant::now();
        let fetch = self.limit.saturating_mul(CANDIDATES_PER_SUGGESTION);
        let items = self.store.autocomplete(prefix, identity, fetch).await;
        observe_upstream("autocomplete", start);
        let items = items.map_err(|e| SearchError::upstream("item-store", e))?;

        let mut visible = self.access.retain_visible(identity, items).await?;
        visible.truncate(self.limit);

        Ok(visible
            .into_iter()
            .map(QuickSearchResultItem::from)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AppError, Result};
    use crate::models::{AccessMode, Item, ItemCategory, VocabularyValue};
    use crate::search::SearchCriteria;
    use crate::store::{InMemoryDirectory, InMemoryItemStore, SelectValuesQuery};
    use async_trait::async_trait;
    use chrono::{Duration, Utc};
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Store returning more titles than asked for and counting calls
    #[derive(Default)]
    struct GreedyStore {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ItemStore for GreedyStore {
        async fn search(&self, _: &SearchCriteria, _: &Identity) -> Result<Vec<Item>> {
            Ok(Vec::new())
        }

        async fn select_values(
            &self,
            _: &SelectValuesQuery,
            _: &Identity,
        ) -> Result<Vec<VocabularyValue>> {
            Ok(Vec::new())
        }

        async fn autocomplete(&self, prefix: &str, _: &Identity, _: usize) -> Result<Vec<Item>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if prefix == "boom" {
                return Err(AppError::upstream("item-store", "index offline"));
            }
            Ok((0..25)
                .map(|i| Item {
                    id: format!("u-{i}"),
                    category: ItemCategory::User,
                    title: format!("{prefix} {i}"),
                    snippet: String::new(),
                    creation_date: Utc::now(),
                    access_mode: AccessMode::Public,
                    owner_id: "system".to_string(),
                    attributes: BTreeMap::new(),
                })
                .collect())
        }
    }

    fn service(store: Arc<GreedyStore>) -> AutocompleteService {
        AutocompleteService::new(store, Arc::new(InMemoryDirectory::new()), 10)
    }

    #[tokio::test]
    async fn test_blank_prefix_skips_store() {
        let store = Arc::new(GreedyStore::default());
        let service = service(store.clone());

        for prefix in ["", "   ", "\t"] {
            let out = service.suggest(prefix, &Identity::new("bob")).await.unwrap();
            assert!(out.is_empty());
        }
        assert_eq!(store.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_results_capped_in_store_order() {
        let store = Arc::new(GreedyStore::default());
        let out = service(store)
            .suggest("ab", &Identity::new("bob"))
            .await
            .unwrap();
        assert_eq!(out.len(), 10);
        assert_eq!(out[0].id, "u-0");
        assert_eq!(out[9].id, "u-9");
    }

    #[tokio::test]
    async fn test_store_failure_is_upstream_error() {
        let err = service(Arc::new(GreedyStore::default()))
            .suggest("boom", &Identity::new("bob"))
            .await
            .unwrap_err();
        assert!(matches!(err, SearchError::Upstream { .. }));
    }

    #[tokio::test]
    async fn test_hidden_matches_do_not_starve_suggestions() {
        let store = InMemoryItemStore::new();
        let now = Utc::now();
        let entries = [
            ("ann-9", AccessMode::Explicit, 0),
            ("ann-8", AccessMode::Explicit, 1),
            ("col-2", AccessMode::Public, 2),
            ("col-1", AccessMode::Public, 3),
        ];
        for (id, access_mode, age) in entries {
            store.insert(Item {
                id: id.to_string(),
                category: ItemCategory::Collection,
                title: format!("abstract {id}"),
                snippet: String::new(),
                creation_date: now - Duration::days(age),
                access_mode,
                owner_id: "alice".to_string(),
                attributes: BTreeMap::new(),
            });
        }

        let service =
            AutocompleteService::new(Arc::new(store), Arc::new(InMemoryDirectory::new()), 2);
        let out = service.suggest("ab", &Identity::new("bob")).await.unwrap();
        let ids: Vec<&str> = out.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["col-2", "col-1"]);
    }
}
