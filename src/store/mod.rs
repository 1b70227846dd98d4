//! Interfaces of the external collaborators the search core depends on, with
//! in-memory implementations used by the standalone server and the tests.

pub mod directory;
pub mod memory;
pub mod seed;

pub use directory::InMemoryDirectory;
pub use memory::InMemoryItemStore;
pub use seed::{load_seed, Grant, SeedDocument};

use crate::error::Result;
use crate::models::{Identity, Item, VocabularyValue};
use crate::search::SearchCriteria;
use async_trait::async_trait;
use std::collections::HashSet;

/// Dynamic select-value lookup for one canonical filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectValuesQuery {
    /// Canonical filter name
    pub filter_name: String,

    /// Value domain name
    pub value_kind: String,
}

/// The data store holding searchable items
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Items matching the criteria, ranked and ordered by the store
    async fn search(&self, criteria: &SearchCriteria, identity: &Identity) -> Result<Vec<Item>>;

    /// Selectable values for a filter, scoped to what `identity` may see
    async fn select_values(
        &self,
        query: &SelectValuesQuery,
        identity: &Identity,
    ) -> Result<Vec<VocabularyValue>>;

    /// At most `limit` items whose title matches `prefix`, best first
    async fn autocomplete(
        &self,
        prefix: &str,
        identity: &Identity,
        limit: usize,
    ) -> Result<Vec<Item>>;
}

/// The identity/directory service
#[async_trait]
pub trait IdentityDirectory: Send + Sync {
    /// Look up an authenticated user
    async fn find_user(&self, user_id: &str) -> Result<Option<Identity>>;

    /// Subset of `item_ids` for which `identity` holds an explicit grant
    async fn explicit_grants(
        &self,
        identity: &Identity,
        item_ids: &[String],
    ) -> Result<HashSet<String>>;
}
