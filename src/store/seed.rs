use crate::error::Result;
use crate::models::{Identity, Item, VocabularyValue};
use crate::store::{InMemoryDirectory, InMemoryItemStore};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Explicit grant of one item to one user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Grant {
    pub user_id: String,
    pub item_id: String,
}

/// YAML document populating the in-memory collaborators
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedDocument {
    #[serde(default)]
    pub users: Vec<Identity>,

    #[serde(default)]
    pub grants: Vec<Grant>,

    #[serde(default)]
    pub items: Vec<Item>,

    /// Fixed vocabularies keyed by value kind
    #[serde(default)]
    pub vocabularies: BTreeMap<String, Vec<VocabularyValue>>,
}

impl SeedDocument {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Populate fresh in-memory collaborators
    pub fn into_stores(self) -> (InMemoryItemStore, InMemoryDirectory) {
        let store = InMemoryItemStore::new();
        let directory = InMemoryDirectory::new();

        for user in self.users {
            directory.add_user(user);
        }
        for grant in self.grants {
            directory.grant(grant.user_id, grant.item_id);
        }
        for item in self.items {
            store.insert(item);
        }
        for (value_kind, values) in self.vocabularies {
            store.set_vocabulary(value_kind, values);
        }

        (store, directory)
    }
}

/// Load a seed file into in-memory collaborators
pub fn load_seed(path: impl AsRef<Path>) -> Result<(InMemoryItemStore, InMemoryDirectory)> {
    let path = path.as_ref();
    let document = SeedDocument::from_yaml_str(&std::fs::read_to_string(path)?)?;
    tracing::info!(
        path = ?path,
        users = document.users.len(),
        items = document.items.len(),
        "Seed data loaded"
    );
    Ok(document.into_stores())
}
