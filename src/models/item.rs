use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::{Display, EnumIter, EnumString};

/// Kind of item being searched; partitions the filter catalog and the result set
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    Hash,
    EnumString,
    Display,
    EnumIter,
)]
pub enum ItemCategory {
    /// Category-agnostic scope
    #[default]
    All,
    Annotation,
    Collection,
    File,
    Group,
    User,
}

impl ItemCategory {
    /// Whether an item or definition tagged `other` falls inside this scope
    pub fn covers(&self, other: ItemCategory) -> bool {
        *self == ItemCategory::All || other == ItemCategory::All || *self == other
    }
}

/// Visibility classification of an item
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, EnumString, Display, EnumIter,
)]
pub enum AccessMode {
    /// Visible to the owner and to identities holding an explicit grant
    Explicit,
    /// Visible to any authenticated identity
    Internal,
    /// Visible to the owner only
    Private,
    /// Visible to any authenticated identity
    Public,
}

impl AccessMode {
    /// The closed set, in declaration order
    pub const ALL: [AccessMode; 4] = [
        AccessMode::Explicit,
        AccessMode::Internal,
        AccessMode::Private,
        AccessMode::Public,
    ];

    /// Value kind name under which filters enumerate access modes
    pub const VALUE_KIND: &'static str = "AccessModes";
}

/// An item as held by the item store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Item {
    /// Unique identifier
    pub id: String,

    /// Item category (never `All`)
    pub category: ItemCategory,

    /// Human-readable title
    pub title: String,

    /// Short text excerpt
    #[serde(default)]
    pub snippet: String,

    /// Creation timestamp
    pub creation_date: DateTime<Utc>,

    /// Visibility
    pub access_mode: AccessMode,

    /// Owning user id
    pub owner_id: String,

    /// Filterable attributes keyed by canonical filter name
    #[serde(default)]
    pub attributes: BTreeMap<String, Vec<String>>,
}

impl Item {
    /// Values of a filterable field, including the built-in ones
    pub fn field_values(&self, name: &str) -> Vec<String> {
        match name {
            "Title" => vec![self.title.clone()],
            "CreationDate" => vec![self.creation_date.to_rfc3339()],
            "AccessMode" => vec![self.access_mode.to_string()],
            "Owner" => vec![self.owner_id.clone()],
            "ItemId" => vec![self.id.clone()],
            other => self.attributes.get(other).cloned().unwrap_or_default(),
        }
    }
}

/// Read-only projection returned by search
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultItem {
    pub id: String,
    pub item_category: ItemCategory,
    pub title: String,
    pub snippet: String,
    pub creation_date: DateTime<Utc>,
    pub access_mode: AccessMode,
}

impl From<Item> for SearchResultItem {
    fn from(item: Item) -> Self {
        Self {
            id: item.id,
            item_category: item.category,
            title: item.title,
            snippet: item.snippet,
            creation_date: item.creation_date,
            access_mode: item.access_mode,
        }
    }
}

/// Lightweight autocomplete suggestion
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuickSearchResultItem {
    pub id: String,
    pub item_category: ItemCategory,
    pub title: String,
}

impl From<Item> for QuickSearchResultItem {
    fn from(item: Item) -> Self {
        Self {
            id: item.id,
            item_category: item.category,
            title: item.title,
        }
    }
}
