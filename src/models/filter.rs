use crate::models::ItemCategory;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use strum::{Display, EnumIter, EnumString};

/// How a filter's raw value is interpreted
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, EnumString, Display, EnumIter,
)]
pub enum FilterKind {
    /// Free text, matched by containment
    Text,
    /// Numeric `min..max` bounds
    Range,
    /// Date or timestamp `from..to` bounds
    Date,
    /// One value out of a vocabulary
    Enum,
    /// Identifier of another entity
    Reference,
    /// `true` / `false`
    Boolean,
}

/// Catalog metadata for one searchable field
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FilterDefinition {
    /// Canonical name
    pub name: String,

    /// Owning category, or `All` for category-agnostic filters
    #[serde(default)]
    pub category: ItemCategory,

    /// Value interpretation
    pub filter_kind: FilterKind,

    /// Value domain name used for select-value lookups
    #[serde(default)]
    pub value_kind: String,

    /// Display names resolving to this definition
    #[serde(default)]
    pub aliases: BTreeSet<String>,

    /// Names of filters presented together with this one
    #[serde(default)]
    pub related_filter_names: Vec<String>,

    /// Internal-only definitions are not shown to end users
    #[serde(default)]
    pub hidden: bool,

    /// Whether results may be ordered by this field
    #[serde(default)]
    pub sortable: bool,

    #[serde(default)]
    pub description: String,
}

impl FilterDefinition {
    pub fn new(
        name: impl Into<String>,
        category: ItemCategory,
        filter_kind: FilterKind,
        value_kind: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            category,
            filter_kind,
            value_kind: value_kind.into(),
            aliases: BTreeSet::new(),
            related_filter_names: Vec::new(),
            hidden: false,
            sortable: false,
            description: String::new(),
        }
    }

    pub fn with_aliases(mut self, aliases: &[&str]) -> Self {
        self.aliases.extend(aliases.iter().map(|a| a.to_string()));
        self
    }

    pub fn with_related(mut self, related: &[&str]) -> Self {
        self.related_filter_names
            .extend(related.iter().map(|r| r.to_string()));
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }
}

/// One selectable option for a filter
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VocabularyValue {
    pub value: String,
    pub description: String,
}

impl VocabularyValue {
    pub fn new(value: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            description: description.into(),
        }
    }
}
