//! Validated search criteria

use crate::models::{FilterKind, ItemCategory};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Field used when a request does not say how to order results
pub const DEFAULT_ORDER_FIELD: &str = "CreationDate";

/// Order-by string used when a request does not carry one
pub const DEFAULT_ORDER_BY: &str = "-CreationDate";

/// Result ordering
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderBy {
    /// Sortable field name; empty leaves ordering to the store
    pub field: String,
    pub descending: bool,
}

impl OrderBy {
    pub fn ascending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            descending: false,
        }
    }

    pub fn descending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            descending: true,
        }
    }

    /// Store-defined ordering
    pub fn unspecified() -> Self {
        Self::ascending("")
    }

    pub fn is_unspecified(&self) -> bool {
        self.field.is_empty()
    }
}

impl Default for OrderBy {
    fn default() -> Self {
        Self::descending(DEFAULT_ORDER_FIELD)
    }
}

/// Parsed filter value, shaped by the definition's [`FilterKind`]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FilterValue {
    Text {
        text: String,
    },
    Range {
        min: Option<f64>,
        max: Option<f64>,
    },
    Date {
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    },
    Enum {
        value: String,
    },
    Reference {
        id: String,
    },
    Boolean {
        value: bool,
    },
}

/// One validated filter of a search request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FilterCriterion {
    /// Canonical filter name, after alias resolution
    pub name: String,

    /// Value as supplied by the caller
    pub raw_value: String,

    pub filter_kind: FilterKind,

    /// Value parsed according to `filter_kind`
    pub value: FilterValue,
}

/// Validated, executable search request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchCriteria {
    pub item_category: ItemCategory,
    pub search_text: String,
    pub order_by: OrderBy,
    pub filters: Vec<FilterCriterion>,
}

impl SearchCriteria {
    /// Criteria matching everything in `category`, newest first
    pub fn new(item_category: ItemCategory) -> Self {
        Self {
            item_category,
            search_text: String::new(),
            order_by: OrderBy::default(),
            filters: Vec::new(),
        }
    }

    /// Filters sharing a canonical name
    pub fn filters_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a FilterCriterion> {
        self.filters.iter().filter(move |f| f.name == name)
    }
}
