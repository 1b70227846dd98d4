//! Filter catalog: the per-category set of filter definitions.
//!
//! A [`FilterCatalog`] is validated once at construction and never mutated
//! afterwards, so any number of readers can share it behind an `Arc`.
//! Refreshing the catalog goes through [`CatalogHandle::publish`], which swaps
//! in a whole new instance.

mod defaults;
mod handle;

pub use defaults::default_catalog;
pub use handle::CatalogHandle;

use crate::error::{AppError, Result};
use crate::models::{FilterDefinition, ItemCategory};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Immutable, validated set of filter definitions
#[derive(Debug, Clone)]
pub struct FilterCatalog {
    /// Definitions in declaration order
    definitions: Vec<FilterDefinition>,

    /// Canonical name -> position in `definitions`
    by_name: HashMap<String, usize>,

    /// Alias -> canonical name
    aliases: HashMap<String, String>,
}

/// On-disk catalog document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogDocument {
    pub filters: Vec<FilterDefinition>,
}

impl FilterCatalog {
    pub fn builder() -> FilterCatalogBuilder {
        FilterCatalogBuilder::default()
    }

    /// Parse and validate a YAML catalog document
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let document: CatalogDocument = serde_yaml::from_str(yaml)?;
        Self::from_definitions(document.filters)
    }

    /// Load a YAML catalog document from disk
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)?;
        let catalog = Self::from_yaml_str(&yaml)?;
        tracing::info!(path = ?path, filters = catalog.len(), "Filter catalog loaded");
        Ok(catalog)
    }

    pub fn from_definitions(definitions: Vec<FilterDefinition>) -> Result<Self> {
        let mut by_name = HashMap::with_capacity(definitions.len());
        for (idx, definition) in definitions.iter().enumerate() {
            if definition.name.trim().is_empty() {
                return Err(AppError::Configuration(
                    "filter definition with empty name".to_string(),
                ));
            }
            if by_name.insert(definition.name.clone(), idx).is_some() {
                return Err(AppError::Configuration(format!(
                    "duplicate filter definition '{}'",
                    definition.name
                )));
            }
        }

        let mut aliases = HashMap::new();
        for definition in &definitions {
            for alias in &definition.aliases {
                if by_name.contains_key(alias) {
                    return Err(AppError::Configuration(format!(
                        "alias '{}' of '{}' shadows a canonical filter name",
                        alias, definition.name
                    )));
                }
                if let Some(previous) = aliases.insert(alias.clone(), definition.name.clone()) {
                    return Err(AppError::Configuration(format!(
                        "alias '{}' is claimed by both '{}' and '{}'",
                        alias, previous, definition.name
                    )));
                }
            }
        }

        for definition in &definitions {
            for related in &definition.related_filter_names {
                if !by_name.contains_key(related) {
                    return Err(AppError::Configuration(format!(
                        "filter '{}' relates to unknown filter '{}'",
                        definition.name, related
                    )));
                }
            }
        }

        Ok(Self {
            definitions,
            by_name,
            aliases,
        })
    }

    /// Definitions in scope for `category`, in declaration order.
    ///
    /// `All` yields every definition. With `include_hidden = false`,
    /// internal-only definitions are left out.
    pub fn definitions(
        &self,
        category: ItemCategory,
        include_hidden: bool,
    ) -> Vec<&FilterDefinition> {
        self.definitions
            .iter()
            .filter(|d| category.covers(d.category))
            .filter(|d| include_hidden || !d.hidden)
            .collect()
    }

    /// Map a display name onto its canonical filter name; unmapped names pass through
    pub fn resolve_alias<'a>(&'a self, raw_name: &'a str) -> &'a str {
        self.aliases
            .get(raw_name)
            .map(String::as_str)
            .unwrap_or(raw_name)
    }

    /// Definition by canonical name, regardless of category
    pub fn get(&self, name: &str) -> Option<&FilterDefinition> {
        self.by_name.get(name).map(|&idx| &self.definitions[idx])
    }

    /// Definition by canonical name, if in scope for `category`
    pub fn find(&self, category: ItemCategory, name: &str) -> Option<&FilterDefinition> {
        self.get(name).filter(|d| category.covers(d.category))
    }

    /// Sortable definition by canonical name, if in scope for `category`
    pub fn sortable_field(&self, category: ItemCategory, name: &str) -> Option<&FilterDefinition> {
        self.find(category, name).filter(|d| d.sortable)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

/// Builder for [`FilterCatalog`]
#[derive(Debug, Default)]
pub struct FilterCatalogBuilder {
    definitions: Vec<FilterDefinition>,
}

impl FilterCatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn definition(mut self, definition: FilterDefinition) -> Self {
        self.definitions.push(definition);
        self
    }

    pub fn definitions(mut self, definitions: impl IntoIterator<Item = FilterDefinition>) -> Self {
        self.definitions.extend(definitions);
        self
    }

    pub fn build(self) -> Result<FilterCatalog> {
        FilterCatalog::from_definitions(self.definitions)
    }
}
