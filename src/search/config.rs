//! Search configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Search service configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SearchConfig {
    /// YAML filter catalog; the built-in catalog is used when unset
    pub catalog_path: Option<PathBuf>,

    /// YAML seed of users, grants and items for the in-memory store
    pub seed_path: Option<PathBuf>,

    /// Maximum search results returned after access filtering
    pub max_results: usize,

    /// Maximum autocomplete suggestions
    pub autocomplete_limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            catalog_path: None,
            seed_path: None,
            max_results: 1000,
            autocomplete_limit: 10,
        }
    }
}

/// Builder for SearchConfig
pub struct SearchConfigBuilder {
    config: SearchConfig,
}

impl SearchConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: SearchConfig::default(),
        }
    }

    pub fn catalog_path(mut self, path: PathBuf) -> Self {
        self.config.catalog_path = Some(path);
        self
    }

    pub fn seed_path(mut self, path: PathBuf) -> Self {
        self.config.seed_path = Some(path);
        self
    }

    pub fn max_results(mut self, max: usize) -> Self {
        self.config.max_results = max;
        self
    }

    pub fn autocomplete_limit(mut self, limit: usize) -> Self {
        self.config.autocomplete_limit = limit;
        self
    }

    pub fn build(self) -> SearchConfig {
        self.config
    }
}

impl Default for SearchConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_overrides_defaults() {
        let config = SearchConfigBuilder::new()
            .max_results(50)
            .autocomplete_limit(5)
            .catalog_path(PathBuf::from("catalog.yaml"))
            .build();

        assert_eq!(config.max_results, 50);
        assert_eq!(config.autocomplete_limit, 5);
        assert_eq!(config.catalog_path, Some(PathBuf::from("catalog.yaml")));
        assert!(config.seed_path.is_none());
    }

    #[test]
    fn test_default_autocomplete_cap() {
        assert_eq!(SearchConfig::default().autocomplete_limit, 10);
    }
}
