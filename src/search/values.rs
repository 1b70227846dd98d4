//! Selectable values for a single filter

use crate::catalog::FilterCatalog;
use crate::metrics::observe_upstream;
use crate::models::{AccessMode, Identity, VocabularyValue};
use crate::search::error::{SearchError, SearchResult};
use crate::store::{ItemStore, SelectValuesQuery};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;
use validator::Validate;

/// Filter whose values are requested
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SelectValuesRequest {
    /// Filter display name (canonical or alias)
    #[validate(length(min = 1, max = 200))]
    pub name: String,

    /// Value domain; looked up in the catalog when empty
    #[serde(default)]
    pub value_kind: String,

    /// Free-text filter description, as listed by the filters endpoint
    #[serde(default)]
    pub description: String,
}

impl SelectValuesRequest {
    pub fn new(name: impl Into<String>, value_kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value_kind: value_kind.into(),
            description: String::new(),
        }
    }
}

/// The fixed access-mode vocabulary
pub fn access_mode_values() -> Vec<VocabularyValue> {
    AccessMode::ALL
        .iter()
        .map(|mode| VocabularyValue::new(mode.to_string(), mode.to_string()))
        .collect()
}

/// Resolves selectable values, collapsing aliased display names first
#[derive(Clone)]
pub struct FilterValueResolver {
    store: Arc<dyn ItemStore>,
}

impl FilterValueResolver {
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self { store }
    }

    pub async fn get_select_values(
        &self,
        catalog: &FilterCatalog,
        request: &SelectValuesRequest,
        identity: &Identity,
    ) -> SearchResult<Vec<VocabularyValue>> {
        if request.value_kind.trim() == AccessMode::VALUE_KIND {
            return Ok(access_mode_values());
        }

        request.validate()?;

        let canonical = catalog.resolve_alias(request.name.trim());
        let definition = catalog
            .get(canonical)
            .ok_or_else(|| SearchError::UnknownFilterName(request.name.clone()))?;

        let value_kind = match request.value_kind.trim() {
            "" => definition.value_kind.clone(),
            requested => requested.to_string(),
        };
        if value_kind == AccessMode::VALUE_KIND {
            return Ok(access_mode_values());
        }

        let query = SelectValuesQuery {
            filter_name: definition.name.clone(),
            value_kind,
        };

        let start = Instant::now();
        let values = self.store.select_values(&query, identity).await;
        observe_upstream("select_values", start);
        let values = values.map_err(|e| SearchError::upstream("item-store", e))?;

        let mut seen = HashSet::new();
        let values: Vec<VocabularyValue> = values
            .into_iter()
            .filter(|v| seen.insert(v.value.clone()))
            .collect();

        tracing::debug!(
            user_id = %identity.user_id,
            filter = %query.filter_name,
            value_kind = %query.value_kind,
            values = values.len(),
            "Select values resolved"
        );

        Ok(values)
    }
}
