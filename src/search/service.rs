//! Search service facade

use crate::catalog::CatalogHandle;
use crate::metrics::record_outcome;
use crate::models::{
    FilterDefinition, FilterKind, Identity, ItemCategory, QuickSearchResultItem,
    SearchResultItem, VocabularyValue,
};
use crate::search::autocomplete::AutocompleteService;
use crate::search::config::SearchConfig;
use crate::search::error::{SearchError, SearchResult};
use crate::search::executor::SearchExecutor;
use crate::search::parse::parse_category;
use crate::search::request::{SearchParameters, SearchRequestBuilder, SearchRequestModel};
use crate::search::values::{FilterValueResolver, SelectValuesRequest};
use crate::store::{IdentityDirectory, ItemStore};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;

/// End-user view of a filter definition
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FilterInfo {
    pub name: String,
    pub filter_kind: FilterKind,
    pub value_kind: String,
    pub aliases: BTreeSet<String>,
    pub related_filter_names: Vec<String>,
    pub description: String,
}

impl From<&FilterDefinition> for FilterInfo {
    fn from(definition: &FilterDefinition) -> Self {
        Self {
            name: definition.name.clone(),
            filter_kind: definition.filter_kind,
            value_kind: definition.value_kind.clone(),
            aliases: definition.aliases.clone(),
            related_filter_names: definition.related_filter_names.clone(),
            description: definition.description.clone(),
        }
    }
}

/// Entry point for every search operation.
///
/// Each call takes one catalog snapshot and uses it until it returns, so a
/// concurrent [`CatalogHandle::publish`] never splits a request across two
/// catalogs.
#[derive(Clone)]
pub struct SearchService {
    catalog: CatalogHandle,
    executor: SearchExecutor,
    values: FilterValueResolver,
    autocomplete: AutocompleteService,
    config: SearchConfig,
}

impl SearchService {
    pub fn new(
        catalog: CatalogHandle,
        store: Arc<dyn ItemStore>,
        directory: Arc<dyn IdentityDirectory>,
        config: SearchConfig,
    ) -> Self {
        Self {
            executor: SearchExecutor::new(store.clone(), directory.clone(), config.max_results),
            values: FilterValueResolver::new(store.clone()),
            autocomplete: AutocompleteService::new(store, directory, config.autocomplete_limit),
            catalog,
            config,
        }
    }

    pub fn catalog(&self) -> &CatalogHandle {
        &self.catalog
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Search with a structured body
    pub async fn search_structured(
        &self,
        identity: &Identity,
        body: &SearchRequestModel,
    ) -> SearchResult<Vec<SearchResultItem>> {
        let result = async {
            let catalog = self.catalog.snapshot();
            let criteria = SearchRequestBuilder::new(&catalog).build_from_structured(body)?;
            self.executor.execute(identity, &criteria).await
        }
        .await;
        finish("search", identity, result)
    }

    /// Search with flat query parameters
    pub async fn search_parameters(
        &self,
        identity: &Identity,
        params: &SearchParameters,
    ) -> SearchResult<Vec<SearchResultItem>> {
        let result = async {
            let catalog = self.catalog.snapshot();
            let criteria = SearchRequestBuilder::new(&catalog).build_from_search_parameters(params)?;
            self.executor.execute(identity, &criteria).await
        }
        .await;
        finish("search", identity, result)
    }

    /// End-user filter definitions for a category, `All` when unset
    pub fn filters(&self, items_type: Option<&str>) -> SearchResult<Vec<FilterInfo>> {
        let result = items_type
            .map(parse_category)
            .unwrap_or(Ok(ItemCategory::All))
            .map(|category| {
                self.catalog
                    .snapshot()
                    .definitions(category, false)
                    .into_iter()
                    .map(FilterInfo::from)
                    .collect::<Vec<_>>()
            });
        record_outcome("filters", &result, SearchError::is_rejection);
        result
    }

    pub async fn select_values(
        &self,
        identity: &Identity,
        request: &SelectValuesRequest,
    ) -> SearchResult<Vec<VocabularyValue>> {
        let catalog = self.catalog.snapshot();
        let result = self
            .values
            .get_select_values(&catalog, request, identity)
            .await;
        finish("select_values", identity, result)
    }

    pub async fn suggest(
        &self,
        identity: &Identity,
        prefix: &str,
    ) -> SearchResult<Vec<QuickSearchResultItem>> {
        let result = self.autocomplete.suggest(prefix, identity).await;
        finish("autocomplete", identity, result)
    }
}

fn finish<T>(operation: &str, identity: &Identity, result: SearchResult<T>) -> SearchResult<T> {
    record_outcome(operation, &result, SearchError::is_rejection);
    if let Err(e) = &result {
        if e.is_rejection() {
            tracing::warn!(operation, user_id = %identity.user_id, error = %e, "Request rejected");
        }
    }
    result
}
