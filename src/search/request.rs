//! Translation of transport-level search requests into [`SearchCriteria`]

use crate::catalog::FilterCatalog;
use crate::models::ItemCategory;
use crate::search::criteria::{FilterCriterion, SearchCriteria, DEFAULT_ORDER_BY};
use crate::search::error::{SearchError, SearchResult};
use crate::search::parse::{parse_category, parse_filter_value, parse_order_by};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Structured search request body
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequestModel {
    /// Item category name; `All` when absent
    #[serde(default, alias = "itemsType")]
    pub item_category: Option<String>,

    #[serde(default)]
    #[validate(length(max = 1000))]
    pub search_text: Option<String>,

    /// `[-]Field`; `-CreationDate` when absent
    #[serde(default)]
    pub order_by: Option<String>,

    #[serde(default)]
    #[validate(nested)]
    pub filters: Vec<FilterParam>,
}

/// Longest filter name accepted in either request shape
pub const MAX_FILTER_NAME_LEN: usize = 200;

/// One `{name, value}` pair of a structured request
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq, Eq)]
pub struct FilterParam {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub value: String,
}

impl FilterParam {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Flat parameter form: `itemsType`, `orderBy`, `searchText`, `filters[Name]=value`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParameters {
    pub items_type: Option<String>,
    pub order_by: Option<String>,
    pub search_text: Option<String>,
    /// Filter pairs in the order they were supplied
    pub filters: Vec<(String, String)>,
}

impl SearchParameters {
    /// Split decoded query pairs into the known parameters
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> SearchResult<Self> {
        let mut params = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "itemsType" => params.items_type = Some(value),
                "orderBy" => params.order_by = Some(value),
                "searchText" => params.search_text = Some(value),
                _ => {
                    let name = key
                        .strip_prefix("filters[")
                        .and_then(|rest| rest.strip_suffix(']'))
                        .ok_or_else(|| {
                            SearchError::validation(format!("unexpected parameter '{}'", key))
                        })?;
                    params.filters.push((name.to_string(), value));
                }
            }
        }
        Ok(params)
    }
}

/// Builds validated criteria against one catalog snapshot
pub struct SearchRequestBuilder<'a> {
    catalog: &'a FilterCatalog,
}

impl<'a> SearchRequestBuilder<'a> {
    pub fn new(catalog: &'a FilterCatalog) -> Self {
        Self { catalog }
    }

    /// Translate a structured request body
    pub fn build_from_structured(&self, body: &SearchRequestModel) -> SearchResult<SearchCriteria> {
        body.validate()?;
        self.build(
            body.item_category.as_deref(),
            body.search_text.as_deref(),
            body.order_by.as_deref(),
            body.filters
                .iter()
                .map(|f| (f.name.as_str(), f.value.as_str())),
        )
    }

    /// Translate flat parameters; absent values fall back to `All`, `""` and `-CreationDate`
    pub fn build_from_parameters<I, K, V>(
        &self,
        category: Option<&str>,
        search_text: Option<&str>,
        order_by: Option<&str>,
        raw_filters: I,
    ) -> SearchResult<SearchCriteria>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        if let Some(text) = search_text {
            if text.chars().count() > 1000 {
                return Err(SearchError::validation("searchText exceeds 1000 characters"));
            }
        }
        self.build(category, search_text, order_by, raw_filters)
    }

    pub fn build_from_search_parameters(
        &self,
        params: &SearchParameters,
    ) -> SearchResult<SearchCriteria> {
        self.build_from_parameters(
            params.items_type.as_deref(),
            params.search_text.as_deref(),
            params.order_by.as_deref(),
            params.filters.iter().map(|(k, v)| (k.as_str(), v.as_str())),
        )
    }

    fn build<I, K, V>(
        &self,
        category: Option<&str>,
        search_text: Option<&str>,
        order_by: Option<&str>,
        raw_filters: I,
    ) -> SearchResult<SearchCriteria>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let item_category = match category {
            Some(raw) => parse_category(raw)?,
            None => ItemCategory::All,
        };
        let order_by = parse_order_by(
            self.catalog,
            item_category,
            order_by.unwrap_or(DEFAULT_ORDER_BY),
        )?;

        let filters = raw_filters
            .into_iter()
            .map(|(name, value)| self.criterion(item_category, name.as_ref(), value.as_ref()))
            .collect::<SearchResult<Vec<_>>>()?;

        let criteria = SearchCriteria {
            item_category,
            search_text: search_text.unwrap_or_default().trim().to_string(),
            order_by,
            filters,
        };

        tracing::debug!(
            category = %criteria.item_category,
            order_by = %criteria.order_by.field,
            descending = criteria.order_by.descending,
            filters = criteria.filters.len(),
            "Search criteria built"
        );

        Ok(criteria)
    }

    fn criterion(
        &self,
        category: ItemCategory,
        raw_name: &str,
        raw_value: &str,
    ) -> SearchResult<FilterCriterion> {
        let name = raw_name.trim();
        if name.is_empty() || name.chars().count() > MAX_FILTER_NAME_LEN {
            return Err(SearchError::validation(format!(
                "filter name must be 1 to {} characters",
                MAX_FILTER_NAME_LEN
            )));
        }

        let canonical = self.catalog.resolve_alias(name);
        let definition =
            self.catalog
                .find(category, canonical)
                .ok_or_else(|| SearchError::UnknownFilter {
                    name: raw_name.to_string(),
                    category,
                })?;

        Ok(FilterCriterion {
            name: definition.name.clone(),
            raw_value: raw_value.to_string(),
            filter_kind: definition.filter_kind,
            value: parse_filter_value(definition, raw_value)?,
        })
    }
}

impl From<validator::ValidationErrors> for SearchError {
    fn from(err: validator::ValidationErrors) -> Self {
        SearchError::Validation(err.to_string())
    }
}
