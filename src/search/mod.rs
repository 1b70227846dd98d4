//! Faceted search over heterogeneous items
//!
//! This module turns caller requests into validated criteria and runs them
//! against the pluggable item store:
//!
//! - **Request building**: structured bodies and flat query parameters both
//!   produce one [`SearchCriteria`] shape, checked against the filter catalog
//! - **Execution**: store results filtered per identity by access mode
//! - **Select values**: vocabularies for a filter, with aliased display names
//!   collapsed onto one canonical field
//! - **Autocomplete**: capped prefix suggestions
//!
//! # Flow
//!
//! ```text
//! ┌──────────────────────────────┐
//! │        SearchService          │  catalog snapshot per call
//! └──────────────┬───────────────┘
//!                ▼
//! ┌──────────────────────────────┐
//! │     SearchRequestBuilder      │  category, orderBy, typed filters
//! └──────────────┬───────────────┘
//!                ▼
//! ┌──────────────────────────────┐
//! │  SearchExecutor / Resolver /  │──► ItemStore
//! │  AutocompleteService          │──► IdentityDirectory (grants)
//! └──────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use facet_search::catalog::{default_catalog, CatalogHandle};
//! use facet_search::models::Identity;
//! use facet_search::search::{SearchConfig, SearchParameters, SearchService};
//! use facet_search::store::{InMemoryDirectory, InMemoryItemStore};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let service = SearchService::new(
//!         CatalogHandle::new(default_catalog()),
//!         Arc::new(InMemoryItemStore::new()),
//!         Arc::new(InMemoryDirectory::new()),
//!         SearchConfig::default(),
//!     );
//!
//!     let params = SearchParameters::from_pairs(vec![
//!         ("itemsType".to_string(), "Annotation".to_string()),
//!         ("filters[InteractionPartnerOne]".to_string(), "42".to_string()),
//!     ])?;
//!     let results = service
//!         .search_parameters(&Identity::new("alice"), &params)
//!         .await?;
//!     println!("Found {} items", results.len());
//!
//!     Ok(())
//! }
//! ```

mod access;
mod autocomplete;
mod config;
mod criteria;
mod error;
mod executor;
mod parse;
mod request;
mod service;
mod values;

pub use access::AccessPolicy;
pub use autocomplete::AutocompleteService;
pub use config::{SearchConfig, SearchConfigBuilder};
pub use criteria::{
    FilterCriterion, FilterValue, OrderBy, SearchCriteria, DEFAULT_ORDER_BY, DEFAULT_ORDER_FIELD,
};
pub use error::{SearchError, SearchResult};
pub use executor::SearchExecutor;
pub use parse::{parse_category, parse_filter_value, parse_order_by};
pub use request::{FilterParam, SearchParameters, SearchRequestBuilder, SearchRequestModel};
pub use service::{FilterInfo, SearchService};
pub use values::{access_mode_values, FilterValueResolver, SelectValuesRequest};
