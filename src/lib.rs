//! Faceted search over a heterogeneous item store.
//!
//! The crate translates loosely-typed search requests into validated
//! [`search::SearchCriteria`] against a per-category [`catalog::FilterCatalog`],
//! executes them through an [`store::ItemStore`] with per-identity access
//! filtering, and serves filter metadata, select values and autocomplete.

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod metrics;
pub mod models;
pub mod search;
pub mod store;

pub use error::{AppError, Result};
