use crate::catalog::FilterCatalog;
use parking_lot::RwLock;
use std::sync::Arc;

/// Shared pointer to the current catalog.
///
/// Readers take an `Arc` snapshot and keep it for the whole request; a refresh
/// replaces the pointer in one step, so a request never observes a mix of two
/// catalogs.
#[derive(Clone)]
pub struct CatalogHandle {
    current: Arc<RwLock<Arc<FilterCatalog>>>,
}

impl CatalogHandle {
    pub fn new(catalog: FilterCatalog) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(catalog))),
        }
    }

    /// Current catalog
    pub fn snapshot(&self) -> Arc<FilterCatalog> {
        self.current.read().clone()
    }

    /// Replace the current catalog; in-flight snapshots keep the old one
    pub fn publish(&self, catalog: FilterCatalog) {
        let filters = catalog.len();
        *self.current.write() = Arc::new(catalog);
        tracing::info!(filters, "Filter catalog published");
    }
}

impl From<FilterCatalog> for CatalogHandle {
    fn from(catalog: FilterCatalog) -> Self {
        Self::new(catalog)
    }
}
