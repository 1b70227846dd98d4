//! Shared fixtures for the integration tests

#![allow(dead_code)]

use facet_search::catalog::{default_catalog, CatalogHandle};
use facet_search::search::{SearchConfig, SearchService};
use facet_search::store::{InMemoryDirectory, InMemoryItemStore, SeedDocument};
use std::sync::Arc;

/// Users alice, bob and carol; bob holds an explicit grant on `ann-2`
pub const SEED: &str = r#"
users:
  - user_id: alice
    display_name: Alice
  - user_id: bob
  - user_id: carol
grants:
  - user_id: bob
    item_id: ann-2
vocabularies:
  Species:
    - value: hsa
      description: Homo sapiens
    - value: mmu
      description: Mus musculus
items:
  - id: ann-1
    category: Annotation
    title: Kinase binding study
    snippet: Binding of partner 42 to partner 7
    creation_date: 2024-03-01T09:00:00Z
    access_mode: Public
    owner_id: alice
    attributes:
      InteractionPartner: ["42", "7"]
      Species: [hsa]
  - id: ann-2
    category: Annotation
    title: Inhibition assay notes
    snippet: Shared with reviewers
    creation_date: 2024-04-12T14:30:00Z
    access_mode: Explicit
    owner_id: alice
    attributes:
      InteractionPartner: ["42"]
      Species: [mmu]
  - id: ann-3
    category: Annotation
    title: Abandoned binding draft
    creation_date: 2024-05-01T08:00:00Z
    access_mode: Private
    owner_id: alice
    attributes:
      InteractionPartner: ["42"]
  - id: file-1
    category: File
    title: Assay raw data
    snippet: Plate reader export
    creation_date: 2024-02-20T08:15:00Z
    access_mode: Internal
    owner_id: bob
    attributes:
      FileSize: ["52480"]
  - id: col-1
    category: Collection
    title: Abstracts to read
    creation_date: 2024-05-02T10:00:00Z
    access_mode: Public
    owner_id: carol
"#;

pub fn seeded_stores() -> (InMemoryItemStore, InMemoryDirectory) {
    SeedDocument::from_yaml_str(SEED)
        .expect("seed fixture parses")
        .into_stores()
}

pub fn seeded_service(config: SearchConfig) -> (SearchService, Arc<InMemoryDirectory>) {
    let (store, directory) = seeded_stores();
    let directory = Arc::new(directory);
    let service = SearchService::new(
        CatalogHandle::new(default_catalog()),
        Arc::new(store),
        directory.clone(),
        config,
    );
    (service, directory)
}
