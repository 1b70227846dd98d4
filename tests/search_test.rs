//! End-to-end tests for the search core

mod common;

use async_trait::async_trait;
use common::{seeded_service, seeded_stores};
use facet_search::catalog::{default_catalog, CatalogHandle, FilterCatalog};
use facet_search::models::{
    AccessMode, Identity, Item, ItemCategory, SearchResultItem, VocabularyValue,
};
use facet_search::search::*;
use facet_search::store::{ItemStore, SelectValuesQuery};
use std::collections::{BTreeSet, HashSet};
use std::io::Write;
use std::sync::Arc;
use strum::IntoEnumIterator;
use tempfile::NamedTempFile;

fn result_ids(results: &[SearchResultItem]) -> Vec<&str> {
    results.iter().map(|r| r.id.as_str()).collect()
}

#[test]
fn test_scenario_a_explicit_defaults() {
    let catalog = default_catalog();
    let criteria = SearchRequestBuilder::new(&catalog)
        .build_from_parameters(
            Some("All"),
            Some(""),
            Some("-CreationDate"),
            Vec::<(&str, &str)>::new(),
        )
        .unwrap();

    assert_eq!(
        criteria,
        SearchCriteria {
            item_category: ItemCategory::All,
            search_text: String::new(),
            order_by: OrderBy::descending("CreationDate"),
            filters: vec![],
        }
    );
}

#[test]
fn test_scenario_b_partner_aliases_collapse() {
    let catalog = default_catalog();
    let builder = SearchRequestBuilder::new(&catalog);

    for alias in ["InteractionPartnerOne", "InteractionPartnerTwo"] {
        let criteria = builder
            .build_from_parameters(Some("Annotation"), None, None, vec![(alias, "42")])
            .unwrap();
        assert_eq!(criteria.filters.len(), 1);
        assert_eq!(criteria.filters[0].name, "InteractionPartner");
        assert_eq!(criteria.filters[0].raw_value, "42");
    }
}

#[test]
fn test_unspecified_order_resolves_to_newest_first() {
    let catalog = default_catalog();
    let criteria = SearchRequestBuilder::new(&catalog)
        .build_from_structured(&SearchRequestModel::default())
        .unwrap();
    assert_eq!(criteria.order_by, OrderBy::descending(DEFAULT_ORDER_FIELD));
}

#[test]
fn test_structured_and_flat_builds_agree() {
    let catalog = default_catalog();
    let builder = SearchRequestBuilder::new(&catalog);

    let structured = builder
        .build_from_structured(&SearchRequestModel {
            item_category: Some("Annotation".to_string()),
            search_text: Some("  binding ".to_string()),
            order_by: Some("Title".to_string()),
            filters: vec![
                FilterParam::new("InteractionPartnerOne", "42"),
                FilterParam::new("Species", "hsa"),
            ],
        })
        .unwrap();

    let params = SearchParameters::from_pairs(vec![
        ("itemsType".to_string(), "Annotation".to_string()),
        ("searchText".to_string(), "  binding ".to_string()),
        ("orderBy".to_string(), "Title".to_string()),
        ("filters[InteractionPartnerOne]".to_string(), "42".to_string()),
        ("filters[Species]".to_string(), "hsa".to_string()),
    ])
    .unwrap();
    let flat = builder.build_from_search_parameters(&params).unwrap();

    assert_eq!(structured, flat);
    assert_eq!(flat.search_text, "binding");
    assert_eq!(flat.order_by, OrderBy::ascending("Title"));
}

#[test]
fn test_unresolvable_filter_is_rejected() {
    let catalog = default_catalog();
    let err = SearchRequestBuilder::new(&catalog)
        .build_from_parameters(Some("File"), None, None, vec![("Colour", "red")])
        .unwrap_err();
    assert!(matches!(
        err,
        SearchError::UnknownFilter { ref name, category: ItemCategory::File } if name == "Colour"
    ));
}

#[test]
fn test_visible_definitions_subset_of_all() {
    let catalog = default_catalog();
    for category in ItemCategory::iter() {
        let visible: Vec<&str> = catalog
            .definitions(category, false)
            .iter()
            .map(|d| d.name.as_str())
            .collect();
        let all: Vec<&str> = catalog
            .definitions(category, true)
            .iter()
            .map(|d| d.name.as_str())
            .collect();

        let visible_set: HashSet<&str> = visible.iter().copied().collect();
        let all_set: HashSet<&str> = all.iter().copied().collect();
        assert_eq!(visible_set.len(), visible.len(), "duplicates in {category}");
        assert_eq!(all_set.len(), all.len(), "duplicates in {category}");
        assert!(visible_set.is_subset(&all_set), "{category}");
    }
}

#[tokio::test]
async fn test_alias_search_results_match() {
    let (service, _) = seeded_service(SearchConfig::default());
    let alice = Identity::new("alice");

    let mut results = Vec::new();
    for alias in ["InteractionPartnerOne", "InteractionPartnerTwo"] {
        let params = SearchParameters::from_pairs(vec![
            ("itemsType".to_string(), "Annotation".to_string()),
            (format!("filters[{alias}]"), "42".to_string()),
        ])
        .unwrap();
        results.push(service.search_parameters(&alice, &params).await.unwrap());
    }

    assert_eq!(results[0], results[1]);
    assert_eq!(
        result_ids(&results[0]),
        vec!["ann-3", "ann-2", "ann-1"]
    );
}

#[tokio::test]
async fn test_explicit_items_follow_grants() {
    let (service, _) = seeded_service(SearchConfig::default());
    let body = SearchRequestModel {
        item_category: Some("Annotation".to_string()),
        ..Default::default()
    };

    let bob = service
        .search_structured(&Identity::new("bob"), &body)
        .await
        .unwrap();
    assert_eq!(result_ids(&bob), vec!["ann-2", "ann-1"]);

    let carol = service
        .search_structured(&Identity::new("carol"), &body)
        .await
        .unwrap();
    assert_eq!(result_ids(&carol), vec!["ann-1"]);
}

/// Store that ignores identity entirely
struct LeakyStore {
    items: Vec<Item>,
}

#[async_trait]
impl ItemStore for LeakyStore {
    async fn search(
        &self,
        _criteria: &SearchCriteria,
        _identity: &Identity,
    ) -> facet_search::Result<Vec<Item>> {
        Ok(self.items.clone())
    }

    async fn select_values(
        &self,
        _query: &SelectValuesQuery,
        _identity: &Identity,
    ) -> facet_search::Result<Vec<VocabularyValue>> {
        Ok(Vec::new())
    }

    async fn autocomplete(
        &self,
        prefix: &str,
        _identity: &Identity,
        _limit: usize,
    ) -> facet_search::Result<Vec<Item>> {
        let prefix = prefix.to_lowercase();
        Ok(self
            .items
            .iter()
            .filter(|i| i.title.to_lowercase().starts_with(&prefix))
            .cloned()
            .collect())
    }
}

/// Every seeded item, private ones included
async fn leaky_items() -> Vec<Item> {
    let (store, _) = seeded_stores();
    let mut items = store
        .search(&SearchCriteria::new(ItemCategory::All), &Identity::new("alice"))
        .await
        .unwrap();
    items.sort_by(|a, b| a.id.cmp(&b.id));
    items
}

#[tokio::test]
async fn test_scenario_c_private_items_never_leak() {
    let items = leaky_items().await;
    assert!(items.iter().any(|i| i.access_mode == AccessMode::Private));

    let (_, directory) = seeded_stores();
    let executor = SearchExecutor::new(
        Arc::new(LeakyStore { items }),
        Arc::new(directory),
        100,
    );

    for user in ["bob", "carol", "mallory"] {
        let results = executor
            .execute(&Identity::new(user), &SearchCriteria::new(ItemCategory::All))
            .await
            .unwrap();
        assert!(
            results.iter().all(|r| r.access_mode != AccessMode::Private),
            "private item returned to {user}"
        );
    }
}

#[tokio::test]
async fn test_scenario_d_autocomplete() {
    let (service, _) = seeded_service(SearchConfigBuilder::new().autocomplete_limit(2).build());
    let alice = Identity::new("alice");

    assert!(service.suggest(&alice, "").await.unwrap().is_empty());
    assert!(service.suggest(&alice, "   ").await.unwrap().is_empty());

    // "Abstracts to read" (2024-05-02), "Abandoned binding draft" (2024-05-01)
    let suggestions = service.suggest(&alice, "ab").await.unwrap();
    let ids: Vec<&str> = suggestions.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["col-1", "ann-3"]);
}

#[tokio::test]
async fn test_autocomplete_respects_access_and_cap() {
    let items = leaky_items().await;
    let (_, directory) = seeded_stores();
    let service = AutocompleteService::new(Arc::new(LeakyStore { items }), Arc::new(directory), 1);

    let suggestions = service.suggest("ab", &Identity::new("bob")).await.unwrap();
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].id, "col-1");
}

#[tokio::test]
async fn test_access_mode_values_for_any_identity() {
    let (service, _) = seeded_service(SearchConfig::default());
    let expected: BTreeSet<&str> = ["Explicit", "Internal", "Private", "Public"].into();

    for user in ["alice", "bob", "nobody"] {
        let values = service
            .select_values(
                &Identity::new(user),
                &SelectValuesRequest::new("AccessMode", "AccessModes"),
            )
            .await
            .unwrap();
        let got: BTreeSet<&str> = values.iter().map(|v| v.value.as_str()).collect();
        assert_eq!(got, expected);
    }
}

#[tokio::test]
async fn test_aliased_select_values_are_equal() {
    let (service, _) = seeded_service(SearchConfig::default());
    let alice = Identity::new("alice");

    let one = service
        .select_values(&alice, &SelectValuesRequest::new("InteractionPartnerOne", ""))
        .await
        .unwrap();
    let two = service
        .select_values(&alice, &SelectValuesRequest::new("InteractionPartnerTwo", ""))
        .await
        .unwrap();

    let one: BTreeSet<String> = one.into_iter().map(|v| v.value).collect();
    let two: BTreeSet<String> = two.into_iter().map(|v| v.value).collect();
    assert_eq!(one, two);
    let expected: BTreeSet<String> = ["42".to_string(), "7".to_string()].into();
    assert_eq!(one, expected);
}

#[tokio::test]
async fn test_select_values_accept_listed_filter_metadata() {
    let (service, _) = seeded_service(SearchConfig::default());
    let alice = Identity::new("alice");

    for info in service.filters(Some("Annotation")).unwrap() {
        let listed = SelectValuesRequest {
            name: info.name.clone(),
            value_kind: info.value_kind.clone(),
            description: info.description.clone(),
        };
        let bare = SelectValuesRequest::new(info.name.clone(), "");

        let from_listing = service.select_values(&alice, &listed).await.unwrap();
        let from_name = service.select_values(&alice, &bare).await.unwrap();
        assert_eq!(from_listing, from_name, "filter {}", info.name);

        for alias in &info.aliases {
            let aliased = SelectValuesRequest {
                name: alias.clone(),
                ..listed.clone()
            };
            let from_alias = service.select_values(&alice, &aliased).await.unwrap();
            assert_eq!(from_alias, from_listing, "alias {}", alias);
        }
    }

    let partners = service
        .select_values(
            &alice,
            &SelectValuesRequest {
                name: "InteractionPartnerOne".to_string(),
                value_kind: "InteractionPartners".to_string(),
                description: "Either partner of a recorded interaction".to_string(),
            },
        )
        .await
        .unwrap();
    let partners: BTreeSet<String> = partners.into_iter().map(|v| v.value).collect();
    let expected: BTreeSet<String> = ["42".to_string(), "7".to_string()].into();
    assert_eq!(partners, expected);
}

#[tokio::test]
async fn test_select_values_reject_unknown_filter() {
    let (service, _) = seeded_service(SearchConfig::default());

    for value_kind in ["", "Whatever"] {
        let err = service
            .select_values(
                &Identity::new("bob"),
                &SelectValuesRequest::new("NoSuchFilter", value_kind),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, SearchError::UnknownFilterName(_)));
    }
}

#[tokio::test]
async fn test_access_mode_values_ignore_filter_name() {
    let (service, _) = seeded_service(SearchConfig::default());
    let values = service
        .select_values(&Identity::new("bob"), &SelectValuesRequest::new("", "AccessModes"))
        .await
        .unwrap();
    assert_eq!(values.len(), 4);
}

#[tokio::test]
async fn test_select_values_from_vocabulary() {
    let (service, _) = seeded_service(SearchConfig::default());
    let values = service
        .select_values(&Identity::new("bob"), &SelectValuesRequest::new("Species", ""))
        .await
        .unwrap();
    assert_eq!(
        values,
        vec![
            VocabularyValue::new("hsa", "Homo sapiens"),
            VocabularyValue::new("mmu", "Mus musculus"),
        ]
    );
}

#[tokio::test]
async fn test_max_results_applied_after_access_filter() {
    let (service, _) = seeded_service(SearchConfigBuilder::new().max_results(1).build());
    let results = service
        .search_structured(&Identity::new("carol"), &SearchRequestModel::default())
        .await
        .unwrap();
    assert_eq!(result_ids(&results), vec!["col-1"]);
}

#[test]
fn test_yaml_catalog_published_to_service() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
filters:
  - name: CreationDate
    filter_kind: Date
    value_kind: Date
    sortable: true
  - name: Colour
    category: File
    filter_kind: Enum
    value_kind: Colours
    aliases: [Color]
"#
    )
    .unwrap();

    let (service, _) = seeded_service(SearchConfig::default());
    assert!(service
        .filters(Some("File"))
        .unwrap()
        .iter()
        .all(|f| f.name != "Colour"));

    let catalog = FilterCatalog::from_yaml_file(file.path()).unwrap();
    service.catalog().publish(catalog);

    let names: Vec<String> = service
        .filters(Some("File"))
        .unwrap()
        .into_iter()
        .map(|f| f.name)
        .collect();
    assert_eq!(names, vec!["CreationDate", "Colour"]);

    let criteria = SearchRequestBuilder::new(&service.catalog().snapshot())
        .build_from_parameters(Some("File"), None, None, vec![("Color", "red")])
        .unwrap();
    assert_eq!(criteria.filters[0].name, "Colour");
}

#[test]
fn test_catalog_handle_snapshot_survives_publish() {
    let handle = CatalogHandle::new(default_catalog());
    let before = handle.snapshot();
    handle.publish(FilterCatalog::builder().build().unwrap());

    assert!(!before.is_empty());
    assert!(handle.snapshot().is_empty());
}
