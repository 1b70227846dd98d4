use crate::error::Result;
use crate::models::{AccessMode, Identity, Item, VocabularyValue};
use crate::search::{FilterCriterion, FilterValue, OrderBy, SearchCriteria};
use crate::store::{ItemStore, SelectValuesQuery};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use dashmap::DashMap;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::sync::Arc;

/// In-memory item store (for standalone mode and testing)
///
/// Matching is case-insensitive substring search over title and snippet.
/// Filters with the same name are alternatives; different names must all
/// match.
#[derive(Clone, Default)]
pub struct InMemoryItemStore {
    items: Arc<DashMap<String, Item>>,
    /// Fixed vocabularies keyed by value kind
    vocabularies: Arc<DashMap<String, Vec<VocabularyValue>>>,
}

impl InMemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, item: Item) {
        tracing::debug!(item_id = %item.id, category = %item.category, "Item stored");
        self.items.insert(item.id.clone(), item);
    }

    pub fn set_vocabulary(&self, value_kind: impl Into<String>, values: Vec<VocabularyValue>) {
        self.vocabularies.insert(value_kind.into(), values);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items the store itself is willing to hand out for `identity`.
    ///
    /// Explicit grants live in the directory, so explicit items are returned
    /// as candidates and left to the caller's access check.
    fn candidates(&self, identity: &Identity) -> Vec<Item> {
        self.items
            .iter()
            .map(|entry| entry.value().clone())
            .filter(|item| item.access_mode != AccessMode::Private || identity.owns(&item.owner_id))
            .collect()
    }
}

#[async_trait]
impl ItemStore for InMemoryItemStore {
    async fn search(&self, criteria: &SearchCriteria, identity: &Identity) -> Result<Vec<Item>> {
        let mut items: Vec<Item> = self
            .candidates(identity)
            .into_iter()
            .filter(|item| criteria.item_category.covers(item.category))
            .filter(|item| text_matches(item, &criteria.search_text))
            .filter(|item| filters_match(item, criteria))
            .collect();

        items.sort_by(|a, b| compare_items(a, b, &criteria.order_by));
        Ok(items)
    }

    async fn select_values(
        &self,
        query: &SelectValuesQuery,
        identity: &Identity,
    ) -> Result<Vec<VocabularyValue>> {
        if let Some(vocabulary) = self.vocabularies.get(&query.value_kind) {
            return Ok(vocabulary.clone());
        }

        let values: BTreeSet<String> = self
            .candidates(identity)
            .iter()
            .filter(|item| item.access_mode != AccessMode::Explicit || identity.owns(&item.owner_id))
            .flat_map(|item| item.field_values(&query.filter_name))
            .collect();

        Ok(values
            .into_iter()
            .map(|v| VocabularyValue::new(v.clone(), v))
            .collect())
    }

    async fn autocomplete(
        &self,
        prefix: &str,
        identity: &Identity,
        limit: usize,
    ) -> Result<Vec<Item>> {
        let prefix = prefix.to_lowercase();
        let mut ranked: Vec<(u8, Item)> = self
            .candidates(identity)
            .into_iter()
            .filter_map(|item| {
                let title = item.title.to_lowercase();
                if title.starts_with(&prefix) {
                    Some((0, item))
                } else if title.split_whitespace().any(|w| w.starts_with(&prefix)) {
                    Some((1, item))
                } else {
                    None
                }
            })
            .collect();

        ranked.sort_by(|(ra, a), (rb, b)| {
            ra.cmp(rb)
                .then_with(|| b.creation_date.cmp(&a.creation_date))
                .then_with(|| a.id.cmp(&b.id))
        });

        Ok(ranked
            .into_iter()
            .take(limit)
            .map(|(_, item)| item)
            .collect())
    }
}

fn text_matches(item: &Item, search_text: &str) -> bool {
    let title = item.title.to_lowercase();
    let snippet = item.snippet.to_lowercase();
    search_text
        .split_whitespace()
        .map(str::to_lowercase)
        .all(|term| title.contains(&term) || snippet.contains(&term))
}

fn filters_match(item: &Item, criteria: &SearchCriteria) -> bool {
    let mut names: Vec<&str> = Vec::new();
    for filter in &criteria.filters {
        if !names.contains(&filter.name.as_str()) {
            names.push(&filter.name);
        }
    }

    names.into_iter().all(|name| {
        criteria
            .filters_named(name)
            .any(|criterion| criterion_matches(item, criterion))
    })
}

fn criterion_matches(item: &Item, criterion: &FilterCriterion) -> bool {
    let values = item.field_values(&criterion.name);
    match &criterion.value {
        FilterValue::Text { text } => {
            let needle = text.to_lowercase();
            values.iter().any(|v| v.to_lowercase().contains(&needle))
        }
        FilterValue::Range { min, max } => values
            .iter()
            .filter_map(|v| v.trim().parse::<f64>().ok())
            .any(|n| within(n, *min, *max)),
        FilterValue::Date { from, to } => values
            .iter()
            .filter_map(|v| parse_stored_date(v))
            .any(|ts| within(ts, *from, *to)),
        FilterValue::Enum { value } => values.iter().any(|v| v == value),
        FilterValue::Reference { id } => values.iter().any(|v| v == id),
        FilterValue::Boolean { value } => values
            .iter()
            .any(|v| v.eq_ignore_ascii_case(if *value { "true" } else { "false" })),
    }
}

fn within<T: PartialOrd>(value: T, lower: Option<T>, upper: Option<T>) -> bool {
    lower.map_or(true, |lo| value >= lo) && upper.map_or(true, |hi| value <= hi)
}

fn parse_stored_date(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|naive| naive.and_utc())
        })
}

fn compare_items(a: &Item, b: &Item, order_by: &OrderBy) -> Ordering {
    let ordering = match order_by.field.as_str() {
        // Store default: newest first
        "" => b.creation_date.cmp(&a.creation_date),
        "CreationDate" => a.creation_date.cmp(&b.creation_date),
        "Title" => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
        field => compare_field(a, b, field),
    };

    let ordering = if order_by.descending {
        ordering.reverse()
    } else {
        ordering
    };
    ordering.then_with(|| a.id.cmp(&b.id))
}

fn compare_field(a: &Item, b: &Item, field: &str) -> Ordering {
    let first = |item: &Item| item.field_values(field).into_iter().next();
    match (first(a), first(b)) {
        (Some(x), Some(y)) => match (x.parse::<f64>(), y.parse::<f64>()) {
            (Ok(nx), Ok(ny)) => nx.total_cmp(&ny),
            _ => x.cmp(&y),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
