//! Parsing of loosely-typed request strings into typed values

use crate::catalog::FilterCatalog;
use crate::models::{AccessMode, FilterDefinition, FilterKind, ItemCategory};
use crate::search::criteria::{FilterValue, OrderBy};
use crate::search::error::{SearchError, SearchResult};
use chrono::{DateTime, NaiveDate, Utc};
use std::str::FromStr;

/// Exact, case-sensitive item category lookup
pub fn parse_category(raw: &str) -> SearchResult<ItemCategory> {
    ItemCategory::from_str(raw.trim())
        .map_err(|_| SearchError::validation(format!("unknown item category '{}'", raw)))
}

/// Parse `[-]Field`: a leading `-` means descending; the field must be empty
/// or sortable within `category`.
pub fn parse_order_by(
    catalog: &FilterCatalog,
    category: ItemCategory,
    raw: &str,
) -> SearchResult<OrderBy> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(OrderBy::unspecified());
    }

    let (field, descending) = match raw.strip_prefix('-') {
        Some(field) => (field, true),
        None => (raw, false),
    };

    if field.is_empty() || field.starts_with('-') || field.chars().any(char::is_whitespace) {
        return Err(SearchError::validation(format!(
            "malformed order-by '{}'",
            raw
        )));
    }

    let field = catalog.resolve_alias(field);
    if catalog.sortable_field(category, field).is_none() {
        return Err(SearchError::validation(format!(
            "cannot order {} items by '{}'",
            category, field
        )));
    }

    Ok(OrderBy {
        field: field.to_string(),
        descending,
    })
}

/// Parse a raw filter value according to the definition's kind
pub fn parse_filter_value(definition: &FilterDefinition, raw: &str) -> SearchResult<FilterValue> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(malformed(definition, raw, "value is empty"));
    }

    match definition.filter_kind {
        FilterKind::Text => Ok(FilterValue::Text {
            text: value.to_string(),
        }),
        FilterKind::Range => parse_range(definition, value),
        FilterKind::Date => parse_date_range(definition, value),
        FilterKind::Enum => {
            if definition.value_kind == AccessMode::VALUE_KIND
                && AccessMode::from_str(value).is_err()
            {
                return Err(malformed(definition, raw, "not an access mode"));
            }
            Ok(FilterValue::Enum {
                value: value.to_string(),
            })
        }
        FilterKind::Reference => {
            if value.chars().any(char::is_whitespace) {
                return Err(malformed(definition, raw, "identifiers cannot contain whitespace"));
            }
            Ok(FilterValue::Reference {
                id: value.to_string(),
            })
        }
        FilterKind::Boolean => match value.to_ascii_lowercase().as_str() {
            "true" => Ok(FilterValue::Boolean { value: true }),
            "false" => Ok(FilterValue::Boolean { value: false }),
            _ => Err(malformed(definition, raw, "expected true or false")),
        },
    }
}

fn parse_range(definition: &FilterDefinition, value: &str) -> SearchResult<FilterValue> {
    let number = |s: &str| -> SearchResult<Option<f64>> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(None);
        }
        match s.parse::<f64>() {
            Ok(n) if n.is_finite() => Ok(Some(n)),
            _ => Err(malformed(definition, value, "bound is not a number")),
        }
    };

    let (min, max) = match value.split_once("..") {
        Some((lo, hi)) => (number(lo)?, number(hi)?),
        None => {
            let exact = number(value)?;
            (exact, exact)
        }
    };

    check_bounds(definition, value, min, max)?;
    Ok(FilterValue::Range { min, max })
}

fn parse_date_range(definition: &FilterDefinition, value: &str) -> SearchResult<FilterValue> {
    let (from, to) = match value.split_once("..") {
        Some((lo, hi)) => (
            parse_date_bound(definition, value, lo, false)?,
            parse_date_bound(definition, value, hi, true)?,
        ),
        None => (
            parse_date_bound(definition, value, value, false)?,
            parse_date_bound(definition, value, value, true)?,
        ),
    };

    check_bounds(definition, value, from, to)?;
    Ok(FilterValue::Date { from, to })
}

/// A bare date covers the whole day: its start as a lower bound, its end as an upper bound
fn parse_date_bound(
    definition: &FilterDefinition,
    raw: &str,
    bound: &str,
    upper: bool,
) -> SearchResult<Option<DateTime<Utc>>> {
    let bound = bound.trim();
    if bound.is_empty() {
        return Ok(None);
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(bound) {
        return Ok(Some(ts.with_timezone(&Utc)));
    }

    let day = NaiveDate::parse_from_str(bound, "%Y-%m-%d")
        .map_err(|_| malformed(definition, raw, "expected YYYY-MM-DD or RFC 3339"))?;
    let ts = if upper {
        day.and_hms_milli_opt(23, 59, 59, 999)
    } else {
        day.and_hms_opt(0, 0, 0)
    };
    Ok(ts.map(|naive| naive.and_utc()))
}

fn check_bounds<T: PartialOrd>(
    definition: &FilterDefinition,
    raw: &str,
    lower: Option<T>,
    upper: Option<T>,
) -> SearchResult<()> {
    match (&lower, &upper) {
        (None, None) => Err(malformed(definition, raw, "at least one bound is required")),
        (Some(lo), Some(hi)) if lo > hi => {
            Err(malformed(definition, raw, "lower bound exceeds upper bound"))
        }
        _ => Ok(()),
    }
}

fn malformed(definition: &FilterDefinition, raw: &str, reason: &str) -> SearchError {
    SearchError::validation(format!(
        "malformed value '{}' for {} filter '{}': {}",
        raw, definition.filter_kind, definition.name, reason
    ))
}
