use crate::api::AppState;
use crate::error::Result;
use crate::metrics::gather_metrics;
use crate::models::{Identity, QuickSearchResultItem, SearchResultItem, VocabularyValue};
use crate::search::{FilterInfo, SearchParameters, SearchRequestModel, SelectValuesRequest};
use axum::{
    extract::{Extension, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Health check endpoint
pub async fn health_check() -> Result<Json<HealthResponse>> {
    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Prometheus text exposition
pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    if !state.metrics_enabled {
        return (StatusCode::NOT_FOUND, String::from("metrics disabled\n")).into_response();
    }
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        gather_metrics(),
    )
        .into_response()
}

/// Search with a structured body
pub async fn search_structured(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(request): Json<SearchRequestModel>,
) -> Result<Json<Vec<SearchResultItem>>> {
    let results = state.search.search_structured(&identity, &request).await?;
    Ok(Json(results))
}

/// Search with flat query parameters
pub async fn search_parameters(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<SearchResultItem>>> {
    let params = SearchParameters::from_pairs(pairs)?;
    let results = state.search.search_parameters(&identity, &params).await?;
    Ok(Json(results))
}

#[derive(Debug, Default, Deserialize)]
pub struct FiltersQuery {
    #[serde(rename = "itemsType")]
    pub items_type: Option<String>,
}

/// End-user filter definitions for a category
pub async fn list_filters(
    State(state): State<AppState>,
    Query(query): Query<FiltersQuery>,
) -> Result<Json<Vec<FilterInfo>>> {
    let filters = state.search.filters(query.items_type.as_deref())?;
    Ok(Json(filters))
}

/// Selectable values for one filter
pub async fn select_values(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(request): Json<SelectValuesRequest>,
) -> Result<Json<Vec<VocabularyValue>>> {
    let values = state.search.select_values(&identity, &request).await?;
    Ok(Json(values))
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct AutocompleteQuery {
    #[serde(default)]
    #[validate(length(max = 200))]
    pub q: String,
}

/// Prefix suggestions
pub async fn autocomplete(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Query(query): Query<AutocompleteQuery>,
) -> Result<Json<Vec<QuickSearchResultItem>>> {
    query.validate()?;
    let suggestions = state.search.suggest(&identity, &query.q).await?;
    Ok(Json(suggestions))
}
