use crate::api::{auth::identity_middleware, handlers, AppState};
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::time::Duration;
use tower_http::{
    cors::CorsLayer,
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};

/// Build the main API router
pub fn build_router(state: AppState, request_timeout: Duration) -> Router {
    // Every /v1 route needs a resolved identity
    let search_routes = Router::new()
        .route(
            "/v1/search",
            post(handlers::search_structured).get(handlers::search_parameters),
        )
        .route("/v1/search/filters", get(handlers::list_filters))
        .route("/v1/search/select-values", post(handlers::select_values))
        .route("/v1/search/autocomplete", get(handlers::autocomplete))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            identity_middleware,
        ));

    Router::new()
        // Health endpoints
        .route("/health", get(handlers::health_check))
        .route("/health/live", get(handlers::health_check))
        .route("/health/ready", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics))
        .merge(search_routes)
        // Add state
        .with_state(state)
        // Add middleware
        .layer(TimeoutLayer::new(request_timeout))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().include_headers(true))
                .on_response(DefaultOnResponse::new().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
}
