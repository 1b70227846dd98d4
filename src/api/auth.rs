use axum::{
    body::Body,
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::api::AppState;
use crate::error::AppError;
use crate::search::SearchError;

/// Header carrying the user id authenticated by the upstream gateway
pub const USER_ID_HEADER: &str = "x-user-id";

/// Axum middleware resolving the caller's [`Identity`](crate::models::Identity).
///
/// - Requires the `X-User-Id` header
/// - Returns 401 if it is missing or names no known user
/// - Inserts the resolved `Identity` into request extensions
pub async fn identity_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let path = req.uri().path().to_string();

    let user_id = match extract_user_id(req.headers()) {
        Ok(user_id) => user_id,
        Err(error_msg) => {
            tracing::warn!(path = %path, error = %error_msg, "Rejected request: no identity");
            return AppError::Authentication(error_msg.to_string()).into_response();
        }
    };

    match state.directory.find_user(&user_id).await {
        Ok(Some(identity)) => {
            req.extensions_mut().insert(identity);
            next.run(req).await
        }
        Ok(None) => {
            tracing::warn!(path = %path, user_id = %user_id, "Rejected request: unknown user");
            AppError::Authentication(format!("Unknown user: {}", user_id)).into_response()
        }
        Err(e) => AppError::from(SearchError::upstream("identity-directory", e)).into_response(),
    }
}

fn extract_user_id(headers: &HeaderMap) -> Result<String, &'static str> {
    let raw = headers
        .get(USER_ID_HEADER)
        .ok_or("Missing required header: X-User-Id")?
        .to_str()
        .map_err(|_| "Invalid X-User-Id header: not valid UTF-8")?
        .trim();

    if raw.is_empty() {
        return Err("X-User-Id must not be empty");
    }
    Ok(raw.to_string())
}
