//! API route definitions.

use axum::{
    Json, Router,
    http::{HeaderValue, StatusCode},
    middleware,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{AppState, middleware::auth::auth_middleware};
use centry_core::ledger::CacheKey;
use centry_shared::AppError;

pub mod accounts;
pub mod goals;
pub mod health;
pub mod transactions;

/// Response header carrying the cache keys a mutation invalidated.
pub const INVALIDATE_HEADER: &str = "x-centry-invalidate";

/// Creates the API router with protected routes that need state for middleware.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    // Everything except health requires authentication
    let protected_routes = Router::new()
        .merge(accounts::routes())
        .merge(transactions::routes())
        .merge(goals::routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .merge(health::routes())
        .merge(protected_routes)
}

/// Renders an [`AppError`] as a structured failure response.
pub(crate) fn error_response(error: &AppError) -> Response {
    let status =
        StatusCode::from_u16(error.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(json!({
            "success": false,
            "kind": error.kind(),
            "message": error.to_string()
        })),
    )
        .into_response()
}

/// Joins cache keys into the invalidation header value.
pub(crate) fn invalidation_value(keys: &[CacheKey]) -> String {
    keys.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Attaches the invalidation header to a mutation response.
pub(crate) fn with_invalidations(mut response: Response, keys: &[CacheKey]) -> Response {
    if !keys.is_empty() {
        if let Ok(value) = HeaderValue::from_str(&invalidation_value(keys)) {
            response.headers_mut().insert(INVALIDATE_HEADER, value);
        }
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_invalidation_value_joins_keys() {
        let id = Uuid::nil();
        let keys = [CacheKey::Dashboard, CacheKey::Account(id)];
        assert_eq!(
            invalidation_value(&keys),
            format!("dashboard,account/{id}")
        );
    }

    #[test]
    fn test_invalidation_value_empty() {
        assert_eq!(invalidation_value(&[]), "");
    }
}
