//! HTTP request handlers.

mod categories;
mod merchandising;
mod products;

pub use categories::*;
pub use merchandising::*;
pub use products::*;

use axum::{extract::State, response::IntoResponse, Json};
use catalog_cache::{header_names, CachePolicy, CacheStatus};
use http::{header, HeaderName, HeaderValue, StatusCode, Uri};
use serde::Serialize;

use crate::response::{ApiError, ApiResponse};
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    status: &'static str,
    version: &'static str,
    products: usize,
    categories: usize,
    cache_enabled: bool,
}

/// Liveness and snapshot summary.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let status = HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        products: state.snapshot.products().len(),
        categories: state.snapshot.categories().len(),
        cache_enabled: state.cache.is_enabled(),
    };
    (no_store(), Json(ApiResponse::success(status)))
}

/// Fallback for unknown routes.
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::new(
        StatusCode::NOT_FOUND,
        "NOT_FOUND",
        format!("No route for {}", uri.path()),
    )
}

fn cache_control(policy: &CachePolicy) -> [(HeaderName, HeaderValue); 1] {
    let value = HeaderValue::from_str(&policy.cache_control_header())
        .unwrap_or_else(|_| HeaderValue::from_static("no-store"));
    [(header::CACHE_CONTROL, value)]
}

fn no_store() -> [(HeaderName, HeaderValue); 1] {
    cache_control(&CachePolicy::no_store())
}

fn cache_status(status: CacheStatus) -> [(HeaderName, HeaderValue); 1] {
    [(
        HeaderName::from_static(header_names::X_CACHE_STATUS),
        HeaderValue::from_static(status.as_str()),
    )]
}
