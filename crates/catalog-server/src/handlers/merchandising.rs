//! Collections and search suggestions.

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    Json,
};
use catalog_cache::CachePolicy;
use catalog_core::prelude::*;
use tracing::instrument;

use super::cache_control;
use crate::params::{LimitParams, SuggestParams};
use crate::response::{ApiResponse, ApiResult};
use crate::state::AppState;

/// `featured`, `new` or `sale`.
#[instrument(skip_all, fields(collection = %name))]
pub async fn get_collection(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(params): Query<LimitParams>,
) -> ApiResult<Response> {
    let collection: Collection = name.parse()?;
    let limit = params
        .resolve(state.config.query.max_limit)?
        .unwrap_or(DEFAULT_COLLECTION_LIMIT);

    Ok((
        cache_control(&CachePolicy::product_list()),
        Json(ApiResponse::success(state.snapshot.collection(collection, limit))),
    )
        .into_response())
}

/// Search-box completions.
pub async fn get_suggestions(
    State(state): State<AppState>,
    Query(params): Query<SuggestParams>,
) -> Response {
    (
        cache_control(&CachePolicy::product_list()),
        Json(ApiResponse::success(state.snapshot.suggestions(&params.q))),
    )
        .into_response()
}
