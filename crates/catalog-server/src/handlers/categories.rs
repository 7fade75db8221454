//! `/api/categories` handlers.

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    Json,
};
use catalog_cache::CachePolicy;
use catalog_core::prelude::*;
use serde::Serialize;
use tracing::instrument;

use super::cache_control;
use crate::params::LimitParams;
use crate::response::{ApiResponse, ApiResult};
use crate::state::AppState;

/// The full category tree.
pub async fn list_categories(State(state): State<AppState>) -> Response {
    (
        cache_control(&CachePolicy::product_list()),
        Json(ApiResponse::success(state.snapshot.categories())),
    )
        .into_response()
}

#[derive(Debug, Serialize)]
pub struct CategoryDetail<'a> {
    pub category: &'a Category,
    pub products: Vec<&'a Product>,
}

/// A category (with its subtree) and the products filed directly under it.
#[instrument(skip_all, fields(slug = %slug))]
pub async fn get_category(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<LimitParams>,
) -> ApiResult<Response> {
    let limit = params.resolve(state.config.query.max_limit)?;
    let category = state.snapshot.category(&slug)?;
    let detail = CategoryDetail {
        category,
        products: state
            .snapshot
            .products_in_category(category.id.as_str(), limit),
    };

    Ok((
        cache_control(&CachePolicy::product_list()),
        Json(ApiResponse::success(detail)),
    )
        .into_response())
}
