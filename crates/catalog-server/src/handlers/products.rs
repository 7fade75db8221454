//! `/api/products` handlers.

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    response::{IntoResponse, Response},
    Json,
};
use catalog_cache::{CacheKey, CachePolicy};
use catalog_core::prelude::*;
use serde::Serialize;
use tracing::{debug, error, instrument};

use super::{cache_control, cache_status, no_store};
use crate::params::ProductListParams;
use crate::response::{ApiError, ApiResponse, ApiResult};
use crate::state::AppState;

/// Search the catalog.
#[instrument(skip_all)]
pub async fn list_products(
    State(state): State<AppState>,
    params: Result<Query<ProductListParams>, QueryRejection>,
) -> ApiResult<Response> {
    let Query(params) =
        params.map_err(|e| ApiError::bad_request("INVALID_ARGUMENT", e.body_text()))?;
    let query = params.into_query(&state.config.query)?;

    let key = CacheKey::for_query(&query).map_err(|e| {
        error!(error = %e, "failed to build cache key");
        ApiError::fetch_error()
    })?;
    let (result, status) = state
        .cache
        .get_or_try_insert_with(key, || state.snapshot.search(&query).map(Arc::new))?;

    debug!(
        total = result.pagination.total,
        returned = result.len(),
        cache = %status,
        "products listed"
    );

    let body = ApiResponse::success(result.as_ref()).with_pagination(result.pagination);
    Ok((
        cache_control(&CachePolicy::product_list()),
        cache_status(status),
        Json(body),
    )
        .into_response())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail<'a> {
    pub product: &'a Product,
    pub related_products: Vec<&'a Product>,
}

/// A product and its related products.
#[instrument(skip_all, fields(id = %id))]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    let id = require_id(&id)?;
    let product = state.snapshot.product(id)?;
    let detail = ProductDetail {
        product,
        related_products: state.snapshot.related(id, DEFAULT_RELATED_LIMIT),
    };

    Ok((
        cache_control(&CachePolicy::product_detail()),
        Json(ApiResponse::success(detail)),
    )
        .into_response())
}

/// Current stock for a product. Never cached.
#[instrument(skip_all, fields(id = %id))]
pub async fn get_stock(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    let stock = state.snapshot.stock_info(require_id(&id)?)?;
    Ok((no_store(), Json(ApiResponse::success(stock))).into_response())
}

fn require_id(id: &str) -> Result<&str, ApiError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(ApiError::bad_request(
            "MISSING_PRODUCT_ID",
            "Product id is required",
        ));
    }
    Ok(id)
}
