//! HTTP API for the storefront catalog.
//!
//! Serves an immutable [`CatalogSnapshot`] over JSON:
//!
//! | Route | Response |
//! |-------|----------|
//! | `GET /api/products` | search results, facets and pagination |
//! | `GET /api/products/:id` | a product and its related products |
//! | `GET /api/products/:id/stock` | stock availability |
//! | `GET /api/categories` | the category tree |
//! | `GET /api/categories/:slug` | a category and its products |
//! | `GET /api/collections/:name` | `featured`, `new` or `sale` |
//! | `GET /api/suggestions?q=` | search-box completions |
//! | `GET /health` | liveness |
//!
//! Every body uses the `{success, data | error, meta}` envelope and every
//! response carries `X-Request-ID`.

pub mod config;
pub mod handlers;
pub mod params;
pub mod response;
pub mod state;

use axum::{extract::Request, routing::get, Router};
use catalog_cache::header_names::X_REQUEST_ID;
use catalog_core::CatalogSnapshot;
use catalog_observability::RequestId;
use http::{header, HeaderName, HeaderValue, Method};
use thiserror::Error;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestId, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

pub use config::{CacheSettings, QuerySettings, ServerConfig};
pub use response::{ApiError, ApiResponse, ApiResult};
pub use state::AppState;

/// Server errors.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Issues a fresh [`RequestId`] for requests that arrive without one.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeCatalogRequestId;

impl MakeRequestId for MakeCatalogRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<tower_http::request_id::RequestId> {
        HeaderValue::from_str(RequestId::generate().as_str())
            .ok()
            .map(tower_http::request_id::RequestId::new)
    }
}

/// Create the API router with all routes.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    let request_id = HeaderName::from_static(X_REQUEST_ID);
    let trace = TraceLayer::new_for_http().make_span_with(|request: &Request| {
        let request_id = request
            .headers()
            .get(X_REQUEST_ID)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-");
        tracing::info_span!(
            "http",
            method = %request.method(),
            uri = %request.uri(),
            request_id,
        )
    });

    Router::new()
        .route("/health", get(handlers::health))
        // Products
        .route("/api/products", get(handlers::list_products))
        .route("/api/products/:id", get(handlers::get_product))
        .route("/api/products/:id/stock", get(handlers::get_stock))
        // Categories
        .route("/api/categories", get(handlers::list_categories))
        .route("/api/categories/:slug", get(handlers::get_category))
        // Merchandising
        .route("/api/collections/:name", get(handlers::get_collection))
        .route("/api/suggestions", get(handlers::get_suggestions))
        .fallback(handlers::not_found)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(request_id.clone(), MakeCatalogRequestId))
                .layer(trace)
                .layer(PropagateRequestIdLayer::new(request_id))
                .layer(cors),
        )
}

/// Bind `config.bind` and serve until Ctrl-C.
pub async fn serve(snapshot: CatalogSnapshot, config: ServerConfig) -> Result<(), ServerError> {
    let addr = config.bind.clone();
    let products = snapshot.products().len();
    let app = create_router(AppState::new(snapshot, config));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: addr.clone(),
            source,
        })?;

    info!(addr = %addr, products, "catalog API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("catalog API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
