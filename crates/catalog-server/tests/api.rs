//! HTTP tests against the bundled sample catalog.

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use catalog_core::CatalogSnapshot;
use catalog_server::{create_router, AppState, CacheSettings, ServerConfig};
use serde_json::Value;
use tower::ServiceExt;

fn data_dir() -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data")
}

fn app_with(config: ServerConfig) -> Router {
    let snapshot = CatalogSnapshot::load_dir(data_dir()).expect("sample catalog loads");
    create_router(AppState::new(snapshot, config))
}

fn app() -> Router {
    app_with(ServerConfig::default())
}

async fn send(app: Router, uri: &str) -> Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn ids(products: &Value) -> Vec<&str> {
    products
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_str().unwrap())
        .collect()
}

fn header<'a>(response: &'a Response, name: &str) -> &'a str {
    response.headers().get(name).unwrap().to_str().unwrap()
}

#[tokio::test]
async fn test_list_products_envelope() {
    let response = send(app(), "/api/products").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        header(&response, "cache-control"),
        "public, s-maxage=3600, stale-while-revalidate=86400"
    );
    assert!(!header(&response, "x-request-id").is_empty());

    let body = json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["pagination"]["total"], 12);
    assert_eq!(body["data"]["pagination"]["totalPages"], 1);
    assert_eq!(body["meta"]["pagination"], body["data"]["pagination"]);
    assert!(body["meta"]["timestamp"].is_string());
    assert_eq!(body["data"]["filters"]["priceRange"]["min"], 1980);
    assert_eq!(body["data"]["filters"]["priceRange"]["max"], 89800);
    // Newest first by default.
    assert_eq!(ids(&body["data"]["products"])[0], "prod-007");
}

#[tokio::test]
async fn test_filter_and_sort() {
    let body = json(send(app(), "/api/products?category=audio&sort=price_asc").await).await;
    assert_eq!(
        ids(&body["data"]["products"]),
        vec!["prod-005", "prod-004", "prod-003"]
    );

    let body = json(send(app(), "/api/products?category=audio&inStock=true").await).await;
    assert_eq!(ids(&body["data"]["products"]), vec!["prod-003", "prod-004"]);

    let body = json(send(app(), "/api/products?search=KITCHEN&inStock=false").await).await;
    assert_eq!(ids(&body["data"]["products"]), vec!["prod-010"]);

    let body = json(send(app(), "/api/products?tags=rust,databases&sort=name_asc").await).await;
    assert_eq!(ids(&body["data"]["products"]), vec!["prod-012", "prod-011"]);
}

#[tokio::test]
async fn test_pagination_past_the_end() {
    let body = json(send(app(), "/api/products?limit=5&page=3").await).await;
    assert_eq!(body["data"]["products"].as_array().unwrap().len(), 2);
    assert_eq!(body["data"]["pagination"]["totalPages"], 3);
    assert_eq!(body["data"]["pagination"]["hasNext"], false);

    let body = json(send(app(), "/api/products?limit=5&page=9").await).await;
    assert!(body["data"]["products"].as_array().unwrap().is_empty());
    assert_eq!(body["data"]["pagination"]["total"], 12);
}

#[tokio::test]
async fn test_unknown_sort_uses_newest() {
    let a = json(send(app(), "/api/products?sort=bogus").await).await;
    let b = json(send(app(), "/api/products?sort=newest").await).await;
    assert_eq!(a["data"]["products"], b["data"]["products"]);
}

#[tokio::test]
async fn test_bad_parameters_are_400() {
    for uri in [
        "/api/products?limit=0",
        "/api/products?limit=1000",
        "/api/products?priceMin=cheap",
        "/api/products?rating=high",
    ] {
        let response = send(app(), uri).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", uri);
        let body = json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "INVALID_ARGUMENT");
        assert!(body["meta"]["timestamp"].is_string());
    }
}

#[tokio::test]
async fn test_product_detail() {
    let response = send(app(), "/api/products/prod-003").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        header(&response, "cache-control"),
        "public, s-maxage=60, stale-while-revalidate=3600"
    );

    let body = json(response).await;
    assert_eq!(body["data"]["product"]["name"], "Noise Cancelling Headphones");
    assert_eq!(
        ids(&body["data"]["relatedProducts"]),
        vec!["prod-004", "prod-005"]
    );
}

#[tokio::test]
async fn test_unknown_product_is_404() {
    let response = send(app(), "/api/products/nope").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json(response).await;
    assert_eq!(body["error"]["code"], "PRODUCT_NOT_FOUND");
}

#[tokio::test]
async fn test_stock_is_not_cached() {
    let response = send(app(), "/api/products/prod-001/stock").await;
    assert_eq!(header(&response, "cache-control"), "no-store");
    let body = json(response).await;
    assert_eq!(body["data"]["stockCount"], 42);
    assert_eq!(body["data"]["reservedCount"], 4);
}

#[tokio::test]
async fn test_categories() {
    let body = json(send(app(), "/api/categories").await).await;
    let roots = body["data"].as_array().unwrap();
    assert_eq!(roots.len(), 3);
    assert_eq!(roots[0]["children"][1]["children"][0]["slug"], "headphones");

    let body = json(send(app(), "/api/categories/home-kitchen").await).await;
    assert_eq!(body["data"]["category"]["id"], "home");
    assert_eq!(
        ids(&body["data"]["products"]),
        vec!["prod-008", "prod-009", "prod-010"]
    );

    let nested = send(app(), "/api/categories/headphones").await;
    assert_eq!(nested.status(), StatusCode::OK);

    let missing = send(app(), "/api/categories/garden").await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    assert_eq!(json(missing).await["error"]["code"], "CATEGORY_NOT_FOUND");
}

#[tokio::test]
async fn test_collections() {
    let body = json(send(app(), "/api/collections/sale").await).await;
    assert_eq!(
        ids(&body["data"]),
        vec!["prod-003", "prod-007", "prod-004", "prod-009", "prod-001"]
    );

    let body = json(send(app(), "/api/collections/new?limit=2").await).await;
    assert_eq!(ids(&body["data"]), vec!["prod-007", "prod-001"]);

    let response = send(app(), "/api/collections/clearance").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_suggestions() {
    let body = json(send(app(), "/api/suggestions?q=phone").await).await;
    assert_eq!(
        body["data"],
        serde_json::json!([
            "Smartphone X",
            "Smartphone Lite",
            "Noise Cancelling Headphones",
            "Phone Case",
            "Smartphones",
            "Headphones"
        ])
    );

    let body = json(send(app(), "/api/suggestions?q=p").await).await;
    assert_eq!(body["data"], serde_json::json!([]));
}

#[tokio::test]
async fn test_query_cache_status() {
    let app = app();
    let first = send(app.clone(), "/api/products?category=books").await;
    assert_eq!(header(&first, "x-cache-status"), "MISS");
    let second = send(app.clone(), "/api/products?category=books").await;
    assert_eq!(header(&second, "x-cache-status"), "HIT");
    assert_eq!(json(first).await["data"], json(second).await["data"]);

    let disabled = app_with(ServerConfig::default().with_cache(CacheSettings {
        enabled: false,
        ..CacheSettings::default()
    }));
    let response = send(disabled, "/api/products").await;
    assert_eq!(header(&response, "x-cache-status"), "BYPASS");
}

#[tokio::test]
async fn test_cors_preflight() {
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/products")
        .header(header::ORIGIN, "https://shop.example")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
        .body(Body::empty())
        .unwrap();
    let response = app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(header(&response, "access-control-allow-origin"), "*");
    assert!(header(&response, "access-control-allow-methods").contains("GET"));
    assert!(!header(&response, "x-request-id").is_empty());
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let request = Request::builder()
        .uri("/health")
        .header("x-request-id", "abc-123")
        .body(Body::empty())
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(header(&response, "x-request-id"), "abc-123");

    let body = json(response).await;
    assert_eq!(body["data"]["status"], "ok");
    assert_eq!(body["data"]["products"], 12);
}

#[tokio::test]
async fn test_unknown_route() {
    let response = send(app(), "/api/nothing").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json(response).await["error"]["code"], "NOT_FOUND");
}
