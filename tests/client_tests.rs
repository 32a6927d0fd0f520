use kcal::api::{BarcodeLookup, OpenFoodFactsClient, SearchQuery};
use kcal::config::ApiConfig;
use kcal::ApiError;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> OpenFoodFactsClient {
    OpenFoodFactsClient::new(ApiConfig::with_base_url(&server.uri())).unwrap()
}

#[tokio::test]
async fn test_fetch_by_barcode_sends_expected_request() {
    let server = MockServer::start().await;
    let cfg = ApiConfig::with_base_url(&server.uri());

    Mock::given(method("GET"))
        .and(path("/api/v2/product/3017620422003"))
        .and(query_param("fields", cfg.product_fields.as_str()))
        .and(query_param("lc", "ru"))
        .and(query_param("cc", "ru"))
        .and(header("user-agent", cfg.user_agent.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": "3017620422003",
            "status": 1,
            "product": {
                "code": "3017620422003",
                "product_name": "Nutella",
                "brands": "Ferrero",
                "nutriments": { "energy-kcal_100g": 539 }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = OpenFoodFactsClient::new(cfg.clone()).unwrap();
    let response = client
        .fetch_by_barcode(&BarcodeLookup::new("3017620422003", &cfg))
        .await
        .unwrap();

    let product = response.found().unwrap();
    assert_eq!(product.product_name.as_deref(), Some("Nutella"));
    assert_eq!(product.brands.as_deref(), Some("Ferrero"));
}

#[tokio::test]
async fn test_fetch_by_barcode_custom_fields_and_locale() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/product/737628064502"))
        .and(query_param("fields", "code,product_name"))
        .and(query_param("lc", "en"))
        .and(query_param("cc", "us"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "product": { "code": "737628064502" } })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut lookup = BarcodeLookup::new(" 737628064502 ", client.config()).fields("code,product_name");
    lookup.lang = "en".into();
    lookup.country = "us".into();

    let response = client.fetch_by_barcode(&lookup).await.unwrap();
    assert_eq!(lookup.barcode, "737628064502");
    assert!(response.found().is_some());
}

#[tokio::test]
async fn test_missing_or_empty_product_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/product/000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": 0, "product": null })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v2/product/111"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": 0, "product": {} })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let cfg = client.config().clone();
    let none = client.fetch_by_barcode(&BarcodeLookup::new("000", &cfg)).await.unwrap();
    assert!(none.found().is_none());
    let empty = client.fetch_by_barcode(&BarcodeLookup::new("111", &cfg)).await.unwrap();
    assert!(empty.found().is_none());
}

#[tokio::test]
async fn test_search_products_sends_expected_request() {
    let server = MockServer::start().await;
    let cfg = ApiConfig::with_base_url(&server.uri());

    Mock::given(method("GET"))
        .and(path("/api/v2/search"))
        .and(query_param("search_terms", "greek yogurt"))
        .and(query_param("fields", cfg.search_fields.as_str()))
        .and(query_param("page_size", "10"))
        .and(query_param("lc", "ru"))
        .and(query_param("cc", "ru"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 2,
            "page": 1,
            "products": [
                { "code": "1", "product_name": "Greek yogurt", "categories_tags": ["en:yogurts"] },
                { "code": "2", "product_name": "Skyr" }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = OpenFoodFactsClient::new(cfg.clone()).unwrap();
    let response = client.search_products(&SearchQuery::new("greek yogurt", &cfg)).await.unwrap();
    assert_eq!(response.products.len(), 2);
    assert_eq!(response.products[0].categories_tags, vec!["en:yogurts"]);
}

#[tokio::test]
async fn test_search_page_size_override() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/search"))
        .and(query_param("page_size", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "products": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let query = SearchQuery::new("kefir", client.config()).page_size(20);
    let response = client.search_products(&query).await.unwrap();
    assert!(response.products.is_empty());
}

#[tokio::test]
async fn test_non_success_status_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .search_products(&SearchQuery::new("tea", client.config()))
        .await
        .unwrap_err();
    match &err {
        ApiError::Status { status, body } => {
            assert_eq!(*status, 503);
            assert_eq!(body, "Service Unavailable");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.to_string(), "HTTP 503: Service Unavailable");
}

#[tokio::test]
async fn test_malformed_json_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .fetch_by_barcode(&BarcodeLookup::new("42", client.config()))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)), "got {err:?}");
}

#[tokio::test]
async fn test_slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "products": [] }))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let mut cfg = ApiConfig::with_base_url(&server.uri());
    cfg.timeout = Duration::from_millis(200);
    let client = OpenFoodFactsClient::new(cfg).unwrap();

    let err = client
        .search_products(&SearchQuery::new("tea", client.config()))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Timeout { .. }), "got {err:?}");
    assert!(err.to_string().starts_with("Request timed out after 0.2s"));
}

#[tokio::test]
async fn test_connection_refused_is_a_network_error() {
    // Nothing listens on the discard port of localhost in the test environment
    let client = OpenFoodFactsClient::new(ApiConfig::with_base_url("http://127.0.0.1:9")).unwrap();
    let err = client
        .fetch_by_barcode(&BarcodeLookup::new("1", client.config()))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Network(_)), "got {err:?}");
}
