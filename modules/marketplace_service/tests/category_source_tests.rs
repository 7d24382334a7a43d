//! Category Source Tests
//!
//! The HTTP taxonomy client against a mock server, and a refresh driven
//! through it.

use httpmock::prelude::*;
use marketplace_service::contract::*;
use marketplace_service::domain::{CategorySource, NoOpEventPublisher, PagingPolicy, Services};
use marketplace_service::infra::HttpCategorySource;
use marketplace_service::CategorySourceConfig;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

mod common;
use common::{print_test_header, InMemoryStore};

fn source_for(server: &MockServer, api_key: Option<&str>) -> HttpCategorySource {
    HttpCategorySource::new(&CategorySourceConfig {
        base_url: format!("{}/", server.base_url()),
        api_key: api_key.map(str::to_string),
        timeout: Duration::from_secs(2),
    })
    .unwrap()
}

fn taxonomy() -> serde_json::Value {
    json!({
        "success": true,
        "categories": [
            {
                "id": 10,
                "title": "Office Supplies",
                "subCategories": [
                    {"id": 101, "title": "Office Chairs"},
                    {"id": "102", "title": "Desks"}
                ]
            },
            {"id": "20", "title": "Cleaning"}
        ]
    })
}

#[tokio::test]
async fn test_fetch_parses_numeric_and_text_ids() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/categories")
                .header("X-Api-Key", "secret");
            then.status(200).json_body(taxonomy());
        })
        .await;

    let snapshot = source_for(&server, Some("secret")).fetch().await.unwrap();

    mock.assert_async().await;
    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot[0].external_id, "10");
    assert_eq!(snapshot[0].sub_categories.len(), 2);
    assert_eq!(snapshot[0].sub_categories[0].external_id, "101");
    assert_eq!(snapshot[0].sub_categories[1].external_id, "102");
    assert!(snapshot[1].sub_categories.is_empty());
}

#[tokio::test]
async fn test_fetch_fails_on_unsuccessful_envelope() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/categories");
            then.status(200)
                .json_body(json!({"success": false, "categories": []}));
        })
        .await;

    let result = source_for(&server, None).fetch().await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_fetch_fails_on_server_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/categories");
            then.status(503);
        })
        .await;

    let result = source_for(&server, None).fetch().await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_refresh_through_http_source() {
    print_test_header(
        "test_refresh_through_http_source",
        &[
            "A refresh pulls the taxonomy over HTTP and stores it;",
            "an unreachable source surfaces as an internal error.",
        ],
    );

    let server = MockServer::start_async().await;
    let mut mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/categories");
            then.status(200).json_body(taxonomy());
        })
        .await;

    let store = InMemoryStore::new();
    let services = Services::new(
        store.repositories(),
        Arc::new(source_for(&server, None)),
        Arc::new(NoOpEventPublisher),
        PagingPolicy::default(),
    );

    let summary = services.categories.refresh_from_source().await.unwrap();
    assert_eq!(summary.main_categories, 2);
    assert_eq!(summary.sub_categories, 2);
    assert_eq!(services.categories.list_main().await.unwrap().len(), 2);

    mock.delete_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/categories");
            then.status(500);
        })
        .await;

    let failed = services.categories.refresh_from_source().await;
    assert!(matches!(failed, Err(MarketplaceError::Internal)));
    assert_eq!(services.categories.list_main().await.unwrap().len(), 2);
}
