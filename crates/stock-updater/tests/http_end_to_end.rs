//! mockito 서버를 대상으로 한 전체 스택 테스트.

use mockito::{Matcher, Server, ServerGuard};
use serde_json::json;
use std::collections::HashMap;
use stock_updater::modules::{update_database, update_page};
use stock_updater::{exit_status, UpdaterConfig, UpdaterSettings};

const AAPL_QUOTE: &str = r#"{
    "Global Quote": {
        "01. symbol": "AAPL",
        "02. open": "172.0000",
        "03. high": "174.3000",
        "04. low": "171.7700",
        "05. price": "173.5000",
        "06. volume": "54091700",
        "07. latest trading day": "2024-01-15",
        "08. previous close": "171.3500"
    }
}"#;

fn config(server: &ServerGuard, extra: &[(&str, &str)]) -> stock_updater::Result<UpdaterConfig> {
    let mut env: HashMap<String, String> = [
        ("ALPHA_VANTAGE_API_KEY", "test-key"),
        ("NOTION_TOKEN", "secret_token"),
        ("NOTION_DATABASE_ID", "db-1"),
        ("STOCK_SYMBOLS", "AAPL"),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();
    env.insert("ALPHA_VANTAGE_BASE_URL".to_string(), server.url());
    env.insert("NOTION_BASE_URL".to_string(), server.url());
    for (k, v) in extra {
        env.insert(k.to_string(), v.to_string());
    }

    UpdaterConfig::from_lookup(UpdaterSettings::default(), move |key| env.get(key).cloned())
}

fn quote_query() -> Matcher {
    Matcher::AllOf(vec![
        Matcher::UrlEncoded("function".into(), "GLOBAL_QUOTE".into()),
        Matcher::UrlEncoded("symbol".into(), "AAPL".into()),
        Matcher::UrlEncoded("apikey".into(), "test-key".into()),
    ])
}

#[tokio::test]
async fn test_update_database_creates_record() {
    let mut server = Server::new_async().await;
    let quote = server
        .mock("GET", "/query")
        .match_query(quote_query())
        .with_status(200)
        .with_body(AAPL_QUOTE)
        .create_async()
        .await;
    let query = server
        .mock("POST", "/databases/db-1/query")
        .match_header("authorization", "Bearer secret_token")
        .with_status(200)
        .with_body(r#"{"object": "list", "results": [], "has_more": false}"#)
        .create_async()
        .await;
    let create = server
        .mock("POST", "/pages")
        .match_body(Matcher::PartialJson(json!({
            "parent": { "database_id": "db-1" },
            "properties": {
                "Price Change": { "number": 2.15 },
                "Percent Change": { "number": 1.25 },
                "Volume": { "number": 54091700 }
            }
        })))
        .with_status(200)
        .with_body(r#"{"object": "page", "id": "page-aapl"}"#)
        .expect(1)
        .create_async()
        .await;

    let config = config(&server, &[]).unwrap();
    let stats = update_database(&config).await.unwrap();

    assert_eq!(stats.total, 1);
    assert_eq!(stats.created, 1);
    assert_eq!(stats.failed, 0);
    quote.assert_async().await;
    query.assert_async().await;
    create.assert_async().await;
}

#[tokio::test]
async fn test_rate_limited_quote_skips_notion() {
    let mut server = Server::new_async().await;
    let _quote = server
        .mock("GET", "/query")
        .match_query(quote_query())
        .with_status(200)
        .with_body(r#"{"Note": "Thank you for using Alpha Vantage! Our standard API call frequency is 5 calls per minute."}"#)
        .create_async()
        .await;
    let notion = server
        .mock("POST", Matcher::Regex("^/(databases|pages)".to_string()))
        .expect(0)
        .create_async()
        .await;

    let config = config(&server, &[]).unwrap();
    let result = update_database(&config).await;

    assert_eq!(exit_status(&result), 0);
    let stats = result.unwrap();
    assert_eq!(stats.failed, 1);
    assert_eq!(stats.rate_limited, 1);
    notion.assert_async().await;
}

#[tokio::test]
async fn test_missing_credential_makes_no_calls() {
    let mut server = Server::new_async().await;
    let get = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;
    let post = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let result = config(&server, &[("NOTION_TOKEN", "")]);

    assert_eq!(exit_status(&result), 1);
    assert!(result.unwrap_err().is_config());
    get.assert_async().await;
    post.assert_async().await;
}

#[tokio::test]
async fn test_update_page_replaces_content() {
    let mut server = Server::new_async().await;
    let _quote = server
        .mock("GET", "/query")
        .match_query(quote_query())
        .with_status(200)
        .with_body(AAPL_QUOTE)
        .create_async()
        .await;
    let list = server
        .mock("GET", "/blocks/page-1/children")
        .match_query(Matcher::UrlEncoded("page_size".into(), "100".into()))
        .with_status(200)
        .with_body(r#"{"results": [{"id": "old-block"}], "has_more": false, "next_cursor": null}"#)
        .create_async()
        .await;
    let delete = server
        .mock("DELETE", "/blocks/old-block")
        .with_status(200)
        .with_body(r#"{"object": "block", "id": "old-block", "archived": true}"#)
        .expect(1)
        .create_async()
        .await;
    let append = server
        .mock("PATCH", "/blocks/page-1/children")
        .match_body(Matcher::Regex("AAPL - \\$173.50".to_string()))
        .with_status(200)
        .with_body(r#"{"object": "list", "results": []}"#)
        .expect(1)
        .create_async()
        .await;

    let config = config(&server, &[("NOTION_PAGE_ID", "page-1")]).unwrap();
    let stats = update_page(&config).await.unwrap();

    assert_eq!(stats.updated, 1);
    list.assert_async().await;
    delete.assert_async().await;
    append.assert_async().await;
}

#[tokio::test]
async fn test_update_page_requires_page_id() {
    let server = Server::new_async().await;
    let config = config(&server, &[]).unwrap();

    let err = update_page(&config).await.unwrap_err();

    assert!(err.is_config());
}

#[tokio::test]
async fn test_update_page_append_failure_keeps_stats() {
    let mut server = Server::new_async().await;
    let _quote = server
        .mock("GET", "/query")
        .match_query(quote_query())
        .with_status(200)
        .with_body(AAPL_QUOTE)
        .create_async()
        .await;
    let _list = server
        .mock("GET", "/blocks/page-1/children")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"results": [], "has_more": false, "next_cursor": null}"#)
        .create_async()
        .await;
    let append = server
        .mock("PATCH", "/blocks/page-1/children")
        .with_status(500)
        .with_body(r#"{"object": "error", "status": 500, "message": "internal"}"#)
        .expect(1)
        .create_async()
        .await;

    let config = config(&server, &[("NOTION_PAGE_ID", "page-1")]).unwrap();
    let result = update_page(&config).await;

    assert_eq!(exit_status(&result), 0);
    let stats = result.unwrap();
    assert_eq!(stats.total, 1);
    assert_eq!(stats.updated, 1);
    append.assert_async().await;
}
