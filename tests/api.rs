//! HTTP surface exercised in-process

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use query_dispatcher::{
    api::create_router,
    dispatcher::Dispatcher,
    error::{FetchError, FetchResult},
    fetchers::DataSource,
    models::{CurrencyRate, NewsCount, NewsItem, StockReport, WeatherReport},
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tower::ServiceExt;

/// Holds an insights fetch open until released
#[derive(Default)]
struct Gate {
    entered: Notify,
    release: Notify,
}

#[derive(Default)]
struct CannedSource {
    gate: Option<Arc<Gate>>,
}

#[async_trait::async_trait]
impl DataSource for CannedSource {
    async fn fetch_news(&self, count: NewsCount) -> FetchResult<Vec<NewsItem>> {
        Ok((1..=10)
            .take(count.as_usize())
            .map(|i| NewsItem {
                title: format!("Story {}", i),
                link: format!("https://news.example/{}", i),
            })
            .collect())
    }

    async fn fetch_insights(&self, link: &str) -> FetchResult<String> {
        if let Some(gate) = &self.gate {
            gate.entered.notify_one();
            gate.release.notified().await;
        }
        Ok(format!("About {}", link))
    }

    async fn fetch_stock(&self, symbol: &str) -> FetchResult<StockReport> {
        Err(FetchError::not_found(format!(
            "Stock price not found for '{}'.",
            symbol
        )))
    }

    async fn fetch_weather(&self, _city: &str) -> FetchResult<WeatherReport> {
        Err(FetchError::network("connection refused"))
    }

    async fn fetch_rate(&self, _from: &str, _to: &str) -> FetchResult<CurrencyRate> {
        Err(FetchError::parse("Exchange rate not found."))
    }
}

fn app_with(source: CannedSource) -> Router {
    let dispatcher = Arc::new(Dispatcher::new(Arc::new(source)));
    create_router(dispatcher, NewsCount::default())
}

fn app() -> Router {
    app_with(CannedSource::default())
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(match body {
            Some(v) => Body::from(v.to_string()),
            None => Body::empty(),
        })
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_health() {
    let (status, body) = send(&app(), "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_query_then_history() {
    let app = app();

    let (status, body) = send(
        &app,
        "POST",
        "/api/query",
        Some(json!({ "query": "show me news", "news_count": 3 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["intent"], "news");
    assert_eq!(body["data"]["response"], "- Story 1\n- Story 2\n- Story 3");
    assert_eq!(body["data"]["news"].as_array().unwrap().len(), 3);

    let (_, body) = send(
        &app,
        "POST",
        "/api/query",
        Some(json!({ "query": "weather in Pune" })),
    )
    .await;
    assert_eq!(body["data"]["failure"], "network");

    let (status, body) = send(&app, "GET", "/api/history", None).await;
    assert_eq!(status, StatusCode::OK);
    let entries = body["data"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["query"], "show me news");
    assert_eq!(entries[1]["query"], "weather in Pune");
}

#[tokio::test]
async fn test_query_validation() {
    let app = app();

    let (status, _) = send(
        &app,
        "POST",
        "/api/query",
        Some(json!({ "query": "news", "news_count": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "POST", "/api/query", Some(json!({ "query": "" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Whitespace is still a query
    let (status, body) = send(&app, "POST", "/api/query", Some(json!({ "query": "  " }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["intent"], "unknown");

    let (_, body) = send(&app, "GET", "/api/history", None).await;
    let entries = body["data"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["query"], "  ");
}

#[tokio::test]
async fn test_insights_by_index_and_link() {
    let app = app();

    send(
        &app,
        "POST",
        "/api/query",
        Some(json!({ "query": "latest news", "news_count": 2 })),
    )
    .await;

    let (status, body) = send(&app, "POST", "/api/news/insights", Some(json!({ "index": 1 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["insights"], "About https://news.example/2");

    let (status, _) = send(&app, "POST", "/api/news/insights", Some(json!({ "index": 7 }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(
        &app,
        "POST",
        "/api/news/insights",
        Some(json!({ "link": "https://news.example/1" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["insights"], "About https://news.example/1");

    // Only links from the latest news answer are fetched
    for link in [
        "https://elsewhere.example/x",
        "http://127.0.0.1:1/admin",
        "https://news.example/3",
    ] {
        let (status, body) = send(
            &app,
            "POST",
            "/api/news/insights",
            Some(json!({ "link": link })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", link);
        assert_eq!(body["success"], false);
    }

    let (status, _) = send(&app, "POST", "/api/news/insights", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Insights never add history entries
    let (_, body) = send(&app, "GET", "/api/history", None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_queries_proceed_while_insights_are_fetched() {
    let gate = Arc::new(Gate::default());
    let app = app_with(CannedSource {
        gate: Some(gate.clone()),
    });

    send(
        &app,
        "POST",
        "/api/query",
        Some(json!({ "query": "latest news", "news_count": 2 })),
    )
    .await;

    let pending = tokio::spawn({
        let app = app.clone();
        async move { send(&app, "POST", "/api/news/insights", Some(json!({ "index": 0 }))).await }
    });
    gate.entered.notified().await;

    let (status, _) = tokio::time::timeout(
        Duration::from_secs(5),
        send(&app, "POST", "/api/query", Some(json!({ "query": "stock of XYZ" }))),
    )
    .await
    .expect("query blocked behind insights fetch");
    assert_eq!(status, StatusCode::OK);

    gate.release.notify_one();
    let (status, body) = pending.await.unwrap();
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["insights"], "About https://news.example/1");
}
