//! HTTP surface for the query dispatcher
//!
//! Exposes the same core as the terminal bot: one query per request, the
//! session history, and on-demand news insights. Requests share a single
//! session; the mutex is held for the whole query so history order matches
//! arrival order. Insights only resolve their link under the lock.

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::dispatcher::Dispatcher;
use crate::error::{FailureKind, FetchError};
use crate::formatter;
use crate::models::{Intent, NewsCount};
use crate::session::SessionState;

/// =============================
/// Request Models
/// =============================

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct QueryRequest {
    pub query: String,
    pub news_count: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct InsightsRequest {
    /// Zero-based index into the latest news answer
    pub index: Option<usize>,
    /// Must be the link of an item in the latest news answer
    pub link: Option<String>,
}

/// =============================
/// Response Wrapper
/// =============================

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    pub data: Option<serde_json::Value>,
    pub error: Option<String>,
    pub timestamp: String,
}

impl ApiResponse {
    pub fn success<T: Serialize>(data: T) -> Self {
        Self {
            success: true,
            data: serde_json::to_value(data).ok(),
            error: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// =============================
/// API State
/// =============================

#[derive(Clone)]
pub struct ApiState {
    pub dispatcher: Arc<Dispatcher>,
    pub session: Arc<Mutex<SessionState>>,
    pub default_news_count: NewsCount,
}

/// =============================
/// Health Endpoint
/// =============================

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "greeting": formatter::GREETING,
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// =============================
/// Query Endpoint
/// =============================

async fn run_query(
    State(state): State<ApiState>,
    Json(req): Json<QueryRequest>,
) -> (StatusCode, Json<ApiResponse>) {
    info!("Received query: {}", req.query);

    let news_count = match req.news_count {
        Some(n) => match NewsCount::new(n) {
            Ok(count) => count,
            Err(e) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ApiResponse::error(e.to_string())),
                )
            }
        },
        None => state.default_news_count,
    };

    let mut session = state.session.lock().await;

    match state
        .dispatcher
        .handle(&mut session, &req.query, news_count)
        .await
    {
        Some(answer) => (StatusCode::OK, Json(ApiResponse::success(answer))),
        None => (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error("Query is empty".into())),
        ),
    }
}

/// =============================
/// History Endpoint
/// =============================

async fn history(State(state): State<ApiState>) -> (StatusCode, Json<ApiResponse>) {
    let session = state.session.lock().await;
    (
        StatusCode::OK,
        Json(ApiResponse::success(&session.history)),
    )
}

/// =============================
/// Insights Endpoint
/// =============================

fn failure_status(error: &FetchError) -> StatusCode {
    match error.kind {
        FailureKind::NotFound => StatusCode::NOT_FOUND,
        FailureKind::Network => StatusCode::BAD_GATEWAY,
        FailureKind::Parse | FailureKind::Unknown => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

async fn news_insights(
    State(state): State<ApiState>,
    Json(req): Json<InsightsRequest>,
) -> (StatusCode, Json<ApiResponse>) {
    // Resolve under the lock, fetch without it
    let article = {
        let session = state.session.lock().await;
        match (req.index, req.link.as_deref()) {
            (Some(index), _) => session.article_at(index),
            (None, Some(link)) => session.article_with_link(link),
            (None, None) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ApiResponse::error("Expected 'index' or 'link'".into())),
                )
            }
        }
    };

    let result = match article {
        Ok(article) => state.dispatcher.insights_for(&article).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(insights) => (
            StatusCode::OK,
            Json(ApiResponse::success(serde_json::json!({ "insights": insights }))),
        ),
        Err(e) => (
            failure_status(&e),
            Json(ApiResponse::error(formatter::render_failure(Intent::News, &e))),
        ),
    }
}

/// =============================
/// Router
/// =============================

pub fn create_router(dispatcher: Arc<Dispatcher>, default_news_count: NewsCount) -> Router {
    let state = ApiState {
        dispatcher,
        session: Arc::new(Mutex::new(SessionState::new())),
        default_news_count,
    };

    Router::new()
        .route("/health", get(health))
        .route("/api/query", post(run_query))
        .route("/api/history", get(history))
        .route("/api/news/insights", post(news_insights))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// =============================
/// Server Startup
/// =============================

pub async fn start_server(
    dispatcher: Arc<Dispatcher>,
    default_news_count: NewsCount,
    port: u16,
) -> crate::Result<()> {
    let router = create_router(dispatcher, default_news_count);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!("API Server listening on http://0.0.0.0:{}", port);
    info!("Local: http://127.0.0.1:{}", port);

    axum::serve(listener, router).await?;

    Ok(())
}
