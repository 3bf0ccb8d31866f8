//! Query dispatcher - one query through the whole pipeline
//!
//! QUERY → ROUTE → FETCH → RENDER → HISTORY

use crate::error::{FailureKind, FetchError, FetchResult};
use crate::fetchers::DataSource;
use crate::formatter;
use crate::models::{Intent, NewsCount, NewsItem, Parameter, Payload, Route};
use crate::router::IntentRouter;
use crate::session::{ArticleLink, SessionState};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Everything a display surface needs for one answered query
#[derive(Debug, Clone, Serialize)]
pub struct DispatchResponse {
    pub query: String,
    pub intent: Intent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,
    pub response: String,
    /// Set when the fetch failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureKind>,
    /// News items behind a news answer; insights are requested by index
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub news: Vec<NewsItem>,
}

pub struct Dispatcher {
    source: Arc<dyn DataSource>,
}

impl Dispatcher {
    pub fn new(source: Arc<dyn DataSource>) -> Self {
        Self { source }
    }

    /// Answer one query and record it in the session history.
    ///
    /// The empty string is ignored and returns `None`. Every other query,
    /// whitespace-only ones included, appends exactly one history entry
    /// whatever the outcome.
    pub async fn handle(
        &self,
        session: &mut SessionState,
        query: &str,
        news_count: NewsCount,
    ) -> Option<DispatchResponse> {
        if query.is_empty() {
            debug!("Ignoring empty query");
            return None;
        }

        let started = Instant::now();
        let route = IntentRouter::route(query);
        info!(intent = %route.intent, "Routed query");

        let heading = formatter::heading(&route);
        let mut failure = None;
        let mut news = Vec::new();

        let response = if route.intent == Intent::Unknown {
            formatter::NOT_UNDERSTOOD.to_string()
        } else if route.is_declined() {
            info!(intent = %route.intent, "Router declined: no parameter");
            formatter::render_declined(route.intent)
        } else {
            let result = self.fetch(&route, news_count).await;

            match &result {
                Ok(Payload::News(items)) => news = items.clone(),
                Ok(_) => {}
                Err(e) => failure = Some(e.kind),
            }

            formatter::render(route.intent, &result)
        };

        if route.intent == Intent::News {
            session.last_news = news.clone();
        }
        session.history.append(query, response.clone());

        info!(
            intent = %route.intent,
            failed = failure.is_some(),
            history_len = session.history.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Query answered"
        );

        Some(DispatchResponse {
            query: query.to_string(),
            intent: route.intent,
            heading,
            response,
            failure,
            news,
        })
    }

    async fn fetch(&self, route: &Route, news_count: NewsCount) -> FetchResult<Payload> {
        match (&route.intent, &route.parameter) {
            (Intent::News, _) => self.source.fetch_news(news_count).await.map(Payload::News),
            (Intent::Stock, Parameter::Symbol { symbol }) => {
                self.source.fetch_stock(symbol).await.map(Payload::Stock)
            }
            (Intent::Weather, Parameter::City { city }) => {
                self.source.fetch_weather(city).await.map(Payload::Weather)
            }
            (Intent::Currency, Parameter::CurrencyPair { from, to }) => {
                self.source.fetch_rate(from, to).await.map(Payload::Currency)
            }
            (intent, parameter) => {
                warn!(%intent, ?parameter, "No fetcher for route");
                Err(FetchError::unknown(format!("No fetcher for {} query", intent)))
            }
        }
    }

    /// Insights for item `index` of the session's latest news answer
    pub async fn insights(&self, session: &SessionState, index: usize) -> FetchResult<String> {
        let article = session.article_at(index)?;
        self.insights_for(&article).await
    }

    /// Insights for an article already resolved against a session.
    /// Does not touch history.
    pub async fn insights_for(&self, article: &ArticleLink) -> FetchResult<String> {
        self.source.fetch_insights(article.as_str()).await
    }
}
