//! Fetcher trait and HTTP implementation
//!
//! Each fetcher performs one outbound read against a third-party source and
//! returns a typed `FetchResult`. Upstream formats are parsed by narrow pure
//! functions in the submodules so format drift breaks one unit test.

pub mod currency;
pub mod news;
pub mod stock;
pub mod weather;

use crate::config::Settings;
use crate::error::FetchResult;
use crate::models::{CurrencyRate, NewsCount, NewsItem, StockReport, WeatherReport};
use crate::Result;
use reqwest::Client;
use std::time::Duration;
use tracing::{info, warn};

/// Source of upstream data (HTTP in production, stubs in tests)
#[async_trait::async_trait]
pub trait DataSource: Send + Sync {
    /// At most `count` (title, link) pairs from the news feed
    async fn fetch_news(&self, count: NewsCount) -> FetchResult<Vec<NewsItem>>;

    /// First three paragraphs of a linked article
    async fn fetch_insights(&self, link: &str) -> FetchResult<String>;

    async fn fetch_stock(&self, symbol: &str) -> FetchResult<StockReport>;

    async fn fetch_weather(&self, city: &str) -> FetchResult<WeatherReport>;

    async fn fetch_rate(&self, from: &str, to: &str) -> FetchResult<CurrencyRate>;
}

/// Data source backed by the public endpoints in `Settings`
pub struct HttpSource {
    client: Client,
    settings: Settings,
}

impl HttpSource {
    pub fn new(settings: Settings) -> Result<Self> {
        let client = Client::builder()
            .pool_idle_timeout(Duration::from_secs(60))
            .pool_max_idle_per_host(8)
            .timeout(settings.request_timeout)
            .user_agent(settings.user_agent.clone())
            .build()?;

        Ok(Self { client, settings })
    }
}

/// Log a failed fetch before handing it back
fn logged<T>(source: &'static str, result: FetchResult<T>) -> FetchResult<T> {
    if let Err(ref e) = result {
        warn!(source, kind = ?e.kind, error = %e.message, "Fetch failed");
    }
    result
}

#[async_trait::async_trait]
impl DataSource for HttpSource {
    async fn fetch_news(&self, count: NewsCount) -> FetchResult<Vec<NewsItem>> {
        info!(count = count.get(), "Fetching news feed");
        logged(
            "news",
            news::fetch_news(&self.client, &self.settings.news_feed_url, count).await,
        )
    }

    async fn fetch_insights(&self, link: &str) -> FetchResult<String> {
        info!(link, "Fetching news insights");
        logged("insights", news::fetch_insights(&self.client, link).await)
    }

    async fn fetch_stock(&self, symbol: &str) -> FetchResult<StockReport> {
        info!(symbol, "Fetching stock quote");
        logged("stock", stock::fetch_stock(&self.settings, symbol).await)
    }

    async fn fetch_weather(&self, city: &str) -> FetchResult<WeatherReport> {
        info!(city, "Fetching weather report");
        logged(
            "weather",
            weather::fetch_weather(&self.client, &self.settings, city).await,
        )
    }

    async fn fetch_rate(&self, from: &str, to: &str) -> FetchResult<CurrencyRate> {
        info!(from, to, "Fetching exchange rate");
        logged(
            "currency",
            currency::fetch_rate(&self.client, &self.settings.currency_url, from, to).await,
        )
    }
}
