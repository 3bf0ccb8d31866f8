//! Per-session state owned by the display layer and passed into the dispatcher

use crate::error::{FetchError, FetchResult};
use crate::history::HistoryLog;
use crate::models::NewsItem;

/// Article link taken from the session's latest news answer.
///
/// Only [`SessionState`] hands these out, so insights are never fetched for
/// a URL the session did not itself receive from the news feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleLink(String);

impl ArticleLink {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub history: HistoryLog,
    /// Items of the most recent news answer, for on-demand insights
    pub last_news: Vec<NewsItem>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn news_item(&self, index: usize) -> Option<&NewsItem> {
        self.last_news.get(index)
    }

    /// Link of item `index` (zero-based) in the latest news answer
    pub fn article_at(&self, index: usize) -> FetchResult<ArticleLink> {
        self.news_item(index)
            .map(|item| ArticleLink(item.link.clone()))
            .ok_or_else(|| {
                FetchError::not_found(format!(
                    "No news item #{} in the latest results.",
                    index + 1
                ))
            })
    }

    /// Accept `link` only if it belongs to the latest news answer
    pub fn article_with_link(&self, link: &str) -> FetchResult<ArticleLink> {
        self.last_news
            .iter()
            .find(|item| item.link == link)
            .map(|item| ArticleLink(item.link.clone()))
            .ok_or_else(|| FetchError::not_found("Link is not part of the latest news results."))
    }
}
