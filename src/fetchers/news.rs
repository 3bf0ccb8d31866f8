//! News feed and article insights

use crate::error::{FetchError, FetchResult};
use crate::models::{NewsCount, NewsItem};
use reqwest::Client;
use rss::Channel;
use scraper::{Html, Selector};

pub const NO_INSIGHTS: &str = "No insights available.";

/// Number of paragraphs joined into an insight
const INSIGHT_PARAGRAPHS: usize = 3;

pub async fn fetch_news(
    client: &Client,
    feed_url: &str,
    count: NewsCount,
) -> FetchResult<Vec<NewsItem>> {
    let response = client.get(feed_url).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::not_found(format!(
            "News feed returned {}",
            status
        )));
    }

    let body = response.bytes().await?;
    parse_feed(&body, count)
}

/// Parse an RSS document into at most `count` items
pub fn parse_feed(bytes: &[u8], count: NewsCount) -> FetchResult<Vec<NewsItem>> {
    let channel = Channel::read_from(bytes)
        .map_err(|e| FetchError::parse(format!("Malformed news feed: {}", e)))?;

    Ok(channel
        .items()
        .iter()
        .take(count.as_usize())
        .map(|item| NewsItem {
            title: item.title().unwrap_or_default().trim().to_string(),
            link: item.link().unwrap_or_default().trim().to_string(),
        })
        .collect())
}

pub async fn fetch_insights(client: &Client, link: &str) -> FetchResult<String> {
    let response = client.get(link).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::not_found(format!(
            "Article returned {}",
            status
        )));
    }

    let body = response.text().await?;
    Ok(extract_insights(&body))
}

/// Text of the first three `<p>` blocks joined by single spaces
pub fn extract_insights(html: &str) -> String {
    let document = Html::parse_document(html);
    let selector = Selector::parse("p").expect("paragraph selector is valid");

    let text = document
        .select(&selector)
        .take(INSIGHT_PARAGRAPHS)
        .map(|p| p.text().collect::<String>().trim().to_string())
        .collect::<Vec<_>>()
        .join(" ");

    let text = text.trim();
    if text.is_empty() {
        NO_INSIGHTS.to_string()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Top Stories</title>
    <link>https://example.com/news</link>
    <description>Headlines</description>
    <item><title>First headline</title><link>https://example.com/1</link></item>
    <item><title>Second headline</title><link>https://example.com/2</link></item>
    <item><title><![CDATA[Third & final]]></title><link>https://example.com/3</link></item>
  </channel>
</rss>"#;

    #[test]
    fn test_parse_feed_truncates_to_count() {
        let items = parse_feed(FEED.as_bytes(), NewsCount::new(2).unwrap()).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "First headline");
        assert_eq!(items[1].link, "https://example.com/2");
    }

    #[test]
    fn test_parse_feed_never_exceeds_feed_length() {
        let items = parse_feed(FEED.as_bytes(), NewsCount::new(50).unwrap()).unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[2].title, "Third & final");
    }

    #[test]
    fn test_parse_feed_rejects_malformed_document() {
        let err = parse_feed(b"<html>not a feed</html>", NewsCount::default()).unwrap_err();
        assert_eq!(err.kind, crate::error::FailureKind::Parse);
    }

    #[test]
    fn test_extract_insights_joins_first_three_paragraphs() {
        let html = "<html><body>\
            <p>One.</p><div><p> Two. </p></div><p>Three <b>bold</b>.</p><p>Four.</p>\
            </body></html>";
        assert_eq!(extract_insights(html), "One. Two. Three bold.");
    }

    #[test]
    fn test_extract_insights_sentinel_without_paragraphs() {
        assert_eq!(extract_insights("<html><body><div>x</div></body></html>"), NO_INSIGHTS);
        assert_eq!(extract_insights("<p>   </p>"), NO_INSIGHTS);
    }
}
