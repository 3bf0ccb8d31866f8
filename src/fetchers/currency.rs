//! Exchange rates scraped from a calculator page

use crate::error::{FetchError, FetchResult};
use crate::models::CurrencyRate;
use reqwest::Client;
use scraper::{Html, Selector};

pub const RATE_NOT_FOUND: &str = "Exchange rate not found.";

pub async fn fetch_rate(
    client: &Client,
    calculator_url: &str,
    from: &str,
    to: &str,
) -> FetchResult<CurrencyRate> {
    let response = client
        .get(calculator_url)
        .query(&[("from", from), ("to", to), ("amount", "1")])
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::not_found(format!(
            "Calculator returned {} for {} → {}",
            status, from, to
        )));
    }

    let body = response.text().await?;
    let rate = parse_rate(&body).ok_or_else(|| FetchError::parse(RATE_NOT_FOUND))?;

    Ok(CurrencyRate {
        from: from.to_string(),
        to: to.to_string(),
        rate,
    })
}

/// Text node immediately before `span.ccOutputTrail`
pub fn parse_rate(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("span.ccOutputTrail").expect("rate selector is valid");

    let trail = document.select(&selector).next()?;
    let rate = trail.prev_sibling()?.value().as_text()?.trim().to_string();

    if rate.is_empty() {
        None
    } else {
        Some(rate)
    }
}
