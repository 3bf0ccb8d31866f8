//! Equity quotes
//!
//! The quote API rejects cookie-less clients, so every lookup opens a fresh
//! session: visit the landing page to collect cookies, then call the API with
//! the same jar and a short timeout.

use crate::config::Settings;
use crate::error::{FetchError, FetchResult};
use crate::models::{Direction, StockReport};
use reqwest::header::{ACCEPT_LANGUAGE, REFERER};
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

pub async fn fetch_stock(settings: &Settings, symbol: &str) -> FetchResult<StockReport> {
    let symbol = symbol.trim().to_uppercase();
    if symbol.is_empty() {
        return Err(FetchError::not_found("No stock symbol given."));
    }

    let session = Client::builder()
        .cookie_store(true)
        .user_agent(settings.user_agent.clone())
        .timeout(settings.request_timeout)
        .build()
        .map_err(|e| FetchError::unknown(format!("Could not open quote session: {}", e)))?;

    // Step 1: landing page hands out the anti-bot cookies
    let landing = session.get(&settings.stock_home_url).send().await?;
    debug!(status = %landing.status(), "Quote session established");

    // Step 2: quote call on the same session
    let response = session
        .get(&settings.stock_quote_url)
        .query(&[("symbol", symbol.as_str())])
        .header(ACCEPT_LANGUAGE, "en-US,en;q=0.9")
        .header(REFERER, settings.stock_home_url.as_str())
        .timeout(settings.quote_timeout)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::not_found(format!(
            "Could not retrieve stock data for '{}'.",
            symbol
        )));
    }

    let body: Value = response.json().await?;
    parse_quote(&symbol, &body)
}

/// Pull `priceInfo.lastPrice` and `priceInfo.previousClose` out of a quote body
pub fn parse_quote(symbol: &str, body: &Value) -> FetchResult<StockReport> {
    let not_found = || FetchError::not_found(format!("Stock price not found for '{}'.", symbol));

    let price_info = body.get("priceInfo").ok_or_else(not_found)?;
    let last_price = price_info
        .get("lastPrice")
        .and_then(Value::as_f64)
        .ok_or_else(not_found)?;
    let previous_close = price_info
        .get("previousClose")
        .and_then(Value::as_f64)
        .ok_or_else(not_found)?;

    build_report(symbol, last_price, previous_close)
}

/// Compute the one-day change. A zero previous close has no defined percentage.
pub fn build_report(
    symbol: &str,
    last_price: f64,
    previous_close: f64,
) -> FetchResult<StockReport> {
    if previous_close == 0.0 {
        return Err(FetchError::unknown(format!(
            "Previous close for '{}' is zero; change cannot be computed.",
            symbol
        )));
    }

    let change = last_price - previous_close;
    let percent_change = change / previous_close * 100.0;

    Ok(StockReport {
        symbol: symbol.to_uppercase(),
        last_price,
        previous_close,
        change,
        percent_change,
        direction: Direction::of(change),
    })
}
