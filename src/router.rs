//! Intent Router
//!
//! Maps free-text queries to an intent plus its parameter using an ordered
//! table of keyword rules. The first matching rule wins:
//! News > Stock > Weather > Currency > Unknown.
//!
//! Matching is case-insensitive for every intent. Parameters are sliced from
//! the original text so a city or symbol keeps the casing the user typed.

use crate::models::{Intent, Parameter, Route};
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

const STOCK_MARKER: &str = "stock of";
const WEATHER_MARKER: &str = "weather";

/// Words dropped from the text following "weather"
const FILLER_WORDS: &[&str] = &["in", "of", "for"];

const CURRENCY_KEYWORDS: &[&str] = &["currency", "exchange rate", "convert"];

/// One entry of the dispatch table
struct Rule {
    intent: Intent,
    /// Receives the ASCII-lowercased query
    matches: fn(&str) -> bool,
    /// Receives the trimmed original query
    extract: fn(&str) -> Parameter,
}

const RULES: &[Rule] = &[
    Rule {
        intent: Intent::News,
        matches: is_news,
        extract: no_parameter,
    },
    Rule {
        intent: Intent::Stock,
        matches: is_stock,
        extract: extract_symbol,
    },
    Rule {
        intent: Intent::Weather,
        matches: is_weather,
        extract: extract_city,
    },
    Rule {
        intent: Intent::Currency,
        matches: is_currency,
        extract: extract_currency_pair,
    },
];

/// Keyword router
pub struct IntentRouter;

impl IntentRouter {
    /// Select an intent for the query. Never fails: anything unrecognised is `Unknown`.
    pub fn route(query: &str) -> Route {
        let query = query.trim();
        // ASCII lowercasing keeps byte offsets aligned with the original text
        let lowered = query.to_ascii_lowercase();

        RULES
            .iter()
            .find(|rule| (rule.matches)(&lowered))
            .map(|rule| {
                let parameter = (rule.extract)(query);
                debug!(intent = %rule.intent, ?parameter, "Extracted parameter");
                Route::new(rule.intent, parameter)
            })
            .unwrap_or_else(Route::unknown)
    }
}

fn is_news(text: &str) -> bool {
    text.contains("news")
}

fn is_stock(text: &str) -> bool {
    text.contains("stock")
}

fn is_weather(text: &str) -> bool {
    text.contains(WEATHER_MARKER)
}

fn is_currency(text: &str) -> bool {
    CURRENCY_KEYWORDS.iter().any(|kw| text.contains(kw))
}

fn no_parameter(_query: &str) -> Parameter {
    Parameter::Empty
}

/// Text after the last "stock of", or the whole query when the marker is absent
fn extract_symbol(query: &str) -> Parameter {
    let lowered = query.to_ascii_lowercase();
    let symbol = match lowered.rfind(STOCK_MARKER) {
        Some(idx) => &query[idx + STOCK_MARKER.len()..],
        None => query,
    };

    Parameter::Symbol {
        symbol: symbol.trim().to_string(),
    }
}

/// Text after the last "weather" with filler words removed
fn extract_city(query: &str) -> Parameter {
    let lowered = query.to_ascii_lowercase();
    let Some(idx) = lowered.rfind(WEATHER_MARKER) else {
        return Parameter::Missing;
    };

    let city = strip_filler_words(&query[idx + WEATHER_MARKER.len()..]);

    if city.is_empty() {
        Parameter::Missing
    } else {
        Parameter::City { city }
    }
}

/// Remove whole-word "in"/"of"/"for" and collapse whitespace
pub fn strip_filler_words(text: &str) -> String {
    text.split_whitespace()
        .filter(|word| !FILLER_WORDS.contains(&word.to_ascii_lowercase().as_str()))
        .collect::<Vec<_>>()
        .join(" ")
}

fn currency_pair_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)\b([a-z]{3})\s+(?:to|in|into)\s+([a-z]{3})\b")
            .expect("currency pair pattern is valid")
    })
}

/// Two ISO-style codes joined by "to"/"in"/"into", e.g. "usd to inr"
fn extract_currency_pair(query: &str) -> Parameter {
    match currency_pair_pattern().captures(query) {
        Some(caps) => Parameter::CurrencyPair {
            from: caps[1].to_ascii_uppercase(),
            to: caps[2].to_ascii_uppercase(),
        },
        None => Parameter::Missing,
    }
}
