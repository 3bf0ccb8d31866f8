//! Response Formatter
//!
//! Pure rendering of fetch outcomes into display text. No I/O.

use crate::error::{FailureKind, FetchError, FetchResult};
use crate::models::{
    CurrencyRate, Intent, NewsItem, Parameter, Payload, Route, StockReport, WeatherReport,
};

/// Marker prefixed to every failure so it stands apart from a successful answer
pub const FAILURE_MARKER: &str = "❌";

pub const NOT_UNDERSTOOD: &str =
    "❌ I didn't understand that. Try asking about news, weather, Wikipedia, or currency.";

pub const GREETING: &str =
    "Ask me about news, stocks, weather, Wikipedia, currency exchange, or sports scores.";

const NO_NEWS: &str = "No news available right now.";

/// Heading shown above the response body, if the intent has one
pub fn heading(route: &Route) -> Option<String> {
    match (&route.intent, &route.parameter) {
        (Intent::News, _) => Some("📰 Latest News".to_string()),
        (Intent::Stock, Parameter::Symbol { symbol }) => {
            Some(format!("📈 {} Stock Price", symbol.to_uppercase()))
        }
        (Intent::Weather, Parameter::City { city }) => {
            Some(format!("🌤️ Weather Report for {}", capitalize(city)))
        }
        (Intent::Currency, Parameter::CurrencyPair { from, to }) => {
            Some(format!("💱 {} → {}", from, to))
        }
        _ => None,
    }
}

/// Render a fetcher outcome for the given intent
pub fn render(intent: Intent, result: &FetchResult<Payload>) -> String {
    match result {
        Ok(Payload::News(items)) => render_news(items),
        Ok(Payload::Stock(report)) => render_stock(report),
        Ok(Payload::Weather(report)) => render_weather(report),
        Ok(Payload::Currency(rate)) => render_rate(rate),
        Err(e) => render_failure(intent, e),
    }
}

/// Hint for an intent the router recognised but could not parameterise
pub fn render_declined(intent: Intent) -> String {
    match intent {
        Intent::Weather => {
            format!("{} Please tell me which city, e.g. \"weather in Mumbai\".", FAILURE_MARKER)
        }
        Intent::Currency => format!(
            "{} Please name two currencies, e.g. \"convert USD to INR\".",
            FAILURE_MARKER
        ),
        _ => NOT_UNDERSTOOD.to_string(),
    }
}

pub fn render_news(items: &[NewsItem]) -> String {
    if items.is_empty() {
        return NO_NEWS.to_string();
    }

    items
        .iter()
        .map(|item| format!("- {}", item.title))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_stock(report: &StockReport) -> String {
    let arrow = report.direction.arrow();
    format!(
        "📈 {} Stock Price: ₹{}\n📉 1-Day Change: {} ₹{:.2} ({} {:.2}%)",
        report.symbol,
        report.last_price,
        arrow,
        report.change.abs(),
        arrow,
        report.percent_change.abs()
    )
}

pub fn render_weather(report: &WeatherReport) -> String {
    format!(
        "{} {}\n🌡️ **Temperature:** {}\n💧 **Humidity:** {}\n💨 **Wind:** {}",
        report.symbol, report.condition, report.temperature, report.humidity, report.wind
    )
}

pub fn render_rate(rate: &CurrencyRate) -> String {
    format!("💱 1 {} = {} {}", rate.from, rate.rate, rate.to)
}

pub fn render_failure(intent: Intent, error: &FetchError) -> String {
    let message = match error.kind {
        FailureKind::Network => format!("Network error: {}", error.message),
        FailureKind::Unknown => format!("Unexpected error: {}", error.message),
        FailureKind::NotFound | FailureKind::Parse if error.message.is_empty() => {
            format!("No {} data available.", intent)
        }
        FailureKind::NotFound | FailureKind::Parse => error.message.clone(),
    };

    format!("{} {}", FAILURE_MARKER, message)
}

fn capitalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let mut chars = lowered.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
