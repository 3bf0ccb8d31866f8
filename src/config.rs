//! Runtime settings
//!
//! Loaded from the process environment (and a `.env` file when present).
//! Every value has a default so the bot runs with no configuration at all.

use crate::error::DispatchError;
use crate::models::NewsCount;
use crate::Result;
use chrono_tz::Tz;
use std::env;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_NEWS_FEED_URL: &str = "http://feeds.bbci.co.uk/news/rss.xml";
pub const DEFAULT_STOCK_HOME_URL: &str = "https://www.nseindia.com";
pub const DEFAULT_STOCK_QUOTE_URL: &str = "https://www.nseindia.com/api/quote-equity";
pub const DEFAULT_WEATHER_URL: &str = "https://wttr.in";
pub const DEFAULT_CURRENCY_URL: &str = "https://www.x-rates.com/calculator/";
pub const DEFAULT_TIMEZONE: &str = "Asia/Kolkata";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";

#[derive(Debug, Clone)]
pub struct Settings {
    pub news_feed_url: String,
    pub stock_home_url: String,
    pub stock_quote_url: String,
    pub weather_url: String,
    pub currency_url: String,
    /// IANA name used for the day/night indicator
    pub timezone: String,
    pub user_agent: String,
    pub request_timeout: Duration,
    pub quote_timeout: Duration,
    pub news_count: NewsCount,
    pub api_port: u16,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            news_feed_url: DEFAULT_NEWS_FEED_URL.to_string(),
            stock_home_url: DEFAULT_STOCK_HOME_URL.to_string(),
            stock_quote_url: DEFAULT_STOCK_QUOTE_URL.to_string(),
            weather_url: DEFAULT_WEATHER_URL.to_string(),
            currency_url: DEFAULT_CURRENCY_URL.to_string(),
            timezone: DEFAULT_TIMEZONE.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout: Duration::from_secs(15),
            quote_timeout: Duration::from_secs(5),
            news_count: NewsCount::default(),
            api_port: 8080,
        }
    }
}

impl Settings {
    /// Build settings from `CHATBOT_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup (the environment in production)
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let text = |key: &str, default: String| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(default)
        };

        let request_timeout = match lookup("CHATBOT_REQUEST_TIMEOUT_SECS") {
            Some(v) => Duration::from_secs(parse_number("CHATBOT_REQUEST_TIMEOUT_SECS", &v)?),
            None => defaults.request_timeout,
        };
        let quote_timeout = match lookup("CHATBOT_QUOTE_TIMEOUT_SECS") {
            Some(v) => Duration::from_secs(parse_number("CHATBOT_QUOTE_TIMEOUT_SECS", &v)?),
            None => defaults.quote_timeout,
        };
        let news_count = match lookup("CHATBOT_NEWS_COUNT") {
            Some(v) => NewsCount::new(parse_number("CHATBOT_NEWS_COUNT", &v)?)?,
            None => defaults.news_count,
        };
        let api_port = match lookup("PORT").or_else(|| lookup("API_PORT")) {
            Some(v) => parse_number("PORT", &v)?,
            None => defaults.api_port,
        };

        Ok(Self {
            news_feed_url: text("CHATBOT_NEWS_FEED_URL", defaults.news_feed_url),
            stock_home_url: text("CHATBOT_STOCK_HOME_URL", defaults.stock_home_url),
            stock_quote_url: text("CHATBOT_STOCK_QUOTE_URL", defaults.stock_quote_url),
            weather_url: text("CHATBOT_WEATHER_URL", defaults.weather_url),
            currency_url: text("CHATBOT_CURRENCY_URL", defaults.currency_url),
            timezone: text("CHATBOT_TIMEZONE", defaults.timezone),
            user_agent: text("CHATBOT_USER_AGENT", defaults.user_agent),
            request_timeout,
            quote_timeout,
            news_count,
            api_port,
        })
    }

    /// Resolve the configured timezone; `None` when the name is not a known zone
    pub fn resolved_timezone(&self) -> Option<Tz> {
        self.timezone.parse::<Tz>().ok()
    }
}

fn parse_number<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value.trim().parse::<T>().map_err(|_| {
        DispatchError::Config(format!("{} must be a number, got '{}'", key, value))
    })
}
