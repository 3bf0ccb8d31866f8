//! Core data models for the query dispatcher

use crate::error::DispatchError;
use serde::{Deserialize, Serialize};
use std::fmt;

//
// ================= Intent =================
//

/// Category of request derived from a query's keywords
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    News,
    Stock,
    Weather,
    Currency,
    Unknown,
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Intent::News => "news",
            Intent::Stock => "stock",
            Intent::Weather => "weather",
            Intent::Currency => "currency",
            Intent::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Intent-specific value extracted from the query text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Parameter {
    /// The intent takes no parameter
    Empty,
    /// The intent needs a parameter but none could be extracted
    Missing,
    Symbol { symbol: String },
    City { city: String },
    CurrencyPair { from: String, to: String },
}

/// Router decision for one query
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    pub intent: Intent,
    pub parameter: Parameter,
}

impl Route {
    pub fn new(intent: Intent, parameter: Parameter) -> Self {
        Self { intent, parameter }
    }

    pub fn unknown() -> Self {
        Self::new(Intent::Unknown, Parameter::Empty)
    }

    /// The router recognised the intent but could not build a parameter for it
    pub fn is_declined(&self) -> bool {
        self.parameter == Parameter::Missing
    }
}

//
// ================= News =================
//

pub const MIN_NEWS_COUNT: u32 = 1;
pub const MAX_NEWS_COUNT: u32 = 50;

/// Number of news items requested, always within 1..=50
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NewsCount(u32);

impl NewsCount {
    pub fn new(count: u32) -> crate::Result<Self> {
        if (MIN_NEWS_COUNT..=MAX_NEWS_COUNT).contains(&count) {
            Ok(Self(count))
        } else {
            Err(DispatchError::InvalidInput(format!(
                "news count must be between {} and {}, got {}",
                MIN_NEWS_COUNT, MAX_NEWS_COUNT, count
            )))
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl Default for NewsCount {
    fn default() -> Self {
        Self(5)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub link: String,
}

//
// ================= Stock =================
//

/// Direction of the one-day price move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Flat,
}

impl Direction {
    pub fn of(change: f64) -> Self {
        if change > 0.0 {
            Direction::Up
        } else if change < 0.0 {
            Direction::Down
        } else {
            Direction::Flat
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            Direction::Up => "↑",
            Direction::Down => "↓",
            Direction::Flat => "→",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockReport {
    /// Upper-cased symbol
    pub symbol: String,
    pub last_price: f64,
    pub previous_close: f64,
    pub change: f64,
    pub percent_change: f64,
    pub direction: Direction,
}

//
// ================= Weather =================
//

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeatherReport {
    pub city: String,
    /// Day/night indicator
    pub symbol: String,
    pub condition: String,
    pub temperature: String,
    pub humidity: String,
    pub wind: String,
}

//
// ================= Currency =================
//

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrencyRate {
    pub from: String,
    pub to: String,
    pub rate: String,
}

/// Successful payload of any fetcher
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum Payload {
    News(Vec<NewsItem>),
    Stock(StockReport),
    Weather(WeatherReport),
    Currency(CurrencyRate),
}
