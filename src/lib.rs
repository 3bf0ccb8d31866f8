//! Query Dispatcher
//!
//! A small assistant that answers free-text queries from public data sources:
//! - News headlines from an RSS feed, with on-demand article insights
//! - Equity quotes with one-day change
//! - Weather reports with a day/night indicator
//! - Currency exchange rates
//!
//! PIPELINE:
//! QUERY → ROUTE → FETCH → RENDER → HISTORY

pub mod api;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod fetchers;
pub mod formatter;
pub mod history;
pub mod models;
pub mod router;
pub mod session;

pub use error::Result;

// Re-export common types
pub use models::*;
pub use dispatcher::{DispatchResponse, Dispatcher};
pub use fetchers::{DataSource, HttpSource};
pub use router::IntentRouter;
pub use session::SessionState;
