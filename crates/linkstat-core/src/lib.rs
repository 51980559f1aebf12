#![deny(clippy::all)]

mod aggregator;
mod classifier;
mod engine;
mod error;
mod parser;
mod ranking;
pub mod report;
pub mod session;
pub mod source;
mod timestamp;

pub use aggregator::*;
pub use classifier::*;
pub use engine::*;
pub use error::{Error, Result};
pub use parser::*;
pub use ranking::*;
pub use session::Session;
pub use source::DataSource;
pub use timestamp::*;

use chrono::NaiveDateTime;
use serde::Serialize;

pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// One observed click from the clickstream export.
///
/// Built once from a parsed row and never mutated afterwards. Empty cells are
/// stored as `None`; the view layer decides which fallback label to show.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickEvent {
    pub short_link: String,
    pub date: String,
    pub time: String,
    /// Derived from `date` + `time`. `None` when either is malformed.
    pub timestamp: Option<NaiveDateTime>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub browser: Option<String>,
    pub utm_medium: Option<String>,
    pub referrer: Option<String>,
    pub ip: Option<String>,
    pub is_human: Option<String>,
}

/// One entry of the short link registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkRecord {
    pub short_url: String,
    pub name: String,
    pub original_url: String,
}

/// A click paired with its registry entry. `link` is `None` for a join-miss.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JoinedClick<'a> {
    pub click: &'a ClickEvent,
    pub link: Option<&'a LinkRecord>,
}

impl<'a> JoinedClick<'a> {
    /// Medium label with the view's fallback applied.
    pub fn medium(&self, fallback: &'static str) -> &'a str {
        categorize(self.click.utm_medium.as_deref(), fallback)
    }

    pub fn country(&self) -> &'a str {
        categorize(self.click.country.as_deref(), UNKNOWN)
    }

    pub fn browser(&self) -> &'a str {
        categorize(self.click.browser.as_deref(), UNKNOWN)
    }

    /// Affiliate check against the destination URL, degrading to the short
    /// link itself when the click has no registry match.
    pub fn is_affiliate(&self) -> bool {
        match self.link {
            Some(link) => is_affiliate(Some(link.original_url.as_str())),
            None => is_affiliate(Some(self.click.short_link.as_str())),
        }
    }

    /// `needle` must already be lowercased.
    pub fn matches_search(&self, needle: &str, scope: SearchScope) -> bool {
        match self.link {
            Some(link) => link_matches_search(link, needle, scope),
            None => self.click.short_link.to_lowercase().contains(needle),
        }
    }
}
