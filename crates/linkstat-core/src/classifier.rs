//! Record classification: affiliate vs regular, human vs bot, and the
//! fallback labels used when a categorical field is missing.

use crate::{ClickEvent, LinkRecord};

/// Query-string fragments that mark a destination URL as an affiliate link.
pub const AFFILIATE_MARKERS: [&str; 8] = [
    "tag=",
    "irclickid=",
    "irgwc=",
    "partner=",
    "affpt=",
    "utm_channel=affiliates",
    "utm_source=",
    "iradid=",
];

/// Fallback for country, city and browser.
pub const UNKNOWN: &str = "Unknown";

/// Medium fallback used by the dashboard view.
pub const MEDIUM_DIRECT: &str = "Direct";

/// Medium fallback used by the link explorer and detail views.
///
/// Deliberately distinct from [`MEDIUM_DIRECT`]; both labels ship in the
/// exported reports today.
pub const MEDIUM_DIRECT_UNKNOWN: &str = "Direct/Unknown";

pub const NO_REFERRER: &str = "-";

/// Top source of a link that has no clicks.
pub const NOT_AVAILABLE: &str = "N/A";

pub const UNNAMED_LINK: &str = "Unnamed Link";

pub fn is_affiliate(url: Option<&str>) -> bool {
    match url {
        Some(url) if !url.is_empty() => AFFILIATE_MARKERS.iter().any(|m| url.contains(m)),
        _ => false,
    }
}

/// Only the literal `"true"` counts as human.
pub fn is_human(click: &ClickEvent) -> bool {
    click.is_human.as_deref() == Some("true")
}

pub fn categorize<'a>(value: Option<&'a str>, fallback: &'a str) -> &'a str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => fallback,
    }
}

/// Name shown for a link in ranked tables.
///
/// Uses the registry name when there is one, otherwise the last path segment
/// of the short URL (e.g. `https://go.example/spring` -> `spring`).
pub fn display_name(short_url: &str, link: Option<&LinkRecord>) -> String {
    if let Some(link) = link {
        if !link.name.is_empty() {
            return link.name.clone();
        }
    }

    match short_url.rsplit('/').next() {
        Some(segment) if !segment.is_empty() => segment.to_string(),
        _ => short_url.to_string(),
    }
}
