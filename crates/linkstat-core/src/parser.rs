//! Delimited-text parsing for the clickstream and link registry exports.
//!
//! Rows become field-name keyed maps of raw strings. Typed conversion into
//! [`ClickEvent`] / [`LinkRecord`] happens afterwards and drops rows that lack
//! the dataset's join key.

use std::collections::HashMap;

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::{parse_timestamp, ClickEvent, LinkRecord};

pub const FIELD_SHORT_LINK: &str = "Short link";
pub const FIELD_DATE: &str = "Date";
pub const FIELD_TIME: &str = "Time";
pub const FIELD_COUNTRY: &str = "Country";
pub const FIELD_CITY: &str = "City";
pub const FIELD_BROWSER: &str = "Browser";
pub const FIELD_UTM_MEDIUM: &str = "UTM medium";
pub const FIELD_REFERRER: &str = "Referrer";
pub const FIELD_IP: &str = "IP";
pub const FIELD_IS_HUMAN: &str = "Is human";

pub const FIELD_SHORT_URL: &str = "short_url";
pub const FIELD_NAME: &str = "name";
pub const FIELD_ORIGINAL_URL: &str = "original_url";

/// One data row keyed by header name.
pub type Row = HashMap<String, String>;

/// Parse delimited text whose first line is the header.
///
/// Rows with a different column count than the header are dropped.
pub fn parse(raw: &str) -> Vec<Row> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(raw.as_bytes());

    let headers: Vec<String> = match reader.headers() {
        Ok(headers) => headers
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
            .collect(),
        Err(e) => {
            warn!("Could not read header row: {}", e);
            return Vec::new();
        }
    };

    let mut rows = Vec::new();
    let mut dropped = 0usize;

    for result in reader.records() {
        match result {
            Ok(record) => rows.push(
                headers
                    .iter()
                    .cloned()
                    .zip(record.iter().map(str::to_string))
                    .collect(),
            ),
            Err(_) => dropped += 1,
        }
    }

    if dropped > 0 {
        warn!("Dropped {} malformed rows", dropped);
    }

    rows
}

/// Parse and keep only rows whose `required` field is non-empty.
pub fn parse_with_required(raw: &str, required: &str) -> Vec<Row> {
    parse(raw)
        .into_iter()
        .filter(|row| row.get(required).is_some_and(|v| !v.is_empty()))
        .collect()
}

pub fn parse_clicks(raw: &str) -> Vec<ClickEvent> {
    let rows = parse_with_required(raw, FIELD_SHORT_LINK);

    let clicks: Vec<ClickEvent> = rows.par_iter().filter_map(click_from_row).collect();

    debug!("Parsed {} clicks", clicks.len());
    clicks
}

pub fn parse_links(raw: &str) -> Vec<LinkRecord> {
    let links: Vec<LinkRecord> = parse_with_required(raw, FIELD_SHORT_URL)
        .iter()
        .filter_map(link_from_row)
        .collect();

    debug!("Parsed {} links", links.len());
    links
}

pub fn click_from_row(row: &Row) -> Option<ClickEvent> {
    let short_link = non_empty(row, FIELD_SHORT_LINK)?;
    let date = field(row, FIELD_DATE);
    let time = field(row, FIELD_TIME);
    let timestamp = parse_timestamp(&date, &time);

    Some(ClickEvent {
        short_link,
        date,
        time,
        timestamp,
        country: non_empty(row, FIELD_COUNTRY),
        city: non_empty(row, FIELD_CITY),
        browser: non_empty(row, FIELD_BROWSER),
        utm_medium: non_empty(row, FIELD_UTM_MEDIUM),
        referrer: non_empty(row, FIELD_REFERRER),
        ip: non_empty(row, FIELD_IP),
        is_human: non_empty(row, FIELD_IS_HUMAN),
    })
}

pub fn link_from_row(row: &Row) -> Option<LinkRecord> {
    Some(LinkRecord {
        short_url: non_empty(row, FIELD_SHORT_URL)?,
        name: field(row, FIELD_NAME),
        original_url: field(row, FIELD_ORIGINAL_URL),
    })
}

fn field(row: &Row, name: &str) -> String {
    row.get(name).cloned().unwrap_or_default()
}

fn non_empty(row: &Row, name: &str) -> Option<String> {
    row.get(name).filter(|v| !v.is_empty()).cloned()
}
