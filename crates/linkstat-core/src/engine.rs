//! Join clicks against the link registry and apply the compound filter.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use tracing::debug;

use crate::{
    filter_by_window, ClickEvent, Error, JoinedClick, LinkRecord, TimeWindow, MEDIUM_DIRECT,
    MEDIUM_DIRECT_UNKNOWN,
};

/// Registry lookup keyed by short URL.
pub type LinkIndex = HashMap<String, LinkRecord>;

/// Build the lookup in one pass. Duplicate keys: the last row wins.
pub fn build_index(registry: &[LinkRecord]) -> LinkIndex {
    let mut index = HashMap::with_capacity(registry.len());
    for link in registry {
        index.insert(link.short_url.clone(), link.clone());
    }
    index
}

/// What to do with clicks whose short link is not in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinPolicy {
    /// Drop unmatched clicks before any filtering.
    Strict,
    /// Keep unmatched clicks; registry-derived fields degrade.
    Permissive,
}

/// Fields the free-text search looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchScope {
    NameAndShortUrl,
    NameAndUrls,
}

/// Per-view pipeline configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewConfig {
    pub join_policy: JoinPolicy,
    pub medium_fallback: &'static str,
    pub search_scope: SearchScope,
    pub top_links: usize,
    pub page_size: usize,
}

impl ViewConfig {
    /// Overview of every registered link's traffic.
    pub fn dashboard() -> Self {
        Self {
            join_policy: JoinPolicy::Strict,
            medium_fallback: MEDIUM_DIRECT,
            search_scope: SearchScope::NameAndUrls,
            top_links: 20,
            page_size: 10,
        }
    }

    /// Per-link cards and the drill-down detail.
    pub fn explorer() -> Self {
        Self {
            join_policy: JoinPolicy::Permissive,
            medium_fallback: MEDIUM_DIRECT_UNKNOWN,
            search_scope: SearchScope::NameAndShortUrl,
            top_links: usize::MAX,
            page_size: 10,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum MediumFilter {
    #[default]
    All,
    Exact(String),
}

impl MediumFilter {
    pub fn matches(&self, medium: &str) -> bool {
        match self {
            MediumFilter::All => true,
            MediumFilter::Exact(expected) => expected == medium,
        }
    }
}

impl FromStr for MediumFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(if s == "all" {
            MediumFilter::All
        } else {
            MediumFilter::Exact(s.to_string())
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AffiliateMode {
    #[default]
    All,
    Affiliate,
    NonAffiliate,
}

impl AffiliateMode {
    pub fn matches(&self, is_affiliate: bool) -> bool {
        match self {
            AffiliateMode::All => true,
            AffiliateMode::Affiliate => is_affiliate,
            AffiliateMode::NonAffiliate => !is_affiliate,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AffiliateMode::All => "all",
            AffiliateMode::Affiliate => "affiliate",
            AffiliateMode::NonAffiliate => "non-affiliate",
        }
    }
}

impl FromStr for AffiliateMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(AffiliateMode::All),
            "affiliate" => Ok(AffiliateMode::Affiliate),
            "non-affiliate" => Ok(AffiliateMode::NonAffiliate),
            other => Err(Error::InvalidSelector {
                kind: "affiliate mode",
                value: other.to_string(),
                expected: "all, affiliate or non-affiliate",
            }),
        }
    }
}

impl fmt::Display for AffiliateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filter control values, all defaulting to pass-through.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    pub window: TimeWindow,
    pub medium: MediumFilter,
    pub affiliate: AffiliateMode,
    pub search: Option<String>,
}

impl FilterOptions {
    /// Lowercased search term, `None` when the search box is empty.
    pub fn search_needle(&self) -> Option<String> {
        self.search
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }
}

/// Case-insensitive substring match over the fields in `scope`.
/// `needle` must already be lowercased.
pub fn link_matches_search(link: &LinkRecord, needle: &str, scope: SearchScope) -> bool {
    let contains = |haystack: &str| haystack.to_lowercase().contains(needle);

    contains(&link.name)
        || contains(&link.short_url)
        || (scope == SearchScope::NameAndUrls && contains(&link.original_url))
}

/// Pair every click with its registry entry according to `policy`.
pub fn join<'a>(
    clicks: &'a [ClickEvent],
    index: &'a LinkIndex,
    policy: JoinPolicy,
) -> Vec<JoinedClick<'a>> {
    clicks
        .iter()
        .map(|click| JoinedClick {
            click,
            link: index.get(&click.short_link),
        })
        .filter(|joined| policy == JoinPolicy::Permissive || joined.link.is_some())
        .collect()
}

/// Join and filter. The filters run as a conjunction in a fixed order:
/// time window, medium, affiliate mode, free-text search. Input order is kept.
pub fn apply_filters<'a>(
    clicks: &'a [ClickEvent],
    index: &'a LinkIndex,
    view: &ViewConfig,
    options: &FilterOptions,
    now: NaiveDateTime,
) -> Vec<JoinedClick<'a>> {
    let joined = join(clicks, index, view.join_policy);
    let joined_len = joined.len();
    let needle = options.search_needle();

    let filtered: Vec<JoinedClick<'a>> = filter_by_window(joined, options.window, now)
        .into_iter()
        .filter(|j| options.medium.matches(j.medium(view.medium_fallback)))
        .filter(|j| options.affiliate.matches(j.is_affiliate()))
        .filter(|j| {
            needle
                .as_deref()
                .is_none_or(|n| j.matches_search(n, view.search_scope))
        })
        .collect();

    debug!(
        "Filtered {} clicks -> {} joined -> {} kept",
        clicks.len(),
        joined_len,
        filtered.len()
    );
    filtered
}

/// Every click recorded for one short link, in input order.
pub fn clicks_for_link<'a>(clicks: &'a [ClickEvent], short_url: &str) -> Vec<&'a ClickEvent> {
    clicks.iter().filter(|c| c.short_link == short_url).collect()
}
