//! Loaded datasets plus the registry index derived from them.

use chrono::NaiveDateTime;
use tracing::{debug, info};

use crate::report::{
    dashboard_report, explorer_report, link_detail, DashboardReport, LinkCard, LinkDetail,
};
use crate::{
    build_index, parse_clicks, parse_links, ClickEvent, DataSource, FilterOptions, LinkIndex,
    LinkRecord, Result, SortOrder, TimeWindow, ViewConfig,
};

/// Both tables and the index over the registry.
///
/// Loads replace a table wholesale. The index is rebuilt from scratch whenever
/// the registry changes and is never patched in place.
#[derive(Debug, Clone, Default)]
pub struct Session {
    clicks: Vec<ClickEvent>,
    links: Vec<LinkRecord>,
    index: LinkIndex,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch both tables and build a session from them.
    pub async fn load(clicks: &DataSource, links: &DataSource) -> Result<Self> {
        let mut session = Self::new();
        session.reload_links(links).await?;
        session.reload_clicks(clicks).await?;
        Ok(session)
    }

    /// Replace the clickstream. Returns the number of clicks kept.
    pub fn load_clicks(&mut self, raw: &str) -> usize {
        self.clicks = parse_clicks(raw);
        debug!("Session holds {} clicks", self.clicks.len());
        self.clicks.len()
    }

    /// Replace the registry and rebuild the index. Returns the number of links.
    pub fn load_links(&mut self, raw: &str) -> usize {
        self.links = parse_links(raw);
        self.index = build_index(&self.links);
        debug!(
            "Session holds {} links ({} distinct)",
            self.links.len(),
            self.index.len()
        );
        self.links.len()
    }

    /// Retrieve and load the clickstream. On failure the current clicks stay.
    pub async fn reload_clicks(&mut self, source: &DataSource) -> Result<usize> {
        let raw = source.read_text().await?;
        let count = self.load_clicks(&raw);
        info!("Loaded {} clicks from {}", count, source.name());
        Ok(count)
    }

    /// Retrieve and load the registry. On failure the current links stay.
    pub async fn reload_links(&mut self, source: &DataSource) -> Result<usize> {
        let raw = source.read_text().await?;
        let count = self.load_links(&raw);
        info!("Loaded {} links from {}", count, source.name());
        Ok(count)
    }

    pub fn clicks(&self) -> &[ClickEvent] {
        &self.clicks
    }

    pub fn links(&self) -> &[LinkRecord] {
        &self.links
    }

    pub fn index(&self) -> &LinkIndex {
        &self.index
    }

    pub fn link(&self, short_url: &str) -> Option<&LinkRecord> {
        self.index.get(short_url)
    }

    pub fn is_empty(&self) -> bool {
        self.clicks.is_empty() && self.links.is_empty()
    }

    pub fn dashboard(&self, options: &FilterOptions, now: NaiveDateTime) -> DashboardReport {
        self.dashboard_with(&ViewConfig::dashboard(), options, now)
    }

    pub fn dashboard_with(
        &self,
        view: &ViewConfig,
        options: &FilterOptions,
        now: NaiveDateTime,
    ) -> DashboardReport {
        dashboard_report(&self.clicks, &self.index, view, options, now)
    }

    pub fn explorer(
        &self,
        options: &FilterOptions,
        order: SortOrder,
        now: NaiveDateTime,
    ) -> Vec<LinkCard> {
        explorer_report(
            &self.clicks,
            &self.links,
            &ViewConfig::explorer(),
            options,
            order,
            now,
        )
    }

    pub fn detail(
        &self,
        short_url: &str,
        window: TimeWindow,
        page: usize,
        now: NaiveDateTime,
    ) -> LinkDetail {
        self.detail_with(&ViewConfig::explorer(), short_url, window, page, now)
    }

    pub fn detail_with(
        &self,
        view: &ViewConfig,
        short_url: &str,
        window: TimeWindow,
        page: usize,
        now: NaiveDateTime,
    ) -> LinkDetail {
        link_detail(
            &self.clicks,
            short_url,
            self.link(short_url),
            view,
            window,
            page,
            now,
        )
    }
}
