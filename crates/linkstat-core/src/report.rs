//! View reports built on the shared pipeline.
//!
//! Each view supplies its own [`ViewConfig`]; nothing here hard-codes a join
//! policy or fallback label.

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::{
    apply_filters, categorize, clicks_for_link, count_unique, display_name, filter_by_window,
    group_and_count, is_affiliate, is_human, link_matches_search, multi_group, paginate,
    parse_day, rank, recency_cmp, to_series, top_n, ClickEvent, FilterOptions, JoinedClick,
    LinkIndex, LinkRecord, Page, Rankable, SeriesPoint, SortOrder, TimeWindow, ViewConfig,
    NOT_AVAILABLE, NO_REFERRER, UNKNOWN, UNNAMED_LINK,
};

/// How many entries the source and country charts show.
pub const TOP_SERIES: usize = 10;

// =============================================================================
// Dashboard
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_clicks: usize,
    pub unique_links: usize,
    pub affiliate_clicks: usize,
    /// Percentage in `0.0..=100.0`; `0.0` when there are no clicks.
    pub affiliate_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkRow {
    pub short_url: String,
    pub name: String,
    pub clicks: usize,
    pub affiliate: bool,
    pub top_source: String,
    pub top_country: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardReport {
    pub summary: Summary,
    pub links: Vec<LinkRow>,
    pub timeline: Vec<SeriesPoint>,
    pub sources: Vec<SeriesPoint>,
    pub browsers: Vec<SeriesPoint>,
    pub countries: Vec<SeriesPoint>,
}

impl DashboardReport {
    pub fn is_empty(&self) -> bool {
        self.summary.total_clicks == 0
    }
}

pub fn dashboard_report(
    clicks: &[ClickEvent],
    index: &LinkIndex,
    view: &ViewConfig,
    options: &FilterOptions,
    now: NaiveDateTime,
) -> DashboardReport {
    let filtered = apply_filters(clicks, index, view, options, now);
    let fallback = view.medium_fallback;

    DashboardReport {
        summary: summarize(&filtered),
        links: link_rows(&filtered, index, view),
        timeline: timeline_series(filtered.iter().map(|j| j.click)),
        sources: to_series(top_n(
            &group_and_count(&filtered, |j| j.medium(fallback)),
            TOP_SERIES,
        )),
        browsers: to_series(top_n(
            &group_and_count(&filtered, |j| j.browser()),
            usize::MAX,
        )),
        countries: to_series(top_n(
            &group_and_count(&filtered, |j| j.country()),
            TOP_SERIES,
        )),
    }
}

pub fn summarize(clicks: &[JoinedClick<'_>]) -> Summary {
    let total_clicks = clicks.len();
    let affiliate_clicks = clicks.iter().filter(|j| j.is_affiliate()).count();

    Summary {
        total_clicks,
        unique_links: count_unique(clicks, |j| j.click.short_link.as_str()),
        affiliate_clicks,
        affiliate_rate: percent(affiliate_clicks, total_clicks),
    }
}

/// Per-link table rows, count descending, truncated to `view.top_links`.
pub fn link_rows(
    clicks: &[JoinedClick<'_>],
    index: &LinkIndex,
    view: &ViewConfig,
) -> Vec<LinkRow> {
    let fallback = view.medium_fallback;
    let mut groups = multi_group(
        clicks,
        |j| j.click.short_link.as_str(),
        |j| [j.medium(fallback), j.country()],
    );
    groups.sort_by(|a, b| b.count.cmp(&a.count));
    groups.truncate(view.top_links);

    groups
        .into_iter()
        .map(|group| {
            let link = index.get(&group.key);
            let affiliate = match link {
                Some(link) => is_affiliate(Some(link.original_url.as_str())),
                None => is_affiliate(Some(group.key.as_str())),
            };
            LinkRow {
                name: display_name(&group.key, link),
                clicks: group.count,
                affiliate,
                top_source: group.top_sub(0).unwrap_or(NOT_AVAILABLE).to_string(),
                top_country: group.top_sub(1).unwrap_or(NOT_AVAILABLE).to_string(),
                short_url: group.key,
            }
        })
        .collect()
}

/// Clicks per `Date` label in chronological order. Labels that do not parse
/// as dates go last, in first-seen order.
pub fn timeline_series<'a, I>(clicks: I) -> Vec<SeriesPoint>
where
    I: IntoIterator<Item = &'a ClickEvent>,
{
    let mut entries: Vec<(Option<NaiveDateTime>, String, usize)> =
        group_and_count(clicks, |c| c.date.as_str())
            .into_entries()
            .into_iter()
            .map(|(date, count)| (parse_day(&date), date, count))
            .collect();

    entries.sort_by(|a, b| match (a.0, b.0) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    entries
        .into_iter()
        .map(|(_, label, value)| SeriesPoint { label, value })
        .collect()
}

// =============================================================================
// Link explorer
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkStats {
    pub total_clicks: usize,
    pub unique_countries: usize,
    pub unique_browsers: usize,
    pub top_source: String,
    pub last_click: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkCard {
    pub short_url: String,
    /// Registry name as-is; may be empty.
    pub name: String,
    pub display_name: String,
    pub original_url: String,
    pub affiliate: bool,
    pub stats: LinkStats,
}

impl Rankable for LinkCard {
    fn clicks(&self) -> usize {
        self.stats.total_clicks
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn last_seen(&self) -> Option<NaiveDateTime> {
        self.stats.last_click
    }
}

pub fn link_stats(clicks: &[&ClickEvent], view: &ViewConfig) -> LinkStats {
    let sources = group_and_count(clicks, |c| {
        categorize(c.utm_medium.as_deref(), view.medium_fallback)
    });

    LinkStats {
        total_clicks: clicks.len(),
        unique_countries: count_unique(clicks, |c| categorize(c.country.as_deref(), UNKNOWN)),
        unique_browsers: count_unique(clicks, |c| categorize(c.browser.as_deref(), UNKNOWN)),
        top_source: sources
            .top()
            .map(|(source, _)| source)
            .unwrap_or(NOT_AVAILABLE)
            .to_string(),
        last_click: clicks.iter().filter_map(|c| c.timestamp).max(),
    }
}

/// One card per registry entry that passes the search and affiliate filters,
/// with stats over its clicks inside the window, ranked by `order`.
pub fn explorer_report(
    clicks: &[ClickEvent],
    registry: &[LinkRecord],
    view: &ViewConfig,
    options: &FilterOptions,
    order: SortOrder,
    now: NaiveDateTime,
) -> Vec<LinkCard> {
    let mut by_link: HashMap<&str, Vec<&ClickEvent>> = HashMap::new();
    for click in filter_by_window(clicks, options.window, now) {
        if options
            .medium
            .matches(categorize(click.utm_medium.as_deref(), view.medium_fallback))
        {
            by_link.entry(click.short_link.as_str()).or_default().push(click);
        }
    }

    let needle = options.search_needle();
    let no_clicks: Vec<&ClickEvent> = Vec::new();

    let cards: Vec<LinkCard> = registry
        .iter()
        .filter(|link| {
            needle
                .as_deref()
                .is_none_or(|n| link_matches_search(link, n, view.search_scope))
        })
        .filter(|link| {
            options
                .affiliate
                .matches(is_affiliate(Some(link.original_url.as_str())))
        })
        .map(|link| {
            let link_clicks = by_link.get(link.short_url.as_str()).unwrap_or(&no_clicks);
            LinkCard {
                short_url: link.short_url.clone(),
                name: link.name.clone(),
                display_name: card_name(link),
                original_url: link.original_url.clone(),
                affiliate: is_affiliate(Some(link.original_url.as_str())),
                stats: link_stats(link_clicks, view),
            }
        })
        .collect();

    rank(cards, order)
}

fn card_name(link: &LinkRecord) -> String {
    if link.name.is_empty() {
        UNNAMED_LINK.to_string()
    } else {
        link.name.clone()
    }
}

// =============================================================================
// Link detail
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailStats {
    pub total_clicks: usize,
    pub unique_ips: usize,
    pub human_clicks: usize,
    pub bot_clicks: usize,
    pub human_rate: f64,
    pub unique_countries: usize,
    pub unique_cities: usize,
    pub affiliate: bool,
}

/// A click formatted for the detail table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickRow {
    pub date: String,
    pub time: String,
    pub country: String,
    pub city: String,
    pub browser: String,
    pub medium: String,
    pub referrer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkDetail {
    pub short_url: String,
    pub name: String,
    /// `None` when the short link is not in the registry.
    pub original_url: Option<String>,
    pub stats: DetailStats,
    pub timeline: Vec<SeriesPoint>,
    pub sources: Vec<SeriesPoint>,
    pub countries: Vec<SeriesPoint>,
    pub browsers: Vec<SeriesPoint>,
    pub clicks: Page<ClickRow>,
}

/// Drill-down for one short link. `link` may be `None` for a link that only
/// appears in the clickstream.
pub fn link_detail(
    clicks: &[ClickEvent],
    short_url: &str,
    link: Option<&LinkRecord>,
    view: &ViewConfig,
    window: TimeWindow,
    page: usize,
    now: NaiveDateTime,
) -> LinkDetail {
    let fallback = view.medium_fallback;
    let mut link_clicks = filter_by_window(clicks_for_link(clicks, short_url), window, now);

    let affiliate = match link {
        Some(link) => is_affiliate(Some(link.original_url.as_str())),
        None => is_affiliate(Some(short_url)),
    };

    let stats = detail_stats(&link_clicks, affiliate);
    let timeline = timeline_series(link_clicks.iter().copied());
    let sources = to_series(top_n(
        &group_and_count(&link_clicks, |c| categorize(c.utm_medium.as_deref(), fallback)),
        TOP_SERIES,
    ));
    let countries = to_series(top_n(
        &group_and_count(&link_clicks, |c| categorize(c.country.as_deref(), UNKNOWN)),
        TOP_SERIES,
    ));
    let browsers = to_series(top_n(
        &group_and_count(&link_clicks, |c| categorize(c.browser.as_deref(), UNKNOWN)),
        usize::MAX,
    ));

    link_clicks.sort_by(|a, b| recency_cmp(a.timestamp, b.timestamp));
    let clicks = paginate(link_clicks, view.page_size, page).map(|c| click_row(c, fallback));

    LinkDetail {
        short_url: short_url.to_string(),
        name: link.map(card_name).unwrap_or_else(|| UNNAMED_LINK.to_string()),
        original_url: link.map(|l| l.original_url.clone()),
        stats,
        timeline,
        sources,
        countries,
        browsers,
        clicks,
    }
}

pub fn detail_stats(clicks: &[&ClickEvent], affiliate: bool) -> DetailStats {
    let total_clicks = clicks.len();
    let human_clicks = clicks.iter().filter(|c| is_human(c)).count();

    DetailStats {
        total_clicks,
        unique_ips: count_unique(clicks, |c| c.ip.as_deref().unwrap_or("")),
        human_clicks,
        bot_clicks: total_clicks - human_clicks,
        human_rate: percent(human_clicks, total_clicks),
        unique_countries: count_unique(clicks, |c| categorize(c.country.as_deref(), UNKNOWN)),
        unique_cities: count_unique(clicks, |c| categorize(c.city.as_deref(), UNKNOWN)),
        affiliate,
    }
}

fn click_row(click: &ClickEvent, medium_fallback: &'static str) -> ClickRow {
    ClickRow {
        date: click.date.clone(),
        time: click.time.clone(),
        country: categorize(click.country.as_deref(), UNKNOWN).to_string(),
        city: categorize(click.city.as_deref(), UNKNOWN).to_string(),
        browser: categorize(click.browser.as_deref(), UNKNOWN).to_string(),
        medium: categorize(click.utm_medium.as_deref(), medium_fallback).to_string(),
        referrer: categorize(click.referrer.as_deref(), NO_REFERRER).to_string(),
    }
}

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{build_index, parse_timestamp, AffiliateMode, MediumFilter};
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 10)
            .and_then(|d| d.and_hms_opt(12, 0, 0))
            .unwrap()
    }

    fn click(short_link: &str, date: &str, time: &str, medium: Option<&str>) -> ClickEvent {
        ClickEvent {
            short_link: short_link.to_string(),
            date: date.to_string(),
            time: time.to_string(),
            timestamp: parse_timestamp(date, time),
            country: Some("US".to_string()),
            city: Some("Austin".to_string()),
            browser: Some("Chrome".to_string()),
            utm_medium: medium.map(str::to_string),
            referrer: None,
            ip: Some("1.1.1.1".to_string()),
            is_human: Some("true".to_string()),
        }
    }

    fn link(short_url: &str, name: &str, original_url: &str) -> LinkRecord {
        LinkRecord {
            short_url: short_url.to_string(),
            name: name.to_string(),
            original_url: original_url.to_string(),
        }
    }

    fn point(label: &str, value: usize) -> SeriesPoint {
        SeriesPoint {
            label: label.to_string(),
            value,
        }
    }

    #[test]
    fn test_dashboard_single_affiliate_link() {
        let clicks = vec![
            click("/x", "1/5/2024", "10:00:00 AM", Some("email")),
            click("/x", "1/5/2024", "11:00:00 AM", Some("social")),
            click("/x", "1/6/2024", "09:00:00 AM", Some("social")),
        ];
        let registry = vec![link("/x", "X", "https://shop.example/item?tag=abc")];
        let index = build_index(&registry);

        let report = dashboard_report(
            &clicks,
            &index,
            &ViewConfig::dashboard(),
            &FilterOptions::default(),
            now(),
        );

        assert_eq!(report.summary.total_clicks, 3);
        assert_eq!(report.summary.unique_links, 1);
        assert_eq!(report.summary.affiliate_clicks, 3);
        assert_eq!(report.summary.affiliate_rate, 100.0);
        assert_eq!(report.sources, vec![point("social", 2), point("email", 1)]);
        assert_eq!(report.timeline, vec![point("1/5/2024", 2), point("1/6/2024", 1)]);
        assert_eq!(report.countries, vec![point("US", 3)]);

        assert_eq!(report.links.len(), 1);
        let row = &report.links[0];
        assert_eq!(row.name, "X");
        assert_eq!(row.clicks, 3);
        assert!(row.affiliate);
        assert_eq!(row.top_source, "social");
        assert_eq!(row.top_country, "US");
    }

    #[test]
    fn test_dashboard_strict_join_drops_unmatched() {
        let clicks = vec![
            click("/x", "1/5/2024", "10:00:00 AM", None),
            click("/ghost?partner=1", "1/5/2024", "10:00:00 AM", Some("cpc")),
        ];
        let index = build_index(&[link("/x", "X", "https://shop.example/")]);

        let strict = dashboard_report(
            &clicks,
            &index,
            &ViewConfig::dashboard(),
            &FilterOptions::default(),
            now(),
        );
        assert_eq!(strict.summary.total_clicks, 1);
        assert_eq!(strict.summary.affiliate_clicks, 0);
        assert_eq!(strict.sources, vec![point("Direct", 1)]);

        let permissive = dashboard_report(
            &clicks,
            &index,
            &ViewConfig::explorer(),
            &FilterOptions::default(),
            now(),
        );
        assert_eq!(permissive.summary.total_clicks, 2);
        assert_eq!(permissive.summary.affiliate_clicks, 1);
        assert_eq!(
            permissive.sources,
            vec![point("Direct/Unknown", 1), point("cpc", 1)]
        );
        let ghost = permissive
            .links
            .iter()
            .find(|row| row.short_url == "/ghost?partner=1")
            .unwrap();
        assert!(ghost.affiliate);
    }

    #[test]
    fn test_dashboard_empty_input() {
        let report = dashboard_report(
            &[],
            &LinkIndex::new(),
            &ViewConfig::dashboard(),
            &FilterOptions::default(),
            now(),
        );
        assert!(report.is_empty());
        assert_eq!(report.summary, Summary::default());
        assert!(report.links.is_empty());
        assert!(report.timeline.is_empty());
        assert!(report.sources.is_empty());
    }

    #[test]
    fn test_dashboard_top_links_truncates() {
        let mut clicks = Vec::new();
        let mut registry = Vec::new();
        for i in 0..25 {
            let key = format!("/l{i}");
            for _ in 0..=i {
                clicks.push(click(&key, "1/5/2024", "10:00:00 AM", None));
            }
            registry.push(link(&key, "", "https://shop.example/"));
        }
        let index = build_index(&registry);

        let report = dashboard_report(
            &clicks,
            &index,
            &ViewConfig::dashboard(),
            &FilterOptions::default(),
            now(),
        );
        assert_eq!(report.links.len(), 20);
        assert_eq!(report.links[0].short_url, "/l24");
        assert_eq!(report.links[0].name, "l24");
        assert!(report.links.windows(2).all(|w| w[0].clicks >= w[1].clicks));
    }

    #[test]
    fn test_dashboard_json_keys() {
        let clicks = vec![click("/x", "1/5/2024", "10:00:00 AM", None)];
        let index = build_index(&[link("/x", "X", "")]);
        let report = dashboard_report(
            &clicks,
            &index,
            &ViewConfig::dashboard(),
            &FilterOptions::default(),
            now(),
        );

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["summary"]["totalClicks"], 1);
        assert_eq!(json["summary"]["affiliateRate"], 0.0);
        assert_eq!(json["links"][0]["topSource"], "Direct");
        assert_eq!(json["timeline"][0]["label"], "1/5/2024");
    }

    #[test]
    fn test_timeline_unparseable_dates_last() {
        let clicks = vec![
            click("/x", "garbage", "10:00:00 AM", None),
            click("/x", "1/12/2024", "10:00:00 AM", None),
            click("/x", "1/2/2024", "10:00:00 AM", None),
        ];
        let series = timeline_series(&clicks);
        let labels: Vec<&str> = series.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["1/2/2024", "1/12/2024", "garbage"]);
    }

    #[test]
    fn test_explorer_cards_filters_and_sort() {
        let clicks = vec![
            click("/a", "1/5/2024", "10:00:00 AM", Some("email")),
            click("/b", "1/5/2024", "10:00:00 AM", None),
            click("/b", "1/8/2024", "10:00:00 AM", None),
            click("/b", "1/1/2023", "10:00:00 AM", None),
        ];
        let registry = vec![
            link("/a", "alpha", "https://shop.example/?tag=1"),
            link("/b", "Beta", "https://blog.example/"),
            link("/c", "", "https://blog.example/other"),
        ];
        let view = ViewConfig::explorer();

        let cards = explorer_report(
            &clicks,
            &registry,
            &view,
            &FilterOptions::default(),
            SortOrder::ClicksDesc,
            now(),
        );
        let order: Vec<&str> = cards.iter().map(|c| c.short_url.as_str()).collect();
        assert_eq!(order, vec!["/b", "/a", "/c"]);
        assert_eq!(cards[0].stats.total_clicks, 3);
        assert_eq!(cards[0].stats.top_source, "Direct/Unknown");
        assert_eq!(cards[2].display_name, "Unnamed Link");
        assert_eq!(cards[2].stats.top_source, "N/A");
        assert_eq!(cards[2].stats.last_click, None);

        let windowed = FilterOptions {
            window: TimeWindow::Days(7),
            ..FilterOptions::default()
        };
        let cards = explorer_report(&clicks, &registry, &view, &windowed, SortOrder::NameAsc, now());
        let names: Vec<&str> = cards.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["", "alpha", "Beta"]);
        assert_eq!(cards[2].stats.total_clicks, 2);

        let affiliates = FilterOptions {
            affiliate: AffiliateMode::Affiliate,
            ..FilterOptions::default()
        };
        let cards = explorer_report(
            &clicks,
            &registry,
            &view,
            &affiliates,
            SortOrder::ClicksDesc,
            now(),
        );
        assert_eq!(cards.len(), 1);
        assert!(cards[0].affiliate);

        let search = FilterOptions {
            search: Some("BET".to_string()),
            ..FilterOptions::default()
        };
        let cards = explorer_report(&clicks, &registry, &view, &search, SortOrder::Recent, now());
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].short_url, "/b");

        let email_only = FilterOptions {
            medium: MediumFilter::Exact("email".to_string()),
            ..FilterOptions::default()
        };
        let cards = explorer_report(
            &clicks,
            &registry,
            &view,
            &email_only,
            SortOrder::ClicksDesc,
            now(),
        );
        assert_eq!(cards[0].short_url, "/a");
        assert_eq!(cards[0].stats.total_clicks, 1);
        assert_eq!(cards.len(), 3);
    }

    #[test]
    fn test_explorer_recent_sort_puts_idle_links_last() {
        let clicks = vec![
            click("/a", "1/5/2024", "10:00:00 AM", None),
            click("/b", "1/9/2024", "10:00:00 AM", None),
        ];
        let registry = vec![
            link("/idle", "Idle", ""),
            link("/a", "A", ""),
            link("/b", "B", ""),
        ];
        let cards = explorer_report(
            &clicks,
            &registry,
            &ViewConfig::explorer(),
            &FilterOptions::default(),
            SortOrder::Recent,
            now(),
        );
        let order: Vec<&str> = cards.iter().map(|c| c.short_url.as_str()).collect();
        assert_eq!(order, vec!["/b", "/a", "/idle"]);
    }

    #[test]
    fn test_detail_stats_human_and_ips() {
        let mut bot = click("/x", "1/5/2024", "10:00:00 AM", None);
        bot.is_human = Some("false".to_string());
        bot.ip = Some("2.2.2.2".to_string());
        let mut anonymous = click("/x", "1/5/2024", "10:00:00 AM", None);
        anonymous.ip = None;
        anonymous.city = None;
        let human = click("/x", "1/5/2024", "10:00:00 AM", None);

        let clicks = [&human, &bot, &anonymous, &human];
        let stats = detail_stats(&clicks, false);

        assert_eq!(stats.total_clicks, 4);
        assert_eq!(stats.human_clicks, 3);
        assert_eq!(stats.bot_clicks, 1);
        assert_eq!(stats.human_rate, 75.0);
        assert_eq!(stats.unique_ips, 3);
        assert_eq!(stats.unique_countries, 1);
        assert_eq!(stats.unique_cities, 2);
    }

    #[test]
    fn test_link_detail_recent_first_pages() {
        let mut clicks = Vec::new();
        for day in 1..=9 {
            let date = format!("1/{day}/2024");
            clicks.push(click("/x", &date, "08:00:00 AM", Some("email")));
            clicks.push(click("/x", &date, "08:00:00 PM", None));
        }
        clicks.push(click("/x", "not a date", "08:00:00 AM", None));
        clicks.push(click("/y", "1/9/2024", "08:00:00 AM", None));
        let registry = link("/x", "X", "https://shop.example/?irgwc=1");
        let view = ViewConfig::explorer();

        let detail = link_detail(&clicks, "/x", Some(&registry), &view, TimeWindow::All, 1, now());
        assert_eq!(detail.name, "X");
        assert!(detail.stats.affiliate);
        assert_eq!(detail.stats.total_clicks, 19);
        assert_eq!(detail.clicks.total_items, 19);
        assert_eq!(detail.clicks.total_pages, 2);
        assert_eq!(detail.clicks.items.len(), 10);
        assert_eq!(detail.clicks.items[0].date, "1/9/2024");
        assert_eq!(detail.clicks.items[0].time, "08:00:00 PM");
        assert_eq!(detail.clicks.items[0].medium, "Direct/Unknown");
        assert_eq!(detail.clicks.items[0].referrer, "-");
        assert_eq!(detail.sources[0], point("Direct/Unknown", 10));

        let last = link_detail(&clicks, "/x", Some(&registry), &view, TimeWindow::All, 2, now());
        assert_eq!(last.clicks.items.len(), 9);
        assert_eq!(
            last.clicks.items.last().map(|r| r.date.as_str()),
            Some("not a date")
        );

        let beyond = link_detail(&clicks, "/x", Some(&registry), &view, TimeWindow::All, 3, now());
        assert!(beyond.clicks.is_empty());
    }

    #[test]
    fn test_link_detail_unregistered_link() {
        let clicks = vec![click("/orphan", "1/5/2024", "10:00:00 AM", None)];
        let detail = link_detail(
            &clicks,
            "/orphan",
            None,
            &ViewConfig::explorer(),
            TimeWindow::Days(30),
            1,
            now(),
        );
        assert_eq!(detail.name, "Unnamed Link");
        assert_eq!(detail.original_url, None);
        assert!(!detail.stats.affiliate);
        assert_eq!(detail.stats.total_clicks, 1);
    }
}
