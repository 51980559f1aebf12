//! Ordering and paging of result sets.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::Error;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    ClicksDesc,
    ClicksAsc,
    NameAsc,
    NameDesc,
    Recent,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::ClicksDesc => "clicks-desc",
            SortOrder::ClicksAsc => "clicks-asc",
            SortOrder::NameAsc => "name-asc",
            SortOrder::NameDesc => "name-desc",
            SortOrder::Recent => "recent",
        }
    }
}

impl FromStr for SortOrder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "clicks-desc" => Ok(SortOrder::ClicksDesc),
            "clicks-asc" => Ok(SortOrder::ClicksAsc),
            "name-asc" => Ok(SortOrder::NameAsc),
            "name-desc" => Ok(SortOrder::NameDesc),
            "recent" => Ok(SortOrder::Recent),
            other => Err(Error::InvalidSelector {
                kind: "sort order",
                value: other.to_string(),
                expected: "clicks-desc, clicks-asc, name-asc, name-desc or recent",
            }),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Something that can appear in a ranked listing.
pub trait Rankable {
    fn clicks(&self) -> usize;
    fn name(&self) -> &str;
    fn last_seen(&self) -> Option<NaiveDateTime>;
}

/// Stable sort by `order`.
pub fn rank<T: Rankable>(mut items: Vec<T>, order: SortOrder) -> Vec<T> {
    match order {
        SortOrder::ClicksDesc => items.sort_by(|a, b| b.clicks().cmp(&a.clicks())),
        SortOrder::ClicksAsc => items.sort_by(|a, b| a.clicks().cmp(&b.clicks())),
        SortOrder::NameAsc => items.sort_by(|a, b| compare_names(a.name(), b.name())),
        SortOrder::NameDesc => items.sort_by(|a, b| compare_names(b.name(), a.name())),
        SortOrder::Recent => items.sort_by(|a, b| recency_cmp(a.last_seen(), b.last_seen())),
    }
    items
}

/// Case-insensitive collation with a byte-order tiebreak.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Most recent first; missing timestamps sink to the end.
pub fn recency_cmp(a: Option<NaiveDateTime>, b: Option<NaiveDateTime>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// One page of a larger result set.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
            total_pages: self.total_pages,
            total_items: self.total_items,
        }
    }
}

/// Slice out 1-indexed page `page`. Out-of-range pages (including 0) are
/// empty rather than an error; callers clamp if they want to.
pub fn paginate<T>(items: Vec<T>, page_size: usize, page: usize) -> Page<T> {
    let total_items = items.len();
    let total_pages = if page_size == 0 {
        0
    } else {
        total_items.div_ceil(page_size)
    };

    let start = page
        .checked_sub(1)
        .and_then(|p| p.checked_mul(page_size))
        .filter(|_| page_size > 0);

    let page_items = match start {
        Some(start) if start < total_items => {
            items.into_iter().skip(start).take(page_size).collect()
        }
        _ => Vec::new(),
    };

    Page {
        items: page_items,
        page,
        page_size,
        total_pages,
        total_items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[derive(Debug, Clone, PartialEq)]
    struct Entry {
        name: &'static str,
        clicks: usize,
        last: Option<NaiveDateTime>,
    }

    impl Rankable for Entry {
        fn clicks(&self) -> usize {
            self.clicks
        }
        fn name(&self) -> &str {
            self.name
        }
        fn last_seen(&self) -> Option<NaiveDateTime> {
            self.last
        }
    }

    fn day(d: u32) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(2024, 1, d)?.and_hms_opt(0, 0, 0)
    }

    fn entries() -> Vec<Entry> {
        vec![
            Entry { name: "beta", clicks: 5, last: day(3) },
            Entry { name: "Alpha", clicks: 9, last: None },
            Entry { name: "gamma", clicks: 5, last: day(9) },
            Entry { name: "", clicks: 1, last: day(1) },
        ]
    }

    fn names(items: &[Entry]) -> Vec<&'static str> {
        items.iter().map(|e| e.name).collect()
    }

    #[test]
    fn test_rank_clicks_desc_stable() {
        let ranked = rank(entries(), SortOrder::ClicksDesc);
        assert_eq!(names(&ranked), vec!["Alpha", "beta", "gamma", ""]);
    }

    #[test]
    fn test_rank_clicks_asc() {
        let ranked = rank(entries(), SortOrder::ClicksAsc);
        assert_eq!(names(&ranked), vec!["", "beta", "gamma", "Alpha"]);
    }

    #[test]
    fn test_rank_names_case_insensitive() {
        let ranked = rank(entries(), SortOrder::NameAsc);
        assert_eq!(names(&ranked), vec!["", "Alpha", "beta", "gamma"]);

        let ranked = rank(entries(), SortOrder::NameDesc);
        assert_eq!(names(&ranked), vec!["gamma", "beta", "Alpha", ""]);
    }

    #[test]
    fn test_rank_recent_missing_last() {
        let ranked = rank(entries(), SortOrder::Recent);
        assert_eq!(names(&ranked), vec!["gamma", "beta", "", "Alpha"]);
    }

    #[test]
    fn test_sort_order_round_trip_names() {
        for order in [
            SortOrder::ClicksDesc,
            SortOrder::ClicksAsc,
            SortOrder::NameAsc,
            SortOrder::NameDesc,
            SortOrder::Recent,
        ] {
            assert_eq!(order.as_str().parse::<SortOrder>().unwrap(), order);
        }
        assert!("popular".parse::<SortOrder>().is_err());
    }

    #[test]
    fn test_paginate_last_partial_page() {
        let items: Vec<usize> = (1..=23).collect();
        let page = paginate(items.clone(), 10, 3);
        assert_eq!(page.items, vec![21, 22, 23]);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total_items, 23);

        let first = paginate(items, 10, 1);
        assert_eq!(first.items, (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn test_paginate_out_of_range_is_empty() {
        let items: Vec<usize> = (1..=23).collect();
        let page = paginate(items.clone(), 10, 5);
        assert!(page.is_empty());
        assert_eq!(page.total_pages, 3);

        assert!(paginate(items.clone(), 10, 0).is_empty());
        assert!(paginate(items, 10, usize::MAX).is_empty());
    }

    #[test]
    fn test_paginate_degenerate() {
        let empty: Page<usize> = paginate(Vec::new(), 10, 1);
        assert!(empty.is_empty());
        assert_eq!(empty.total_pages, 0);

        let zero = paginate(vec![1, 2, 3], 0, 1);
        assert!(zero.is_empty());
        assert_eq!(zero.total_pages, 0);
    }

    #[test]
    fn test_page_map() {
        let page = paginate(vec![1, 2, 3], 2, 2).map(|n| n * 10);
        assert_eq!(page.items, vec![30]);
        assert_eq!(page.total_pages, 2);
    }
}
