//! Grouping and counting of filtered clicks.
//!
//! Every grouping keeps keys in order of first appearance so that ties in
//! count-descending orderings resolve the same way on every run.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

/// Insertion-ordered `key -> count` mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupCounts {
    entries: Vec<(String, usize)>,
    positions: HashMap<String, usize>,
}

impl GroupCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: &str) {
        self.add_n(key, 1);
    }

    pub fn add_n(&mut self, key: &str, n: usize) {
        match self.positions.get(key) {
            Some(&pos) => self.entries[pos].1 += n,
            None => {
                self.positions.insert(key.to_string(), self.entries.len());
                self.entries.push((key.to_string(), n));
            }
        }
    }

    pub fn get(&self, key: &str) -> usize {
        self.positions
            .get(key)
            .map(|&pos| self.entries[pos].1)
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    /// Entries in first-appearance order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(key, count)| (key.as_str(), *count))
    }

    /// Highest count; the earliest key wins a tie.
    pub fn top(&self) -> Option<(&str, usize)> {
        let mut best: Option<(&str, usize)> = None;
        for (key, count) in self.iter() {
            if best.is_none_or(|(_, c)| count > c) {
                best = Some((key, count));
            }
        }
        best
    }

    pub fn into_entries(self) -> Vec<(String, usize)> {
        self.entries
    }
}

/// Count items per key in a single pass.
pub fn group_and_count<T, I, K, F>(items: I, mut key_fn: F) -> GroupCounts
where
    I: IntoIterator<Item = T>,
    K: AsRef<str>,
    F: FnMut(&T) -> K,
{
    let mut counts = GroupCounts::new();
    for item in items {
        let key = key_fn(&item);
        counts.add(key.as_ref());
    }
    counts
}

/// The `n` largest groups, count descending. The sort is stable so equal
/// counts keep first-appearance order.
pub fn top_n(grouped: &GroupCounts, n: usize) -> Vec<(String, usize)> {
    let mut entries = grouped.entries.clone();
    sort_by_count_desc(&mut entries);
    entries.truncate(n);
    entries
}

fn sort_by_count_desc(entries: &mut [(String, usize)]) {
    entries.sort_by(|a, b| b.1.cmp(&a.1));
}

/// A primary group with tallies of `N` secondary dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupStats<const N: usize> {
    pub key: String,
    pub count: usize,
    pub breakdowns: [GroupCounts; N],
}

impl<const N: usize> GroupStats<N> {
    /// Top key of breakdown `dim`, using the same ordering as [`top_n`].
    pub fn top_sub(&self, dim: usize) -> Option<&str> {
        self.breakdowns.get(dim)?.top().map(|(key, _)| key)
    }
}

/// Group by `key_fn` while tallying the dimensions returned by `subgroup_fn`
/// in the same pass. Groups come back in first-appearance order.
pub fn multi_group<T, I, K, S, F, G, const N: usize>(
    items: I,
    mut key_fn: F,
    mut subgroup_fn: G,
) -> Vec<GroupStats<N>>
where
    I: IntoIterator<Item = T>,
    K: AsRef<str>,
    S: AsRef<str>,
    F: FnMut(&T) -> K,
    G: FnMut(&T) -> [S; N],
{
    let mut groups: Vec<GroupAccumulator<N>> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for item in items {
        let key = key_fn(&item);
        let key = key.as_ref();
        let pos = match positions.get(key) {
            Some(&pos) => pos,
            None => {
                positions.insert(key.to_string(), groups.len());
                groups.push(GroupAccumulator::new(key));
                groups.len() - 1
            }
        };
        groups[pos].add(subgroup_fn(&item));
    }

    groups.into_iter().map(GroupAccumulator::finish).collect()
}

/// Number of distinct keys.
pub fn count_unique<T, I, K, F>(items: I, mut key_fn: F) -> usize
where
    I: IntoIterator<Item = T>,
    K: AsRef<str>,
    F: FnMut(&T) -> K,
{
    let mut seen: HashSet<String> = HashSet::new();
    for item in items {
        let key = key_fn(&item);
        if !seen.contains(key.as_ref()) {
            seen.insert(key.as_ref().to_string());
        }
    }
    seen.len()
}

/// One label/value pair of a chart-ready series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesPoint {
    pub label: String,
    pub value: usize,
}

pub fn to_series(entries: Vec<(String, usize)>) -> Vec<SeriesPoint> {
    entries
        .into_iter()
        .map(|(label, value)| SeriesPoint { label, value })
        .collect()
}

// =============================================================================
// Internal helpers
// =============================================================================

struct GroupAccumulator<const N: usize> {
    key: String,
    count: usize,
    breakdowns: [GroupCounts; N],
}

impl<const N: usize> GroupAccumulator<N> {
    fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            count: 0,
            breakdowns: std::array::from_fn(|_| GroupCounts::new()),
        }
    }

    fn add<S: AsRef<str>>(&mut self, subkeys: [S; N]) {
        self.count += 1;
        for (counts, subkey) in self.breakdowns.iter_mut().zip(subkeys.iter()) {
            counts.add(subkey.as_ref());
        }
    }

    fn finish(self) -> GroupStats<N> {
        GroupStats {
            key: self.key,
            count: self.count,
            breakdowns: self.breakdowns,
        }
    }
}
