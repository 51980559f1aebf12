//! Click timestamps and trailing time windows.
//!
//! The clickstream export writes dates as `M/D/YYYY` and times as
//! `h:mm:ss AM|PM` in the exporter's local time. Timestamps are kept as
//! naive wall-clock values and compared as such.

use std::fmt;
use std::str::FromStr;

use chrono::{Local, NaiveDate, NaiveDateTime, TimeDelta};

use crate::{ClickEvent, Error, JoinedClick};

/// Parse a `M/D/YYYY` + `h:mm:ss AM|PM` pair.
///
/// Returns `None` for anything malformed; callers treat that as unorderable.
/// A time without a meridiem is read as a 24-hour clock.
pub fn parse_timestamp(date: &str, time: &str) -> Option<NaiveDateTime> {
    let date = parse_date(date)?;

    let mut parts = time.split_whitespace();
    let clock = parts.next()?;
    let meridiem = parts.next();
    if parts.next().is_some() {
        return None;
    }

    let mut clock_parts = clock.split(':');
    let hour: u32 = clock_parts.next()?.parse().ok()?;
    let minute: u32 = clock_parts.next()?.parse().ok()?;
    let second: u32 = clock_parts.next()?.parse().ok()?;
    if clock_parts.next().is_some() {
        return None;
    }

    let hour = match meridiem {
        Some(_) if hour > 12 => return None,
        Some(m) if m.eq_ignore_ascii_case("PM") => hour % 12 + 12,
        Some(m) if m.eq_ignore_ascii_case("AM") => hour % 12,
        Some(_) => return None,
        None if hour > 23 => return None,
        None => hour,
    };

    date.and_hms_opt(hour, minute, second)
}

/// The day bucket used to order timeline labels (noon of that date).
pub fn parse_day(date: &str) -> Option<NaiveDateTime> {
    parse_date(date)?.and_hms_opt(12, 0, 0)
}

fn parse_date(date: &str) -> Option<NaiveDate> {
    let mut parts = date.trim().split('/');
    let month: u32 = parts.next()?.trim().parse().ok()?;
    let day: u32 = parts.next()?.trim().parse().ok()?;
    let year: i32 = parts.next()?.trim().parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Current local wall-clock time.
pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// A trailing window measured back from "now".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimeWindow {
    #[default]
    All,
    Days(u32),
}

impl TimeWindow {
    pub fn cutoff(&self, now: NaiveDateTime) -> Option<NaiveDateTime> {
        match self {
            TimeWindow::All => None,
            TimeWindow::Days(days) => Some(
                TimeDelta::try_days(i64::from(*days))
                    .and_then(|delta| now.checked_sub_signed(delta))
                    .unwrap_or(NaiveDateTime::MIN),
            ),
        }
    }

    /// `All` admits everything, including unparseable timestamps. Any other
    /// window rejects them.
    pub fn contains(&self, timestamp: Option<NaiveDateTime>, now: NaiveDateTime) -> bool {
        match self.cutoff(now) {
            None => true,
            Some(cutoff) => timestamp.is_some_and(|ts| ts >= cutoff),
        }
    }
}

impl FromStr for TimeWindow {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(TimeWindow::All);
        }
        s.parse::<u32>()
            .map(TimeWindow::Days)
            .map_err(|_| Error::InvalidSelector {
                kind: "time window",
                value: s.to_string(),
                expected: "'all' or a number of days",
            })
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeWindow::All => write!(f, "all time"),
            TimeWindow::Days(1) => write!(f, "last day"),
            TimeWindow::Days(days) => write!(f, "last {} days", days),
        }
    }
}

/// Anything carrying a click timestamp.
pub trait Timestamped {
    fn timestamp(&self) -> Option<NaiveDateTime>;
}

impl Timestamped for ClickEvent {
    fn timestamp(&self) -> Option<NaiveDateTime> {
        self.timestamp
    }
}

impl<T: Timestamped + ?Sized> Timestamped for &T {
    fn timestamp(&self) -> Option<NaiveDateTime> {
        (**self).timestamp()
    }
}

impl Timestamped for JoinedClick<'_> {
    fn timestamp(&self) -> Option<NaiveDateTime> {
        self.click.timestamp
    }
}

/// Keep the items inside `window`, preserving order.
pub fn filter_by_window<T, I>(items: I, window: TimeWindow, now: NaiveDateTime) -> Vec<T>
where
    T: Timestamped,
    I: IntoIterator<Item = T>,
{
    items
        .into_iter()
        .filter(|item| window.contains(item.timestamp(), now))
        .collect()
}
