use chrono::{Datelike, FixedOffset, NaiveDate};
use once_cell::sync::Lazy;
use std::{fmt, str::FromStr};
use thiserror::Error;

const SECONDS_PER_DAY: i64 = 86_400;
const SECONDS_PER_HOUR: i64 = 3_600;
/// Days from 0001-01-01 (CE day 1) to 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i64 = 719_163;

pub static UTC8: Lazy<FixedOffset> = Lazy::new(|| FixedOffset::east_opt(8 * 3600).unwrap());

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid UTC offset `{0}`")]
pub struct InvalidOffsetError(pub String);

/// Parses offsets written as `+08:00`, `-0530`, `+8`, `Z` or `UTC`.
pub fn parse_offset(value: &str) -> Result<FixedOffset, InvalidOffsetError> {
    let invalid = || InvalidOffsetError(value.to_string());
    let trimmed = value.trim();

    if trimmed.eq_ignore_ascii_case("z") || trimmed.eq_ignore_ascii_case("utc") {
        return FixedOffset::east_opt(0).ok_or_else(invalid);
    }

    let (sign, rest) = match trimmed.chars().next() {
        Some('+') => (1, &trimmed[1..]),
        Some('-') => (-1, &trimmed[1..]),
        _ => return Err(invalid()),
    };

    let (hours, minutes) = match rest.split_once(':') {
        Some((hours, minutes)) => (hours, minutes),
        None if rest.len() == 4 => match (rest.get(..2), rest.get(2..)) {
            (Some(hours), Some(minutes)) => (hours, minutes),
            _ => return Err(invalid()),
        },
        None => (rest, "0"),
    };
    let hours: i32 = hours.parse().map_err(|_| invalid())?;
    let minutes: i32 = minutes.parse().map_err(|_| invalid())?;
    if !(0..=23).contains(&hours) || !(0..=59).contains(&minutes) {
        return Err(invalid());
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(invalid)
}

/// Buckets UNIX timestamps into calendar dates, months and hours as seen on a
/// wall clock pinned to a fixed UTC offset. The host timezone never leaks in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeNormalizer {
    offset: FixedOffset,
}

impl Default for TimeNormalizer {
    fn default() -> Self {
        Self::new(*UTC8)
    }
}

impl TimeNormalizer {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    fn shifted(&self, timestamp: i64) -> i64 {
        timestamp.saturating_add(self.offset.local_minus_utc() as i64)
    }

    pub fn date(&self, timestamp: i64) -> NaiveDate {
        let days = self.shifted(timestamp).div_euclid(SECONDS_PER_DAY);
        i32::try_from(days + UNIX_EPOCH_DAYS_FROM_CE)
            .ok()
            .and_then(NaiveDate::from_num_days_from_ce_opt)
            .unwrap_or_default()
    }

    /// `YYYY-MM-DD`
    pub fn date_str(&self, timestamp: i64) -> String {
        self.date(timestamp).format("%Y-%m-%d").to_string()
    }

    /// Hour of day, 0 to 23.
    pub fn hour(&self, timestamp: i64) -> u32 {
        (self.shifted(timestamp).rem_euclid(SECONDS_PER_DAY) / SECONDS_PER_HOUR) as u32
    }

    /// Zero based month, 0 to 11.
    pub fn month0(&self, timestamp: i64) -> u32 {
        self.date(timestamp).month0()
    }
}

impl FromStr for TimeNormalizer {
    type Err = InvalidOffsetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_offset(s).map(Self::new)
    }
}

impl fmt::Display for TimeNormalizer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "UTC{}", self.offset)
    }
}

/// Renders a duration in seconds as `3m 5s` or `42s`.
pub fn format_duration(seconds: i64) -> String {
    let minutes = seconds / 60;
    let seconds = seconds % 60;
    if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}
