use crate::time::{parse_offset, InvalidOffsetError};
use chrono::{
    Datelike, Duration, FixedOffset, Local, LocalResult, NaiveDate, NaiveDateTime,
    TimeZone, Utc,
};
use std::{fmt, str::FromStr};

/// Timezone in which calendar years are delimited.
///
/// `Local` follows the host timezone, which is what year selection has always
/// used. A fixed offset makes year boundaries reproducible across machines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum YearZone {
    #[default]
    Local,
    Fixed(FixedOffset),
}

impl YearZone {
    /// Resolves a wall-clock time in this zone to UNIX seconds.
    ///
    /// Ambiguous times take the earlier instant. Times inside a DST gap are
    /// pushed forward by an hour.
    fn to_timestamp(&self, naive: NaiveDateTime) -> i64 {
        fn resolve<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> Option<i64> {
            match tz.from_local_datetime(&naive) {
                LocalResult::Single(dt) => Some(dt.timestamp()),
                LocalResult::Ambiguous(earliest, _) => Some(earliest.timestamp()),
                LocalResult::None => tz
                    .from_local_datetime(&(naive + Duration::hours(1)))
                    .earliest()
                    .map(|dt| dt.timestamp()),
            }
        }

        let resolved = match self {
            YearZone::Local => resolve(&Local, naive),
            YearZone::Fixed(offset) => resolve(offset, naive),
        };
        resolved.unwrap_or_else(|| Utc.from_utc_datetime(&naive).timestamp())
    }

    /// Calendar year of a timestamp as seen in this zone.
    pub fn year_of(&self, timestamp: i64) -> i32 {
        let utc = match Utc.timestamp_opt(timestamp, 0) {
            LocalResult::Single(dt) => dt,
            _ => return 1970,
        };
        match self {
            YearZone::Local => utc.with_timezone(&Local).year(),
            YearZone::Fixed(offset) => utc.with_timezone(offset).year(),
        }
    }

    pub fn current_year(&self) -> i32 {
        self.year_of(Utc::now().timestamp())
    }
}

impl FromStr for YearZone {
    type Err = InvalidOffsetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("local") {
            Ok(YearZone::Local)
        } else {
            parse_offset(s).map(YearZone::Fixed)
        }
    }
}

impl fmt::Display for YearZone {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            YearZone::Local => write!(f, "local"),
            YearZone::Fixed(offset) => write!(f, "{}", offset),
        }
    }
}

/// Anything carrying a UNIX timestamp that can be assigned to a year.
pub trait Timestamped {
    fn timestamp(&self) -> i64;
}

/// Inclusive UNIX-second bounds of one calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearWindow {
    pub year: i32,
    /// Jan 1 00:00:00
    pub start: i64,
    /// Dec 31 23:59:59
    pub end: i64,
}

impl YearWindow {
    pub fn new(year: i32, zone: &YearZone) -> Self {
        let first = NaiveDate::from_ymd_opt(year, 1, 1).and_then(|d| d.and_hms_opt(0, 0, 0));
        let last = NaiveDate::from_ymd_opt(year, 12, 31).and_then(|d| d.and_hms_opt(23, 59, 59));

        match (first, last) {
            (Some(first), Some(last)) => Self {
                year,
                start: zone.to_timestamp(first),
                end: zone.to_timestamp(last),
            },
            // out of the representable calendar, nothing can fall inside
            _ => Self {
                year,
                start: i64::MAX,
                end: i64::MIN,
            },
        }
    }

    pub fn contains(&self, timestamp: i64) -> bool {
        self.start <= timestamp && timestamp <= self.end
    }

    pub fn filter<'a, T: Timestamped>(&self, items: &'a [T]) -> Vec<&'a T> {
        items
            .iter()
            .filter(|item| self.contains(item.timestamp()))
            .collect()
    }

    pub fn is_before(&self, timestamp: i64) -> bool {
        timestamp < self.start
    }
}
