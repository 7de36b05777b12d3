//! CalendarDate - タイムゾーンを持たない暦日
//!
//! 外部とのやり取りは常に 8 桁の `YYYYMMDD` 文字列で行います。
//! 検索クエリだけは人間向けの `DD.MM.YYYY` も受け付けます。

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::errors::DateParseError;

/// A naive (zone-less) calendar date in the proleptic Gregorian calendar.
///
/// Ordering and equality are those of the underlying `NaiveDate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// `YYYYMMDD` から作成（月・日の範囲チェック込み）
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    pub fn from_naive(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Returns `None` when the result leaves chrono's representable range.
    pub fn checked_add_days(&self, days: u64) -> Option<Self> {
        self.0.checked_add_days(Days::new(days)).map(Self)
    }

    /// Signed number of days from `earlier` to `self`.
    pub fn days_since(&self, earlier: CalendarDate) -> i64 {
        self.0.signed_duration_since(earlier.0).num_days()
    }

    /// Parses the `DD.MM.YYYY` form used by task search.
    pub fn parse_dotted(text: &str) -> Result<Self, DateParseError> {
        let invalid = || DateParseError::new(text);
        let mut parts = text.split('.');
        let (Some(day), Some(month), Some(year), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };
        if !is_digits(day, 2) || !is_digits(month, 2) || !is_digits(year, 4) {
            return Err(invalid());
        }
        let (year, month, day) = (
            year.parse().map_err(|_| invalid())?,
            month.parse().map_err(|_| invalid())?,
            day.parse().map_err(|_| invalid())?,
        );
        Self::from_ymd(year, month, day).ok_or_else(invalid)
    }
}

fn is_digits(s: &str, len: usize) -> bool {
    s.len() == len && s.bytes().all(|b| b.is_ascii_digit())
}

impl FromStr for CalendarDate {
    type Err = DateParseError;

    /// Strict `YYYYMMDD`: exactly eight ASCII digits naming a real date.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DateParseError::new(s);
        if !is_digits(s, 8) {
            return Err(invalid());
        }
        let year = s[0..4].parse().map_err(|_| invalid())?;
        let month = s[4..6].parse().map_err(|_| invalid())?;
        let day = s[6..8].parse().map_err(|_| invalid())?;
        Self::from_ymd(year, month, day).ok_or_else(invalid)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y%m%d"))
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl Serialize for CalendarDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CalendarDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
