/// Date normalization: canonical day-keys and the clock that produces them
///
/// A day-key names one calendar day in the configured reference time zone.
/// Keys are rendered as ISO 8601 dates, so lexicographic order of the string
/// form matches chronological order.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Days, FixedOffset, NaiveDate, Offset, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

const DAY_KEY_FORMAT: &str = "%Y-%m-%d";

/// Canonical identifier for a calendar day
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DayKey(NaiveDate);

impl DayKey {
    /// Parse a strict `YYYY-MM-DD` key
    ///
    /// Anything else (missing zero padding, extra characters, impossible
    /// dates like `2023-02-29`, years outside 0001-9999) fails fast with
    /// `MalformedDayKey` instead of being coerced into some other day.
    pub fn parse(key: &str) -> Result<Self, DomainError> {
        let malformed = || DomainError::MalformedDayKey { key: key.to_string() };

        let bytes = key.as_bytes();
        if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
            return Err(malformed());
        }
        let digits_ok = bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
        if !digits_ok {
            return Err(malformed());
        }

        let date = NaiveDate::parse_from_str(key, DAY_KEY_FORMAT).map_err(|_| malformed())?;
        Self::from_date(date).ok_or_else(malformed)
    }

    /// Wrap a calendar date, provided it fits the four-digit key format
    pub fn from_date(date: NaiveDate) -> Option<Self> {
        (1..=9999).contains(&date.year()).then_some(Self(date))
    }

    /// The calendar day immediately preceding this one
    ///
    /// Handles month and year rollover. Keys never go below year 0001, so
    /// the subtraction always stays inside chrono's representable range.
    pub fn day_before(self) -> Self {
        Self(self.0 - Days::new(1))
    }

    /// The underlying calendar date
    pub fn date(self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DAY_KEY_FORMAT))
    }
}

impl FromStr for DayKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for DayKey {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DayKey> for String {
    fn from(key: DayKey) -> Self {
        key.to_string()
    }
}

/// Source of "today" under a fixed time zone policy
///
/// The zone is a fixed UTC offset chosen at startup. The default is UTC,
/// which keys days by the UTC calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayClock {
    offset: FixedOffset,
}

impl DayClock {
    /// Clock keyed on the UTC calendar date
    pub fn utc() -> Self {
        Self::with_offset(Utc.fix())
    }

    /// Clock keyed on the calendar date at a fixed offset from UTC
    pub fn with_offset(offset: FixedOffset) -> Self {
        Self { offset }
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// The canonical key for the current date
    pub fn today(&self) -> DayKey {
        self.day_key_at(Utc::now())
    }

    /// The canonical key for the day containing `instant` in this clock's zone
    pub fn day_key_at(&self, instant: DateTime<Utc>) -> DayKey {
        DayKey(instant.with_timezone(&self.offset).date_naive())
    }
}

impl Default for DayClock {
    fn default() -> Self {
        Self::utc()
    }
}

/// Parse a UTC offset such as `+05:30`, `-08:00`, `Z` or `UTC`
pub fn parse_utc_offset(value: &str) -> Result<FixedOffset, DomainError> {
    let invalid = || DomainError::InvalidInput(format!(
        "Invalid UTC offset '{}': expected +HH:MM, -HH:MM or Z", value
    ));

    let trimmed = value.trim();
    if trimmed.eq_ignore_ascii_case("z") || trimmed.eq_ignore_ascii_case("utc") {
        return Ok(Utc.fix());
    }

    let (sign, rest) = match trimmed.as_bytes().first() {
        Some(b'+') => (1, &trimmed[1..]),
        Some(b'-') => (-1, &trimmed[1..]),
        _ => return Err(invalid()),
    };

    let (hours, minutes) = rest.split_once(':').ok_or_else(invalid)?;
    let two_digits = |part: &str| part.len() == 2 && part.bytes().all(|b| b.is_ascii_digit());
    if !two_digits(hours) || !two_digits(minutes) {
        return Err(invalid());
    }
    let hours: i32 = hours.parse().map_err(|_| invalid())?;
    let minutes: i32 = minutes.parse().map_err(|_| invalid())?;
    if hours > 23 || minutes > 59 {
        return Err(invalid());
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(invalid)
}
