//! ISO-8601 timestamps with an optional fixed UTC offset.
//!
//! Text form: `YYYY-MM-DDTHH:MM:SS.ffffff`, followed by `±HH:MM`
//! when the timestamp carries an offset.

use alloc::string::String;
use core::fmt;
use core::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone};
use thiserror::Error;

// -----------------------------------------------------------------------------
// Formats

const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

// `%.f` also accepts a missing fraction.
const AWARE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%:z", "%Y-%m-%dT%H:%M:%S%.f%z"];
const SPACED_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";
const NAIVE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

// -----------------------------------------------------------------------------
// TimestampError

/// Text that could not be read as a timestamp.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TimestampError {
    #[error("`{text}` is not an ISO-8601 timestamp: {source}")]
    Invalid {
        text: String,
        #[source]
        source: chrono::ParseError,
    },
}

// -----------------------------------------------------------------------------
// Timestamp

/// A calendar date and wall-clock time, optionally tagged with a UTC offset.
///
/// Offset-naive and offset-aware timestamps never compare equal,
/// even when the wall-clock times match.
///
/// # Examples
///
/// ```
/// use chrono::{FixedOffset, NaiveDate};
/// use objson_reflect::timestamp::Timestamp;
///
/// let local = NaiveDate::from_ymd_opt(2019, 8, 11)
///     .unwrap()
///     .and_hms_opt(6, 10, 24)
///     .unwrap();
/// let jst = FixedOffset::east_opt(9 * 3600).unwrap();
/// let ts = Timestamp::with_offset(local, jst);
///
/// assert_eq!(ts.format(true), "2019-08-11T06:10:24.000000+09:00");
/// assert_eq!(ts.format(false), "2019-08-11T06:10:24.000000");
/// assert_eq!("2019-08-11T06:10:24+09:00".parse::<Timestamp>().unwrap(), ts);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Timestamp {
    local: NaiveDateTime,
    offset: Option<FixedOffset>,
}

impl Timestamp {
    /// An offset-naive timestamp.
    #[inline]
    pub const fn naive(local: NaiveDateTime) -> Self {
        Self {
            local,
            offset: None,
        }
    }

    /// An offset-aware timestamp whose wall-clock time is `local`.
    #[inline]
    pub const fn with_offset(local: NaiveDateTime, offset: FixedOffset) -> Self {
        Self {
            local,
            offset: Some(offset),
        }
    }

    /// The wall-clock date and time.
    #[inline]
    pub const fn local(&self) -> NaiveDateTime {
        self.local
    }

    #[inline]
    pub const fn offset(&self) -> Option<FixedOffset> {
        self.offset
    }

    #[inline]
    pub const fn is_aware(&self) -> bool {
        self.offset.is_some()
    }

    /// Converts to a [`DateTime`], or `None` for offset-naive timestamps.
    pub fn to_datetime(&self) -> Option<DateTime<FixedOffset>> {
        let offset = self.offset?;
        offset.from_local_datetime(&self.local).single()
    }

    /// Formats as `YYYY-MM-DDTHH:MM:SS.ffffff`, appending `±HH:MM`
    /// when `include_offset` is set and an offset is present.
    ///
    /// The offset is written in whole minutes: the seconds of an offset
    /// such as `+05:00:30` are dropped, so that text parses back to a
    /// timestamp with offset `+05:00`.
    pub fn format(&self, include_offset: bool) -> String {
        use core::fmt::Write;

        let mut text = self.local.format(DATE_TIME_FORMAT).to_string();
        if include_offset && let Some(offset) = self.offset {
            let seconds = offset.local_minus_utc();
            let sign = if seconds < 0 { '-' } else { '+' };
            let seconds = seconds.unsigned_abs();
            // Writing into a `String` cannot fail.
            let _ = write!(text, "{sign}{:02}:{:02}", seconds / 3600, seconds % 3600 / 60);
        }
        text
    }

    /// Parses ISO-8601 text with optional fractional seconds and an optional
    /// `±HH:MM`, `±HHMM` or `Z` suffix.
    pub fn parse(text: &str) -> Result<Self, TimestampError> {
        for format in AWARE_FORMATS {
            if let Ok(datetime) = DateTime::parse_from_str(text, format) {
                return Ok(Self::from(datetime));
            }
        }
        if let Ok(datetime) = DateTime::parse_from_rfc3339(text) {
            return Ok(Self::from(datetime));
        }

        if let Ok(local) = NaiveDateTime::parse_from_str(text, SPACED_FORMAT) {
            return Ok(Self::naive(local));
        }

        NaiveDateTime::parse_from_str(text, NAIVE_FORMAT)
            .map(Self::naive)
            .map_err(|source| TimestampError::Invalid {
                text: text.into(),
                source,
            })
    }
}

impl From<NaiveDateTime> for Timestamp {
    #[inline]
    fn from(local: NaiveDateTime) -> Self {
        Self::naive(local)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Timestamp {
    #[inline]
    fn from(datetime: DateTime<Tz>) -> Self {
        let datetime = datetime.fixed_offset();
        Self::with_offset(datetime.naive_local(), *datetime.offset())
    }
}

impl fmt::Display for Timestamp {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(true))
    }
}

impl FromStr for Timestamp {
    type Err = TimestampError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// -----------------------------------------------------------------------------
// Free functions

/// Formats `timestamp` as ISO-8601 text. See [`Timestamp::format`].
#[inline]
pub fn format_timestamp(timestamp: &Timestamp, include_offset: bool) -> String {
    timestamp.format(include_offset)
}

/// Parses ISO-8601 text. See [`Timestamp::parse`].
#[inline]
pub fn parse_timestamp(text: &str) -> Result<Timestamp, TimestampError> {
    Timestamp::parse(text)
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, NaiveDate, NaiveDateTime, Utc};

    use super::{Timestamp, TimestampError, format_timestamp, parse_timestamp};

    fn local() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2019, 8, 11)
            .unwrap()
            .and_hms_opt(6, 10, 24)
            .unwrap()
    }

    fn jst() -> FixedOffset {
        FixedOffset::east_opt(9 * 3600).unwrap()
    }

    #[test]
    fn format_with_and_without_offset() {
        let aware = Timestamp::with_offset(local(), jst());
        let naive = Timestamp::naive(local());

        assert_eq!(format_timestamp(&aware, true), "2019-08-11T06:10:24.000000+09:00");
        assert_eq!(format_timestamp(&aware, false), "2019-08-11T06:10:24.000000");
        assert_eq!(format_timestamp(&naive, true), "2019-08-11T06:10:24.000000");

        let west = Timestamp::with_offset(local(), FixedOffset::west_opt(3 * 3600 + 1800).unwrap());
        assert_eq!(west.to_string(), "2019-08-11T06:10:24.000000-03:30");
    }

    #[test]
    fn round_trip() {
        let micros = NaiveDate::from_ymd_opt(2024, 2, 29)
            .unwrap()
            .and_hms_micro_opt(23, 59, 58, 123_456)
            .unwrap();

        for ts in [
            Timestamp::naive(local()),
            Timestamp::with_offset(local(), jst()),
            Timestamp::naive(micros),
            Timestamp::with_offset(micros, FixedOffset::west_opt(5 * 3600).unwrap()),
        ] {
            assert_eq!(parse_timestamp(&format_timestamp(&ts, true)).unwrap(), ts);
        }
    }

    #[test]
    fn parse_variants() {
        let aware = Timestamp::with_offset(local(), jst());
        assert_eq!(parse_timestamp("2019-08-11T06:10:24+09:00").unwrap(), aware);
        assert_eq!(parse_timestamp("2019-08-11T06:10:24.000+0900").unwrap(), aware);
        assert_eq!(parse_timestamp("2019-08-11T06:10:24").unwrap(), Timestamp::naive(local()));
        assert_eq!(parse_timestamp("2019-08-11 06:10:24").unwrap(), Timestamp::naive(local()));

        let utc = parse_timestamp("2019-08-10T21:10:24Z").unwrap();
        assert_eq!(utc.offset(), Some(FixedOffset::east_opt(0).unwrap()));
        assert_eq!(utc.to_datetime(), aware.to_datetime());
    }

    #[test]
    fn sub_minute_offsets_are_truncated() {
        let offset = FixedOffset::east_opt(5 * 3600 + 30).unwrap();
        let ts = Timestamp::with_offset(local(), offset);
        assert_eq!(ts.format(true), "2019-08-11T06:10:24.000000+05:00");

        let parsed = parse_timestamp(&ts.format(true)).unwrap();
        assert_eq!(parsed.offset(), FixedOffset::east_opt(5 * 3600));
        assert_eq!(parsed.local(), local());
    }

    #[test]
    fn naive_and_aware_differ() {
        assert_ne!(Timestamp::naive(local()), Timestamp::with_offset(local(), jst()));
        assert_eq!(Timestamp::naive(local()).to_datetime(), None);
    }

    #[test]
    fn from_chrono_datetime() {
        let datetime = local().and_utc();
        let ts = Timestamp::from(datetime);
        assert_eq!(ts.format(true), "2019-08-11T06:10:24.000000+00:00");
        assert_eq!(ts.to_datetime().unwrap().with_timezone(&Utc), datetime);
    }

    #[test]
    fn rejects_garbage() {
        let err = parse_timestamp("yesterday").unwrap_err();
        let TimestampError::Invalid { text, .. } = err;
        assert_eq!(text, "yesterday");
        assert!(parse_timestamp("").is_err());
    }
}
