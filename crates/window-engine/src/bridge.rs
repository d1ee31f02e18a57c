//! Conversion between local wall-clock values and absolute timestamps.
//!
//! Forms edit timestamps as naive wall-clock strings in the application's
//! zone (`2024-01-10T09:00`); storage keeps zone-qualified RFC 3339 values
//! (`2024-01-10T00:00:00Z`). The bridge converts between the two with one
//! fixed UTC offset, so there are no DST gaps or folds to resolve.
//!
//! Local values are minute precision. Seconds are accepted on input but
//! dropped on output, so only minute-precision values round-trip.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Offset, SecondsFormat, Utc};

use crate::compare::Point;
use crate::error::{Result, WindowError};
use crate::sentinel::SentinelPolicy;

/// Offset of the application's zone when none is configured (UTC+9).
pub const DEFAULT_OFFSET_SECONDS: i32 = 9 * 3600;

/// Output format for local values.
pub const LOCAL_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Accepted local input formats, tried in order.
const LOCAL_INPUT_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
];

/// Converts between the local and absolute timestamp representations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeZoneBridge {
    offset: FixedOffset,
}

impl Default for TimeZoneBridge {
    fn default() -> Self {
        Self {
            offset: FixedOffset::east_opt(DEFAULT_OFFSET_SECONDS).unwrap_or_else(|| Utc.fix()),
        }
    }
}

impl TimeZoneBridge {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    /// Build a bridge from an offset string such as `"+09:00"`, `"-0530"` or `"Z"`.
    ///
    /// # Errors
    ///
    /// Returns [`WindowError::InvalidOffset`] if the string is not a valid offset.
    pub fn from_offset_str(s: &str) -> Result<Self> {
        parse_offset(s).map(Self::new)
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Convert a local value to its absolute RFC 3339 form.
    ///
    /// # Errors
    ///
    /// Returns [`WindowError::InvalidDatetime`] if `local` cannot be parsed.
    ///
    /// # Examples
    ///
    /// ```
    /// use window_engine::TimeZoneBridge;
    ///
    /// let bridge = TimeZoneBridge::default(); // UTC+9
    /// assert_eq!(bridge.to_absolute("2024-01-10T09:00").unwrap(), "2024-01-10T00:00:00Z");
    /// ```
    pub fn to_absolute(&self, local: &str) -> Result<String> {
        let naive = self.parse_local(local)?;
        let instant = self.local_to_instant(&naive)?;
        Ok(format_absolute(&instant))
    }

    /// Convert an absolute RFC 3339 value to the local wall-clock form.
    ///
    /// # Errors
    ///
    /// Returns [`WindowError::InvalidDatetime`] if `absolute` is not RFC 3339.
    ///
    /// # Examples
    ///
    /// ```
    /// use window_engine::TimeZoneBridge;
    ///
    /// let bridge = TimeZoneBridge::default();
    /// assert_eq!(bridge.to_local("2024-01-10T00:00:00Z").unwrap(), "2024-01-10T09:00");
    /// ```
    pub fn to_local(&self, absolute: &str) -> Result<String> {
        let instant = parse_absolute(absolute)?;
        Ok(format_local(&self.instant_to_local(&instant)))
    }

    /// Parse a local wall-clock string. A bare date means midnight.
    pub fn parse_local(&self, s: &str) -> Result<NaiveDateTime> {
        let trimmed = s.trim();
        LOCAL_INPUT_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
            .or_else(|| {
                NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                    .ok()
                    .and_then(|date| date.and_hms_opt(0, 0, 0))
            })
            .ok_or_else(|| WindowError::InvalidDatetime(format!("'{}'", s)))
    }

    /// Pin a local wall-clock value to an instant using the bridge offset.
    pub fn local_to_instant(&self, naive: &NaiveDateTime) -> Result<DateTime<Utc>> {
        naive
            .and_local_timezone(self.offset)
            .single()
            .map(|dt| dt.with_timezone(&Utc))
            .ok_or_else(|| {
                WindowError::InvalidDatetime(format!("'{}' is out of range", format_local(naive)))
            })
    }

    /// Read a local value as a comparable [`Point`].
    ///
    /// A value whose local year is the sentinel year becomes
    /// [`Point::Unlimited`]; the offset is applied only to ordinary values.
    ///
    /// # Errors
    ///
    /// Returns [`WindowError::InvalidDatetime`] if `local` cannot be parsed.
    pub fn read_point(&self, local: &str, sentinel: &SentinelPolicy) -> Result<Point> {
        let naive = self.parse_local(local)?;
        if sentinel.is_unlimited(&naive) {
            return Ok(Point::Unlimited);
        }
        self.local_to_instant(&naive).map(Point::At)
    }

    /// Classify a stored instant the way [`read_point`](Self::read_point)
    /// classifies its local rendering.
    pub fn instant_point(&self, instant: DateTime<Utc>, sentinel: &SentinelPolicy) -> Point {
        if sentinel.is_unlimited(&self.instant_to_local(&instant)) {
            Point::Unlimited
        } else {
            Point::At(instant)
        }
    }

    /// The wall-clock reading of `instant` in the bridge zone.
    pub fn instant_to_local(&self, instant: &DateTime<Utc>) -> NaiveDateTime {
        instant.with_timezone(&self.offset).naive_local()
    }

    /// Format the bridge offset (e.g., "+09:00", "-05:30").
    pub fn offset_string(&self) -> String {
        let offset_secs = self.offset.local_minus_utc();
        let sign = if offset_secs >= 0 { "+" } else { "-" };
        let abs_secs = offset_secs.unsigned_abs();
        let hours = abs_secs / 3600;
        let minutes = (abs_secs % 3600) / 60;
        format!("{sign}{hours:02}:{minutes:02}")
    }
}

/// Parse an RFC 3339 datetime string into `DateTime<Utc>`.
pub fn parse_absolute(s: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| WindowError::InvalidDatetime(format!("'{}': {}", s, e)))
}

/// Render an instant as RFC 3339 UTC with second precision.
pub fn format_absolute(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Render a wall-clock value at minute precision.
pub fn format_local(naive: &NaiveDateTime) -> String {
    naive.format(LOCAL_FORMAT).to_string()
}

/// Largest accepted distance from UTC, in either direction.
const MAX_OFFSET_SECONDS: i32 = 14 * 3600;

fn parse_offset(s: &str) -> Result<FixedOffset> {
    let trimmed = s.trim();
    if trimmed.eq_ignore_ascii_case("z") || trimmed.eq_ignore_ascii_case("utc") {
        return Ok(Utc.fix());
    }

    trimmed
        .parse::<FixedOffset>()
        .ok()
        .filter(|offset| offset.local_minus_utc().abs() <= MAX_OFFSET_SECONDS)
        .ok_or_else(|| WindowError::InvalidOffset(format!("'{}'", s)))
}
