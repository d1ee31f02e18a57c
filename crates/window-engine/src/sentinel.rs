//! The "unlimited end" sentinel.
//!
//! A window with no end date stores a far-future timestamp instead of an
//! empty value. Every value whose year equals the reserved sentinel year is
//! treated as unlimited, whatever its month, day or time. A literal date typed
//! in that year is therefore indistinguishable from "no end".

use chrono::{DateTime, Datelike, NaiveDate, Utc};

use crate::error::{Result, WindowError};

/// Year reserved for the unlimited sentinel.
pub const UNLIMITED_YEAR: i32 = 2200;

/// Recognizes and produces the unlimited sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SentinelPolicy {
    year: i32,
}

impl Default for SentinelPolicy {
    fn default() -> Self {
        Self {
            year: UNLIMITED_YEAR,
        }
    }
}

impl SentinelPolicy {
    /// Build a policy reserving `year`.
    ///
    /// # Errors
    ///
    /// Returns [`WindowError::InvalidSentinel`] unless `year` has four digits,
    /// since absolute timestamps are rendered as RFC 3339.
    pub fn new(year: i32) -> Result<Self> {
        if !(1000..=9999).contains(&year) {
            return Err(WindowError::InvalidSentinel(year));
        }
        Ok(Self { year })
    }

    /// The reserved year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// True iff `ts` falls in the reserved year.
    ///
    /// Works on both representations: a local wall-clock value
    /// (`NaiveDateTime`) is checked on its local year, an absolute value on
    /// its UTC year.
    pub fn is_unlimited<D: Datelike>(&self, ts: &D) -> bool {
        ts.year() == self.year
    }

    /// The canonical sentinel: December 31st of the reserved year, 00:00 UTC.
    ///
    /// Anchoring on the last day keeps the local rendering inside the reserved
    /// year for every accepted offset (up to ±14:00 either way).
    pub fn unlimited_value(&self) -> DateTime<Utc> {
        NaiveDate::from_ymd_opt(self.year, 12, 31)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}
