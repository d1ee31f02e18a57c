//! Ordering of optional window bounds with unlimited-end awareness.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};

/// A resolved bound: a concrete instant, or the unlimited sentinel.
///
/// Whether a value is the sentinel is settled when it is read (see
/// [`TimeZoneBridge::read_point`](crate::TimeZoneBridge::read_point)), so an
/// ordinary instant that happens to fall in the sentinel year in UTC stays an
/// ordinary instant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Point {
    At(DateTime<Utc>),
    /// Sorts after every instant.
    Unlimited,
}

impl From<DateTime<Utc>> for Point {
    fn from(instant: DateTime<Utc>) -> Self {
        Point::At(instant)
    }
}

/// Compares two optional bounds.
///
/// `compare` returns `None` (incomparable) when either side is absent, so a
/// half-filled window never produces a violation on its own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RangeComparator;

impl RangeComparator {
    pub fn new() -> Self {
        Self
    }

    /// Order `a` relative to `b`.
    ///
    /// Rules, in order:
    /// 1. either side absent → `None`
    /// 2. only `b` unlimited → `Less`
    /// 3. only `a` unlimited → `Greater`
    /// 4. both unlimited → `Equal`
    /// 5. otherwise the instants are compared directly
    pub fn compare(&self, a: Option<Point>, b: Option<Point>) -> Option<Ordering> {
        let ordering = match (a?, b?) {
            (Point::At(_), Point::Unlimited) => Ordering::Less,
            (Point::Unlimited, Point::At(_)) => Ordering::Greater,
            (Point::Unlimited, Point::Unlimited) => Ordering::Equal,
            (Point::At(a), Point::At(b)) => a.cmp(&b),
        };
        Some(ordering)
    }

    /// True only when both sides are present and `a` is strictly after `b`.
    pub fn is_after(&self, a: Option<Point>, b: Option<Point>) -> bool {
        self.compare(a, b) == Some(Ordering::Greater)
    }
}
