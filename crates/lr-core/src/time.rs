//! Absolute time model.
//!
//! # Design
//!
//! An instant is a `Timestamp`: whole microseconds since the Unix epoch in a
//! `u64`.  Offsets and delays stay `std::time::Duration`; adding one to a
//! timestamp truncates to microsecond resolution and saturates instead of
//! overflowing.
//!
//! Keeping instants as integers makes event ordering exact (no float
//! comparison) and lets a virtual clock and the system clock share one type.
//! Conversion to a calendar date happens only when a line is formatted.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};

/// An absolute instant, in microseconds since 1970-01-01T00:00:00Z.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timestamp(pub u64);

impl Timestamp {
    pub const EPOCH: Timestamp = Timestamp(0);

    #[inline]
    pub fn from_micros(micros: u64) -> Timestamp {
        Timestamp(micros)
    }

    #[inline]
    pub fn from_secs(secs: u64) -> Timestamp {
        Timestamp(secs.saturating_mul(1_000_000))
    }

    /// Convert a calendar instant.  Instants before the epoch clamp to it.
    pub fn from_datetime(dt: DateTime<Utc>) -> Timestamp {
        Timestamp(u64::try_from(dt.timestamp_micros()).unwrap_or(0))
    }

    #[inline]
    pub fn as_micros(self) -> u64 {
        self.0
    }

    /// Calendar form in UTC.  `None` only past chrono's representable range.
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        let micros = i64::try_from(self.0).ok()?;
        DateTime::from_timestamp_micros(micros)
    }

    /// The instant `offset` after `self`.
    #[inline]
    pub fn offset(self, offset: Duration) -> Timestamp {
        Timestamp(self.0.saturating_add(duration_micros(offset)))
    }

    /// Time elapsed from `earlier` to `self`, or zero if `earlier` is later.
    #[inline]
    pub fn saturating_since(self, earlier: Timestamp) -> Duration {
        Duration::from_micros(self.0.saturating_sub(earlier.0))
    }
}

impl std::ops::Add<Duration> for Timestamp {
    type Output = Timestamp;
    #[inline]
    fn add(self, rhs: Duration) -> Timestamp {
        self.offset(rhs)
    }
}

impl std::ops::Sub for Timestamp {
    type Output = Duration;
    #[inline]
    fn sub(self, rhs: Timestamp) -> Duration {
        self.saturating_since(rhs)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_datetime() {
            Some(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S%.6fZ")),
            None => write!(f, "{}us", self.0),
        }
    }
}

/// Whole microseconds in `d`, saturating at `u64::MAX`.
#[inline]
pub fn duration_micros(d: Duration) -> u64 {
    u64::try_from(d.as_micros()).unwrap_or(u64::MAX)
}
