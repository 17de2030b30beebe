//! Wall-clock timestamps produced by `$now` and `$utcNow`.
//!
//! Both tokens read a naive instant: `$now` from the local clock and
//! `$utcNow` from UTC. Neither is converted to the other's zone afterwards,
//! so on a host that is not running in UTC the two differ by the local offset.

use chrono::{Local, NaiveDateTime, Timelike, Utc};
use serde::{Serialize, Serializer};
use std::fmt;

/// The clock a [`Timestamp`] was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Clock {
    Local,
    Utc,
}

/// A naive wall-clock instant with microsecond precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Timestamp {
    instant: NaiveDateTime,
    clock: Clock,
}

impl Timestamp {
    /// Reads the local wall clock.
    #[must_use]
    pub fn now() -> Self {
        Self::at(Local::now().naive_local(), Clock::Local)
    }

    /// Reads the UTC clock.
    #[must_use]
    pub fn utc_now() -> Self {
        Self::at(Utc::now().naive_utc(), Clock::Utc)
    }

    /// Creates a timestamp from a known instant, truncated to microseconds.
    #[must_use]
    pub fn at(instant: NaiveDateTime, clock: Clock) -> Self {
        let micros = instant.nanosecond() / 1_000 * 1_000;
        let instant = instant.with_nanosecond(micros).unwrap_or(instant);
        Self { instant, clock }
    }

    /// Returns the naive instant.
    #[must_use]
    pub const fn instant(&self) -> NaiveDateTime {
        self.instant
    }

    /// Returns the clock this timestamp was read from.
    #[must_use]
    pub const fn clock(&self) -> Clock {
        self.clock
    }

    /// ISO-8601 form used when the timestamp is written to a document.
    #[must_use]
    pub fn to_iso_string(&self) -> String {
        self.instant.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
    }
}

/// Renders `YYYY-MM-DD HH:MM:SS[.ffffff]`; the fraction is omitted when
/// the microsecond component is zero.
impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.instant.format("%Y-%m-%d %H:%M:%S"))?;
        let micros = self.instant.nanosecond() / 1_000;
        if micros != 0 {
            write!(f, ".{micros:06}")?;
        }
        Ok(())
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_iso_string())
    }
}
