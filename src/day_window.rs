// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Local-day intervals.
//!
//! A [`DayWindow`] is a half-open span `[start, end)` of zone-aware instants.
//! The main one is the local calendar day, midnight to next midnight, which
//! lasts 23, 24 or 25 hours around DST changes.

use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveTime, TimeZone};
use chrono_tz::Tz;
use std::fmt;

use crate::error::{Error, Result};

#[cfg(feature = "serde")]
use serde::Serialize;

/// A span between two instants in an observer's time zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct DayWindow {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
}

impl DayWindow {
    pub fn new(start: DateTime<Tz>, end: DateTime<Tz>) -> Self {
        Self { start, end }
    }

    /// Local midnight of `date` to local midnight of the next day.
    ///
    /// # Errors
    ///
    /// [`Error::NonexistentLocalTime`] if either midnight falls in a DST gap
    /// that cannot be resolved, [`Error::DateOutOfRange`] at the end of
    /// chrono's calendar.
    pub fn local_day(date: NaiveDate, zone: Tz) -> Result<Self> {
        let next = date.succ_opt().ok_or(Error::DateOutOfRange(date))?;
        Ok(Self {
            start: local_midnight(date, zone)?,
            end: local_midnight(next, zone)?,
        })
    }

    /// The local day following this one, if this is a local day.
    pub fn next_day(&self) -> Result<Self> {
        let date = self.start.date_naive();
        let next = date.succ_opt().ok_or(Error::DateOutOfRange(date))?;
        Self::local_day(next, self.start.timezone())
    }

    #[inline]
    pub fn duration(&self) -> Duration {
        self.end.signed_duration_since(self.start)
    }

    /// Length in fractional hours.
    pub fn duration_hours(&self) -> f64 {
        hours_between(self.start, self.end)
    }

    /// Whole hours in the window, rounded down.
    pub fn whole_hours(&self) -> i64 {
        self.duration().num_hours()
    }

    #[inline]
    pub fn contains(&self, instant: &DateTime<Tz>) -> bool {
        self.start <= *instant && *instant < self.end
    }

    /// The overlapping part of two windows.
    ///
    /// Windows are half-open: if one ends exactly when the other starts the
    /// intersection is empty and `None` is returned.
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (start < end).then_some(Self::new(start, end))
    }
}

impl fmt::Display for DayWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// Signed span from `from` to `to` in fractional hours.
pub(crate) fn hours_between<A: TimeZone, B: TimeZone>(from: DateTime<A>, to: DateTime<B>) -> f64 {
    const MILLIS_PER_HOUR: f64 = 3_600_000.0;
    to.with_timezone(&chrono::Utc)
        .signed_duration_since(from.with_timezone(&chrono::Utc))
        .num_milliseconds() as f64
        / MILLIS_PER_HOUR
}

/// Start of `date` in `zone`.
///
/// Ambiguous midnights take the earlier instant. A midnight swallowed by a
/// DST gap moves forward to the first existing time on the hour.
fn local_midnight(date: NaiveDate, zone: Tz) -> Result<DateTime<Tz>> {
    let midnight = date.and_time(NaiveTime::MIN);
    for shift in 0..=2 {
        match zone.from_local_datetime(&(midnight + Duration::hours(shift))) {
            LocalResult::Single(t) => return Ok(t),
            LocalResult::Ambiguous(earliest, _) => return Ok(earliest),
            LocalResult::None => continue,
        }
    }
    Err(Error::NonexistentLocalTime {
        date,
        zone: zone.name().to_string(),
    })
}
