// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Julian Date (`Time<JD>`) specific extensions.

use chrono::{Datelike, NaiveDate};
use qtty::*;

use super::instant::Time;
use super::scales::JD;

impl Time<JD> {
    /// J2000.0 epoch: 2000-01-01T12:00:00 (JD 2 451 545.0).
    pub const J2000: Self = Self::new(2_451_545.0);

    /// One Julian century expressed in days.
    pub const JULIAN_CENTURY: Days = Days::new(36_525.0);

    /// Julian centuries since J2000.0 (argument of the solar series and the
    /// obliquity polynomial).
    #[inline]
    pub fn julian_centuries(&self) -> Centuries {
        Centuries::new((*self - Self::J2000).value() / Self::JULIAN_CENTURY.value())
    }

    /// Inverse of [`Self::julian_centuries`].
    #[inline]
    pub fn from_julian_centuries(t: Centuries) -> Self {
        Self::J2000 + Days::new(t.value() * Self::JULIAN_CENTURY.value())
    }

    /// Julian Date of 0h UT on a Gregorian calendar date.
    ///
    /// Meeus, *Astronomical Algorithms* ch. 7.
    pub fn from_calendar_date(date: NaiveDate) -> Self {
        let (mut year, mut month) = (date.year() as f64, date.month() as f64);
        if month <= 2.0 {
            year -= 1.0;
            month += 12.0;
        }
        let a = (year / 100.0).floor();
        let b = 2.0 - a + (a / 4.0).floor();
        Self::new(
            (365.25 * (year + 4716.0)).floor() + (30.6001 * (month + 1.0)).floor()
                + date.day() as f64
                + b
                - 1524.5,
        )
    }
}
