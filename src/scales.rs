// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Day-count scale markers.
//!
//! | Marker | Description | Epoch (JD) |
//! |--------|-------------|------------|
//! | [`JD`] | Julian Date | 0.0 |
//! | [`DayNumber`] | Days since 1999-12-31T00:00 UT | 2 451 543.5 |
//!
//! [`DayNumber`] is the time argument of the Keplerian element polynomials in
//! [`crate::orbit`]; [`JD`] feeds the Julian-century solar series and the
//! lunar phase series.

use super::instant::TimeScale;
use qtty::Days;

/// Julian Date: the identity scale.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct JD;

impl TimeScale for JD {
    const LABEL: &'static str = "Julian Day:";

    #[inline(always)]
    fn to_jd(value: Days) -> Days {
        value
    }

    #[inline(always)]
    fn from_jd(jd: Days) -> Days {
        jd
    }
}

/// Continuous day number counted from 1999-12-31T00:00 UT (`d = JD − 2451543.5`).
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct DayNumber;

const DAY_NUMBER_EPOCH: Days = Days::new(2_451_543.5);

impl TimeScale for DayNumber {
    const LABEL: &'static str = "d";

    #[inline(always)]
    fn to_jd(value: Days) -> Days {
        value + DAY_NUMBER_EPOCH
    }

    #[inline(always)]
    fn from_jd(jd: Days) -> Days {
        jd - DAY_NUMBER_EPOCH
    }
}

impl From<super::instant::Time<JD>> for super::instant::Time<DayNumber> {
    #[inline]
    fn from(t: super::instant::Time<JD>) -> Self {
        t.to::<DayNumber>()
    }
}

impl From<super::instant::Time<DayNumber>> for super::instant::Time<JD> {
    #[inline]
    fn from(t: super::instant::Time<DayNumber>) -> Self {
        t.to::<JD>()
    }
}
