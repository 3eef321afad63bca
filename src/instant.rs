// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Scale-parameterised continuous day counts.
//!
//! [`Time<S>`] stores a scalar quantity in [`Days`] whose *meaning* is
//! determined by the compile-time marker `S: TimeScale`. The orbital and
//! solar formulas in this crate are all polynomials in some continuous day
//! count (Julian Date, days since the 2000 epoch, Julian centuries), so the
//! instants handed in by callers as `chrono::DateTime<Utc>` are converted to
//! a `Time<S>` once and the formulas read the scalar they need.
//!
//! The formulas are low precision, so UT is used directly as the dynamical
//! time: no ΔT correction is applied on the way in or out.

use chrono::{DateTime, Utc};
use qtty::*;
use std::marker::PhantomData;
use std::ops::{Add, Sub};

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Julian Date of the Unix epoch (1970-01-01T00:00:00Z).
pub(crate) const UNIX_EPOCH_JD: Days = Days::new(2_440_587.5);

// ═══════════════════════════════════════════════════════════════════════════
// TimeScale trait
// ═══════════════════════════════════════════════════════════════════════════

/// Marker trait for day-count scales.
///
/// A scale defines a human-readable label and the constant offset between
/// its native quantity and the absolute Julian Date.
pub trait TimeScale: Copy + Clone + std::fmt::Debug + PartialEq + PartialOrd + 'static {
    /// Display label used by [`Time`] formatting.
    const LABEL: &'static str;

    /// Convert a quantity in this scale to an absolute Julian Date.
    fn to_jd(value: Days) -> Days;

    /// Convert an absolute Julian Date back to this scale's native quantity.
    fn from_jd(jd: Days) -> Days;
}

// ═══════════════════════════════════════════════════════════════════════════
// Time<S>
// ═══════════════════════════════════════════════════════════════════════════

/// A point on day-count scale `S`.
///
/// Layout-identical to a single `f64`; `PhantomData` is zero-sized.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Time<S: TimeScale> {
    quantity: Days,
    _scale: PhantomData<S>,
}

impl<S: TimeScale> Time<S> {
    /// Create from a raw scalar (days since the scale's epoch).
    #[inline]
    pub const fn new(value: f64) -> Self {
        Self {
            quantity: Days::new(value),
            _scale: PhantomData,
        }
    }

    /// Create from a [`Days`] quantity.
    #[inline]
    pub const fn from_days(days: Days) -> Self {
        Self {
            quantity: days,
            _scale: PhantomData,
        }
    }

    /// The underlying quantity in days.
    #[inline]
    pub const fn quantity(&self) -> Days {
        self.quantity
    }

    /// The underlying scalar value in days.
    #[inline]
    pub const fn value(&self) -> f64 {
        self.quantity.value()
    }

    /// Absolute Julian Date corresponding to this instant.
    #[inline]
    pub fn julian_day(&self) -> Days {
        S::to_jd(self.quantity)
    }

    /// Build an instant from an absolute Julian Date.
    #[inline]
    pub fn from_julian_day(jd: Days) -> Self {
        Self::from_days(S::from_jd(jd))
    }

    /// Convert this instant to another scale.
    #[inline]
    pub fn to<T: TimeScale>(&self) -> Time<T> {
        Time::<T>::from_julian_day(S::to_jd(self.quantity))
    }

    /// Convert to a `chrono::DateTime<Utc>`.
    ///
    /// Returns `None` if the value falls outside chrono's representable range.
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        let seconds_since_epoch = (self.julian_day() - UNIX_EPOCH_JD).to::<Second>().value();
        if !seconds_since_epoch.is_finite() {
            return None;
        }
        let secs = seconds_since_epoch.floor() as i64;
        let nanos = ((seconds_since_epoch - secs as f64) * 1e9) as u32;
        DateTime::<Utc>::from_timestamp(secs, nanos.min(999_999_999))
    }

    /// Build an instant from a `chrono::DateTime<Utc>`.
    pub fn from_utc(datetime: DateTime<Utc>) -> Self {
        let seconds_since_epoch = Seconds::new(datetime.timestamp() as f64);
        let nanos = Seconds::new(datetime.timestamp_subsec_nanos() as f64 / 1e9);
        let jd = UNIX_EPOCH_JD + (seconds_since_epoch + nanos).to::<Day>();
        Self::from_julian_day(jd)
    }
}

impl<S: TimeScale> std::fmt::Display for Time<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", S::LABEL, self.quantity)
    }
}

#[cfg(feature = "serde")]
impl<S: TimeScale> Serialize for Time<S> {
    fn serialize<Ser>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error>
    where
        Ser: Serializer,
    {
        serializer.serialize_f64(self.value())
    }
}

#[cfg(feature = "serde")]
impl<'de, S: TimeScale> Deserialize<'de> for Time<S> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let v = f64::deserialize(deserializer)?;
        Ok(Self::new(v))
    }
}

impl<S: TimeScale> Add<Days> for Time<S> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Days) -> Self::Output {
        Self::from_days(self.quantity + rhs)
    }
}

impl<S: TimeScale> Sub<Days> for Time<S> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Days) -> Self::Output {
        Self::from_days(self.quantity - rhs)
    }
}

impl<S: TimeScale> Sub for Time<S> {
    type Output = Days;
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        self.quantity - rhs.quantity
    }
}

#[cfg(test)]
mod tests {
    use super::super::scales::{DayNumber, JD};
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn from_utc_j2000_noon() {
        let datetime = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
        let jd = Time::<JD>::from_utc(datetime);
        assert!((jd.value() - 2_451_545.0).abs() < 1e-9);
    }

    #[test]
    fn utc_roundtrip_is_stable() {
        let datetime = DateTime::from_timestamp(1_700_000_123, 250_000_000).unwrap();
        let jd = Time::<JD>::from_utc(datetime);
        let back = jd.to_utc().expect("to_utc");
        let delta_ns =
            back.timestamp_nanos_opt().unwrap() - datetime.timestamp_nanos_opt().unwrap();
        assert!(delta_ns.abs() < 100_000, "roundtrip error: {} ns", delta_ns);
    }

    #[test]
    fn day_number_epoch_is_new_years_eve_1999() {
        let datetime = Utc.with_ymd_and_hms(1999, 12, 31, 0, 0, 0).unwrap();
        let d = Time::<DayNumber>::from_utc(datetime);
        assert!(d.value().abs() < 1e-9);
    }

    #[test]
    fn day_number_matches_integer_formula() {
        // 1990-04-19 00:00 UT is day -3543 in the element formulas.
        let datetime = Utc.with_ymd_and_hms(1990, 4, 19, 0, 0, 0).unwrap();
        let d = Time::<DayNumber>::from_utc(datetime);
        assert!((d.value() + 3543.0).abs() < 1e-9);
    }

    #[test]
    fn arithmetic_with_days() {
        let jd = Time::<JD>::new(2_451_545.0);
        let later = jd + Days::new(1.5);
        assert_eq!(later.quantity(), Days::new(2_451_546.5));
        assert_eq!(later - jd, Days::new(1.5));
        assert_eq!((later - Days::new(0.5)).quantity(), Days::new(2_451_546.0));
    }

    #[test]
    fn non_finite_value_has_no_utc() {
        assert!(Time::<JD>::new(f64::NAN).to_utc().is_none());
    }

    #[test]
    fn display_uses_scale_label() {
        let jd = Time::<JD>::new(2_451_545.0);
        assert!(format!("{jd}").contains("Julian Day"));
    }
}
