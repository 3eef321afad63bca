// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Sunrise, sunset, twilight and golden hour.
//!
//! The Sun moves smoothly enough for the NOAA closed-form hour-angle
//! equation to replace the sampled search: for a zenith threshold `θ` the
//! Sun crosses it at `noon ∓ H` with
//!
//! ```text
//! cos H = cos θ / (cos φ · cos δ) − tan φ · tan δ
//! ```
//!
//! Each crossing is evaluated twice, the second time with the declination
//! and equation of time at the first estimate.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use qtty::Days;
use tracing::debug;

use crate::body::Body;
use crate::day::{BodyDay, RiseSetType, TwilightBand, TwilightType};
use crate::day_window::{hours_between, DayWindow};
use crate::error::{Error, Result};
use crate::instant::Time;
use crate::location::{GeoCoordinate, SEARCH_LATITUDE_LIMIT};
use crate::math::{acos_deg, cos_deg, sin_deg, tan_deg};
use crate::position::calc_position;
use crate::scales::JD;
use crate::solar::{declination, equation_of_time};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Zenith angle of the sunrise/sunset horizon: 90° plus refraction and the
/// solar semi-diameter.
const HORIZON_ZENITH: f64 = 90.833;

/// Optional solar altitude bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SunEvent {
    /// Sun 6° below the horizon.
    Civil,
    /// Sun 12° below the horizon.
    Nautical,
    /// Sun 18° below the horizon.
    Astronomical,
    /// Sun 6° above the horizon.
    GoldenHour,
}

impl SunEvent {
    pub const ALL: [SunEvent; 4] = [
        SunEvent::Civil,
        SunEvent::Nautical,
        SunEvent::Astronomical,
        SunEvent::GoldenHour,
    ];

    /// Zenith angle of the band's threshold.
    pub const fn zenith(self) -> f64 {
        match self {
            SunEvent::Civil => 96.0,
            SunEvent::Nautical => 102.0,
            SunEvent::Astronomical => 108.0,
            SunEvent::GoldenHour => 84.0,
        }
    }
}

/// The Sun's day: rise, set and solar noon plus the requested bands.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SunDay {
    pub day: BodyDay,
    pub civil: Option<TwilightBand>,
    pub nautical: Option<TwilightBand>,
    pub astronomical: Option<TwilightBand>,
    pub golden_hour: Option<TwilightBand>,
}

/// Solar events of one local day.
///
/// Sunrise, sunset and solar noon are always computed; `events` selects the
/// extra bands. Bands that were not requested are `None`.
pub fn calc_sun_day(
    location: &GeoCoordinate,
    date: NaiveDate,
    zone: Tz,
    events: &[SunEvent],
) -> Result<SunDay> {
    let today = DayWindow::local_day(date, zone)?;
    let solver = SunSolver {
        latitude: location.clamped_latitude(SEARCH_LATITUDE_LIMIT),
        longitude: location.longitude().value(),
        date_jd: Time::<JD>::from_calendar_date(date),
        today,
    };
    debug!(%date, zone = zone.name(), bands = events.len(), "sun day");

    let noon = solver.solar_noon().ok_or(Error::DateOutOfRange(date))?;
    let horizon = solver.band(HORIZON_ZENITH, noon);

    let noon_position = calc_position(Body::Sun, location, noon);
    let position_of = |t: DateTime<Tz>| calc_position(Body::Sun, location, t.with_timezone(&Utc));

    let rise_set_type = match (horizon.dawn, horizon.dusk) {
        (None, None) => match horizon.kind {
            TwilightType::Light => RiseSetType::Risen,
            TwilightType::Dark => RiseSetType::Set,
        },
        _ => RiseSetType::Normal,
    };
    let noon_local = noon.with_timezone(&zone);
    let day = BodyDay {
        rise: horizon.dawn,
        set: horizon.dusk,
        rise_azimuth: horizon.dawn.map(|t| position_of(t).azimuth),
        set_azimuth: horizon.dusk.map(|t| position_of(t).azimuth),
        transit: today.contains(&noon_local).then_some(noon_local),
        transit_elevation: today
            .contains(&noon_local)
            .then_some(noon_position.elevation),
        rise_set_type,
        uptime_hours: horizon.duration_hours,
    };

    let band = |event: SunEvent| {
        events
            .contains(&event)
            .then(|| solver.band(event.zenith(), noon))
    };
    Ok(SunDay {
        day,
        civil: band(SunEvent::Civil),
        nautical: band(SunEvent::Nautical),
        astronomical: band(SunEvent::Astronomical),
        golden_hour: band(SunEvent::GoldenHour),
    })
}

/// Which side of solar noon a crossing is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Morning,
    Evening,
}

struct SunSolver {
    latitude: f64,
    longitude: f64,
    /// Julian Date of 0h UT on the requested calendar date.
    date_jd: Time<JD>,
    today: DayWindow,
}

impl SunSolver {
    fn centuries(&self, jd: Time<JD>, minutes: f64) -> f64 {
        (jd + Days::new(minutes / 1440.0)).julian_centuries().value()
    }

    /// Solar noon in minutes after 0h UT of `jd`.
    fn noon_minutes(&self, jd: Time<JD>) -> f64 {
        let rough = 720.0 - 4.0 * self.longitude;
        let first = rough - equation_of_time(self.centuries(jd, rough));
        720.0 - 4.0 * self.longitude - equation_of_time(self.centuries(jd, first))
    }

    /// Solar noon on the local day, falling back to the one nearest the
    /// requested UT date.
    fn solar_noon(&self) -> Option<DateTime<Utc>> {
        let zone = self.today.start.timezone();
        let candidates = [0.0, -1.0, 1.0].map(|shift| {
            let jd = self.date_jd + Days::new(shift);
            utc_at(jd, self.noon_minutes(jd))
        });
        candidates
            .iter()
            .flatten()
            .find(|noon| self.today.contains(&noon.with_timezone(&zone)))
            .copied()
            .or(candidates[0])
    }

    /// Hour angle (degrees) of the crossing of `zenith` at `t` centuries, or
    /// `None` if the Sun does not reach it that day.
    fn hour_angle(&self, zenith: f64, t: f64) -> Option<f64> {
        let dec = declination(t);
        let arg = cos_deg(zenith) / (cos_deg(self.latitude) * cos_deg(dec))
            - tan_deg(self.latitude) * tan_deg(dec);
        (-1.0..=1.0).contains(&arg).then(|| acos_deg(arg))
    }

    /// Minutes after 0h UT of `jd` of one crossing.
    fn crossing_minutes(&self, jd: Time<JD>, zenith: f64, side: Side) -> Option<f64> {
        let at = |minutes: f64| -> Option<f64> {
            let t = self.centuries(jd, minutes);
            let h = self.hour_angle(zenith, t)?;
            let h = match side {
                Side::Morning => h,
                Side::Evening => -h,
            };
            Some(720.0 - 4.0 * (self.longitude + h) - equation_of_time(t))
        };
        let first = at(self.noon_minutes(jd))?;
        at(first)
    }

    /// The crossing on `side` that falls on the local day, trying the UT
    /// dates either side of the requested one when the zone offset pushes it
    /// across.
    fn crossing(&self, zenith: f64, side: Side) -> Option<DateTime<Tz>> {
        let zone = self.today.start.timezone();
        [0.0, -1.0, 1.0].into_iter().find_map(|shift| {
            let jd = self.date_jd + Days::new(shift);
            let minutes = self.crossing_minutes(jd, zenith, side)?;
            let local = utc_at(jd, minutes)?.with_timezone(&zone);
            self.today.contains(&local).then_some(local)
        })
    }

    fn band(&self, zenith: f64, noon: DateTime<Utc>) -> TwilightBand {
        let dawn = self.crossing(zenith, Side::Morning);
        let dusk = self.crossing(zenith, Side::Evening);

        let noon_t = Time::<JD>::from_utc(noon).julian_centuries().value();
        let dec = declination(noon_t);
        let sin_noon_elevation =
            sin_deg(self.latitude) * sin_deg(dec) + cos_deg(self.latitude) * cos_deg(dec);
        let kind = if sin_noon_elevation > cos_deg(zenith) {
            TwilightType::Light
        } else {
            TwilightType::Dark
        };

        let (start, end) = (self.today.start, self.today.end);
        let duration_hours = match (dawn, dusk) {
            (Some(d), Some(e)) if d < e => hours_between(d, e),
            // Dusk before dawn: lit at both ends of the day.
            (Some(d), Some(e)) => hours_between(start, e) + hours_between(d, end),
            (Some(d), None) => hours_between(d, end),
            (None, Some(e)) => hours_between(start, e),
            (None, None) => match kind {
                TwilightType::Light => 24.0,
                TwilightType::Dark => 0.0,
            },
        };

        TwilightBand {
            dawn,
            dusk,
            kind,
            duration_hours: duration_hours.clamp(0.0, 24.0),
        }
    }
}

/// UTC instant `minutes` after 0h UT of `jd`.
fn utc_at(jd: Time<JD>, minutes: f64) -> Option<DateTime<Utc>> {
    (jd + Days::new(minutes / 1440.0)).to_utc()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use chrono::Timelike;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn equator_equinox_is_twelve_hours() {
        let location = GeoCoordinate::new(0.0, 0.0).unwrap();
        let sun = calc_sun_day(&location, date(2024, 3, 20), chrono_tz::UTC, &[]).unwrap();
        assert_eq!(sun.day.rise_set_type, RiseSetType::Normal);
        // Refraction and the solar disk add a few minutes.
        assert_abs_diff_eq!(sun.day.uptime_hours, 12.1, epsilon = 0.1);
        assert!(sun.civil.is_none());
        let rise = sun.day.rise.unwrap();
        assert_eq!(rise.hour(), 6);
    }

    #[test]
    fn sunrise_sits_on_the_apparent_horizon() {
        let location = GeoCoordinate::new(0.0, 0.0).unwrap();
        let sun = calc_sun_day(&location, date(2024, 3, 20), chrono_tz::UTC, &[]).unwrap();
        for t in [sun.day.rise, sun.day.set].into_iter().flatten() {
            let p = calc_position(Body::Sun, &location, t.with_timezone(&Utc));
            // Geometric −0.833° plus ~0.4° refraction.
            assert_abs_diff_eq!(p.elevation.value(), -0.44, epsilon = 0.2);
        }
        let rise_az = sun.day.rise_azimuth.unwrap().value();
        let set_az = sun.day.set_azimuth.unwrap().value();
        assert_abs_diff_eq!(rise_az, 90.0, epsilon = 1.0);
        assert_abs_diff_eq!(set_az, 270.0, epsilon = 1.0);
    }

    #[test]
    fn midnight_sun_is_risen() {
        let location = GeoCoordinate::new(70.0, 25.0).unwrap();
        let sun =
            calc_sun_day(&location, date(2024, 6, 21), chrono_tz::Europe::Oslo, &SunEvent::ALL)
                .unwrap();
        assert_eq!(sun.day.rise_set_type, RiseSetType::Risen);
        assert_eq!(sun.day.uptime_hours, 24.0);
        let civil = sun.civil.unwrap();
        assert_eq!(civil.kind, TwilightType::Light);
        assert!(civil.dawn.is_none() && civil.dusk.is_none());
        // The golden-hour threshold is crossed even under the midnight sun.
        let golden = sun.golden_hour.unwrap();
        assert!(golden.golden_hour_end().is_some() && golden.golden_hour_start().is_some());
    }

    #[test]
    fn polar_night_is_dark() {
        let location = GeoCoordinate::new(78.2, 15.6).unwrap();
        let sun = calc_sun_day(
            &location,
            date(2024, 12, 21),
            chrono_tz::Arctic::Longyearbyen,
            &[SunEvent::Civil, SunEvent::Astronomical],
        )
        .unwrap();
        assert_eq!(sun.day.rise_set_type, RiseSetType::Set);
        assert_eq!(sun.day.uptime_hours, 0.0);
        let civil = sun.civil.unwrap();
        assert_eq!(civil.kind, TwilightType::Dark);
        assert_eq!(civil.duration_hours, 0.0);
        assert!(sun.nautical.is_none());
        // Still inside astronomical twilight at noon.
        let astro = sun.astronomical.unwrap();
        assert!(astro.dawn.is_some() && astro.dusk.is_some());
    }

    #[test]
    fn bands_nest_in_time() {
        let location = GeoCoordinate::new(41.39, 2.17).unwrap();
        let sun = calc_sun_day(
            &location,
            date(2024, 10, 15),
            chrono_tz::Europe::Madrid,
            &SunEvent::ALL,
        )
        .unwrap();
        let astro = sun.astronomical.unwrap().dawn.unwrap();
        let nautical = sun.nautical.unwrap().dawn.unwrap();
        let civil = sun.civil.unwrap().dawn.unwrap();
        let rise = sun.day.rise.unwrap();
        let golden = sun.golden_hour.unwrap().golden_hour_end().unwrap();
        assert!(astro < nautical && nautical < civil && civil < rise && rise < golden);

        let transit = sun.day.transit.unwrap();
        assert!(rise < transit && transit < sun.day.set.unwrap());
    }

    #[test]
    fn events_far_from_utc_stay_on_the_local_day() {
        let location = GeoCoordinate::new(-36.85, 174.76).unwrap();
        let zone = chrono_tz::Pacific::Auckland;
        let day = date(2024, 1, 10);
        let sun = calc_sun_day(&location, day, zone, &[SunEvent::Civil]).unwrap();
        for t in [sun.day.rise, sun.day.set, sun.day.transit].into_iter().flatten() {
            assert_eq!(t.date_naive(), day);
        }
        assert!(sun.day.rise.is_some() && sun.day.set.is_some() && sun.day.transit.is_some());
        let civil = sun.civil.unwrap();
        assert!(civil.dawn.unwrap() < sun.day.rise.unwrap());
    }
}
