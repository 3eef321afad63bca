// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Rise, set and transit search for any body.
//!
//! The body's apparent elevation is sampled on the hour from local midnight
//! through the end of the following local day. A sign change between two
//! samples brackets a horizon crossing, which is refined to the minute. A
//! move between the eastern `[0°, 180°)` and western `[180°, 360°)` azimuth
//! sectors brackets a meridian passage, which is refined by bisection.
//!
//! All arithmetic is on immutable instants plus `chrono::Duration` offsets.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use chrono_tz::Tz;
use qtty::Degrees;
use tracing::{debug, trace};

use crate::body::Body;
use crate::config::SearchConfig;
use crate::day::{BodyDay, RiseSetType};
use crate::day_window::{hours_between, DayWindow};
use crate::error::Result;
use crate::location::{GeoCoordinate, SEARCH_LATITUDE_LIMIT};
use crate::position::{calc_position_with, Position};

/// A refined horizon crossing.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Crossing {
    at: DateTime<Utc>,
    rising: bool,
    azimuth: Degrees,
}

/// Evaluates one body from one place.
struct Tracker<'a> {
    body: Body,
    location: GeoCoordinate,
    config: &'a SearchConfig,
    correction: f64,
}

impl<'a> Tracker<'a> {
    fn new(body: Body, location: &GeoCoordinate, config: &'a SearchConfig) -> Self {
        let correction = match body {
            Body::Moon => config.moon_radius_correction.value(),
            _ => 0.0,
        };
        Self {
            body,
            location: location.clamped(SEARCH_LATITUDE_LIMIT),
            config,
            correction,
        }
    }

    fn position(&self, at: DateTime<Utc>) -> Position {
        calc_position_with(self.body, &self.location, at, self.config)
    }

    /// Elevation plus the disk correction; positive means up.
    fn altitude(&self, at: DateTime<Utc>) -> f64 {
        self.position(at).elevation.value() + self.correction
    }

    /// Refine a crossing bracketed by two hourly samples.
    ///
    /// Starts at the linearly interpolated minute, then walks one minute at a
    /// time towards the crossing until the sign flips, and keeps whichever of
    /// the last two minutes is closer to the horizon.
    fn refine_crossing(&self, t0: DateTime<Utc>, v0: f64, v1: f64) -> Crossing {
        let guess = (60.0 * v0 / (v0 - v1)).round().clamp(0.0, 60.0) as i64;
        let mut at = t0 + Duration::minutes(guess);
        let mut value = self.altitude(at);
        // Still on the starting side: the crossing is later.
        let step = if (value > 0.0) == (v0 > 0.0) {
            Duration::minutes(1)
        } else {
            Duration::minutes(-1)
        };

        for _ in 0..self.config.max_minute_steps {
            let next_at = at + step;
            let next_value = self.altitude(next_at);
            if (next_value > 0.0) != (value > 0.0) {
                if next_value.abs() < value.abs() {
                    at = next_at;
                }
                break;
            }
            at = next_at;
            value = next_value;
        }

        let crossing = Crossing {
            at,
            rising: v1 > v0,
            azimuth: self.position(at).azimuth,
        };
        trace!(body = %self.body, at = %crossing.at, rising = crossing.rising, "horizon crossing");
        crossing
    }

    /// Bisect a meridian passage bracketed by the samples at `t0` and
    /// `t0 + 1h`.
    fn refine_transit(&self, t0: DateTime<Utc>) -> Position {
        let resolution = Duration::milliseconds(
            (self.config.transit_resolution.value() * 1000.0).round() as i64,
        );
        let mut step = Duration::minutes(i64::from(self.config.transit_initial_step_minutes));
        let mut forward = true;
        let mut at = t0;
        let mut east = is_east(self.position(at).azimuth);

        let mut depth = 0;
        while depth < self.config.max_transit_depth && step >= resolution {
            at = if forward { at + step } else { at - step };
            let now_east = is_east(self.position(at).azimuth);
            if now_east != east {
                forward = !forward;
                east = now_east;
            }
            step = step / 2;
            depth += 1;
        }
        self.position(at)
    }
}

#[inline]
fn is_east(azimuth: Degrees) -> bool {
    azimuth.value() < 180.0
}

/// Rise, set, transit and uptime of `body` on the local day `date`.
///
/// Transit search costs an extra bisection per meridian passage and can be
/// skipped with `want_transit = false`.
pub fn calc_day(
    body: Body,
    location: &GeoCoordinate,
    date: NaiveDate,
    zone: Tz,
    want_transit: bool,
) -> Result<BodyDay> {
    calc_day_with(body, location, date, zone, want_transit, &SearchConfig::default())
}

/// [`calc_day`] with explicit search limits.
pub fn calc_day_with(
    body: Body,
    location: &GeoCoordinate,
    date: NaiveDate,
    zone: Tz,
    want_transit: bool,
    config: &SearchConfig,
) -> Result<BodyDay> {
    let today = DayWindow::local_day(date, zone)?;
    let tomorrow = today.next_day()?;
    let tracker = Tracker::new(body, location, config);
    debug!(%body, %date, zone = zone.name(), "day search");

    let start = today.start.with_timezone(&Utc);
    let today_hours = today.whole_hours();
    let total_hours = today_hours + tomorrow.whole_hours();
    let (samples, crossings) = scan_horizon(&tracker, &today, start, today_hours, total_hours);

    let in_today = |c: &&Crossing| today.contains(&c.at.with_timezone(&zone));
    let rise = crossings.iter().filter(|c| c.rising).find(in_today).copied();
    let set = crossings.iter().filter(|c| !c.rising).find(in_today).copied();

    let mut day = match (rise, set) {
        (None, None) => {
            let noon = start + Duration::hours(12);
            let kind = if tracker.altitude(noon) > 0.0 {
                RiseSetType::Risen
            } else {
                RiseSetType::Set
            };
            BodyDay::without_crossing(kind)
        }
        _ => {
            let uptime_hours = match rise {
                Some(r) => {
                    let end = crossings
                        .iter()
                        .find(|c| !c.rising && c.at > r.at)
                        .map_or(tomorrow.end.with_timezone(&Utc), |c| c.at);
                    hours_between(r.at, end)
                }
                None => set.map_or(0.0, |s| hours_between(start, s.at)),
            };
            BodyDay {
                rise: rise.map(|c| c.at.with_timezone(&zone)),
                set: set.map(|c| c.at.with_timezone(&zone)),
                rise_azimuth: rise.map(|c| c.azimuth),
                set_azimuth: set.map(|c| c.azimuth),
                transit: None,
                transit_elevation: None,
                rise_set_type: RiseSetType::Normal,
                uptime_hours: uptime_hours.clamp(0.0, 24.0),
            }
        }
    };

    if want_transit {
        let transit = samples[..=today_hours as usize]
            .windows(2)
            .filter(|pair| is_east(pair[0].1.azimuth) != is_east(pair[1].1.azimuth))
            .filter_map(|pair| {
                let p = tracker.refine_transit(pair[0].0);
                // An upper culmination peaks above its bracketing samples; a
                // lower one dips below them.
                let bracket =
                    (pair[0].1.elevation.value() + pair[1].1.elevation.value()) / 2.0;
                (p.elevation.value() > bracket).then_some(p)
            })
            .filter(|p| today.contains(&p.timestamp.with_timezone(&zone)))
            .max_by(|a, b| a.elevation.value().total_cmp(&b.elevation.value()));
        if let Some(p) = transit {
            trace!(%body, at = %p.timestamp, elevation = p.elevation.value(), "transit");
            day.transit = Some(p.timestamp.with_timezone(&zone));
            day.transit_elevation = Some(p.elevation);
        }
    }

    debug!(
        %body,
        %date,
        rise_set_type = ?day.rise_set_type,
        uptime_hours = day.uptime_hours,
        "day search done"
    );
    Ok(day)
}

type Sample = (DateTime<Utc>, Position);

/// Hourly samples from `start` and the crossings between them.
///
/// Today's `today_hours + 1` samples are always taken. Samples from the next
/// day are only added while a rise inside today still waits for its set.
fn scan_horizon(
    tracker: &Tracker<'_>,
    today: &DayWindow,
    start: DateTime<Utc>,
    today_hours: i64,
    total_hours: i64,
) -> (Vec<Sample>, Vec<Crossing>) {
    let sample = |h: i64| {
        let at = start + Duration::hours(h);
        (at, tracker.position(at))
    };
    let mut samples: Vec<Sample> = (0..=today_hours).map(sample).collect();
    let mut crossings = Vec::new();

    for h in 0..total_hours {
        if h >= today_hours && !awaiting_set(&crossings, today) {
            break;
        }
        let i = h as usize;
        if i + 1 == samples.len() {
            samples.push(sample(h + 1));
        }
        let (t0, p0) = samples[i];
        let (_, p1) = samples[i + 1];
        let v0 = p0.elevation.value() + tracker.correction;
        let v1 = p1.elevation.value() + tracker.correction;
        if (v0 > 0.0) != (v1 > 0.0) {
            crossings.push(tracker.refine_crossing(t0, v0, v1));
        }
    }
    (samples, crossings)
}

/// The last crossing seen is a rise inside `today`, so its set is still due.
fn awaiting_set(crossings: &[Crossing], today: &DayWindow) -> bool {
    crossings.last().is_some_and(|c| {
        c.rising && c.at < today.end.with_timezone(&Utc) && c.at >= today.start.with_timezone(&Utc)
    })
}
