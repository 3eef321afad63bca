// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Instantaneous apparent position of a body.
//!
//! The Sun goes through the NOAA series in [`crate::solar`]. The Moon and the
//! planets go through the element model in [`crate::orbit`] and the frame
//! chain in [`crate::transforms`]; only the Moon gets a parallax correction.

use chrono::{DateTime, Utc};
use qtty::Degrees;

use crate::body::{Body, Planet};
use crate::config::SearchConfig;
use crate::instant::Time;
use crate::location::{GeoCoordinate, POSITION_LATITUDE_LIMIT};
use crate::orbit;
use crate::scales::{DayNumber, JD};
use crate::solar;
use crate::transforms::{
    ecliptic_to_equatorial, equatorial_from_rectangular, geo_to_topo, helio_to_geo,
    local_sidereal_time, obliquity_at, ra_dec_to_az_el, refraction_correction,
    spherical_to_rectangular, Horizontal,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Apparent horizontal position of a body at an instant.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Position {
    pub timestamp: DateTime<Utc>,
    /// Clockwise from true north, [0, 360).
    pub azimuth: Degrees,
    /// Apparent elevation above the horizon, refraction included.
    pub elevation: Degrees,
}

/// Position of `body` seen from `location` at `instant`.
pub fn calc_position(body: Body, location: &GeoCoordinate, instant: DateTime<Utc>) -> Position {
    calc_position_with(body, location, instant, &SearchConfig::default())
}

/// [`calc_position`] with explicit iteration limits.
pub fn calc_position_with(
    body: Body,
    location: &GeoCoordinate,
    instant: DateTime<Utc>,
    config: &SearchConfig,
) -> Position {
    let latitude = location.clamped_latitude(POSITION_LATITUDE_LIMIT);
    let longitude = location.longitude().value();
    let jd = Time::<JD>::from_utc(instant);

    let (azimuth, elevation) = match (body, body.planet()) {
        (Body::Sun, _) => solar::azimuth_elevation(jd, latitude, longitude),
        (_, Some(planet)) => {
            apparent(planet_horizontal(planet, jd.to(), latitude, longitude, config))
        }
        (Body::Moon, _) | (_, None) => {
            apparent(moon_horizontal(jd.to(), latitude, longitude, config))
        }
    };

    Position {
        timestamp: instant,
        azimuth: Degrees::new(azimuth),
        elevation: Degrees::new(elevation),
    }
}

fn apparent(h: Horizontal) -> (f64, f64) {
    (h.azimuth, h.elevation + refraction_correction(h.elevation))
}

fn moon_horizontal(
    d: Time<DayNumber>,
    latitude: f64,
    longitude: f64,
    config: &SearchConfig,
) -> Horizontal {
    let ecliptic = spherical_to_rectangular(orbit::moon_ecliptic(d, config));
    let geocentric = equatorial_from_rectangular(ecliptic_to_equatorial(ecliptic, obliquity_at(d)));
    let lst = local_sidereal_time(d, longitude);
    let topocentric = geo_to_topo(geocentric, latitude, lst);
    ra_dec_to_az_el(topocentric.ra, topocentric.dec, latitude, lst)
}

fn planet_horizontal(
    planet: Planet,
    d: Time<DayNumber>,
    latitude: f64,
    longitude: f64,
    config: &SearchConfig,
) -> Horizontal {
    let geocentric = helio_to_geo(orbit::planet_heliocentric(planet, d, config), d);
    let eq = equatorial_from_rectangular(ecliptic_to_equatorial(geocentric, obliquity_at(d)));
    ra_dec_to_az_el(eq.ra, eq.dec, latitude, local_sidereal_time(d, longitude))
}
