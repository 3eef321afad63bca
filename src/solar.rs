// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! NOAA low-precision solar series.
//!
//! All series take `t`, Julian centuries since J2000.0, and return degrees
//! unless noted. The equation of time is in minutes.

use crate::instant::Time;
use crate::math::{acos_deg, asin_deg, cos_deg, normalize_degrees, sin_deg, tan_deg};
use crate::scales::JD;
use crate::transforms::{obliquity, refraction_correction};

fn mean_longitude(t: f64) -> f64 {
    normalize_degrees(280.46646 + t * (36000.76983 + t * 0.0003032))
}

fn mean_anomaly(t: f64) -> f64 {
    357.52911 + t * (35999.05029 - t * 0.0001537)
}

fn eccentricity(t: f64) -> f64 {
    0.016708634 - t * (0.000042037 + t * 0.0000001267)
}

fn equation_of_center(t: f64) -> f64 {
    let m = mean_anomaly(t);
    sin_deg(m) * (1.914602 - t * (0.004817 + t * 0.000014))
        + sin_deg(2.0 * m) * (0.019993 - t * 0.000101)
        + sin_deg(3.0 * m) * 0.000289
}

fn apparent_longitude(t: f64) -> f64 {
    let omega = 125.04 - 1934.136 * t;
    mean_longitude(t) + equation_of_center(t) - 0.00569 - 0.00478 * sin_deg(omega)
}

/// Solar declination.
pub fn declination(t: f64) -> f64 {
    asin_deg(sin_deg(obliquity(t)) * sin_deg(apparent_longitude(t)))
}

/// Equation of time in minutes (apparent minus mean solar time).
pub fn equation_of_time(t: f64) -> f64 {
    let l0 = mean_longitude(t);
    let e = eccentricity(t);
    let m = mean_anomaly(t);
    let y = tan_deg(obliquity(t) / 2.0).powi(2);

    let eq = y * sin_deg(2.0 * l0) - 2.0 * e * sin_deg(m)
        + 4.0 * e * y * sin_deg(m) * cos_deg(2.0 * l0)
        - 0.5 * y * y * sin_deg(4.0 * l0)
        - 1.25 * e * e * sin_deg(2.0 * m);
    4.0 * eq.to_degrees()
}

/// Apparent solar azimuth and elevation (degrees) at `jd` for an observer at
/// `latitude`/`longitude` (east positive). The latitude should already be
/// clamped away from the poles.
pub fn azimuth_elevation(jd: Time<JD>, latitude: f64, longitude: f64) -> (f64, f64) {
    let t = jd.julian_centuries().value();
    let eq_time = equation_of_time(t);
    let dec = declination(t);

    let day_fraction = jd.value() + 0.5 - (jd.value() + 0.5).floor();
    let minutes = day_fraction * 1440.0;
    let true_solar_time = (minutes + eq_time + 4.0 * longitude).rem_euclid(1440.0);
    let hour_angle = true_solar_time / 4.0 - 180.0;

    let cos_zenith =
        sin_deg(latitude) * sin_deg(dec) + cos_deg(latitude) * cos_deg(dec) * cos_deg(hour_angle);
    let zenith = acos_deg(cos_zenith);

    let denom = cos_deg(latitude) * sin_deg(zenith);
    let azimuth = if denom.abs() > 0.001 {
        let az = 180.0 - acos_deg((sin_deg(latitude) * cos_deg(zenith) - sin_deg(dec)) / denom);
        let az = if hour_angle > 0.0 { -az } else { az };
        normalize_degrees(az)
    } else if latitude > 0.0 {
        180.0
    } else {
        0.0
    };

    let elevation = 90.0 - zenith;
    (azimuth, elevation + refraction_correction(elevation))
}
