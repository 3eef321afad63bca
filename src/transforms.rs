// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Coordinate-frame transforms.
//!
//! Pure functions over rectangular triples and spherical coordinates, all
//! angles in degrees. The chain used for the Moon and the planets is
//!
//! ```text
//! orbital plane → ecliptic (helio) → ecliptic (geo) → equatorial
//!               → topocentric (Moon only) → horizontal → + refraction
//! ```
//!
//! Formulas follow P. Schlyter, *How to compute planetary positions*, and the
//! NOAA solar calculator for obliquity and refraction.

use crate::instant::Time;
use crate::math::{
    asin_deg, atan2_deg, atan_deg, cos_deg, normalize_degrees, normalize_hours, sin_deg, tan_deg,
};
use crate::orbit;
use crate::scales::{DayNumber, JD};

/// Rectangular coordinates `[x, y, z]`.
pub type Vector3 = [f64; 3];

/// Spherical coordinates: distance, longitude in [0, 360) and latitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spherical {
    pub r: f64,
    pub lon: f64,
    pub lat: f64,
}

/// Equatorial coordinates: right ascension and declination in degrees, and
/// distance in the unit of the source vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Equatorial {
    pub ra: f64,
    pub dec: f64,
    pub distance: f64,
}

/// Horizontal coordinates: azimuth clockwise from north in [0, 360) and
/// geometric (unrefracted) elevation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Horizontal {
    pub azimuth: f64,
    pub elevation: f64,
}

pub fn rectangular_to_spherical([x, y, z]: Vector3) -> Spherical {
    Spherical {
        r: (x * x + y * y + z * z).sqrt(),
        lon: normalize_degrees(atan2_deg(y, x)),
        lat: atan2_deg(z, (x * x + y * y).sqrt()),
    }
}

pub fn spherical_to_rectangular(s: Spherical) -> Vector3 {
    [
        s.r * cos_deg(s.lon) * cos_deg(s.lat),
        s.r * sin_deg(s.lon) * cos_deg(s.lat),
        s.r * sin_deg(s.lat),
    ]
}

/// Obliquity of the ecliptic for `t` Julian centuries since J2000.0: the
/// mean obliquity polynomial plus the leading nutation term in the node.
pub fn obliquity(t: f64) -> f64 {
    let seconds = 21.448 - t * (46.815 + t * (0.00059 - t * 0.001813));
    let mean = 23.0 + (26.0 + seconds / 60.0) / 60.0;
    let omega = 125.04 - 1934.136 * t;
    mean + 0.00256 * cos_deg(omega)
}

/// Obliquity at a day number.
pub fn obliquity_at(d: Time<DayNumber>) -> f64 {
    obliquity(d.to::<JD>().julian_centuries().value())
}

/// Rotate an ecliptic vector about the x axis into the equatorial frame.
pub fn ecliptic_to_equatorial([x, y, z]: Vector3, obliquity: f64) -> Vector3 {
    let (s, c) = (sin_deg(obliquity), cos_deg(obliquity));
    [x, y * c - z * s, y * s + z * c]
}

/// Equatorial vector to right ascension / declination.
pub fn equatorial_from_rectangular(v: Vector3) -> Equatorial {
    let s = rectangular_to_spherical(v);
    Equatorial {
        ra: s.lon,
        dec: s.lat,
        distance: s.r,
    }
}

/// Translate a heliocentric ecliptic vector (AU) to geocentric by adding the
/// Sun's geocentric position at day number `d`.
pub fn helio_to_geo([x, y, z]: Vector3, d: Time<DayNumber>) -> Vector3 {
    let [xs, ys, zs] = orbit::sun_rectangular(d);
    [x + xs, y + ys, z + zs]
}

/// Local sidereal time in hours, [0, 24).
///
/// GMST0 is taken from the Sun's mean longitude, and the UT hours are the
/// fractional part of the day number (its epoch is at 0h UT).
pub fn local_sidereal_time(d: Time<DayNumber>, longitude: f64) -> f64 {
    let dv = d.value();
    let ut_hours = (dv - dv.floor()) * 24.0;
    let gmst0 = normalize_degrees(orbit::sun_mean_longitude(d) + 180.0) / 15.0;
    normalize_hours(gmst0 + ut_hours + longitude / 15.0)
}

/// Diurnal parallax correction.
///
/// `eq.distance` must be in Earth radii. Uses the geocentric latitude and the
/// flattening-adjusted distance from the Earth's centre `rho`.
pub fn geo_to_topo(eq: Equatorial, latitude: f64, lst_hours: f64) -> Equatorial {
    let parallax = asin_deg(1.0 / eq.distance);
    let gclat = latitude - 0.1924 * sin_deg(2.0 * latitude);
    let rho = 0.99833 + 0.00167 * cos_deg(2.0 * latitude);
    let ha = normalize_degrees(lst_hours * 15.0 - eq.ra);

    let ra = eq.ra - parallax * rho * cos_deg(gclat) * sin_deg(ha) / cos_deg(eq.dec);
    let dec = if gclat.abs() < 1e-9 {
        eq.dec - parallax * rho * sin_deg(-eq.dec) * cos_deg(ha)
    } else {
        let g = atan_deg(tan_deg(gclat) / cos_deg(ha));
        eq.dec - parallax * rho * sin_deg(gclat) * sin_deg(g - eq.dec) / sin_deg(g)
    };
    Equatorial {
        ra: normalize_degrees(ra),
        dec,
        distance: eq.distance,
    }
}

/// Equatorial to horizontal coordinates for an observer at `latitude` with
/// local sidereal time `lst_hours`.
pub fn ra_dec_to_az_el(ra: f64, dec: f64, latitude: f64, lst_hours: f64) -> Horizontal {
    let ha = normalize_degrees(lst_hours * 15.0 - ra);
    let x = cos_deg(ha) * cos_deg(dec);
    let y = sin_deg(ha) * cos_deg(dec);
    let z = sin_deg(dec);

    let x_hor = x * sin_deg(latitude) - z * cos_deg(latitude);
    let z_hor = x * cos_deg(latitude) + z * sin_deg(latitude);

    Horizontal {
        azimuth: normalize_degrees(atan2_deg(y, x_hor) + 180.0),
        elevation: asin_deg(z_hor),
    }
}

/// Atmospheric refraction in degrees, to be added to a true elevation.
pub fn refraction_correction(elevation: f64) -> f64 {
    if elevation > 85.0 {
        return 0.0;
    }
    let te = tan_deg(elevation);
    let arcsec = if elevation > 5.0 {
        58.1 / te - 0.07 / te.powi(3) + 0.000086 / te.powi(5)
    } else if elevation > -0.575 {
        1735.0
            + elevation * (-518.2 + elevation * (103.4 + elevation * (-12.79 + elevation * 0.711)))
    } else {
        -20.774 / te
    };
    arcsec / 3600.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn spherical_roundtrip() {
        let s = Spherical {
            r: 2.5,
            lon: 300.0,
            lat: -12.0,
        };
        let back = rectangular_to_spherical(spherical_to_rectangular(s));
        assert_abs_diff_eq!(back.r, s.r, epsilon = 1e-12);
        assert_abs_diff_eq!(back.lon, s.lon, epsilon = 1e-9);
        assert_abs_diff_eq!(back.lat, s.lat, epsilon = 1e-9);
    }

    #[test]
    fn obliquity_near_j2000() {
        // Mean 23.4393°, the node term adds up to ±0.00256°.
        assert_abs_diff_eq!(obliquity(0.0), 23.4393, epsilon = 0.003);
    }

    #[test]
    fn equinox_point_is_fixed_by_rotation() {
        let v = ecliptic_to_equatorial([1.0, 0.0, 0.0], 23.44);
        assert_abs_diff_eq!(v[0], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(v[1], 0.0, epsilon = 1e-12);
        // The solstice point lands on declination = obliquity.
        let eq = equatorial_from_rectangular(ecliptic_to_equatorial([0.0, 1.0, 0.0], 23.44));
        assert_abs_diff_eq!(eq.ra, 90.0, epsilon = 1e-9);
        assert_abs_diff_eq!(eq.dec, 23.44, epsilon = 1e-9);
    }

    #[test]
    fn body_on_meridian_faces_south() {
        // Hour angle 0, declination below the observer's latitude.
        let h = ra_dec_to_az_el(100.0, 10.0, 50.0, 100.0 / 15.0);
        assert_abs_diff_eq!(h.azimuth, 180.0, epsilon = 1e-9);
        assert_abs_diff_eq!(h.elevation, 50.0, epsilon = 1e-9);
    }

    #[test]
    fn rising_body_is_in_the_east() {
        // Hour angle −90° on the equator: on the eastern horizon.
        let h = ra_dec_to_az_el(90.0, 0.0, 0.0, 0.0);
        assert_abs_diff_eq!(h.azimuth, 90.0, epsilon = 1e-9);
        assert_abs_diff_eq!(h.elevation, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn refraction_branches() {
        assert_eq!(refraction_correction(89.0), 0.0);
        // Roughly 34' at the horizon, about 1' at 45°.
        assert_abs_diff_eq!(refraction_correction(0.0), 1735.0 / 3600.0, epsilon = 1e-12);
        assert_abs_diff_eq!(refraction_correction(45.0) * 60.0, 0.97, epsilon = 0.02);
        assert!(refraction_correction(-2.0) > 0.0);
        // The branches meet closely at the 5° boundary.
        let below = refraction_correction(5.0);
        let above = refraction_correction(5.000_001);
        assert!((below - above).abs() < 0.01, "{below} vs {above}");
    }

    #[test]
    fn parallax_lowers_the_moon() {
        let eq = Equatorial {
            ra: 0.0,
            dec: 0.0,
            distance: 60.0,
        };
        // Moon on the meridian seen from 45°N: topocentric declination drops.
        let topo = geo_to_topo(eq, 45.0, 0.0);
        assert!(topo.dec < eq.dec);
        assert!((topo.dec - eq.dec).abs() < 1.0);
        // Equator special case stays finite.
        let equator = geo_to_topo(eq, 0.0, 3.0);
        assert!(equator.dec.is_finite());
    }

    #[test]
    fn sidereal_time_at_j2000() {
        // GMST at 2000-01-01 12:00 UT ≈ 18.697 h.
        let d = Time::<DayNumber>::new(1.5);
        assert_abs_diff_eq!(local_sidereal_time(d, 0.0), 18.697, epsilon = 0.01);
        let east = local_sidereal_time(d, 15.0);
        assert_abs_diff_eq!(east, 19.697, epsilon = 0.01);
    }
}
