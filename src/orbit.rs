// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Keplerian element model for the Sun, the Moon and the planets.
//!
//! Every element is a linear function `base + rate · d` of the day number
//! `d` (see [`DayNumber`]). Angles are in degrees; the semi-major axis is in
//! AU for the planets and in Earth radii for the Moon.
//!
//! Element values and perturbation terms are those of P. Schlyter's
//! *How to compute planetary positions*.

use crate::body::Planet;
use crate::config::SearchConfig;
use crate::instant::Time;
use crate::math::{atan2_deg, cos_deg, normalize_degrees, sin_deg};
use crate::scales::DayNumber;
use crate::transforms::{rectangular_to_spherical, spherical_to_rectangular, Spherical, Vector3};

/// One orbital element as a linear function of the day number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Element {
    pub base: f64,
    pub rate: f64,
}

impl Element {
    pub const fn new(base: f64, rate: f64) -> Self {
        Self { base, rate }
    }

    /// A value that does not drift.
    pub const fn fixed(base: f64) -> Self {
        Self { base, rate: 0.0 }
    }

    #[inline]
    pub fn at(self, d: f64) -> f64 {
        self.base + self.rate * d
    }
}

/// The six elements of an orbit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalElements {
    /// Longitude of the ascending node `N`.
    pub node: Element,
    /// Inclination to the ecliptic `i`.
    pub inclination: Element,
    /// Argument of perihelion `w`.
    pub perihelion: Element,
    /// Semi-major axis `a`.
    pub semi_major_axis: Element,
    /// Eccentricity `e`.
    pub eccentricity: Element,
    /// Mean anomaly `M`.
    pub mean_anomaly: Element,
}

/// Elements evaluated at one instant, angles wrapped into [0, 360).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementsAt {
    pub node: f64,
    pub inclination: f64,
    pub perihelion: f64,
    pub semi_major_axis: f64,
    pub eccentricity: f64,
    pub mean_anomaly: f64,
}

impl OrbitalElements {
    pub fn at(&self, d: Time<DayNumber>) -> ElementsAt {
        let d = d.value();
        ElementsAt {
            node: normalize_degrees(self.node.at(d)),
            inclination: self.inclination.at(d),
            perihelion: normalize_degrees(self.perihelion.at(d)),
            semi_major_axis: self.semi_major_axis.at(d),
            eccentricity: self.eccentricity.at(d),
            mean_anomaly: normalize_degrees(self.mean_anomaly.at(d)),
        }
    }
}

/// The Sun's apparent orbit around the Earth.
pub const SUN: OrbitalElements = OrbitalElements {
    node: Element::fixed(0.0),
    inclination: Element::fixed(0.0),
    perihelion: Element::new(282.9404, 4.70935e-5),
    semi_major_axis: Element::fixed(1.0),
    eccentricity: Element::new(0.016709, -1.151e-9),
    mean_anomaly: Element::new(356.0470, 0.985_600_258_5),
};

/// The Moon's geocentric orbit; `a` is in Earth radii.
pub const MOON: OrbitalElements = OrbitalElements {
    node: Element::new(125.1228, -0.052_953_808_3),
    inclination: Element::fixed(5.1454),
    perihelion: Element::new(318.0634, 0.164_357_322_3),
    semi_major_axis: Element::fixed(60.2666),
    eccentricity: Element::fixed(0.054900),
    mean_anomaly: Element::new(115.3654, 13.064_992_950_9),
};

/// Heliocentric planetary elements, indexed by `Planet as usize`.
const PLANETS: [OrbitalElements; 7] = [
    // Mercury
    OrbitalElements {
        node: Element::new(48.3313, 3.24587e-5),
        inclination: Element::new(7.0047, 5.00e-8),
        perihelion: Element::new(29.1241, 1.01444e-5),
        semi_major_axis: Element::fixed(0.387098),
        eccentricity: Element::new(0.205635, 5.59e-10),
        mean_anomaly: Element::new(168.6562, 4.092_334_436_8),
    },
    // Venus
    OrbitalElements {
        node: Element::new(76.6799, 2.46590e-5),
        inclination: Element::new(3.3946, 2.75e-8),
        perihelion: Element::new(54.8910, 1.38374e-5),
        semi_major_axis: Element::fixed(0.723330),
        eccentricity: Element::new(0.006773, -1.302e-9),
        mean_anomaly: Element::new(48.0052, 1.602_130_224_4),
    },
    // Mars
    OrbitalElements {
        node: Element::new(49.5574, 2.11081e-5),
        inclination: Element::new(1.8497, -1.78e-8),
        perihelion: Element::new(286.5016, 2.92961e-5),
        semi_major_axis: Element::fixed(1.523688),
        eccentricity: Element::new(0.093405, 2.516e-9),
        mean_anomaly: Element::new(18.6021, 0.524_020_776_6),
    },
    // Jupiter
    OrbitalElements {
        node: Element::new(100.4542, 2.76854e-5),
        inclination: Element::new(1.3030, -1.557e-7),
        perihelion: Element::new(273.8777, 1.64505e-5),
        semi_major_axis: Element::fixed(5.20256),
        eccentricity: Element::new(0.048498, 4.469e-9),
        mean_anomaly: Element::new(19.8950, 0.083_085_300_1),
    },
    // Saturn
    OrbitalElements {
        node: Element::new(113.6634, 2.38980e-5),
        inclination: Element::new(2.4886, -1.081e-7),
        perihelion: Element::new(339.3939, 2.97661e-5),
        semi_major_axis: Element::fixed(9.55475),
        eccentricity: Element::new(0.055546, -9.499e-9),
        mean_anomaly: Element::new(316.9670, 0.033_444_228_2),
    },
    // Uranus
    OrbitalElements {
        node: Element::new(74.0005, 1.3978e-5),
        inclination: Element::new(0.7733, 1.9e-8),
        perihelion: Element::new(96.6612, 3.0565e-5),
        semi_major_axis: Element::new(19.18171, -1.55e-8),
        eccentricity: Element::new(0.047318, 7.45e-9),
        mean_anomaly: Element::new(142.5905, 0.011_725_806),
    },
    // Neptune
    OrbitalElements {
        node: Element::new(131.7806, 3.0173e-5),
        inclination: Element::new(1.7700, -2.55e-7),
        perihelion: Element::new(272.8461, -6.027e-6),
        semi_major_axis: Element::new(30.05826, 3.313e-8),
        eccentricity: Element::new(0.008606, 2.15e-9),
        mean_anomaly: Element::new(260.2471, 0.005_995_147),
    },
];

/// Element set of a planet.
#[inline]
pub fn planet_elements(planet: Planet) -> &'static OrbitalElements {
    &PLANETS[planet as usize]
}

/// Solve Kepler's equation `M = E − e·sin E` for the eccentric anomaly
/// (degrees), by Newton iteration from a second-order first guess.
///
/// Stops after `config.max_kepler_iterations` or once successive estimates
/// agree within `config.kepler_tolerance`; the last estimate is returned
/// either way.
pub fn solve_kepler(mean_anomaly: f64, eccentricity: f64, config: &SearchConfig) -> f64 {
    let (m, e) = (mean_anomaly, eccentricity);
    let e_deg = e.to_degrees();
    let mut anomaly = m + e_deg * sin_deg(m) * (1.0 + e * cos_deg(m));
    for _ in 0..config.max_kepler_iterations {
        let next = anomaly - (anomaly - e_deg * sin_deg(anomaly) - m) / (1.0 - e * cos_deg(anomaly));
        let delta = (next - anomaly).abs();
        anomaly = next;
        if delta < config.kepler_tolerance.value() {
            break;
        }
    }
    anomaly
}

/// True anomaly (degrees) and radius vector for an elliptic orbit.
fn true_anomaly_and_radius(elements: &ElementsAt, eccentric_anomaly: f64) -> (f64, f64) {
    let (a, e) = (elements.semi_major_axis, elements.eccentricity);
    let xv = a * (cos_deg(eccentric_anomaly) - e);
    let yv = a * (1.0 - e * e).sqrt() * sin_deg(eccentric_anomaly);
    (atan2_deg(yv, xv), (xv * xv + yv * yv).sqrt())
}

/// Ecliptic rectangular position of a body on the orbit `elements`, centred
/// on the primary and in units of the semi-major axis.
pub fn orbital_position(elements: &ElementsAt, config: &SearchConfig) -> Vector3 {
    let ecc = solve_kepler(elements.mean_anomaly, elements.eccentricity, config);
    let (v, r) = true_anomaly_and_radius(elements, ecc);

    let (n, i) = (elements.node, elements.inclination);
    let vw = v + elements.perihelion;
    [
        r * (cos_deg(n) * cos_deg(vw) - sin_deg(n) * sin_deg(vw) * cos_deg(i)),
        r * (sin_deg(n) * cos_deg(vw) + cos_deg(n) * sin_deg(vw) * cos_deg(i)),
        r * sin_deg(vw) * sin_deg(i),
    ]
}

/// Sun's mean longitude `M + w` (degrees, [0, 360)).
pub fn sun_mean_longitude(d: Time<DayNumber>) -> f64 {
    let sun = SUN.at(d);
    normalize_degrees(sun.mean_anomaly + sun.perihelion)
}

/// Geocentric ecliptic rectangular position of the Sun in AU.
///
/// The solar eccentricity is small enough for the closed-form first guess of
/// the eccentric anomaly to be used without iteration.
pub fn sun_rectangular(d: Time<DayNumber>) -> Vector3 {
    let sun = SUN.at(d);
    let (m, e) = (sun.mean_anomaly, sun.eccentricity);
    let ecc = m + e.to_degrees() * sin_deg(m) * (1.0 + e * cos_deg(m));
    let (v, r) = true_anomaly_and_radius(&sun, ecc);
    let lon = v + sun.perihelion;
    [r * cos_deg(lon), r * sin_deg(lon), 0.0]
}

/// Geocentric ecliptic coordinates of the Moon, perturbations applied.
/// Distance in Earth radii.
pub fn moon_ecliptic(d: Time<DayNumber>, config: &SearchConfig) -> Spherical {
    let moon = MOON.at(d);
    let sun = SUN.at(d);
    let mut pos = rectangular_to_spherical(orbital_position(&moon, config));

    let ms = sun.mean_anomaly;
    let mm = moon.mean_anomaly;
    let ls = sun.mean_anomaly + sun.perihelion;
    let lm = moon.mean_anomaly + moon.perihelion + moon.node;
    let dd = lm - ls;
    let f = lm - moon.node;

    pos.lon += -1.274 * sin_deg(mm - 2.0 * dd)
        + 0.658 * sin_deg(2.0 * dd)
        - 0.186 * sin_deg(ms)
        - 0.059 * sin_deg(2.0 * mm - 2.0 * dd)
        - 0.057 * sin_deg(mm - 2.0 * dd + ms)
        + 0.053 * sin_deg(mm + 2.0 * dd)
        + 0.046 * sin_deg(2.0 * dd - ms)
        + 0.041 * sin_deg(mm - ms)
        - 0.035 * sin_deg(dd)
        - 0.031 * sin_deg(mm + ms)
        - 0.015 * sin_deg(2.0 * f - 2.0 * dd)
        + 0.011 * sin_deg(mm - 4.0 * dd);
    pos.lat += -0.173 * sin_deg(f - 2.0 * dd)
        - 0.055 * sin_deg(mm - f - 2.0 * dd)
        - 0.046 * sin_deg(mm + f - 2.0 * dd)
        + 0.033 * sin_deg(f + 2.0 * dd)
        + 0.017 * sin_deg(2.0 * mm + f);
    pos.r += -0.58 * cos_deg(mm - 2.0 * dd) - 0.46 * cos_deg(2.0 * dd);

    pos.lon = normalize_degrees(pos.lon);
    pos
}

/// Longitude and latitude corrections (degrees) for the mutual
/// perturbations of the outer planets.
fn planet_perturbations(planet: Planet, d: Time<DayNumber>) -> (f64, f64) {
    let mj = planet_elements(Planet::Jupiter).at(d).mean_anomaly;
    let ms = planet_elements(Planet::Saturn).at(d).mean_anomaly;
    match planet {
        Planet::Jupiter => (
            -0.332 * sin_deg(2.0 * mj - 5.0 * ms - 67.6)
                - 0.056 * sin_deg(2.0 * mj - 2.0 * ms + 21.0)
                + 0.042 * sin_deg(3.0 * mj - 5.0 * ms + 21.0)
                - 0.036 * sin_deg(mj - 2.0 * ms)
                + 0.022 * cos_deg(mj - ms)
                + 0.023 * sin_deg(2.0 * mj - 3.0 * ms + 52.0)
                - 0.016 * sin_deg(mj - 5.0 * ms - 69.0),
            0.0,
        ),
        Planet::Saturn => (
            0.812 * sin_deg(2.0 * mj - 5.0 * ms - 67.6)
                - 0.229 * cos_deg(2.0 * mj - 4.0 * ms - 2.0)
                + 0.119 * sin_deg(mj - 2.0 * ms - 3.0)
                + 0.046 * sin_deg(2.0 * mj - 6.0 * ms - 69.0)
                + 0.014 * sin_deg(mj - 3.0 * ms + 32.0),
            -0.020 * cos_deg(2.0 * mj - 4.0 * ms - 2.0)
                + 0.018 * sin_deg(2.0 * mj - 6.0 * ms - 49.0),
        ),
        Planet::Uranus => {
            let mu = planet_elements(Planet::Uranus).at(d).mean_anomaly;
            (
                0.040 * sin_deg(ms - 2.0 * mu + 6.0)
                    + 0.035 * sin_deg(ms - 3.0 * mu + 33.0)
                    - 0.015 * sin_deg(mj - mu + 20.0),
                0.0,
            )
        }
        Planet::Mercury | Planet::Venus | Planet::Mars | Planet::Neptune => (0.0, 0.0),
    }
}

/// Heliocentric ecliptic rectangular position of a planet in AU,
/// perturbations applied.
pub fn planet_heliocentric(planet: Planet, d: Time<DayNumber>, config: &SearchConfig) -> Vector3 {
    let elements = planet_elements(planet).at(d);
    let mut pos = rectangular_to_spherical(orbital_position(&elements, config));
    let (dlon, dlat) = planet_perturbations(planet, d);
    pos.lon = normalize_degrees(pos.lon + dlon);
    pos.lat += dlat;
    spherical_to_rectangular(pos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    // 1990-04-19 00:00 UT, the classic worked example.
    const EXAMPLE: Time<DayNumber> = Time::new(-3543.0);

    #[test]
    fn kepler_circular_orbit_is_identity() {
        let c = SearchConfig::default();
        assert_abs_diff_eq!(solve_kepler(123.0, 0.0, &c), 123.0, epsilon = 1e-12);
    }

    #[test]
    fn kepler_satisfies_equation() {
        let c = SearchConfig::default();
        for &(m, e) in &[(30.0, 0.2056), (200.0, 0.0934), (359.0, 0.0549)] {
            let ecc = solve_kepler(m, e, &c);
            let residual = ecc - e.to_degrees() * sin_deg(ecc) - m;
            assert!(residual.abs() < 0.01, "M={m} e={e}: residual {residual}");
        }
    }

    #[test]
    fn kepler_respects_iteration_cap() {
        let c = SearchConfig {
            max_kepler_iterations: 0,
            ..SearchConfig::default()
        };
        // First guess only, still finite.
        assert!(solve_kepler(100.0, 0.9, &c).is_finite());
    }

    #[test]
    fn kepler_tolerance_is_in_degrees() {
        let tight = SearchConfig {
            max_kepler_iterations: 50,
            kepler_tolerance: qtty::Degrees::new(1e-10),
            ..SearchConfig::default()
        };
        let (m, e) = (47.0, 0.2056);
        let ecc = solve_kepler(m, e, &tight);
        assert_abs_diff_eq!(ecc - e.to_degrees() * sin_deg(ecc), m, epsilon = 1e-8);
    }

    #[test]
    fn sun_example_position() {
        let s = rectangular_to_spherical(sun_rectangular(EXAMPLE));
        assert_abs_diff_eq!(s.lon, 28.6869, epsilon = 0.01);
        assert_abs_diff_eq!(s.r, 1.004323, epsilon = 1e-4);
        assert_abs_diff_eq!(s.lat, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn moon_example_position() {
        let m = moon_ecliptic(EXAMPLE, &SearchConfig::default());
        assert_abs_diff_eq!(m.lon, 306.95, epsilon = 1.0);
        assert_abs_diff_eq!(m.lat, -0.58, epsilon = 0.3);
        assert!((55.0..64.0).contains(&m.r), "distance {} Earth radii", m.r);
    }

    #[test]
    fn mercury_example_position() {
        let v = planet_heliocentric(Planet::Mercury, EXAMPLE, &SearchConfig::default());
        let s = rectangular_to_spherical(v);
        assert_abs_diff_eq!(s.lon, 170.57, epsilon = 0.1);
        assert_abs_diff_eq!(s.lat, 5.93, epsilon = 0.1);
        assert_abs_diff_eq!(s.r, 0.3749, epsilon = 0.001);
    }

    #[test]
    fn only_outer_giants_are_perturbed() {
        for planet in [Planet::Mercury, Planet::Venus, Planet::Mars, Planet::Neptune] {
            assert_eq!(planet_perturbations(planet, EXAMPLE), (0.0, 0.0));
        }
        let (dlon, _) = planet_perturbations(Planet::Saturn, EXAMPLE);
        assert!(dlon != 0.0 && dlon.abs() < 1.5);
    }

    #[test]
    fn planet_distances_stay_near_semi_major_axis() {
        let c = SearchConfig::default();
        for planet in [
            Planet::Mercury,
            Planet::Venus,
            Planet::Mars,
            Planet::Jupiter,
            Planet::Saturn,
            Planet::Uranus,
            Planet::Neptune,
        ] {
            let el = planet_elements(planet).at(EXAMPLE);
            let r = rectangular_to_spherical(planet_heliocentric(planet, EXAMPLE, &c)).r;
            let (lo, hi) = (
                el.semi_major_axis * (1.0 - el.eccentricity) - 1e-6,
                el.semi_major_axis * (1.0 + el.eccentricity) + 1e-6,
            );
            assert!((lo..=hi).contains(&r), "{planet:?}: r={r}");
        }
    }
}
