// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Degree-based trigonometry helpers.
//!
//! The element tables and perturbation series are all published in degrees,
//! so the formulas read closest to their sources when written against these
//! wrappers. Inverse functions clamp their argument to [-1, 1] first: the
//! products fed to them routinely overshoot by an ulp.

/// Wrap an angle into [0, 360).
#[inline]
pub(crate) fn normalize_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Wrap an hour value into [0, 24).
#[inline]
pub(crate) fn normalize_hours(hours: f64) -> f64 {
    let wrapped = hours.rem_euclid(24.0);
    if wrapped >= 24.0 {
        0.0
    } else {
        wrapped
    }
}

#[inline]
pub(crate) fn sin_deg(x: f64) -> f64 {
    x.to_radians().sin()
}

#[inline]
pub(crate) fn cos_deg(x: f64) -> f64 {
    x.to_radians().cos()
}

#[inline]
pub(crate) fn tan_deg(x: f64) -> f64 {
    x.to_radians().tan()
}

#[inline]
pub(crate) fn asin_deg(x: f64) -> f64 {
    x.clamp(-1.0, 1.0).asin().to_degrees()
}

#[inline]
pub(crate) fn acos_deg(x: f64) -> f64 {
    x.clamp(-1.0, 1.0).acos().to_degrees()
}

#[inline]
pub(crate) fn atan_deg(x: f64) -> f64 {
    x.atan().to_degrees()
}

#[inline]
pub(crate) fn atan2_deg(y: f64, x: f64) -> f64 {
    y.atan2(x).to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn normalize_wraps_both_directions() {
        assert_abs_diff_eq!(normalize_degrees(370.0), 10.0, epsilon = 1e-12);
        assert_abs_diff_eq!(normalize_degrees(-10.0), 350.0, epsilon = 1e-12);
        assert_abs_diff_eq!(normalize_degrees(720.0), 0.0, epsilon = 1e-12);
        assert!(normalize_degrees(-1e-18) < 360.0);
        assert_abs_diff_eq!(normalize_hours(-1.0), 23.0, epsilon = 1e-12);
        assert_abs_diff_eq!(normalize_hours(49.5), 1.5, epsilon = 1e-12);
    }

    #[test]
    fn inverse_trig_clamps_overshoot() {
        assert_abs_diff_eq!(acos_deg(1.000_000_000_1), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(asin_deg(-1.000_000_000_1), -90.0, epsilon = 1e-12);
        assert!(!acos_deg(-2.0).is_nan());
    }

    #[test]
    fn degree_trig() {
        assert_abs_diff_eq!(sin_deg(30.0), 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(cos_deg(60.0), 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(tan_deg(45.0), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(atan2_deg(1.0, -1.0), 135.0, epsilon = 1e-12);
        assert_abs_diff_eq!(atan_deg(1.0), 45.0, epsilon = 1e-12);
    }
}
