// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Tunable limits for the iterative searches.

use qtty::{Degrees, Seconds};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Safety valves and constants for the rise/set/transit search and the
/// Kepler solver.
///
/// Each cap bounds the work done per call; when one is exhausted the search
/// returns its best estimate so far. The default values are empirical.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SearchConfig {
    /// Maximum one-minute steps taken when refining a horizon crossing.
    pub max_minute_steps: u32,
    /// Maximum bisection levels in the transit search.
    pub max_transit_depth: u32,
    /// The transit bisection stops once its step drops below this.
    pub transit_resolution: Seconds,
    /// Initial transit bisection step in minutes.
    pub transit_initial_step_minutes: u32,
    /// Maximum Newton iterations when solving Kepler's equation.
    pub max_kepler_iterations: u32,
    /// Kepler iteration stops once successive eccentric anomalies differ by
    /// less than this.
    pub kepler_tolerance: Degrees,
    /// Added to the Moon's elevation before the horizon sign test.
    /// Approximates the lunar disk; the true value varies with distance.
    pub moon_radius_correction: Degrees,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_minute_steps: 60,
            max_transit_depth: 10,
            transit_resolution: Seconds::new(15.0),
            transit_initial_step_minutes: 30,
            max_kepler_iterations: 10,
            kepler_tolerance: Degrees::new(0.005),
            moon_radius_correction: Degrees::new(0.5),
        }
    }
}
