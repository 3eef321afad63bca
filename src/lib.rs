// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Almanac
//!
//! Low-precision sky positions and daily events for the Sun, the Moon and the
//! planets Mercury through Neptune, as seen by an observer on the ground.
//!
//! # Core operations
//!
//! - [`calc_position`]: apparent azimuth and elevation of a [`Body`] at an
//!   instant.
//! - [`calc_day`]: rise, set, transit and uptime of a body over a local day.
//! - [`calc_sun_day`]: sunrise, sunset, solar noon, twilight and golden hour.
//! - [`calc_moon_day`]: lunar rise, set and transit plus the day's phase.
//! - [`MoonPhaseCalculator`]: the new, quarter and full moons of a year and
//!   the continuous phase at any instant.
//!
//! # Days and zones
//!
//! A day is always local midnight to the next local midnight in the caller's
//! [`chrono_tz::Tz`], so it can last 23, 24 or 25 hours. Results carry
//! `DateTime<Tz>` instants in that zone.
//!
//! # Time scales
//!
//! Internally every formula is a polynomial in a continuous day count. The
//! [`Time<S>`] wrapper tags that count with its scale:
//!
//! | Marker | Scale |
//! |--------|-------|
//! | [`JD`] | Julian Date |
//! | [`DayNumber`] | Days since 1999-12-31T00:00 UT |
//!
//! UT is used as the dynamical time; no ΔT is applied.

pub mod body;
pub mod config;
pub mod day;
pub mod day_window;
pub mod error;
pub mod events;
pub(crate) mod instant;
mod julian_date_ext;
pub mod location;
pub(crate) mod math;
pub mod moon_day;
pub mod moon_phase;
pub mod orbit;
pub mod position;
pub(crate) mod scales;
pub mod solar;
pub mod sun_day;
pub mod transforms;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use body::{Body, Planet};
pub use config::SearchConfig;
pub use day::{BodyDay, RiseSetType, TwilightBand, TwilightType};
pub use day_window::DayWindow;
pub use error::{Error, Result};
pub use events::{calc_day, calc_day_with};
pub use instant::{Time, TimeScale};
pub use location::GeoCoordinate;
pub use moon_day::{calc_moon_day, calc_moon_day_with, MoonDay};
pub use moon_phase::{
    illuminated_percent, true_phase, MoonPhase, MoonPhaseCalculator, PhaseCache, PhaseEvent,
    PrimaryPhase,
};
pub use position::{calc_position, calc_position_with, Position};
pub use scales::{DayNumber, JD};
pub use sun_day::{calc_sun_day, SunDay, SunEvent};

/// Julian Date: continuous count of days since the Julian Period.
pub type JulianDate = Time<JD>;
