// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! The Moon's day: horizon events plus phase.

use chrono::NaiveDate;
use chrono_tz::Tz;

use crate::body::Body;
use crate::config::SearchConfig;
use crate::day::BodyDay;
use crate::error::Result;
use crate::events::calc_day_with;
use crate::location::GeoCoordinate;
use crate::moon_phase::{illuminated_percent, MoonPhase, MoonPhaseCalculator, PhaseEvent};

#[cfg(feature = "serde")]
use serde::Serialize;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct MoonDay {
    pub day: BodyDay,
    /// The primary phase of `phase_event` when there is one, otherwise the
    /// intermediate phase the noon fraction falls in.
    pub phase: MoonPhase,
    /// Phase at local noon, in [0, 1): 0 new, 0.5 full.
    pub phase_fraction: f64,
    pub illumination_percent: u8,
    /// The primary phase falling on this day, if any.
    pub phase_event: Option<PhaseEvent>,
}

/// Rise, set, transit and phase of the Moon on the local day `date`.
pub fn calc_moon_day(
    phases: &MoonPhaseCalculator,
    location: &GeoCoordinate,
    date: NaiveDate,
    zone: Tz,
) -> Result<MoonDay> {
    calc_moon_day_with(phases, location, date, zone, &SearchConfig::default())
}

/// [`calc_moon_day`] with explicit search limits.
pub fn calc_moon_day_with(
    phases: &MoonPhaseCalculator,
    location: &GeoCoordinate,
    date: NaiveDate,
    zone: Tz,
    config: &SearchConfig,
) -> Result<MoonDay> {
    let day = calc_day_with(Body::Moon, location, date, zone, true, config)?;
    let phase_fraction = phases.noon_phase(date, zone)?;
    let phase_event = phases.phase_event_on(date, zone);
    // Primary categories belong only to the day their event falls on.
    let phase = phase_event.map_or_else(
        || MoonPhase::between_events(phase_fraction),
        |event| MoonPhase::from(event.phase),
    );
    Ok(MoonDay {
        day,
        phase,
        phase_fraction,
        illumination_percent: illuminated_percent(phase_fraction),
        phase_event,
    })
}
