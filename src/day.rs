// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Per-day result types shared by the day calculators.

use chrono::DateTime;
use chrono_tz::Tz;
use qtty::{Degrees, Hours};

use crate::day_window::DayWindow;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How a body relates to the horizon over a whole day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RiseSetType {
    /// At least one horizon crossing during the day.
    Normal,
    /// Above the horizon all day.
    Risen,
    /// Below the horizon all day.
    Set,
}

/// Rise, set and transit of one body over one local day.
///
/// `rise` and `set` are only present when the crossing happens within the
/// local day. `rise_set_type` matters only when both are absent.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct BodyDay {
    pub rise: Option<DateTime<Tz>>,
    pub set: Option<DateTime<Tz>>,
    pub rise_azimuth: Option<Degrees>,
    pub set_azimuth: Option<Degrees>,
    pub transit: Option<DateTime<Tz>>,
    pub transit_elevation: Option<Degrees>,
    pub rise_set_type: RiseSetType,
    /// Hours above the horizon, in [0, 24].
    pub uptime_hours: f64,
}

impl BodyDay {
    /// A day with no crossing at all.
    pub(crate) fn without_crossing(rise_set_type: RiseSetType) -> Self {
        Self {
            rise: None,
            set: None,
            rise_azimuth: None,
            set_azimuth: None,
            transit: None,
            transit_elevation: None,
            rise_set_type,
            uptime_hours: match rise_set_type {
                RiseSetType::Risen => 24.0,
                RiseSetType::Set | RiseSetType::Normal => 0.0,
            },
        }
    }

    pub fn uptime(&self) -> Hours {
        Hours::new(self.uptime_hours)
    }

    /// Rise to set, when both fall on this day in that order.
    pub fn uptime_window(&self) -> Option<DayWindow> {
        match (self.rise, self.set) {
            (Some(rise), Some(set)) if rise < set => Some(DayWindow::new(rise, set)),
            _ => None,
        }
    }
}

/// Whether a twilight band with no crossing is lit or dark all day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TwilightType {
    Light,
    Dark,
}

/// Morning and evening crossings of one solar altitude threshold.
///
/// For the golden-hour band the threshold is +6°: `dawn` is when the morning
/// golden hour ends and `dusk` when the evening one begins.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct TwilightBand {
    pub dawn: Option<DateTime<Tz>>,
    pub dusk: Option<DateTime<Tz>>,
    pub kind: TwilightType,
    /// Hours the Sun spends above the threshold during the day.
    pub duration_hours: f64,
}

impl TwilightBand {
    #[inline]
    pub fn golden_hour_end(&self) -> Option<DateTime<Tz>> {
        self.dawn
    }

    #[inline]
    pub fn golden_hour_start(&self) -> Option<DateTime<Tz>> {
        self.dusk
    }

    /// Dawn to dusk, when both fall on this day in that order.
    pub fn period(&self) -> Option<DayWindow> {
        match (self.dawn, self.dusk) {
            (Some(dawn), Some(dusk)) if dawn < dusk => Some(DayWindow::new(dawn, dusk)),
            _ => None,
        }
    }
}
