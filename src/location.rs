// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Observer location.

use qtty::Degrees;

use crate::error::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Latitude limit used by the day-event search.
pub(crate) const SEARCH_LATITUDE_LIMIT: f64 = 89.0;

/// Latitude limit used by the instantaneous position calculator.
pub(crate) const POSITION_LATITUDE_LIMIT: f64 = 89.8;

/// Geographic coordinate in decimal degrees (north and east positive).
///
/// No datum transformation is performed; any WGS84-like coordinate works.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "RawCoordinate", into = "RawCoordinate")
)]
pub struct GeoCoordinate {
    latitude: Degrees,
    longitude: Degrees,
}

impl GeoCoordinate {
    /// Build a coordinate, rejecting values outside [-90, 90] × [-180, 180].
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(Error::NonFiniteCoordinate);
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(Error::LatitudeOutOfRange(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(Error::LongitudeOutOfRange(longitude));
        }
        Ok(Self {
            latitude: Degrees::new(latitude),
            longitude: Degrees::new(longitude),
        })
    }

    #[inline]
    pub fn latitude(&self) -> Degrees {
        self.latitude
    }

    #[inline]
    pub fn longitude(&self) -> Degrees {
        self.longitude
    }

    /// Latitude pulled away from the pole by the given limit.
    #[inline]
    pub(crate) fn clamped_latitude(&self, limit: f64) -> f64 {
        self.latitude.value().clamp(-limit, limit)
    }

    /// Copy of this coordinate with the latitude clamped to `limit`.
    pub(crate) fn clamped(&self, limit: f64) -> Self {
        Self {
            latitude: Degrees::new(self.clamped_latitude(limit)),
            longitude: self.longitude,
        }
    }
}

impl TryFrom<(f64, f64)> for GeoCoordinate {
    type Error = Error;

    fn try_from((latitude, longitude): (f64, f64)) -> Result<Self> {
        Self::new(latitude, longitude)
    }
}

#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
struct RawCoordinate {
    latitude: f64,
    longitude: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<RawCoordinate> for GeoCoordinate {
    type Error = Error;

    fn try_from(raw: RawCoordinate) -> Result<Self> {
        Self::new(raw.latitude, raw.longitude)
    }
}

#[cfg(feature = "serde")]
impl From<GeoCoordinate> for RawCoordinate {
    fn from(c: GeoCoordinate) -> Self {
        Self {
            latitude: c.latitude.value(),
            longitude: c.longitude.value(),
        }
    }
}
