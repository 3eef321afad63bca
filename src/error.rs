// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error type for the fallible entry points.
//!
//! The numerical core never fails: missing crossings and exhausted iterations
//! are ordinary outcomes. Errors only arise from invalid caller input.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors returned by coordinate construction and the day-level calculators.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("latitude {0}° outside [-90, 90]")]
    LatitudeOutOfRange(f64),

    #[error("longitude {0}° outside [-180, 180]")]
    LongitudeOutOfRange(f64),

    #[error("coordinate is not a finite number")]
    NonFiniteCoordinate,

    #[error("local midnight of {date} does not exist in time zone {zone}")]
    NonexistentLocalTime { date: NaiveDate, zone: String },

    #[error("date {0} is outside the supported range")]
    DateOutOfRange(NaiveDate),
}

/// Crate result alias.
pub type Result<T> = std::result::Result<T, Error>;
