// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Observable bodies.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A body whose position and daily events can be computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
}

/// The planets, i.e. the bodies handled by the heliocentric Kepler pipeline.
///
/// The discriminant indexes the element table in [`crate::orbit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Planet {
    Mercury = 0,
    Venus = 1,
    Mars = 2,
    Jupiter = 3,
    Saturn = 4,
    Uranus = 5,
    Neptune = 6,
}

impl Body {
    /// Every body, Sun first.
    pub const ALL: [Body; 9] = [
        Body::Sun,
        Body::Moon,
        Body::Mercury,
        Body::Venus,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
    ];

    /// English name.
    pub const fn name(self) -> &'static str {
        match self {
            Body::Sun => "Sun",
            Body::Moon => "Moon",
            Body::Mercury => "Mercury",
            Body::Venus => "Venus",
            Body::Mars => "Mars",
            Body::Jupiter => "Jupiter",
            Body::Saturn => "Saturn",
            Body::Uranus => "Uranus",
            Body::Neptune => "Neptune",
        }
    }

    /// The planet this body is, if it is one.
    pub const fn planet(self) -> Option<Planet> {
        match self {
            Body::Sun | Body::Moon => None,
            Body::Mercury => Some(Planet::Mercury),
            Body::Venus => Some(Planet::Venus),
            Body::Mars => Some(Planet::Mars),
            Body::Jupiter => Some(Planet::Jupiter),
            Body::Saturn => Some(Planet::Saturn),
            Body::Uranus => Some(Planet::Uranus),
            Body::Neptune => Some(Planet::Neptune),
        }
    }

    #[inline]
    pub const fn is_planet(self) -> bool {
        self.planet().is_some()
    }
}

impl From<Planet> for Body {
    fn from(planet: Planet) -> Self {
        match planet {
            Planet::Mercury => Body::Mercury,
            Planet::Venus => Body::Venus,
            Planet::Mars => Body::Mars,
            Planet::Jupiter => Body::Jupiter,
            Planet::Saturn => Body::Saturn,
            Planet::Uranus => Body::Uranus,
            Planet::Neptune => Body::Neptune,
        }
    }
}

impl std::fmt::Display for Body {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.name())
    }
}
