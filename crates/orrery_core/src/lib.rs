//! Body identifiers and the position provider contract.
//!
//! This crate defines the boundary between the event search engine and
//! whatever computes planetary positions: the [`PositionProvider`] trait,
//! the [`Body`] roster with conventional ephemeris catalogue numbers, and
//! a built-in low-precision [`MeanOrbitProvider`] so the whole workspace
//! runs with no external data files.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod mean_orbit;
pub mod sign;

pub use mean_orbit::MeanOrbitProvider;
pub use sign::{ALL_SIGNS, Sign};

/// Bodies addressable through a position provider.
///
/// An opaque enumerable key: the search engine never interprets it beyond
/// passing it to the provider. The roster and numbering follow the
/// conventional ephemeris catalogue (Sun = 0 … Pluto = 9, nodes 10/11,
/// Chiron 15 … Vesta 20). Earth is deliberately absent — positions are
/// geocentric, so Earth is the observer, never a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
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
    Pluto,
    MeanNode,
    TrueNode,
    Chiron,
    Pholus,
    Ceres,
    Pallas,
    Juno,
    Vesta,
}

/// All bodies in catalogue order, for CLI listings and iteration.
pub const ALL_BODIES: [Body; 18] = [
    Body::Sun,
    Body::Moon,
    Body::Mercury,
    Body::Venus,
    Body::Mars,
    Body::Jupiter,
    Body::Saturn,
    Body::Uranus,
    Body::Neptune,
    Body::Pluto,
    Body::MeanNode,
    Body::TrueNode,
    Body::Chiron,
    Body::Pholus,
    Body::Ceres,
    Body::Pallas,
    Body::Juno,
    Body::Vesta,
];

impl Body {
    /// Conventional ephemeris catalogue number.
    pub const fn code(self) -> i32 {
        match self {
            Self::Sun => 0,
            Self::Moon => 1,
            Self::Mercury => 2,
            Self::Venus => 3,
            Self::Mars => 4,
            Self::Jupiter => 5,
            Self::Saturn => 6,
            Self::Uranus => 7,
            Self::Neptune => 8,
            Self::Pluto => 9,
            Self::MeanNode => 10,
            Self::TrueNode => 11,
            Self::Chiron => 15,
            Self::Pholus => 16,
            Self::Ceres => 17,
            Self::Pallas => 18,
            Self::Juno => 19,
            Self::Vesta => 20,
        }
    }

    /// Convert a catalogue number into a [`Body`].
    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Sun),
            1 => Some(Self::Moon),
            2 => Some(Self::Mercury),
            3 => Some(Self::Venus),
            4 => Some(Self::Mars),
            5 => Some(Self::Jupiter),
            6 => Some(Self::Saturn),
            7 => Some(Self::Uranus),
            8 => Some(Self::Neptune),
            9 => Some(Self::Pluto),
            10 => Some(Self::MeanNode),
            11 => Some(Self::TrueNode),
            15 => Some(Self::Chiron),
            16 => Some(Self::Pholus),
            17 => Some(Self::Ceres),
            18 => Some(Self::Pallas),
            19 => Some(Self::Juno),
            20 => Some(Self::Vesta),
            _ => None,
        }
    }

    /// Display name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sun => "Sun",
            Self::Moon => "Moon",
            Self::Mercury => "Mercury",
            Self::Venus => "Venus",
            Self::Mars => "Mars",
            Self::Jupiter => "Jupiter",
            Self::Saturn => "Saturn",
            Self::Uranus => "Uranus",
            Self::Neptune => "Neptune",
            Self::Pluto => "Pluto",
            Self::MeanNode => "MeanNode",
            Self::TrueNode => "TrueNode",
            Self::Chiron => "Chiron",
            Self::Pholus => "Pholus",
            Self::Ceres => "Ceres",
            Self::Pallas => "Pallas",
            Self::Juno => "Juno",
            Self::Vesta => "Vesta",
        }
    }

    /// All bodies in catalogue order.
    pub const fn all() -> &'static [Body; 18] {
        &ALL_BODIES
    }
}

/// One ecliptic position sample for a (body, time) pair.
///
/// Ephemeral: recomputed on demand, never cached by the search engine.
/// Any caching belongs inside the provider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionSample {
    /// Geocentric ecliptic longitude in degrees [0, 360).
    pub lon_deg: f64,
    /// Geocentric ecliptic latitude in degrees.
    pub lat_deg: f64,
    /// Geocentric distance in astronomical units.
    pub dist_au: f64,
    /// Longitude speed in degrees per day, negative while retrograde.
    pub lon_speed_deg_per_day: f64,
}

/// Position provider failures.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ProviderError {
    /// Requested time lies outside the provider's supported range.
    EpochOutOfRange { jd: f64 },
    /// The provider has no model for this body.
    UnsupportedBody(Body),
    /// Anything else the underlying computation can fail with.
    Computation(String),
}

impl Display for ProviderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EpochOutOfRange { jd } => write!(f, "epoch out of range: jd {jd}"),
            Self::UnsupportedBody(body) => write!(f, "unsupported body: {}", body.name()),
            Self::Computation(msg) => write!(f, "computation error: {msg}"),
        }
    }
}

impl Error for ProviderError {}

/// Source of ecliptic positions, consumed by the search engine.
///
/// Implementations hold all of their own configuration (model choice,
/// data paths, supported epoch range) in the instance — never in global
/// state — so concurrent searches with different settings cannot
/// interfere. A failure must propagate; the engine never substitutes a
/// default sample. `Send + Sync` is required because independent searches
/// may share one provider across threads; the engine itself performs no
/// locking.
pub trait PositionProvider: Send + Sync {
    /// Compute the sample for `body` at Julian Date `jd`.
    fn position(&self, body: Body, jd: f64) -> Result<PositionSample, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_codes_round_trip() {
        for body in ALL_BODIES {
            assert_eq!(Body::from_code(body.code()), Some(body), "{}", body.name());
        }
    }

    #[test]
    fn unknown_codes_rejected() {
        assert_eq!(Body::from_code(-1), None);
        assert_eq!(Body::from_code(12), None);
        assert_eq!(Body::from_code(14), None);
        assert_eq!(Body::from_code(21), None);
    }

    #[test]
    fn body_names_nonempty() {
        for body in ALL_BODIES {
            assert!(!body.name().is_empty());
        }
    }

    #[test]
    fn provider_error_display() {
        let e = ProviderError::EpochOutOfRange { jd: 123.0 };
        assert!(e.to_string().contains("123"));
        let e = ProviderError::UnsupportedBody(Body::TrueNode);
        assert!(e.to_string().contains("TrueNode"));
    }
}
