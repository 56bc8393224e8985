//! Astronomical event search: aspects, stations, and sign ingresses over
//! any position provider, plus a windowed multi-event enumerator.
//!
//! This crate provides:
//! - General-purpose aspect engine for any body pair (conjunction,
//!   opposition, arbitrary separations, instantaneous orb matching)
//! - Station search (retrograde/direct)
//! - Sign ingress search
//! - A windowed enumerator merging every requested stream into one
//!   time-ordered list
//!
//! Every search reduces its event to a zero of a scalar function of
//! time and shares one coarse-scan + refine root finder. Times are
//! Julian Dates throughout; positions come from any
//! [`orrery_core::PositionProvider`], so the same searches run against
//! the built-in mean-orbit model or a full ephemeris.

pub mod aspect;
pub mod aspect_types;
pub mod aspectarian;
pub mod aspectarian_types;
pub mod error;
pub mod ingress;
pub mod ingress_types;
pub(crate) mod root;
pub mod station;
pub mod station_types;

pub use aspect::{match_aspect, next_aspect, prev_aspect, search_aspects};
pub use aspect_types::{
    AspectConfig, AspectEvent, AspectMatch, AspectPhase, DEFAULT_ASPECT_STEP_DAYS,
    SearchDirection,
};
pub use aspectarian::search_events;
pub use aspectarian_types::{Event, EventQuery};
pub use error::SearchError;
pub use ingress::{next_ingress, prev_ingress, search_ingresses};
pub use ingress_types::{IngressConfig, IngressEvent};
pub use station::{next_station, prev_station, search_stations};
pub use station_types::{StationConfig, StationEvent, StationKind};
