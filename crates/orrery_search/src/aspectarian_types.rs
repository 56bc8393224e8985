//! Types for the windowed multi-event enumerator.

use orrery_core::Body;

use crate::aspect_types::AspectEvent;
use crate::ingress_types::IngressEvent;
use crate::station_types::StationEvent;

/// One search request for the enumerator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventQuery {
    /// Exact separations of a body pair.
    Aspect {
        body1: Body,
        body2: Body,
        aspect_deg: f64,
    },
    /// Stations of a body.
    Station { body: Body },
    /// Sign ingresses of a body.
    Ingress { body: Body },
}

/// A dated event from any requested stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    Aspect(AspectEvent),
    Station(StationEvent),
    Ingress(IngressEvent),
}

impl Event {
    /// Event time as Julian Date.
    pub fn jd(&self) -> f64 {
        match self {
            Event::Aspect(e) => e.jd,
            Event::Station(e) => e.jd,
            Event::Ingress(e) => e.jd,
        }
    }

    /// False when the underlying refinement hit its iteration cap.
    pub fn converged(&self) -> bool {
        match self {
            Event::Aspect(e) => e.converged,
            Event::Station(e) => e.converged,
            Event::Ingress(e) => e.converged,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::station_types::StationKind;

    #[test]
    fn event_jd_and_converged_pass_through() {
        let e = Event::Station(StationEvent {
            jd: 2_451_545.5,
            body: Body::Mars,
            lon_deg: 123.4,
            kind: StationKind::Retrograde,
            converged: true,
        });
        assert!((e.jd() - 2_451_545.5).abs() < 1e-12);
        assert!(e.converged());
    }
}
