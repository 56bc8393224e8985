//! Integration tests for the windowed multi-event enumerator.

use orrery_angles::normalize_deg;
use orrery_core::{Body, MeanOrbitProvider, PositionProvider, PositionSample, ProviderError};
use orrery_search::{Event, EventQuery, SearchError, search_events};

const JD0: f64 = 2_451_545.0;
const TOL: f64 = 1.0 / 86_400.0;

/// Two bodies on exactly linear tracks meeting once at t = 20.
struct LinearPair;

impl PositionProvider for LinearPair {
    fn position(&self, body: Body, jd: f64) -> Result<PositionSample, ProviderError> {
        let t = jd - JD0;
        let (lon, speed) = match body {
            Body::Sun => (10.0 + 1.0 * t, 1.0),
            Body::Moon => (20.0 + 0.5 * t, 0.5),
            other => return Err(ProviderError::UnsupportedBody(other)),
        };
        Ok(PositionSample {
            lon_deg: normalize_deg(lon),
            lat_deg: 0.0,
            dist_au: 1.0,
            lon_speed_deg_per_day: speed,
        })
    }
}

/// Fails past a cutoff; linear before it.
struct FailsAfter {
    jd_max: f64,
}

impl PositionProvider for FailsAfter {
    fn position(&self, body: Body, jd: f64) -> Result<PositionSample, ProviderError> {
        if jd > self.jd_max {
            return Err(ProviderError::Computation("sample limit".into()));
        }
        LinearPair.position(body, jd)
    }
}

#[test]
fn end_to_end_linear_conjunction() {
    let provider = LinearPair;
    let queries = [EventQuery::Aspect {
        body1: Body::Sun,
        body2: Body::Moon,
        aspect_deg: 0.0,
    }];
    let events = search_events(&provider, &queries, JD0, JD0 + 100.0, 1.0).unwrap();
    assert_eq!(events.len(), 1, "got {}", events.len());
    let Event::Aspect(e) = &events[0] else {
        panic!("expected an aspect event");
    };
    assert!((e.jd - (JD0 + 20.0)).abs() < TOL, "jd = {}", e.jd);
    assert!(events[0].converged());
}

#[test]
fn merged_streams_come_out_sorted() {
    let provider = MeanOrbitProvider::new();
    let queries = [
        EventQuery::Aspect {
            body1: Body::Moon,
            body2: Body::Sun,
            aspect_deg: 0.0,
        },
        EventQuery::Ingress { body: Body::Sun },
        EventQuery::Station { body: Body::Mars },
    ];
    let events = search_events(&provider, &queries, JD0, JD0 + 650.0, 10.0).unwrap();

    assert!(
        events.windows(2).all(|w| w[0].jd() <= w[1].jd()),
        "events must be time-ordered"
    );

    let aspects = events.iter().filter(|e| matches!(e, Event::Aspect(_))).count();
    let ingresses = events.iter().filter(|e| matches!(e, Event::Ingress(_))).count();
    let stations = events.iter().filter(|e| matches!(e, Event::Station(_))).count();
    // 650 days hold 22 mean new moons, 21 solar ingresses, and one Mars
    // retrograde phase (station pair).
    assert_eq!(aspects, 22, "new moons: {aspects}");
    assert_eq!(ingresses, 21, "solar ingresses: {ingresses}");
    assert_eq!(stations, 2, "Mars stations: {stations}");
    assert_eq!(events.len(), 45);
    assert!(events.iter().all(Event::converged));
}

#[test]
fn enumeration_is_deterministic() {
    let provider = MeanOrbitProvider::new();
    let queries = [
        EventQuery::Aspect {
            body1: Body::Moon,
            body2: Body::Sun,
            aspect_deg: 90.0,
        },
        EventQuery::Ingress { body: Body::Moon },
    ];
    let a = search_events(&provider, &queries, JD0, JD0 + 60.0, 1.0).unwrap();
    let b = search_events(&provider, &queries, JD0, JD0 + 60.0, 1.0).unwrap();
    assert_eq!(a.len(), b.len());
    for (x, y) in a.iter().zip(&b) {
        assert_eq!(x.jd().to_bits(), y.jd().to_bits());
    }
}

#[test]
fn provider_failure_propagates() {
    let provider = FailsAfter { jd_max: JD0 + 10.0 };
    let queries = [EventQuery::Aspect {
        body1: Body::Sun,
        body2: Body::Moon,
        aspect_deg: 0.0,
    }];
    let r = search_events(&provider, &queries, JD0, JD0 + 100.0, 1.0);
    assert!(matches!(r, Err(SearchError::Provider(_))));
}

#[test]
fn window_boundary_validated_before_any_position_call() {
    // A provider that always fails: the window check must fire first.
    let provider = FailsAfter { jd_max: JD0 - 1.0 };
    let queries = [EventQuery::Aspect {
        body1: Body::Sun,
        body2: Body::Moon,
        aspect_deg: 0.0,
    }];
    let r = search_events(&provider, &queries, JD0 + 5.0, JD0 + 5.0, 1.0);
    assert!(matches!(r, Err(SearchError::InvalidConfig(_))));
}
