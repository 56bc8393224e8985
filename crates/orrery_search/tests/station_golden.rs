//! Integration tests for the station search engine.
//!
//! A sine-track provider puts speed zeros at closed-form times; the
//! mean-orbit provider checks a realistic Mars retrograde cycle.

use std::f64::consts::PI;

use orrery_angles::normalize_deg;
use orrery_core::{Body, MeanOrbitProvider, PositionProvider, PositionSample, ProviderError};
use orrery_search::{
    SearchError, StationConfig, StationKind, next_station, prev_station, search_stations,
};

const JD0: f64 = 2_451_545.0;
const TOL: f64 = 1.0 / 86_400.0;

/// Longitude 100 + 10 sin(t), so speed is 10 cos(t): stations at
/// t = pi/2 + k pi, alternating retrograde/direct.
struct SineTrack;

impl PositionProvider for SineTrack {
    fn position(&self, body: Body, jd: f64) -> Result<PositionSample, ProviderError> {
        if body != Body::Mars {
            return Err(ProviderError::UnsupportedBody(body));
        }
        let t = jd - JD0;
        Ok(PositionSample {
            lon_deg: normalize_deg(100.0 + 10.0 * t.sin()),
            lat_deg: 0.0,
            dist_au: 1.5,
            lon_speed_deg_per_day: 10.0 * t.cos(),
        })
    }
}

fn sine_config() -> StationConfig {
    let mut c = StationConfig::for_body(Body::Mars).unwrap();
    // The sine track turns every pi days; step well below that.
    c.step_size_days = 1.0;
    c.scan_span_days = 50.0;
    c
}

#[test]
fn first_station_is_retrograde_at_half_pi() {
    let e = next_station(&SineTrack, Body::Mars, JD0, &sine_config())
        .unwrap()
        .expect("should find the speed zero");
    assert!((e.jd - (JD0 + PI / 2.0)).abs() < TOL, "jd = {}", e.jd);
    assert_eq!(e.kind, StationKind::Retrograde);
    assert!(e.converged);
    // Longitude peaks at the turn.
    assert!((e.lon_deg - 110.0).abs() < 1e-6, "lon = {}", e.lon_deg);
}

#[test]
fn second_station_is_direct() {
    let e = next_station(&SineTrack, Body::Mars, JD0 + 2.0, &sine_config())
        .unwrap()
        .expect("should find the next speed zero");
    assert!((e.jd - (JD0 + 3.0 * PI / 2.0)).abs() < TOL, "jd = {}", e.jd);
    assert_eq!(e.kind, StationKind::Direct);
    assert!((e.lon_deg - 90.0).abs() < 1e-6);
}

#[test]
fn prev_station_searches_backward() {
    let e = prev_station(&SineTrack, Body::Mars, JD0 + 3.0, &sine_config())
        .unwrap()
        .expect("should find the station behind us");
    assert!((e.jd - (JD0 + PI / 2.0)).abs() < TOL, "jd = {}", e.jd);
    assert_eq!(e.kind, StationKind::Retrograde);
}

#[test]
fn window_finds_alternating_stations_in_order() {
    let events =
        search_stations(&SineTrack, Body::Mars, JD0, JD0 + 10.0, &sine_config()).unwrap();
    // pi/2, 3pi/2, 5pi/2 fall inside [0, 10).
    assert_eq!(events.len(), 3, "got {}", events.len());
    let expected = [PI / 2.0, 3.0 * PI / 2.0, 5.0 * PI / 2.0];
    for (e, want) in events.iter().zip(expected) {
        assert!((e.jd - (JD0 + want)).abs() < TOL, "jd = {}", e.jd);
    }
    assert_eq!(events[0].kind, StationKind::Retrograde);
    assert_eq!(events[1].kind, StationKind::Direct);
    assert_eq!(events[2].kind, StationKind::Retrograde);
    assert!(events.windows(2).all(|w| w[0].jd < w[1].jd));
}

#[test]
fn sun_moon_and_nodes_rejected() {
    let config = sine_config();
    for body in [Body::Sun, Body::Moon, Body::MeanNode, Body::TrueNode] {
        let r = next_station(&SineTrack, body, JD0, &config);
        assert!(
            matches!(r, Err(SearchError::InvalidConfig(_))),
            "{} should be rejected",
            body.name()
        );
    }
}

#[test]
fn mars_retrograde_cycle_in_mean_orbits() {
    let provider = MeanOrbitProvider::new();
    let config = StationConfig::for_body(Body::Mars).unwrap();
    let events =
        search_stations(&provider, Body::Mars, JD0, JD0 + 800.0, &config).unwrap();
    // One Mars synodic cycle (~780 days) holds one retrograde phase.
    assert_eq!(events.len(), 2, "got {}", events.len());
    assert_eq!(events[0].kind, StationKind::Retrograde);
    assert_eq!(events[1].kind, StationKind::Direct);
    let retro_days = events[1].jd - events[0].jd;
    assert!(
        (50.0..100.0).contains(&retro_days),
        "retrograde phase should last ~72 days, got {retro_days}"
    );
    for e in &events {
        assert!(e.converged);
        let speed = provider
            .position(Body::Mars, e.jd)
            .unwrap()
            .lon_speed_deg_per_day;
        assert!(speed.abs() < 1e-3, "speed at station = {speed}");
    }
}

#[test]
fn next_station_agrees_with_window() {
    let provider = MeanOrbitProvider::new();
    let config = StationConfig::for_body(Body::Mars).unwrap();
    let single = next_station(&provider, Body::Mars, JD0, &config)
        .unwrap()
        .expect("should find a Mars station");
    let windowed =
        search_stations(&provider, Body::Mars, JD0, JD0 + 800.0, &config).unwrap();
    assert!((single.jd - windowed[0].jd).abs() < 2.0 * TOL);
    assert_eq!(single.kind, windowed[0].kind);
}
