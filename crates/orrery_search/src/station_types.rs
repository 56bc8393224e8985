//! Types for station search.

use orrery_core::Body;

/// Which way the motion flips at a station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StationKind {
    /// Longitude speed crosses from positive to negative: retrograde
    /// motion begins.
    Retrograde,
    /// Longitude speed crosses from negative to positive: direct motion
    /// resumes.
    Direct,
}

/// A station event (the body's longitude speed crosses zero).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StationEvent {
    /// Event time as Julian Date.
    pub jd: f64,
    /// Which body.
    pub body: Body,
    /// Ecliptic longitude at station in degrees [0, 360).
    pub lon_deg: f64,
    /// Whether retrograde or direct station.
    pub kind: StationKind,
    /// False when refinement hit the iteration cap before the bracket
    /// shrank below tolerance.
    pub converged: bool,
}

/// Shortest observed retrograde duration per body, in whole days.
/// A scan stepping at most this far cannot jump over a complete
/// retrograde phase, so no station goes undetected.
fn min_retro_days(body: Body) -> Option<f64> {
    let days = match body {
        Body::Mercury => 16.0,
        Body::Venus => 37.0,
        Body::Mars => 56.0,
        Body::Jupiter => 114.0,
        Body::Saturn => 129.0,
        Body::Uranus => 145.0,
        Body::Neptune => 153.0,
        Body::Pluto => 153.0,
        Body::Chiron => 125.0,
        Body::Pholus => 125.0,
        Body::Ceres => 85.0,
        Body::Pallas => 46.0,
        Body::Juno => 68.0,
        Body::Vesta => 81.0,
        _ => return None,
    };
    Some(days)
}

/// Configuration for station searches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StationConfig {
    /// Coarse scan step size in days. Must stay below the body's
    /// shortest retrograde duration; `for_body` picks that bound.
    pub step_size_days: f64,
    /// How far a single-event search scans before giving up, in days
    /// (default 800).
    pub scan_span_days: f64,
    /// Maximum refinement iterations (default 100).
    pub max_iterations: u32,
    /// Convergence tolerance in days (default 1 second).
    pub tolerance_days: f64,
}

impl StationConfig {
    /// Per-body config with the largest safe scan step.
    ///
    /// Errors for bodies that never stand still geocentrically (Sun,
    /// Moon, and the lunar nodes).
    pub fn for_body(body: Body) -> Result<Self, &'static str> {
        let Some(step) = min_retro_days(body) else {
            return Err("body has no stations");
        };
        Ok(Self {
            step_size_days: step,
            scan_span_days: crate::root::DEFAULT_SCAN_SPAN_DAYS,
            max_iterations: crate::root::DEFAULT_MAX_ITERATIONS,
            tolerance_days: crate::root::DEFAULT_TOLERANCE_DAYS,
        })
    }

    /// Validate the configuration.
    pub(crate) fn validate(&self) -> Result<(), &'static str> {
        if !self.step_size_days.is_finite() || self.step_size_days <= 0.0 {
            return Err("step_size_days must be positive");
        }
        if !self.scan_span_days.is_finite() || self.scan_span_days <= 0.0 {
            return Err("scan_span_days must be positive");
        }
        if self.max_iterations == 0 {
            return Err("max_iterations must be > 0");
        }
        if !self.tolerance_days.is_finite() || self.tolerance_days <= 0.0 {
            return Err("tolerance_days must be positive");
        }
        Ok(())
    }
}

/// True when the body can station at all; used by the search entry
/// points in addition to `for_body`.
pub(crate) fn body_has_stations(body: Body) -> bool {
    min_retro_days(body).is_some()
}
