//! Types for ingress search.

use orrery_core::{Body, Sign};

/// A sign-boundary crossing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IngressEvent {
    /// Event time as Julian Date.
    pub jd: f64,
    /// Which body.
    pub body: Body,
    /// Sign the body entered at the event.
    pub sign: Sign,
    /// The 30-degree boundary crossed, in degrees [0, 360).
    pub boundary_deg: f64,
    /// False when refinement hit the iteration cap before the bracket
    /// shrank below tolerance.
    pub converged: bool,
}

/// Configuration for ingress searches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IngressConfig {
    /// Coarse scan step size in days. Must keep per-step motion well
    /// under a half turn; `for_body` picks a suitable value.
    pub step_size_days: f64,
    /// How far a single-event search scans before giving up, in days.
    /// `for_body` sizes this to the body's slowest plausible sign
    /// transit, retrograde loops included.
    pub scan_span_days: f64,
    /// Maximum refinement iterations (default 100).
    pub max_iterations: u32,
    /// Convergence tolerance in days (default 1 second).
    pub tolerance_days: f64,
}

impl IngressConfig {
    /// Per-body scan step and span.
    pub fn for_body(body: Body) -> Self {
        let (step, span) = match body {
            Body::Moon => (1.0, 40.0),
            Body::Sun => (10.0, 400.0),
            Body::Mercury | Body::Venus => (5.0, 800.0),
            Body::Mars => (10.0, 1_000.0),
            Body::Jupiter => (15.0, 800.0),
            Body::Saturn => (20.0, 1_500.0),
            Body::Uranus => (30.0, 3_000.0),
            Body::Neptune => (30.0, 5_600.0),
            Body::Pluto => (30.0, 11_700.0),
            Body::Chiron => (15.0, 3_300.0),
            Body::Pholus => (20.0, 4_600.0),
            _ => (10.0, 800.0),
        };
        Self {
            step_size_days: step,
            scan_span_days: span,
            max_iterations: crate::root::DEFAULT_MAX_ITERATIONS,
            tolerance_days: crate::root::DEFAULT_TOLERANCE_DAYS,
        }
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
