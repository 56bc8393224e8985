//! Types for the aspect search engine.

use orrery_core::Body;

/// Search direction for single-event searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchDirection {
    Forward,
    Backward,
}

/// Relative motion of a pair that currently sits within orb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AspectPhase {
    /// The separation is closing toward exactness.
    Applying,
    /// The separation is opening away from exactness.
    Separating,
    /// Exact at the sample time, or no measurable relative motion.
    Stable,
}

/// Result of an instantaneous orb test (see `match_aspect`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectMatch {
    /// Signed offset from exactness in degrees (achieved minus target).
    pub delta_deg: f64,
    /// |delta| / orb, in [0, 1]. 0 is exact, 1 is the orb edge.
    pub orb_fraction: f64,
    /// Whether the pair is closing on or moving off the aspect.
    pub phase: AspectPhase,
}

/// Default coarse scan step for aspect searches, in days. Small enough
/// that no body pair sweeps anywhere near a half-turn of relative
/// longitude between samples.
pub const DEFAULT_ASPECT_STEP_DAYS: f64 = 10.0;

/// Configuration for aspect searches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectConfig {
    /// Target angular separation in degrees, within [0, 180].
    pub aspect_deg: f64,
    /// Coarse scan step size in days (default 10).
    pub step_size_days: f64,
    /// For targets other than 0 and 180, search both the +aspect and
    /// -aspect branch and keep the event nearest the start time
    /// (default true). With false, only the branch with body1 ahead of
    /// body2 by the target is searched.
    pub match_both_signs: bool,
    /// How far a single-event search scans before giving up, in days
    /// (default 800).
    pub scan_span_days: f64,
    /// Maximum refinement iterations (default 100).
    pub max_iterations: u32,
    /// Convergence tolerance in days (default 1 second).
    pub tolerance_days: f64,
}

impl AspectConfig {
    /// Config for an arbitrary separation in degrees [0, 180].
    pub fn separation(aspect_deg: f64) -> Self {
        Self {
            aspect_deg,
            step_size_days: DEFAULT_ASPECT_STEP_DAYS,
            match_both_signs: true,
            scan_span_days: crate::root::DEFAULT_SCAN_SPAN_DAYS,
            max_iterations: crate::root::DEFAULT_MAX_ITERATIONS,
            tolerance_days: crate::root::DEFAULT_TOLERANCE_DAYS,
        }
    }

    /// Config for conjunctions (0 degrees).
    pub fn conjunction() -> Self {
        Self::separation(0.0)
    }

    /// Config for oppositions (180 degrees).
    pub fn opposition() -> Self {
        Self::separation(180.0)
    }

    /// Validate the configuration.
    pub(crate) fn validate(&self) -> Result<(), &'static str> {
        if !self.aspect_deg.is_finite() || !(0.0..=180.0).contains(&self.aspect_deg) {
            return Err("aspect_deg must be within [0, 180]");
        }
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

/// An exact-aspect event between two bodies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectEvent {
    /// Event time as Julian Date.
    pub jd: f64,
    /// First body.
    pub body1: Body,
    /// Second body.
    pub body2: Body,
    /// Requested separation in degrees [0, 180].
    pub aspect_deg: f64,
    /// Achieved separation, reported in the signed form closest to the
    /// matched branch (-aspect branch events read as -aspect).
    pub separation_deg: f64,
    /// body1 longitude at the event in degrees [0, 360).
    pub body1_lon_deg: f64,
    /// body2 longitude at the event in degrees [0, 360).
    pub body2_lon_deg: f64,
    /// False when refinement hit the iteration cap before the bracket
    /// shrank below tolerance.
    pub converged: bool,
}
