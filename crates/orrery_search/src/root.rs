//! Shared scan-and-refine root finder.
//!
//! Every search in this crate reduces its event to a zero of a scalar
//! function of time and funnels through [`find_root`]: a coarse scan
//! until the function changes sign, then false-position refinement with
//! a bisection fallback. The searches differ only in the function they
//! hand over and in how they dress up the refined time as an event.

use crate::error::SearchError;

/// Guard added past a found event before a windowed scan resumes,
/// in days (2 seconds). Twice the default tolerance, so the resumed
/// scan starts on the far side of the zero just refined.
pub(crate) const RESUME_GUARD_DAYS: f64 = 2.0 / 86_400.0;

/// Default scan span in days (~800 days covers all synodic periods).
pub(crate) const DEFAULT_SCAN_SPAN_DAYS: f64 = 800.0;

/// Default convergence tolerance in days (1 second).
pub(crate) const DEFAULT_TOLERANCE_DAYS: f64 = 1.0 / 86_400.0;

/// Default refinement iteration cap.
pub(crate) const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// A refined zero crossing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Root {
    /// Midpoint of the final bracket, as Julian Date.
    pub jd: f64,
    /// False when the iteration cap ran out before the bracket shrank
    /// below tolerance. The time is still the best available estimate.
    pub converged: bool,
    /// Function value at the earlier edge of the final bracket; its sign
    /// tells which way the function crossed zero.
    pub f_before: f64,
}

/// Scan/refine parameters shared by every search.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RootConfig {
    /// Coarse scan step in days; negative steps scan backward in time.
    pub step_days: f64,
    /// How far the scan walks before giving up.
    pub scan_span_days: f64,
    /// Sign-change test applied to consecutive scan samples.
    pub crossing: fn(f64, f64) -> bool,
    /// Scan samples are clamped at this time when present.
    pub jd_limit: Option<f64>,
    /// Refinement iteration cap.
    pub max_iterations: u32,
    /// Bracket width below which refinement stops, in days.
    pub tolerance_days: f64,
}

/// Accept any sign change. For continuous functions such as a longitude
/// speed.
pub(crate) fn plain_sign_change(f_a: f64, f_b: f64) -> bool {
    f_a * f_b < 0.0
}

/// Accept a sign change unless it is the wrap-around jump of a
/// [-180, +180] separation function (~+180 to ~-180 or vice versa).
/// A genuine crossing has both samples well inside the seam.
pub(crate) fn genuine_crossing(f_a: f64, f_b: f64) -> bool {
    f_a * f_b < 0.0 && (f_a - f_b).abs() < 270.0
}

/// Scan from `jd_start` in `step_days` increments until `crossing` fires
/// between consecutive samples, then refine that bracket. Returns
/// `Ok(None)` when the span (or the clamp time) is exhausted first.
pub(crate) fn find_root<F>(
    f: &F,
    jd_start: f64,
    config: &RootConfig,
) -> Result<Option<Root>, SearchError>
where
    F: Fn(f64) -> Result<f64, SearchError>,
{
    let step = config.step_days;
    let max_steps = (config.scan_span_days / step.abs()).ceil() as usize;

    let mut t_prev = jd_start;
    let mut f_prev = f(t_prev)?;

    for _ in 0..max_steps {
        let t_curr = match config.jd_limit {
            Some(limit) if step > 0.0 => (t_prev + step).min(limit),
            Some(limit) => (t_prev + step).max(limit),
            None => t_prev + step,
        };
        let f_curr = f(t_curr)?;

        // A sample can land exactly on the zero (synthetic providers
        // with integer-day roots do). The sign-change test would skip
        // it, so take it as-is.
        if f_curr == 0.0 {
            return Ok(Some(Root {
                jd: t_curr,
                converged: true,
                f_before: f_prev,
            }));
        }

        if (config.crossing)(f_prev, f_curr) {
            // Order the bracket in time before refining.
            let (t_a, f_a, t_b, f_b) = if t_prev < t_curr {
                (t_prev, f_prev, t_curr, f_curr)
            } else {
                (t_curr, f_curr, t_prev, f_prev)
            };
            let root = refine_root(
                f,
                t_a,
                f_a,
                t_b,
                f_b,
                config.max_iterations,
                config.tolerance_days,
            )?;
            return Ok(Some(root));
        }

        let at_limit = match config.jd_limit {
            Some(limit) if step > 0.0 => t_curr >= limit,
            Some(limit) => t_curr <= limit,
            None => false,
        };
        if at_limit {
            break;
        }

        t_prev = t_curr;
        f_prev = f_curr;
    }

    Ok(None)
}

/// Refine a bracketed sign change. `t_a < t_b` and f changes sign over
/// the bracket.
///
/// False position (linear interpolation through the bracket endpoints)
/// with a bisection fallback: the next probe is the midpoint whenever
/// interpolation lands outside the open bracket, the secant is flat, or
/// the previous probe failed to halve the bracket. The sign-change
/// invariant holds throughout, so the estimate cannot leave the bracket.
fn refine_root<F>(
    f: &F,
    mut t_a: f64,
    mut f_a: f64,
    mut t_b: f64,
    mut f_b: f64,
    max_iterations: u32,
    tolerance_days: f64,
) -> Result<Root, SearchError>
where
    F: Fn(f64) -> Result<f64, SearchError>,
{
    let mut converged = false;
    let mut force_bisect = false;

    for _ in 0..max_iterations {
        let width = t_b - t_a;
        if width < tolerance_days {
            converged = true;
            break;
        }

        let t_mid = 0.5 * (t_a + t_b);
        let denom = f_b - f_a;
        let t_next = if force_bisect || denom == 0.0 {
            t_mid
        } else {
            let t = t_b - f_b * width / denom;
            if t <= t_a || t >= t_b { t_mid } else { t }
        };

        let f_next = f(t_next)?;
        if f_a * f_next <= 0.0 {
            t_b = t_next;
            f_b = f_next;
        } else {
            t_a = t_next;
            f_a = f_next;
        }

        force_bisect = t_b - t_a > 0.5 * width;
    }

    if !converged && t_b - t_a < tolerance_days {
        converged = true;
    }

    Ok(Root {
        jd: 0.5 * (t_a + t_b),
        converged,
        f_before: f_a,
    })
}
