//! Aspect search engine.
//!
//! Finds when two bodies reach a target ecliptic longitude difference.
//! The separation function f(t) = signed_diff(lon1 - lon2, target) wraps
//! to [-180, +180], so its zero crossings are exact-aspect times; the
//! wrap seam is rejected by the crossing guard. Scan and refinement are
//! shared with the other searches (see `root`).
//!
//! An aspect of, say, 60 degrees is reached both with body1 ahead of
//! body2 and behind it. By default both branches are searched and the
//! event nearest the start time wins; `AspectConfig::match_both_signs`
//! turns that off.

use orrery_angles::{normalize_deg, signed_diff_deg};
use orrery_core::{Body, PositionProvider};

use crate::aspect_types::{AspectConfig, AspectEvent, AspectMatch, AspectPhase, SearchDirection};
use crate::error::SearchError;
use crate::root::{self, RESUME_GUARD_DAYS, Root, RootConfig};

/// Both bodies' longitudes at `jd`.
fn pair_longitudes<P>(
    provider: &P,
    body1: Body,
    body2: Body,
    jd: f64,
) -> Result<(f64, f64), SearchError>
where
    P: PositionProvider + ?Sized,
{
    let p1 = provider.position(body1, jd)?;
    let p2 = provider.position(body2, jd)?;
    Ok((p1.lon_deg, p2.lon_deg))
}

/// Separation function for one branch: signed offset of (lon1 - lon2)
/// from `target_deg`, wrapped to [-180, +180].
fn separation_at<P>(
    provider: &P,
    body1: Body,
    body2: Body,
    target_deg: f64,
    jd: f64,
) -> Result<f64, SearchError>
where
    P: PositionProvider + ?Sized,
{
    let (lon1, lon2) = pair_longitudes(provider, body1, body2, jd)?;
    Ok(signed_diff_deg(lon1 - lon2, target_deg))
}

/// Branch targets for a config: the requested separation, plus its
/// negated form when both signs are searched. 0 and 180 are their own
/// negation modulo 360 and always get a single branch.
fn branch_targets(config: &AspectConfig) -> (f64, Option<f64>) {
    let a = config.aspect_deg;
    if config.match_both_signs && a != 0.0 && a != 180.0 {
        (a, Some(-a))
    } else {
        (a, None)
    }
}

fn find_branch_root<P>(
    provider: &P,
    body1: Body,
    body2: Body,
    target_deg: f64,
    jd_start: f64,
    root_config: &RootConfig,
) -> Result<Option<Root>, SearchError>
where
    P: PositionProvider + ?Sized,
{
    let f = |jd: f64| separation_at(provider, body1, body2, target_deg, jd);
    root::find_root(&f, jd_start, root_config)
}

/// Report the achieved separation in the signed form closest to the
/// matched branch target, avoiding the 0/360 ambiguity: a hair before an
/// exact conjunction reads ~0, not ~360.
fn closest_separation(lon1: f64, lon2: f64, target_deg: f64) -> f64 {
    let raw = normalize_deg(lon1 - lon2);
    target_deg + signed_diff_deg(raw, target_deg)
}

fn build_event<P>(
    provider: &P,
    body1: Body,
    body2: Body,
    aspect_deg: f64,
    matched_target_deg: f64,
    root: Root,
) -> Result<AspectEvent, SearchError>
where
    P: PositionProvider + ?Sized,
{
    let (lon1, lon2) = pair_longitudes(provider, body1, body2, root.jd)?;
    Ok(AspectEvent {
        jd: root.jd,
        body1,
        body2,
        aspect_deg,
        separation_deg: closest_separation(lon1, lon2, matched_target_deg),
        body1_lon_deg: lon1,
        body2_lon_deg: lon2,
        converged: root.converged,
    })
}

/// Find the single aspect event nearest `jd_start` in the given
/// direction, across both branches.
fn find_aspect_event<P>(
    provider: &P,
    body1: Body,
    body2: Body,
    jd_start: f64,
    direction: SearchDirection,
    config: &AspectConfig,
) -> Result<Option<AspectEvent>, SearchError>
where
    P: PositionProvider + ?Sized,
{
    config.validate().map_err(SearchError::InvalidConfig)?;

    let step = match direction {
        SearchDirection::Forward => config.step_size_days,
        SearchDirection::Backward => -config.step_size_days,
    };
    let root_config = RootConfig {
        step_days: step,
        scan_span_days: config.scan_span_days,
        crossing: root::genuine_crossing,
        jd_limit: None,
        max_iterations: config.max_iterations,
        tolerance_days: config.tolerance_days,
    };

    let (target_a, target_b) = branch_targets(config);
    let root_a = find_branch_root(provider, body1, body2, target_a, jd_start, &root_config)?
        .map(|r| (r, target_a));
    let root_b = match target_b {
        Some(t) => find_branch_root(provider, body1, body2, t, jd_start, &root_config)?
            .map(|r| (r, t)),
        None => None,
    };

    // Keep whichever branch lands nearest the start time.
    let best = match (root_a, root_b) {
        (Some(a), Some(b)) => {
            if (a.0.jd - jd_start).abs() <= (b.0.jd - jd_start).abs() {
                Some(a)
            } else {
                Some(b)
            }
        }
        (a, b) => a.or(b),
    };

    match best {
        Some((root, matched)) => Ok(Some(build_event(
            provider,
            body1,
            body2,
            config.aspect_deg,
            matched,
            root,
        )?)),
        None => Ok(None),
    }
}

/// Find the next aspect event after `jd`.
pub fn next_aspect<P>(
    provider: &P,
    body1: Body,
    body2: Body,
    jd: f64,
    config: &AspectConfig,
) -> Result<Option<AspectEvent>, SearchError>
where
    P: PositionProvider + ?Sized,
{
    find_aspect_event(provider, body1, body2, jd, SearchDirection::Forward, config)
}

/// Find the previous aspect event before `jd`.
pub fn prev_aspect<P>(
    provider: &P,
    body1: Body,
    body2: Body,
    jd: f64,
    config: &AspectConfig,
) -> Result<Option<AspectEvent>, SearchError>
where
    P: PositionProvider + ?Sized,
{
    find_aspect_event(provider, body1, body2, jd, SearchDirection::Backward, config)
}

/// Search for all aspect events in the half-open window
/// `[jd_start, jd_stop)`, in time order.
pub fn search_aspects<P>(
    provider: &P,
    body1: Body,
    body2: Body,
    jd_start: f64,
    jd_stop: f64,
    config: &AspectConfig,
) -> Result<Vec<AspectEvent>, SearchError>
where
    P: PositionProvider + ?Sized,
{
    config.validate().map_err(SearchError::InvalidConfig)?;
    if jd_stop <= jd_start {
        return Err(SearchError::InvalidConfig("jd_stop must be after jd_start"));
    }

    let (target_a, target_b) = branch_targets(config);

    let mut events = Vec::new();
    let mut cursor = jd_start;
    while cursor < jd_stop {
        let root_config = RootConfig {
            step_days: config.step_size_days,
            scan_span_days: jd_stop - cursor,
            crossing: root::genuine_crossing,
            jd_limit: Some(jd_stop),
            max_iterations: config.max_iterations,
            tolerance_days: config.tolerance_days,
        };

        let root_a = find_branch_root(provider, body1, body2, target_a, cursor, &root_config)?
            .map(|r| (r, target_a));
        let root_b = match target_b {
            Some(t) => find_branch_root(provider, body1, body2, t, cursor, &root_config)?
                .map(|r| (r, t)),
            None => None,
        };

        // The earlier of the two branch hits is the next event.
        let best = match (root_a, root_b) {
            (Some(a), Some(b)) => Some(if a.0.jd <= b.0.jd { a } else { b }),
            (a, b) => a.or(b),
        };
        let Some((root, matched)) = best else { break };

        if root.jd < jd_stop {
            events.push(build_event(
                provider,
                body1,
                body2,
                config.aspect_deg,
                matched,
                root,
            )?);
        }
        cursor = root.jd + RESUME_GUARD_DAYS;
    }

    Ok(events)
}

/// Test whether two instantaneous positions sit within `orb_deg` of the
/// target separation, and classify the relative motion.
///
/// Both signed forms of the separation are covered: the offset is
/// measured from whichever side of exactness the pair is on. Returns
/// `None` when the pair is out of orb.
pub fn match_aspect(
    lon1_deg: f64,
    speed1_deg_per_day: f64,
    lon2_deg: f64,
    speed2_deg_per_day: f64,
    aspect_deg: f64,
    orb_deg: f64,
) -> Option<AspectMatch> {
    let orb = orb_deg.abs();
    let sd = signed_diff_deg(lon1_deg, lon2_deg);
    let delta = sd.abs() - aspect_deg;
    if delta.abs() > orb {
        return None;
    }

    // d|sd|/dt: the sign of sd picks which body's speed closes the gap.
    let rate = if sd >= 0.0 {
        speed1_deg_per_day - speed2_deg_per_day
    } else {
        speed2_deg_per_day - speed1_deg_per_day
    };
    let phase = if rate == 0.0 || delta == 0.0 {
        AspectPhase::Stable
    } else if delta * rate < 0.0 {
        AspectPhase::Applying
    } else {
        AspectPhase::Separating
    };

    Some(AspectMatch {
        delta_deg: delta,
        orb_fraction: if orb == 0.0 { 0.0 } else { delta.abs() / orb },
        phase,
    })
}
