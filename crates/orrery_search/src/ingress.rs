//! Sign ingress search engine.
//!
//! Finds when a body's longitude crosses a 30-degree sign boundary. The
//! target boundary is computed once from the body's position at the scan
//! start (the next boundary above it) and stays fixed for the whole
//! call; recomputing it mid-search would make the root ill-defined.
//! f(t) = signed_diff(lon(t), boundary) then behaves exactly like a
//! one-body aspect function, seam guard included.

use orrery_angles::{normalize_deg, signed_diff_deg};
use orrery_core::{Body, PositionProvider, Sign};

use crate::aspect_types::SearchDirection;
use crate::error::SearchError;
use crate::ingress_types::{IngressConfig, IngressEvent};
use crate::root::{self, RESUME_GUARD_DAYS, Root, RootConfig};

/// The next 30-degree boundary strictly above `lon_deg`.
/// A body at 29.9 gets 30, not 60; a body in Pisces wraps to 0.
fn next_boundary_deg(lon_deg: f64) -> f64 {
    normalize_deg(30.0 * ((normalize_deg(lon_deg) / 30.0).floor() + 1.0))
}

/// The boundary at or below `lon_deg`: the start of its current sign.
fn current_boundary_deg(lon_deg: f64) -> f64 {
    30.0 * (normalize_deg(lon_deg) / 30.0).floor()
}

fn longitude_at<P>(provider: &P, body: Body, jd: f64) -> Result<f64, SearchError>
where
    P: PositionProvider + ?Sized,
{
    Ok(provider.position(body, jd)?.lon_deg)
}

/// Sign entered at the crossing. An upward crossing (longitude rising
/// through the boundary) enters the sign starting there; a downward,
/// retrograde crossing re-enters the sign below it.
fn entered_sign(boundary_deg: f64, f_before: f64) -> Sign {
    if f_before < 0.0 {
        Sign::from_longitude(boundary_deg + 15.0)
    } else {
        Sign::from_longitude(boundary_deg - 15.0)
    }
}

fn build_event(body: Body, boundary_deg: f64, root: Root) -> IngressEvent {
    IngressEvent {
        jd: root.jd,
        body,
        sign: entered_sign(boundary_deg, root.f_before),
        boundary_deg,
        converged: root.converged,
    }
}

/// Find a single boundary crossing from `jd_start` in the given
/// direction. Forward searches target the next boundary above the
/// starting position; backward searches target the current sign's start.
fn find_ingress_event<P>(
    provider: &P,
    body: Body,
    jd_start: f64,
    direction: SearchDirection,
    config: &IngressConfig,
) -> Result<Option<IngressEvent>, SearchError>
where
    P: PositionProvider + ?Sized,
{
    config.validate().map_err(SearchError::InvalidConfig)?;

    let lon_start = longitude_at(provider, body, jd_start)?;
    let (step, boundary) = match direction {
        SearchDirection::Forward => (config.step_size_days, next_boundary_deg(lon_start)),
        SearchDirection::Backward => (-config.step_size_days, current_boundary_deg(lon_start)),
    };
    let root_config = RootConfig {
        step_days: step,
        scan_span_days: config.scan_span_days,
        crossing: root::genuine_crossing,
        jd_limit: None,
        max_iterations: config.max_iterations,
        tolerance_days: config.tolerance_days,
    };

    let f = |jd: f64| Ok(signed_diff_deg(longitude_at(provider, body, jd)?, boundary));
    match root::find_root(&f, jd_start, &root_config)? {
        Some(root) => Ok(Some(build_event(body, boundary, root))),
        None => Ok(None),
    }
}

/// Find the next sign ingress after `jd`.
pub fn next_ingress<P>(
    provider: &P,
    body: Body,
    jd: f64,
    config: &IngressConfig,
) -> Result<Option<IngressEvent>, SearchError>
where
    P: PositionProvider + ?Sized,
{
    find_ingress_event(provider, body, jd, SearchDirection::Forward, config)
}

/// Find the most recent sign ingress before `jd`: the crossing of the
/// current sign's start boundary.
pub fn prev_ingress<P>(
    provider: &P,
    body: Body,
    jd: f64,
    config: &IngressConfig,
) -> Result<Option<IngressEvent>, SearchError>
where
    P: PositionProvider + ?Sized,
{
    find_ingress_event(provider, body, jd, SearchDirection::Backward, config)
}

/// Search for all sign ingresses in the half-open window
/// `[jd_start, jd_stop)`, in time order. The target boundary is
/// re-derived from the body's position after each found event.
pub fn search_ingresses<P>(
    provider: &P,
    body: Body,
    jd_start: f64,
    jd_stop: f64,
    config: &IngressConfig,
) -> Result<Vec<IngressEvent>, SearchError>
where
    P: PositionProvider + ?Sized,
{
    config.validate().map_err(SearchError::InvalidConfig)?;
    if jd_stop <= jd_start {
        return Err(SearchError::InvalidConfig("jd_stop must be after jd_start"));
    }

    let mut events = Vec::new();
    let mut cursor = jd_start;
    while cursor < jd_stop {
        let boundary = next_boundary_deg(longitude_at(provider, body, cursor)?);
        let root_config = RootConfig {
            step_days: config.step_size_days,
            scan_span_days: jd_stop - cursor,
            crossing: root::genuine_crossing,
            jd_limit: Some(jd_stop),
            max_iterations: config.max_iterations,
            tolerance_days: config.tolerance_days,
        };

        let f = |jd: f64| Ok(signed_diff_deg(longitude_at(provider, body, jd)?, boundary));
        let Some(root) = root::find_root(&f, cursor, &root_config)? else {
            break;
        };

        if root.jd < jd_stop {
            events.push(build_event(body, boundary, root));
        }
        cursor = root.jd + RESUME_GUARD_DAYS;
    }

    Ok(events)
}
