//! Station search engine.
//!
//! Finds when a body's geocentric longitude speed crosses zero (station
//! retrograde / station direct), using the shared scan+refine root
//! finder on f(t) = lon_speed(t). Speed is continuous, so the plain
//! sign-change test applies; no wrap seam exists here.

use orrery_core::{Body, PositionProvider};

use crate::aspect_types::SearchDirection;
use crate::error::SearchError;
use crate::root::{self, RESUME_GUARD_DAYS, Root, RootConfig};
use crate::station_types::{StationConfig, StationEvent, StationKind, body_has_stations};

/// Bodies that always run eastward (or, for the nodes, always westward)
/// have no speed zero to find.
fn validate_station_body(body: Body) -> Result<(), SearchError> {
    if body_has_stations(body) {
        Ok(())
    } else {
        Err(SearchError::InvalidConfig(
            "Sun, Moon, and the nodes do not have stations",
        ))
    }
}

fn speed_at<P>(provider: &P, body: Body, jd: f64) -> Result<f64, SearchError>
where
    P: PositionProvider + ?Sized,
{
    Ok(provider.position(body, jd)?.lon_speed_deg_per_day)
}

/// Turn a refined speed zero into an event. The sign of the speed on the
/// earlier side of the bracket classifies the station.
fn build_event<P>(
    provider: &P,
    body: Body,
    root: Root,
) -> Result<StationEvent, SearchError>
where
    P: PositionProvider + ?Sized,
{
    let sample = provider.position(body, root.jd)?;
    let kind = if root.f_before > 0.0 {
        StationKind::Retrograde
    } else {
        StationKind::Direct
    };
    Ok(StationEvent {
        jd: root.jd,
        body,
        lon_deg: sample.lon_deg,
        kind,
        converged: root.converged,
    })
}

/// Find a single station by coarse scan for a speed sign change, then
/// refinement.
fn find_station_event<P>(
    provider: &P,
    body: Body,
    jd_start: f64,
    direction: SearchDirection,
    config: &StationConfig,
) -> Result<Option<StationEvent>, SearchError>
where
    P: PositionProvider + ?Sized,
{
    config.validate().map_err(SearchError::InvalidConfig)?;
    validate_station_body(body)?;

    let step = match direction {
        SearchDirection::Forward => config.step_size_days,
        SearchDirection::Backward => -config.step_size_days,
    };
    let root_config = RootConfig {
        step_days: step,
        scan_span_days: config.scan_span_days,
        crossing: root::plain_sign_change,
        jd_limit: None,
        max_iterations: config.max_iterations,
        tolerance_days: config.tolerance_days,
    };

    let f = |jd: f64| speed_at(provider, body, jd);
    match root::find_root(&f, jd_start, &root_config)? {
        Some(root) => Ok(Some(build_event(provider, body, root)?)),
        None => Ok(None),
    }
}

/// Find the next station after `jd`.
pub fn next_station<P>(
    provider: &P,
    body: Body,
    jd: f64,
    config: &StationConfig,
) -> Result<Option<StationEvent>, SearchError>
where
    P: PositionProvider + ?Sized,
{
    find_station_event(provider, body, jd, SearchDirection::Forward, config)
}

/// Find the previous station before `jd`.
pub fn prev_station<P>(
    provider: &P,
    body: Body,
    jd: f64,
    config: &StationConfig,
) -> Result<Option<StationEvent>, SearchError>
where
    P: PositionProvider + ?Sized,
{
    find_station_event(provider, body, jd, SearchDirection::Backward, config)
}

/// Search for all stations in the half-open window `[jd_start, jd_stop)`,
/// in time order.
pub fn search_stations<P>(
    provider: &P,
    body: Body,
    jd_start: f64,
    jd_stop: f64,
    config: &StationConfig,
) -> Result<Vec<StationEvent>, SearchError>
where
    P: PositionProvider + ?Sized,
{
    config.validate().map_err(SearchError::InvalidConfig)?;
    validate_station_body(body)?;
    if jd_stop <= jd_start {
        return Err(SearchError::InvalidConfig("jd_stop must be after jd_start"));
    }

    let f = |jd: f64| speed_at(provider, body, jd);

    let mut events = Vec::new();
    let mut cursor = jd_start;
    while cursor < jd_stop {
        let root_config = RootConfig {
            step_days: config.step_size_days,
            scan_span_days: jd_stop - cursor,
            crossing: root::plain_sign_change,
            jd_limit: Some(jd_stop),
            max_iterations: config.max_iterations,
            tolerance_days: config.tolerance_days,
        };
        let Some(root) = root::find_root(&f, cursor, &root_config)? else {
            break;
        };

        if root.jd < jd_stop {
            events.push(build_event(provider, body, root)?);
        }
        cursor = root.jd + RESUME_GUARD_DAYS;
    }

    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sun_rejected() {
        assert!(validate_station_body(Body::Sun).is_err());
    }

    #[test]
    fn moon_rejected() {
        assert!(validate_station_body(Body::Moon).is_err());
    }

    #[test]
    fn mean_node_rejected() {
        assert!(validate_station_body(Body::MeanNode).is_err());
    }

    #[test]
    fn mercury_allowed() {
        assert!(validate_station_body(Body::Mercury).is_ok());
    }

    #[test]
    fn vesta_allowed() {
        assert!(validate_station_body(Body::Vesta).is_ok());
    }
}
