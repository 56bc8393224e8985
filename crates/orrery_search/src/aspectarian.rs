//! Windowed multi-event enumerator.
//!
//! Runs every requested search over one half-open window and merges the
//! results into a single time-ordered list, the shape calendar and
//! aspectarian reports consume. Each stream is enumerated eagerly; the
//! cost is dominated by provider calls, so batching those is the
//! provider's business, not the enumerator's.

use orrery_core::PositionProvider;

use crate::aspect::search_aspects;
use crate::aspect_types::AspectConfig;
use crate::aspectarian_types::{Event, EventQuery};
use crate::error::SearchError;
use crate::ingress::search_ingresses;
use crate::ingress_types::IngressConfig;
use crate::station::search_stations;
use crate::station_types::StationConfig;

/// Enumerate all events matching `queries` in `[jd_start, jd_stop)`,
/// sorted by time. Equal times keep query order.
///
/// `step_size_days` is the coarse scan step for aspect and ingress
/// streams. Station streams keep their per-body safe step and only
/// tighten to `step_size_days` when it is finer; widening past the
/// body's shortest retrograde phase could step over stations.
pub fn search_events<P>(
    provider: &P,
    queries: &[EventQuery],
    jd_start: f64,
    jd_stop: f64,
    step_size_days: f64,
) -> Result<Vec<Event>, SearchError>
where
    P: PositionProvider + ?Sized,
{
    if jd_stop <= jd_start {
        return Err(SearchError::InvalidConfig("jd_stop must be after jd_start"));
    }
    if !step_size_days.is_finite() || step_size_days <= 0.0 {
        return Err(SearchError::InvalidConfig("step_size_days must be positive"));
    }

    let mut events = Vec::new();
    for query in queries {
        match *query {
            EventQuery::Aspect {
                body1,
                body2,
                aspect_deg,
            } => {
                let mut config = AspectConfig::separation(aspect_deg);
                config.step_size_days = step_size_days;
                for e in search_aspects(provider, body1, body2, jd_start, jd_stop, &config)? {
                    events.push(Event::Aspect(e));
                }
            }
            EventQuery::Station { body } => {
                let mut config =
                    StationConfig::for_body(body).map_err(SearchError::InvalidConfig)?;
                config.step_size_days = config.step_size_days.min(step_size_days);
                for e in search_stations(provider, body, jd_start, jd_stop, &config)? {
                    events.push(Event::Station(e));
                }
            }
            EventQuery::Ingress { body } => {
                let mut config = IngressConfig::for_body(body);
                config.step_size_days = step_size_days;
                for e in search_ingresses(provider, body, jd_start, jd_stop, &config)? {
                    events.push(Event::Ingress(e));
                }
            }
        }
    }

    events.sort_by(|a, b| a.jd().total_cmp(&b.jd()));
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_core::{Body, MeanOrbitProvider};

    #[test]
    fn rejects_empty_window() {
        let provider = MeanOrbitProvider::new();
        let queries = [EventQuery::Station { body: Body::Mars }];
        let r = search_events(&provider, &queries, 2_451_545.0, 2_451_545.0, 1.0);
        assert!(matches!(r, Err(SearchError::InvalidConfig(_))));
    }

    #[test]
    fn rejects_inverted_window() {
        let provider = MeanOrbitProvider::new();
        let queries = [EventQuery::Station { body: Body::Mars }];
        let r = search_events(&provider, &queries, 2_451_600.0, 2_451_545.0, 1.0);
        assert!(matches!(r, Err(SearchError::InvalidConfig(_))));
    }

    #[test]
    fn rejects_bad_step() {
        let provider = MeanOrbitProvider::new();
        let queries = [EventQuery::Ingress { body: Body::Sun }];
        let r = search_events(&provider, &queries, 2_451_545.0, 2_451_600.0, 0.0);
        assert!(matches!(r, Err(SearchError::InvalidConfig(_))));
    }

    #[test]
    fn station_query_for_sun_is_invalid() {
        let provider = MeanOrbitProvider::new();
        let queries = [EventQuery::Station { body: Body::Sun }];
        let r = search_events(&provider, &queries, 2_451_545.0, 2_451_600.0, 1.0);
        assert!(matches!(r, Err(SearchError::InvalidConfig(_))));
    }

    #[test]
    fn empty_queries_yield_empty_list() {
        let provider = MeanOrbitProvider::new();
        let events = search_events(&provider, &[], 2_451_545.0, 2_451_600.0, 1.0).unwrap();
        assert!(events.is_empty());
    }
}
