//! Built-in low-precision position provider.
//!
//! Circular, coplanar mean orbits: heliocentric for the planets and
//! asteroids (geocentric longitudes come from subtracting Earth's
//! heliocentric position, which produces genuine retrograde loops and
//! realistic synodic timing), a circular geocentric Moon, and a linearly
//! regressing mean node. Longitude speed is a central difference over a
//! small fixed interval.
//!
//! Accuracy is degrees-level with correct topology (retrograde frequency,
//! synodic and ingress spacing within about a percent) — enough to drive
//! searches, tests, benches, and the CLI with no ephemeris files. It is
//! not an astrometric ephemeris; latitudes are 0 by construction.

use orrery_angles::{normalize_deg, signed_diff_deg};

use crate::{Body, PositionProvider, PositionSample, ProviderError};

/// Julian Date of the J2000.0 epoch.
const J2000_JD: f64 = 2_451_545.0;

/// Central-difference half step for longitude speed, in days.
const SPEED_STEP_DAYS: f64 = 0.05;

/// Default supported range, roughly 3000 BC to AD 3000 — the span over
/// which mean elements of this kind stay meaningful.
const DEFAULT_JD_MIN: f64 = 625_000.0;
const DEFAULT_JD_MAX: f64 = 2_817_000.0;

/// Mean lunar constants: J2000 mean longitude, sidereal month, mean distance.
const MOON_EPOCH_LON_DEG: f64 = 218.31645;
const SIDEREAL_MONTH_DAYS: f64 = 27.321661;
const MOON_DIST_AU: f64 = 0.002570;

/// Mean lunar node: J2000 longitude and regression period (the node runs
/// backward through the zodiac once in ~18.6 years).
const NODE_EPOCH_LON_DEG: f64 = 125.04452;
const NODE_PERIOD_DAYS: f64 = 6_798.383;

/// Circular mean orbit: J2000 mean longitude plus uniform motion.
#[derive(Debug, Clone, Copy)]
struct MeanOrbit {
    epoch_lon_deg: f64,
    period_days: f64,
    radius_au: f64,
}

/// Earth's own orbit, used for every geocentric reduction.
const EARTH: MeanOrbit = MeanOrbit {
    epoch_lon_deg: 100.46435,
    period_days: 365.25636,
    radius_au: 1.0,
};

/// Heliocentric mean elements (J2000 mean longitude, sidereal period,
/// mean distance) for the bodies modeled as plain orbiters.
const fn helio_orbit(body: Body) -> Option<MeanOrbit> {
    let orbit = match body {
        Body::Mercury => MeanOrbit {
            epoch_lon_deg: 252.25084,
            period_days: 87.9691,
            radius_au: 0.387098,
        },
        Body::Venus => MeanOrbit {
            epoch_lon_deg: 181.97973,
            period_days: 224.7008,
            radius_au: 0.723330,
        },
        Body::Mars => MeanOrbit {
            epoch_lon_deg: 355.45332,
            period_days: 686.9799,
            radius_au: 1.523679,
        },
        Body::Jupiter => MeanOrbit {
            epoch_lon_deg: 34.40438,
            period_days: 4_332.589,
            radius_au: 5.20260,
        },
        Body::Saturn => MeanOrbit {
            epoch_lon_deg: 49.94432,
            period_days: 10_759.22,
            radius_au: 9.55491,
        },
        Body::Uranus => MeanOrbit {
            epoch_lon_deg: 313.23218,
            period_days: 30_685.4,
            radius_au: 19.21845,
        },
        Body::Neptune => MeanOrbit {
            epoch_lon_deg: 304.88003,
            period_days: 60_189.0,
            radius_au: 30.11039,
        },
        Body::Pluto => MeanOrbit {
            epoch_lon_deg: 238.92881,
            period_days: 90_560.0,
            radius_au: 39.48169,
        },
        Body::Chiron => MeanOrbit {
            epoch_lon_deg: 218.9,
            period_days: 18_519.0,
            radius_au: 13.698,
        },
        Body::Pholus => MeanOrbit {
            epoch_lon_deg: 261.6,
            period_days: 33_445.0,
            radius_au: 20.318,
        },
        Body::Ceres => MeanOrbit {
            epoch_lon_deg: 160.4,
            period_days: 1_681.6,
            radius_au: 2.7675,
        },
        Body::Pallas => MeanOrbit {
            epoch_lon_deg: 201.3,
            period_days: 1_686.4,
            radius_au: 2.7730,
        },
        Body::Juno => MeanOrbit {
            epoch_lon_deg: 91.1,
            period_days: 1_591.9,
            radius_au: 2.6682,
        },
        Body::Vesta => MeanOrbit {
            epoch_lon_deg: 100.3,
            period_days: 1_325.7,
            radius_au: 2.3615,
        },
        _ => return None,
    };
    Some(orbit)
}

/// Heliocentric position in the ecliptic plane, in AU.
fn orbit_position_au(orbit: &MeanOrbit, jd: f64) -> (f64, f64) {
    let lon =
        (orbit.epoch_lon_deg + 360.0 / orbit.period_days * (jd - J2000_JD)).to_radians();
    (orbit.radius_au * lon.cos(), orbit.radius_au * lon.sin())
}

/// The built-in provider.
///
/// All configuration lives in the instance; two providers with different
/// epoch ranges never interfere. The type is `Send + Sync` (plain value
/// state, no interior mutability), so one instance can drive concurrent
/// searches.
#[derive(Debug, Clone, Copy)]
pub struct MeanOrbitProvider {
    jd_min: f64,
    jd_max: f64,
}

impl MeanOrbitProvider {
    /// Provider with the default supported epoch range.
    pub fn new() -> Self {
        Self {
            jd_min: DEFAULT_JD_MIN,
            jd_max: DEFAULT_JD_MAX,
        }
    }

    /// Provider restricted to `[jd_min, jd_max]`; requests outside fail
    /// with [`ProviderError::EpochOutOfRange`].
    pub fn with_epoch_range(jd_min: f64, jd_max: f64) -> Self {
        Self { jd_min, jd_max }
    }

    fn check_epoch(&self, jd: f64) -> Result<(), ProviderError> {
        if !jd.is_finite() || jd < self.jd_min || jd > self.jd_max {
            return Err(ProviderError::EpochOutOfRange { jd });
        }
        Ok(())
    }

    /// Geocentric longitude (degrees) and distance (AU) from the raw
    /// model, without the epoch-range check — the central-difference
    /// speed samples sit just outside the requested time.
    fn geocentric(&self, body: Body, jd: f64) -> Result<(f64, f64), ProviderError> {
        let t = jd - J2000_JD;
        match body {
            Body::Sun => {
                let lon = normalize_deg(
                    EARTH.epoch_lon_deg + 360.0 / EARTH.period_days * t + 180.0,
                );
                Ok((lon, EARTH.radius_au))
            }
            Body::Moon => {
                let lon =
                    normalize_deg(MOON_EPOCH_LON_DEG + 360.0 / SIDEREAL_MONTH_DAYS * t);
                Ok((lon, MOON_DIST_AU))
            }
            Body::MeanNode => {
                let lon =
                    normalize_deg(NODE_EPOCH_LON_DEG - 360.0 / NODE_PERIOD_DAYS * t);
                Ok((lon, MOON_DIST_AU))
            }
            _ => {
                let Some(orbit) = helio_orbit(body) else {
                    return Err(ProviderError::UnsupportedBody(body));
                };
                let (px, py) = orbit_position_au(&orbit, jd);
                let (ex, ey) = orbit_position_au(&EARTH, jd);
                let (rx, ry) = (px - ex, py - ey);
                let lon = normalize_deg(ry.atan2(rx).to_degrees());
                Ok((lon, (rx * rx + ry * ry).sqrt()))
            }
        }
    }
}

impl Default for MeanOrbitProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl PositionProvider for MeanOrbitProvider {
    fn position(&self, body: Body, jd: f64) -> Result<PositionSample, ProviderError> {
        self.check_epoch(jd)?;
        let (lon_deg, dist_au) = self.geocentric(body, jd)?;
        let h = SPEED_STEP_DAYS;
        let (lon_plus, _) = self.geocentric(body, jd + h)?;
        let (lon_minus, _) = self.geocentric(body, jd - h)?;
        let lon_speed_deg_per_day = signed_diff_deg(lon_plus, lon_minus) / (2.0 * h);
        Ok(PositionSample {
            lon_deg,
            lat_deg: 0.0,
            dist_au,
            lon_speed_deg_per_day,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sun_longitude_at_j2000() {
        let provider = MeanOrbitProvider::new();
        let sample = provider.position(Body::Sun, J2000_JD).unwrap();
        assert!((sample.lon_deg - 280.46435).abs() < 1e-9, "{}", sample.lon_deg);
        assert!((sample.dist_au - 1.0).abs() < 1e-12);
        assert!(sample.lat_deg.abs() < 1e-12);
    }

    #[test]
    fn sun_speed_is_mean_motion() {
        let provider = MeanOrbitProvider::new();
        let sample = provider.position(Body::Sun, J2000_JD + 50.0).unwrap();
        // Linear longitude, so the central difference recovers the rate exactly.
        assert!((sample.lon_speed_deg_per_day - 360.0 / 365.25636).abs() < 1e-9);
    }

    #[test]
    fn moon_speed_is_mean_motion() {
        let provider = MeanOrbitProvider::new();
        let sample = provider.position(Body::Moon, J2000_JD).unwrap();
        assert!((sample.lon_speed_deg_per_day - 360.0 / 27.321661).abs() < 1e-9);
    }

    #[test]
    fn mean_node_regresses() {
        let provider = MeanOrbitProvider::new();
        let sample = provider.position(Body::MeanNode, J2000_JD).unwrap();
        assert!(sample.lon_speed_deg_per_day < 0.0);
        assert!((sample.lon_speed_deg_per_day + 360.0 / 6_798.383).abs() < 1e-9);
    }

    #[test]
    fn true_node_unsupported() {
        let provider = MeanOrbitProvider::new();
        assert!(matches!(
            provider.position(Body::TrueNode, J2000_JD),
            Err(ProviderError::UnsupportedBody(Body::TrueNode))
        ));
    }

    #[test]
    fn epoch_range_enforced() {
        let provider = MeanOrbitProvider::with_epoch_range(2_451_545.0, 2_451_600.0);
        assert!(provider.position(Body::Sun, 2_451_550.0).is_ok());
        assert!(matches!(
            provider.position(Body::Sun, 2_451_700.0),
            Err(ProviderError::EpochOutOfRange { .. })
        ));
        assert!(matches!(
            provider.position(Body::Sun, f64::NAN),
            Err(ProviderError::EpochOutOfRange { .. })
        ));
    }

    #[test]
    fn mars_distance_within_circular_bounds() {
        let provider = MeanOrbitProvider::new();
        for k in 0..20 {
            let jd = J2000_JD + k as f64 * 67.0;
            let sample = provider.position(Body::Mars, jd).unwrap();
            // |1.524 - 1.0| .. 1.524 + 1.0 for circular coplanar orbits.
            assert!(
                sample.dist_au > 0.4 && sample.dist_au < 2.7,
                "jd {jd}: dist {}",
                sample.dist_au
            );
        }
    }

    #[test]
    fn mercury_goes_retrograde() {
        let provider = MeanOrbitProvider::new();
        // One Mercury synodic period is ~116 days; a 130-day sweep must
        // cross a retrograde phase.
        let retro_days = (0..130)
            .filter(|k| {
                let jd = J2000_JD + *k as f64;
                provider
                    .position(Body::Mercury, jd)
                    .unwrap()
                    .lon_speed_deg_per_day
                    < 0.0
            })
            .count();
        assert!(retro_days > 5, "only {retro_days} retrograde samples");
    }

    #[test]
    fn longitudes_in_range() {
        let provider = MeanOrbitProvider::new();
        for body in crate::ALL_BODIES {
            if body == Body::TrueNode {
                continue;
            }
            for k in 0..8 {
                let jd = J2000_JD + k as f64 * 137.0;
                let sample = provider.position(body, jd).unwrap();
                assert!(
                    (0.0..360.0).contains(&sample.lon_deg),
                    "{} at {jd}: {}",
                    body.name(),
                    sample.lon_deg
                );
            }
        }
    }

    // Compile-time assertion: the provider must be Send + Sync.
    #[allow(dead_code)]
    const _: () = {
        fn assert_send_sync<T: Send + Sync>() {}
        fn check() {
            assert_send_sync::<MeanOrbitProvider>();
        }
    };
}
