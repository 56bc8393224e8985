//! Angular arithmetic for ecliptic longitudes.
//!
//! Pure functions over degrees: normalization to [0, 360), signed and
//! unsigned circular differences, and degrees-minutes-seconds splitting
//! for display. Every search condition in this workspace is expressed
//! through the signed difference, because it is the only difference
//! representation that stays continuous across the 0°/360° seam.

/// Normalize an angle in degrees to [0, 360).
///
/// `normalize_deg(-1.0) == 359.0`, `normalize_deg(360.0) == 0.0`, and
/// inputs congruent modulo 360 map to the same value.
pub fn normalize_deg(deg: f64) -> f64 {
    let mut d = deg % 360.0;
    if d < 0.0 {
        d += 360.0;
    }
    // A tiny negative remainder can round up to exactly 360.0.
    if d >= 360.0 { 0.0 } else { d }
}

/// Shortest signed rotation from `b` to `a`, in (-180, +180].
///
/// Positive means `a` sits ahead of `b` (counterclockwise); the exact
/// half-turn is reported as +180, never -180.
pub fn signed_diff_deg(a: f64, b: f64) -> f64 {
    let mut d = (a - b) % 360.0;
    if d > 180.0 {
        d -= 360.0;
    } else if d <= -180.0 {
        d += 360.0;
    }
    d
}

/// Absolute angular separation between `a` and `b`, in [0, 180].
pub fn unsigned_diff_deg(a: f64, b: f64) -> f64 {
    signed_diff_deg(a, b).abs()
}

/// Degrees traversed going from `b` up to `a` in the direction of
/// increasing longitude, in [0, 360).
pub fn directed_diff_deg(a: f64, b: f64) -> f64 {
    normalize_deg(a - b)
}

/// Degrees-minutes-seconds representation of an angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dms {
    /// Whole degrees (0..29 within a sign, or 0..359 standalone).
    pub degrees: u16,
    /// Arc-minutes (0..59).
    pub minutes: u8,
    /// Arc-seconds (0.0..60.0), may include fractional part.
    pub seconds: f64,
}

/// Convert decimal degrees to degrees-minutes-seconds.
///
/// Handles negative input by taking absolute value.
pub fn deg_to_dms(deg: f64) -> Dms {
    let d = deg.abs();
    let total_degrees = d.floor() as u16;
    let remainder = (d - total_degrees as f64) * 60.0;
    let minutes = remainder.floor() as u8;
    let seconds = (remainder - minutes as f64) * 60.0;
    Dms {
        degrees: total_degrees,
        minutes,
        seconds,
    }
}

/// Convert DMS back to decimal degrees.
pub fn dms_to_deg(dms: &Dms) -> f64 {
    dms.degrees as f64 + dms.minutes as f64 / 60.0 + dms.seconds / 3600.0
}
