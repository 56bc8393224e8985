//! Julian Day Number arithmetic.
//!
//! The Julian Day is a continuous count of days since JD 0.0 =
//! 1 Jan -4712, 12:00 noon (proleptic Julian calendar), with midnight
//! always falling on a .5 fraction. Years before Christ use astronomical
//! numbering: year 0 = 1 BC, year -1 = 2 BC, and so on.
//!
//! The conversion pair below is the classic ephemeris-grade algorithm
//! (Montenbruck, Grundlagen der Ephemeridenrechnung, p.49 ff), valid for
//! the whole proleptic range including negative years.

/// Julian Date of the J2000.0 epoch (2000-01-01 12:00).
pub const J2000_JD: f64 = 2_451_545.0;

/// Seconds per day.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Which calendar a civil date is expressed in.
///
/// The Gregorian reform skipped 1582-10-05..14; dates before the reform
/// are conventionally given in the Julian calendar, but both calendars
/// are supported proleptically over the whole range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CalendarSystem {
    Gregorian,
    Julian,
}

/// Convert a calendar date to a Julian Date.
///
/// `hour` is the time of day in decimal hours (0.0..24.0).
pub fn calendar_to_jd(
    year: i32,
    month: u32,
    day: u32,
    hour: f64,
    calendar: CalendarSystem,
) -> f64 {
    let mut u = year as f64;
    if month < 3 {
        u -= 1.0;
    }
    let u0 = u + 4712.0;
    let mut u1 = month as f64 + 1.0;
    if u1 < 4.0 {
        u1 += 12.0;
    }
    let mut jd = (u0 * 365.25).floor() + (30.6 * u1 + 0.000001).floor() + day as f64 + hour / 24.0
        - 63.5;
    if calendar == CalendarSystem::Gregorian {
        let mut u2 = (u.abs() / 100.0).floor() - (u.abs() / 400.0).floor();
        if u < 0.0 {
            u2 = -u2;
        }
        jd = jd - u2 + 2.0;
        if u < 0.0 && u / 100.0 == (u / 100.0).floor() && u / 400.0 != (u / 400.0).floor() {
            jd -= 1.0;
        }
    }
    jd
}

/// Convert a Julian Date back to a calendar date.
///
/// Returns `(year, month, day, hour)` with `hour` in decimal hours
/// (0.0..24.0). Inverse of [`calendar_to_jd`] for the same calendar flag.
pub fn jd_to_calendar(jd: f64, calendar: CalendarSystem) -> (i32, u32, u32, f64) {
    let mut u0 = jd + 32082.5;
    if calendar == CalendarSystem::Gregorian {
        let mut u1 = u0 + (u0 / 36525.0).floor() - (u0 / 146100.0).floor() - 38.0;
        if jd >= 1_830_691.5 {
            u1 += 1.0;
        }
        u0 = u0 + (u1 / 36525.0).floor() - (u1 / 146100.0).floor() - 38.0;
    }
    let u2 = (u0 + 123.0).floor();
    let u3 = ((u2 - 122.2) / 365.25).floor();
    let u4 = ((u2 - (365.25 * u3).floor()) / 30.6001).floor();
    let mut month = (u4 - 1.0) as i32;
    if month > 12 {
        month -= 12;
    }
    let day = (u2 - (365.25 * u3).floor() - (30.6001 * u4).floor()) as u32;
    let year = (u3 + ((u4 - 2.0) / 12.0).floor()) as i32 - 4800;
    let hour = (jd - (jd + 0.5).floor() + 0.5) * 24.0;
    (year, month as u32, day, hour)
}
