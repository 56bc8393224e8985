//! Civil calendar timestamp for CLI input and report output.

use crate::julian::{CalendarSystem, calendar_to_jd, jd_to_calendar};

/// Calendar date with sub-second precision.
///
/// The time scale is whatever the position provider uses (the search
/// core never interprets it); this type only does calendar arithmetic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CivilDateTime {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: f64,
}

impl CivilDateTime {
    pub fn new(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: f64) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Convert to a Julian Date.
    pub fn to_jd(&self, calendar: CalendarSystem) -> f64 {
        let hour_frac =
            self.hour as f64 + self.minute as f64 / 60.0 + self.second / 3600.0;
        calendar_to_jd(self.year, self.month, self.day, hour_frac, calendar)
    }

    /// Convert from a Julian Date back to a calendar timestamp.
    pub fn from_jd(jd: f64, calendar: CalendarSystem) -> Self {
        let (year, month, day, hour_frac) = jd_to_calendar(jd, calendar);
        let hour = hour_frac.floor();
        let rem_min = (hour_frac - hour) * 60.0;
        let minute = rem_min.floor();
        let second = (rem_min - minute) * 60.0;
        Self {
            year,
            month,
            day,
            hour: hour as u32,
            minute: minute as u32,
            second,
        }
    }
}

impl std::fmt::Display for CivilDateTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let whole = self.second as u32;
        let frac = self.second - whole as f64;
        if frac.abs() < 1e-9 {
            write!(
                f,
                "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
                self.year, self.month, self.day, self.hour, self.minute, whole
            )
        } else {
            write!(
                f,
                "{:04}-{:02}-{:02}T{:02}:{:02}:{:09.6}",
                self.year, self.month, self.day, self.hour, self.minute, self.second
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::julian::J2000_JD;

    #[test]
    fn new_constructor() {
        let t = CivilDateTime::new(2024, 3, 20, 12, 30, 45.5);
        assert_eq!(t.year, 2024);
        assert_eq!(t.month, 3);
        assert_eq!(t.day, 20);
        assert_eq!(t.hour, 12);
        assert_eq!(t.minute, 30);
        assert!((t.second - 45.5).abs() < 1e-12);
    }

    #[test]
    fn to_jd_j2000() {
        let t = CivilDateTime::new(2000, 1, 1, 12, 0, 0.0);
        assert!((t.to_jd(CalendarSystem::Gregorian) - J2000_JD).abs() < 1e-9);
    }

    #[test]
    fn from_jd_j2000() {
        let t = CivilDateTime::from_jd(J2000_JD, CalendarSystem::Gregorian);
        assert_eq!((t.year, t.month, t.day, t.hour, t.minute), (2000, 1, 1, 12, 0));
        assert!(t.second.abs() < 1e-3);
    }

    #[test]
    fn round_trip_with_time_of_day() {
        let t = CivilDateTime::new(2024, 7, 15, 18, 45, 30.0);
        let jd = t.to_jd(CalendarSystem::Gregorian);
        let back = CivilDateTime::from_jd(jd, CalendarSystem::Gregorian);
        assert_eq!((back.year, back.month, back.day), (2024, 7, 15));
        assert_eq!((back.hour, back.minute), (18, 45));
        assert!((back.second - 30.0).abs() < 1e-3);
    }

    #[test]
    fn display_whole_seconds() {
        let t = CivilDateTime::new(2024, 1, 15, 0, 0, 0.0);
        assert_eq!(t.to_string(), "2024-01-15T00:00:00");
    }

    #[test]
    fn display_fractional_seconds() {
        let t = CivilDateTime::new(2024, 1, 15, 12, 30, 45.123);
        let s = t.to_string();
        assert!(s.contains("12:30:"), "got: {s}");
    }
}
