//! Julian Day ↔ civil calendar conversions.
//!
//! This crate provides:
//! - Julian Date ↔ calendar conversions in both the Gregorian and the
//!   proleptic Julian calendar
//! - `CivilDateTime`, a year/month/day/hour/minute/second timestamp for
//!   command-line input and report output
//!
//! The search engine itself works in raw fractional Julian Days and never
//! touches calendar semantics; everything here exists for the human-facing
//! edges of the workspace.

pub mod civil;
pub mod julian;

pub use civil::CivilDateTime;
pub use julian::{CalendarSystem, J2000_JD, SECONDS_PER_DAY, calendar_to_jd, jd_to_calendar};
