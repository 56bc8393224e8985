use clap::{Parser, Subcommand};
use orrery_angles::deg_to_dms;
use orrery_core::{ALL_BODIES, Body, MeanOrbitProvider, PositionProvider, Sign};
use orrery_search::{
    AspectConfig, AspectEvent, Event, EventQuery, IngressConfig, IngressEvent, StationConfig,
    StationEvent, StationKind, next_aspect, next_ingress, next_station, search_aspects,
    search_events, search_ingresses, search_stations,
};
use orrery_time::{CalendarSystem, CivilDateTime};

#[derive(Parser)]
#[command(name = "orrery", about = "Astronomical event search CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a body's position from the built-in mean-orbit model
    Position {
        /// Body name (sun, moon, mercury, ...)
        body: String,
        /// Datetime (YYYY-MM-DDThh:mm:ss)
        #[arg(long, conflicts_with = "jd")]
        date: Option<String>,
        /// Julian Date
        #[arg(long)]
        jd: Option<f64>,
    },
    /// Find the next exact aspect between two bodies
    NextAspect {
        /// First body name
        body1: String,
        /// Second body name
        body2: String,
        /// Target separation in degrees [0, 180]
        #[arg(long, default_value = "0")]
        aspect: f64,
        /// Datetime (YYYY-MM-DDThh:mm:ss)
        #[arg(long, conflicts_with = "jd")]
        date: Option<String>,
        /// Julian Date
        #[arg(long)]
        jd: Option<f64>,
        /// Coarse scan step in days
        #[arg(long, default_value = "10")]
        step: f64,
    },
    /// List all exact aspects of a pair inside a window
    SearchAspects {
        /// First body name
        body1: String,
        /// Second body name
        body2: String,
        /// Target separation in degrees [0, 180]
        #[arg(long, default_value = "0")]
        aspect: f64,
        /// Window start datetime (YYYY-MM-DDThh:mm:ss)
        #[arg(long, conflicts_with = "jd")]
        date: Option<String>,
        /// Window start Julian Date
        #[arg(long)]
        jd: Option<f64>,
        /// Window length in days
        #[arg(long, default_value = "365")]
        days: f64,
        /// Coarse scan step in days
        #[arg(long, default_value = "10")]
        step: f64,
    },
    /// Find a body's next station (retrograde or direct)
    NextStation {
        /// Body name
        body: String,
        /// Datetime (YYYY-MM-DDThh:mm:ss)
        #[arg(long, conflicts_with = "jd")]
        date: Option<String>,
        /// Julian Date
        #[arg(long)]
        jd: Option<f64>,
    },
    /// List a body's stations inside a window
    SearchStations {
        /// Body name
        body: String,
        /// Window start datetime (YYYY-MM-DDThh:mm:ss)
        #[arg(long, conflicts_with = "jd")]
        date: Option<String>,
        /// Window start Julian Date
        #[arg(long)]
        jd: Option<f64>,
        /// Window length in days
        #[arg(long, default_value = "365")]
        days: f64,
    },
    /// Find a body's next sign ingress
    NextIngress {
        /// Body name
        body: String,
        /// Datetime (YYYY-MM-DDThh:mm:ss)
        #[arg(long, conflicts_with = "jd")]
        date: Option<String>,
        /// Julian Date
        #[arg(long)]
        jd: Option<f64>,
    },
    /// List a body's sign ingresses inside a window
    SearchIngresses {
        /// Body name
        body: String,
        /// Window start datetime (YYYY-MM-DDThh:mm:ss)
        #[arg(long, conflicts_with = "jd")]
        date: Option<String>,
        /// Window start Julian Date
        #[arg(long)]
        jd: Option<f64>,
        /// Window length in days
        #[arg(long, default_value = "365")]
        days: f64,
    },
    /// Full aspectarian report: every classical aspect of every planet
    /// pair, plus stations and ingresses, merged and time-ordered
    Aspectarian {
        /// Window start datetime (YYYY-MM-DDThh:mm:ss)
        #[arg(long, conflicts_with = "jd")]
        date: Option<String>,
        /// Window start Julian Date
        #[arg(long)]
        jd: Option<f64>,
        /// Window length in days
        #[arg(long, default_value = "30")]
        days: f64,
        /// Coarse scan step in days
        #[arg(long, default_value = "1")]
        step: f64,
    },
    /// Convert a civil datetime to a Julian Date
    Jd {
        /// Datetime (YYYY-MM-DDThh:mm:ss)
        date: String,
        /// Use the proleptic Julian calendar
        #[arg(long)]
        julian: bool,
    },
    /// Convert a Julian Date to a civil datetime
    Calendar {
        /// Julian Date
        jd: f64,
        /// Use the proleptic Julian calendar
        #[arg(long)]
        julian: bool,
    },
}

/// Planets the aspectarian report covers, in traditional order.
const ASPECTARIAN_PLANETS: [Body; 10] = [
    Body::Sun,
    Body::Moon,
    Body::Mercury,
    Body::Venus,
    Body::Mars,
    Body::Jupiter,
    Body::Saturn,
    Body::Uranus,
    Body::Neptune,
    Body::Pluto,
];

/// The 11 classical aspects, with their traditional names.
const CLASSICAL_ASPECTS: [(f64, &str); 11] = [
    (0.0, "Conjunction"),
    (30.0, "SemiSextile"),
    (45.0, "SemiSquare"),
    (60.0, "Sextile"),
    (72.0, "Quintile"),
    (90.0, "Square"),
    (120.0, "Trine"),
    (135.0, "SesquiSquare"),
    (144.0, "BiQuintile"),
    (150.0, "Quincunx"),
    (180.0, "Opposition"),
];

/// Caller-side exclusion table for pairs that never reach an aspect
/// within realistic separations. Sun-Mercury pairs are skipped entirely;
/// Sun-Venus beyond 60 degrees and Mercury-Venus beyond 90 degrees
/// exceed the maximum elongations.
fn pair_excluded(p1: Body, p2: Body, aspect_deg: f64) -> bool {
    match (p1, p2) {
        (Body::Sun, Body::Mercury) | (Body::Mercury, Body::Sun) => true,
        (Body::Sun, Body::Venus) | (Body::Venus, Body::Sun) => aspect_deg > 60.0,
        (Body::Mercury, Body::Venus) | (Body::Venus, Body::Mercury) => aspect_deg > 90.0,
        _ => false,
    }
}

fn aspect_name(aspect_deg: f64) -> Option<&'static str> {
    CLASSICAL_ASPECTS
        .iter()
        .find(|(deg, _)| (deg - aspect_deg).abs() < 1e-9)
        .map(|(_, name)| *name)
}

fn parse_body(s: &str) -> Body {
    let lower = s.to_lowercase();
    for body in ALL_BODIES {
        if body.name().to_lowercase() == lower {
            return body;
        }
    }
    eprintln!("Unknown body: {s}");
    eprintln!(
        "Known bodies: {}",
        ALL_BODIES.map(|b| b.name()).join(", ")
    );
    std::process::exit(1);
}

fn parse_date(s: &str) -> Result<CivilDateTime, String> {
    // Parse "YYYY-MM-DDThh:mm:ss" (trailing Z tolerated)
    let s = s.trim_end_matches('Z');
    let parts: Vec<&str> = s.split('T').collect();
    if parts.len() != 2 {
        return Err(format!("expected YYYY-MM-DDThh:mm:ss, got {s}"));
    }
    let date_parts: Vec<&str> = parts[0].split('-').collect();
    let time_parts: Vec<&str> = parts[1].split(':').collect();
    if date_parts.len() != 3 || time_parts.len() != 3 {
        return Err(format!("invalid date/time format: {s}"));
    }
    let year: i32 = date_parts[0].parse().map_err(|e| format!("{e}"))?;
    let month: u32 = date_parts[1].parse().map_err(|e| format!("{e}"))?;
    let day: u32 = date_parts[2].parse().map_err(|e| format!("{e}"))?;
    let hour: u32 = time_parts[0].parse().map_err(|e| format!("{e}"))?;
    let minute: u32 = time_parts[1].parse().map_err(|e| format!("{e}"))?;
    let second: f64 = time_parts[2].parse().map_err(|e| format!("{e}"))?;
    Ok(CivilDateTime::new(year, month, day, hour, minute, second))
}

/// Resolve the start time from either a --date or a --jd argument.
fn resolve_jd(date: Option<String>, jd: Option<f64>) -> f64 {
    match (date, jd) {
        (Some(s), None) => match parse_date(&s) {
            Ok(t) => t.to_jd(CalendarSystem::Gregorian),
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1);
            }
        },
        (None, Some(jd)) => jd,
        _ => {
            eprintln!("Provide exactly one of --date or --jd");
            std::process::exit(1);
        }
    }
}

fn fmt_jd(jd: f64) -> String {
    CivilDateTime::from_jd(jd, CalendarSystem::Gregorian).to_string()
}

fn confidence_suffix(converged: bool) -> &'static str {
    if converged { "" } else { " (low confidence)" }
}

fn print_aspect_event(ev: &AspectEvent) {
    println!(
        "{}  {} {} {} at {:.4} deg{}",
        fmt_jd(ev.jd),
        ev.body1.name(),
        aspect_name(ev.aspect_deg).unwrap_or("Aspect"),
        ev.body2.name(),
        ev.separation_deg,
        confidence_suffix(ev.converged),
    );
}

fn print_station_event(ev: &StationEvent) {
    let motion = match ev.kind {
        StationKind::Retrograde => "retrograde",
        StationKind::Direct => "direct",
    };
    println!(
        "{}  {} stations {} at {:.4} deg{}",
        fmt_jd(ev.jd),
        ev.body.name(),
        motion,
        ev.lon_deg,
        confidence_suffix(ev.converged),
    );
}

fn print_ingress_event(ev: &IngressEvent) {
    println!(
        "{}  {} enters {} ({:.0} deg){}",
        fmt_jd(ev.jd),
        ev.body.name(),
        ev.sign.name(),
        ev.boundary_deg,
        confidence_suffix(ev.converged),
    );
}

fn print_event(ev: &Event) {
    match ev {
        Event::Aspect(e) => print_aspect_event(e),
        Event::Station(e) => print_station_event(e),
        Event::Ingress(e) => print_ingress_event(e),
    }
}

fn exit_err(e: impl std::fmt::Display) -> ! {
    eprintln!("Error: {e}");
    std::process::exit(1);
}

fn main() {
    let cli = Cli::parse();
    let provider = MeanOrbitProvider::new();

    match cli.command {
        Commands::Position { body, date, jd } => {
            let body = parse_body(&body);
            let jd = resolve_jd(date, jd);
            match provider.position(body, jd) {
                Ok(sample) => {
                    let sign = Sign::from_longitude(sample.lon_deg);
                    let in_sign = sample.lon_deg - sign.start_deg();
                    let dms = deg_to_dms(in_sign);
                    println!("{} at {}", body.name(), fmt_jd(jd));
                    println!(
                        "  Longitude: {:.4} deg ({} {} deg {} min {:.1} sec)",
                        sample.lon_deg,
                        sign.name(),
                        dms.degrees,
                        dms.minutes,
                        dms.seconds
                    );
                    println!("  Latitude:  {:.4} deg", sample.lat_deg);
                    println!("  Distance:  {:.6} AU", sample.dist_au);
                    println!("  Speed:     {:.6} deg/day", sample.lon_speed_deg_per_day);
                }
                Err(e) => exit_err(e),
            }
        }

        Commands::NextAspect {
            body1,
            body2,
            aspect,
            date,
            jd,
            step,
        } => {
            let body1 = parse_body(&body1);
            let body2 = parse_body(&body2);
            let jd = resolve_jd(date, jd);
            let mut config = AspectConfig::separation(aspect);
            config.step_size_days = step;
            match next_aspect(&provider, body1, body2, jd, &config) {
                Ok(Some(ev)) => print_aspect_event(&ev),
                Ok(None) => println!("No aspect found in search range"),
                Err(e) => exit_err(e),
            }
        }

        Commands::SearchAspects {
            body1,
            body2,
            aspect,
            date,
            jd,
            days,
            step,
        } => {
            let body1 = parse_body(&body1);
            let body2 = parse_body(&body2);
            let jd = resolve_jd(date, jd);
            let mut config = AspectConfig::separation(aspect);
            config.step_size_days = step;
            match search_aspects(&provider, body1, body2, jd, jd + days, &config) {
                Ok(events) if events.is_empty() => println!("No aspects found in window"),
                Ok(events) => {
                    for ev in &events {
                        print_aspect_event(ev);
                    }
                }
                Err(e) => exit_err(e),
            }
        }

        Commands::NextStation { body, date, jd } => {
            let body = parse_body(&body);
            let jd = resolve_jd(date, jd);
            let config = StationConfig::for_body(body).unwrap_or_else(|e| exit_err(e));
            match next_station(&provider, body, jd, &config) {
                Ok(Some(ev)) => print_station_event(&ev),
                Ok(None) => println!("No station found in search range"),
                Err(e) => exit_err(e),
            }
        }

        Commands::SearchStations {
            body,
            date,
            jd,
            days,
        } => {
            let body = parse_body(&body);
            let jd = resolve_jd(date, jd);
            let config = StationConfig::for_body(body).unwrap_or_else(|e| exit_err(e));
            match search_stations(&provider, body, jd, jd + days, &config) {
                Ok(events) if events.is_empty() => println!("No stations found in window"),
                Ok(events) => {
                    for ev in &events {
                        print_station_event(ev);
                    }
                }
                Err(e) => exit_err(e),
            }
        }

        Commands::NextIngress { body, date, jd } => {
            let body = parse_body(&body);
            let jd = resolve_jd(date, jd);
            let config = IngressConfig::for_body(body);
            match next_ingress(&provider, body, jd, &config) {
                Ok(Some(ev)) => print_ingress_event(&ev),
                Ok(None) => println!("No ingress found in search range"),
                Err(e) => exit_err(e),
            }
        }

        Commands::SearchIngresses {
            body,
            date,
            jd,
            days,
        } => {
            let body = parse_body(&body);
            let jd = resolve_jd(date, jd);
            let config = IngressConfig::for_body(body);
            match search_ingresses(&provider, body, jd, jd + days, &config) {
                Ok(events) if events.is_empty() => println!("No ingresses found in window"),
                Ok(events) => {
                    for ev in &events {
                        print_ingress_event(ev);
                    }
                }
                Err(e) => exit_err(e),
            }
        }

        Commands::Aspectarian {
            date,
            jd,
            days,
            step,
        } => {
            let jd = resolve_jd(date, jd);
            let queries = aspectarian_queries();
            match search_events(&provider, &queries, jd, jd + days, step) {
                Ok(events) if events.is_empty() => println!("No events found in window"),
                Ok(events) => {
                    for ev in &events {
                        print_event(ev);
                    }
                }
                Err(e) => exit_err(e),
            }
        }

        Commands::Jd { date, julian } => {
            let t = parse_date(&date).unwrap_or_else(|e| {
                eprintln!("{e}");
                std::process::exit(1);
            });
            let calendar = if julian {
                CalendarSystem::Julian
            } else {
                CalendarSystem::Gregorian
            };
            println!("{:.6}", t.to_jd(calendar));
        }

        Commands::Calendar { jd, julian } => {
            let calendar = if julian {
                CalendarSystem::Julian
            } else {
                CalendarSystem::Gregorian
            };
            println!("{}", CivilDateTime::from_jd(jd, calendar));
        }
    }
}

/// Build the full aspectarian query set: every planet pair under every
/// classical aspect (minus the exclusion table), stations for bodies
/// that have them, ingresses for all planets.
fn aspectarian_queries() -> Vec<EventQuery> {
    let mut queries = Vec::new();
    for (i, &p1) in ASPECTARIAN_PLANETS.iter().enumerate() {
        for &p2 in &ASPECTARIAN_PLANETS[i + 1..] {
            for (aspect_deg, _) in CLASSICAL_ASPECTS {
                if pair_excluded(p1, p2, aspect_deg) {
                    continue;
                }
                queries.push(EventQuery::Aspect {
                    body1: p1,
                    body2: p2,
                    aspect_deg,
                });
            }
        }
    }
    for &p in &ASPECTARIAN_PLANETS {
        if StationConfig::for_body(p).is_ok() {
            queries.push(EventQuery::Station { body: p });
        }
    }
    for &p in &ASPECTARIAN_PLANETS {
        queries.push(EventQuery::Ingress { body: p });
    }
    queries
}
