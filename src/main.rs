use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use nanoserde::SerJson;
use tracing::info;
use tracing_subscriber::EnvFilter;

use miqat::easy::{countdown, time12};
use miqat::report::{PrayerReport, QiblaReport};
use miqat::{
    bearing_and_distance, utc_offset, AsrMadhhab, CalculationMethod, GeoCoordinate,
    HighLatitudeRule, PrayerTimes, DEFAULT_DHUHR_MINUTES,
};

#[derive(Parser)]
#[command(name = "miqat", about = "Prayer times and Qibla direction", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Prayer times for a day, and the next prayer from now when the day is today
    Times(TimesArgs),
    /// Bearing and distance to the Kaaba
    Qibla(QiblaArgs),
}

#[derive(Args)]
struct Location {
    /// Latitude in decimal degrees, north positive
    #[arg(long, env = "MIQAT_LAT", default_value_t = 23.8103, allow_negative_numbers = true)]
    lat: f64,
    /// Longitude in decimal degrees, east positive
    #[arg(long, env = "MIQAT_LNG", default_value_t = 90.4125, allow_negative_numbers = true)]
    lng: f64,
}

#[derive(Args)]
struct TimesArgs {
    #[command(flatten)]
    location: Location,
    /// UTC offset in hours, e.g. 5.5
    #[arg(long, env = "MIQAT_TZ", default_value_t = 6.0, allow_negative_numbers = true)]
    tz: f64,
    /// Calculation method (MuslimWorldLeague, ISNA, Egyptian, UmmAlQura, Karachi, Tehran, Jafari)
    #[arg(long, env = "MIQAT_METHOD", default_value = "Karachi")]
    method: CalculationMethod,
    /// Asr madhhab (Standard or Hanafi)
    #[arg(long, env = "MIQAT_ASR", default_value = "Hanafi")]
    asr: AsrMadhhab,
    /// High latitude rule (None, MiddleOfNight, SeventhOfNight, AngleBased)
    #[arg(long, env = "MIQAT_HIGH_LAT", default_value = "AngleBased")]
    high_lat: HighLatitudeRule,
    /// Minutes added to solar noon for Dhuhr
    #[arg(long, default_value_t = DEFAULT_DHUHR_MINUTES)]
    dhuhr_minutes: f64,
    /// Day to compute (YYYY-MM-DD), defaults to today at the location
    #[arg(long)]
    date: Option<NaiveDate>,
    /// Print a JSON document instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct QiblaArgs {
    #[command(flatten)]
    location: Location,
    /// Current compass heading in degrees, to get the arrow rotation
    #[arg(long, allow_negative_numbers = true)]
    heading: Option<f64>,
    /// Print a JSON document
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Commands::Times(args) => times(args),
        Commands::Qibla(args) => qibla(args),
    }
}

fn times(args: TimesArgs) -> Result<()> {
    let coordinate = GeoCoordinate::new(args.location.lat, args.location.lng)?;
    let calculator = PrayerTimes::new(args.method, args.asr, args.high_lat, args.dhuhr_minutes);
    let now = Utc::now().with_timezone(&utc_offset(args.tz)?);
    let date = args.date.unwrap_or_else(|| now.date_naive());
    info!(%coordinate, %date, tz = args.tz, method = %args.method, "computing prayer times");

    let times = calculator
        .compute(date, coordinate, args.tz)
        .with_context(|| format!("prayer times for {date} at {coordinate}"))?;
    // the countdown only makes sense against today's schedule
    let next = match args.date {
        Some(_) => None,
        None => Some(
            calculator
                .next_prayer(coordinate, args.tz, now)
                .context("next prayer")?,
        ),
    };

    if args.json {
        let report =
            PrayerReport::new(&calculator, coordinate, args.tz, &times, next.as_ref());
        println!("{}", report.serialize_json());
        return Ok(());
    }

    println!("{} at {} ({}, {})", date, coordinate, args.method, args.asr);
    for (prayer, time) in times.iter() {
        println!("  {:<8} {:>8}", prayer.name(), time12(&time));
    }
    if let Some(next) = next {
        println!(
            "next: {} at {} (in {})",
            next.name(),
            time12(&next.time),
            countdown(next.remaining_seconds)
        );
    }
    Ok(())
}

fn qibla(args: QiblaArgs) -> Result<()> {
    let observer = GeoCoordinate::new(args.location.lat, args.location.lng)?;
    let qibla = bearing_and_distance(observer);
    info!(%observer, bearing = qibla.bearing_degrees, "computed qibla");

    if args.json {
        let report = QiblaReport::new(observer, &qibla, args.heading);
        println!("{}", report.serialize_json());
        return Ok(());
    }

    println!(
        "qibla: {:.1}° ({}), {:.0} km to the Kaaba",
        qibla.bearing_degrees,
        qibla.compass_point(),
        qibla.distance_km
    );
    if let Some(heading) = args.heading {
        println!("rotate arrow by {:.1}°", qibla.arrow_rotation(heading));
    }
    Ok(())
}
