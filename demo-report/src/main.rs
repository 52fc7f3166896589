use bloomwatch_core::demo::DEFAULT_SEED;
use bloomwatch_core::{bloom_risk_report, Clock, GeoPoint, SyntheticProvider, SystemClock};
use chrono::{NaiveDate, NaiveTime, TimeDelta};
use clap::Parser;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Day-by-day bloom indicators for one location
#[derive(Parser, Debug)]
#[command(name = "demo-report")]
#[command(about = "BloomWatch RD headless indicator report", long_about = None)]
struct Args {
    /// Latitude in decimal degrees
    #[arg(long, default_value_t = 18.5, allow_negative_numbers = true)]
    lat: f64,

    /// Longitude in decimal degrees
    #[arg(long, default_value_t = -69.9, allow_negative_numbers = true)]
    lon: f64,

    /// First day of the report (YYYY-MM-DD, default today in UTC)
    #[arg(short, long)]
    date: Option<NaiveDate>,

    /// Number of days to report
    #[arg(short = 'n', long, default_value_t = 7)]
    days: u32,

    /// Seed for the synthetic weather
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();
    let point = GeoPoint::new(args.lat, args.lon);
    let provider = SyntheticProvider::new(args.seed);
    let first = args.date.unwrap_or_else(|| SystemClock.today());

    println!("=== BloomWatch RD Report ===\n");
    println!("Location: {}", point);
    println!("Period: {} day(s) from {}\n", args.days, first);
    println!("Date       | Phase | Moon             | Dust | Level    | Rain 7d | Score | Band     | Cotton");
    println!("-----------|-------|------------------|------|----------|---------|-------|----------|---------");

    for offset in 0..args.days {
        let Some(date) = first.checked_add_signed(TimeDelta::days(i64::from(offset))) else {
            error!("Date out of range after {}", first);
            return ExitCode::FAILURE;
        };
        let noon = date.and_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap_or(NaiveTime::MIN));

        match bloom_risk_report(&provider, point, noon.and_utc()) {
            Ok(r) => println!(
                "{} | {:5.3} | {:16} | {:4.2} | {:8} | {:7.1} | {:5.2} | {:8} | {}",
                r.date,
                r.lunar.phase,
                r.lunar.name.label(),
                r.sahara.probability,
                r.sahara.level.label(),
                r.precipitation_7d,
                r.risk.total,
                r.risk.band.label(),
                r.cotton.level,
            ),
            Err(e) => {
                error!("Report failed on {}: {}", date, e);
                return ExitCode::FAILURE;
            }
        }
    }

    println!("\n=== Report Complete ===");
    ExitCode::SUCCESS
}
