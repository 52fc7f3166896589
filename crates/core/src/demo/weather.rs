//! Synthetic daily precipitation
//!
//! Shaped like the Open-Meteo `daily` block the dashboard reads
//! (`precipitation_sum` and `time` arrays). Values come from a random
//! source the caller injects; [`seeded_rng`] derives a reproducible one per
//! location and day so overlapping requests agree on shared days.

use crate::core_types::dates::DateRange;
use crate::core_types::geo::GeoPoint;
use crate::core_types::units::{round_to, Millimeters};
use chrono::{Datelike, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Days in a weather series when the caller gives no range
pub const DEFAULT_WEATHER_DAYS: i64 = 7;

/// Chance that a given day records any rain
pub const WET_DAY_PROBABILITY: f64 = 0.3;

/// Upper bound for a single day's rain, mm
pub const MAX_DAILY_MM: f64 = 3.0;

/// Prime multipliers for mixing request inputs into a seed
const SEED_LAT: u64 = 1619;
const SEED_LON: u64 = 31337;
const SEED_DAY: u64 = 6971;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPrecipitation {
    pub precipitation_sum: Vec<f64>,
    pub time: Vec<NaiveDate>,
}

impl DailyPrecipitation {
    /// Sum over every day in the block
    #[must_use]
    pub fn total(&self) -> Millimeters {
        self.precipitation_sum
            .iter()
            .map(|mm| Millimeters::new(mm.max(0.0)))
            .sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherData {
    pub daily: DailyPrecipitation,
}

/// `{"data": {"daily": {...}}}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSeries {
    pub data: WeatherData,
}

impl WeatherSeries {
    #[must_use]
    pub fn total_precipitation(&self) -> Millimeters {
        self.data.daily.total()
    }
}

/// One day's rain: dry with probability `1 - WET_DAY_PROBABILITY`,
/// otherwise uniform in (0, `MAX_DAILY_MM`) at 0.1 mm resolution.
pub fn daily_precipitation<R: Rng + ?Sized>(rng: &mut R) -> Millimeters {
    if rng.random_bool(WET_DAY_PROBABILITY) {
        Millimeters::new(round_to(rng.random_range(0.1..MAX_DAILY_MM), 1))
    } else {
        Millimeters::ZERO
    }
}

/// Reproducible generator for `point` on `date` under `seed`
#[must_use]
pub fn seeded_rng(seed: u64, point: GeoPoint, date: NaiveDate) -> StdRng {
    let mixed = seed
        ^ point.lat.to_bits().wrapping_mul(SEED_LAT)
        ^ point.lon.to_bits().wrapping_mul(SEED_LON)
        ^ (date.num_days_from_ce() as u64).wrapping_mul(SEED_DAY);
    StdRng::seed_from_u64(mixed)
}

/// Daily precipitation for every day in `range`
#[must_use]
pub fn series(seed: u64, point: GeoPoint, range: DateRange) -> WeatherSeries {
    let (precipitation_sum, time): (Vec<f64>, Vec<NaiveDate>) = range
        .days()
        .map(|date| {
            let mut rng = seeded_rng(seed, point, date);
            (*daily_precipitation(&mut rng), date)
        })
        .unzip();

    WeatherSeries {
        data: WeatherData {
            daily: DailyPrecipitation {
                precipitation_sum,
                time,
            },
        },
    }
}
