//! Saharan dust likelihood heuristic
//!
//! African dust plumes cross the Atlantic mostly between May and September
//! and reach Hispaniola on the trade winds. The heuristic combines:
//! - a seasonal window (UTC month in [5, 9])
//! - a regional box around the Dominican Republic
//! - a deterministic pseudo-noise term `(sin(lat + lon + day) + 1) / 10`
//!
//! ```text
//! base = 0.65  in season and in region
//!        0.40  in season only
//!        0.08  otherwise
//! probability = clamp(base + noise, 0, 1)
//! ```
//!
//! The level is chosen on the clamped, unrounded probability; only the
//! reported number is rounded to two decimals.

use crate::core_types::geo::{BoundingBox, GeoPoint, DOMINICAN_REPUBLIC};
use crate::core_types::units::{round_to, Fraction};
use crate::error::{ensure_finite, BloomError, Result};
use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use tracing::debug;

/// Months (1-12, UTC) in which trans-Atlantic dust transport peaks
pub const DUST_SEASON_MONTHS: RangeInclusive<u32> = 5..=9;

/// Region that receives the in-region base probability
pub const DUST_REGION: BoundingBox = DOMINICAN_REPUBLIC;

/// Base probability when both in season and in region
pub const BASE_IN_SEASON_IN_REGION: f64 = 0.65;

/// Base probability when in season but outside the region
pub const BASE_IN_SEASON: f64 = 0.40;

/// Base probability outside the dust season
pub const BASE_OFF_SEASON: f64 = 0.08;

/// Decimal places kept in the returned probability
const PROBABILITY_DECIMALS: i32 = 2;

/// Level thresholds on the clamped probability (strictly greater than)
pub mod level_thresholds {
    /// Above this the level is "Alto"
    pub const HIGH_ABOVE: f64 = 0.6;

    /// Above this (and not high) the level is "Moderado"
    pub const MODERATE_ABOVE: f64 = 0.3;
}

/// Qualitative dust level, serialised in Spanish
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DustLevel {
    #[serde(rename = "Bajo")]
    Low,
    #[serde(rename = "Moderado")]
    Moderate,
    #[serde(rename = "Alto")]
    High,
}

impl DustLevel {
    /// Classify a clamped probability. NaN classifies as `Low`.
    #[must_use]
    pub fn from_probability(probability: f64) -> Self {
        match probability {
            p if p > level_thresholds::HIGH_ABOVE => Self::High,
            p if p > level_thresholds::MODERATE_ABOVE => Self::Moderate,
            _ => Self::Low,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Bajo",
            Self::Moderate => "Moderado",
            Self::High => "Alto",
        }
    }
}

impl fmt::Display for DustLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Probability (rounded to 2 places) and level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DustLikelihood {
    pub probability: f64,
    pub level: DustLevel,
}

/// Intermediate terms of the heuristic, exposed for diagnostics and tests
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DustFactors {
    pub in_season: bool,
    pub in_region: bool,
    pub base: f64,
    pub noise: f64,
}

impl DustFactors {
    /// Evaluate every term for `point` at `timestamp` (UTC calendar fields)
    #[must_use]
    pub fn evaluate(point: GeoPoint, timestamp: DateTime<Utc>) -> Self {
        let in_season = DUST_SEASON_MONTHS.contains(&timestamp.month());
        let in_region = DUST_REGION.contains(point);
        let base = match (in_season, in_region) {
            (true, true) => BASE_IN_SEASON_IN_REGION,
            (true, false) => BASE_IN_SEASON,
            (false, _) => BASE_OFF_SEASON,
        };
        Self {
            in_season,
            in_region,
            base,
            noise: noise(point, timestamp.day()),
        }
    }

    /// `base + noise` clamped to [0, 1]
    #[must_use]
    pub fn probability(&self) -> Fraction {
        Fraction::clamped(self.base + self.noise)
    }
}

/// Deterministic noise in [0, 0.2] from coordinates and day of month
#[inline]
#[must_use]
pub fn noise(point: GeoPoint, day_of_month: u32) -> f64 {
    ((point.lat + point.lon + f64::from(day_of_month)).sin() + 1.0) / 10.0
}

/// Saharan dust likelihood at `point` on `timestamp`.
///
/// Coordinates are not range-checked; non-finite coordinates produce a
/// non-finite probability and fail with `ComputationFailure`.
pub fn dust_likelihood(point: GeoPoint, timestamp: DateTime<Utc>) -> Result<DustLikelihood> {
    let factors = DustFactors::evaluate(point, timestamp);
    let probability = ensure_finite(*factors.probability(), "dust probability").map_err(|e| {
        BloomError::computation_failure(format!("{e} for point {point}"))
    })?;
    let level = DustLevel::from_probability(probability);

    debug!(
        "Dust likelihood at {} on {}: season={} region={} base={:.2} noise={:.4} -> {:.4} ({})",
        point,
        timestamp.date_naive(),
        factors.in_season,
        factors.in_region,
        factors.base,
        factors.noise,
        probability,
        level
    );

    Ok(DustLikelihood {
        probability: round_to(probability, PROBABILITY_DECIMALS),
        level,
    })
}
